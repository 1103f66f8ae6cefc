use std::sync::Arc;

use crate::{
    cache::TokenCache,
    config::Config,
    error::AppError,
    models::{
        FlightOffersResponse, FlightSearchParams, ProviderLocation, ProviderLocations,
        SuggestionItem,
    },
};

const LOCATION_PAGE_LIMIT: &str = "10";
const MAX_FLIGHT_OFFERS: &str = "10";

/// 旅行数据服务商客户端，每次调用都从令牌缓存取令牌
#[derive(Clone)]
pub struct AmadeusClient {
    http: reqwest::Client,
    tokens: Arc<TokenCache>,
    locations_url: String,
    flight_offers_url: String,
}

impl AmadeusClient {
    pub fn new(http: reqwest::Client, tokens: Arc<TokenCache>, config: &Config) -> Self {
        Self {
            http,
            tokens,
            locations_url: config.locations_url(),
            flight_offers_url: config.flight_offers_url(),
        }
    }

    /// 按关键字搜索机场和城市
    pub async fn search_locations(&self, keyword: &str) -> Result<Vec<SuggestionItem>, AppError> {
        let token = self.tokens.acquire_token().await?;

        let response = self
            .http
            .get(&self.locations_url)
            .bearer_auth(token)
            .query(&[
                ("keyword", keyword),
                ("subType", "AIRPORT,CITY"),
                ("page[limit]", LOCATION_PAGE_LIMIT),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::from_upstream(status, body));
        }

        let payload: ProviderLocations = response.json().await?;
        Ok(payload
            .data
            .into_iter()
            .filter_map(ProviderLocation::into_suggestion)
            .collect())
    }

    /// 行程搜索，报价原样返回
    pub async fn search_flights(
        &self,
        params: &FlightSearchParams,
    ) -> Result<FlightOffersResponse, AppError> {
        let token = self.tokens.acquire_token().await?;

        let adults = params.passengers.to_string();
        let mut query = vec![
            ("originLocationCode", params.origin.as_str()),
            ("destinationLocationCode", params.destination.as_str()),
            ("departureDate", params.departure_date.as_str()),
        ];
        if let Some(return_date) = params.return_date.as_deref() {
            query.push(("returnDate", return_date));
        }
        query.push(("adults", adults.as_str()));
        query.push(("max", MAX_FLIGHT_OFFERS));

        let response = self
            .http
            .get(&self.flight_offers_url)
            .bearer_auth(token)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::from_upstream(status, body));
        }

        Ok(response.json().await?)
    }
}
