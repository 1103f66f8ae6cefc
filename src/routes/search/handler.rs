use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    AppState,
    error::{ApiError, AppError},
    models::{FlightOffersResponse, FlightSearchRequest, LocationsResponse},
};

use super::fallback::match_fallback;

pub const MIN_KEYWORD_LEN: usize = 2;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    keyword: Option<String>,
}

// 地点自动补全：关键字过短或上游 4xx 都返回空列表
pub async fn search_locations(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<LocationsResponse>, ApiError> {
    // 关键字原样使用，不去除首尾空白
    let keyword = query.keyword.unwrap_or_default();
    if keyword.chars().count() < MIN_KEYWORD_LEN {
        return Ok(Json(LocationsResponse { data: Vec::new() }));
    }

    let fallback = match_fallback(&keyword);
    if !fallback.is_empty() {
        tracing::debug!("Keyword {:?} served from fallback airports", keyword);
        return Ok(Json(LocationsResponse { data: fallback }));
    }

    match state.amadeus.search_locations(&keyword).await {
        Ok(data) => Ok(Json(LocationsResponse { data })),
        Err(AppError::UpstreamClient { status, body }) => {
            tracing::warn!("Location search for {:?} rejected ({}): {}", keyword, status, body);
            Ok(Json(LocationsResponse { data: Vec::new() }))
        }
        Err(err) => Err(err.into_api("Failed to search airports")),
    }
}

// 航班搜索：必填字段在取令牌之前校验
pub async fn search_flights(
    State(state): State<AppState>,
    payload: Result<Json<FlightSearchRequest>, JsonRejection>,
) -> Result<Json<FlightOffersResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
            .into_api("Failed to search flights")
    })?;

    let params = req
        .validate()
        .map_err(|err| err.into_api("Failed to search flights"))?;

    tracing::info!(
        "Searching flights {} -> {} on {}",
        params.origin,
        params.destination,
        params.departure_date
    );

    state
        .amadeus
        .search_flights(&params)
        .await
        .map(Json)
        .map_err(|err| err.into_api("Failed to search flights"))
}

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
