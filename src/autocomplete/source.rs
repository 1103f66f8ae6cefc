use async_trait::async_trait;

use crate::models::{LocationsResponse, SuggestionItem};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("location search returned {0}")]
    Status(u16),
    #[error("location search failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// 自动补全的数据来源
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn search(&self, keyword: &str) -> Result<Vec<SuggestionItem>, SourceError>;
}

/// 调用本服务 `GET /search/locations` 的数据来源
#[derive(Clone)]
pub struct HttpLocationSource {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpLocationSource {
    pub fn new(http: reqwest::Client, server_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/search/locations", server_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl LocationSource for HttpLocationSource {
    async fn search(&self, keyword: &str) -> Result<Vec<SuggestionItem>, SourceError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("keyword", keyword)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let payload: LocationsResponse = response.json().await?;
        Ok(payload.data)
    }
}
