use std::sync::Arc;

use cache::TokenCache;
use config::Config;
use infrastructure::AmadeusClient;

pub mod autocomplete;
pub mod cache;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod middleware;
pub mod models;
pub mod router;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub amadeus: AmadeusClient,
}

impl AppState {
    /// 令牌缓存随状态注入，每个 `AppState` 各自持有一份
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::new();
        let tokens = Arc::new(TokenCache::new(http.clone(), &config));
        let amadeus = AmadeusClient::new(http, tokens, &config);

        Self { config, amadeus }
    }
}
