use std::env;
use std::time::Duration;

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://test.api.amadeus.com";
pub const DEFAULT_TOKEN_SAFETY_MARGIN_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    pub provider_base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub token_safety_margin_secs: u64,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
}

impl Config {
    /// 从环境变量加载配置，缺少凭据时直接失败（启动期错误）
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(Config {
            client_id: required("AMADEUS_API_KEY")?,
            client_secret: required("AMADEUS_API_SECRET")?,
            provider_base_url: env::var("AMADEUS_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_PROVIDER_BASE_URL.to_string()),
            token_safety_margin_secs: env::var("TOKEN_SAFETY_MARGIN_SECS")
                .ok()
                .and_then(|v| v.trim_end_matches('s').parse().ok())
                .unwrap_or(DEFAULT_TOKEN_SAFETY_MARGIN_SECS),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_base_uri: env::var("API_BASE_URI").unwrap_or_default(),
        })
    }

    /// 测试和嵌入场景使用的最小配置
    pub fn with_credentials(
        provider_base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Config {
            provider_base_url: provider_base_url.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_safety_margin_secs: DEFAULT_TOKEN_SAFETY_MARGIN_SECS,
            server_host: "127.0.0.1".into(),
            server_port: 3000,
            api_base_uri: String::new(),
        }
    }

    pub fn token_safety_margin(&self) -> Duration {
        Duration::from_secs(self.token_safety_margin_secs)
    }

    pub fn token_url(&self) -> String {
        format!("{}/v1/security/oauth2/token", self.provider_base_url)
    }

    pub fn locations_url(&self) -> String {
        format!("{}/v1/reference-data/locations", self.provider_base_url)
    }

    pub fn flight_offers_url(&self) -> String {
        format!("{}/v2/shopping/flight-offers", self.provider_base_url)
    }
}

// 空字符串和未设置同样视为缺失
fn required(key: &str) -> Result<String, env::VarError> {
    match env::var(key)? {
        value if value.trim().is_empty() => Err(env::VarError::NotPresent),
        value => Ok(value),
    }
}
