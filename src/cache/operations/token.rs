use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use crate::cache::models::token::{CachedToken, TokenResponse};
use crate::config::Config;
use crate::error::AuthError;

/// 访问令牌缓存
///
/// 所有对外请求共享同一个令牌。读路径只拿读锁；刷新通过 `refresh_lock`
/// 串行化，并在拿到锁后重新检查，保证并发过期时只发起一次换取。
pub struct TokenCache {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    safety_margin: chrono::Duration,
    current: RwLock<Option<CachedToken>>,
    refresh_lock: Mutex<()>,
}

impl TokenCache {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            token_url: config.token_url(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            safety_margin: chrono::Duration::seconds(
                config.token_safety_margin_secs.min(u32::MAX as u64) as i64,
            ),
            current: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// 获取一个有效令牌，缓存命中时不发起网络请求
    pub async fn acquire_token(&self) -> Result<String, AuthError> {
        if let Some(value) = self.valid_token().await {
            tracing::debug!("Access token served from cache");
            return Ok(value);
        }

        let _guard = self.refresh_lock.lock().await;

        // 等锁期间可能已被其他请求刷新
        if let Some(value) = self.valid_token().await {
            return Ok(value);
        }

        let token = self.exchange().await?;
        let value = token.value.clone();
        tracing::info!("Access token refreshed, valid until {}", token.expires_at);
        *self.current.write().await = Some(token);

        Ok(value)
    }

    /// 当前缓存的令牌（可能已过期）
    pub async fn cached(&self) -> Option<CachedToken> {
        self.current.read().await.clone()
    }

    async fn valid_token(&self) -> Option<String> {
        let now = Utc::now();
        self.current
            .read()
            .await
            .as_ref()
            .filter(|token| token.is_valid_at(now))
            .map(|token| token.value.clone())
    }

    async fn exchange(&self) -> Result<CachedToken, AuthError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(AuthError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Token request failed: {} {}", status, body);
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let payload: TokenResponse = response.json().await.map_err(AuthError::Transport)?;
        Ok(CachedToken::issued_at(
            payload.access_token,
            Utc::now(),
            payload.expires_in,
            self.safety_margin,
        ))
    }
}
