use chrono::{DateTime, Utc};
use serde::Deserialize;

/// 缓存中的访问令牌，只整体替换，不做原地修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// `expires_at = now + (ttl - margin)`，ttl 小于余量时令牌立即视为过期
    pub fn issued_at(
        value: String,
        now: DateTime<Utc>,
        ttl_secs: u64,
        safety_margin: chrono::Duration,
    ) -> Self {
        let ttl = chrono::Duration::seconds(ttl_secs.min(u32::MAX as u64) as i64);
        Self {
            value,
            expires_at: now + (ttl - safety_margin),
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// 令牌端点的响应体
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}
