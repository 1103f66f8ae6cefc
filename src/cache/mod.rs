// 缓存模块
// 目前只有服务商访问令牌的进程内缓存

pub mod models;
pub mod operations;

pub use models::token::CachedToken;
pub use operations::token::TokenCache;
