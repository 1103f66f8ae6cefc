// 客户端自动补全：防抖、过期响应丢弃、地点代码识别

mod coordinator;
mod debounce;
mod source;
mod state;

pub use coordinator::{DEFAULT_DEBOUNCE, SearchCoordinator};
pub use debounce::DebounceSlot;
pub use source::{HttpLocationSource, LocationSource, SourceError};
pub use state::{
    AutocompleteState, KeystrokeOutcome, MIN_QUERY_LEN, Phase, SearchQuery, is_location_code,
};
