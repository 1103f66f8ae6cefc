mod fallback;
mod handler;

pub use fallback::match_fallback;
pub use handler::{MIN_KEYWORD_LEN, health, search_flights, search_locations};
