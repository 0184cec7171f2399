mod preferences;
mod recommendation;
mod search_log;
mod user;

pub use preferences::{Category, Mood, Preferences};
pub use recommendation::RecommendationItem;
pub use search_log::{SearchLog, SearchLogEntry, SEARCH_LOG_CAPACITY};
pub use user::{Role, SessionUser, User};
