pub mod analytics;
pub mod fallback;
pub mod flow;
pub mod prompt;
pub mod providers;
pub mod recommendations;
pub mod search_log;
pub mod session;
pub mod watchlist;

pub use flow::{FlowController, FlowState, FormInput};
pub use recommendations::RecommendationService;
pub use search_log::SearchLogger;
pub use session::{NewUser, SessionStore};
pub use watchlist::{SaveOutcome, Watchlist};
