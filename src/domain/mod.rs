pub mod models;
mod progress;
pub mod search;

pub use models::*;
pub use progress::CorpusProgress;
pub use search::SearchQuery;
