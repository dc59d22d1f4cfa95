pub mod deck_scraper;
pub mod search_scraper;
pub mod tournament_scraper;

pub use deck_scraper::fetch_deck;
pub use search_scraper::{SearchResults, search};
pub use tournament_scraper::list_decks;
