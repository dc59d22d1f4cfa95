pub mod corpus;
pub mod tournament_list;

pub use corpus::CorpusService;
pub use tournament_list::TournamentListService;
