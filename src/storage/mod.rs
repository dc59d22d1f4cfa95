mod corpus;
mod tournament_ids;

pub use corpus::CorpusWriter;
pub use tournament_ids::{TournamentIdStore, format_ids, parse_ids};
