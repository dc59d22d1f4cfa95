//! Pure HTML parsers, one module per page kind.

pub mod deck;
pub mod search;
mod text;
pub mod tournament;
