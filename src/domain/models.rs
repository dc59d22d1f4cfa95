use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::{InvalidTournamentId, ValidationError};

/// Game formats MTGGoldfish tracks tournaments for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Standard,
    Modern,
    Pioneer,
    Historic,
    Pauper,
    Legacy,
    Vintage,
    #[serde(rename = "penny dreadful")]
    PennyDreadful,
}

impl Format {
    pub const ALL: [Format; 8] = [
        Format::Standard,
        Format::Modern,
        Format::Pioneer,
        Format::Historic,
        Format::Pauper,
        Format::Legacy,
        Format::Vintage,
        Format::PennyDreadful,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Standard => "standard",
            Format::Modern => "modern",
            Format::Pioneer => "pioneer",
            Format::Historic => "historic",
            Format::Pauper => "pauper",
            Format::Legacy => "legacy",
            Format::Vintage => "vintage",
            Format::PennyDreadful => "penny dreadful",
        }
    }

    fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(Format::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Format {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnsupportedFormat(s.to_string(), Self::supported_list()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric tournament identifier, kept as decimal text on disk and in records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TournamentId(pub u64);

impl TournamentId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl FromStr for TournamentId {
    type Err = InvalidTournamentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidTournamentId(s.to_string()));
        }
        trimmed
            .parse()
            .map(TournamentId)
            .map_err(|_| InvalidTournamentId(s.to_string()))
    }
}

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TournamentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TournamentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Placement of a deck: a rank (1st, 2nd, ...) or a win-loss record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Standing {
    Rank(u64),
    Record(String),
}

impl Standing {
    pub fn standing_type(&self) -> StandingType {
        match self {
            Standing::Rank(_) => StandingType::Rank,
            Standing::Record(_) => StandingType::Record,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandingType {
    Rank,
    Record,
}

/// Paper price in US dollars, online price in MTGO tix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub paper: u64,
    pub online: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub card_name: String,
    pub n_copies: u32,
}

impl Card {
    pub fn new(card_name: impl Into<String>, n_copies: u32) -> Self {
        Self {
            card_name: card_name.into(),
            n_copies,
        }
    }
}

/// One deck as scraped from its MTGGoldfish deck page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRecord {
    pub deck_id: String,
    pub name: Option<String>,
    pub player: String,
    pub format: Format,
    pub tournament_id: TournamentId,
    pub date: NaiveDate,
    pub event: String,
    pub standing: Option<Standing>,
    pub standing_type: Option<StandingType>,
    pub price: Price,
    pub maindeck: Vec<Card>,
    pub sideboard: Vec<Card>,
}
