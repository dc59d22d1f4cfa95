use scraper::Html;

use super::text::css;

const DATE_LABEL: &str = "Date:";
const DATE_WIDTH: usize = 10;

/// Deck ids shown on a tournament page, in page order
pub fn deck_ids(document: &Html) -> Vec<String> {
    document
        .select(&css(".deck-slideshow-link"))
        .map(|link| link.text().collect::<String>().trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

/// The `YYYY-MM-DD` ending a raw page line that carries a `Date:` label
///
/// Lines shorter than a date come back whole, so the caller fails on the
/// first labelled line instead of reading past it.
pub fn trailing_date(line: &str) -> Option<&str> {
    if !line.contains(DATE_LABEL) {
        return None;
    }
    let line = line.trim_end();
    let start = line
        .char_indices()
        .rev()
        .nth(DATE_WIDTH - 1)
        .map_or(0, |(index, _)| index);
    Some(&line[start..])
}
