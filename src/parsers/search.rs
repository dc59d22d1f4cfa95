use scraper::Html;

use super::text::{css, last_path_segment};
use crate::domain::TournamentId;
use crate::errors::ExtractionError;

/// Number of result pages, read from the pagination control
///
/// The control ends with a "next" arrow, so the last page number is the
/// second-to-last link. A search without a control has a single page.
pub fn number_of_pages(document: &Html) -> Result<usize, ExtractionError> {
    let Some(pagination) = document.select(&css("ul.pagination")).next() else {
        return Ok(1);
    };

    let labels: Vec<String> = pagination
        .select(&css("a"))
        .map(|link| link.text().collect::<String>().trim().to_string())
        .collect();

    let label = match labels.len() {
        n if n >= 2 => &labels[n - 2],
        n => {
            return Err(ExtractionError::malformed(
                "pagination",
                format!("expected at least 2 links, found {}", n),
            ));
        }
    };

    match label.parse::<usize>() {
        Ok(pages) if pages > 0 => Ok(pages),
        _ => Err(ExtractionError::malformed("pagination", label.as_str())),
    }
}

/// Tournament ids linked from the results table, in link order
///
/// `None` means the page has no results table at all.
pub fn tournament_ids(document: &Html) -> Result<Option<Vec<TournamentId>>, ExtractionError> {
    let Some(table) = document.select(&css("table.table-striped")).next() else {
        return Ok(None);
    };

    table
        .select(&css("a[href]"))
        .filter_map(|link| link.value().attr("href"))
        .map(|href| {
            last_path_segment(href)
                .parse()
                .map_err(|_| ExtractionError::malformed("search result link", href))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}
