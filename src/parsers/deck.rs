//! Deck page parser for mtggoldfish.com.
//!
//! Each field has its own small grammar. When the page layout drifts, the
//! field that no longer matches fails with an `ExtractionError` naming it;
//! nothing is defaulted.

use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

use super::text::{css, last_path_segment, text_lines};
use crate::domain::{Card, DeckRecord, Format, Price, Standing, TournamentId};
use crate::errors::ExtractionError;

const SIDEBOARD_MARKER: &str = "sideboard";
const PLAYER_PREFIX: &str = "by ";
const DECK_DATE_FORMAT: &str = "%b %d, %Y";

static FORMAT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Format:\s*([\w ]+)").expect("Valid regex"));
static EVENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Event:\s*(.+)$").expect("Valid regex"));
static DATE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Deck Date:\s*(.+)$").expect("Valid regex"));
// "2nd Place" -> 2, "(3-2)" -> 3-2
static STANDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(?\s*(\d+(?:-\d+)*)").expect("Valid regex"));
// "MTGO Legacy League (5-0)"
static CLOSING_STANDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*(\d+(?:-\d+)*)\s*\)\s*$").expect("Valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub name: Option<String>,
    pub player: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub format: Format,
    pub tournament_id: TournamentId,
    pub date: NaiveDate,
    pub event: String,
    pub standing: Option<Standing>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decklist {
    pub maindeck: Vec<Card>,
    pub sideboard: Vec<Card>,
}

/// Parse a deck page from raw HTML
pub fn parse(html: &str, deck_id: &str) -> Result<DeckRecord, ExtractionError> {
    let document = Html::parse_document(html);
    extract(&document, deck_id)
}

/// Build the full record out of an already parsed deck page
pub fn extract(document: &Html, deck_id: &str) -> Result<DeckRecord, ExtractionError> {
    let title = parse_title(document)?;
    let metadata = parse_metadata(document)?;
    let price = parse_price(document)?;
    let decklist = parse_cards(document)?;

    Ok(DeckRecord {
        deck_id: deck_id.to_string(),
        name: title.name,
        player: title.player,
        format: metadata.format,
        tournament_id: metadata.tournament_id,
        date: metadata.date,
        event: metadata.event,
        standing_type: metadata.standing.as_ref().map(Standing::standing_type),
        standing: metadata.standing,
        price,
        maindeck: decklist.maindeck,
        sideboard: decklist.sideboard,
    })
}

// --- Title ---

pub fn parse_title(document: &Html) -> Result<Title, ExtractionError> {
    let heading = select_first(document, "h1.title", "title heading")?;
    parse_title_lines(&text_lines(heading))
}

/// `[name], "by <player>"`
pub fn parse_title_lines<S: AsRef<str>>(lines: &[S]) -> Result<Title, ExtractionError> {
    let (name, byline) = match lines {
        [byline] => (None, byline.as_ref()),
        [name, byline] => (Some(name.as_ref().to_lowercase()), byline.as_ref()),
        _ => {
            return Err(ExtractionError::malformed(
                "title",
                format!("expected 1 or 2 lines, found {}", lines.len()),
            ));
        }
    };

    let player = strip_prefix_ci(byline, PLAYER_PREFIX)
        .map(str::trim)
        .filter(|player| !player.is_empty())
        .ok_or_else(|| ExtractionError::malformed("player", byline))?;

    Ok(Title {
        name,
        player: player.to_lowercase(),
    })
}

fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &text[prefix.len()..])
}

// --- Metadata ---

pub fn parse_metadata(document: &Html) -> Result<Metadata, ExtractionError> {
    let block = select_first(document, "p.deck-container-information", "metadata block")?;
    let tournament_id = parse_tournament_link(block)?;
    parse_metadata_lines(&text_lines(block), tournament_id)
}

fn parse_tournament_link(block: ElementRef<'_>) -> Result<TournamentId, ExtractionError> {
    let href = block
        .select(&css("a[href]"))
        .next()
        .and_then(|link| link.value().attr("href"))
        .ok_or(ExtractionError::MissingElement("tournament link"))?;

    last_path_segment(href)
        .parse()
        .map_err(|_| ExtractionError::malformed("tournament link", href))
}

pub fn parse_metadata_lines<S: AsRef<str>>(
    lines: &[S],
    tournament_id: TournamentId,
) -> Result<Metadata, ExtractionError> {
    let format_text = capture_line(lines, &FORMAT_LINE, "format line")?;
    let format = format_text
        .trim()
        .parse()
        .map_err(|_| ExtractionError::malformed("format", format_text.trim()))?;

    let event_text = capture_line(lines, &EVENT_LINE, "event line")?;
    let (event, standing) = parse_event(event_text)?;

    let date_text = capture_line(lines, &DATE_LINE, "deck date line")?;
    let date = NaiveDate::parse_from_str(date_text.trim(), DECK_DATE_FORMAT)
        .map_err(|_| ExtractionError::malformed("deck date", date_text.trim()))?;

    Ok(Metadata {
        format,
        tournament_id,
        date,
        event,
        standing,
    })
}

fn capture_line<'a, S: AsRef<str>>(
    lines: &'a [S],
    pattern: &Regex,
    what: &'static str,
) -> Result<&'a str, ExtractionError> {
    lines
        .iter()
        .find_map(|line| pattern.captures(line.as_ref()))
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str())
        .ok_or(ExtractionError::MissingElement(what))
}

/// `<event name>[, <standing>]` or `<event name> (<standing>)`
fn parse_event(text: &str) -> Result<(String, Option<Standing>), ExtractionError> {
    let (name, standing) = split_standing(text)?;

    let name = name.trim().trim_end_matches(',').trim();
    if name.is_empty() {
        return Err(ExtractionError::malformed("event", text));
    }
    Ok((name.to_lowercase(), standing))
}

fn split_standing(text: &str) -> Result<(&str, Option<Standing>), ExtractionError> {
    if let Some((name, trailer)) = text.rsplit_once(',') {
        if let Some(standing) = parse_standing(trailer)? {
            return Ok((name, Some(standing)));
        }
    }

    if let Some(captures) = CLOSING_STANDING.captures(text) {
        if let (Some(whole), Some(raw)) = (captures.get(0), captures.get(1)) {
            return Ok((&text[..whole.start()], Some(standing_from(raw.as_str())?)));
        }
    }

    Ok((text, None))
}

/// Standing at the start of an event trailer, if there is one
pub fn parse_standing(trailer: &str) -> Result<Option<Standing>, ExtractionError> {
    match STANDING.captures(trailer.trim()).and_then(|captures| captures.get(1)) {
        Some(raw) => standing_from(raw.as_str()).map(Some),
        None => Ok(None),
    }
}

/// A plain number is a rank, anything with dashes a record
fn standing_from(raw: &str) -> Result<Standing, ExtractionError> {
    if raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.parse()
            .map(Standing::Rank)
            .map_err(|_| ExtractionError::malformed("standing", raw))
    } else {
        Ok(Standing::Record(raw.to_string()))
    }
}

// --- Price ---

pub fn parse_price(document: &Html) -> Result<Price, ExtractionError> {
    let texts = document
        .select(&css("span.cents"))
        .map(|cents| {
            cents
                .prev_sibling()
                .and_then(|sibling| sibling.value().as_text().map(|text| (**text).to_owned()))
                .ok_or(ExtractionError::MissingElement("price text"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    parse_price_texts(&texts)
}

/// First text is the paper price, second the online price
pub fn parse_price_texts<S: AsRef<str>>(texts: &[S]) -> Result<Price, ExtractionError> {
    match texts {
        [paper, online, ..] => Ok(Price {
            paper: parse_amount("paper price", paper.as_ref(), &['$', ','])?,
            online: parse_amount("online price", online.as_ref(), &[','])?,
        }),
        _ => Err(ExtractionError::MissingElement("price markers")),
    }
}

fn parse_amount(field: &'static str, raw: &str, noise: &[char]) -> Result<u64, ExtractionError> {
    let digits: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !noise.contains(c))
        .collect();
    digits
        .parse()
        .map_err(|_| ExtractionError::malformed(field, raw))
}

// --- Cards ---

pub fn parse_cards(document: &Html) -> Result<Decklist, ExtractionError> {
    let input = select_first(document, "#deck_input_deck", "deck input")?;
    let raw = input
        .value()
        .attr("value")
        .ok_or(ExtractionError::MissingElement("deck input value"))?;
    parse_decklist(raw)
}

/// One `<count> <card name>` per line, a single `sideboard` line between the zones
///
/// The blob always ends with an artifact line, which is dropped.
pub fn parse_decklist(raw: &str) -> Result<Decklist, ExtractionError> {
    let mut lines: Vec<&str> = raw
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .collect();
    lines.pop();

    let markers: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.trim() == SIDEBOARD_MARKER)
        .map(|(index, _)| index)
        .collect();

    let split = match markers.as_slice() {
        [index] => *index,
        _ => return Err(ExtractionError::SideboardMarker(markers.len())),
    };

    Ok(Decklist {
        maindeck: parse_card_lines(&lines[..split])?,
        sideboard: parse_card_lines(&lines[split + 1..])?,
    })
}

fn parse_card_lines(lines: &[&str]) -> Result<Vec<Card>, ExtractionError> {
    lines.iter().map(|line| parse_card_line(line)).collect()
}

fn parse_card_line(line: &str) -> Result<Card, ExtractionError> {
    let malformed = || ExtractionError::malformed("card line", line);

    let (count, name) = line.trim().split_once(' ').ok_or_else(malformed)?;
    let n_copies: u32 = count.parse().map_err(|_| malformed())?;
    let name = name.trim();
    if n_copies == 0 || name.is_empty() {
        return Err(malformed());
    }
    Ok(Card::new(name.to_lowercase(), n_copies))
}

// --- Helpers ---

fn select_first<'a>(
    document: &'a Html,
    selector: &str,
    what: &'static str,
) -> Result<ElementRef<'a>, ExtractionError> {
    document
        .select(&css(selector))
        .next()
        .ok_or(ExtractionError::MissingElement(what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StandingType;

    const DECK_PAGE: &str = r#"
        <html><body>
        <h1 class='title'>
        Ad Nauseam Tendrils
        <span class='author'>by Brandon Osborne</span>
        </h1>
        <p class='deck-container-information'>
        Format: Legacy
        <br>
        Event: <a href="/tournament/21494">SCG Legacy IQ Somerville</a>, 2nd Place
        <br>
        Deck Date: Jun 5, 2016
        </p>
        <div class='price-box paper'>&nbsp;$2,024<span class='cents'>.52</span></div>
        <div class='price-box online'>387<span class='cents'>.10</span></div>
        <input id='deck_input_deck' type='hidden' value='4 Brainstorm
1 Island
sideboard
2 Wasteland
1 Carpet of Flowers
'>
        </body></html>
    "#;

    #[test]
    fn test_full_deck_page() {
        let record = parse(DECK_PAGE, "435911").unwrap();

        assert_eq!(record.deck_id, "435911");
        assert_eq!(record.name.as_deref(), Some("ad nauseam tendrils"));
        assert_eq!(record.player, "brandon osborne");
        assert_eq!(record.format, Format::Legacy);
        assert_eq!(record.tournament_id, TournamentId(21494));
        assert_eq!(record.date.to_string(), "2016-06-05");
        assert_eq!(record.event, "scg legacy iq somerville");
        assert_eq!(record.standing, Some(Standing::Rank(2)));
        assert_eq!(record.standing_type, Some(StandingType::Rank));
        assert_eq!(record.price, Price { paper: 2024, online: 387 });
        assert_eq!(record.maindeck, vec![Card::new("brainstorm", 4), Card::new("island", 1)]);
        assert_eq!(
            record.sideboard,
            vec![Card::new("wasteland", 2), Card::new("carpet of flowers", 1)]
        );
        let total: u32 = record.maindeck.iter().chain(&record.sideboard).map(|card| card.n_copies).sum();
        assert_eq!(total, 8);
    }

    #[test]
    fn test_title_with_name_and_player() {
        let title = parse_title_lines(&["Ad Nauseam Tendrils", "by Brandon Osborne"]).unwrap();
        assert_eq!(title.name.as_deref(), Some("ad nauseam tendrils"));
        assert_eq!(title.player, "brandon osborne");
    }

    #[test]
    fn test_title_without_name() {
        let title = parse_title_lines(&["by Brandon Osborne"]).unwrap();
        assert_eq!(title.name, None);
        assert_eq!(title.player, "brandon osborne");
    }

    #[test]
    fn test_title_with_wrong_shape_fails() {
        let empty: [&str; 0] = [];
        assert!(parse_title_lines(&empty).is_err());
        assert!(parse_title_lines(&["a", "b", "by c"]).is_err());
        assert_eq!(
            parse_title_lines(&["Tendrils", "Brandon Osborne"]).unwrap_err(),
            ExtractionError::malformed("player", "Brandon Osborne")
        );
    }

    #[test]
    fn test_metadata_with_rank() {
        let lines = [
            "Format: Legacy",
            "Event: SCG Legacy IQ Somerville, 2nd",
            "Deck Date: Jun 5, 2016",
        ];
        let metadata = parse_metadata_lines(&lines, TournamentId(21494)).unwrap();

        assert_eq!(metadata.format, Format::Legacy);
        assert_eq!(metadata.event, "scg legacy iq somerville");
        assert_eq!(metadata.standing, Some(Standing::Rank(2)));
        assert_eq!(metadata.date, NaiveDate::from_ymd_opt(2016, 6, 5).unwrap());
        assert_eq!(metadata.tournament_id, TournamentId(21494));
    }

    #[test]
    fn test_metadata_with_record_and_extra_lines() {
        let lines = [
            "Format: Pauper",
            "Archetype: Burn",
            "Event: MTGO Pauper League, (3-2)",
            "Deck Date: Dec 25, 2019",
        ];
        let metadata = parse_metadata_lines(&lines, TournamentId(1)).unwrap();

        assert_eq!(metadata.format, Format::Pauper);
        assert_eq!(metadata.event, "mtgo pauper league");
        assert_eq!(metadata.standing, Some(Standing::Record("3-2".to_string())));
    }

    #[test]
    fn test_metadata_without_standing() {
        let lines = ["Format: Vintage", "Event: Vintage Champs, Seattle", "Deck Date: Oct 1, 2018"];
        let metadata = parse_metadata_lines(&lines, TournamentId(1)).unwrap();

        assert_eq!(metadata.event, "vintage champs, seattle");
        assert_eq!(metadata.standing, None);
    }

    #[test]
    fn test_metadata_rejects_unknown_format_and_missing_lines() {
        let unknown = ["Format: Chess", "Event: A, 1st", "Deck Date: Jun 5, 2016"];
        assert_eq!(
            parse_metadata_lines(&unknown, TournamentId(1)).unwrap_err(),
            ExtractionError::malformed("format", "Chess")
        );

        let missing = ["Format: Legacy", "Event: A, 1st"];
        assert_eq!(
            parse_metadata_lines(&missing, TournamentId(1)).unwrap_err(),
            ExtractionError::MissingElement("deck date line")
        );
    }

    #[test]
    fn test_metadata_with_parenthesised_record_and_no_comma() {
        let lines = ["Format: Legacy", "Event: MTGO Legacy League (5-0)", "Deck Date: Jun 5, 2016"];
        let metadata = parse_metadata_lines(&lines, TournamentId(1)).unwrap();

        assert_eq!(metadata.event, "mtgo legacy league");
        assert_eq!(metadata.standing, Some(Standing::Record("5-0".to_string())));

        let lines = ["Format: Legacy", "Event: SCG Open, Somerville (3)", "Deck Date: Jun 5, 2016"];
        let metadata = parse_metadata_lines(&lines, TournamentId(1)).unwrap();

        assert_eq!(metadata.event, "scg open, somerville");
        assert_eq!(metadata.standing, Some(Standing::Rank(3)));
    }

    #[test]
    fn test_standing_variants() {
        assert_eq!(parse_standing(" 2").unwrap(), Some(Standing::Rank(2)));
        assert_eq!(parse_standing(" 12th Place").unwrap(), Some(Standing::Rank(12)));
        assert_eq!(parse_standing(" 3-2").unwrap(), Some(Standing::Record("3-2".to_string())));
        assert_eq!(parse_standing("(5-0)").unwrap(), Some(Standing::Record("5-0".to_string())));
        assert_eq!(parse_standing(" Top 8").unwrap(), None);
        assert_eq!(
            parse_standing(" 99999999999th Place").unwrap(),
            Some(Standing::Rank(99_999_999_999))
        );
    }

    #[test]
    fn test_numeric_standing_too_large_for_a_rank_fails() {
        let huge = "99999999999999999999999";
        assert_eq!(
            parse_standing(huge).unwrap_err(),
            ExtractionError::malformed("standing", huge)
        );

        let lines = ["Format: Legacy", "Event: Big Open, 99999999999999999999999th", "Deck Date: Jun 5, 2016"];
        assert!(parse_metadata_lines(&lines, TournamentId(1)).is_err());
    }

    #[test]
    fn test_standing_type_follows_variant() {
        for standing in [Standing::Rank(2), Standing::Record("3-2".to_string())] {
            let expected = match standing {
                Standing::Rank(_) => StandingType::Rank,
                Standing::Record(_) => StandingType::Record,
            };
            assert_eq!(standing.standing_type(), expected);
        }
    }

    #[test]
    fn test_price_texts() {
        let price = parse_price_texts(&["\u{a0}$2,024", "387"]).unwrap();
        assert_eq!(price, Price { paper: 2024, online: 387 });

        let price = parse_price_texts(&["$\u{a0}1,234,567", "1,050"]).unwrap();
        assert_eq!(price, Price { paper: 1_234_567, online: 1050 });
    }

    #[test]
    fn test_price_requires_two_numeric_markers() {
        assert_eq!(
            parse_price_texts(&["$2,024"]).unwrap_err(),
            ExtractionError::MissingElement("price markers")
        );
        assert!(parse_price_texts(&["$2,024", "n/a"]).is_err());
    }

    #[test]
    fn test_decklist_split() {
        let decklist = parse_decklist("1 island\nsideboard\n2 wasteland\n").unwrap();
        assert_eq!(decklist.maindeck, vec![Card::new("island", 1)]);
        assert_eq!(decklist.sideboard, vec![Card::new("wasteland", 2)]);
    }

    #[test]
    fn test_decklist_partitions_in_order() {
        let raw = "4 Brainstorm\r\n4 Ponder\r\n1 Island\r\nsideboard\r\n3 Force of Will\r\n";
        let decklist = parse_decklist(raw).unwrap();

        let lines = raw.split('\n').count() - 2;
        assert_eq!(decklist.maindeck.len() + decklist.sideboard.len(), lines);
        let names: Vec<&str> = decklist
            .maindeck
            .iter()
            .chain(&decklist.sideboard)
            .map(|card| card.card_name.as_str())
            .collect();
        assert_eq!(names, ["brainstorm", "ponder", "island", "force of will"]);
    }

    #[test]
    fn test_decklist_sideboard_marker_must_appear_once() {
        assert_eq!(
            parse_decklist("1 island\n2 wasteland\n").unwrap_err(),
            ExtractionError::SideboardMarker(0)
        );
        assert_eq!(
            parse_decklist("1 island\nsideboard\nsideboard\n").unwrap_err(),
            ExtractionError::SideboardMarker(2)
        );
        // the trailing artifact line is never a marker
        assert_eq!(
            parse_decklist("1 island\nsideboard").unwrap_err(),
            ExtractionError::SideboardMarker(0)
        );
    }

    #[test]
    fn test_decklist_rejects_bad_card_lines() {
        assert!(parse_decklist("0 island\nsideboard\n").is_err());
        assert!(parse_decklist("island\nsideboard\n").is_err());
        assert!(parse_decklist("x island\nsideboard\n").is_err());
    }

    #[test]
    fn test_missing_blocks_are_reported() {
        let err = parse("<html><body></body></html>", "1").unwrap_err();
        assert_eq!(err, ExtractionError::MissingElement("title heading"));

        let no_link = DECK_PAGE.replace(r#"<a href="/tournament/21494">"#, "<a>");
        let err = parse(&no_link, "1").unwrap_err();
        assert_eq!(err, ExtractionError::MissingElement("tournament link"));

        let no_deck = DECK_PAGE.replace("deck_input_deck", "something_else");
        let err = parse(&no_deck, "1").unwrap_err();
        assert_eq!(err, ExtractionError::MissingElement("deck input"));
    }
}
