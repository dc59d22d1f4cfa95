use chrono::NaiveDate;

use super::models::Format;
use crate::errors::ValidationError;
use crate::pagination::with_page_param;

const SEARCH_PATH: &str = "/tournament_searches/create?utf8=%E2%9C%93&commit=Search";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parameters of an MTGGoldfish advanced tournament search
///
/// All inputs are validated on construction, so a query that exists can
/// always be turned into result page URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    format: Format,
    begin_date: NaiveDate,
    end_date: NaiveDate,
    keywords: Vec<String>,
}

impl SearchQuery {
    /// Build a query from raw user input
    ///
    /// * `format` - any supported format name, case-insensitive
    /// * `begin_date`, `end_date` - `YYYY-MM-DD`
    /// * `keywords` - letters, digits and spaces only
    pub fn new(
        format: &str,
        begin_date: &str,
        end_date: &str,
        keywords: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let format = format.parse()?;
        let begin_date = parse_date(begin_date)?;
        let end_date = parse_date(end_date)?;
        let keywords = parse_keywords(keywords.unwrap_or_default())?;

        Self::from_parts(format, begin_date, end_date, keywords)
    }

    pub fn from_dates(
        format: Format,
        begin_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Self::from_parts(format, begin_date, end_date, Vec::new())
    }

    fn from_parts(
        format: Format,
        begin_date: NaiveDate,
        end_date: NaiveDate,
        keywords: Vec<String>,
    ) -> Result<Self, ValidationError> {
        if begin_date > end_date {
            return Err(ValidationError::InvertedDateRange {
                begin: begin_date.to_string(),
                end: end_date.to_string(),
            });
        }

        Ok(Self {
            format,
            begin_date,
            end_date,
            keywords,
        })
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn begin_date(&self) -> NaiveDate {
        self.begin_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// URL of one result page of this search
    pub fn page_url(&self, base_url: &str, page: usize) -> String {
        let base = format!(
            "{}{}&tournament_search%5Bname%5D={}&tournament_search%5Bformat%5D={}&tournament_search%5Bdate_range%5D={}+-+{}",
            base_url.trim_end_matches('/'),
            SEARCH_PATH,
            self.keywords.join("+"),
            urlencoding::encode(self.format.as_str()),
            encode_date(self.begin_date),
            encode_date(self.end_date),
        );
        with_page_param(&base, page)
    }
}

pub fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = text.trim();
    // chrono accepts unpadded fields; the search form does not
    if trimmed.len() != 10 {
        return Err(ValidationError::MalformedDate(text.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::MalformedDate(text.to_string()))
}

fn parse_keywords(text: &str) -> Result<Vec<String>, ValidationError> {
    let valid = text.chars().all(|c| c == ' ' || c.is_alphanumeric());
    if !valid {
        return Err(ValidationError::InvalidKeywords(text.to_string()));
    }
    Ok(text.split_whitespace().map(str::to_string).collect())
}

fn encode_date(date: NaiveDate) -> String {
    urlencoding::encode(&date.format("%m/%d/%Y").to_string()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_is_normalized_to_lower_case() {
        let query = SearchQuery::new("LeGaCy", "2016-01-01", "2016-12-31", None).unwrap();
        assert_eq!(query.format(), Format::Legacy);
        assert_eq!(query.format().as_str(), "legacy");
    }

    #[test]
    fn test_unsupported_format_fails_validation() {
        let err = SearchQuery::new("chess", "2016-01-01", "2016-12-31", None).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedFormat(_, _)));
    }

    #[test]
    fn test_malformed_dates_fail_validation() {
        for bad in ["06/05/2016", "2016-6-5", "2016-13-01", "yesterday", ""] {
            let err = SearchQuery::new("legacy", bad, "2016-12-31", None).unwrap_err();
            assert_eq!(err, ValidationError::MalformedDate(bad.to_string()));
        }
    }

    #[test]
    fn test_inverted_date_range_fails_validation() {
        let err = SearchQuery::new("legacy", "2017-01-01", "2016-12-31", None).unwrap_err();
        assert!(matches!(err, ValidationError::InvertedDateRange { .. }));
    }

    #[test]
    fn test_keywords_must_be_alphanumeric() {
        let query = SearchQuery::new("modern", "2016-01-01", "2016-01-01", Some("SCG  Open 2016")).unwrap();
        assert!(query.page_url("https://gf.test", 1).contains("tournament_search%5Bname%5D=SCG+Open+2016&"));

        let empty = SearchQuery::new("modern", "2016-01-01", "2016-01-01", Some("")).unwrap();
        assert!(empty.page_url("https://gf.test", 1).contains("tournament_search%5Bname%5D=&"));

        let err = SearchQuery::new("modern", "2016-01-01", "2016-01-01", Some("scg; drop")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidKeywords(_)));
    }

    #[test]
    fn test_page_url_encodes_all_parameters() {
        let query = SearchQuery::new("penny dreadful", "2016-06-05", "2016-07-01", Some("scg open")).unwrap();
        let url = query.page_url("https://www.mtggoldfish.com/", 3);

        assert!(url.starts_with("https://www.mtggoldfish.com/tournament_searches/create?"));
        assert!(url.contains("tournament_search%5Bname%5D=scg+open"));
        assert!(url.contains("tournament_search%5Bformat%5D=penny%20dreadful"));
        assert!(url.contains("tournament_search%5Bdate_range%5D=06%2F05%2F2016+-+07%2F01%2F2016"));
        assert!(url.ends_with("&page=3"));
    }
}
