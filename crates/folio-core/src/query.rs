#![forbid(unsafe_code)]

//! Page-address query parameters.
//!
//! The address bar carries the whole navigation state as
//! `?section=<name>&chapter=<id>`. Parsing is total: absent or unknown
//! values fall back to `algorithms` / `0`, so a hand-edited or truncated
//! link still opens the site.

use url::Url;
use url::form_urlencoded;

use crate::chapter::ChapterId;
use crate::error::QueryError;
use crate::section::Section;
use crate::state::NavState;

pub const SECTION_PARAM: &str = "section";
pub const CHAPTER_PARAM: &str = "chapter";

/// Parse a `location.search` string (with or without the leading `?`).
///
/// When a parameter repeats, the first occurrence wins.
#[must_use]
pub fn parse_search(search: &str) -> NavState {
    let query = search.strip_prefix('?').unwrap_or(search);
    let mut section: Option<Section> = None;
    let mut chapter: Option<ChapterId> = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            SECTION_PARAM if section.is_none() => {
                section = Some(value.parse::<Section>().unwrap_or_default());
            }
            CHAPTER_PARAM if chapter.is_none() => {
                chapter = Some(ChapterId::parse_token(value.trim()).unwrap_or_default());
            }
            _ => {}
        }
    }

    NavState {
        section: section.unwrap_or_default(),
        chapter: chapter.unwrap_or_default(),
    }
}

/// Parse either a full page URL or a bare search string.
pub fn parse_location(location: &str) -> Result<NavState, QueryError> {
    if location.is_empty() || location.starts_with('?') {
        return Ok(parse_search(location));
    }
    let url = Url::parse(location)?;
    Ok(parse_search(url.query().unwrap_or_default()))
}

/// Encode navigation state as a search string including the leading `?`.
#[must_use]
pub fn encode_search(section: Section, chapter: &ChapterId) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(SECTION_PARAM, section.as_str())
        .append_pair(CHAPTER_PARAM, &chapter.to_string())
        .finish();
    format!("?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state(section: Section, chapter: ChapterId) -> NavState {
        NavState { section, chapter }
    }

    #[test]
    fn empty_search_is_default() {
        assert_eq!(parse_search(""), NavState::default());
        assert_eq!(parse_search("?"), NavState::default());
        assert_eq!(
            NavState::default(),
            state(Section::Algorithms, ChapterId::Index(0))
        );
    }

    #[test]
    fn reads_both_parameters() {
        assert_eq!(
            parse_search("?section=history&chapter=3"),
            state(Section::History, ChapterId::Index(3))
        );
        assert_eq!(
            parse_search("chapter=n12&section=algorithms"),
            state(Section::Algorithms, ChapterId::Note("12".into()))
        );
    }

    #[test]
    fn unknown_values_fall_back() {
        assert_eq!(
            parse_search("?section=poetry&chapter=seven"),
            NavState::default()
        );
        assert_eq!(
            parse_search("?section=about"),
            state(Section::About, ChapterId::Index(0))
        );
    }

    #[test]
    fn first_occurrence_wins() {
        assert_eq!(
            parse_search("?section=history&section=about&chapter=2&chapter=5"),
            state(Section::History, ChapterId::Index(2))
        );
    }

    #[test]
    fn percent_encoded_values_decode() {
        assert_eq!(
            parse_search("?section=%68istory&chapter=%30%34"),
            state(Section::History, ChapterId::Index(4))
        );
    }

    #[test]
    fn full_urls_use_their_query() {
        let parsed =
            parse_location("https://example.org/index.html?section=history&chapter=10#top").unwrap();
        assert_eq!(parsed, state(Section::History, ChapterId::Index(10)));
        assert_eq!(
            parse_location("https://example.org/").unwrap(),
            NavState::default()
        );
    }

    #[test]
    fn malformed_urls_are_errors() {
        assert!(parse_location("not a url").is_err());
    }

    #[test]
    fn encodes_in_section_chapter_order() {
        assert_eq!(
            encode_search(Section::History, &ChapterId::Index(3)),
            "?section=history&chapter=3"
        );
        assert_eq!(
            encode_search(Section::Algorithms, &ChapterId::Appendix),
            "?section=algorithms&chapter=a0"
        );
    }

    #[test]
    fn encoded_search_parses_back() {
        for (section, chapter) in [
            (Section::About, ChapterId::Index(0)),
            (Section::History, ChapterId::Index(9)),
            (Section::Algorithms, ChapterId::Note("4".into())),
        ] {
            let search = encode_search(section, &chapter);
            assert_eq!(parse_search(&search), state(section, chapter));
        }
    }
}
