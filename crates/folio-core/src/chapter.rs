#![forbid(unsafe_code)]

//! Chapter identifiers.
//!
//! A chapter is either a plain index (`0` is the table of contents) or, in
//! the algorithms book only, one of the supplementary tokens: `a0` and the
//! `n`-prefixed notes.

use core::fmt;
use core::str::FromStr;

use crate::error::InvalidChapter;

const APPENDIX_TOKEN: &str = "a0";
const NOTE_PREFIX: char = 'n';

/// Addressable unit of content within a section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChapterId {
    /// Numbered chapter. `Index(0)` is the table of contents.
    Index(u32),
    /// The `a0` supplementary chapter.
    Appendix,
    /// A footnote-like entry `n<suffix>`.
    Note(String),
}

impl Default for ChapterId {
    fn default() -> Self {
        Self::TABLE_OF_CONTENTS
    }
}

impl ChapterId {
    pub const TABLE_OF_CONTENTS: Self = Self::Index(0);

    /// Numeric index, if this is a plain chapter.
    #[must_use]
    pub const fn index(&self) -> Option<u32> {
        match self {
            Self::Index(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_table_of_contents(&self) -> bool {
        matches!(self, Self::Index(0))
    }

    /// Whether this is one of the non-numeric supplementary tokens.
    #[must_use]
    pub const fn is_special(&self) -> bool {
        !matches!(self, Self::Index(_))
    }

    /// File name without extension: two-digit padded for indices, the bare
    /// token otherwise.
    #[must_use]
    pub fn file_stem(&self) -> String {
        match self {
            Self::Index(n) => format!("{n:02}"),
            Self::Appendix => APPENDIX_TOKEN.to_owned(),
            Self::Note(suffix) => format!("{NOTE_PREFIX}{suffix}"),
        }
    }

    /// Parse a `data-chapter` link attribute or `chapter` query value.
    ///
    /// Accepts all-digit strings, `a0`, and `n` followed by one or more
    /// ASCII alphanumerics, `-` or `_`. Anything else returns `None`.
    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            return token.parse().ok().map(Self::Index);
        }
        if token == APPENDIX_TOKEN {
            return Some(Self::Appendix);
        }
        let suffix = token.strip_prefix(NOTE_PREFIX)?;
        let valid = !suffix.is_empty()
            && suffix
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        valid.then(|| Self::Note(suffix.to_owned()))
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(n) => write!(f, "{n}"),
            Self::Appendix => f.write_str(APPENDIX_TOKEN),
            Self::Note(suffix) => write!(f, "{NOTE_PREFIX}{suffix}"),
        }
    }
}

impl FromStr for ChapterId {
    type Err = InvalidChapter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_token(s).ok_or_else(|| InvalidChapter(s.to_owned()))
    }
}

impl From<u32> for ChapterId {
    fn from(n: u32) -> Self {
        Self::Index(n)
    }
}

/// Direction for previous / next chapter navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
}

impl Step {
    /// Apply this step to `current`, staying within `0..=max`.
    ///
    /// Returns `None` when the step would leave the range.
    #[must_use]
    pub fn apply(self, current: u32, max: u32) -> Option<u32> {
        match self {
            Self::Previous => current.checked_sub(1),
            Self::Next => current.checked_add(1).filter(|&n| n <= max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_zero_padded() {
        assert_eq!(ChapterId::Index(0).file_stem(), "00");
        assert_eq!(ChapterId::Index(7).file_stem(), "07");
        assert_eq!(ChapterId::Index(38).file_stem(), "38");
        assert_eq!(ChapterId::Index(123).file_stem(), "123");
    }

    #[test]
    fn special_tokens_are_not_padded() {
        assert_eq!(ChapterId::Appendix.file_stem(), "a0");
        assert_eq!(ChapterId::Note("3".into()).file_stem(), "n3");
    }

    #[test]
    fn parses_link_tokens() {
        assert_eq!(ChapterId::parse_token("12"), Some(ChapterId::Index(12)));
        assert_eq!(ChapterId::parse_token("007"), Some(ChapterId::Index(7)));
        assert_eq!(ChapterId::parse_token("a0"), Some(ChapterId::Appendix));
        assert_eq!(
            ChapterId::parse_token("n14"),
            Some(ChapterId::Note("14".into()))
        );
    }

    #[test]
    fn rejects_other_tokens() {
        for token in ["", "a1", "x3", "n", "-1", "3a", "n../x", "n 2", "99999999999"] {
            assert_eq!(ChapterId::parse_token(token), None, "token {token:?}");
        }
    }

    #[test]
    fn display_matches_token() {
        for token in ["0", "21", "a0", "n7"] {
            let id: ChapterId = token.parse().unwrap();
            assert_eq!(id.to_string(), token);
        }
    }

    #[test]
    fn step_stays_in_range() {
        assert_eq!(Step::Previous.apply(0, 10), None);
        assert_eq!(Step::Previous.apply(3, 10), Some(2));
        assert_eq!(Step::Next.apply(9, 10), Some(10));
        assert_eq!(Step::Next.apply(10, 10), None);
        assert_eq!(Step::Next.apply(u32::MAX, u32::MAX), None);
    }
}
