#![forbid(unsafe_code)]

//! The three top-level content domains of the site.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownSection;

/// Top-level content domain.
///
/// Determines which fragment namespace chapter fetches read from and which
/// navigation chrome is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// The algorithms / urbanism book.
    #[default]
    Algorithms,
    /// The history book.
    History,
    /// Static about page. Has no chapters.
    About,
}

impl Section {
    /// Every section, in navigation-bar order.
    pub const ALL: [Self; 3] = [Self::Algorithms, Self::History, Self::About];

    /// Query-string spelling of the section.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Algorithms => "algorithms",
            Self::History => "history",
            Self::About => "about",
        }
    }

    /// Whether this section is a book with chapters and a sidebar.
    #[must_use]
    pub const fn is_book(self) -> bool {
        !matches!(self, Self::About)
    }

    /// The book behind this section, if it has one.
    #[must_use]
    pub const fn book(self) -> Option<Book> {
        match self {
            Self::Algorithms => Some(Book::Algorithms),
            Self::History => Some(Book::History),
            Self::About => None,
        }
    }

    /// DOM id of the desktop navigation button.
    #[must_use]
    pub const fn nav_button_id(self) -> &'static str {
        match self {
            Self::Algorithms => "algorithms-btn",
            Self::History => "history-btn",
            Self::About => "about-btn",
        }
    }

    /// DOM id of the landing-layout button.
    #[must_use]
    pub const fn landing_button_id(self) -> &'static str {
        match self {
            Self::Algorithms => "mobile-algorithms-btn",
            Self::History => "mobile-history-btn",
            Self::About => "mobile-about-btn",
        }
    }
}

/// A section that has chapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Book {
    Algorithms,
    History,
}

impl Book {
    #[must_use]
    pub const fn section(self) -> Section {
        match self {
            Self::Algorithms => Section::Algorithms,
            Self::History => Section::History,
        }
    }

    /// Directory under the chapters root holding this book's fragments.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        self.section().as_str()
    }

    /// Whether `a0` / `n…` chapter tokens exist in this book.
    #[must_use]
    pub const fn has_special_chapters(self) -> bool {
        matches!(self, Self::Algorithms)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| UnknownSection(s.to_owned()))
    }
}
