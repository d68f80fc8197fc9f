#![forbid(unsafe_code)]

//! Static fragment addressing.
//!
//! Every fetch the controller asks for is a [`FragmentRequest`]: a ticket
//! the host hands back on completion, what the fragment is for, and the
//! relative path to load.

use core::fmt;

use crate::chapter::ChapterId;
use crate::config::FragmentPaths;
use crate::section::Book;

/// Identifier of one in-flight fragment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a fragment is loaded for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Chapter { book: Book, chapter: ChapterId },
    /// The sidebar link list of a book.
    TocLinks(Book),
    /// The introduction shown with the history contents page.
    TocIntro,
    About,
    Logo,
}

impl FragmentKind {
    /// Relative path of this fragment under `paths`.
    #[must_use]
    pub fn path(&self, paths: &FragmentPaths) -> String {
        match self {
            Self::Chapter { book, chapter } => chapter_path(paths, *book, chapter),
            Self::TocLinks(Book::Algorithms) => paths.algorithms_links.clone(),
            Self::TocLinks(Book::History) => paths.history_links.clone(),
            Self::TocIntro => chapter_path(paths, Book::History, &ChapterId::TABLE_OF_CONTENTS),
            Self::About => paths.about.clone(),
            Self::Logo => paths.logo.clone(),
        }
    }

    /// Short label for log fields.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Chapter { .. } => "chapter",
            Self::TocLinks(_) => "toc_links",
            Self::TocIntro => "toc_intro",
            Self::About => "about",
            Self::Logo => "logo",
        }
    }
}

/// `<chapters_dir>/<book>/<stem>.html`
#[must_use]
pub fn chapter_path(paths: &FragmentPaths, book: Book, chapter: &ChapterId) -> String {
    format!(
        "{}/{}/{}.html",
        paths.chapters_dir.trim_end_matches('/'),
        book.dir_name(),
        chapter.file_stem()
    )
}

/// Content shown when a chapter fragment cannot be loaded.
#[must_use]
pub fn chapter_placeholder(chapter: &ChapterId) -> String {
    format!("<h2>Chapter {chapter}</h2><p>This chapter is not yet available.</p>")
}

/// A fetch the host must perform and report back with
/// [`Controller::complete`](crate::controller::Controller::complete).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentRequest {
    pub ticket: Ticket,
    pub kind: FragmentKind,
    pub path: String,
}
