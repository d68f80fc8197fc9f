#![forbid(unsafe_code)]

//! The two navigation fields.

use crate::chapter::ChapterId;
use crate::query;
use crate::section::Section;

/// Active section and chapter.
///
/// When `section` is [`Section::About`] the chapter is kept but never
/// rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    pub section: Section,
    pub chapter: ChapterId,
}

impl NavState {
    #[must_use]
    pub fn new(section: Section, chapter: ChapterId) -> Self {
        Self { section, chapter }
    }

    /// Search string mirroring this state, for the address bar.
    #[must_use]
    pub fn to_search(&self) -> String {
        query::encode_search(self.section, &self.chapter)
    }
}

/// Which page shell is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Narrow-viewport section picker; no content is loaded.
    Landing,
    /// Header, sidebar and content pane.
    Full,
}
