#![forbid(unsafe_code)]

//! A [`Surface`] that remembers everything written to it.

use folio_core::{Layout, Section, Surface};

/// One call made on the surface, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    ShowLayout(Layout),
    ActiveSection(Section),
    BookChrome(bool),
    Content(String),
    ScrollTop,
    Links(String),
    Logo { markup: String, subtitle: String },
    PushLocation(String),
}

/// Page state as a reader would see it, plus the full call log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    layout: Option<Layout>,
    active: Option<Section>,
    book_chrome: Option<bool>,
    content: String,
    links: String,
    logo: Option<String>,
    subtitle: Option<String>,
    locations: Vec<String>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Forget the call log but keep the visible state.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    #[must_use]
    pub fn layout(&self) -> Option<Layout> {
        self.layout
    }

    /// Sections whose navigation button is lit. Always zero or one entries.
    #[must_use]
    pub fn active_buttons(&self) -> Vec<Section> {
        self.active.into_iter().collect()
    }

    /// `None` until the controller first decides.
    #[must_use]
    pub fn book_chrome_visible(&self) -> Option<bool> {
        self.book_chrome
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn links(&self) -> &str {
        &self.links
    }

    #[must_use]
    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }

    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Every search string pushed, oldest first.
    #[must_use]
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.locations.last().map(String::as_str)
    }

    /// How many times the content pane was written.
    #[must_use]
    pub fn content_writes(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Content(_)))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn show_layout(&mut self, layout: Layout) {
        self.layout = Some(layout);
        self.ops.push(SurfaceOp::ShowLayout(layout));
    }

    fn set_active_section(&mut self, section: Section) {
        self.active = Some(section);
        self.ops.push(SurfaceOp::ActiveSection(section));
    }

    fn set_book_chrome_visible(&mut self, visible: bool) {
        self.book_chrome = Some(visible);
        self.ops.push(SurfaceOp::BookChrome(visible));
    }

    fn set_content(&mut self, html: &str) {
        html.clone_into(&mut self.content);
        self.ops.push(SurfaceOp::Content(html.to_owned()));
    }

    fn scroll_content_to_top(&mut self) {
        self.ops.push(SurfaceOp::ScrollTop);
    }

    fn set_links(&mut self, html: &str) {
        html.clone_into(&mut self.links);
        self.ops.push(SurfaceOp::Links(html.to_owned()));
    }

    fn set_logo(&mut self, markup: &str, subtitle: &str) {
        self.logo = Some(markup.to_owned());
        // A subtitle already on the page is kept, as the DOM surface does.
        if self.subtitle.is_none() {
            self.subtitle = Some(subtitle.to_owned());
        }
        self.ops.push(SurfaceOp::Logo {
            markup: markup.to_owned(),
            subtitle: subtitle.to_owned(),
        });
    }

    fn push_location(&mut self, search: &str) {
        self.locations.push(search.to_owned());
        self.ops.push(SurfaceOp::PushLocation(search.to_owned()));
    }
}
