#![forbid(unsafe_code)]

//! Navigation controller.
//!
//! [`Controller`] owns the navigation state and a [`Surface`]. It performs no
//! I/O: each operation returns the [`FragmentRequest`]s the host must fetch,
//! and the host reports every result through [`Controller::complete`], which
//! applies it to the surface and may ask for more fragments.
//!
//! ```text
//!  click / key / resize ─→ Controller ─→ Vec<FragmentRequest> ─→ host fetch
//!                              ▲                                     │
//!                              └──────── complete(ticket, result) ◀──┘
//! ```
//!
//! # Ordering
//!
//! Fetches complete in any order. Each navigation action advances a content
//! generation (section loads also advance a links generation); a response
//! is written only if its generation is still the latest, so a slow reply
//! for an abandoned chapter cannot overwrite the one the reader asked for
//! last. [`SiteConfig::discard_stale_responses`] turns this off.

use std::collections::HashMap;

use tracing::{debug, debug_span, error, warn};

use crate::chapter::{ChapterId, Step};
use crate::config::SiteConfig;
use crate::error::FragmentError;
use crate::fragment::{FragmentKind, FragmentRequest, Ticket, chapter_placeholder};
use crate::input::{NavKey, WheelScroll};
use crate::query;
use crate::section::{Book, Section};
use crate::state::{Layout, NavState};
use crate::surface::Surface;

/// Sequence tokens at the time a request was issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Generation {
    content: u64,
    links: u64,
}

#[derive(Debug)]
struct Pending {
    kind: FragmentKind,
    generation: Generation,
    /// Set for the two halves of a history contents load.
    join: Option<u64>,
}

/// Results collected for a history contents load, which renders only once
/// both the link list and the introduction have arrived.
#[derive(Debug, Default)]
struct TocJoin {
    links: Option<Result<String, FragmentError>>,
    intro: Option<Result<String, FragmentError>>,
}

#[derive(Debug, Clone, Copy)]
enum TocPart {
    Links,
    Intro,
}

impl TocJoin {
    fn fill(&mut self, part: TocPart, result: Result<String, FragmentError>) {
        match part {
            TocPart::Links => self.links = Some(result),
            TocPart::Intro => self.intro = Some(result),
        }
    }

    fn is_ready(&self) -> bool {
        self.links.is_some() && self.intro.is_some()
    }
}

/// Single owner of the site's navigation state.
pub struct Controller<S> {
    surface: S,
    config: SiteConfig,
    state: NavState,
    layout: Option<Layout>,
    generation: Generation,
    next_ticket: u64,
    pending: HashMap<Ticket, Pending>,
    next_join: u64,
    toc_joins: HashMap<u64, TocJoin>,
}

impl<S: Surface> Controller<S> {
    #[must_use]
    pub fn new(surface: S, config: SiteConfig) -> Self {
        Self {
            surface,
            config,
            state: NavState::default(),
            layout: None,
            generation: Generation::default(),
            next_ticket: 0,
            pending: HashMap::new(),
            next_join: 0,
            toc_joins: HashMap::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &NavState {
        &self.state
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.state.section
    }

    #[must_use]
    pub fn chapter(&self) -> &ChapterId {
        &self.state.chapter
    }

    /// Visible shell, or `None` before [`initialize`](Self::initialize).
    #[must_use]
    pub fn layout(&self) -> Option<Layout> {
        self.layout
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Number of requests issued and not yet completed.
    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn wheel_scroll(&self) -> WheelScroll {
        WheelScroll::new(self.config.wheel_scroll_factor)
    }

    /// Derive the initial state from the page address and viewport width.
    ///
    /// Narrow viewports get the landing layout and load nothing. Otherwise
    /// the requested section's contents load, followed by the requested
    /// chapter when it is not the contents page. In that case the address
    /// is only pushed once the chapter loads.
    pub fn initialize(&mut self, location: &str, viewport_width: u32) -> Vec<FragmentRequest> {
        let requested = query::parse_location(location).unwrap_or_else(|err| {
            warn!(
                target: "folio.nav",
                location = %location,
                error = %err,
                "unreadable page address, using defaults"
            );
            NavState::default()
        });
        debug!(
            target: "folio.nav",
            section = %requested.section,
            chapter = %requested.chapter,
            viewport_width,
            "initialize"
        );

        let chapter = self
            .admit_chapter(requested.section, requested.chapter)
            .unwrap_or_default();
        self.state = NavState::new(requested.section, chapter.clone());

        if self.config.is_narrow(viewport_width) {
            self.show(Layout::Landing);
            return Vec::new();
        }

        self.show(Layout::Full);
        if chapter.is_table_of_contents() {
            return self.select_section(requested.section);
        }
        // The address already names the chapter; it is pushed once the
        // chapter loads, so a failed load leaves the address untouched.
        let mut requests = self.enter_section(requested.section, false);
        requests.extend(self.select_chapter(chapter));
        requests
    }

    /// Switch to `section`, resetting the chapter to its contents page.
    ///
    /// The address bar is rewritten immediately, whether or not the
    /// fragments later load.
    pub fn select_section(&mut self, section: Section) -> Vec<FragmentRequest> {
        self.enter_section(section, true)
    }

    fn enter_section(&mut self, section: Section, push_location: bool) -> Vec<FragmentRequest> {
        let _span = debug_span!("folio.select_section", section = %section).entered();

        self.state = NavState::new(section, ChapterId::TABLE_OF_CONTENTS);
        self.generation.content += 1;
        self.generation.links += 1;
        let generation = self.generation;

        self.surface.set_active_section(section);
        self.surface.set_book_chrome_visible(section.is_book());

        let requests = match section.book() {
            Some(book) => self.contents_requests(book, generation),
            None => vec![self.issue(FragmentKind::About, generation, None)],
        };
        if push_location {
            self.surface.push_location(&self.state.to_search());
        }
        debug!(target: "folio.nav", section = %section, "section selected");
        requests
    }

    /// Landing-layout button: reveal the full layout, then load `section`.
    pub fn choose_from_landing(&mut self, section: Section) -> Vec<FragmentRequest> {
        self.show(Layout::Full);
        self.select_section(section)
    }

    /// Load `chapter` of the active book.
    ///
    /// Indices past the book's last chapter are clamped. Ignored on the
    /// about page and for `a0`/`n…` tokens outside the algorithms book.
    pub fn select_chapter(&mut self, chapter: ChapterId) -> Vec<FragmentRequest> {
        let section = self.state.section;
        let Some(book) = section.book() else {
            debug!(target: "folio.nav", chapter = %chapter, "no chapters on the about page");
            return Vec::new();
        };
        let Some(chapter) = self.admit_chapter(section, chapter) else {
            return Vec::new();
        };

        self.state.chapter = chapter.clone();
        self.generation.content += 1;
        let generation = self.generation;
        debug!(target: "folio.nav", book = %section, chapter = %chapter, "chapter selected");
        vec![self.issue(FragmentKind::Chapter { book, chapter }, generation, None)]
    }

    /// Contents button.
    pub fn show_table_of_contents(&mut self) -> Vec<FragmentRequest> {
        self.select_chapter(ChapterId::TABLE_OF_CONTENTS)
    }

    /// Previous / next chapter. Steps past either end are ignored.
    pub fn step_chapter(&mut self, step: Step) -> Vec<FragmentRequest> {
        let Some(book) = self.state.section.book() else {
            return Vec::new();
        };
        let Some(current) = self.state.chapter.index() else {
            debug!(
                target: "folio.nav",
                chapter = %self.state.chapter,
                "no neighbouring chapter for a supplementary entry"
            );
            return Vec::new();
        };
        match step.apply(current, self.config.last_chapter(book)) {
            Some(next) => self.select_chapter(ChapterId::Index(next)),
            None => {
                debug!(target: "folio.nav", chapter = current, ?step, "already at the end of the book");
                Vec::new()
            }
        }
    }

    pub fn handle_key(&mut self, key: NavKey) -> Vec<FragmentRequest> {
        self.step_chapter(key.step())
    }

    /// A click on a `.nav-link` carrying `data-chapter="<token>"`.
    pub fn follow_link(&mut self, token: &str) -> Vec<FragmentRequest> {
        match ChapterId::parse_token(token) {
            Some(chapter) => self.select_chapter(chapter),
            None => {
                debug!(target: "folio.nav", token = %token, "ignoring link without a chapter");
                Vec::new()
            }
        }
    }

    /// Leave the landing layout once the viewport grows past the breakpoint.
    ///
    /// Shrinking the viewport never switches back.
    pub fn handle_resize(&mut self, viewport_width: u32) -> Vec<FragmentRequest> {
        if self.layout != Some(Layout::Landing) || self.config.is_narrow(viewport_width) {
            return Vec::new();
        }
        debug!(target: "folio.nav", viewport_width, "viewport widened, leaving landing layout");
        self.show(Layout::Full);
        self.select_section(self.state.section)
    }

    /// Fetch the site logo. Independent of navigation; never stale.
    pub fn load_logo(&mut self) -> FragmentRequest {
        let generation = self.generation;
        self.issue(FragmentKind::Logo, generation, None)
    }

    /// Apply the result of a fetch issued earlier.
    ///
    /// Returns follow-up requests (the contents reload after chapter 0).
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<String, FragmentError>,
    ) -> Vec<FragmentRequest> {
        let Some(pending) = self.pending.remove(&ticket) else {
            warn!(target: "folio.fragment", ticket = ticket.get(), "completion for unknown ticket");
            return Vec::new();
        };

        let Pending {
            kind,
            generation,
            join,
        } = pending;
        match kind {
            FragmentKind::Chapter { book, chapter } => {
                return self.finish_chapter(book, chapter, generation, result);
            }
            FragmentKind::TocLinks(Book::Algorithms) => {
                self.finish_algorithms_contents(generation, result);
            }
            FragmentKind::TocLinks(Book::History) => {
                if let Some(join) = join {
                    self.finish_history_part(join, TocPart::Links, generation, result);
                }
            }
            FragmentKind::TocIntro => {
                if let Some(join) = join {
                    self.finish_history_part(join, TocPart::Intro, generation, result);
                }
            }
            FragmentKind::About => self.finish_about(generation, result),
            FragmentKind::Logo => self.finish_logo(result),
        }
        Vec::new()
    }

    fn show(&mut self, layout: Layout) {
        self.layout = Some(layout);
        self.surface.show_layout(layout);
    }

    /// Bring a requested chapter into the range `section` allows.
    fn admit_chapter(&self, section: Section, chapter: ChapterId) -> Option<ChapterId> {
        let book = section.book()?;
        match chapter {
            ChapterId::Index(n) => Some(ChapterId::Index(n.min(self.config.last_chapter(book)))),
            special if book.has_special_chapters() => Some(special),
            special => {
                debug!(
                    target: "folio.nav",
                    book = %section,
                    chapter = %special,
                    "supplementary chapters exist only in the algorithms book"
                );
                None
            }
        }
    }

    fn issue(
        &mut self,
        kind: FragmentKind,
        generation: Generation,
        join: Option<u64>,
    ) -> FragmentRequest {
        let ticket = Ticket::new(self.next_ticket);
        self.next_ticket += 1;
        let path = kind.path(&self.config.fragments);
        debug!(
            target: "folio.fragment",
            ticket = ticket.get(),
            kind = kind.label(),
            path = %path,
            "fragment requested"
        );
        self.pending.insert(
            ticket,
            Pending {
                kind: kind.clone(),
                generation,
                join,
            },
        );
        FragmentRequest { ticket, kind, path }
    }

    fn contents_requests(&mut self, book: Book, generation: Generation) -> Vec<FragmentRequest> {
        match book {
            Book::Algorithms => vec![self.issue(
                FragmentKind::TocLinks(Book::Algorithms),
                generation,
                None,
            )],
            Book::History => {
                let join = self.next_join;
                self.next_join += 1;
                self.toc_joins.insert(join, TocJoin::default());
                vec![
                    self.issue(FragmentKind::TocLinks(Book::History), generation, Some(join)),
                    self.issue(FragmentKind::TocIntro, generation, Some(join)),
                ]
            }
        }
    }

    fn content_is_current(&self, generation: Generation) -> bool {
        !self.config.discard_stale_responses || generation.content == self.generation.content
    }

    fn links_are_current(&self, generation: Generation) -> bool {
        !self.config.discard_stale_responses || generation.links == self.generation.links
    }

    fn replace_content(&mut self, html: &str) {
        self.surface.set_content(html);
        self.surface.scroll_content_to_top();
    }

    fn finish_chapter(
        &mut self,
        book: Book,
        chapter: ChapterId,
        generation: Generation,
        result: Result<String, FragmentError>,
    ) -> Vec<FragmentRequest> {
        if !self.content_is_current(generation) {
            debug!(target: "folio.fragment", chapter = %chapter, "discarding superseded chapter");
            return Vec::new();
        }

        match result {
            Ok(html) => {
                self.replace_content(&html);
                let follow_up = if chapter.is_table_of_contents() {
                    self.contents_requests(book, generation)
                } else {
                    Vec::new()
                };
                self.surface
                    .push_location(&query::encode_search(book.section(), &chapter));
                follow_up
            }
            Err(err) => {
                warn!(
                    target: "folio.fragment",
                    chapter = %chapter,
                    error = %err,
                    "chapter unavailable, showing placeholder"
                );
                self.surface.set_content(&chapter_placeholder(&chapter));
                Vec::new()
            }
        }
    }

    fn finish_algorithms_contents(
        &mut self,
        generation: Generation,
        result: Result<String, FragmentError>,
    ) {
        let links = match result {
            Ok(links) => links,
            Err(err) => {
                error!(target: "folio.fragment", error = %err, "failed to load algorithms contents");
                return;
            }
        };
        if self.links_are_current(generation) {
            self.surface.set_links(&links);
        }
        if self.content_is_current(generation) {
            let page = format!("{}{links}", self.config.algorithms_heading);
            self.replace_content(&page);
        }
    }

    fn finish_history_part(
        &mut self,
        join: u64,
        part: TocPart,
        generation: Generation,
        result: Result<String, FragmentError>,
    ) {
        let ready = match self.toc_joins.get_mut(&join) {
            Some(slot) => {
                slot.fill(part, result);
                slot.is_ready()
            }
            None => false,
        };
        if !ready {
            return;
        }
        let Some(TocJoin {
            links: Some(links),
            intro: Some(intro),
        }) = self.toc_joins.remove(&join)
        else {
            return;
        };

        match (links, intro) {
            (Ok(links), Ok(intro)) => {
                if self.links_are_current(generation) {
                    self.surface.set_links(&links);
                }
                if self.content_is_current(generation) {
                    self.replace_content(&intro);
                }
            }
            (Err(err), _) | (_, Err(err)) => {
                error!(target: "folio.fragment", error = %err, "failed to load history contents");
            }
        }
    }

    fn finish_about(&mut self, generation: Generation, result: Result<String, FragmentError>) {
        match result {
            Ok(html) if self.content_is_current(generation) => self.replace_content(&html),
            Ok(_) => debug!(target: "folio.fragment", "discarding superseded about page"),
            Err(err) => {
                error!(target: "folio.fragment", error = %err, "failed to load about page");
            }
        }
    }

    fn finish_logo(&mut self, result: Result<String, FragmentError>) {
        match result {
            Ok(svg) => self.surface.set_logo(&svg, &self.config.header_subtitle),
            Err(err) => {
                error!(target: "folio.fragment", error = %err, "failed to load logo, using text fallback");
                self.surface
                    .set_logo(&self.config.fallback_logo, &self.config.header_subtitle);
            }
        }
    }
}

impl<S> core::fmt::Debug for Controller<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("state", &self.state)
            .field("layout", &self.layout)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Keeps only what the assertions below need.
    #[derive(Debug, Default)]
    struct Probe {
        content: String,
        links: String,
        locations: Vec<String>,
        active: Option<Section>,
        chrome: Option<bool>,
        layout: Option<Layout>,
    }

    impl Surface for Probe {
        fn show_layout(&mut self, layout: Layout) {
            self.layout = Some(layout);
        }
        fn set_active_section(&mut self, section: Section) {
            self.active = Some(section);
        }
        fn set_book_chrome_visible(&mut self, visible: bool) {
            self.chrome = Some(visible);
        }
        fn set_content(&mut self, html: &str) {
            self.content = html.to_owned();
        }
        fn scroll_content_to_top(&mut self) {}
        fn set_links(&mut self, html: &str) {
            self.links = html.to_owned();
        }
        fn set_logo(&mut self, _markup: &str, _subtitle: &str) {}
        fn push_location(&mut self, search: &str) {
            self.locations.push(search.to_owned());
        }
    }

    fn controller() -> Controller<Probe> {
        Controller::new(Probe::default(), SiteConfig::default())
    }

    fn paths(requests: &[FragmentRequest]) -> Vec<&str> {
        requests.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn wide_initialize_loads_default_contents() {
        let mut c = controller();
        let requests = c.initialize("", 1280);
        assert_eq!(paths(&requests), ["algorithms-links.html"]);
        assert_eq!(c.state(), &NavState::default());
        assert_eq!(c.layout(), Some(Layout::Full));
    }

    #[test]
    fn narrow_initialize_defers_loading() {
        let mut c = controller();
        let requests = c.initialize("?section=history&chapter=4", 768);
        assert!(requests.is_empty());
        assert_eq!(c.layout(), Some(Layout::Landing));
        assert_eq!(c.state(), &NavState::new(Section::History, ChapterId::Index(4)));
        assert!(c.surface().locations.is_empty());
    }

    #[test]
    fn initialize_with_chapter_fetches_it() {
        let mut c = controller();
        let requests = c.initialize("?section=history&chapter=3", 1024);
        assert_eq!(
            paths(&requests),
            ["links.html", "chapters/history/00.html", "chapters/history/03.html"]
        );
        assert_eq!(c.state(), &NavState::new(Section::History, ChapterId::Index(3)));
        assert!(c.surface().locations.is_empty(), "address waits for the chapter");
    }

    #[test]
    fn chapters_clamp_to_the_book() {
        let mut c = controller();
        let _ = c.select_section(Section::History);
        let requests = c.select_chapter(ChapterId::Index(42));
        assert_eq!(paths(&requests), ["chapters/history/10.html"]);
        assert_eq!(c.chapter(), &ChapterId::Index(10));
    }

    #[test]
    fn tokens_are_algorithms_only() {
        let mut c = controller();
        let _ = c.select_section(Section::History);
        assert!(c.select_chapter(ChapterId::Appendix).is_empty());
        assert_eq!(c.chapter(), &ChapterId::Index(0));

        let _ = c.select_section(Section::Algorithms);
        let requests = c.select_chapter(ChapterId::Appendix);
        assert_eq!(paths(&requests), ["chapters/algorithms/a0.html"]);
    }

    #[test]
    fn about_ignores_chapter_navigation() {
        let mut c = controller();
        let requests = c.select_section(Section::About);
        assert_eq!(paths(&requests), ["about.html"]);
        assert_eq!(c.surface().chrome, Some(false));
        assert!(c.select_chapter(ChapterId::Index(2)).is_empty());
        assert!(c.step_chapter(Step::Next).is_empty());
        assert!(c.show_table_of_contents().is_empty());
    }

    #[test]
    fn failed_chapter_shows_placeholder_without_url_change() {
        let mut c = controller();
        let _ = c.select_section(Section::History);
        let request = c.select_chapter(ChapterId::Index(6)).remove(0);
        let before = c.surface().locations.len();
        let follow_up = c.complete(
            request.ticket,
            Err(FragmentError::Status {
                path: request.path.clone(),
                status: 404,
            }),
        );
        assert!(follow_up.is_empty());
        assert_eq!(c.surface().content, chapter_placeholder(&ChapterId::Index(6)));
        assert_eq!(c.surface().locations.len(), before);
        assert_eq!(c.pending_requests(), 2);
    }

    #[test]
    fn unknown_ticket_is_ignored() {
        let mut c = controller();
        assert!(c.complete(Ticket::new(99), Ok("x".into())).is_empty());
        assert_eq!(c.surface().content, "");
    }

    #[test]
    fn resize_only_leaves_landing() {
        let mut c = controller();
        let _ = c.initialize("?section=about", 1200);
        assert!(c.handle_resize(500).is_empty());
        assert!(c.handle_resize(1500).is_empty());

        let mut c = controller();
        let _ = c.initialize("?section=about", 400);
        assert!(c.handle_resize(700).is_empty());
        let requests = c.handle_resize(900);
        assert_eq!(paths(&requests), ["about.html"]);
        assert_eq!(c.layout(), Some(Layout::Full));
    }
}
