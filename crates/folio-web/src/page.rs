#![forbid(unsafe_code)]

//! Page bindings that do not need a browser.
//!
//! Element names, the mapping from DOM events to controller operations, and
//! the state snapshot handed to JavaScript. The wasm layer only looks up
//! elements and forwards events through [`PageAction::apply`].

use folio_core::{Controller, FragmentRequest, Layout, NavKey, Section, Step, Surface};

pub const CONTENT_ID: &str = "content";
pub const LINKS_ID: &str = "links-container";
pub const LEFT_COLUMN_ID: &str = "left-column";
pub const CHAPTER_NAV_ID: &str = "chapter-nav";
pub const PREV_BUTTON_ID: &str = "prevButton";
pub const NEXT_BUTTON_ID: &str = "nextButton";
pub const TOC_BUTTON_ID: &str = "tocButton";

pub const LANDING_SELECTOR: &str = ".mobile-landing";
pub const MAIN_SELECTOR: &str = ".main-content";
pub const MOBILE_LOGO_SELECTOR: &str = ".mobile-logo";
pub const HEADER_LOGO_SELECTOR: &str = ".header-logo";
pub const SUBTITLE_CLASS: &str = "header-subtitle";
pub const NAV_BUTTON_SELECTOR: &str = ".nav-btn";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
/// Panes whose wheel scrolling is slowed down.
pub const WHEEL_SELECTOR: &str = ".left-column, .content";
pub const CHAPTER_ATTR: &str = "data-chapter";

pub const ACTIVE_CLASS: &str = "active";
pub const HIDDEN_CLASS: &str = "hidden";
pub const FULL_WIDTH_CLASS: &str = "full-width";
pub const VISIBLE_CLASS: &str = "visible";

/// A user gesture, already decoded from its DOM event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    SelectSection(Section),
    ChooseFromLanding(Section),
    Step(Step),
    TableOfContents,
    FollowLink(String),
    Key(NavKey),
    Resize(u32),
}

impl PageAction {
    pub fn apply<S: Surface>(self, controller: &mut Controller<S>) -> Vec<FragmentRequest> {
        match self {
            Self::SelectSection(section) => controller.select_section(section),
            Self::ChooseFromLanding(section) => controller.choose_from_landing(section),
            Self::Step(step) => controller.step_chapter(step),
            Self::TableOfContents => controller.show_table_of_contents(),
            Self::FollowLink(token) => controller.follow_link(&token),
            Self::Key(key) => controller.handle_key(key),
            Self::Resize(width) => controller.handle_resize(width),
        }
    }
}

/// Every button with a fixed id and what clicking it does.
#[must_use]
pub fn button_bindings() -> Vec<(&'static str, PageAction)> {
    let mut bindings = Vec::with_capacity(Section::ALL.len() * 2 + 3);
    for section in Section::ALL {
        bindings.push((section.nav_button_id(), PageAction::SelectSection(section)));
        bindings.push((
            section.landing_button_id(),
            PageAction::ChooseFromLanding(section),
        ));
    }
    bindings.push((TOC_BUTTON_ID, PageAction::TableOfContents));
    bindings.push((PREV_BUTTON_ID, PageAction::Step(Step::Previous)));
    bindings.push((NEXT_BUTTON_ID, PageAction::Step(Step::Next)));
    bindings
}

/// Decode a `keydown`. `key` wins; `key_code` covers older engines.
#[must_use]
pub fn key_action(key: &str, key_code: u32) -> Option<PageAction> {
    NavKey::from_dom_key(key)
        .or_else(|| NavKey::from_key_code(key_code))
        .map(PageAction::Key)
}

/// A click on a `.nav-link`. Links without `data-chapter` do nothing.
#[must_use]
pub fn link_action(chapter_attr: Option<String>) -> Option<PageAction> {
    chapter_attr.map(PageAction::FollowLink)
}

/// `window.innerWidth` as a pixel count.
#[must_use]
pub fn viewport_width(inner_width: f64) -> u32 {
    if inner_width.is_finite() && inner_width > 0.0 {
        inner_width as u32
    } else {
        0
    }
}

/// Navigation state as JSON, for scripts and debugging.
#[must_use]
pub fn state_json<S: Surface>(controller: &Controller<S>) -> String {
    let layout = match controller.layout() {
        Some(Layout::Landing) => "landing",
        Some(Layout::Full) => "full",
        None => "uninitialized",
    };
    serde_json::json!({
        "section": controller.section(),
        "chapter": controller.chapter().to_string(),
        "layout": layout,
        "pending": controller.pending_requests(),
    })
    .to_string()
}
