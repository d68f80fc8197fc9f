#![no_main]

use arbitrary::Arbitrary;
use folio_core::{
    ChapterId, Controller, FragmentError, Layout, NavKey, Section, SiteConfig, Step, Surface,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Action {
    Section(u8),
    Landing(u8),
    Chapter(u32),
    Link(String),
    Step(bool),
    Key(bool),
    Contents,
    Resize(u16),
    /// Complete the n-th outstanding request, successfully or not.
    Complete { index: u8, ok: bool },
}

#[derive(Debug, Arbitrary)]
struct Session {
    location: String,
    width: u16,
    actions: Vec<Action>,
}

struct Null;

impl Surface for Null {
    fn show_layout(&mut self, _layout: Layout) {}
    fn set_active_section(&mut self, _section: Section) {}
    fn set_book_chrome_visible(&mut self, _visible: bool) {}
    fn set_content(&mut self, _html: &str) {}
    fn scroll_content_to_top(&mut self) {}
    fn set_links(&mut self, _html: &str) {}
    fn set_logo(&mut self, _markup: &str, _subtitle: &str) {}
    fn push_location(&mut self, _search: &str) {}
}

fn section(raw: u8) -> Section {
    Section::ALL[usize::from(raw) % Section::ALL.len()]
}

fuzz_target!(|session: Session| {
    if session.actions.len() > 256 {
        return;
    }
    let config = SiteConfig::default();
    let mut c = Controller::new(Null, config.clone());
    let mut outstanding = c.initialize(&session.location, u32::from(session.width));

    for action in session.actions {
        let issued = match action {
            Action::Section(s) => c.select_section(section(s)),
            Action::Landing(s) => c.choose_from_landing(section(s)),
            Action::Chapter(n) => c.select_chapter(ChapterId::Index(n)),
            Action::Link(token) => c.follow_link(&token),
            Action::Step(next) => c.step_chapter(if next { Step::Next } else { Step::Previous }),
            Action::Key(right) => c.handle_key(if right { NavKey::ArrowRight } else { NavKey::ArrowLeft }),
            Action::Contents => c.show_table_of_contents(),
            Action::Resize(w) => c.handle_resize(u32::from(w)),
            Action::Complete { index, ok } => {
                if outstanding.is_empty() {
                    continue;
                }
                let request = outstanding.remove(usize::from(index) % outstanding.len());
                let result = if ok {
                    Ok(format!("<p>{}</p>", request.path))
                } else {
                    Err(FragmentError::Status { path: request.path.clone(), status: 500 })
                };
                c.complete(request.ticket, result)
            }
        };
        outstanding.extend(issued);

        if let (Some(book), Some(n)) = (c.section().book(), c.chapter().index()) {
            assert!(n <= config.last_chapter(book));
        }
        assert_eq!(c.pending_requests(), outstanding.len());
    }
});
