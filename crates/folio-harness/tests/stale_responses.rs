#![forbid(unsafe_code)]

//! Out-of-order fetch completion.
//!
//! Fragments complete in whatever order the network answers. With stale
//! discarding on (the default) the page always ends up showing what the
//! reader asked for last; with it off, the last response to arrive wins.
//!
//! Run:
//!   cargo test -p folio-harness --test stale_responses
//!   FOLIO_TEST_SEED=7 cargo test -p folio-harness --test stale_responses

use folio_core::{ChapterId, Section, SiteConfig, Step};
use folio_harness::{
    CompletionOrder, Driver, StaticSite, SurfaceOp, fixture_seed, history_page,
};
use pretty_assertions::assert_eq;

const WIDE: u32 = 1280;
const HISTORY_LINKS: &str = "<ul class=\"history-links\"></ul>";
const ALGORITHMS_LINKS: &str = "<ul class=\"algorithms-links\"></ul>";

fn legacy_config() -> SiteConfig {
    SiteConfig {
        discard_stale_responses: false,
        ..SiteConfig::default()
    }
}

fn opened(config: SiteConfig, section: Section) -> Driver {
    let mut d = Driver::with_config(StaticSite::reference(), config);
    d.act(|c| c.initialize(&format!("?section={section}"), WIDE));
    d.settle();
    d.surface_mut().clear_ops();
    d
}

fn rapid_chapters(d: &mut Driver) {
    for n in [3, 4, 5] {
        d.act(|c| c.select_chapter(ChapterId::Index(n)));
    }
}

#[test]
fn latest_chapter_wins_when_replies_arrive_backwards() {
    let mut d = opened(SiteConfig::default(), Section::History);
    rapid_chapters(&mut d);
    d.settle_in(CompletionOrder::Reversed);

    assert_eq!(d.surface().content(), history_page(5));
    assert_eq!(d.surface().content_writes(), 1);
    assert_eq!(d.surface().location(), Some("?section=history&chapter=5"));
    assert_eq!(d.controller().chapter(), &ChapterId::Index(5));
}

#[test]
fn last_reply_wins_without_discarding() {
    let mut d = opened(legacy_config(), Section::History);
    rapid_chapters(&mut d);
    d.settle_in(CompletionOrder::Reversed);

    assert_eq!(d.surface().content(), history_page(3));
    assert_eq!(d.surface().content_writes(), 3);
    // The state still names the chapter the reader chose.
    assert_eq!(d.controller().chapter(), &ChapterId::Index(5));
}

#[test]
fn section_switch_supersedes_chapter_in_flight() {
    let mut d = opened(SiteConfig::default(), Section::History);
    d.act(|c| c.select_chapter(ChapterId::Index(4)));
    d.act(|c| c.select_section(Section::About));
    d.settle();

    assert_eq!(d.surface().content(), "<p>about</p>");
    assert!(
        !d.surface()
            .ops()
            .contains(&SurfaceOp::Content(history_page(4)))
    );
}

#[test]
fn links_follow_the_latest_section() {
    let mut d = opened(SiteConfig::default(), Section::About);
    d.act(|c| c.select_section(Section::History));
    d.act(|c| c.select_section(Section::Algorithms));
    d.settle_in(CompletionOrder::Reversed);

    assert_eq!(d.surface().links(), ALGORITHMS_LINKS);
    assert!(d.surface().content().ends_with(ALGORITHMS_LINKS));
}

#[test]
fn links_follow_the_last_reply_without_discarding() {
    let mut d = opened(legacy_config(), Section::About);
    d.act(|c| c.select_section(Section::History));
    d.act(|c| c.select_section(Section::Algorithms));
    d.settle_in(CompletionOrder::Reversed);

    assert_eq!(d.surface().links(), HISTORY_LINKS);
    assert_eq!(d.surface().content(), history_page(0));
}

#[test]
fn contents_follow_up_yields_to_later_chapter() {
    let mut d = opened(SiteConfig::default(), Section::History);
    d.act(|c| c.select_chapter(ChapterId::Index(6)));
    d.settle();

    d.act(|c| c.show_table_of_contents());
    assert!(d.resolve_path("chapters/history/00.html"));
    d.surface_mut().clear_ops();
    d.act(|c| c.select_chapter(ChapterId::Index(2)));
    d.settle();

    assert_eq!(d.surface().content(), history_page(2));
    assert_eq!(d.surface().links(), HISTORY_LINKS);
    assert!(
        !d.surface()
            .ops()
            .contains(&SurfaceOp::Content(history_page(0)))
    );
}

#[test]
fn logo_is_never_stale() {
    let mut d = opened(SiteConfig::default(), Section::Algorithms);
    d.load_logo();
    for section in Section::ALL {
        d.act(|c| c.select_section(section));
    }
    d.settle_in(CompletionOrder::Reversed);
    assert_eq!(d.surface().logo(), Some("<svg id=\"logo\"></svg>"));
}

#[test]
fn any_completion_order_shows_the_final_choice() {
    let base = fixture_seed(0x5eed);
    for offset in 0..32 {
        let seed = base.wrapping_add(offset);
        let mut d = Driver::new(StaticSite::reference());
        d.load_logo();
        d.act(|c| c.initialize("?section=history&chapter=3", WIDE));
        d.act(|c| c.follow_link("7"));
        d.act(|c| c.step_chapter(Step::Next));
        d.settle_in(CompletionOrder::Shuffled(seed));

        assert_eq!(d.surface().content(), history_page(8), "seed {seed}");
        assert_eq!(d.surface().links(), HISTORY_LINKS, "seed {seed}");
        assert_eq!(
            d.surface().location(),
            Some("?section=history&chapter=8"),
            "seed {seed}"
        );
        assert_eq!(d.controller().pending_requests(), 0);
    }
}
