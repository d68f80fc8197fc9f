#![forbid(unsafe_code)]

//! Deterministic host loop for the controller.
//!
//! The browser completes fetches whenever the network answers. [`Driver`]
//! plays that role for tests: it keeps the requests the controller issued,
//! answers them from a [`StaticSite`], and lets a test pick the order in
//! which they complete.

use folio_core::{Controller, FragmentRequest, SiteConfig, Ticket};
use tracing::debug;

use crate::site::StaticSite;
use crate::surface::RecordingSurface;

/// Order in which [`Driver::settle_in`] completes outstanding requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOrder {
    /// Oldest request first.
    Issued,
    /// Newest request first.
    Reversed,
    /// Pseudo-random, reproducible from the seed.
    Shuffled(u64),
}

/// Read a seed override from `FOLIO_TEST_SEED`, falling back to `default`.
#[must_use]
pub fn fixture_seed(default: u64) -> u64 {
    std::env::var("FOLIO_TEST_SEED")
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

/// Simple LCG; enough to scramble completion order reproducibly.
#[derive(Debug, Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        self.0
    }

    fn below(&mut self, bound: usize) -> usize {
        ((self.next_u64() >> 33) % bound as u64) as usize
    }
}

/// A controller over a [`RecordingSurface`], fed from a [`StaticSite`].
#[derive(Debug)]
pub struct Driver {
    controller: Controller<RecordingSurface>,
    site: StaticSite,
    outstanding: Vec<FragmentRequest>,
    fetched: Vec<String>,
}

impl Driver {
    #[must_use]
    pub fn new(site: StaticSite) -> Self {
        Self::with_config(site, SiteConfig::default())
    }

    #[must_use]
    pub fn with_config(site: StaticSite, config: SiteConfig) -> Self {
        Self {
            controller: Controller::new(RecordingSurface::new(), config),
            site,
            outstanding: Vec::new(),
            fetched: Vec::new(),
        }
    }

    #[must_use]
    pub fn controller(&self) -> &Controller<RecordingSurface> {
        &self.controller
    }

    #[must_use]
    pub fn surface(&self) -> &RecordingSurface {
        self.controller.surface()
    }

    pub fn surface_mut(&mut self) -> &mut RecordingSurface {
        self.controller.surface_mut()
    }

    pub fn site_mut(&mut self) -> &mut StaticSite {
        &mut self.site
    }

    /// Run one controller operation and queue whatever it asks to fetch.
    pub fn act<F>(&mut self, op: F)
    where
        F: FnOnce(&mut Controller<RecordingSurface>) -> Vec<FragmentRequest>,
    {
        let requests = op(&mut self.controller);
        self.enqueue(requests);
    }

    pub fn load_logo(&mut self) {
        let request = self.controller.load_logo();
        self.enqueue(vec![request]);
    }

    /// Requests issued and not yet answered, oldest first.
    #[must_use]
    pub fn outstanding(&self) -> &[FragmentRequest] {
        &self.outstanding
    }

    #[must_use]
    pub fn outstanding_paths(&self) -> Vec<&str> {
        self.outstanding.iter().map(|r| r.path.as_str()).collect()
    }

    /// Every path ever requested, in issue order.
    #[must_use]
    pub fn fetched(&self) -> &[String] {
        &self.fetched
    }

    /// Answer the request holding `ticket`. Returns `false` if it is not
    /// outstanding.
    pub fn resolve(&mut self, ticket: Ticket) -> bool {
        match self.outstanding.iter().position(|r| r.ticket == ticket) {
            Some(index) => {
                self.resolve_at(index);
                true
            }
            None => false,
        }
    }

    /// Answer the oldest outstanding request for `path`.
    pub fn resolve_path(&mut self, path: &str) -> bool {
        match self.outstanding.iter().position(|r| r.path == path) {
            Some(index) => {
                self.resolve_at(index);
                true
            }
            None => false,
        }
    }

    /// Answer everything, including follow-ups, oldest first.
    pub fn settle(&mut self) {
        self.settle_in(CompletionOrder::Issued);
    }

    pub fn settle_in(&mut self, order: CompletionOrder) {
        let mut rng = match order {
            CompletionOrder::Shuffled(seed) => Some(Lcg(seed)),
            _ => None,
        };
        while !self.outstanding.is_empty() {
            let index = match (order, rng.as_mut()) {
                (CompletionOrder::Reversed, _) => self.outstanding.len() - 1,
                (CompletionOrder::Shuffled(_), Some(rng)) => rng.below(self.outstanding.len()),
                _ => 0,
            };
            self.resolve_at(index);
        }
    }

    fn enqueue(&mut self, requests: Vec<FragmentRequest>) {
        self.fetched.extend(requests.iter().map(|r| r.path.clone()));
        self.outstanding.extend(requests);
    }

    fn resolve_at(&mut self, index: usize) {
        let request = self.outstanding.remove(index);
        let result = self.site.serve(&request);
        debug!(
            target: "folio.harness",
            ticket = request.ticket.get(),
            path = %request.path,
            ok = result.is_ok(),
            "resolving fragment"
        );
        let follow_up = self.controller.complete(request.ticket, result);
        self.enqueue(follow_up);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcg_is_reproducible() {
        let mut a = Lcg(7);
        let mut b = Lcg(7);
        for _ in 0..16 {
            assert_eq!(a.below(5), b.below(5));
        }
    }

    #[test]
    fn settle_drains_follow_ups() {
        let mut driver = Driver::new(StaticSite::reference());
        driver.act(|c| c.select_section(folio_core::Section::History));
        driver.act(|c| c.show_table_of_contents());
        driver.settle();
        assert!(driver.outstanding().is_empty());
        assert_eq!(driver.controller().pending_requests(), 0);
    }

    #[test]
    fn fixture_seed_defaults() {
        if std::env::var("FOLIO_TEST_SEED").is_err() {
            assert_eq!(fixture_seed(42), 42);
        }
    }
}
