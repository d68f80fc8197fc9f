#![forbid(unsafe_code)]

//! In-memory stand-in for the static fragment directory.

use std::collections::{BTreeMap, BTreeSet};

use folio_core::{FragmentError, FragmentRequest};

/// Fragments keyed by relative path.
///
/// Missing paths answer `404`; paths marked with
/// [`fail_network`](Self::fail_network) fail without a response.
#[derive(Debug, Clone, Default)]
pub struct StaticSite {
    files: BTreeMap<String, String>,
    offline: BTreeSet<String>,
}

impl StaticSite {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The published layout: every history chapter, the first five
    /// algorithms chapters plus `a0` and `n1`, both link lists, the about
    /// page and the logo. Algorithms chapter `00` does not exist.
    #[must_use]
    pub fn reference() -> Self {
        let mut site = Self::new()
            .with("algorithms-links.html", "<ul class=\"algorithms-links\"></ul>")
            .with("links.html", "<ul class=\"history-links\"></ul>")
            .with("about.html", "<p>about</p>")
            .with("SVG/Asset 1.svg", "<svg id=\"logo\"></svg>")
            .with("chapters/algorithms/a0.html", "<p>algorithms a0</p>")
            .with("chapters/algorithms/n1.html", "<p>algorithms n1</p>");
        for n in 0..=10 {
            site.insert(format!("chapters/history/{n:02}.html"), history_page(n));
        }
        for n in 1..=5 {
            site.insert(format!("chapters/algorithms/{n:02}.html"), algorithms_page(n));
        }
        site
    }

    #[must_use]
    pub fn with(mut self, path: impl Into<String>, html: impl Into<String>) -> Self {
        self.insert(path, html);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, html: impl Into<String>) {
        self.files.insert(path.into(), html.into());
    }

    pub fn remove(&mut self, path: &str) {
        self.files.remove(path);
    }

    /// Make `path` fail as if the network were down.
    pub fn fail_network(&mut self, path: impl Into<String>) {
        self.offline.insert(path.into());
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Answer a request the way a static file server would.
    pub fn serve(&self, request: &FragmentRequest) -> Result<String, FragmentError> {
        if self.offline.contains(&request.path) {
            return Err(FragmentError::Network {
                path: request.path.clone(),
                reason: "connection refused".into(),
            });
        }
        self.files
            .get(&request.path)
            .cloned()
            .ok_or_else(|| FragmentError::Status {
                path: request.path.clone(),
                status: 404,
            })
    }
}

/// Body of history chapter `n` in [`StaticSite::reference`].
#[must_use]
pub fn history_page(n: u32) -> String {
    format!("<p>history {n:02}</p>")
}

/// Body of algorithms chapter `n` in [`StaticSite::reference`].
#[must_use]
pub fn algorithms_page(n: u32) -> String {
    format!("<p>algorithms {n:02}</p>")
}
