#![forbid(unsafe_code)]

//! Site configuration as data.
//!
//! Every value that the router would otherwise hardcode lives in
//! [`SiteConfig`], so a deployment can rename fragments or move the layout
//! breakpoint without a rebuild. `SiteConfig::default()` reproduces the
//! published site exactly.
//!
//! ```json
//! {
//!   "mobile_breakpoint": 768,
//!   "fragments": { "chapters_dir": "chapters", "about": "about.html" },
//!   "discard_stale_responses": true
//! }
//! ```
//!
//! Missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::section::Book;

/// Top-level configuration for one site deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Viewports at or below this width (CSS pixels) get the landing layout.
    pub mobile_breakpoint: u32,

    /// Highest chapter index in the algorithms book.
    pub algorithms_last_chapter: u32,

    /// Highest chapter index in the history book.
    pub history_last_chapter: u32,

    /// Static fragment locations.
    pub fragments: FragmentPaths,

    /// Markup placed above the link list on the algorithms contents page.
    pub algorithms_heading: String,

    /// Text of the header subtitle created when the page lacks one.
    pub header_subtitle: String,

    /// Markup shown in place of the logo when the SVG cannot be loaded.
    pub fallback_logo: String,

    /// Multiplier applied to wheel deltas over the scrolling panes.
    pub wheel_scroll_factor: f64,

    /// Drop fragment responses superseded by a later navigation.
    pub discard_stale_responses: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768,
            algorithms_last_chapter: 38,
            history_last_chapter: 10,
            fragments: FragmentPaths::default(),
            algorithms_heading: "<h1>[The Algorithms on Urbanism and Architecture]</h1><br>"
                .to_owned(),
            header_subtitle: "Richard Qian Li's Site on Algorithms and Urbanism".to_owned(),
            fallback_logo: r#"<div style="font-size: 24px; font-weight: bold;">LOGO</div>"#
                .to_owned(),
            wheel_scroll_factor: 0.6,
            discard_stale_responses: true,
        }
    }
}

/// Relative paths of every static fragment the router fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentPaths {
    /// Root holding `<book>/<NN>.html` chapter files.
    pub chapters_dir: String,
    pub algorithms_links: String,
    pub history_links: String,
    pub about: String,
    pub logo: String,
}

impl Default for FragmentPaths {
    fn default() -> Self {
        Self {
            chapters_dir: "chapters".to_owned(),
            algorithms_links: "algorithms-links.html".to_owned(),
            history_links: "links.html".to_owned(),
            about: "about.html".to_owned(),
            logo: "SVG/Asset 1.svg".to_owned(),
        }
    }
}

impl FragmentPaths {
    fn named(&self) -> [(&'static str, &str); 5] {
        [
            ("fragments.chapters_dir", self.chapters_dir.as_str()),
            ("fragments.algorithms_links", self.algorithms_links.as_str()),
            ("fragments.history_links", self.history_links.as_str()),
            ("fragments.about", self.about.as_str()),
            ("fragments.logo", self.logo.as_str()),
        ]
    }
}

impl SiteConfig {
    /// Load from a JSON string and reject out-of-range values.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Check every field. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.mobile_breakpoint == 0 {
            errors.push("mobile_breakpoint must be > 0".into());
        }

        for (name, path) in self.fragments.named() {
            if path.trim().is_empty() {
                errors.push(format!("{name} must not be empty"));
            } else if path.split('/').any(|segment| segment == "..") {
                errors.push(format!("{name} must not contain '..', got {path:?}"));
            }
        }

        if !self.wheel_scroll_factor.is_finite() || self.wheel_scroll_factor <= 0.0 {
            errors.push(format!(
                "wheel_scroll_factor must be finite and > 0, got {}",
                self.wheel_scroll_factor
            ));
        }

        errors
    }

    /// Highest chapter index reachable in `book`.
    #[must_use]
    pub const fn last_chapter(&self, book: Book) -> u32 {
        match book {
            Book::Algorithms => self.algorithms_last_chapter,
            Book::History => self.history_last_chapter,
        }
    }

    /// Whether a viewport of `width` CSS pixels gets the landing layout.
    #[must_use]
    pub const fn is_narrow(&self, width: u32) -> bool {
        width <= self.mobile_breakpoint
    }
}
