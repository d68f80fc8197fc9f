#![forbid(unsafe_code)]

//! Error types for the navigation core.
//!
//! Only [`FragmentError`] can occur while the site is running; the rest are
//! parse and configuration failures that callers recover from with defaults.

use thiserror::Error;

/// A `section` value that names none of the known sections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown section: {0:?}")]
pub struct UnknownSection(pub String);

/// A `chapter` value that is neither an index nor a recognised token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid chapter identifier: {0:?}")]
pub struct InvalidChapter(pub String);

/// A static fragment could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FragmentError {
    /// The request never produced a response.
    #[error("fragment {path} unavailable: {reason}")]
    Network { path: String, reason: String },

    /// The server answered with a non-success status.
    #[error("fragment {path} unavailable: HTTP {status}")]
    Status { path: String, status: u16 },
}

impl FragmentError {
    /// Path of the fragment that failed.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Network { path, .. } | Self::Status { path, .. } => path,
        }
    }
}

/// The page address could not be parsed.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("malformed page url: {0}")]
    Url(#[from] url::ParseError),
}

/// Site configuration failed to load.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("site config is not valid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("site config rejected: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_error_reports_path() {
        let err = FragmentError::Status {
            path: "chapters/history/04.html".into(),
            status: 404,
        };
        assert_eq!(err.path(), "chapters/history/04.html");
        assert_eq!(
            err.to_string(),
            "fragment chapters/history/04.html unavailable: HTTP 404"
        );
    }

    #[test]
    fn invalid_config_lists_every_problem() {
        let err = ConfigError::Invalid(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "site config rejected: a; b");
    }
}
