#![forbid(unsafe_code)]

use folio_core::ConfigError;
use thiserror::Error;

/// Failure to bind the controller to the page.
///
/// Raised only from [`FolioApp::start`](crate::FolioApp); once running,
/// fragment failures are handled by the controller.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("no global window")]
    NoWindow,

    #[error("page element {0:?} is missing")]
    MissingElement(String),

    #[error("javascript error: {0}")]
    Js(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl WebError {
    pub(crate) fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement(selector.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            WebError::missing("#content").to_string(),
            "page element \"#content\" is missing"
        );
        let err = WebError::from(ConfigError::Invalid(vec!["mobile_breakpoint must be positive".into()]));
        assert_eq!(
            err.to_string(),
            "site config rejected: mobile_breakpoint must be positive"
        );
    }
}
