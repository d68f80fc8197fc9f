#![forbid(unsafe_code)]

//! Test harness and reference fixtures for Folio.
//!
//! - [`RecordingSurface`]: a page that logs every write.
//! - [`StaticSite`]: fragments served from memory, with 404s and network
//!   failures on demand.
//! - [`Driver`]: the host loop, completing fetches in a chosen order.

pub mod driver;
pub mod site;
pub mod surface;

pub use driver::{CompletionOrder, Driver, fixture_seed};
pub use site::{StaticSite, algorithms_page, history_page};
pub use surface::{RecordingSurface, SurfaceOp};
