#![forbid(unsafe_code)]

//! Browser front end for Folio.
//!
//! [`FolioApp`] (wasm32 only) binds a `folio_core::Controller` to the page:
//! it resolves the page elements into a DOM-backed `Surface`, forwards
//! clicks, arrow keys, resizes and wheel events, and runs each
//! `FragmentRequest` through `fetch`.
//!
//! ```js
//! import init, { FolioApp } from "./pkg/folio_web.js";
//! await init();
//! const app = FolioApp.start(null);
//! ```
//!
//! The event decoding in [`page`] is plain Rust and tested natively.

pub mod error;
pub mod page;

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use error::WebError;
pub use page::PageAction;

#[cfg(target_arch = "wasm32")]
pub use wasm::FolioApp;
