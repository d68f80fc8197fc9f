#![forbid(unsafe_code)]

//! Navigation core for the Folio static book viewer.
//!
//! The site is a page shell plus a directory of pre-rendered HTML
//! fragments: chapters of two books, their link lists, and an about page.
//! This crate decides which fragment belongs in which pane for every click,
//! key press, resize and page address, without touching a browser:
//!
//! - **Host-driven I/O**: [`Controller`] returns [`FragmentRequest`]s; the
//!   embedding environment fetches them and reports back.
//! - **Injected page**: all visible changes go through a [`Surface`].
//! - **Latest action wins**: responses superseded by a newer navigation are
//!   dropped.
//!
//! `folio-web` binds this to the DOM; `folio-harness` drives it in tests.

pub mod chapter;
pub mod config;
pub mod controller;
pub mod error;
pub mod fragment;
pub mod input;
pub mod query;
pub mod section;
pub mod state;
pub mod surface;

pub use chapter::{ChapterId, Step};
pub use config::{FragmentPaths, SiteConfig};
pub use controller::Controller;
pub use error::{ConfigError, FragmentError, InvalidChapter, QueryError, UnknownSection};
pub use fragment::{FragmentKind, FragmentRequest, Ticket};
pub use input::{NavKey, WheelScroll};
pub use section::{Book, Section};
pub use state::{Layout, NavState};
pub use surface::Surface;
