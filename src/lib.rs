//! Core library surface for the catalogue.
//!
//! The crate models a small library: books grouped into categories, users
//! borrowing books through time-bounded orders, and whole-catalogue
//! snapshots on disk. The public modules expose an intentionally small API
//! so any front end (an interactive menu, a TUI, tests) can drive the same
//! operations. The crate emits `tracing` events but installs no subscriber;
//! wiring one up is the embedding application's job.
pub mod catalogue;
pub mod db;
pub mod error;
pub mod models;

/// The aggregate and its query vocabulary.
pub use catalogue::{Catalogue, SearchMatch, SearchOptions};

/// Snapshot tuning knobs for [`Catalogue::save`].
pub use db::SaveOptions;

/// The crate-wide error type and result alias.
pub use error::{CatalogueError, CatalogueResult};

/// The domain types front ends construct and pass around.
pub use models::{Book, BookKind, Category, Order, User};
