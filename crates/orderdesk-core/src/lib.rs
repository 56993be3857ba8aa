//! orderdesk-core library.
//!
//! In-memory record store plus the filter/sort/paginate engine behind the
//! orders table, and the typed navigation model of the dashboard chrome.
//!
//! # Conventions
//!
//! - **Errors**: Typed `thiserror` enums at the store and request boundary;
//!   `anyhow::Result` for config and seed loading.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod fixture;
pub mod model;
pub mod nav;
pub mod query;
pub mod store;

pub use model::record::{Record, RecordDraft, Status};
pub use query::{DerivedView, QueryState, SortDir, SortKey, evaluate};
pub use store::{RecordStore, StoreSnapshot};
