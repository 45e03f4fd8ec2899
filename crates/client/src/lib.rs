//! REST collaborator for the tracker backend.
//!
//! - [`Backend`] — the per-entity data-access seam the store talks to.
//! - [`RestBackend`] — the [`reqwest`] implementation against the HTTP API.
//! - [`ClientConfig`] — base URL and timeout, loaded from the environment.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;

pub use api::RestBackend;
pub use backend::Backend;
pub use config::ClientConfig;
pub use error::ApiError;
