//! Domain engine for the construction work tracker.
//!
//! Pure, synchronous building blocks shared by the store and the CLI:
//!
//! - [`models`] — projects, blocks, floors, works, work types, executors and
//!   their validated input payloads.
//! - [`selection`] — the project → block → floor drill-down state.
//! - [`filter`], [`sort`], [`metrics`] — the dashboard pipeline.
//! - [`lookup`] — id-based resolution and display-name fallbacks.
//! - [`floor_plan`], [`catalog`] — project-form helpers and the default
//!   work-type catalog.
//!
//! Nothing here performs I/O.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod floor_plan;
pub mod lookup;
pub mod metrics;
pub mod models;
pub mod notify;
pub mod selection;
pub mod sort;
pub mod status;
pub mod types;
pub mod validation;
pub mod wire;

pub use error::CoreError;
pub use notify::{Notifier, Severity};
