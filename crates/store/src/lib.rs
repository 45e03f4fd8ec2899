//! In-memory entity store and dashboard state for the tracker.
//!
//! [`EntityStore`] owns the snapshot of every collection fetched from a
//! [`Backend`](sitetrack_client::Backend) and funnels every mutation through
//! validate → call → refetch → notify. [`Dashboard`] turns a snapshot into
//! the filtered, sorted work list plus both metrics aggregates.

pub mod dashboard;
pub mod error;
pub mod notify;
pub mod store;

pub use dashboard::{Dashboard, DashboardView};
pub use error::StoreError;
pub use notify::TracingNotifier;
pub use store::{Collection, EntityStore, Snapshot};
