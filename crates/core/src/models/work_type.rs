//! Work type catalog entries.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;
use crate::validation::not_blank;

/// A kind of work (plastering, tiling, ...) with its place in the
/// technological sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkType {
    pub id: DbId,
    pub name: String,
    /// Technological sequence number; lower runs earlier on site.
    #[serde(default)]
    pub order: i32,
    /// Presentation hint, e.g. `#e53e3e`.
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub category: String,
}

/// Payload for `POST /work_types`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct WorkTypeInput {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub name: String,
    #[validate(range(min = 1))]
    pub order: i32,
    #[validate(custom(function = "not_blank"), length(max = 64))]
    pub color: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub category: String,
}
