//! Sort modes for the dashboard work list.
//!
//! Every mode is a comparator applied with a stable sort, so works with
//! equal keys keep their relative input order between renders.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::Work;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// By id ascending.
    #[default]
    Default,
    /// By the work type's technological order.
    Technology,
    /// By progress, highest first.
    Progress,
    /// By planned start date.
    Date,
    /// Most urgent status first.
    Status,
    Floor,
    Category,
}

impl SortMode {
    pub const ALL: [SortMode; 7] = [
        SortMode::Default,
        SortMode::Technology,
        SortMode::Progress,
        SortMode::Date,
        SortMode::Status,
        SortMode::Floor,
        SortMode::Category,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Technology => "technology",
            Self::Progress => "progress",
            Self::Date => "date",
            Self::Status => "status",
            Self::Floor => "floor",
            Self::Category => "category",
        }
    }

    pub fn compare(self, a: &Work, b: &Work) -> Ordering {
        match self {
            Self::Default => a.id.cmp(&b.id),
            Self::Technology => a.tech_order().cmp(&b.tech_order()),
            Self::Progress => b.progress.cmp(&a.progress),
            // Works without a start date go last.
            Self::Date => match (a.start_date, b.start_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::Status => a.status.rank().cmp(&b.status.rank()),
            Self::Floor => compare_floor_labels(
                a.floor.as_deref().unwrap_or_default(),
                b.floor.as_deref().unwrap_or_default(),
            ),
            Self::Category => collate(
                a.category.as_deref().unwrap_or_default(),
                b.category.as_deref().unwrap_or_default(),
            ),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown sort mode: {s}")))
    }
}

/// Stable-sort `works` in place by `mode`.
pub fn sort_works<W: Borrow<Work>>(works: &mut [W], mode: SortMode) {
    works.sort_by(|a, b| mode.compare(a.borrow(), b.borrow()));
}

// ---------------------------------------------------------------------------
// Comparators
// ---------------------------------------------------------------------------

/// Integer value of a floor label, if the whole (trimmed) label is one.
pub fn floor_number(label: &str) -> Option<i64> {
    label.trim().parse().ok()
}

/// Order floor labels: numeric labels first in numeric order, then the
/// rest lexicographically. Ties between numerically equal labels ("01" and
/// "1") are broken on the raw text so the order stays total.
///
/// Mixed pairs do not fall back to string comparison: with numbers compared
/// numerically that would cycle ("9" < "10" < "1а" < "9"), and `sort_by`
/// requires a total order.
pub fn compare_floor_labels(a: &str, b: &str) -> Ordering {
    match (floor_number(a), floor_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Case-insensitive comparison for Russian/Latin names, with `ё` ordered
/// right after `е` as in the alphabet.
pub fn collate(a: &str, b: &str) -> Ordering {
    fn weights(s: &str) -> impl Iterator<Item = (u32, u8)> + '_ {
        s.chars().flat_map(char::to_lowercase).map(|c| match c {
            'ё' => ('е' as u32, 1),
            c => (c as u32, 0),
        })
    }
    weights(a).cmp(weights(b)).then_with(|| a.cmp(b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
