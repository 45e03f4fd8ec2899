//! Floor-plan generation for the project form.
//!
//! A block is entered as a numeric floor range plus a comma-separated list
//! of extra, usually non-numeric, floors ("Подвал, Тех.этаж"). The range is
//! expanded into contiguous labels and the extras are appended in the order
//! they were typed.

use crate::error::CoreError;
use crate::models::{Block, BlockInput};

/// Upper bound on generated floors per block; guards against typos like
/// `1..1000`.
pub const MAX_FLOORS_PER_BLOCK: usize = 300;

/// One block row of the project form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockPlan {
    pub name: String,
    pub floor_from: String,
    pub floor_to: String,
    pub extra: String,
}

impl BlockPlan {
    /// Default first block offered for a new project.
    pub fn first() -> Self {
        Self {
            name: "БС-1".to_string(),
            floor_from: "1".to_string(),
            floor_to: "9".to_string(),
            extra: String::new(),
        }
    }

    /// Next block row, named after its position (`БС-2`, `БС-3`, ...).
    pub fn numbered(position: usize) -> Self {
        Self {
            name: format!("БС-{position}"),
            ..Self::default()
        }
    }

    /// Expand the row into floor labels: the numeric range first, then the
    /// extras. An unparsable or inverted range contributes nothing.
    pub fn floors(&self) -> Result<Vec<String>, CoreError> {
        let mut floors = Vec::new();

        let from = self.floor_from.trim().parse::<i64>();
        let to = self.floor_to.trim().parse::<i64>();
        if let (Ok(from), Ok(to)) = (from, to) {
            if from <= to {
                let count = to
                    .checked_sub(from)
                    .and_then(|span| usize::try_from(span).ok())
                    .map_or(usize::MAX, |span| span.saturating_add(1));
                if count > MAX_FLOORS_PER_BLOCK {
                    return Err(CoreError::Validation(format!(
                        "block {}: {count} floors exceeds the limit of {MAX_FLOORS_PER_BLOCK}",
                        self.name
                    )));
                }
                floors.extend((from..=to).map(|n| n.to_string()));
            }
        }

        floors.extend(
            self.extra
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string),
        );
        Ok(floors)
    }

    /// Recover the form row from a stored block, for editing.
    pub fn from_block(block: &Block) -> Self {
        let mut numeric: Vec<i64> = Vec::new();
        let mut extra: Vec<&str> = Vec::new();
        for floor in &block.floors {
            match floor.number.trim().parse::<i64>() {
                Ok(n) => numeric.push(n),
                Err(_) => extra.push(&floor.number),
            }
        }
        numeric.sort_unstable();

        Self {
            name: block.name.clone(),
            floor_from: numeric.first().map(i64::to_string).unwrap_or_default(),
            floor_to: numeric.last().map(i64::to_string).unwrap_or_default(),
            extra: extra.join(", "),
        }
    }
}

/// Build the `blocks` payload of a project from its form rows. Rows without
/// a name are skipped.
pub fn build_blocks(plans: &[BlockPlan]) -> Result<Vec<BlockInput>, CoreError> {
    plans
        .iter()
        .filter(|p| !p.name.trim().is_empty())
        .map(|p| {
            Ok(BlockInput {
                name: p.name.trim().to_string(),
                floors: p.floors()?,
            })
        })
        .collect()
}
