//! Project tree: project → blocks → floors, plus the project's object types.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::{Date, DbId};
use crate::validation::{date_order, not_blank};
use crate::wire;

/// A construction project as returned by `GET /projects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: Option<DbId>,
    /// Business key. Stable for the lifetime of the project.
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "customer")]
    pub client: Option<String>,
    #[serde(default)]
    pub contractor: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, alias = "startDate", deserialize_with = "wire::opt_date")]
    pub start_date: Option<Date>,
    #[serde(default, alias = "endDate", deserialize_with = "wire::opt_date")]
    pub end_date: Option<Date>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub objects: Vec<ObjectType>,
}

/// A structural subdivision of a project (a building section or wing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub floors: Vec<Floor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    #[serde(default)]
    pub id: DbId,
    /// Display label; numeric for regular storeys, free text for extras
    /// such as "Подвал".
    #[serde(deserialize_with = "wire::label")]
    pub number: String,
}

/// A named space category within a project, e.g. "Квартиры".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    #[serde(default)]
    pub id: DbId,
    pub name: String,
}

impl Project {
    pub fn block(&self, id: DbId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn block_by_name(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name == name)
    }

    pub fn object(&self, id: DbId) -> Option<&ObjectType> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Block and floor owning the floor with `floor_id`.
    pub fn locate_floor(&self, floor_id: DbId) -> Option<(&Block, &Floor)> {
        self.blocks
            .iter()
            .find_map(|b| b.floor(floor_id).map(|f| (b, f)))
    }

    pub fn floor_count(&self) -> usize {
        self.blocks.iter().map(|b| b.floors.len()).sum()
    }
}

impl Block {
    pub fn floor(&self, id: DbId) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == id)
    }
}

// ---------------------------------------------------------------------------
// Input DTOs
// ---------------------------------------------------------------------------

/// Payload for `POST /projects` and `PUT /projects/{code}`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[validate(schema(function = "validate_project"))]
pub struct ProjectInput {
    #[validate(custom(function = "not_blank"), length(max = 64))]
    pub code: String,
    pub icon: Option<String>,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub client: Option<String>,
    pub contractor: Option<String>,
    pub address: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub budget: f64,
    pub blocks: Vec<BlockInput>,
    /// Object type names.
    pub objects: Vec<String>,
}

/// A block in a project payload: its name and floor labels in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockInput {
    pub name: String,
    pub floors: Vec<String>,
}

fn validate_project(input: &ProjectInput) -> Result<(), ValidationError> {
    date_order(input.start_date, input.end_date)?;

    let mut seen = std::collections::HashSet::new();
    for block in &input.blocks {
        if block.name.trim().is_empty() {
            return Err(ValidationError::new("block_name")
                .with_message("block name is required".into()));
        }
        if !seen.insert(block.name.as_str()) {
            return Err(ValidationError::new("block_name")
                .with_message(format!("duplicate block name: {}", block.name).into()));
        }
    }
    Ok(())
}

impl ProjectInput {
    /// Payload that re-submits `project` unchanged, for edits.
    pub fn from_project(project: &Project) -> Self {
        Self {
            code: project.code.clone(),
            icon: project.icon.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            client: project.client.clone(),
            contractor: project.contractor.clone(),
            address: project.address.clone(),
            start_date: project.start_date,
            end_date: project.end_date,
            budget: project.budget.unwrap_or(0.0),
            blocks: project
                .blocks
                .iter()
                .map(|b| BlockInput {
                    name: b.name.clone(),
                    floors: b.floors.iter().map(|f| f.number.clone()).collect(),
                })
                .collect(),
            objects: project.objects.iter().map(|o| o.name.clone()).collect(),
        }
    }
}
