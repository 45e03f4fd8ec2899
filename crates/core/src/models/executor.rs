use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;
use crate::validation::not_blank;

/// A crew or person performing works. Names are unique on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Executor {
    pub id: DbId,
    pub name: String,
}

/// Payload for `POST /executors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct ExecutorInput {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub name: String,
}
