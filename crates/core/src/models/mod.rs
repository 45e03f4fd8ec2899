//! Entity models and the input DTOs sent to the backend.

pub mod executor;
pub mod project;
pub mod work;
pub mod work_type;

pub use executor::{Executor, ExecutorInput};
pub use project::{Block, BlockInput, Floor, ObjectType, Project, ProjectInput};
pub use work::{Work, WorkDraft, WorkInput};
pub use work_type::{WorkType, WorkTypeInput};
