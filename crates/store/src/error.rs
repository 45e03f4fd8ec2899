use sitetrack_client::ApiError;
use sitetrack_core::error::CoreError;

/// Errors surfaced by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Validation or lookup failure; nothing was sent to the backend.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The backend call failed or returned a non-success status.
    #[error(transparent)]
    Network(#[from] ApiError),
}

impl StoreError {
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Core(CoreError::Validation(_)))
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Core(CoreError::NotFound { .. }) => true,
            Self::Network(e) => e.is_not_found(),
            _ => false,
        }
    }
}
