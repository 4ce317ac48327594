use crate::repository::StorageError;
use lyricle_types::GameError;
use thiserror::Error;

/// Errors surfaced by `DailyGameService`
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A caller-facing game rule or input failure
    #[error(transparent)]
    Game(#[from] GameError),
    /// Storage failure, passed through unchanged
    #[error("storage failure")]
    Storage(#[source] StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Storage(err)
    }
}

impl ServiceError {
    /// The domain error, if this is not a storage failure
    pub fn game_error(&self) -> Option<&GameError> {
        match self {
            ServiceError::Game(err) => Some(err),
            ServiceError::Storage(_) => None,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
