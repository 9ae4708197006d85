use thiserror::Error;

use crate::application::validation::ValidationErrors;
use crate::ports::RepositoryError;

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Validation(#[from] ValidationErrors),
}

pub type AppResult<T> = Result<T, AppError>;
