use thiserror::Error;

use tourforge::{ConfigError, StoreError, TourForgeError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Engine(#[from] TourForgeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid matrix file: {0}")]
    Matrix(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
