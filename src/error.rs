//! Crate error type for everything outside the pure report core.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot access \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dataset \"{}\": {message}", .path.display())]
    Dataset { path: PathBuf, message: String },

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Usage(String),

    #[error("api server: {0}")]
    Server(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
