use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PentadError>;

#[derive(Debug, Error)]
pub enum PentadError {
    #[error("could not access {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not encode {}: {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Configuration(String),

    #[error("sync failed: {0}")]
    Sync(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
