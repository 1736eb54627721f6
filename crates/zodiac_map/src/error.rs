use std::{io, path::PathBuf};
use thiserror::Error;
use zodiac_engine::ZodiacError;

#[derive(Error, Debug)]
pub enum MapToolError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file {path}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Engine(#[from] ZodiacError),
}

pub type Result<T> = std::result::Result<T, MapToolError>;
