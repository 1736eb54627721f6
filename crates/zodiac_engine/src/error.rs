use crate::person::Slot;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZodiacError>;

#[derive(Debug, Error)]
pub enum ZodiacError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Person {id} not found in {slot}")]
    NotFound { id: String, slot: Slot },

    #[error("Unknown zodiac sign: {0}")]
    UnknownSign(String),

    #[error("Storage error on {slot}")]
    Persist {
        slot: Slot,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {slot}")]
    Decode {
        slot: Slot,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid drag payload: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ZodiacError {
    /// Persistence failures leave the in-memory state mutated.
    pub fn is_persistence(&self) -> bool {
        matches!(self, ZodiacError::Persist { .. })
    }
}

impl From<toml::de::Error> for ZodiacError {
    fn from(err: toml::de::Error) -> Self {
        ZodiacError::Config(format!("TOML parse error: {}", err))
    }
}
