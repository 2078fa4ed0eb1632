use crate::types::EntityId;
use thiserror::Error;

/// Fatal-by-design conditions. Every variant here signals caller or
/// state-machine misuse, not a recoverable runtime fault: the offending
/// operation aborts with no partial mutation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("no available charging port on '{id}'")]
    NoPortAvailable { id: EntityId },

    #[error("no charging port in use on '{id}'")]
    NoPortOccupied { id: EntityId },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
