use thiserror::Error;

use crate::PairCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unknown difficulty")]
    UnknownDifficulty,
    #[error("Cannot deal {requested} pairs from a pool of {available} symbols")]
    TooManyPairs {
        requested: PairCount,
        available: PairCount,
    },
    #[error("Deck must hold every symbol exactly twice")]
    InvalidDeck,
    #[error("Invalid card position")]
    InvalidPosition,
}

/// Failure reported by a [`KeyValueStore`](crate::KeyValueStore) write.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage is not available")]
    Unavailable,
    #[error("Storage rejected the write")]
    WriteRejected,
}

pub type Result<T> = core::result::Result<T, GameError>;
