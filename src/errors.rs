//! Error types for bet resolution and the coin ledger.

use thiserror::Error;

/// Errors surfaced while validating, resolving, or committing a bet.
#[derive(Debug, Error)]
pub enum BetError {
    /// Guess outside [2, 12]. Detected before any die is rolled.
    #[error("guess must be a dice sum between 2 and 12, got {guess}")]
    InvalidGuess { guess: u8 },

    /// Wager below the one-coin minimum. Detected before any die is rolled.
    #[error("wager must be at least 1 coin, got {wagered}")]
    InvalidWager { wagered: u64 },

    /// Wager exceeds the coins available at the start of the serialized
    /// bet. Detected before any die is rolled.
    #[error("cannot wager {wagered} coins with only {available} available")]
    InsufficientCoins { wagered: u64, available: u64 },

    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    /// The atomic commit of the bet record plus balance update failed. The
    /// computed settlement has been discarded; retrying means re-running the
    /// whole bet, dice included.
    #[error("failed to persist settlement: {0}")]
    Persistence(#[from] StoreError),
}

/// Storage backend errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),

    #[error("read failed: {0}")]
    ReadFailed(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// Configuration errors for the payout table and engine settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("payout table is missing an entry for sum {0}")]
    MissingSum(u8),

    #[error("payout table key '{0}' is not a dice sum between 2 and 12")]
    InvalidSum(String),

    #[error("payout multiplier for sum {sum} must be positive, got {multiplier}")]
    NonPositiveMultiplier { sum: u8, multiplier: f64 },

    #[error("invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("failed to load configuration: {0}")]
    LoadFailed(String),
}

/// Convenience alias for bet operations.
pub type BetResult<T> = Result<T, BetError>;
