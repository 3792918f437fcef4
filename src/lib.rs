//! Snake Eyes - dice betting settlement engine
//!
//! Resolves a guessed two-die sum against an actual roll, computes the
//! signed coin delta from a configured payout table, and applies it to a
//! per-player coin ledger behind an atomic commit boundary.
//!
//! The resolution math in [`bet::resolution`] is pure; entropy comes in
//! through the [`bet::dice::DiceRoller`] seam and durability goes out
//! through the [`store::BetStore`] seam, so callers own both.

pub mod bet;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod store;

pub use bet::dice::{DiceRoller, SeededRoller, ThreadRngRoller};
pub use bet::resolution::{calculate_net, determine_payout, is_winner, settle_bet};
pub use bet::types::{BetRecord, PlayerAccount, Settlement};
pub use config::{EngineConfig, PayoutTable, MAX_GUESS, MIN_GUESS};
pub use errors::{BetError, BetResult, ConfigError, StoreError};
pub use ledger::{BetLedger, BettingStats, HistoryPage};
pub use store::{BetStore, CommitEntry, JsonFileStore, MemoryStore};
