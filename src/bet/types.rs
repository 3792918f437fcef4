//! Bet domain types: settlements, persisted records, and player accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable result of one resolved bet.
///
/// The field set is a compatibility contract: history rendering and API
/// consumers deserialize exactly these keys. Computed once per submission,
/// never mutated afterward.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// The sum the player predicted.
    pub guess: u8,
    pub die_1: u8,
    pub die_2: u8,
    /// Sum of the two dice.
    pub roll: u8,
    pub wagered: u64,
    /// Multiplier applied on a win; sentinel 1.0 on a loss.
    pub payout: f64,
    /// Signed coin change applied to the player balance.
    pub net: i64,
    pub is_winner: bool,
}

/// A settled bet as persisted: the settlement plus identity and timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BetRecord {
    pub bet_id: Uuid,
    pub player_id: String,
    #[serde(flatten)]
    pub settlement: Settlement,
    pub created_on: DateTime<Utc>,
}

/// A player's coin balance as held by the ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerAccount {
    pub player_id: String,
    pub coins: u64,
    pub last_bet_on: Option<DateTime<Utc>>,
}

impl PlayerAccount {
    pub fn new(player_id: impl Into<String>, coins: u64) -> Self {
        Self {
            player_id: player_id.into(),
            coins,
            last_bet_on: None,
        }
    }

    /// Apply a settlement: adjust coins by the net and stamp the bet time.
    ///
    /// Must run inside the same serialized unit that checked affordability
    /// and persists the bet record; `net >= -wagered` and
    /// `wagered <= coins` together keep the sum non-negative.
    pub fn apply_settlement(&mut self, settlement: &Settlement, at: DateTime<Utc>) {
        self.coins = (self.coins as i64 + settlement.net) as u64;
        self.last_bet_on = Some(at);
    }
}
