//! Per-player coin ledger with serialized bet settlement.
//!
//! One bet is one serialized unit per player: the affordability check, dice
//! resolution, durable commit, and the in-memory balance update all happen
//! under that player's lock, so two concurrent all-in bets can never both
//! spend the same coins. Distinct players settle concurrently; there is no
//! global lock.

use crate::bet::dice::DiceRoller;
use crate::bet::resolution;
use crate::bet::types::{BetRecord, PlayerAccount};
use crate::config::EngineConfig;
use crate::errors::{BetError, BetResult};
use crate::store::BetStore;
use chrono::Utc;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Per-player state guarded by that player's lock.
struct PlayerState {
    account: PlayerAccount,
    /// Settled bets, oldest first.
    history: Vec<BetRecord>,
}

/// Aggregate betting totals, updated once per settled bet.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BettingStats {
    pub bet_count: u64,
    pub total_wagered: u64,
    pub total_net: i64,
}

/// One page of a player's bet history, newest first.
#[derive(Clone, Debug, Serialize)]
pub struct HistoryPage {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub bets: Vec<BetRecord>,
}

/// Coin ledger coordinating bet settlement against a storage backend.
pub struct BetLedger {
    config: EngineConfig,
    store: Arc<dyn BetStore>,
    players: DashMap<String, Arc<tokio::sync::Mutex<PlayerState>>>,
    stats: Mutex<BettingStats>,
}

impl BetLedger {
    pub fn new(config: EngineConfig, store: Arc<dyn BetStore>) -> Self {
        Self {
            config,
            store,
            players: DashMap::new(),
            stats: Mutex::new(BettingStats::default()),
        }
    }

    /// Create a player with the configured starting grant.
    ///
    /// Creating an existing player is a no-op; the current account is
    /// returned either way.
    pub async fn create_player(&self, player_id: &str) -> PlayerAccount {
        let state = self
            .players
            .entry(player_id.to_string())
            .or_insert_with(|| {
                info!(
                    player_id,
                    coins = self.config.starting_coins,
                    "created player account"
                );
                Arc::new(tokio::sync::Mutex::new(PlayerState {
                    account: PlayerAccount::new(player_id, self.config.starting_coins),
                    history: Vec::new(),
                }))
            })
            .clone();

        let state = state.lock().await;
        state.account.clone()
    }

    fn player_state(&self, player_id: &str) -> BetResult<Arc<tokio::sync::Mutex<PlayerState>>> {
        self.players
            .get(player_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| BetError::UnknownPlayer(player_id.to_string()))
    }

    /// Current account snapshot for a player.
    pub async fn account(&self, player_id: &str) -> BetResult<PlayerAccount> {
        let state = self.player_state(player_id)?;
        let state = state.lock().await;
        Ok(state.account.clone())
    }

    /// Add coins from an external deposit (signup bonus, purchase, refund).
    pub async fn grant_coins(&self, player_id: &str, amount: u64) -> BetResult<PlayerAccount> {
        let state = self.player_state(player_id)?;
        let mut state = state.lock().await;
        state.account.coins += amount;
        debug!(player_id, amount, coins = state.account.coins, "granted coins");
        Ok(state.account.clone())
    }

    /// Place and settle one bet as a single serialized unit.
    ///
    /// Bad guesses and wagers are rejected before any die is rolled, and
    /// affordability is judged against the balance as of this unit, not a
    /// stale read. On a commit failure the in-memory balance stays
    /// untouched and the settlement is discarded; a retry re-rolls from
    /// scratch.
    pub async fn place_bet<R: DiceRoller>(
        &self,
        player_id: &str,
        guess: u8,
        wagered: u64,
        roller: &mut R,
    ) -> BetResult<BetRecord> {
        let state = self.player_state(player_id)?;
        let mut state = state.lock().await;

        resolution::validate_bet(guess, wagered, &self.config.payout)?;
        if wagered > state.account.coins {
            return Err(BetError::InsufficientCoins {
                wagered,
                available: state.account.coins,
            });
        }

        let settlement = resolution::settle_bet(guess, wagered, &self.config.payout, roller)?;
        let created_on = Utc::now();
        let record = BetRecord {
            bet_id: Uuid::new_v4(),
            player_id: player_id.to_string(),
            settlement: settlement.clone(),
            created_on,
        };

        let mut updated = state.account.clone();
        updated.apply_settlement(&settlement, created_on);

        if let Err(e) = self.store.commit(&updated, &record).await {
            warn!(
                player_id,
                bet_id = %record.bet_id,
                error = %e,
                "discarding settlement: commit failed"
            );
            return Err(BetError::Persistence(e));
        }

        debug!(
            player_id,
            bet_id = %record.bet_id,
            guess,
            roll = settlement.roll,
            net = settlement.net,
            coins = updated.coins,
            "bet settled"
        );

        state.account = updated;
        state.history.push(record.clone());

        let mut stats = self.stats.lock().unwrap();
        stats.bet_count += 1;
        stats.total_wagered += wagered;
        stats.total_net += settlement.net;

        Ok(record)
    }

    /// The player's most recent bets, newest first.
    pub async fn recent_bets(&self, player_id: &str, limit: usize) -> BetResult<Vec<BetRecord>> {
        let state = self.player_state(player_id)?;
        let state = state.lock().await;
        Ok(state.history.iter().rev().take(limit).cloned().collect())
    }

    /// One page of bet history, newest first. Pages are 1-based.
    pub async fn history_page(&self, player_id: &str, page: usize) -> BetResult<HistoryPage> {
        let per_page = self.config.history_page_size;
        let state = self.player_state(player_id)?;
        let state = state.lock().await;

        let page = page.max(1);
        let bets = state
            .history
            .iter()
            .rev()
            .skip((page - 1) * per_page)
            .take(per_page)
            .cloned()
            .collect();

        Ok(HistoryPage {
            page,
            per_page,
            total: state.history.len(),
            bets,
        })
    }

    /// Aggregate totals across all players.
    pub fn stats(&self) -> BettingStats {
        self.stats.lock().unwrap().clone()
    }
}
