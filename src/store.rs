//! Durable storage seam for settled bets.
//!
//! A commit persists the updated account and the bet record as one unit.
//! The ledger only applies a settlement in memory after the backend has
//! acknowledged that pair, so a storage failure leaves the balance exactly
//! as it was.

use crate::bet::types::{BetRecord, PlayerAccount};
use crate::errors::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;

/// One durable commit: the account snapshot after the bet and the record
/// that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommitEntry {
    pub account: PlayerAccount,
    pub record: BetRecord,
}

/// Storage interface for settled bets.
#[async_trait]
pub trait BetStore: Send + Sync {
    /// Durably persist the updated account and its bet record as one unit:
    /// either both land or neither does.
    async fn commit(&self, account: &PlayerAccount, record: &BetRecord)
        -> Result<(), StoreError>;
}

/// In-memory backend keeping every commit in order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    commits: Mutex<Vec<CommitEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything committed so far, oldest first.
    pub fn commits(&self) -> Vec<CommitEntry> {
        self.commits.lock().unwrap().clone()
    }
}

#[async_trait]
impl BetStore for MemoryStore {
    async fn commit(
        &self,
        account: &PlayerAccount,
        record: &BetRecord,
    ) -> Result<(), StoreError> {
        let mut commits = self.commits.lock().unwrap();
        commits.push(CommitEntry {
            account: account.clone(),
            record: record.clone(),
        });
        Ok(())
    }
}

/// Append-only JSONL journal.
///
/// Each line is a complete [`CommitEntry`], so the account update and the
/// bet record land or fail together.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes appends so interleaved writers cannot shear a line.
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Replay the journal, oldest first. A missing file is an empty journal.
    pub async fn replay(&self) -> Result<Vec<CommitEntry>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::ReadFailed(e.to_string())),
        };

        raw.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| StoreError::CorruptedData(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl BetStore for JsonFileStore {
    async fn commit(
        &self,
        account: &PlayerAccount,
        record: &BetRecord,
    ) -> Result<(), StoreError> {
        let entry = CommitEntry {
            account: account.clone(),
            record: record.clone(),
        };
        let mut line =
            serde_json::to_string(&entry).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bet::types::Settlement;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_commit(player_id: &str, coins: u64, net: i64) -> (PlayerAccount, BetRecord) {
        let account = PlayerAccount {
            player_id: player_id.to_string(),
            coins,
            last_bet_on: Some(Utc::now()),
        };
        let record = BetRecord {
            bet_id: Uuid::new_v4(),
            player_id: player_id.to_string(),
            settlement: Settlement {
                guess: 7,
                die_1: 3,
                die_2: 4,
                roll: 7,
                wagered: 50,
                payout: 6.0,
                net,
                is_winner: net >= 0,
            },
            created_on: Utc::now(),
        };
        (account, record)
    }

    #[tokio::test]
    async fn test_memory_store_keeps_commit_order() {
        let store = MemoryStore::new();

        let (account_1, record_1) = sample_commit("player-1", 400, 300);
        let (account_2, record_2) = sample_commit("player-1", 390, -10);
        store.commit(&account_1, &record_1).await.unwrap();
        store.commit(&account_2, &record_2).await.unwrap();

        let commits = store.commits();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].record.bet_id, record_1.bet_id);
        assert_eq!(commits[1].account.coins, 390);
    }

    #[tokio::test]
    async fn test_json_file_store_replay_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bets.jsonl");
        let store = JsonFileStore::new(&path);

        let (account_1, record_1) = sample_commit("player-1", 400, 300);
        let (account_2, record_2) = sample_commit("player-2", 90, -10);
        store.commit(&account_1, &record_1).await.unwrap();
        store.commit(&account_2, &record_2).await.unwrap();

        let replayed = store.replay().await.unwrap();
        assert_eq!(replayed.len(), 2);
        assert_eq!(replayed[0].record, record_1);
        assert_eq!(replayed[0].account, account_1);
        assert_eq!(replayed[1].record, record_2);
    }

    #[tokio::test]
    async fn test_replay_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("never-written.jsonl"));

        assert!(store.replay().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replay_rejects_corrupted_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bets.jsonl");
        let store = JsonFileStore::new(&path);

        let (account, record) = sample_commit("player-1", 400, 300);
        store.commit(&account, &record).await.unwrap();
        tokio::fs::write(&path, "not json\n").await.unwrap();

        assert!(matches!(
            store.replay().await,
            Err(StoreError::CorruptedData(_))
        ));
    }
}
