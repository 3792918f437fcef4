//! Engine configuration with validation and defaults.
//!
//! The payout table is process configuration, never user input. On disk it
//! is a TOML table keyed by guessed sum ("2" through "12"); construction
//! rejects partial or non-positive tables before any bet can be resolved.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Smallest guessable two-die sum.
pub const MIN_GUESS: u8 = 2;
/// Largest guessable two-die sum.
pub const MAX_GUESS: u8 = 12;

/// Payout multipliers for every guessable dice sum.
///
/// The reference table is inversely proportional to the true probability of
/// each sum, i.e. a zero-edge table: 2 and 12 pay 36x (1-in-36 odds), 7 pays
/// 6x (6-in-36 odds). That symmetry is a design property, not a requirement
/// on custom tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct PayoutTable {
    multipliers: [f64; 11],
}

impl PayoutTable {
    /// Build a table from a string-keyed map ("2" through "12").
    ///
    /// Every sum must be present and every multiplier positive.
    pub fn from_map(map: &BTreeMap<String, f64>) -> Result<Self, ConfigError> {
        let mut multipliers = [0.0f64; 11];
        let mut seen = [false; 11];

        for (key, &multiplier) in map {
            let sum: u8 = key
                .parse()
                .map_err(|_| ConfigError::InvalidSum(key.clone()))?;
            if !(MIN_GUESS..=MAX_GUESS).contains(&sum) {
                return Err(ConfigError::InvalidSum(key.clone()));
            }
            if multiplier <= 0.0 {
                return Err(ConfigError::NonPositiveMultiplier { sum, multiplier });
            }
            multipliers[(sum - MIN_GUESS) as usize] = multiplier;
            seen[(sum - MIN_GUESS) as usize] = true;
        }

        if let Some(missing) = seen.iter().position(|present| !present) {
            return Err(ConfigError::MissingSum(missing as u8 + MIN_GUESS));
        }

        Ok(Self { multipliers })
    }

    /// Multiplier for a guessed sum, or None when the guess is out of range.
    pub fn multiplier(&self, guess: u8) -> Option<f64> {
        if (MIN_GUESS..=MAX_GUESS).contains(&guess) {
            Some(self.multipliers[(guess - MIN_GUESS) as usize])
        } else {
            None
        }
    }
}

impl Default for PayoutTable {
    fn default() -> Self {
        Self {
            multipliers: [36.0, 18.0, 12.0, 9.0, 7.2, 6.0, 7.2, 9.0, 12.0, 18.0, 36.0],
        }
    }
}

impl TryFrom<BTreeMap<String, f64>> for PayoutTable {
    type Error = ConfigError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_map(&map)
    }
}

impl From<PayoutTable> for BTreeMap<String, f64> {
    fn from(table: PayoutTable) -> Self {
        (MIN_GUESS..=MAX_GUESS)
            .map(|sum| {
                (
                    sum.to_string(),
                    table.multipliers[(sum - MIN_GUESS) as usize],
                )
            })
            .collect()
    }
}

/// Ledger and engine configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Multiplier applied to the wager on a win, keyed by guessed sum.
    pub payout: PayoutTable,
    /// Coins granted to a newly created player.
    pub starting_coins: u64,
    /// Bets per page when reading history.
    pub history_page_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            payout: PayoutTable::default(),
            starting_coins: 100,
            history_page_size: 50,
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        let config: Self =
            toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for logical consistency.
    ///
    /// The payout table validated itself during deserialization; this covers
    /// the remaining fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_page_size == 0 {
            return Err(ConfigError::InvalidValue(
                "history_page_size must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_covers_every_sum() {
        let table = PayoutTable::default();
        for guess in MIN_GUESS..=MAX_GUESS {
            assert!(table.multiplier(guess).expect("entry for every sum") > 0.0);
        }
        assert_eq!(table.multiplier(1), None);
        assert_eq!(table.multiplier(13), None);
    }

    #[test]
    fn test_default_table_is_symmetric() {
        // table[g] == table[14 - g]: complementary sums share true odds.
        let table = PayoutTable::default();
        for guess in MIN_GUESS..=MAX_GUESS {
            assert_eq!(table.multiplier(guess), table.multiplier(14 - guess));
        }
    }

    #[test]
    fn test_from_map_rejects_missing_sum() {
        let mut map: BTreeMap<String, f64> = PayoutTable::default().into();
        map.remove("7");

        match PayoutTable::from_map(&map) {
            Err(ConfigError::MissingSum(7)) => {}
            other => panic!("Expected MissingSum(7), got {:?}", other),
        }
    }

    #[test]
    fn test_from_map_rejects_out_of_range_key() {
        let mut map: BTreeMap<String, f64> = PayoutTable::default().into();
        map.insert("13".to_string(), 50.0);

        assert!(matches!(
            PayoutTable::from_map(&map),
            Err(ConfigError::InvalidSum(_))
        ));
    }

    #[test]
    fn test_from_map_rejects_non_positive_multiplier() {
        let mut map: BTreeMap<String, f64> = PayoutTable::default().into();
        map.insert("7".to_string(), 0.0);

        assert!(matches!(
            PayoutTable::from_map(&map),
            Err(ConfigError::NonPositiveMultiplier { sum: 7, .. })
        ));
    }

    #[test]
    fn test_config_parses_from_toml() {
        let raw = r#"
            starting_coins = 250
            history_page_size = 25

            [payout]
            "2" = 36.0
            "3" = 18.0
            "4" = 12.0
            "5" = 9.0
            "6" = 7.2
            "7" = 6.0
            "8" = 7.2
            "9" = 9.0
            "10" = 12.0
            "11" = 18.0
            "12" = 36.0
        "#;

        let config: EngineConfig = toml::from_str(raw).expect("config should parse");
        assert!(config.validate().is_ok());
        assert_eq!(config.starting_coins, 250);
        assert_eq!(config.history_page_size, 25);
        assert_eq!(config.payout, PayoutTable::default());
    }

    #[test]
    fn test_toml_with_partial_table_fails() {
        let raw = r#"
            [payout]
            "7" = 6.0
        "#;

        assert!(toml::from_str::<EngineConfig>(raw).is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_page_size_fails_validation() {
        let mut config = EngineConfig::default();
        config.history_page_size = 0;
        assert!(config.validate().is_err());
    }
}
