use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Table setup for a session. Every field has a default, so a TOML file only
/// needs the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub num_players: usize,
    /// Starting stack of every seat
    pub chips_for_each: u32,
    /// First dealer; picked at random when unset
    pub dealer_id: Option<usize>,
    /// Big blind is twice this, and also the minimum raise
    pub small_blind: u32,
    /// Keep snapshots so `step_back` works
    pub allow_step_back: bool,
    /// Seed for shuffles and the random dealer; OS entropy when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: 2,
            chips_for_each: 100,
            dealer_id: None,
            small_blind: 1,
            allow_step_back: true,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn big_blind(&self) -> u32 {
        self.small_blind.saturating_mul(2)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, GameError> {
        let cfg: GameConfig =
            toml::from_str(s).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let s = fs::read_to_string(path.as_ref()).map_err(|e| {
            GameError::InvalidConfig(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_toml_str(&s)
    }

    /// Overrides fields from `INDIAN_POKER_SEED`, `INDIAN_POKER_PLAYERS`,
    /// `INDIAN_POKER_CHIPS` and `INDIAN_POKER_DEALER`. Empty values are ignored.
    pub fn apply_env(mut self) -> Result<Self, GameError> {
        if let Some(seed) = env_value("INDIAN_POKER_SEED")? {
            self.seed = Some(seed);
        }
        if let Some(n) = env_value("INDIAN_POKER_PLAYERS")? {
            self.num_players = n;
        }
        if let Some(chips) = env_value("INDIAN_POKER_CHIPS")? {
            self.chips_for_each = chips;
        }
        if let Some(dealer) = env_value("INDIAN_POKER_DEALER")? {
            self.dealer_id = Some(dealer);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.num_players < 2 {
            return Err(GameError::InvalidConfig(
                "num_players must be >= 2".into(),
            ));
        }
        // one card per seat
        if self.num_players > 52 {
            return Err(GameError::InvalidConfig(
                "num_players must be <= 52".into(),
            ));
        }
        if self.chips_for_each == 0 {
            return Err(GameError::InvalidConfig(
                "chips_for_each must be > 0".into(),
            ));
        }
        if self.small_blind == 0 {
            return Err(GameError::InvalidConfig("small_blind must be > 0".into()));
        }
        if self.small_blind > u32::MAX / 2 {
            return Err(GameError::InvalidConfig(
                "small_blind too large for a doubled big blind".into(),
            ));
        }
        if let Some(d) = self.dealer_id {
            if d >= self.num_players {
                return Err(GameError::InvalidConfig(format!(
                    "dealer_id {} out of range for {} players",
                    d, self.num_players
                )));
            }
        }
        Ok(())
    }
}

fn env_value<T: std::str::FromStr>(key: &str) -> Result<Option<T>, GameError> {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v
            .parse()
            .map(Some)
            .map_err(|_| GameError::InvalidConfig(format!("Invalid {}: {}", key, v))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = GameConfig::from_toml_str("num_players = 3\nseed = 7\n").unwrap();
        assert_eq!(cfg.num_players, 3);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.chips_for_each, 100);
        assert_eq!(cfg.big_blind(), 2);
        assert!(cfg.allow_step_back);
    }

    #[test]
    fn rejects_single_player_and_bad_dealer() {
        assert!(matches!(
            GameConfig::from_toml_str("num_players = 1"),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("dealer_id = 2"),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn small_blind_that_cannot_double_is_rejected() {
        assert!(matches!(
            GameConfig::from_toml_str("small_blind = 2147483648"),
            Err(GameError::InvalidConfig(_))
        ));
        let cfg = GameConfig {
            small_blind: u32::MAX,
            ..GameConfig::default()
        };
        assert_eq!(cfg.big_blind(), u32::MAX);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(matches!(
            GameConfig::from_toml_str("num_players = \"two\""),
            Err(GameError::InvalidConfig(_))
        ));
    }
}
