//! Session configuration: table size, dice, wild ones, gate policy, seed.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use serde_with::{serde_as, DurationMilliSeconds};

use crate::domain::rules::{DEFAULT_HISTORY_WINDOW, DEFAULT_STARTING_DICE, MIN_PLAYERS};
use crate::domain::state::{PlayerId, TableSetup};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::services::action_gate::{
    ActionGate, RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIME_BUDGET,
};

/// Everything needed to start a game.
///
/// Deserializes from partial JSON; missing fields take their defaults.
///
/// ```json
/// {"num_players": 4, "wild_ones": true, "time_budget": 2000, "seed": 7}
/// ```
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub num_players: usize,
    pub starting_dice: u32,
    pub wild_ones: bool,
    /// Per-attempt provider budget, milliseconds on the wire.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub time_budget: Duration,
    pub max_attempts: u32,
    /// Recent history events included in each player view.
    pub history_window: usize,
    /// Seat that opens round 1; seeded random when unset.
    pub opening_player: Option<PlayerId>,
    /// Game seed; OS entropy when unset.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            num_players: MIN_PLAYERS,
            starting_dice: DEFAULT_STARTING_DICE,
            wild_ones: false,
            time_budget: DEFAULT_TIME_BUDGET,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            history_window: DEFAULT_HISTORY_WINDOW,
            opening_player: None,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.num_players < MIN_PLAYERS {
            return Err(DomainError::invalid_config(format!(
                "num_players must be >= {MIN_PLAYERS}, got {}",
                self.num_players
            )));
        }
        if self.starting_dice == 0 {
            return Err(DomainError::invalid_config("starting_dice must be >= 1"));
        }
        if self.time_budget.is_zero() {
            return Err(DomainError::invalid_config("time_budget must be > 0"));
        }
        if self.max_attempts == 0 {
            return Err(DomainError::invalid_config("max_attempts must be >= 1"));
        }
        if let Some(opener) = self.opening_player {
            if opener >= self.num_players {
                return Err(DomainError::invalid_config(format!(
                    "opening_player {opener} must be < num_players ({})",
                    self.num_players
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json(value: &JsonValue) -> Result<Self, AppError> {
        let config: Self = serde_json::from_value(value.clone())
            .map_err(|e| AppError::config(format!("invalid session config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Build from `DICE_*` environment variables over the defaults.
    ///
    /// Unset variables keep their default; unparsable values are errors.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();
        if let Some(v) = parsed(&lookup, "DICE_PLAYERS")? {
            config.num_players = v;
        }
        if let Some(v) = parsed(&lookup, "DICE_STARTING_DICE")? {
            config.starting_dice = v;
        }
        if let Some(v) = parsed(&lookup, "DICE_WILD_ONES")? {
            config.wild_ones = v;
        }
        if let Some(ms) = parsed::<u64>(&lookup, "DICE_TIME_BUDGET_MS")? {
            config.time_budget = Duration::from_millis(ms);
        }
        if let Some(v) = parsed(&lookup, "DICE_MAX_ATTEMPTS")? {
            config.max_attempts = v;
        }
        if let Some(v) = parsed(&lookup, "DICE_SEED")? {
            config.seed = Some(v);
        }
        config.validate()?;
        Ok(config)
    }

    /// Resolve the table parameters, drawing a seed if none is configured.
    pub fn table_setup(&self) -> TableSetup {
        TableSetup {
            num_players: self.num_players,
            starting_dice: self.starting_dice,
            wild_ones: self.wild_ones,
            history_window: self.history_window,
            opening_player: self.opening_player,
            seed: self.seed.unwrap_or_else(rand::random),
        }
    }

    pub fn gate_policy(&self) -> ActionGate {
        ActionGate::new(self.time_budget, RetryPolicy::new(self.max_attempts))
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AppError::config(format!("{name}={raw:?} is not valid: {e}"))),
    }
}
