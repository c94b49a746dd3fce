//! Конфигурация хоста: правила стола + параметры актора.
//!
//! Источники:
//! - переменные окружения `BLACKJACK_*` (каждая с дефолтом);
//! - JSON-строка (например, файл конфига, прочитанный бинарником).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::table::RulesConfig;
use crate::domain::Chips;

/// Пауза перед авто-рестартом раунда.
pub const DEFAULT_RESTART_DELAY_MS: u64 = 2_000;
/// Ёмкость mpsc-очереди актора.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Некорректный JSON конфигурации: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Некорректные правила стола: {0}")]
    InvalidRules(String),

    #[error("Ёмкость очереди должна быть больше нуля")]
    ZeroMailbox,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    pub rules: RulesConfig,
    pub restart_delay_ms: u64,
    pub mailbox_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            restart_delay_ms: DEFAULT_RESTART_DELAY_MS,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = RulesConfig::default();
        let rules = RulesConfig {
            starting_hp: read_u32("BLACKJACK_STARTING_HP", defaults.starting_hp),
            win_reward: Chips(read_u64("BLACKJACK_WIN_REWARD", defaults.win_reward.0)),
            natural_bonus: read_u32("BLACKJACK_NATURAL_BONUS", defaults.natural_bonus),
            upgrade_cost: Chips(read_u64("BLACKJACK_UPGRADE_COST", defaults.upgrade_cost.0)),
            upgrade_hp_bonus: read_u32("BLACKJACK_UPGRADE_HP_BONUS", defaults.upgrade_hp_bonus),
            heal_on_upgrade: read_bool("BLACKJACK_HEAL_ON_UPGRADE", defaults.heal_on_upgrade),
            power_card_cost: Chips(read_u64(
                "BLACKJACK_POWER_CARD_COST",
                defaults.power_card_cost.0,
            )),
            max_participants: read_usize("BLACKJACK_MAX_PARTICIPANTS", defaults.max_participants),
            bust_ends_round: read_bool("BLACKJACK_BUST_ENDS_ROUND", defaults.bust_ends_round),
        };

        let config = Self {
            rules,
            restart_delay_ms: read_u64("BLACKJACK_RESTART_DELAY_MS", DEFAULT_RESTART_DELAY_MS),
            mailbox_capacity: read_usize("BLACKJACK_MAILBOX_CAPACITY", DEFAULT_MAILBOX_CAPACITY),
        };
        config.validate()?;
        Ok(config)
    }

    /// Отсутствующие поля берутся из `Default`.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate().map_err(ConfigError::InvalidRules)?;
        if self.mailbox_capacity == 0 {
            return Err(ConfigError::ZeroMailbox);
        }
        Ok(())
    }

    pub fn restart_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.restart_delay_ms)
    }
}

fn read_u64(key: &str, fallback: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(fallback)
}

fn read_u32(key: &str, fallback: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .unwrap_or(fallback)
}

fn read_usize(key: &str, fallback: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or(fallback)
}

fn read_bool(key: &str, fallback: bool) -> bool {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(fallback)
}
