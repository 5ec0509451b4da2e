//! # Runtime Settings
//!
//! Tunables for a session, loadable from a JSON file. Every field has a
//! default matching the constants in [`crate::config`], so a config file only
//! needs to name what it changes.

use crate::config;
use crate::generation::GenerationConfig;
use crate::{WarrenError, WarrenResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of one respawned wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub enemy_count: u32,
    pub enemy_hp: i32,
    pub enemy_attack: i32,
    pub potion_count: u32,
    pub potion_value: i32,
    pub sword_count: u32,
    pub sword_value: i32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            enemy_count: config::WAVE_ENEMIES,
            enemy_hp: config::ENEMY_HP,
            enemy_attack: config::ENEMY_ATTACK,
            potion_count: config::WAVE_POTIONS,
            potion_value: config::POTION_VALUE,
            sword_count: config::WAVE_SWORDS,
            sword_value: config::SWORD_VALUE,
        }
    }
}

/// Enemy decision tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Probability that a non-adjacent enemy wanders instead of chasing
    pub random_step_chance: f64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            random_step_chance: config::AI_RANDOM_STEP_CHANCE,
        }
    }
}

/// Everything a session can be tuned with.
///
/// # Examples
///
/// ```
/// use warren::GameConfig;
///
/// let config: GameConfig =
///     serde_json::from_str(r#"{ "generation": { "width": 48 } }"#).unwrap();
/// assert_eq!(config.generation.width, 48);
/// assert_eq!(config.generation.height, warren::config::DEFAULT_HEIGHT);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub generation: GenerationConfig,
    pub wave: WaveConfig,
    pub ai: AiConfig,
}

impl GameConfig {
    /// Loads and validates a config from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> WarrenResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("Loaded game config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Writes the config to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> WarrenResult<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Checks ranges and probabilities.
    pub fn validate(&self) -> WarrenResult<()> {
        if !(0.0..=1.0).contains(&self.ai.random_step_chance) {
            return Err(WarrenError::InvalidConfig(format!(
                "random_step_chance must be within [0, 1], got {}",
                self.ai.random_step_chance
            )));
        }
        if self.wave.enemy_hp <= 0 {
            return Err(WarrenError::InvalidConfig(
                "enemy_hp must be positive".to_string(),
            ));
        }
        self.generation.validate()
    }
}
