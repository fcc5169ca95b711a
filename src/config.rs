/// Game tunables, loadable from a RON file.
///
/// Every field has a default matching the shipped game, so a config file
/// only needs to name what it changes.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::level::LevelConfig;
use crate::Millis;

// ── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "parse error: {}", e),
            ConfigError::Invalid(e) => write!(f, "invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

// ── Sections ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub shot_interval_ms: Millis,
    pub rapid_fire_interval_ms: Millis,
    pub invincibility_ms: Millis,
    pub kill_explosion_ms: Millis,
    pub splash_explosion_ms: Millis,
    /// Grace period a dead enemy spends exploding before removal.
    pub enemy_explode_delay_ms: Millis,
    pub transition_ms: Millis,
    pub boss_minion_cooldown_ms: Millis,
    /// Deltas above this are treated as a stall and replaced by `nominal_step_ms`.
    pub max_frame_delta_ms: f32,
    pub nominal_step_ms: f32,
    pub target_frame_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            shot_interval_ms: 250,
            rapid_fire_interval_ms: 125,
            invincibility_ms: 800,
            kill_explosion_ms: 500,
            splash_explosion_ms: 300,
            enemy_explode_delay_ms: 400,
            transition_ms: 2000,
            boss_minion_cooldown_ms: 1200,
            max_frame_delta_ms: 250.0,
            nominal_step_ms: 16.0,
            target_frame_ms: 16,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub max_health: i32,
    pub follow_speed: f32,
    /// Spawn offset from the bottom edge.
    pub spawn_bottom_margin: f32,
    pub heal_amount: i32,
    /// Horizontal offset of the side shots under Multi-Shot.
    pub multishot_offset: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            width: 100.0,
            height: 100.0,
            max_health: 3,
            follow_speed: 25.0,
            spawn_bottom_margin: 200.0,
            heal_amount: 1,
            multishot_offset: 30.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub health_multiplier: i32,
    pub min_health: i32,
    /// Minions get `max(1, level health - offset)`.
    pub minion_health_offset: i32,
    pub minion_speed_bonus: f32,
    pub near_top_speed_bonus: f32,
    /// Used when no enemy sprite size is known.
    pub fallback_size: (f32, f32),
    /// Boss size as a multiple of the enemy sprite.
    pub sprite_scale: f32,
    /// Extra room over `max_enemies` for near-top minions on the boss level.
    pub extra_minions: usize,
}

impl Default for BossConfig {
    fn default() -> Self {
        BossConfig {
            health_multiplier: 10,
            min_health: 10,
            minion_health_offset: 1,
            minion_speed_bonus: 40.0,
            near_top_speed_bonus: 30.0,
            fallback_size: (200.0, 200.0),
            sprite_scale: 3.0,
            extra_minions: 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    pub base_duration_ms: Millis,
    pub energy_shield_factor: u64,
    pub force_field_factor: u64,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        PowerUpConfig {
            base_duration_ms: 5000,
            energy_shield_factor: 2,
            force_field_factor: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub enemy_soft_cap: usize,
    pub power_up_soft_cap: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        LimitsConfig {
            enemy_soft_cap: 15,
            power_up_soft_cap: 8,
        }
    }
}

// ── Top level ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub timing: TimingConfig,
    pub player: PlayerConfig,
    pub boss: BossConfig,
    pub power_ups: PowerUpConfig,
    pub limits: LimitsConfig,
    /// Corner-touch debug shortcuts.
    pub cheats_enabled: bool,
    pub levels: Vec<LevelConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_width: 1080.0,
            screen_height: 1920.0,
            timing: TimingConfig::default(),
            player: PlayerConfig::default(),
            boss: BossConfig::default(),
            power_ups: PowerUpConfig::default(),
            limits: LimitsConfig::default(),
            cheats_enabled: false,
            levels: LevelConfig::default_table(),
        }
    }
}

impl GameConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .indentor("  ".to_string());
        ron::ser::to_string_pretty(self, pretty).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config = GameConfig::from_ron_str(&text)?;
        info!(path = %path.display(), levels = config.levels.len(), "config loaded");
        Ok(config)
    }

    /// A missing file is not an error; a broken one is logged and replaced
    /// by the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return GameConfig::default();
        }
        match GameConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "bad config, using defaults");
                GameConfig::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.levels.is_empty() {
            return Err(ConfigError::Invalid("level table is empty".into()));
        }
        for level in &self.levels {
            if !(0.0..=1.0).contains(&level.power_up_drop_chance) {
                return Err(ConfigError::Invalid(format!(
                    "level {}: drop chance {} outside [0, 1]",
                    level.level, level.power_up_drop_chance
                )));
            }
        }
        Ok(())
    }
}
