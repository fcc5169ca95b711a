/// Level tuning table and the transition state machine.
///
/// `Active(n) → Transitioning(0..1) → Active(n + 1)`, ending in
/// `MaxLevelReached` on the last level. The manager owns the per-level
/// configuration; everything else reads tunables from it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::entities::{EnemyKind, Player, PlayerSnapshot, Weapon};
use crate::Millis;

pub const MAX_LEVEL: u32 = 3;
pub const DEFAULT_TRANSITION_MS: Millis = 2000;

// ── Level table ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub level: u32,
    pub name: String,
    pub spawn_interval_ms: Millis,
    pub enemy_speed: f32,
    pub enemy_health: i32,
    pub max_enemies: usize,
    /// Chance in `[0, 1]` that a kill drops a power-up.
    pub power_up_drop_chance: f64,
    pub score_to_next_level: u32,
    /// Reaching this score wins outright, whatever the level.
    pub win_score: u32,
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    /// Names understood by [`crate::entities::PowerUpKind::from_name`].
    pub power_ups: Vec<String>,
    pub weapon: Weapon,
    /// Kinds the regular spawner picks from; empty means the level default.
    pub enemy_roster: Vec<EnemyKind>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        LevelConfig::builtin(1)
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl LevelConfig {
    /// Shipped tuning for levels 1 to 3; anything else is level 1.
    pub fn builtin(level: u32) -> Self {
        match level {
            2 => LevelConfig {
                level: 2,
                name: "Desert Ruins".into(),
                spawn_interval_ms: 1500,
                enemy_speed: 200.0,
                enemy_health: 2,
                max_enemies: 5,
                power_up_drop_chance: 0.25,
                score_to_next_level: 300,
                win_score: 1200,
                bullet_speed: 800.0,
                bullet_damage: 2,
                power_ups: names(&["health", "speed", "shield", "multishot", "rapidfire"]),
                weapon: Weapon::Standard,
                enemy_roster: vec![EnemyKind::ZigZag],
            },
            3 => LevelConfig {
                level: 3,
                name: "Ice Cavern".into(),
                spawn_interval_ms: 1000,
                enemy_speed: 250.0,
                enemy_health: 3,
                max_enemies: 7,
                power_up_drop_chance: 0.2,
                score_to_next_level: 500,
                win_score: 2000,
                bullet_speed: 1000.0,
                bullet_damage: 3,
                power_ups: names(&[
                    "health",
                    "speed",
                    "shield",
                    "multishot",
                    "rapidfire",
                    "laser",
                    "freeze",
                ]),
                weapon: Weapon::Standard,
                enemy_roster: vec![EnemyKind::Basic],
            },
            _ => LevelConfig {
                level: 1,
                name: "Forest Temple".into(),
                spawn_interval_ms: 2000,
                enemy_speed: 150.0,
                enemy_health: 1,
                max_enemies: 3,
                power_up_drop_chance: 0.3,
                score_to_next_level: 150,
                win_score: 750,
                bullet_speed: 600.0,
                bullet_damage: 1,
                power_ups: names(&["health", "speed", "shield"]),
                weapon: Weapon::Standard,
                enemy_roster: vec![EnemyKind::Basic],
            },
        }
    }

    pub fn default_table() -> Vec<LevelConfig> {
        (1..=MAX_LEVEL).map(LevelConfig::builtin).collect()
    }
}

// ── State machine ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LevelStatus {
    Active(u32),
    Transitioning(f32),
    MaxLevelReached,
}

#[derive(Clone, Debug)]
struct Transition {
    progress: f32,
    next: LevelConfig,
}

#[derive(Clone, Debug)]
pub struct LevelManager {
    table: Vec<LevelConfig>,
    current_level: u32,
    current: LevelConfig,
    transition: Option<Transition>,
    transition_ms: Millis,
    just_completed: bool,
    snapshot: Option<PlayerSnapshot>,
}

impl Default for LevelManager {
    fn default() -> Self {
        LevelManager::new(LevelConfig::default_table(), DEFAULT_TRANSITION_MS)
    }
}

impl LevelManager {
    pub fn new(table: Vec<LevelConfig>, transition_ms: Millis) -> Self {
        let mut manager = LevelManager {
            table,
            current_level: 1,
            current: LevelConfig::builtin(1),
            transition: None,
            transition_ms: transition_ms.max(1),
            just_completed: false,
            snapshot: None,
        };
        manager.initialize_level(1);
        manager
    }

    /// Table entry for `level`, falling back to level 1 and then to the
    /// shipped tuning.
    pub fn config_for(&self, level: u32) -> LevelConfig {
        self.table
            .iter()
            .find(|c| c.level == level)
            .or_else(|| self.table.iter().find(|c| c.level == 1))
            .cloned()
            .unwrap_or_else(|| LevelConfig::builtin(level))
    }

    /// Load `level`'s tunables as the current configuration.
    pub fn initialize_level(&mut self, level: u32) {
        let level = if (1..=MAX_LEVEL).contains(&level) {
            level
        } else {
            warn!(level, "unknown level, using level 1");
            1
        };
        self.current_level = level;
        self.current = self.config_for(level);
        info!(
            level,
            name = %self.current.name,
            spawn_interval_ms = self.current.spawn_interval_ms,
            enemy_speed = self.current.enemy_speed,
            enemy_health = self.current.enemy_health,
            max_enemies = self.current.max_enemies,
            "level configured"
        );
    }

    pub fn should_advance(&self, score: u32) -> bool {
        self.transition.is_none() && score >= self.current.score_to_next_level
    }

    /// Snapshot the player and begin the timed transition. Returns `false`
    /// (and changes nothing) on the last level or mid-transition.
    pub fn start_transition(&mut self, player: &Player) -> bool {
        if self.current_level >= MAX_LEVEL {
            debug!(level = self.current_level, "already at max level, not advancing");
            return false;
        }
        if self.transition.is_some() {
            return false;
        }
        let next_level = self.current_level + 1;
        self.snapshot = Some(player.snapshot());
        self.transition = Some(Transition {
            progress: 0.0,
            next: self.config_for(next_level),
        });
        info!(from = self.current_level, to = next_level, "level transition started");
        true
    }

    pub fn update_transition(&mut self, dt_ms: f32) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };
        transition.progress += dt_ms / self.transition_ms as f32;
        if transition.progress < 1.0 {
            return;
        }
        if let Some(done) = self.transition.take() {
            self.current_level += 1;
            self.current = done.next;
            self.just_completed = true;
            info!(level = self.current_level, name = %self.current.name, "level transition complete");
        }
    }

    /// True exactly once after each completed transition.
    pub fn consume_transition_just_completed(&mut self) -> bool {
        std::mem::take(&mut self.just_completed)
    }

    /// Reapply the health/speed captured by [`start_transition`]. The caller
    /// repositions the player afterwards.
    ///
    /// [`start_transition`]: LevelManager::start_transition
    pub fn restore_player_state(&mut self, player: &mut Player) {
        if let Some(snapshot) = self.snapshot.take() {
            player.restore(&snapshot);
        }
    }

    pub fn reset_to_level1(&mut self) {
        self.transition = None;
        self.just_completed = false;
        self.snapshot = None;
        self.initialize_level(1);
    }

    pub fn status(&self) -> LevelStatus {
        match &self.transition {
            Some(t) => LevelStatus::Transitioning(t.progress.min(1.0)),
            None if self.current_level >= MAX_LEVEL => LevelStatus::MaxLevelReached,
            None => LevelStatus::Active(self.current_level),
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition_progress(&self) -> f32 {
        self.transition.as_ref().map_or(0.0, |t| t.progress.min(1.0))
    }

    /// Level being loaded while transitioning.
    pub fn next_level(&self) -> Option<u32> {
        self.transition.as_ref().map(|t| t.next.level)
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn config(&self) -> &LevelConfig {
        &self.current
    }

    pub fn is_max_level(&self) -> bool {
        self.current_level >= MAX_LEVEL
    }

    /// `(speed, damage)` of the level's standard round.
    pub fn bullet_config(&self) -> (f32, i32) {
        (self.current.bullet_speed, self.current.bullet_damage)
    }

    pub fn snapshot(&self) -> Option<PlayerSnapshot> {
        self.snapshot
    }
}
