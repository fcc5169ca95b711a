/// Power-up drops and the falling power-up list.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::config::PowerUpConfig;
use crate::entities::{GameObject, PowerUp, PowerUpKind, POWER_UP_SIZE};
use crate::level::LevelConfig;
use crate::Millis;

#[derive(Clone, Debug)]
pub struct PowerUpManager {
    power_ups: Vec<PowerUp>,
    drop_chance: f64,
    allowed: Vec<PowerUpKind>,
    durations: PowerUpConfig,
    soft_cap: usize,
}

impl PowerUpManager {
    pub fn new(durations: PowerUpConfig, soft_cap: usize) -> Self {
        let mut manager = PowerUpManager {
            power_ups: Vec::new(),
            drop_chance: 0.0,
            allowed: Vec::new(),
            durations,
            soft_cap,
        };
        manager.configure(&LevelConfig::builtin(1));
        manager
    }

    /// Take the level's drop chance and allowed kinds, mapping names.
    pub fn configure(&mut self, level: &LevelConfig) {
        self.drop_chance = level.power_up_drop_chance.clamp(0.0, 1.0);
        self.allowed = level
            .power_ups
            .iter()
            .map(|name| PowerUpKind::from_name(name))
            .collect();
    }

    /// Effect length for `kind` under the configured base duration.
    pub fn duration_for(&self, kind: PowerUpKind) -> Millis {
        let base = self.durations.base_duration_ms;
        match kind {
            PowerUpKind::Health => 0,
            PowerUpKind::EnergyShield => base * self.durations.energy_shield_factor,
            PowerUpKind::ForceField => base * self.durations.force_field_factor,
            _ => base,
        }
    }

    /// Roll for a drop centred on `(x, y)`. Returns the kind that dropped.
    pub fn try_spawn(&mut self, x: f32, y: f32, rng: &mut impl Rng) -> Option<PowerUpKind> {
        if self.power_ups.len() >= self.soft_cap {
            return None;
        }
        if !rng.gen_bool(self.drop_chance) {
            return None;
        }
        let kind = *self.allowed.choose(rng)?;
        self.spawn(kind, x, y);
        debug!(?kind, x, y, "power-up dropped");
        Some(kind)
    }

    /// Place a power-up without rolling; `(x, y)` is its centre.
    pub fn spawn(&mut self, kind: PowerUpKind, x: f32, y: f32) {
        let half = POWER_UP_SIZE / 2.0;
        let duration = self.duration_for(kind);
        self.power_ups.push(PowerUp::new(kind, x - half, y - half, duration));
    }

    /// Debug helper: one of every kind in a row starting at `(x, y)`.
    pub fn spawn_all_for_testing(&mut self, x: f32, y: f32) {
        for (i, kind) in PowerUpKind::ALL.into_iter().enumerate() {
            let cx = x + i as f32 * (POWER_UP_SIZE + 20.0);
            self.spawn(kind, cx, y);
        }
    }

    pub fn update(&mut self, dt_ms: f32, screen_h: f32) {
        for power_up in &mut self.power_ups {
            power_up.update(dt_ms, screen_h);
        }
        self.power_ups.retain(|p| p.is_active());
    }

    /// Drop collected or fallen power-ups without moving the rest.
    pub fn prune(&mut self) {
        self.power_ups.retain(|p| p.is_active());
    }

    pub fn clear(&mut self) {
        self.power_ups.clear();
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    pub fn power_ups_mut(&mut self) -> &mut [PowerUp] {
        &mut self.power_ups
    }

    pub fn allowed(&self) -> &[PowerUpKind] {
        &self.allowed
    }

    pub fn drop_chance(&self) -> f64 {
        self.drop_chance
    }

    pub fn len(&self) -> usize {
        self.power_ups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.power_ups.is_empty()
    }
}
