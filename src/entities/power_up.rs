use serde::{Deserialize, Serialize};

use super::Body;
use crate::Millis;

pub const POWER_UP_SIZE: f32 = 40.0;
/// Fall speed in units per second.
pub const POWER_UP_FALL_SPEED: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Health,
    Shield,
    RapidFire,
    MultiShot,
    LaserBeam,
    EnergyShield,
    ForceField,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 7] = [
        PowerUpKind::Health,
        PowerUpKind::Shield,
        PowerUpKind::RapidFire,
        PowerUpKind::MultiShot,
        PowerUpKind::LaserBeam,
        PowerUpKind::EnergyShield,
        PowerUpKind::ForceField,
    ];

    /// Map a level-table name to a concrete kind. Unrecognised names become
    /// a plain shield.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "health" => PowerUpKind::Health,
            "speed" | "rapidfire" => PowerUpKind::RapidFire,
            "shield" => PowerUpKind::Shield,
            "multishot" => PowerUpKind::MultiShot,
            "laser" => PowerUpKind::LaserBeam,
            "freeze" => PowerUpKind::ForceField,
            _ => PowerUpKind::Shield,
        }
    }

    /// Health is applied on pickup; everything else is a timed effect.
    pub fn is_instant(self) -> bool {
        self == PowerUpKind::Health
    }

    /// Effects that soak player damage while active.
    pub fn is_shield(self) -> bool {
        matches!(
            self,
            PowerUpKind::Shield | PowerUpKind::EnergyShield | PowerUpKind::ForceField
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Health => "Health",
            PowerUpKind::Shield => "Shield",
            PowerUpKind::RapidFire => "Rapid Fire",
            PowerUpKind::MultiShot => "Multi-Shot",
            PowerUpKind::LaserBeam => "Laser Beam",
            PowerUpKind::EnergyShield => "Energy Shield",
            PowerUpKind::ForceField => "Force Field",
        }
    }
}

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub(crate) body: Body,
    kind: PowerUpKind,
    duration_ms: Millis,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, x: f32, y: f32, duration_ms: Millis) -> Self {
        Self {
            body: Body::new(x, y, POWER_UP_SIZE, POWER_UP_SIZE),
            kind,
            duration_ms: if kind.is_instant() { 0 } else { duration_ms },
        }
    }

    pub fn update(&mut self, dt_ms: f32, screen_h: f32) {
        let rect = &mut self.body.rect;
        rect.y += POWER_UP_FALL_SPEED * dt_ms / 1000.0;
        if rect.y > screen_h {
            self.body.active = false;
        }
    }

    pub fn kind(&self) -> PowerUpKind {
        self.kind
    }

    /// Effect length in ms, 0 for instant kinds.
    pub fn duration_ms(&self) -> Millis {
        self.duration_ms
    }
}
