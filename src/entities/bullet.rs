use serde::{Deserialize, Serialize};

use super::{Body, GameObject};

/// Enemies a laser round can pass through before it is spent.
pub const LASER_MAX_PENETRATION: u8 = 3;

const STANDARD_SIZE: (f32, f32) = (8.0, 16.0);
const LASER_SIZE: (f32, f32) = (6.0, 20.0);
const HEAVY_SIZE: (f32, f32) = (12.0, 24.0);
const EXPLOSIVE_SIZE: (f32, f32) = (10.0, 18.0);

const HEAVY_SPEED_FACTOR: f32 = 0.7;
const HEAVY_DAMAGE: i32 = 3;
const LASER_DAMAGE: i32 = 1;
const EXPLOSIVE_DAMAGE: i32 = 2;
const EXPLOSION_RADIUS: f32 = 60.0;

/// The non-power-up weapon a level fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    Standard,
    Heavy,
    Explosive,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BulletKind {
    Standard,
    /// Pierces; `hits` counts enemies already passed through.
    Laser { hits: u8 },
    Heavy,
    /// Splashes every enemy within `radius` of the impact.
    Explosive { radius: f32 },
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub(crate) body: Body,
    kind: BulletKind,
    /// Upward speed in units per second.
    speed: f32,
    damage: i32,
}

impl Bullet {
    /// `x` is the horizontal centre of the shot, `y` its top edge.
    pub fn standard(x: f32, y: f32, speed: f32, damage: i32) -> Self {
        Self::build(BulletKind::Standard, STANDARD_SIZE, x, y, speed, damage)
    }

    pub fn laser(x: f32, y: f32, speed: f32) -> Self {
        Self::build(BulletKind::Laser { hits: 0 }, LASER_SIZE, x, y, speed, LASER_DAMAGE)
    }

    pub fn heavy(x: f32, y: f32, speed: f32) -> Self {
        Self::build(
            BulletKind::Heavy,
            HEAVY_SIZE,
            x,
            y,
            speed * HEAVY_SPEED_FACTOR,
            HEAVY_DAMAGE,
        )
    }

    pub fn explosive(x: f32, y: f32, speed: f32) -> Self {
        Self::build(
            BulletKind::Explosive {
                radius: EXPLOSION_RADIUS,
            },
            EXPLOSIVE_SIZE,
            x,
            y,
            speed,
            EXPLOSIVE_DAMAGE,
        )
    }

    /// Level weapon; `damage` only applies to the standard round, the special
    /// rounds carry their own.
    pub fn for_weapon(weapon: Weapon, x: f32, y: f32, speed: f32, damage: i32) -> Self {
        match weapon {
            Weapon::Standard => Self::standard(x, y, speed, damage),
            Weapon::Heavy => Self::heavy(x, y, speed),
            Weapon::Explosive => Self::explosive(x, y, speed),
        }
    }

    fn build(kind: BulletKind, size: (f32, f32), x: f32, y: f32, speed: f32, damage: i32) -> Self {
        let (w, h) = size;
        Self {
            body: Body::new(x - w / 2.0, y, w, h),
            kind,
            speed,
            damage,
        }
    }

    pub fn update(&mut self, dt_ms: f32) {
        let rect = &mut self.body.rect;
        rect.y -= self.speed * dt_ms / 1000.0;
        if rect.y < -rect.h {
            self.body.active = false;
        }
    }

    /// Record a hit on an enemy. Non-piercing rounds are spent immediately;
    /// a laser is spent after its last penetration.
    pub fn register_hit(&mut self) {
        let spent = match &mut self.kind {
            BulletKind::Laser { hits } => {
                *hits += 1;
                *hits >= LASER_MAX_PENETRATION
            }
            _ => true,
        };
        if spent {
            self.deactivate();
        }
    }

    pub fn is_piercing(&self) -> bool {
        matches!(self.kind, BulletKind::Laser { .. })
    }

    pub fn splash_radius(&self) -> Option<f32> {
        match self.kind {
            BulletKind::Explosive { radius } => Some(radius),
            _ => None,
        }
    }

    pub fn kind(&self) -> BulletKind {
        self.kind
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn set_damage(&mut self, damage: i32) {
        self.damage = damage;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}
