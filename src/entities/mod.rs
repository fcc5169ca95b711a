/// All game entity types.
///
/// Each entity embeds a `Body` (rect + active flag) and owns its own update
/// rule. Variants are tagged enums and every movement rule is a `match` arm.

mod bullet;
mod enemy;
mod explosion;
mod player;
mod power_up;

pub use bullet::{Bullet, BulletKind, Weapon, LASER_MAX_PENETRATION};
pub use enemy::{Enemy, EnemyKind, Motion};
pub use explosion::Explosion;
pub use player::{DamageOutcome, Player, PlayerSnapshot};
pub use power_up::{PowerUp, PowerUpKind, POWER_UP_FALL_SPEED, POWER_UP_SIZE};

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world units, origin at the top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Half-open containment, `[x, right) × [y, bottom)`.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

// ── Shared entity state ──────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub rect: Rect,
    pub active: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            active: true,
        }
    }
}

/// Capability shared by everything that occupies space on the playfield.
pub trait GameObject {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn rect(&self) -> Rect {
        self.body().rect
    }

    fn is_active(&self) -> bool {
        self.body().active
    }

    fn deactivate(&mut self) {
        self.body_mut().active = false;
    }

    fn intersects(&self, other: &dyn GameObject) -> bool {
        self.rect().intersects(&other.rect())
    }
}

macro_rules! impl_game_object {
    ($($ty:ty),* $(,)?) => {
        $(
            impl GameObject for $ty {
                fn body(&self) -> &Body {
                    &self.body
                }

                fn body_mut(&mut self) -> &mut Body {
                    &mut self.body
                }
            }
        )*
    };
}

impl_game_object!(Player, Bullet, Enemy, PowerUp, Explosion);
