use std::f32::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Body;
use crate::Millis;

const ZIGZAG_AMPLITUDE: f32 = 120.0;
const ZIGZAG_FREQUENCY_HZ: f32 = 2.0;
/// Horizontal drift as a fraction of descent speed.
const DRIFT_FACTOR: f32 = 0.3;
const BOSS_SWAY_PERIOD_MS: f64 = 400.0;
const BOSS_SWAY_STEP: f32 = 0.8;
/// Minions appear this far either side of the boss centre.
const MINION_SPREAD: f32 = 60.0;
const MINION_DROP_OVERLAP: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Medium,
    Heavy,
    ZigZag,
    Boss,
}

impl EnemyKind {
    /// Score awarded per kill.
    pub fn score_value(self) -> u32 {
        match self {
            EnemyKind::Basic => 10,
            EnemyKind::Medium => 20,
            EnemyKind::Heavy => 30,
            EnemyKind::ZigZag => 15,
            EnemyKind::Boss => 200,
        }
    }

    fn base_speed(self) -> f32 {
        match self {
            EnemyKind::Basic => 200.0,
            EnemyKind::Medium => 150.0,
            EnemyKind::Heavy => 100.0,
            EnemyKind::ZigZag => 220.0,
            EnemyKind::Boss => 140.0,
        }
    }

    fn base_health(self) -> i32 {
        match self {
            EnemyKind::Basic => 1,
            EnemyKind::Medium | EnemyKind::ZigZag => 2,
            EnemyKind::Heavy => 3,
            EnemyKind::Boss => 30,
        }
    }

    /// Side length range; Basic/Medium/Heavy roll width and height separately.
    fn size_range(self) -> (f32, f32) {
        match self {
            EnemyKind::Basic => (60.0, 100.0),
            EnemyKind::Medium => (80.0, 120.0),
            EnemyKind::Heavy => (100.0, 150.0),
            EnemyKind::ZigZag => (80.0, 80.0),
            EnemyKind::Boss => (200.0, 200.0),
        }
    }
}

/// Per-variant movement state.
#[derive(Clone, Debug, PartialEq)]
pub enum Motion {
    /// Straight descent with horizontal drift, reflected at the side walls.
    Bounce { vx: f32 },
    /// Sine sway around `origin_x`; the origin only moves when clamped.
    ZigZag {
        time_s: f32,
        amplitude: f32,
        frequency: f32,
        origin_x: f32,
    },
    /// Descend to `target_y`, then hover and call in minions.
    Boss {
        target_y: f32,
        last_spawn: Millis,
        cooldown_ms: Millis,
    },
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub(crate) body: Body,
    kind: EnemyKind,
    motion: Motion,
    health: i32,
    max_health: i32,
    /// Descent speed in units per second.
    speed: f32,
    score_value: u32,
    dying_since: Option<Millis>,
}

impl Enemy {
    /// Regular (non-boss) enemy with randomised size and drift.
    pub fn spawn(kind: EnemyKind, x: f32, y: f32, rng: &mut impl Rng) -> Self {
        let (lo, hi) = kind.size_range();
        let (w, h) = if hi > lo {
            (rng.gen_range(lo..hi), rng.gen_range(lo..hi))
        } else {
            (lo, lo)
        };
        let speed = kind.base_speed();
        let motion = match kind {
            EnemyKind::ZigZag => Motion::ZigZag {
                time_s: 0.0,
                amplitude: ZIGZAG_AMPLITUDE,
                frequency: ZIGZAG_FREQUENCY_HZ,
                origin_x: x,
            },
            _ => Motion::Bounce {
                vx: (rng.gen::<f32>() - 0.5) * speed * DRIFT_FACTOR,
            },
        };
        Self::new(kind, Body::new(x, y, w, h), motion, speed)
    }

    /// Boss that stops at one third of the screen height.
    pub fn boss(
        x: f32,
        y: f32,
        size: (f32, f32),
        screen_h: f32,
        now: Millis,
        cooldown_ms: Millis,
    ) -> Self {
        let motion = Motion::Boss {
            target_y: screen_h / 3.0,
            last_spawn: now,
            cooldown_ms,
        };
        let kind = EnemyKind::Boss;
        Self::new(kind, Body::new(x, y, size.0, size.1), motion, kind.base_speed())
    }

    /// Fixed-geometry constructor; drift and sizes are up to the caller.
    pub fn with_motion(kind: EnemyKind, x: f32, y: f32, w: f32, h: f32, motion: Motion) -> Self {
        Self::new(kind, Body::new(x, y, w, h), motion, kind.base_speed())
    }

    fn new(kind: EnemyKind, body: Body, motion: Motion, speed: f32) -> Self {
        let health = kind.base_health();
        Self {
            body,
            kind,
            motion,
            health,
            max_health: health,
            speed,
            score_value: kind.score_value(),
            dying_since: None,
        }
    }

    /// Advance one step. A boss in position calls `spawn_minion(x, y)` twice
    /// per cooldown; the callee decides whether the minions are admitted.
    pub fn update(
        &mut self,
        dt_ms: f32,
        now: Millis,
        screen_w: f32,
        screen_h: f32,
        explode_delay_ms: Millis,
        spawn_minion: &mut dyn FnMut(f32, f32),
    ) {
        if !self.body.active {
            return;
        }
        if let Some(since) = self.dying_since {
            if now.saturating_sub(since) >= explode_delay_ms {
                self.body.active = false;
            }
            return;
        }

        let dt = dt_ms / 1000.0;
        let speed = self.speed;
        let rect = &mut self.body.rect;
        match &mut self.motion {
            Motion::Bounce { vx } => {
                rect.x += *vx * dt;
                rect.y += speed * dt;
                if screen_w > 0.0 && (rect.x <= 0.0 || rect.x >= screen_w - rect.w) {
                    *vx = -*vx;
                    rect.x = rect.x.clamp(0.0, (screen_w - rect.w).max(0.0));
                }
            }
            Motion::ZigZag {
                time_s,
                amplitude,
                frequency,
                origin_x,
            } => {
                *time_s += dt;
                rect.y += speed * dt;
                let omega = 2.0 * PI * *frequency;
                rect.x = *origin_x + (*time_s * omega).sin() * *amplitude;
                if screen_w > 0.0 {
                    if rect.x < 0.0 {
                        rect.x = 0.0;
                        *origin_x = origin_x.min(rect.x);
                    }
                    if rect.x > screen_w - rect.w {
                        rect.x = screen_w - rect.w;
                        *origin_x = origin_x.max(rect.x);
                    }
                }
            }
            Motion::Boss {
                target_y,
                last_spawn,
                cooldown_ms,
            } => {
                if rect.y < *target_y {
                    rect.y = (rect.y + speed * dt).min(*target_y);
                } else {
                    let phase = now as f64 / BOSS_SWAY_PERIOD_MS;
                    rect.x += phase.sin() as f32 * BOSS_SWAY_STEP;
                }
                rect.x = rect.x.min(screen_w - rect.w).max(0.0);

                if rect.y >= *target_y && now.saturating_sub(*last_spawn) >= *cooldown_ms {
                    let mid_x = rect.x + rect.w / 2.0;
                    let spawn_y = rect.bottom() - MINION_DROP_OVERLAP;
                    spawn_minion(mid_x - MINION_SPREAD, spawn_y);
                    spawn_minion(mid_x + MINION_SPREAD, spawn_y);
                    *last_spawn = now;
                }
                // Bosses never leave through the bottom.
                return;
            }
        }

        if rect.y > screen_h {
            self.body.active = false;
        }
    }

    /// Apply damage; returns `true` only on the hit that kills.
    pub fn take_damage(&mut self, amount: i32, now: Millis) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.dying_since = Some(now);
            return true;
        }
        false
    }

    /// Kill outright regardless of health; the ram path.
    pub fn explode(&mut self, now: Millis) {
        if self.is_alive() {
            self.health = 0;
            self.dying_since = Some(now);
        }
    }

    /// Active and not in its exploding grace period.
    pub fn is_alive(&self) -> bool {
        self.body.active && self.dying_since.is_none()
    }

    pub fn is_dying(&self) -> bool {
        self.dying_since.is_some()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn score_value(&self) -> u32 {
        self.score_value
    }

    /// Resets both current and maximum health.
    pub fn set_health(&mut self, health: i32) {
        self.health = health;
        self.max_health = health;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }
}
