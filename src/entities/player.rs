use super::{Body, GameObject};
use crate::Millis;

/// Health/speed carried across a level transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
}

impl Default for PlayerSnapshot {
    fn default() -> Self {
        Self {
            health: 3,
            max_health: 3,
            speed: 25.0,
        }
    }
}

/// Result of [`Player::take_damage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Health was reduced and the invincibility window started.
    Applied,
    /// A shield effect soaked the hit; the invincibility window still started.
    Absorbed,
    /// Already invincible, nothing happened.
    Ignored,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub(crate) body: Body,
    health: i32,
    max_health: i32,
    target_x: f32,
    target_y: f32,
    /// Follow factor: fraction of the remaining distance covered per second.
    speed: f32,
    invincible_until: Option<Millis>,
}

impl Player {
    pub fn new(x: f32, y: f32, w: f32, h: f32, max_health: i32, speed: f32) -> Self {
        let max_health = max_health.max(1);
        Self {
            body: Body::new(x, y, w, h),
            health: max_health,
            max_health,
            target_x: x,
            target_y: y,
            speed,
            invincible_until: None,
        }
    }

    /// Ease toward the target and drop invincibility once its window closes.
    pub fn update(&mut self, dt_ms: f32, now: Millis) {
        let step = (self.speed * dt_ms / 1000.0).min(1.0);
        let rect = &mut self.body.rect;

        let dx = self.target_x - rect.x;
        if dx.abs() > 1.0 {
            rect.x += dx * step;
        } else {
            rect.x = self.target_x;
        }

        let dy = self.target_y - rect.y;
        if dy.abs() > 1.0 {
            rect.y += dy * step;
        } else {
            rect.y = self.target_y;
        }

        if matches!(self.invincible_until, Some(until) if now >= until) {
            self.invincible_until = None;
        }
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.target_x = x;
        self.target_y = y;
    }

    /// Teleport; the movement target follows so the ship stays put.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.body.rect.x = x;
        self.body.rect.y = y;
        self.move_to(x, y);
    }

    pub fn target(&self) -> (f32, f32) {
        (self.target_x, self.target_y)
    }

    pub fn take_damage(
        &mut self,
        amount: i32,
        now: Millis,
        window_ms: Millis,
        shielded: bool,
    ) -> DamageOutcome {
        if matches!(self.invincible_until, Some(until) if now < until) {
            return DamageOutcome::Ignored;
        }
        self.invincible_until = Some(now + window_ms);
        if shielded {
            return DamageOutcome::Absorbed;
        }
        self.health = (self.health - amount.max(0)).clamp(0, self.max_health);
        DamageOutcome::Applied
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount.max(0)).min(self.max_health);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_until.is_some()
    }

    pub fn invincible_until(&self) -> Option<Millis> {
        self.invincible_until
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

    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    /// Lowering the cap also lowers current health.
    pub fn set_max_health(&mut self, max_health: i32) {
        self.max_health = max_health.max(1);
        self.health = self.health.min(self.max_health);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            health: self.health,
            max_health: self.max_health,
            speed: self.speed,
        }
    }

    pub fn restore(&mut self, snapshot: &PlayerSnapshot) {
        self.set_max_health(snapshot.max_health);
        self.set_health(snapshot.health);
        self.set_speed(snapshot.speed);
    }

    /// Centre point, used as the muzzle origin.
    pub fn center(&self) -> (f32, f32) {
        self.rect().center()
    }
}
