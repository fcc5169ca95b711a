/// Enemy spawning and the active enemy list.
///
/// Levels 1 and 2 spawn one enemy per interval from the level roster, up to
/// `max_enemies`. Level 3 spawns a single boss, which calls in pairs of
/// minions, plus occasional minions dropping in near the top.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::config::BossConfig;
use crate::entities::{Enemy, EnemyKind, GameObject};
use crate::level::{LevelConfig, MAX_LEVEL};
use crate::Millis;

const SPAWN_Y: f32 = -100.0;
const NEAR_TOP_Y: f32 = -80.0;
/// Regular spawns keep this much room from the right edge.
const SPAWN_X_MARGIN: f32 = 100.0;

#[derive(Clone, Debug)]
pub struct EnemyManager {
    enemies: Vec<Enemy>,
    last_spawn: Option<Millis>,
    spawn_interval_ms: Millis,
    enemy_speed: f32,
    enemy_health: i32,
    max_enemies: usize,
    roster: Vec<EnemyKind>,
    boss_spawned: bool,
    boss: BossConfig,
    boss_size: (f32, f32),
    minion_cooldown_ms: Millis,
    explode_delay_ms: Millis,
    soft_cap: usize,
    screen_w: f32,
    screen_h: f32,
}

impl EnemyManager {
    pub fn new(
        screen_w: f32,
        screen_h: f32,
        boss: BossConfig,
        minion_cooldown_ms: Millis,
        explode_delay_ms: Millis,
        soft_cap: usize,
    ) -> Self {
        let boss_size = boss.fallback_size;
        let mut manager = EnemyManager {
            enemies: Vec::new(),
            last_spawn: None,
            spawn_interval_ms: 0,
            enemy_speed: 0.0,
            enemy_health: 1,
            max_enemies: 0,
            roster: Vec::new(),
            boss_spawned: false,
            boss,
            boss_size,
            minion_cooldown_ms,
            explode_delay_ms,
            soft_cap,
            screen_w,
            screen_h,
        };
        manager.configure(&LevelConfig::builtin(1));
        manager
    }

    /// Adopt a level's spawn tunables. Existing enemies are untouched.
    pub fn configure(&mut self, level: &LevelConfig) {
        self.spawn_interval_ms = level.spawn_interval_ms;
        self.enemy_speed = level.enemy_speed;
        self.enemy_health = level.enemy_health;
        self.max_enemies = level.max_enemies;
        self.roster = level.enemy_roster.clone();
        if self.roster.is_empty() {
            self.roster.push(if level.level == 2 {
                EnemyKind::ZigZag
            } else {
                EnemyKind::Basic
            });
        }
    }

    /// Size the boss from the enemy sprite, or the fallback when unknown.
    pub fn set_enemy_sprite_size(&mut self, size: Option<(f32, f32)>) {
        self.boss_size = match size {
            Some((w, h)) if w > 0.0 && h > 0.0 => {
                (w * self.boss.sprite_scale, h * self.boss.sprite_scale)
            }
            _ => self.boss.fallback_size,
        };
    }

    pub fn update(
        &mut self,
        dt_ms: f32,
        now: Millis,
        speed_multiplier: f32,
        level: u32,
        rng: &mut impl Rng,
    ) {
        let scaled_dt = dt_ms * speed_multiplier;
        let (w, h) = (self.screen_w, self.screen_h);
        let delay = self.explode_delay_ms;

        let mut minion_calls: Vec<(f32, f32)> = Vec::new();
        let mut call_minion = |x: f32, y: f32| minion_calls.push((x, y));
        for enemy in &mut self.enemies {
            enemy.update(scaled_dt, now, w, h, delay, &mut call_minion);
        }
        self.enemies.retain(|e| e.is_active());

        for (x, y) in minion_calls {
            if !self.below_soft_cap() {
                break;
            }
            self.spawn_boss_minion(x, y, rng);
        }

        let last = *self.last_spawn.get_or_insert(now);
        let interval_elapsed = now.saturating_sub(last) >= self.spawn_interval_ms;

        if level >= MAX_LEVEL {
            if !self.boss_spawned {
                self.spawn_boss(now);
            }
            let cap = self.max_enemies + self.boss.extra_minions;
            if interval_elapsed && self.enemies.len() < cap && self.below_soft_cap() {
                self.spawn_near_top_minion(rng);
                self.last_spawn = Some(now);
            }
        } else if interval_elapsed
            && self.enemies.len() < self.max_enemies
            && self.below_soft_cap()
        {
            self.spawn_regular(rng);
            self.last_spawn = Some(now);
        }
    }

    fn below_soft_cap(&self) -> bool {
        self.enemies.len() < self.soft_cap
    }

    fn minion_health(&self) -> i32 {
        (self.enemy_health - self.boss.minion_health_offset).max(1)
    }

    fn spawn_regular(&mut self, rng: &mut impl Rng) {
        let kind = self.roster.choose(rng).copied().unwrap_or(EnemyKind::Basic);
        let max_x = (self.screen_w - SPAWN_X_MARGIN).max(1.0);
        let x = rng.gen_range(0.0..max_x);
        let mut enemy = Enemy::spawn(kind, x, SPAWN_Y, rng);
        enemy.set_speed(self.enemy_speed);
        enemy.set_health(self.enemy_health);
        debug!(?kind, x, count = self.enemies.len() + 1, "enemy spawned");
        self.enemies.push(enemy);
    }

    fn spawn_boss(&mut self, now: Millis) {
        let (bw, bh) = self.boss_size;
        let health = (self.enemy_health * self.boss.health_multiplier).max(self.boss.min_health);
        let mut boss = Enemy::boss(
            (self.screen_w - bw) / 2.0,
            -bh,
            self.boss_size,
            self.screen_h,
            now,
            self.minion_cooldown_ms,
        );
        boss.set_health(health);
        self.enemies.push(boss);
        self.boss_spawned = true;
        info!(health, width = bw, height = bh, "boss spawned");
    }

    /// Minion called in by the boss; `(x, y)` is its centre-top.
    fn spawn_boss_minion(&mut self, x: f32, y: f32, rng: &mut impl Rng) {
        let mut minion = Enemy::spawn(EnemyKind::Basic, 0.0, y, rng);
        let half_w = minion.rect().w / 2.0;
        minion.body_mut().rect.x = x - half_w;
        minion.set_speed(self.enemy_speed + self.boss.minion_speed_bonus);
        minion.set_health(self.minion_health());
        self.enemies.push(minion);
    }

    fn spawn_near_top_minion(&mut self, rng: &mut impl Rng) {
        let max_x = (self.screen_w - SPAWN_X_MARGIN).max(1.0);
        let x = rng.gen_range(0.0..max_x);
        let mut minion = Enemy::spawn(EnemyKind::Basic, x, NEAR_TOP_Y, rng);
        minion.set_speed(self.enemy_speed + self.boss.near_top_speed_bonus);
        minion.set_health(self.minion_health());
        debug!(x, count = self.enemies.len() + 1, "near-top minion spawned");
        self.enemies.push(minion);
    }

    /// Drop every enemy and allow the boss to spawn again.
    pub fn clear(&mut self) {
        self.enemies.clear();
        self.boss_spawned = false;
        self.last_spawn = None;
    }

    /// Insert an enemy as is, bypassing spawn timing and caps.
    pub fn push(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn boss_spawned(&self) -> bool {
        self.boss_spawned
    }

    pub fn boss_count(&self) -> usize {
        self.enemies
            .iter()
            .filter(|e| e.kind() == EnemyKind::Boss)
            .count()
    }

    pub fn max_enemies(&self) -> usize {
        self.max_enemies
    }

    pub fn spawn_interval_ms(&self) -> Millis {
        self.spawn_interval_ms
    }

    pub fn enemy_speed(&self) -> f32 {
        self.enemy_speed
    }

    pub fn enemy_health(&self) -> i32 {
        self.enemy_health
    }

    pub fn boss_size(&self) -> (f32, f32) {
        self.boss_size
    }
}
