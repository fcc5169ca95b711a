/// Frame orchestration: update → collide → render.
///
/// The engine owns every entity list, the managers and a simulated clock
/// advanced only by the delta passed to [`GameEngine::update`]. Nothing in
/// here reads the wall clock, so a seeded engine replays identically.

use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::assets::{AssetBundle, AssetLoader, AssetRole, NoResources, ResourceProvider, Sprite};
use crate::background::{BackgroundScroll, DEFAULT_SCROLL_SPEED};
use crate::collision;
use crate::config::GameConfig;
use crate::enemies::EnemyManager;
use crate::entities::{
    Bullet, BulletKind, DamageOutcome, EnemyKind, Explosion, GameObject, Player, PowerUpKind,
    Rect,
};
use crate::high_scores::HighScoreStore;
use crate::level::LevelManager;
use crate::power_ups::PowerUpManager;
use crate::render::{Color, DrawCommand, Frame, Layer};
use crate::sound::{MusicCommand, Silent, SoundCue, SoundSink};
use crate::state::{Effect, GameState};
use crate::ui::{self, UiAction};
use crate::Millis;

const CHEAT_CORNER: f32 = 150.0;
const DEFAULT_EXPLOSION_SIZE: (f32, f32) = (80.0, 80.0);
/// Bullets spawn this far above the ship.
const MUZZLE_OFFSET: f32 = 16.0;
const CHEAT_POWER_UP_ORIGIN: (f32, f32) = (200.0, 200.0);

// ── Host-facing types ────────────────────────────────────────────────────────

/// One pointer sample. `down` is true while the finger (or button) is held.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    pub x: f32,
    pub y: f32,
    pub down: bool,
}

impl TouchEvent {
    pub fn down(x: f32, y: f32) -> Self {
        Self { x, y, down: true }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self { x, y, down: false }
    }
}

/// Collaborators supplied by the host at construction.
pub struct Services {
    pub resources: Arc<dyn ResourceProvider>,
    pub sound: Box<dyn SoundSink>,
    pub scores: HighScoreStore,
}

impl Services {
    /// No images, no sound, scores kept in memory.
    pub fn headless() -> Self {
        Services {
            resources: Arc::new(NoResources),
            sound: Box::new(Silent),
            scores: HighScoreStore::in_memory(),
        }
    }
}

// ── Engine ───────────────────────────────────────────────────────────────────

pub struct GameEngine {
    config: GameConfig,
    screen_w: f32,
    screen_h: f32,

    state: GameState,
    levels: LevelManager,
    enemies: EnemyManager,
    power_ups: PowerUpManager,
    player: Player,
    bullets: Vec<Bullet>,
    explosions: Vec<Explosion>,
    background: BackgroundScroll,

    assets: AssetBundle,
    loader: AssetLoader,
    resources: Arc<dyn ResourceProvider>,
    sound: Box<dyn SoundSink>,
    scores: HighScoreStore,
    rng: StdRng,

    clock_ms: f64,
    last_shot: Option<Millis>,
    shooting: bool,
}

impl GameEngine {
    pub fn new(config: GameConfig, services: Services, rng: StdRng) -> Self {
        let (screen_w, screen_h) = (config.screen_width, config.screen_height);
        let levels = LevelManager::new(config.levels.clone(), config.timing.transition_ms);

        let mut enemies = EnemyManager::new(
            screen_w,
            screen_h,
            config.boss.clone(),
            config.timing.boss_minion_cooldown_ms,
            config.timing.enemy_explode_delay_ms,
            config.limits.enemy_soft_cap,
        );
        enemies.configure(levels.config());

        let mut power_ups =
            PowerUpManager::new(config.power_ups.clone(), config.limits.power_up_soft_cap);
        power_ups.configure(levels.config());

        let player = spawn_player(&config);
        let mut loader = AssetLoader::new();
        loader.start(Arc::clone(&services.resources), levels.current_level());

        let mut engine = GameEngine {
            screen_w,
            screen_h,
            state: GameState::new(0),
            enemies,
            power_ups,
            player,
            bullets: Vec::new(),
            explosions: Vec::new(),
            background: BackgroundScroll::new(screen_h, DEFAULT_SCROLL_SPEED),
            assets: AssetBundle::placeholder(levels.current_level()),
            levels,
            loader,
            resources: services.resources,
            sound: services.sound,
            scores: services.scores,
            rng,
            clock_ms: 0.0,
            last_shot: None,
            shooting: false,
            config,
        };
        engine.sound.music(MusicCommand::Start);
        info!(width = screen_w, height = screen_h, "engine ready");
        engine
    }

    pub fn now(&self) -> Millis {
        self.clock_ms as Millis
    }

    /// Advance one frame by `delta_ms` of host time.
    pub fn update(&mut self, delta_ms: f32) {
        if self.state.is_paused() {
            return;
        }
        let dt = self.clamp_delta(delta_ms);
        self.clock_ms += dt as f64;
        let now = self.now();
        self.poll_assets();

        if self.state.is_terminal() {
            return;
        }
        self.state.update(now);

        if !self.levels.is_transitioning() {
            self.player.update(dt, now);
            self.fire_if_ready(now);
            self.update_bullets(dt);
            let level = self.levels.current_level();
            self.enemies
                .update(dt, now, self.state.speed_multiplier(), level, &mut self.rng);
            self.power_ups.update(dt, self.screen_h);
            self.update_explosions(now);
            self.background.update(dt, self.state.speed_multiplier());
            self.resolve_collisions(now);
        }

        self.advance_level(dt);
        self.check_terminal();
    }

    fn clamp_delta(&self, delta_ms: f32) -> f32 {
        let timing = &self.config.timing;
        if !delta_ms.is_finite() || delta_ms < 0.0 {
            0.0
        } else if delta_ms > timing.max_frame_delta_ms {
            trace!(delta_ms, "frame delta clamped");
            timing.nominal_step_ms
        } else {
            delta_ms
        }
    }

    fn poll_assets(&mut self) {
        if let Some(bundle) = self.loader.poll() {
            self.install_assets(bundle);
        }
    }

    fn install_assets(&mut self, bundle: AssetBundle) {
        self.enemies
            .set_enemy_sprite_size(bundle.size(AssetRole::Enemy));
        debug!(level = bundle.level(), "asset bundle installed");
        self.assets = bundle;
    }

    /// Block until the pending asset load (if any) lands.
    pub fn wait_for_assets(&mut self) {
        if let Some(bundle) = self.loader.wait() {
            self.install_assets(bundle);
        }
    }

    // ── Shooting ─────────────────────────────────────────────────────────────

    fn shot_interval(&self) -> Millis {
        let timing = &self.config.timing;
        if self.state.is_active(Effect::RapidFire) {
            timing.rapid_fire_interval_ms
        } else {
            timing.shot_interval_ms
        }
    }

    fn fire_if_ready(&mut self, now: Millis) {
        if !self.shooting {
            return;
        }
        let ready = self
            .last_shot
            .map_or(true, |last| now.saturating_sub(last) >= self.shot_interval());
        if ready {
            self.shoot();
            self.last_shot = Some(now);
        }
    }

    fn shoot(&mut self) {
        let (cx, _) = self.player.center();
        let y = self.player.rect().y - MUZZLE_OFFSET;
        let (speed, damage) = self.levels.bullet_config();
        let weapon = self.levels.config().weapon;
        let laser = self.state.is_active(Effect::LaserBeam);
        let make = |x: f32| {
            if laser {
                Bullet::laser(x, y, speed)
            } else {
                Bullet::for_weapon(weapon, x, y, speed, damage)
            }
        };

        self.bullets.push(make(cx));
        if self.state.is_active(Effect::MultiShot) {
            let offset = self.config.player.multishot_offset;
            self.bullets.push(make(cx - offset));
            self.bullets.push(make(cx + offset));
        }
        self.sound.play(SoundCue::Shoot);
    }

    fn update_bullets(&mut self, dt: f32) {
        for bullet in &mut self.bullets {
            bullet.update(dt);
        }
        self.bullets.retain(|b| b.is_active());
    }

    fn update_explosions(&mut self, now: Millis) {
        for explosion in &mut self.explosions {
            explosion.update(now);
        }
        self.explosions.retain(|e| e.is_active());
    }

    // ── Collisions ───────────────────────────────────────────────────────────

    fn resolve_collisions(&mut self, now: Millis) {
        self.resolve_bullet_hits(now);
        self.resolve_player_hits(now);
        self.resolve_pickups();
        self.resolve_border(now);
    }

    fn resolve_bullet_hits(&mut self, now: Millis) {
        for bi in 0..self.bullets.len() {
            let hits = collision::bullet_hits(&self.bullets[bi], self.enemies.enemies());
            for ei in hits {
                if !self.bullets[bi].is_active() {
                    break;
                }
                let damage = self.bullets[bi].damage();
                let enemy = &mut self.enemies.enemies_mut()[ei];
                let killed = enemy.take_damage(damage, now);
                let (cx, cy) = enemy.rect().center();
                let value = enemy.score_value();
                self.bullets[bi].register_hit();

                if killed {
                    self.on_enemy_killed(cx, cy, value, now);
                }
                if let Some(radius) = self.bullets[bi].splash_radius() {
                    self.splash(ei, cx, cy, radius, damage, now);
                }
            }
        }
        self.bullets.retain(|b| b.is_active());
    }

    fn explosion_size(&self) -> (f32, f32) {
        self.assets
            .size(AssetRole::Explosion)
            .unwrap_or(DEFAULT_EXPLOSION_SIZE)
    }

    fn spawn_explosion(&mut self, cx: f32, cy: f32, now: Millis, duration_ms: Millis) {
        let (w, h) = self.explosion_size();
        self.explosions
            .push(Explosion::new(cx, cy, w, h, now, duration_ms));
    }

    fn on_enemy_killed(&mut self, cx: f32, cy: f32, value: u32, now: Millis) {
        self.spawn_explosion(cx, cy, now, self.config.timing.kill_explosion_ms);
        self.state.add_score(value);
        self.sound.play(SoundCue::EnemyExplode);
        if let Some(kind) = self.power_ups.try_spawn(cx, cy, &mut self.rng) {
            debug!(?kind, "kill dropped a power-up");
        }
    }

    /// Explosive rounds also hurt every other live enemy near the impact, for
    /// half score and no drops.
    fn splash(&mut self, struck: usize, cx: f32, cy: f32, radius: f32, damage: i32, now: Millis) {
        let targets = collision::enemies_within(cx, cy, radius, self.enemies.enemies());
        for ei in targets.into_iter().filter(|&i| i != struck) {
            let enemy = &mut self.enemies.enemies_mut()[ei];
            if enemy.take_damage(damage, now) {
                let (ex, ey) = enemy.rect().center();
                let value = enemy.score_value() / 2;
                self.spawn_explosion(ex, ey, now, self.config.timing.splash_explosion_ms);
                self.state.add_score(value);
            }
        }
    }

    fn damage_player(&mut self, now: Millis) -> DamageOutcome {
        let outcome = self.player.take_damage(
            1,
            now,
            self.config.timing.invincibility_ms,
            self.state.is_shielded(),
        );
        if outcome == DamageOutcome::Absorbed {
            debug!("hit absorbed by shield");
        }
        outcome
    }

    fn resolve_player_hits(&mut self, now: Millis) {
        let hits = collision::player_hits(&self.player, self.enemies.enemies());
        if hits.is_empty() || self.damage_player(now) == DamageOutcome::Ignored {
            return;
        }
        for ei in hits {
            let enemy = &mut self.enemies.enemies_mut()[ei];
            // The boss shrugs off rams.
            if enemy.kind() == EnemyKind::Boss {
                continue;
            }
            enemy.explode(now);
            let (cx, cy) = enemy.rect().center();
            self.spawn_explosion(cx, cy, now, self.config.timing.kill_explosion_ms);
        }
        self.sound.play(SoundCue::PlayerHit);
        debug!(health = self.player.health(), "player hit by enemy");
    }

    fn resolve_pickups(&mut self) {
        let pickups = collision::power_up_pickups(&self.player, self.power_ups.power_ups());
        if pickups.is_empty() {
            return;
        }
        for pi in pickups {
            let power_up = &mut self.power_ups.power_ups_mut()[pi];
            let (kind, duration) = (power_up.kind(), power_up.duration_ms());
            power_up.deactivate();
            if kind == PowerUpKind::Health {
                self.player.heal(self.config.player.heal_amount);
            } else {
                self.state.apply_power_up(kind, duration);
            }
            self.sound.play(SoundCue::PowerUp);
            debug!(?kind, duration, "power-up collected");
        }
        self.power_ups.prune();
    }

    fn resolve_border(&mut self, now: Millis) {
        if !collision::border_violation(&self.player, self.screen_w, self.screen_h) {
            return;
        }
        if self.damage_player(now) == DamageOutcome::Ignored {
            return;
        }
        let (cx, cy) = self.player.center();
        self.spawn_explosion(cx, cy, now, self.config.timing.kill_explosion_ms);
        self.sound.play(SoundCue::BorderHit);
        debug!(health = self.player.health(), "player hit the border");
    }

    // ── Level flow ───────────────────────────────────────────────────────────

    fn advance_level(&mut self, dt: f32) {
        self.levels.update_transition(dt);
        if self.levels.consume_transition_just_completed() {
            self.on_level_started();
        }
        // A session that has already been decided never starts another level.
        if self.state.is_terminal() || self.has_won() {
            return;
        }
        if !self.levels.is_max_level() && self.levels.should_advance(self.state.score()) {
            self.levels.start_transition(&self.player);
        }
    }

    fn on_level_started(&mut self) {
        let level = self.levels.current_level();
        self.state.set_level(level);
        self.enemies.configure(self.levels.config());
        self.enemies.clear();
        self.power_ups.configure(self.levels.config());
        self.power_ups.clear();
        self.bullets.clear();
        self.explosions.clear();
        self.loader.start(Arc::clone(&self.resources), level);

        self.levels.restore_player_state(&mut self.player);
        let (x, y) = self.spawn_point();
        self.player.set_position(x, y);
        info!(level, name = %self.levels.config().name, "level started");
    }

    fn spawn_point(&self) -> (f32, f32) {
        let p = &self.config.player;
        (
            self.screen_w / 2.0 - p.width / 2.0,
            self.screen_h - p.spawn_bottom_margin,
        )
    }

    fn has_won(&self) -> bool {
        let score = self.state.score();
        let level = self.levels.config();
        score >= level.win_score
            || (self.levels.is_max_level() && score >= level.score_to_next_level)
    }

    /// Death wins over victory when both happen in the same tick.
    fn check_terminal(&mut self) {
        if self.player.is_dead() {
            self.finish(false);
        } else if self.has_won() {
            self.finish(true);
        }
    }

    fn finish(&mut self, won: bool) {
        let fresh = if won {
            self.state.set_game_won()
        } else {
            self.state.set_game_over()
        };
        if !fresh {
            return;
        }
        self.shooting = false;
        let (score, level) = (self.state.score(), self.state.level());
        let ranked = self.scores.add_score(score, level);
        if won {
            self.sound.play(SoundCue::Congratulations);
        }
        info!(won, score, level, ranked, "game finished");
    }

    // ── Input ────────────────────────────────────────────────────────────────

    pub fn handle_touch(&mut self, touch: TouchEvent) {
        if self.state.is_terminal() {
            if touch.down {
                self.handle_terminal_touch(touch.x, touch.y);
            }
            return;
        }

        self.shooting = touch.down;
        if touch.down {
            let r = self.player.rect();
            self.player.move_to(touch.x - r.w / 2.0, touch.y - r.h / 2.0);
            if self.config.cheats_enabled {
                self.check_cheats(touch.x, touch.y);
            }
        }
    }

    fn terminal_buttons(&self) -> Vec<ui::Button> {
        if self.state.is_game_won() {
            ui::win_buttons(self.screen_w, self.screen_h)
        } else {
            ui::game_over_buttons(self.screen_w, self.screen_h)
        }
    }

    fn handle_terminal_touch(&mut self, x: f32, y: f32) {
        match ui::hit_test(&self.terminal_buttons(), x, y) {
            Some(UiAction::Replay) => self.reset(),
            Some(action) => {
                debug!(?action, "ui action pending");
                self.state.set_action(action);
            }
            None => {}
        }
    }

    fn check_cheats(&mut self, x: f32, y: f32) {
        let (w, h) = (self.screen_w, self.screen_h);
        let c = CHEAT_CORNER;
        if x > w - c && y < c {
            info!("cheat: win");
            self.finish(true);
        } else if x < c && y > h - c {
            info!("cheat: lose");
            self.sound.play(SoundCue::PlayerHit);
            self.finish(false);
        } else if x < c && y < c && self.levels.current_level() == 1 {
            info!("cheat: all power-ups");
            let (px, py) = CHEAT_POWER_UP_ORIGIN;
            self.power_ups.spawn_all_for_testing(px, py);
        } else if x > w - c && y > h - c && !self.levels.is_transitioning() {
            info!("cheat: advance level");
            self.levels.start_transition(&self.player);
        }
    }

    /// One-shot UI action for the host (Home, Menu, High Scores).
    pub fn take_pending_action(&mut self) -> Option<UiAction> {
        self.state.take_pending_action()
    }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    /// Start a fresh session on level 1.
    pub fn reset(&mut self) {
        let now = self.now();
        self.state.reset(now);
        self.levels.reset_to_level1();
        self.enemies.configure(self.levels.config());
        self.enemies.clear();
        self.power_ups.configure(self.levels.config());
        self.power_ups.clear();
        self.bullets.clear();
        self.explosions.clear();
        self.background.reset();
        self.player = spawn_player(&self.config);
        self.last_shot = None;
        self.shooting = false;
        self.loader
            .start(Arc::clone(&self.resources), self.levels.current_level());
        info!("game reset");
    }

    pub fn pause(&mut self) {
        if !self.state.is_paused() {
            self.state.set_paused(true);
            self.sound.music(MusicCommand::Pause);
        }
    }

    pub fn resume(&mut self) {
        if self.state.is_paused() {
            self.state.set_paused(false);
            self.sound.music(MusicCommand::Resume);
        }
    }

    /// Silence the music before the host exits. The engine stays paused.
    pub fn shutdown(&mut self) {
        self.state.set_paused(true);
        self.sound.music(MusicCommand::Stop);
        debug!("engine shut down");
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    pub fn render(&self) -> Frame {
        let mut frame = Frame::new();
        self.draw_background(&mut frame);

        if self.levels.is_transitioning() {
            self.draw_transition(&mut frame);
            self.draw_overlay(&mut frame);
            return frame;
        }

        self.draw_player(&mut frame);
        for bullet in &self.bullets {
            let role = match bullet.kind() {
                BulletKind::Laser { .. } => AssetRole::Laser,
                _ => AssetRole::Bullet,
            };
            blit(&mut frame, Layer::Bullets, self.assets.sprite(role), bullet.rect());
        }
        self.draw_enemies(&mut frame);
        for power_up in self.power_ups.power_ups().iter().filter(|p| p.is_active()) {
            let sprite = self.assets.sprite(AssetRole::PowerUp(power_up.kind()));
            blit(&mut frame, Layer::PowerUps, sprite, power_up.rect());
        }
        for explosion in &self.explosions {
            let sprite = self.assets.sprite(AssetRole::Explosion);
            blit(&mut frame, Layer::Explosions, sprite, explosion.rect());
        }
        self.draw_hud(&mut frame);
        self.draw_overlay(&mut frame);
        frame
    }

    /// Result screen or pause banner, drawn above everything else.
    fn draw_overlay(&self, frame: &mut Frame) {
        if self.state.is_game_over() {
            self.draw_game_over(frame);
        } else if self.state.is_game_won() {
            self.draw_win(frame);
        } else if self.state.is_paused() {
            let (cx, cy) = (self.screen_w / 2.0, self.screen_h / 2.0);
            frame.text(Layer::Overlay, cx, cy, 80.0, Color::WHITE, "PAUSED");
        }
    }

    fn draw_background(&self, frame: &mut Frame) {
        frame.push(Layer::Background, DrawCommand::Clear(Color::BLACK));
        let sprite = self.assets.sprite(AssetRole::Background);
        let (y1, y2) = self.background.offsets();
        let tile_h = self.background.tile_height();
        for y in [y1, y2] {
            let rect = Rect::new(0.0, y, self.screen_w, tile_h);
            blit(frame, Layer::Background, sprite.clone(), rect);
        }
    }

    fn draw_transition(&self, frame: &mut Frame) {
        let progress = self.levels.transition_progress();
        let full = Rect::new(0.0, 0.0, self.screen_w, self.screen_h);
        frame.push(
            Layer::Overlay,
            DrawCommand::FillRect {
                rect: full,
                color: Color::BLACK,
            },
        );
        let config = self.levels.config();
        let title = format!("Level {}: {}", config.level, config.name);
        frame.text(Layer::Overlay, self.screen_w / 2.0, 100.0, 40.0, Color::WHITE, title);
        if let Some(next) = self.levels.next_level() {
            let name = self.levels.config_for(next).name;
            let cy = self.screen_h / 2.0;
            frame.text(
                Layer::Overlay,
                self.screen_w / 2.0,
                cy - 60.0,
                60.0,
                Color::YELLOW,
                format!("Entering {}", name),
            );
            let bar_w = self.screen_w * 0.6;
            let bar_x = (self.screen_w - bar_w) / 2.0;
            frame.push(
                Layer::Overlay,
                DrawCommand::FillRect {
                    rect: Rect::new(bar_x, cy, bar_w, 20.0),
                    color: Color::GREY,
                },
            );
            frame.push(
                Layer::Overlay,
                DrawCommand::FillRect {
                    rect: Rect::new(bar_x, cy, bar_w * progress, 20.0),
                    color: Color::GREEN,
                },
            );
        }
    }

    fn draw_player(&self, frame: &mut Frame) {
        let rect = self.player.rect();
        blit(frame, Layer::Player, self.assets.sprite(AssetRole::Player), rect);

        let shield = if self.state.is_active(Effect::ForceField) {
            Some(Color::MAGENTA)
        } else if self.state.is_active(Effect::EnergyShield) {
            Some(Color::BLUE)
        } else if self.state.is_active(Effect::Shield) {
            Some(Color::CYAN)
        } else {
            None
        };
        if let Some(color) = shield {
            let (cx, cy) = rect.center();
            frame.push(
                Layer::Player,
                DrawCommand::Circle {
                    cx,
                    cy,
                    radius: rect.w.max(rect.h) * 0.6,
                    color,
                },
            );
        }
    }

    fn draw_enemies(&self, frame: &mut Frame) {
        for enemy in self.enemies.enemies() {
            let rect = enemy.rect();
            if enemy.is_dying() {
                blit(frame, Layer::Enemies, self.assets.sprite(AssetRole::Explosion), rect);
                continue;
            }
            let role = if enemy.kind() == EnemyKind::Boss {
                AssetRole::Boss
            } else {
                AssetRole::Enemy
            };
            blit(frame, Layer::Enemies, self.assets.sprite(role), rect);

            if enemy.kind() == EnemyKind::Boss && enemy.max_health() > 0 {
                let ratio = enemy.health().max(0) as f32 / enemy.max_health() as f32;
                let bar = Rect::new(rect.x, rect.y - 14.0, rect.w, 8.0);
                frame.push(
                    Layer::Enemies,
                    DrawCommand::FillRect {
                        rect: bar,
                        color: Color::GREY,
                    },
                );
                frame.push(
                    Layer::Enemies,
                    DrawCommand::FillRect {
                        rect: Rect { w: bar.w * ratio, ..bar },
                        color: Color::RED,
                    },
                );
            }
        }
    }

    fn draw_hud(&self, frame: &mut Frame) {
        let config = self.levels.config();
        let secs = self.state.play_time_ms() / 1000;
        let lines = [
            (format!("Score: {}", self.state.score()), Color::YELLOW),
            (format!("Level {}: {}", config.level, config.name), Color::WHITE),
            (
                format!("HP {}/{}", self.player.health(), self.player.max_health()),
                Color::RED,
            ),
            (format!("Time {:02}:{:02}", secs / 60, secs % 60), Color::WHITE),
        ];
        for (i, (text, color)) in lines.into_iter().enumerate() {
            frame.text(Layer::Hud, 20.0, 50.0 + i as f32 * 45.0, 36.0, color, text);
        }

        for (i, effect) in self.state.active_effects().enumerate() {
            let secs = (self.state.remaining(effect) + 999) / 1000;
            frame.text(
                Layer::Hud,
                self.screen_w - 320.0,
                50.0 + i as f32 * 40.0,
                30.0,
                Color::CYAN,
                format!("{:?} {}s", effect, secs),
            );
        }
    }

    fn draw_result(&self, frame: &mut Frame, title: &str, color: Color) {
        let full = Rect::new(0.0, 0.0, self.screen_w, self.screen_h);
        frame.push(
            Layer::Overlay,
            DrawCommand::FillRect {
                rect: full,
                color: Color::BLACK,
            },
        );
        let cx = self.screen_w / 2.0;
        let cy = self.screen_h / 2.0;
        let secs = self.state.play_time_ms() / 1000;
        frame.text(Layer::Overlay, cx, cy - 250.0, 90.0, color, title);
        frame.text(
            Layer::Overlay,
            cx,
            cy - 120.0,
            50.0,
            Color::WHITE,
            format!("Score: {}", self.state.score()),
        );
        frame.text(
            Layer::Overlay,
            cx,
            cy - 60.0,
            50.0,
            Color::WHITE,
            format!("Level: {}", self.state.level()),
        );
        frame.text(
            Layer::Overlay,
            cx,
            cy,
            40.0,
            Color::GREY,
            format!("Time: {:02}:{:02}", secs / 60, secs % 60),
        );

        for button in self.terminal_buttons() {
            frame.push(
                Layer::Overlay,
                DrawCommand::FillRect {
                    rect: button.rect,
                    color: Color::GREY,
                },
            );
            let (bx, by) = button.rect.center();
            frame.text(Layer::Overlay, bx, by, 36.0, Color::WHITE, button.action.label());
        }
    }

    fn draw_game_over(&self, frame: &mut Frame) {
        self.draw_result(frame, "GAME OVER", Color::RED);
    }

    fn draw_win(&self, frame: &mut Frame) {
        self.draw_result(frame, "CONGRATULATIONS!", Color::YELLOW);
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn enemies(&self) -> &EnemyManager {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut EnemyManager {
        &mut self.enemies
    }

    pub fn power_ups(&self) -> &PowerUpManager {
        &self.power_ups
    }

    pub fn power_ups_mut(&mut self) -> &mut PowerUpManager {
        &mut self.power_ups
    }

    pub fn levels(&self) -> &LevelManager {
        &self.levels
    }

    pub fn levels_mut(&mut self) -> &mut LevelManager {
        &mut self.levels
    }

    pub fn high_scores(&self) -> &HighScoreStore {
        &self.scores
    }

    pub fn high_scores_mut(&mut self) -> &mut HighScoreStore {
        &mut self.scores
    }

    pub fn assets(&self) -> &AssetBundle {
        &self.assets
    }

    pub fn is_shooting(&self) -> bool {
        self.shooting
    }

    pub fn screen_size(&self) -> (f32, f32) {
        (self.screen_w, self.screen_h)
    }
}

fn spawn_player(config: &GameConfig) -> Player {
    let p = &config.player;
    Player::new(
        config.screen_width / 2.0 - p.width / 2.0,
        config.screen_height - p.spawn_bottom_margin,
        p.width,
        p.height,
        p.max_health,
        p.follow_speed,
    )
}

fn blit(frame: &mut Frame, layer: Layer, sprite: Sprite, rect: Rect) {
    frame.push(layer, DrawCommand::Blit { sprite, rect });
}
