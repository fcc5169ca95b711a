/// Session bookkeeping: score, timed effects, terminal flags and the one-shot
/// UI action slot.

use crate::entities::PowerUpKind;
use crate::ui::UiAction;
use crate::Millis;

/// The six timed effects. Health is instant and has no slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    Shield,
    RapidFire,
    MultiShot,
    LaserBeam,
    EnergyShield,
    ForceField,
}

impl Effect {
    pub const ALL: [Effect; 6] = [
        Effect::Shield,
        Effect::RapidFire,
        Effect::MultiShot,
        Effect::LaserBeam,
        Effect::EnergyShield,
        Effect::ForceField,
    ];

    pub fn from_power_up(kind: PowerUpKind) -> Option<Effect> {
        match kind {
            PowerUpKind::Health => None,
            PowerUpKind::Shield => Some(Effect::Shield),
            PowerUpKind::RapidFire => Some(Effect::RapidFire),
            PowerUpKind::MultiShot => Some(Effect::MultiShot),
            PowerUpKind::LaserBeam => Some(Effect::LaserBeam),
            PowerUpKind::EnergyShield => Some(Effect::EnergyShield),
            PowerUpKind::ForceField => Some(Effect::ForceField),
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug)]
pub struct GameState {
    score: u32,
    level: u32,
    game_over: bool,
    game_won: bool,
    paused: bool,
    /// Absolute expiry per effect; an effect is on iff `now < expiry`.
    expiries: [Millis; 6],
    speed_multiplier: f32,
    pending_action: Option<UiAction>,
    now: Millis,
    started_at: Millis,
    ended_at: Option<Millis>,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new(0)
    }
}

impl GameState {
    pub fn new(now: Millis) -> Self {
        GameState {
            score: 0,
            level: 1,
            game_over: false,
            game_won: false,
            paused: false,
            expiries: [0; 6],
            speed_multiplier: 1.0,
            pending_action: None,
            now,
            started_at: now,
            ended_at: None,
        }
    }

    /// Back to session-start defaults, timing from `now`.
    pub fn reset(&mut self, now: Millis) {
        *self = GameState::new(now);
    }

    /// Advance the clock. Expired effects read as inactive from here on.
    pub fn update(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    /// Start (or restart) a timed effect for `duration_ms` from now. Instant
    /// kinds are ignored here; the engine heals directly.
    pub fn apply_power_up(&mut self, kind: PowerUpKind, duration_ms: Millis) {
        if let Some(effect) = Effect::from_power_up(kind) {
            self.expiries[effect.slot()] = self.now + duration_ms;
        }
    }

    pub fn is_active(&self, effect: Effect) -> bool {
        self.now < self.expiries[effect.slot()]
    }

    pub fn expiry(&self, effect: Effect) -> Millis {
        self.expiries[effect.slot()]
    }

    /// Milliseconds left on an effect, 0 when inactive.
    pub fn remaining(&self, effect: Effect) -> Millis {
        self.expiries[effect.slot()].saturating_sub(self.now)
    }

    pub fn active_effects(&self) -> impl Iterator<Item = Effect> + '_ {
        Effect::ALL.into_iter().filter(|e| self.is_active(*e))
    }

    /// Any damage-absorbing effect is up.
    pub fn is_shielded(&self) -> bool {
        self.is_active(Effect::Shield)
            || self.is_active(Effect::EnergyShield)
            || self.is_active(Effect::ForceField)
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Returns `true` only when this call ended the session.
    pub fn set_game_over(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.game_over = true;
        self.ended_at = Some(self.now);
        true
    }

    /// Returns `true` only when this call ended the session.
    pub fn set_game_won(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.game_won = true;
        self.ended_at = Some(self.now);
        true
    }

    pub fn is_terminal(&self) -> bool {
        self.game_over || self.game_won
    }

    pub fn set_action(&mut self, action: UiAction) {
        self.pending_action = Some(action);
    }

    /// Hands out the pending action once.
    pub fn take_pending_action(&mut self) -> Option<UiAction> {
        self.pending_action.take()
    }

    pub fn pending_action(&self) -> Option<UiAction> {
        self.pending_action
    }

    /// Session play time; frozen once the game is over or won.
    pub fn play_time_ms(&self) -> Millis {
        self.ended_at.unwrap_or(self.now).saturating_sub(self.started_at)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_game_won(&self) -> bool {
        self.game_won
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = multiplier.max(0.0);
    }

    pub fn now(&self) -> Millis {
        self.now
    }
}
