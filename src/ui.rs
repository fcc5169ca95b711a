/// Terminal-state buttons and the actions they hand to the host.

use crate::entities::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiAction {
    Replay,
    Home,
    Menu,
    HighScores,
}

impl UiAction {
    pub fn label(self) -> &'static str {
        match self {
            UiAction::Replay => "Replay",
            UiAction::Home => "Home",
            UiAction::Menu => "Menu",
            UiAction::HighScores => "High Scores",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub action: UiAction,
}

// ── Layouts ──────────────────────────────────────────────────────────────────

const GAME_OVER_SIZE: (f32, f32) = (250.0, 80.0);
const GAME_OVER_SPACING: f32 = 30.0;
const GAME_OVER_TOP_OFFSET: f32 = 100.0;

const WIN_SIZE: (f32, f32) = (200.0, 80.0);
const WIN_SPACING: f32 = 50.0;
const WIN_TOP_OFFSET: f32 = 200.0;

/// Replay, Home, Menu stacked vertically under the screen centre.
pub fn game_over_buttons(screen_w: f32, screen_h: f32) -> Vec<Button> {
    let (w, h) = GAME_OVER_SIZE;
    let x = (screen_w - w) / 2.0;
    let top = screen_h / 2.0 + GAME_OVER_TOP_OFFSET;
    [UiAction::Replay, UiAction::Home, UiAction::Menu]
        .into_iter()
        .enumerate()
        .map(|(i, action)| Button {
            rect: Rect::new(x, top + i as f32 * (h + GAME_OVER_SPACING), w, h),
            action,
        })
        .collect()
}

/// Replay, Menu, High Scores side by side.
pub fn win_buttons(screen_w: f32, screen_h: f32) -> Vec<Button> {
    let (w, h) = WIN_SIZE;
    let actions = [UiAction::Replay, UiAction::Menu, UiAction::HighScores];
    let total = actions.len() as f32 * w + (actions.len() - 1) as f32 * WIN_SPACING;
    let left = (screen_w - total) / 2.0;
    let y = screen_h / 2.0 + WIN_TOP_OFFSET;
    actions
        .into_iter()
        .enumerate()
        .map(|(i, action)| Button {
            rect: Rect::new(left + i as f32 * (w + WIN_SPACING), y, w, h),
            action,
        })
        .collect()
}

pub fn hit_test(buttons: &[Button], x: f32, y: f32) -> Option<UiAction> {
    buttons
        .iter()
        .find(|b| b.rect.contains(x, y))
        .map(|b| b.action)
}
