/// Core of a scrolling top-down arcade shooter.
///
/// Everything that decides what happens in a frame lives here; the host only
/// supplies elapsed time, touch events, image handles and a sound sink, and
/// draws the returned `render::Frame`.

pub mod assets;
pub mod background;
pub mod collision;
pub mod config;
pub mod enemies;
pub mod engine;
pub mod entities;
pub mod high_scores;
pub mod level;
pub mod power_ups;
pub mod render;
pub mod sound;
pub mod state;
pub mod ui;

/// Simulated monotonic time in milliseconds, owned by the engine.
pub type Millis = u64;
