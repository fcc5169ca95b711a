mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use temple_shooter::config::GameConfig;
use temple_shooter::engine::{GameEngine, Services, TouchEvent};
use temple_shooter::high_scores::HighScoreStore;
use temple_shooter::sound::LoggedSound;
use temple_shooter::ui::{self, UiAction};

use display::{GlyphResources, Viewport};

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// OS key repeat is ≥ 15 Hz, so 8 frames (≈130 ms) is always refreshed.
const HOLD_WINDOW: u64 = 8;

/// World units the keyboard cursor moves per frame while an arrow is held.
const KEY_STEP: f32 = 40.0;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Paths and logging ────────────────────────────────────────────────────────

fn config_path() -> PathBuf {
    std::env::var_os("TEMPLE_SHOOTER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("temple_shooter.ron"))
}

fn high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".temple_shooter_scores.ron")
}

/// stdout is the game screen, so logs go to a file.
fn init_logging() -> Result<PathBuf> {
    let path = std::env::temp_dir().join("temple_shooter.log");
    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(path)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    HighScores,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    best: u32,
) -> std::io::Result<MenuResult> {
    display::draw_menu(out, best)?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('h') | KeyCode::Char('H') => return Ok(MenuResult::HighScores),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

fn show_high_scores<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    engine: &mut GameEngine,
) -> std::io::Result<()> {
    loop {
        display::draw_high_scores(out, engine.high_scores().list())?;
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind, .. })) if kind == KeyEventKind::Press => {
                if matches!(code, KeyCode::Char('c') | KeyCode::Char('C')) {
                    engine.high_scores_mut().clear();
                    continue;
                }
                return Ok(());
            }
            Ok(_) => {}
            Err(_) => return Ok(()),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum SessionEnd {
    Quit,
    Menu,
    HighScores,
}

/// Press a terminal-screen button from the keyboard by touching its centre.
fn press_button(engine: &mut GameEngine, wanted: &[UiAction]) {
    if !engine.state().is_terminal() {
        return;
    }
    let (w, h) = engine.screen_size();
    let buttons = if engine.state().is_game_won() {
        ui::win_buttons(w, h)
    } else {
        ui::game_over_buttons(w, h)
    };
    if let Some(button) = buttons.iter().find(|b| wanted.contains(&b.action)) {
        let (x, y) = button.rect.center();
        engine.handle_touch(TouchEvent::down(x, y));
    }
}

/// Input model: mouse presses and drags are forwarded as touches. The
/// keyboard drives a virtual finger: while an arrow or Space is held the
/// finger is down at the cursor, which arrows move every frame.
fn game_loop<W: Write>(
    out: &mut W,
    engine: &mut GameEngine,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<SessionEnd> {
    let (world_w, world_h) = engine.screen_size();
    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, world_w, world_h);
    let target = Duration::from_millis(engine.config().timing.target_frame_ms);

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut mouse_down = false;
    let mut keys_down = false;
    let mut finger = engine.player().center();
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(SessionEnd::Quit);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(SessionEnd::Quit);
                            }
                            KeyCode::Char('p') | KeyCode::Char('P') => {
                                if engine.state().is_paused() {
                                    engine.resume();
                                } else {
                                    engine.pause();
                                }
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') => {
                                press_button(engine, &[UiAction::Replay]);
                            }
                            KeyCode::Char('m') | KeyCode::Char('M') => {
                                press_button(engine, &[UiAction::Menu]);
                            }
                            KeyCode::Char('h') | KeyCode::Char('H') => {
                                press_button(engine, &[UiAction::Home, UiAction::HighScores]);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    let (x, y) = view.to_world(column, row);
                    match kind {
                        MouseEventKind::Down(MouseButton::Left)
                        | MouseEventKind::Drag(MouseButton::Left) => {
                            mouse_down = true;
                            finger = (x, y);
                            engine.handle_touch(TouchEvent::down(x, y));
                        }
                        MouseEventKind::Up(MouseButton::Left) => {
                            mouse_down = false;
                            engine.handle_touch(TouchEvent::up(x, y));
                        }
                        _ => {}
                    }
                }
                Event::Resize(cols, rows) => {
                    view = Viewport::new(cols, rows, world_w, world_h);
                }
                _ => {}
            }
        }

        // ── Keyboard finger ───────────────────────────────────────────────────
        if !mouse_down && !engine.state().is_terminal() {
            let left = any_held(&key_frame, &[KeyCode::Left, KeyCode::Char('a')], frame);
            let right = any_held(&key_frame, &[KeyCode::Right, KeyCode::Char('d')], frame);
            let up = any_held(&key_frame, &[KeyCode::Up, KeyCode::Char('w')], frame);
            let down = any_held(&key_frame, &[KeyCode::Down, KeyCode::Char('s')], frame);
            let fire = is_held(&key_frame, &KeyCode::Char(' '), frame);

            if left || right || up || down || fire {
                if !keys_down {
                    finger = engine.player().center();
                }
                let dx = (right as i32 - left as i32) as f32 * KEY_STEP;
                let dy = (down as i32 - up as i32) as f32 * KEY_STEP;
                finger = (
                    (finger.0 + dx).clamp(0.0, world_w),
                    (finger.1 + dy).clamp(0.0, world_h),
                );
                engine.handle_touch(TouchEvent::down(finger.0, finger.1));
                keys_down = true;
            } else if keys_down {
                engine.handle_touch(TouchEvent::up(finger.0, finger.1));
                keys_down = false;
            }
        }

        let tick = Instant::now();
        let delta_ms = tick.duration_since(last_tick).as_secs_f32() * 1000.0;
        last_tick = tick;
        engine.update(delta_ms);

        match engine.take_pending_action() {
            Some(UiAction::HighScores) => return Ok(SessionEnd::HighScores),
            Some(UiAction::Home) | Some(UiAction::Menu) => return Ok(SessionEnd::Menu),
            // Replay is handled inside the engine.
            Some(UiAction::Replay) | None => {}
        }

        display::render(out, &engine.render(), &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < target {
            thread::sleep(target - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let log_path = init_logging()?;
    let config = GameConfig::load_or_default(&config_path());
    info!(log = %log_path.display(), "starting");

    let services = Services {
        resources: Arc::new(GlyphResources),
        sound: Box::new(LoggedSound),
        scores: HighScoreStore::file(high_score_path()),
    };
    let mut engine = GameEngine::new(config, services, StdRng::from_entropy());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                warn!(error = %e, "input reader stopped");
                break;
            }
        }
    });

    let result = run(&mut out, &mut engine, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, engine: &mut GameEngine, rx: &mpsc::Receiver<Event>) -> Result<()> {
    loop {
        match show_menu(out, rx, engine.high_scores().best())? {
            MenuResult::Quit => break,
            MenuResult::HighScores => show_high_scores(out, rx, engine)?,
            MenuResult::Start => {
                engine.reset();
                engine.resume();
                match game_loop(out, engine, rx).context("game loop")? {
                    SessionEnd::Quit => break,
                    SessionEnd::HighScores => show_high_scores(out, rx, engine)?,
                    SessionEnd::Menu => {}
                }
                engine.pause();
            }
        }
    }
    engine.shutdown();
    info!("bye");
    Ok(())
}
