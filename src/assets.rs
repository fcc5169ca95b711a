/// Image handles, per-level sprite bundles and the background loader.
///
/// The core never decodes images. A [`ResourceProvider`] answers "which image
/// plays this role on this level", and anything it cannot answer becomes a
/// coloured placeholder so a frame can always be drawn.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

use crate::entities::PowerUpKind;
use crate::render::Color;

// ── Roles and handles ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetRole {
    Background,
    Player,
    Enemy,
    Boss,
    Bullet,
    Laser,
    PowerUp(PowerUpKind),
    Explosion,
    Buttons,
    GameOver,
    Win,
}

impl AssetRole {
    pub fn all() -> Vec<AssetRole> {
        let mut roles = vec![
            AssetRole::Background,
            AssetRole::Player,
            AssetRole::Enemy,
            AssetRole::Boss,
            AssetRole::Bullet,
            AssetRole::Laser,
            AssetRole::Explosion,
            AssetRole::Buttons,
            AssetRole::GameOver,
            AssetRole::Win,
        ];
        roles.extend(PowerUpKind::ALL.into_iter().map(AssetRole::PowerUp));
        roles
    }

    fn placeholder(self) -> Sprite {
        let (color, striped) = match self {
            AssetRole::Background => (Color::rgb(20, 40, 30), true),
            AssetRole::Player => (Color::BLUE, false),
            AssetRole::Enemy => (Color::RED, false),
            AssetRole::Boss => (Color::MAGENTA, false),
            AssetRole::Bullet => (Color::YELLOW, false),
            AssetRole::Laser => (Color::CYAN, false),
            AssetRole::PowerUp(_) => (Color::GREEN, false),
            AssetRole::Explosion => (Color::ORANGE, false),
            AssetRole::Buttons => (Color::GREY, false),
            AssetRole::GameOver => (Color::BLACK, false),
            AssetRole::Win => (Color::BLACK, false),
        };
        Sprite::Placeholder { color, striped }
    }
}

/// Opaque reference to a decoded image owned by the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    pub key: String,
    pub width: u32,
    pub height: u32,
}

impl ImageHandle {
    pub fn new(key: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            key: key.into(),
            width,
            height,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Sprite {
    Image(ImageHandle),
    /// Drawn as a filled rect; striped for backgrounds.
    Placeholder { color: Color, striped: bool },
}

impl Sprite {
    pub fn size(&self) -> Option<(f32, f32)> {
        match self {
            Sprite::Image(h) => Some((h.width as f32, h.height as f32)),
            Sprite::Placeholder { .. } => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Sprite::Placeholder { .. })
    }
}

// ── Providers ────────────────────────────────────────────────────────────────

pub trait ResourceProvider: Send + Sync {
    fn bitmap_for(&self, level: u32, role: AssetRole) -> Option<ImageHandle>;
}

/// Provides nothing; every role renders as a placeholder.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoResources;

impl ResourceProvider for NoResources {
    fn bitmap_for(&self, _level: u32, _role: AssetRole) -> Option<ImageHandle> {
        None
    }
}

/// Lookup table keyed by role, with optional per-level overrides.
#[derive(Clone, Debug, Default)]
pub struct KeyedResources {
    shared: HashMap<AssetRole, ImageHandle>,
    per_level: HashMap<(u32, AssetRole), ImageHandle>,
}

impl KeyedResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: AssetRole, handle: ImageHandle) -> Self {
        self.shared.insert(role, handle);
        self
    }

    pub fn with_level(mut self, level: u32, role: AssetRole, handle: ImageHandle) -> Self {
        self.per_level.insert((level, role), handle);
        self
    }
}

impl ResourceProvider for KeyedResources {
    fn bitmap_for(&self, level: u32, role: AssetRole) -> Option<ImageHandle> {
        self.per_level
            .get(&(level, role))
            .or_else(|| self.shared.get(&role))
            .cloned()
    }
}

// ── Bundles ──────────────────────────────────────────────────────────────────

/// Every sprite a level needs, resolved up front.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetBundle {
    level: u32,
    sprites: HashMap<AssetRole, Sprite>,
}

impl AssetBundle {
    pub fn load(provider: &dyn ResourceProvider, level: u32) -> Self {
        let mut sprites = HashMap::new();
        let mut missing = 0usize;
        for role in AssetRole::all() {
            let sprite = match provider.bitmap_for(level, role) {
                Some(handle) => Sprite::Image(handle),
                None => {
                    missing += 1;
                    role.placeholder()
                }
            };
            sprites.insert(role, sprite);
        }
        if missing > 0 {
            warn!(level, missing, "assets missing, using placeholders");
        } else {
            debug!(level, "assets loaded");
        }
        AssetBundle { level, sprites }
    }

    /// All-placeholder bundle, usable before anything has loaded.
    pub fn placeholder(level: u32) -> Self {
        AssetBundle {
            level,
            sprites: AssetRole::all()
                .into_iter()
                .map(|role| (role, role.placeholder()))
                .collect(),
        }
    }

    pub fn sprite(&self, role: AssetRole) -> Sprite {
        self.sprites
            .get(&role)
            .cloned()
            .unwrap_or_else(|| role.placeholder())
    }

    pub fn size(&self, role: AssetRole) -> Option<(f32, f32)> {
        self.sprites.get(&role).and_then(Sprite::size)
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

// ── Background loading ───────────────────────────────────────────────────────

/// Builds a bundle on a worker thread and hands it over once, through a
/// channel polled by the frame loop. Loads are never cancelled.
#[derive(Debug, Default)]
pub struct AssetLoader {
    pending: Option<(u32, Receiver<AssetBundle>)>,
}

impl AssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `level`. A load already in flight is abandoned; its
    /// result is discarded when it arrives.
    pub fn start(&mut self, provider: Arc<dyn ResourceProvider>, level: u32) {
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name(format!("assets-level-{}", level))
            .spawn(move || {
                let bundle = AssetBundle::load(provider.as_ref(), level);
                // Receiver gone means the engine moved on.
                let _ = tx.send(bundle);
            });
        match spawned {
            Ok(_) => self.pending = Some((level, rx)),
            Err(e) => {
                warn!(level, error = %e, "could not start asset loader, keeping current assets");
                self.pending = None;
            }
        }
    }

    /// The finished bundle, at most once per `start`. A loader that died
    /// yields nothing and the caller keeps its current bundle.
    pub fn poll(&mut self) -> Option<AssetBundle> {
        let (level, rx) = self.pending.as_ref()?;
        match rx.try_recv() {
            Ok(bundle) => {
                self.pending = None;
                Some(bundle)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!(level = *level, "asset load failed, keeping previous assets");
                self.pending = None;
                None
            }
        }
    }

    /// Block until the in-flight load finishes.
    pub fn wait(&mut self) -> Option<AssetBundle> {
        let (level, rx) = self.pending.take()?;
        match rx.recv() {
            Ok(bundle) => Some(bundle),
            Err(_) => {
                warn!(level, "asset load failed, keeping previous assets");
                None
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}
