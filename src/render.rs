/// Host-agnostic draw list.
///
/// [`crate::engine::GameEngine::render`] returns a [`Frame`]: draw commands
/// tagged with the layer they belong to, already in back-to-front order. The
/// host only has to replay them onto its surface.

use crate::assets::Sprite;
use crate::entities::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(220, 40, 40);
    pub const GREEN: Color = Color::rgb(40, 200, 80);
    pub const BLUE: Color = Color::rgb(60, 120, 230);
    pub const CYAN: Color = Color::rgb(60, 220, 230);
    pub const YELLOW: Color = Color::rgb(240, 220, 60);
    pub const ORANGE: Color = Color::rgb(240, 140, 40);
    pub const MAGENTA: Color = Color::rgb(210, 60, 210);
    pub const GREY: Color = Color::rgb(120, 120, 120);
}

/// Draw order, back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Background,
    Player,
    Bullets,
    Enemies,
    PowerUps,
    Explosions,
    Hud,
    Overlay,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Blit { sprite: Sprite, rect: Rect },
    FillRect { rect: Rect, color: Color },
    Circle { cx: f32, cy: f32, radius: f32, color: Color },
    Text { x: f32, y: f32, size: f32, color: Color, text: String },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    commands: Vec<(Layer, DrawCommand)>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: Layer, command: DrawCommand) {
        self.commands.push((layer, command));
    }

    pub fn text(
        &mut self,
        layer: Layer,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
        text: impl Into<String>,
    ) {
        self.push(
            layer,
            DrawCommand::Text {
                x,
                y,
                size,
                color,
                text: text.into(),
            },
        );
    }

    pub fn commands(&self) -> &[(Layer, DrawCommand)] {
        &self.commands
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Layer, DrawCommand)> {
        self.commands.iter()
    }

    pub fn on_layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |(l, _)| *l == layer)
            .map(|(_, c)| c)
    }

    pub fn has_layer(&self, layer: Layer) -> bool {
        self.commands.iter().any(|(l, _)| *l == layer)
    }

    /// Every text string drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|(_, c)| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
