/// Two stacked background tiles scrolling downward, wrapped so the seam
/// never shows.

#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundScroll {
    y1: f32,
    y2: f32,
    tile_height: f32,
    speed: f32,
}

/// Scroll speed in units per second.
pub const DEFAULT_SCROLL_SPEED: f32 = 720.0;

impl BackgroundScroll {
    pub fn new(tile_height: f32, speed: f32) -> Self {
        let tile_height = tile_height.max(1.0);
        Self {
            y1: 0.0,
            y2: -tile_height,
            tile_height,
            speed,
        }
    }

    pub fn update(&mut self, dt_ms: f32, speed_multiplier: f32) {
        let step = self.speed * speed_multiplier * dt_ms / 1000.0;
        self.y1 += step;
        self.y2 += step;
        if self.y1 >= self.tile_height {
            self.y1 = self.y2 - self.tile_height;
        }
        if self.y2 >= self.tile_height {
            self.y2 = self.y1 - self.tile_height;
        }
    }

    pub fn reset(&mut self) {
        self.y1 = 0.0;
        self.y2 = -self.tile_height;
    }

    /// Top edge of each tile.
    pub fn offsets(&self) -> (f32, f32) {
        (self.y1, self.y2)
    }

    pub fn tile_height(&self) -> f32 {
        self.tile_height
    }
}
