use super::Body;
use crate::Millis;

/// Purely cosmetic burst left behind by a kill or a splash.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub(crate) body: Body,
    started_at: Millis,
    duration_ms: Millis,
}

impl Explosion {
    /// Centred on `(cx, cy)`.
    pub fn new(cx: f32, cy: f32, w: f32, h: f32, now: Millis, duration_ms: Millis) -> Self {
        Self {
            body: Body::new(cx - w / 2.0, cy - h / 2.0, w, h),
            started_at: now,
            duration_ms,
        }
    }

    pub fn update(&mut self, now: Millis) {
        if now.saturating_sub(self.started_at) >= self.duration_ms {
            self.body.active = false;
        }
    }

    /// Fraction of the lifetime already elapsed, in `[0, 1]`.
    pub fn progress(&self, now: Millis) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at) as f32;
        (elapsed / self.duration_ms as f32).min(1.0)
    }

    pub fn started_at(&self) -> Millis {
        self.started_at
    }

    pub fn duration_ms(&self) -> Millis {
        self.duration_ms
    }
}
