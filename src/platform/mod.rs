//! Platform abstraction layer
//!
//! Handles the host side of the loop:
//! - Frame timing (host timestamps to sanitized deltas)
//! - Browser binding (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::MAX_FRAME_DT;

/// Treat non-finite or negative deltas as "no time passed"
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

/// Turns host timestamps (milliseconds, e.g. from requestAnimationFrame)
/// into per-frame deltas in seconds.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous frame, capped at `MAX_FRAME_DT` so a
    /// backgrounded tab does not fast-forward the simulation. The first
    /// frame yields 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(match self.last_ms {
                Some(last) => last.max(now_ms),
                None => now_ms,
            });
        }
        sanitize_dt(dt).min(MAX_FRAME_DT)
    }
}
