//! Water Surface - ripples and a fishing boat on an interactive water plane
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ripple registry, boat state machine, tick)
//! - `renderer`: GPU-ready packing of the per-frame output
//! - `platform`: Frame clock and the browser binding
//! - `settings`: Tunables with JSON/LocalStorage persistence

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{BoatTuning, RippleTuning, Settings, SettingsError};
pub use sim::{Surface, SurfaceEvent, SurfaceState};

use glam::Vec2;

/// Simulation configuration constants (defaults for `Settings`)
pub mod consts {
    /// Fixed step used by the headless runner (60 Hz, one animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta accepted from the host clock
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Water plane edge length (world units)
    pub const WATER_SIZE: f32 = 500.0;
    /// Strength of pointer and boat ripples
    pub const RIPPLE_STRENGTH: f32 = 3.0;
    /// Surface distortion passed through to the shader
    pub const DISTORTION_SCALE: f32 = 3.7;

    /// Minimum sim time between two accepted ripples (seconds)
    pub const RIPPLE_MIN_INTERVAL: f64 = 0.1;
    pub const MAX_RIPPLES: usize = 20;
    /// Multiplicative strength decay per tick
    pub const RIPPLE_DECAY: f32 = 0.98;
    /// Ripples weaker than this are dropped
    pub const RIPPLE_EXPIRY: f32 = 0.05;
    /// Radius growth (units/s) and cap
    pub const RIPPLE_GROWTH_RATE: f32 = 10.0;
    pub const RIPPLE_MAX_RADIUS: f32 = 20.0;
    pub const RIPPLE_START_RADIUS: f32 = 0.1;
    /// Ripple slots in the GPU buffer; `MAX_RIPPLES` may not exceed this
    pub const MAX_RIPPLE_SLOTS: usize = 32;

    /// Boat cruise speed (units/s)
    pub const BOAT_SPEED: f32 = 0.5;
    /// Seconds spent moving before casting the line
    pub const MOVEMENT_DURATION: f32 = 15.0;
    /// Seconds spent fishing before moving on
    pub const FISHING_DURATION: f32 = 10.0;
    /// Distance kept from the water edge
    pub const BOUNDARY_MARGIN: f32 = 15.0;
    /// Per-tick chance of a wake ripple while moving
    pub const WAKE_CHANCE: f64 = 0.1;
    /// Wake ripples spawn this far behind the boat
    pub const WAKE_OFFSET: f32 = 8.0;
    /// Per-tick chance of a ripple at the line end while fishing
    pub const LINE_RIPPLE_CHANCE: f64 = 0.02;
    /// Line end sits this far along +x from the boat
    pub const LINE_OFFSET: f32 = 4.0;
    /// Line end depth when not bobbing
    pub const LINE_REST_DEPTH: f32 = -5.0;
    pub const LINE_BOB_AMPLITUDE: f32 = 0.5;
    /// Bobbing angular frequency (rad/s)
    pub const LINE_BOB_FREQUENCY: f32 = 3.0;
}

/// Unit heading on the water plane from an angle (x = cos, z = sin)
#[inline]
pub fn heading_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Yaw that turns a +z facing model toward `heading`
#[inline]
pub fn yaw_from_heading(heading: Vec2) -> f32 {
    heading.x.atan2(heading.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_heading_is_unit() {
        for i in 0..16 {
            let h = heading_from_angle(i as f32 * PI / 8.0);
            assert!((h.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_yaw_from_heading() {
        assert!(yaw_from_heading(Vec2::new(0.0, 1.0)).abs() < 1e-6);
        assert!((yaw_from_heading(Vec2::new(1.0, 0.0)) - FRAC_PI_2).abs() < 1e-6);
    }
}
