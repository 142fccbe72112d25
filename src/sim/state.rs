//! Surface state and simulation events
//!
//! Everything the renderer reads between ticks lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boat::{Boat, BoatMode};
use super::ripple::{RippleRegistry, RippleSource};
use crate::settings::Settings;

/// Observable change produced by a tick or a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    RippleSpawned {
        pos: Vec2,
        strength: f32,
        source: RippleSource,
    },
    RipplesExpired { count: usize },
    BoatBounced { pos: Vec2 },
    ModeChanged { mode: BoatMode },
}

/// Complete simulation state (serializable snapshot)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceState {
    /// Sim clock in seconds (sum of sanitized deltas)
    pub time: f64,
    /// Non-empty ticks processed
    pub ticks: u64,
    pub ripples: RippleRegistry,
    pub boat: Boat,
}

impl SurfaceState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            time: 0.0,
            ticks: 0,
            ripples: RippleRegistry::new(),
            boat: Boat::new(&settings.boat),
        }
    }
}
