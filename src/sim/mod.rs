//! Deterministic simulation module
//!
//! All surface logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Injected, seedable RNG only
//! - Ripples iterate in insertion order
//! - No rendering or platform dependencies

pub mod boat;
pub mod ripple;
pub mod state;
pub mod surface;
pub mod tick;

pub use boat::{Boat, BoatMode, BoatUpdate};
pub use ripple::{Ripple, RippleRegistry, RippleSource};
pub use state::{SurfaceEvent, SurfaceState};
pub use surface::Surface;
pub use tick::tick;
