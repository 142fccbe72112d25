//! Render-side data for the surface shader
//!
//! Drawing itself belongs to the host page; this module only packs the
//! per-frame state into GPU buffer layouts.

pub mod uniforms;

pub use uniforms::{BoatData, RippleData, SurfaceGlobals, SurfaceUniforms};
