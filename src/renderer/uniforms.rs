//! GPU-ready per-frame data
//!
//! Layouts match the uniform blocks of the surface shader (std140-friendly,
//! 16-byte rows).

use bytemuck::{Pod, Zeroable};

use crate::consts::MAX_RIPPLE_SLOTS;
use crate::settings::Settings;
use crate::sim::SurfaceState;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SurfaceGlobals {
    pub time: f32,             // offset 0
    pub distortion_scale: f32, // offset 4
    pub water_size: f32,       // offset 8
    pub ripple_count: u32,     // offset 12
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct RippleData {
    pub pos: [f32; 2],
    pub strength: f32,
    pub radius: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BoatData {
    pub pos: [f32; 2],
    pub yaw: f32,
    pub line_depth: f32,
    pub fishing: u32,      // 1 while fishing
    pub line_visible: u32, // 1 when the line is drawn
    pub _pad: [u32; 2],    // Pad to 32 bytes
}

/// Everything the renderer uploads for one frame
#[derive(Clone, Debug)]
pub struct SurfaceUniforms {
    pub globals: SurfaceGlobals,
    pub boat: BoatData,
    /// Oldest first; slots past `globals.ripple_count` are zeroed
    pub ripples: [RippleData; MAX_RIPPLE_SLOTS],
}

impl SurfaceUniforms {
    pub fn from_state(state: &SurfaceState, settings: &Settings) -> Self {
        let mut ripples = [RippleData::default(); MAX_RIPPLE_SLOTS];
        let mut count = 0;
        for (slot, ripple) in ripples.iter_mut().zip(state.ripples.iter()) {
            *slot = RippleData {
                pos: ripple.pos.to_array(),
                strength: ripple.strength,
                radius: ripple.radius,
            };
            count += 1;
        }

        let boat = &state.boat;
        Self {
            globals: SurfaceGlobals {
                time: state.time as f32,
                distortion_scale: settings.distortion_scale,
                water_size: settings.water_size,
                ripple_count: count as u32,
            },
            boat: BoatData {
                pos: boat.pos.to_array(),
                yaw: boat.yaw(),
                line_depth: boat.line_depth,
                fishing: boat.is_fishing() as u32,
                line_visible: boat.line_visible as u32,
                _pad: [0; 2],
            },
            ripples,
        }
    }

    pub fn globals_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.globals)
    }

    pub fn boat_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.boat)
    }

    pub fn ripple_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.ripples)
    }

    /// Only the live ripples
    pub fn live_ripples(&self) -> &[RippleData] {
        &self.ripples[..self.globals.ripple_count as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Surface;
    use crate::sim::boat::tests::ConstRng;

    #[test]
    fn test_layout_sizes() {
        assert_eq!(std::mem::size_of::<SurfaceGlobals>(), 16);
        assert_eq!(std::mem::size_of::<RippleData>(), 16);
        assert_eq!(std::mem::size_of::<BoatData>(), 32);
    }

    #[test]
    fn test_packs_live_ripples_oldest_first() {
        let mut surface = Surface::with_rng(Settings::default(), ConstRng(u64::MAX)).unwrap();
        surface.on_pointer_ripple(1.0, 2.0);
        surface.on_tick(0.5);
        surface.on_pointer_ripple(-3.0, 4.0);

        let uniforms = SurfaceUniforms::from_state(surface.state(), surface.settings());
        let live = uniforms.live_ripples();
        assert_eq!(live.len(), surface.state().ripples.len());
        assert_eq!(live[0].pos, [1.0, 2.0]);
        assert_eq!(live.last().unwrap().pos, [-3.0, 4.0]);
        assert_eq!(uniforms.ripples[live.len()], RippleData::default());
        assert_eq!(uniforms.ripple_bytes().len(), 16 * MAX_RIPPLE_SLOTS);
    }

    #[test]
    fn test_globals_and_boat() {
        let mut surface = Surface::new(Settings::default(), 5).unwrap();
        surface.on_tick(0.25);
        let uniforms = SurfaceUniforms::from_state(surface.state(), surface.settings());

        assert_eq!(uniforms.globals.time, 0.25);
        assert_eq!(uniforms.globals.water_size, 500.0);
        assert_eq!(uniforms.globals.distortion_scale, 3.7);
        assert_eq!(uniforms.boat.fishing, 0);
        assert_eq!(uniforms.boat.line_visible, 0);
        assert_eq!(uniforms.boat.pos, surface.state().boat.pos.to_array());
        assert_eq!(uniforms.globals_bytes().len(), 16);
        assert_eq!(uniforms.boat_bytes().len(), 32);
    }
}
