//! Browser binding
//!
//! The page owns the scene and calls `frame` from requestAnimationFrame;
//! pointer hits on the water mesh go to `pointer_ripple`.

use wasm_bindgen::prelude::*;

use super::FrameClock;
use crate::renderer::SurfaceUniforms;
use crate::settings::Settings;
use crate::sim::{BoatMode, Surface};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Water surface (web) starting...");
}

fn to_js_error(err: crate::SettingsError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WaterSurface {
    surface: Surface,
    clock: FrameClock,
    uniforms: SurfaceUniforms,
}

#[wasm_bindgen]
impl WaterSurface {
    /// Seed is optional; without one a random seed is drawn
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u32>) -> Result<WaterSurface, JsValue> {
        let seed = seed.unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u32);
        let settings = Settings::load();
        log::info!("Surface seed {seed}, water size {}", settings.water_size);
        let surface = Surface::new(settings, seed as u64).map_err(to_js_error)?;
        let uniforms = SurfaceUniforms::from_state(surface.state(), surface.settings());
        Ok(WaterSurface {
            surface,
            clock: FrameClock::new(),
            uniforms,
        })
    }

    /// Advance to the host timestamp (ms) and refresh the packed output
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.advance(now_ms);
        self.surface.on_tick(dt);
        self.uniforms = SurfaceUniforms::from_state(self.surface.state(), self.surface.settings());
    }

    /// Pointer intersection with the water plane in world (x, z)
    pub fn pointer_ripple(&mut self, x: f32, z: f32) -> bool {
        self.surface.on_pointer_ripple(x, z)
    }

    pub fn set_water_size(&mut self, size: f32) -> Result<(), JsValue> {
        self.surface.resize(size).map_err(to_js_error)?;
        self.surface.settings().save();
        Ok(())
    }

    pub fn set_ripple_strength(&mut self, strength: f32) -> Result<(), JsValue> {
        self.surface.set_ripple_strength(strength).map_err(to_js_error)?;
        self.surface.settings().save();
        Ok(())
    }

    pub fn set_distortion_scale(&mut self, scale: f32) -> Result<(), JsValue> {
        self.surface.set_distortion_scale(scale).map_err(to_js_error)?;
        self.surface.settings().save();
        Ok(())
    }

    pub fn boat_x(&self) -> f32 {
        self.surface.state().boat.pos.x
    }

    pub fn boat_z(&self) -> f32 {
        self.surface.state().boat.pos.y
    }

    pub fn boat_yaw(&self) -> f32 {
        self.surface.state().boat.yaw()
    }

    pub fn is_fishing(&self) -> bool {
        self.surface.state().boat.mode == BoatMode::Fishing
    }

    pub fn line_visible(&self) -> bool {
        self.surface.state().boat.line_visible
    }

    pub fn line_depth(&self) -> f32 {
        self.surface.state().boat.line_depth
    }

    pub fn distortion_scale(&self) -> f32 {
        self.surface.settings().distortion_scale
    }

    /// Live ripples as a flat `[x, z, strength, radius, ...]` array
    pub fn ripple_data(&self) -> Vec<f32> {
        bytemuck::cast_slice(self.uniforms.live_ripples()).to_vec()
    }

    pub fn ripple_count(&self) -> u32 {
        self.uniforms.globals.ripple_count
    }

    /// Globals, boat and ripple blocks back to back, ready for upload
    pub fn uniform_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(
            self.uniforms.globals_bytes().len()
                + self.uniforms.boat_bytes().len()
                + self.uniforms.ripple_bytes().len(),
        );
        bytes.extend_from_slice(self.uniforms.globals_bytes());
        bytes.extend_from_slice(self.uniforms.boat_bytes());
        bytes.extend_from_slice(self.uniforms.ripple_bytes());
        bytes
    }
}
