//! Surface controller
//!
//! Owns the state, the settings and the random source. Hosts talk to the
//! simulation only through these methods.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ripple::RippleSource;
use super::state::{SurfaceEvent, SurfaceState};
use super::tick::tick;
use crate::settings::{Settings, SettingsError};

pub struct Surface<R = Pcg32> {
    state: SurfaceState,
    settings: Settings,
    rng: R,
    /// Latest tick's events, then pointer ripples since
    events: Vec<SurfaceEvent>,
}

impl Surface<Pcg32> {
    /// Create a surface with a seeded PCG random source
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        Self::with_rng(settings, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Surface<R> {
    /// Create a surface with an injected random source. Settings are
    /// validated here; the tick relies on them being in range.
    pub fn with_rng(settings: Settings, rng: R) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            state: SurfaceState::new(&settings),
            settings,
            rng,
            events: Vec::new(),
        })
    }

    /// Pointer hit the water at (x, z). Returns false if rate limited.
    pub fn on_pointer_ripple(&mut self, x: f32, z: f32) -> bool {
        let pos = Vec2::new(x, z);
        let strength = self.settings.ripple_strength;
        let accepted = self
            .state
            .ripples
            .add(pos, strength, self.state.time, &self.settings.ripples);
        if accepted {
            self.events.push(SurfaceEvent::RippleSpawned {
                pos,
                strength,
                source: RippleSource::Pointer,
            });
        }
        accepted
    }

    /// Advance one frame and return the events it produced
    pub fn on_tick(&mut self, dt: f32) -> &[SurfaceEvent] {
        self.events.clear();
        tick(
            &mut self.state,
            &self.settings,
            dt,
            &mut self.rng,
            &mut self.events,
        );
        &self.events
    }

    /// Change the water size. Live ripples are dropped and the boat is
    /// pulled inside the new boundary.
    pub fn resize(&mut self, water_size: f32) -> Result<(), SettingsError> {
        let mut settings = self.settings.clone();
        settings.water_size = water_size;
        settings.validate()?;
        self.settings = settings;

        self.state.ripples.clear();
        self.state.boat.confine(self.settings.boundary());
        log::info!("Water resized to {water_size}");
        Ok(())
    }

    pub fn set_ripple_strength(&mut self, strength: f32) -> Result<(), SettingsError> {
        let mut settings = self.settings.clone();
        settings.ripple_strength = strength;
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn set_distortion_scale(&mut self, scale: f32) -> Result<(), SettingsError> {
        let mut settings = self.settings.clone();
        settings.distortion_scale = scale;
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Copy of the current state for a reader on another thread
    pub fn snapshot(&self) -> SurfaceState {
        self.state.clone()
    }

    /// Events of the latest tick plus pointer ripples accepted after it
    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }
}
