//! Surface settings and simulation tunables
//!
//! Persisted as JSON: LocalStorage on the web, a file natively.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Settings load/validation failure
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a positive number, got {value}")))
    }
}

fn require_chance(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("must be within [0, 1], got {value}")))
    }
}

/// Ripple registry tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleTuning {
    /// Minimum sim time between accepted ripples (seconds)
    pub min_interval: f64,
    /// Live ripple cap; the oldest is evicted past this
    pub max_count: usize,
    /// Strength multiplier applied every tick
    pub decay: f32,
    /// Ripples below this strength are removed
    pub expiry_threshold: f32,
    /// Radius growth in units per second of age
    pub growth_rate: f32,
    pub max_radius: f32,
    pub start_radius: f32,
}

impl Default for RippleTuning {
    fn default() -> Self {
        Self {
            min_interval: RIPPLE_MIN_INTERVAL,
            max_count: MAX_RIPPLES,
            decay: RIPPLE_DECAY,
            expiry_threshold: RIPPLE_EXPIRY,
            growth_rate: RIPPLE_GROWTH_RATE,
            max_radius: RIPPLE_MAX_RADIUS,
            start_radius: RIPPLE_START_RADIUS,
        }
    }
}

impl RippleTuning {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.min_interval.is_finite() && self.min_interval >= 0.0) {
            return Err(invalid("ripples.min_interval", "must be a non-negative number"));
        }
        if self.max_count == 0 || self.max_count > MAX_RIPPLE_SLOTS {
            return Err(invalid(
                "ripples.max_count",
                format!("must be within 1..={MAX_RIPPLE_SLOTS}, got {}", self.max_count),
            ));
        }
        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(invalid("ripples.decay", format!("must be within (0, 1), got {}", self.decay)));
        }
        require_positive("ripples.expiry_threshold", self.expiry_threshold)?;
        require_positive("ripples.growth_rate", self.growth_rate)?;
        require_positive("ripples.max_radius", self.max_radius)?;
        if !(self.start_radius.is_finite() && self.start_radius >= 0.0) {
            return Err(invalid("ripples.start_radius", "must be a non-negative number"));
        }
        if self.start_radius > self.max_radius {
            return Err(invalid("ripples.start_radius", "must not exceed ripples.max_radius"));
        }
        Ok(())
    }
}

/// Boat behaviour tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoatTuning {
    pub speed: f32,
    pub movement_duration: f32,
    pub fishing_duration: f32,
    /// Distance kept from the water edge before bouncing
    pub boundary_margin: f32,
    pub wake_chance: f64,
    pub wake_offset: f32,
    pub line_ripple_chance: f64,
    pub line_offset: f32,
    pub line_rest_depth: f32,
    pub line_bob_amplitude: f32,
    pub line_bob_frequency: f32,
}

impl Default for BoatTuning {
    fn default() -> Self {
        Self {
            speed: BOAT_SPEED,
            movement_duration: MOVEMENT_DURATION,
            fishing_duration: FISHING_DURATION,
            boundary_margin: BOUNDARY_MARGIN,
            wake_chance: WAKE_CHANCE,
            wake_offset: WAKE_OFFSET,
            line_ripple_chance: LINE_RIPPLE_CHANCE,
            line_offset: LINE_OFFSET,
            line_rest_depth: LINE_REST_DEPTH,
            line_bob_amplitude: LINE_BOB_AMPLITUDE,
            line_bob_frequency: LINE_BOB_FREQUENCY,
        }
    }
}

impl BoatTuning {
    pub fn validate(&self) -> Result<(), SettingsError> {
        require_positive("boat.speed", self.speed)?;
        require_positive("boat.movement_duration", self.movement_duration)?;
        require_positive("boat.fishing_duration", self.fishing_duration)?;
        if !(self.boundary_margin.is_finite() && self.boundary_margin >= 0.0) {
            return Err(invalid("boat.boundary_margin", "must be a non-negative number"));
        }
        require_chance("boat.wake_chance", self.wake_chance)?;
        require_chance("boat.line_ripple_chance", self.line_ripple_chance)?;
        for (field, value) in [
            ("boat.wake_offset", self.wake_offset),
            ("boat.line_offset", self.line_offset),
            ("boat.line_rest_depth", self.line_rest_depth),
            ("boat.line_bob_amplitude", self.line_bob_amplitude),
            ("boat.line_bob_frequency", self.line_bob_frequency),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }
        Ok(())
    }
}

/// Surface settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Edge length of the square water plane
    pub water_size: f32,
    /// Strength given to new ripples (pointer and boat)
    pub ripple_strength: f32,
    /// Forwarded to the surface shader
    pub distortion_scale: f32,
    pub ripples: RippleTuning,
    pub boat: BoatTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            water_size: WATER_SIZE,
            ripple_strength: RIPPLE_STRENGTH,
            distortion_scale: DISTORTION_SCALE,
            ripples: RippleTuning::default(),
            boat: BoatTuning::default(),
        }
    }
}

impl Settings {
    /// Half-extent the boat may reach before bouncing
    pub fn boundary(&self) -> f32 {
        self.water_size / 2.0 - self.boat.boundary_margin
    }

    /// Check every tunable; the simulation assumes validated settings
    pub fn validate(&self) -> Result<(), SettingsError> {
        require_positive("ripple_strength", self.ripple_strength)?;
        if !(self.distortion_scale.is_finite() && self.distortion_scale >= 0.0) {
            return Err(invalid("distortion_scale", "must be a non-negative number"));
        }
        self.ripples.validate()?;
        self.boat.validate()?;
        if !(self.water_size.is_finite() && self.boundary() > 0.0) {
            return Err(invalid(
                "water_size",
                format!(
                    "must exceed twice the boundary margin ({}), got {}",
                    self.boat.boundary_margin * 2.0,
                    self.water_size
                ),
            ));
        }
        Ok(())
    }

    /// Parse and validate settings; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Write settings to a JSON file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "water_surface_settings";

    /// Environment variable naming the native settings file
    pub const PATH_ENV: &'static str = "WATER_SURFACE_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(err) => log::warn!("Ignoring stored settings: {err}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load from the file named by `WATER_SURFACE_SETTINGS`, else defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Some(path) = std::env::var_os(Self::PATH_ENV) else {
            return;
        };
        match self.save_to(&path) {
            Ok(()) => log::info!("Settings saved"),
            Err(err) => log::warn!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.boundary(), 235.0);
        assert_eq!(settings.ripples.max_count, 20);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let settings = Settings::from_json(r#"{ "water_size": 300.0, "boat": { "speed": 2.0 } }"#).unwrap();
        assert_eq!(settings.water_size, 300.0);
        assert_eq!(settings.boat.speed, 2.0);
        assert_eq!(settings.boat.fishing_duration, FISHING_DURATION);
        assert_eq!(settings.ripples, RippleTuning::default());
    }

    #[test]
    fn test_rejects_water_smaller_than_margin() {
        let err = Settings::from_json(r#"{ "water_size": 30.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "water_size", .. }));
    }

    #[test]
    fn test_rejects_bad_tunables() {
        let mut settings = Settings::default();
        settings.ripples.decay = 1.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.ripples.max_count = MAX_RIPPLE_SLOTS + 1;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.boat.wake_chance = 1.5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.ripples.start_radius = 25.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(Settings::from_json("{ nope"), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.ripple_strength = 1.5;
        settings.boat.movement_duration = 4.0;
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
