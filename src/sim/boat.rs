//! Boat agent: a two-mode state machine that cruises and fishes

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ripple::RippleSource;
use crate::settings::BoatTuning;
use crate::{heading_from_angle, yaw_from_heading};

/// Current behaviour of the boat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoatMode {
    /// Cruising along `heading`
    Moving,
    /// Stationary with the line in the water
    Fishing,
}

/// Result of a single boat update, consumed by the tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoatUpdate {
    /// Ripple the boat wants to place (wake or line)
    pub ripple: Option<(Vec2, RippleSource)>,
    /// Heading was reflected at the boundary
    pub bounced: bool,
    /// Mode entered this update, if any
    pub transition: Option<BoatMode>,
}

/// The boat entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boat {
    /// Position on the water plane (x, z)
    pub pos: Vec2,
    /// Unit direction of travel (x, z)
    pub heading: Vec2,
    pub mode: BoatMode,
    /// Seconds spent in the current mode
    pub mode_elapsed: f32,
    /// Whether the fishing line should be drawn
    pub line_visible: bool,
    /// Vertical position of the line end, relative to the rod
    pub line_depth: f32,
}

impl Boat {
    pub fn new(tuning: &BoatTuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            heading: Vec2::ONE.normalize(),
            mode: BoatMode::Moving,
            mode_elapsed: 0.0,
            line_visible: false,
            line_depth: tuning.line_rest_depth,
        }
    }

    pub fn is_fishing(&self) -> bool {
        self.mode == BoatMode::Fishing
    }

    /// Orientation for the scene graph (model faces +z)
    pub fn yaw(&self) -> f32 {
        yaw_from_heading(self.heading)
    }

    /// Where wake ripples appear
    pub fn wake_point(&self, tuning: &BoatTuning) -> Vec2 {
        self.pos - self.heading * tuning.wake_offset
    }

    /// Where the line meets the water
    pub fn line_end(&self, tuning: &BoatTuning) -> Vec2 {
        self.pos + Vec2::new(tuning.line_offset, 0.0)
    }

    /// Advance by `dt` seconds. `time` is the sim clock (drives bobbing),
    /// `boundary` the half-extent past which the heading reflects.
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        time: f64,
        boundary: f32,
        tuning: &BoatTuning,
        rng: &mut R,
    ) -> BoatUpdate {
        let mut update = BoatUpdate::default();
        self.mode_elapsed += dt;

        match self.mode {
            BoatMode::Moving => {
                self.pos += self.heading * tuning.speed * dt;

                if rng.random_bool(tuning.wake_chance) {
                    update.ripple = Some((self.wake_point(tuning), RippleSource::Wake));
                }

                // Both axes flip even if only one bound was crossed
                if self.pos.x.abs() > boundary || self.pos.y.abs() > boundary {
                    self.heading = -self.heading;
                    update.bounced = true;
                    log::debug!("Boat bounced at {}", self.pos);
                }

                if self.mode_elapsed >= tuning.movement_duration {
                    self.begin_fishing();
                    update.transition = Some(BoatMode::Fishing);
                }
            }
            BoatMode::Fishing => {
                let phase = (time * tuning.line_bob_frequency as f64).sin() as f32;
                self.line_depth = tuning.line_rest_depth + phase * tuning.line_bob_amplitude;

                if self.line_visible && rng.random_bool(tuning.line_ripple_chance) {
                    update.ripple = Some((self.line_end(tuning), RippleSource::Line));
                }

                if self.mode_elapsed >= tuning.fishing_duration {
                    self.resume_moving(tuning, rng);
                    update.transition = Some(BoatMode::Moving);
                }
            }
        }

        update
    }

    fn begin_fishing(&mut self) {
        self.mode = BoatMode::Fishing;
        self.mode_elapsed = 0.0;
        self.line_visible = true;
    }

    fn resume_moving<R: Rng>(&mut self, tuning: &BoatTuning, rng: &mut R) {
        self.mode = BoatMode::Moving;
        self.mode_elapsed = 0.0;
        self.line_visible = false;
        self.line_depth = tuning.line_rest_depth;
        self.heading = heading_from_angle(rng.random_range(0.0..std::f32::consts::TAU));
    }

    /// Pull the boat back inside `boundary` (after the water shrinks)
    pub fn confine(&mut self, boundary: f32) {
        self.pos = self.pos.clamp(Vec2::splat(-boundary), Vec2::splat(boundary));
    }
}
