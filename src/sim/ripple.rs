//! Ripple registry
//!
//! A bounded, insertion-ordered list of decaying surface disturbances.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::RippleTuning;

/// Who asked for a ripple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RippleSource {
    Pointer,
    /// Behind the moving boat
    Wake,
    /// At the end of the fishing line
    Line,
}

/// A single surface disturbance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ripple {
    /// Center on the water plane (x, z)
    pub pos: Vec2,
    pub strength: f32,
    pub radius: f32,
    /// Sim time at creation (seconds)
    pub created_at: f64,
}

impl Ripple {
    pub fn age(&self, now: f64) -> f32 {
        (now - self.created_at).max(0.0) as f32
    }
}

/// Live ripples, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RippleRegistry {
    ripples: VecDeque<Ripple>,
    /// Sim time of the last accepted ripple (rate limiting)
    last_accepted: Option<f64>,
}

impl RippleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ripple at `pos`. Returns false when rate limited or invalid.
    pub fn add(&mut self, pos: Vec2, strength: f32, now: f64, tuning: &RippleTuning) -> bool {
        if !pos.is_finite() || !strength.is_finite() || strength <= 0.0 {
            log::debug!("Rejected ripple at {pos} with strength {strength}");
            return false;
        }
        if let Some(last) = self.last_accepted {
            if now - last < tuning.min_interval {
                return false;
            }
        }
        self.last_accepted = Some(now);

        self.ripples.push_back(Ripple {
            pos,
            strength,
            radius: tuning.start_radius,
            created_at: now,
        });
        while self.ripples.len() > tuning.max_count {
            self.ripples.pop_front();
        }
        true
    }

    /// Grow and decay every ripple, then drop the expired ones.
    /// Returns how many were removed.
    pub fn tick(&mut self, now: f64, tuning: &RippleTuning) -> usize {
        for ripple in self.ripples.iter_mut() {
            let target = (ripple.age(now) * tuning.growth_rate).min(tuning.max_radius);
            ripple.radius = ripple.radius.max(target);
            ripple.strength *= tuning.decay;
        }

        let before = self.ripples.len();
        self.ripples.retain(|r| r.strength >= tuning.expiry_threshold);
        before - self.ripples.len()
    }

    pub fn clear(&mut self) {
        self.ripples.clear();
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    /// Iterate oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Ripple> {
        self.ripples.iter()
    }

    pub fn last_accepted(&self) -> Option<f64> {
        self.last_accepted
    }
}
