//! Per-frame simulation tick
//!
//! Ripple decay first, then one boat update.

use rand::Rng;

use super::state::{SurfaceEvent, SurfaceState};
use crate::platform::sanitize_dt;
use crate::settings::Settings;

/// Advance the surface by `dt` seconds, appending what happened to `events`.
///
/// A zero (or sanitized-to-zero) delta leaves the state untouched and draws
/// nothing from `rng`.
pub fn tick<R: Rng>(
    state: &mut SurfaceState,
    settings: &Settings,
    dt: f32,
    rng: &mut R,
    events: &mut Vec<SurfaceEvent>,
) {
    let dt = sanitize_dt(dt);
    if dt == 0.0 {
        return;
    }

    state.time += dt as f64;
    state.ticks += 1;

    let expired = state.ripples.tick(state.time, &settings.ripples);
    if expired > 0 {
        events.push(SurfaceEvent::RipplesExpired { count: expired });
    }

    let update = state
        .boat
        .update(dt, state.time, settings.boundary(), &settings.boat, rng);

    if update.bounced {
        events.push(SurfaceEvent::BoatBounced { pos: state.boat.pos });
    }

    if let Some((pos, source)) = update.ripple {
        if state
            .ripples
            .add(pos, settings.ripple_strength, state.time, &settings.ripples)
        {
            events.push(SurfaceEvent::RippleSpawned {
                pos,
                strength: settings.ripple_strength,
                source,
            });
        }
    }

    if let Some(mode) = update.transition {
        log::info!("Boat {:?} at {} (t={:.2}s)", mode, state.boat.pos, state.time);
        events.push(SurfaceEvent::ModeChanged { mode });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boat::BoatMode;
    use crate::sim::boat::tests::ConstRng;
    use crate::sim::ripple::RippleSource;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_zero_dt_is_noop() {
        let settings = Settings::default();
        let mut state = SurfaceState::new(&settings);
        state
            .ripples
            .add(Vec2::new(1.0, 1.0), 3.0, 0.0, &settings.ripples);
        let before = state.clone();

        let mut events = Vec::new();
        // Firing RNG: a real tick would always spawn a wake ripple
        let mut rng = ConstRng(0);
        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            tick(&mut state, &settings, dt, &mut rng, &mut events);
        }

        assert!(events.is_empty());
        assert_eq!(state.time, before.time);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.boat, before.boat);
        let r = state.ripples.iter().next().unwrap();
        let r0 = before.ripples.iter().next().unwrap();
        assert_eq!(r, r0);
    }

    #[test]
    fn test_tick_decays_then_moves() {
        let settings = Settings::default();
        let mut state = SurfaceState::new(&settings);
        state.ripples.add(Vec2::ZERO, 3.0, 0.0, &settings.ripples);

        let mut events = Vec::new();
        tick(&mut state, &settings, 0.1, &mut ConstRng(u64::MAX), &mut events);

        assert_eq!(state.ticks, 1);
        assert!((state.time - 0.1).abs() < 1e-6);
        let r = state.ripples.iter().next().unwrap();
        assert!((r.strength - 2.94).abs() < 1e-5);
        assert!((r.radius - 1.0).abs() < 1e-5);
        assert!(state.boat.pos.length() > 0.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_wake_ripple_is_rate_limited() {
        let settings = Settings::default();
        let mut state = SurfaceState::new(&settings);
        let mut events = Vec::new();
        let mut rng = ConstRng(0);

        // 60 Hz ticks with guaranteed wake rolls: at most one every 0.1s
        for _ in 0..60 {
            tick(&mut state, &settings, 1.0 / 60.0, &mut rng, &mut events);
        }
        let spawned = events
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::RippleSpawned { source: RippleSource::Wake, .. }))
            .count();
        assert!(spawned >= 9 && spawned <= 10, "spawned {spawned}");
        assert!(state.ripples.len() <= settings.ripples.max_count);
    }

    #[test]
    fn test_transition_emits_event() {
        let settings = Settings::default();
        let mut state = SurfaceState::new(&settings);
        state.boat.mode_elapsed = 14.9;

        let mut events = Vec::new();
        tick(&mut state, &settings, 0.2, &mut ConstRng(u64::MAX), &mut events);

        assert_eq!(state.boat.mode, BoatMode::Fishing);
        assert_eq!(state.boat.mode_elapsed, 0.0);
        assert_eq!(
            events,
            vec![SurfaceEvent::ModeChanged {
                mode: BoatMode::Fishing
            }]
        );
    }

    #[test]
    fn test_line_ripple_source() {
        let settings = Settings::default();
        let mut state = SurfaceState::new(&settings);
        state.boat.mode = BoatMode::Fishing;
        state.boat.line_visible = true;

        let mut events = Vec::new();
        tick(&mut state, &settings, 0.1, &mut ConstRng(0), &mut events);
        assert!(matches!(
            events.as_slice(),
            [SurfaceEvent::RippleSpawned {
                source: RippleSource::Line,
                ..
            }]
        ));
    }

    #[test]
    fn test_bounce_event() {
        let settings = Settings::default();
        let mut state = SurfaceState::new(&settings);
        state.boat.pos = Vec2::new(243.0, 0.0);

        let mut events = Vec::new();
        tick(&mut state, &settings, 0.1, &mut ConstRng(u64::MAX), &mut events);
        assert!(matches!(events.as_slice(), [SurfaceEvent::BoatBounced { .. }]));
        assert!(state.boat.heading.x < 0.0 && state.boat.heading.y < 0.0);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut state1 = SurfaceState::new(&settings);
        let mut state2 = SurfaceState::new(&settings);
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);
        let mut events1 = Vec::new();
        let mut events2 = Vec::new();

        for _ in 0..3000 {
            tick(&mut state1, &settings, 1.0 / 60.0, &mut rng1, &mut events1);
            tick(&mut state2, &settings, 1.0 / 60.0, &mut rng2, &mut events2);
        }

        assert_eq!(events1, events2);
        assert_eq!(state1.boat, state2.boat);
        assert_eq!(state1.ripples.len(), state2.ripples.len());
    }
}
