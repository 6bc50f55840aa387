//! Fixed timestep simulation tick
//!
//! Frame time from the host accumulates and is consumed in `SIM_DT` steps, so
//! the same inputs and seed always produce the same run.

use super::session::GameSession;
use super::state::GamePhase;
use crate::consts::*;
use crate::persistence::KeyValueStore;

impl<S: KeyValueStore> GameSession<S> {
    /// Advance by one display frame of `frame_dt` seconds
    pub fn tick(&mut self, frame_dt: f32) {
        self.accumulator += frame_dt.max(0.0);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Spiral of death: drop what we couldn't simulate
        if self.accumulator >= SIM_DT {
            log::debug!(
                "frame too long, dropping {:.3}s of simulation",
                self.accumulator
            );
            self.accumulator = 0.0;
        }

        if substeps > 0 {
            self.emit_ball();
        }
    }

    /// Advance the simulation by exactly one fixed step
    pub fn step(&mut self, dt: f32) {
        self.time_ticks += 1;

        self.bricks.advance();
        self.sync();

        if self.phase == GamePhase::InPlay {
            let report = self
                .collision
                .step(&mut self.dynamics, &self.registry, &self.field, dt);
            for contact in report.contacts {
                self.handle_contact(contact);
            }
            if report.left_field {
                self.handle_ball_left_field();
            }
        }

        self.sync();
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::persistence::MemoryStore;
    use crate::platform::InputEvent;
    use crate::settings::Settings;
    use crate::sim::geometry::Rect;
    use crate::sim::state::{GameEvent, StyleTag};

    fn session(seed: u64) -> GameSession {
        GameSession::new(
            Settings::default(),
            MemoryStore::new(),
            Rect::new(0.0, 0.0, 320.0, 519.0),
            seed,
        )
    }

    #[test]
    fn test_frame_runs_whole_steps() {
        let mut s = session(1);
        s.tick(1.0 / 60.0);
        assert_eq!(s.time_ticks(), 2);

        // Half a step carries over
        s.tick(SIM_DT * 0.5);
        assert_eq!(s.time_ticks(), 2);
        s.tick(SIM_DT * 0.5);
        assert_eq!(s.time_ticks(), 3);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut s = session(1);
        s.tick(2.0);
        assert_eq!(s.time_ticks(), u64::from(MAX_SUBSTEPS));
        // Remainder dropped, not replayed
        s.tick(0.0);
        assert_eq!(s.time_ticks(), u64::from(MAX_SUBSTEPS));
    }

    #[test]
    fn test_negative_frame_ignored() {
        let mut s = session(1);
        s.tick(-1.0);
        s.tick(SIM_DT);
        assert_eq!(s.time_ticks(), 1);
    }

    #[test]
    fn test_tick_places_ball() {
        let mut s = session(1);
        s.handle_input(InputEvent::Tap);
        s.drain_events();
        s.tick(SIM_DT);
        let events = s.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::PlaceBall {
                style: StyleTag::Ball,
                ..
            }
        )));
    }

    #[test]
    fn test_ball_does_not_move_before_launch() {
        let mut s = session(1);
        let pos = s.ball().unwrap().pos;
        for _ in 0..60 {
            s.tick(1.0 / 60.0);
        }
        assert_eq!(s.ball().unwrap().pos, pos);
    }

    #[test]
    fn test_determinism() {
        let mut a = session(4242);
        let mut b = session(4242);

        let inputs = [
            InputEvent::DragDelta(-20.0),
            InputEvent::Tap,
            InputEvent::GravityChanged(Vec2::new(0.0, 100.0)),
            InputEvent::DragDelta(35.0),
        ];
        for input in inputs {
            a.handle_input(input.clone());
            b.handle_input(input);
            for _ in 0..30 {
                a.tick(1.0 / 60.0);
                b.tick(1.0 / 60.0);
            }
        }

        assert_eq!(a.time_ticks(), b.time_ticks());
        assert_eq!(a.ball(), b.ball());
        assert_eq!(a.score(), b.score());
        assert_eq!(a.lives(), b.lives());
        assert_eq!(a.drain_events(), b.drain_events());
    }

    #[test]
    fn test_different_seeds_push_differently() {
        let mut a = session(1);
        let mut b = session(2);
        a.on_tap();
        b.on_tap();
        assert_ne!(a.ball().unwrap().vel, b.ball().unwrap().vel);
    }
}
