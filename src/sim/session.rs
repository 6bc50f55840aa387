//! Game session: lives, score, combo, phases and level progression
//!
//! The session owns every simulation component and wires them explicitly:
//! collision reports and brick-field events come back as values and are routed
//! here. Output for the host UI accumulates in an event queue drained with
//! `drain_events()`.

use glam::Vec2;

use super::ball::{Ball, BallDynamics};
use super::boundary::{BoundaryChange, BoundaryId, BoundaryRegistry};
use super::bricks::{BrickField, BrickHit, FieldEvent};
use super::collision::{CollisionEngine, Contact};
use super::geometry::{Rect, Shape};
use super::paddle::Paddle;
use super::state::{GameEvent, GamePhase, LevelRequest, Outcome, StyleTag};
use crate::clamp_low;
use crate::consts::*;
use crate::persistence::{KeyValueStore, MemoryStore};
use crate::platform::InputEvent;
use crate::scores::ScoreRecord;
use crate::settings::Settings;

/// One game session bound to a preference store
#[derive(Debug)]
pub struct GameSession<S: KeyValueStore = MemoryStore> {
    settings: Settings,
    store: S,
    scores: ScoreRecord,
    pub(super) phase: GamePhase,
    lives: u32,
    score: u32,
    combo: u32,
    pub(super) field: Rect,
    pub(super) registry: BoundaryRegistry,
    pub(super) dynamics: BallDynamics,
    pub(super) collision: CollisionEngine,
    pub(super) bricks: BrickField,
    paddle: Paddle,
    /// Unsimulated frame time
    pub(super) accumulator: f32,
    /// Simulation tick counter
    pub(super) time_ticks: u64,
    events: Vec<GameEvent>,
}

impl<S: KeyValueStore> GameSession<S> {
    /// Start a session on level 1. `seed` drives push angles.
    pub fn new(settings: Settings, store: S, field: Rect, seed: u64) -> Self {
        let field = sanitize_field(field);
        let scores = ScoreRecord::load(&store);
        let mut dynamics = BallDynamics::new(seed);
        dynamics.set_rotation_allowed(settings.ball_rotation);

        let mut session = Self {
            settings,
            store,
            scores,
            phase: GamePhase::NotStarted,
            lives: 0,
            score: 0,
            combo: 0,
            field,
            registry: BoundaryRegistry::new(),
            dynamics,
            collision: CollisionEngine::new(),
            bricks: BrickField::new(),
            paddle: Paddle::for_field(&field),
            accumulator: 0.0,
            time_ticks: 0,
            events: Vec::new(),
        };
        session.refresh_speed();
        session.new_game(LevelRequest::First);
        log::info!("Session started with seed {}", seed);
        session
    }

    /// Start a session with the settings persisted in `store`
    pub fn from_store(store: S, field: Rect, seed: u64) -> Self {
        let settings = Settings::load(&store);
        Self::new(settings, store, field, seed)
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn level(&self) -> u32 {
        self.bricks.level()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scores(&self) -> &ScoreRecord {
        &self.scores
    }

    pub fn field(&self) -> Rect {
        self.field
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.dynamics.ball()
    }

    pub fn ball_speed(&self) -> f32 {
        self.dynamics.speed()
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn bricks(&self) -> &BrickField {
        &self.bricks
    }

    pub fn boundaries(&self) -> &BoundaryRegistry {
        &self.registry
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Take the output events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Input ===

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Tap => self.on_tap(),
            InputEvent::DragDelta(dx) => self.on_drag_delta(dx),
            InputEvent::PauseRequested => self.on_pause_requested(),
            InputEvent::PauseToggled => self.on_pause_toggled(),
            InputEvent::AppBackgrounded => self.on_app_backgrounded(),
            InputEvent::SettingsChanged(settings) => self.apply_settings(settings),
            InputEvent::FieldResized(bounds) => self.on_field_resized(bounds),
            InputEvent::GravityChanged(gravity) => self.on_gravity_changed(gravity),
        }
    }

    /// Launch the ball, or resume when paused
    pub fn on_tap(&mut self) {
        match self.phase {
            GamePhase::NotStarted => {
                if !self.dynamics.has_ball() {
                    log::debug!("tap ignored: no ball to launch");
                    return;
                }
                self.dynamics.push();
                self.dynamics.set_gravity_enabled(self.settings.ball_gravity);
                self.set_phase(GamePhase::InPlay);
            }
            GamePhase::Paused => self.continue_game(),
            GamePhase::InPlay => log::debug!("tap ignored: ball already in motion"),
            GamePhase::LevelCleared | GamePhase::GameOver => {
                log::debug!("tap ignored: outcome not acknowledged yet")
            }
        }
    }

    /// Move the paddle horizontally; not allowed while the ball is frozen
    pub fn on_drag_delta(&mut self, dx: f32) {
        if !(self.phase == GamePhase::InPlay || self.awaiting_launch()) {
            return;
        }
        self.paddle.move_by(dx, &self.field);
        self.register_paddle();
        self.sync();
    }

    pub fn on_pause_requested(&mut self) {
        self.pause_game();
    }

    pub fn on_app_backgrounded(&mut self) {
        self.pause_game();
    }

    /// Pause button: pause when in play, resume when paused
    pub fn on_pause_toggled(&mut self) {
        match self.phase {
            GamePhase::InPlay => self.pause_game(),
            GamePhase::Paused => self.continue_game(),
            _ => log::debug!("pause toggle ignored in {:?}", self.phase),
        }
    }

    /// Replace the settings. A difficulty change restarts the current level.
    pub fn apply_settings(&mut self, settings: Settings) {
        let previous = std::mem::replace(&mut self.settings, settings);
        self.settings.save(&mut self.store);
        self.dynamics.set_rotation_allowed(settings.ball_rotation);

        if previous.difficulty != settings.difficulty {
            log::info!(
                "Difficulty changed to {}, restarting level",
                settings.difficulty.as_str()
            );
            self.refresh_speed();
            self.new_game(LevelRequest::Current);
        }
        self.sync();
    }

    /// The play field was laid out again
    pub fn on_field_resized(&mut self, bounds: Rect) {
        let field = sanitize_field(bounds);
        self.field = field;
        self.refresh_speed();
        self.register_walls();
        self.bricks.place(&field, &mut self.registry);

        if self.awaiting_launch() && self.lives > 0 {
            self.reset_paddle();
            self.reset_ball();
        } else {
            self.paddle.fit_to_field(&field);
            self.register_paddle();
            self.clamp_ball_into_field();
        }
        self.sync();
    }

    /// New gravity vector (device tilt)
    pub fn on_gravity_changed(&mut self, gravity: Vec2) {
        self.dynamics.set_gravity_vector(gravity);
    }

    // === Game flow ===

    /// Start a new run. Persists the finished run's score first.
    pub fn new_game(&mut self, request: LevelRequest) {
        match request {
            LevelRequest::First => self.bricks.build_level(1, &mut self.registry),
            LevelRequest::Current => self.bricks.rebuild(&mut self.registry),
            LevelRequest::Next => self.bricks.build_next_level(&mut self.registry),
        }

        if self.score > 0 {
            // Only running out of lives counts as a loss
            let lost = self.lives == 0;
            self.scores.record_run(self.score, !lost);
            self.scores.save(&mut self.store);
        }

        self.set_score(0);
        self.set_combo(0);
        self.set_lives(self.settings.difficulty.starting_lives());
        self.reset_game_objects();
        self.set_phase(GamePhase::NotStarted);
        log::info!(
            "New game on level {} ({})",
            self.bricks.level(),
            self.settings.difficulty.as_str()
        );
        self.sync();
    }

    /// Dismiss the level-cleared / game-over presentation
    pub fn acknowledge_outcome(&mut self) {
        match self.phase {
            GamePhase::LevelCleared => self.new_game(LevelRequest::Next),
            GamePhase::GameOver => self.new_game(LevelRequest::Current),
            _ => log::debug!("no outcome to acknowledge in {:?}", self.phase),
        }
    }

    fn pause_game(&mut self) {
        if self.phase == GamePhase::InPlay && self.dynamics.is_in_motion() {
            self.dynamics.stop();
            self.set_phase(GamePhase::Paused);
        }
    }

    fn continue_game(&mut self) {
        if !self.dynamics.has_ball() {
            log::debug!("resume ignored: no ball");
            return;
        }
        self.dynamics.set_gravity_enabled(self.settings.ball_gravity);
        if self.dynamics.has_paused_motion() {
            self.dynamics.resume();
        } else {
            // Respawned after a lost life
            self.dynamics.push();
        }
        self.set_phase(GamePhase::InPlay);
    }

    /// Ball at rest with no trajectory to preserve
    fn awaiting_launch(&self) -> bool {
        match self.phase {
            GamePhase::NotStarted => true,
            GamePhase::Paused => !self.dynamics.has_paused_motion(),
            _ => false,
        }
    }

    pub(super) fn handle_contact(&mut self, contact: Contact) {
        match contact.id {
            BoundaryId::Brick(index) => self.handle_brick_contact(index),
            ref id if id.is_paddle() => self.set_combo(0),
            _ => {}
        }
    }

    fn handle_brick_contact(&mut self, index: u32) {
        if self.bricks.brick(index).is_none_or(|b| b.destroyed) {
            log::debug!("contact with gone brick {} ignored", index);
            return;
        }

        let combo = self.combo + 1;
        self.set_combo(combo);
        let points = self
            .settings
            .combo_scoring
            .points(combo, self.settings.difficulty.combo_bonus());
        self.set_score(self.score + points);
        log::debug!("brick {} hit: +{} (combo {})", index, points, combo);

        if self.bricks.on_brick_contacted(index, &mut self.registry) == BrickHit::DestroyedShrinkPaddle
        {
            self.paddle.shrink(&self.field);
            self.register_paddle();
        }
    }

    pub(super) fn handle_ball_left_field(&mut self) {
        self.events.push(GameEvent::RemoveBall);
        self.dynamics.set_gravity_enabled(false);
        let lives = self.lives.saturating_sub(1);
        self.set_lives(lives);
        log::info!("Ball lost, {} lives left", lives);

        if lives > 0 {
            self.reset_ball();
            self.set_phase(GamePhase::Paused);
        } else {
            self.lose_game();
        }
    }

    fn lose_game(&mut self) {
        self.dynamics.stop();
        self.set_phase(GamePhase::GameOver);
        let outcome = Outcome {
            score: self.score,
            lives_saved: 0,
            is_new_best_score: false,
        };
        log::info!("Game over with {} points", self.score);
        self.events.push(GameEvent::GameOver(outcome));
    }

    fn complete_level(&mut self) {
        if self.phase.is_terminal() {
            log::debug!("field cleared after run ended, ignoring");
            return;
        }
        // Bonus for saved lives
        self.set_score(self.score + self.lives);
        self.dynamics.stop();
        self.set_phase(GamePhase::LevelCleared);
        let outcome = Outcome {
            score: self.score,
            lives_saved: self.lives,
            is_new_best_score: self.scores.is_new_best(self.score),
        };
        log::info!(
            "Level {} complete: {} points, {} lives saved",
            self.bricks.level(),
            outcome.score,
            outcome.lives_saved
        );
        self.events.push(GameEvent::LevelCleared(outcome));
    }

    // === Objects ===

    fn reset_game_objects(&mut self) {
        let field = self.field;
        self.register_walls();
        self.bricks.place(&field, &mut self.registry);
        self.reset_paddle();
        self.reset_ball();
    }

    fn reset_paddle(&mut self) {
        self.paddle = Paddle::for_field(&self.field);
        self.register_paddle();
    }

    fn reset_ball(&mut self) {
        let pos = Vec2::new(
            self.field.mid_x(),
            self.paddle.top() - self.dynamics.radius() - BALL_SPAWN_GAP,
        );
        self.dynamics.spawn(pos);
        self.collision.reset();
        self.emit_ball();
    }

    /// Keep the ball's bounding square within the field
    fn clamp_ball_into_field(&mut self) {
        let field = self.field;
        let Some(ball) = self.dynamics.ball_mut() else {
            return;
        };
        let r = ball.radius;
        ball.pos.x = clamp_low(ball.pos.x, field.min_x() + r, field.max_x() - r);
        ball.pos.y = clamp_low(ball.pos.y, field.min_y() + r, field.max_y() - r);
        self.emit_ball();
    }

    fn refresh_speed(&mut self) {
        let speed = self.settings.ball_speed(self.field.height());
        self.dynamics.set_speed(speed);
    }

    /// Walls: the field with its height doubled, so the bottom is open
    fn register_walls(&mut self) {
        let walls = Rect::new(
            self.field.min_x(),
            self.field.min_y(),
            self.field.width(),
            self.field.height() * 2.0,
        );
        self.registry
            .set_boundary(BoundaryId::game_view(), Shape::Rect(walls));
    }

    fn register_paddle(&mut self) {
        self.registry
            .set_boundary(BoundaryId::paddle(), self.paddle.boundary_shape());
        self.events.push(GameEvent::PlacePaddle {
            rect: self.paddle.rect,
            style: StyleTag::Paddle,
        });
    }

    pub(super) fn emit_ball(&mut self) {
        if let Some(ball) = self.dynamics.ball() {
            self.events.push(GameEvent::PlaceBall {
                center: ball.pos,
                radius: ball.radius,
                angle: ball.angle,
                style: StyleTag::Ball,
            });
        }
    }

    /// Forward registry changes and brick-field events
    pub(super) fn sync(&mut self) {
        loop {
            let changes = self.registry.drain_changes();
            let field_events = self.bricks.drain_events();
            if changes.is_empty() && field_events.is_empty() {
                break;
            }

            for change in changes {
                self.events.push(match change {
                    BoundaryChange::Added(id, shape) => GameEvent::BoundaryAdded { id, shape },
                    BoundaryChange::Removed(id) => GameEvent::BoundaryRemoved { id },
                });
            }

            for event in field_events {
                match event {
                    FieldEvent::Placed { index, rect, kind } => {
                        self.events.push(GameEvent::PlaceBrick {
                            index,
                            rect,
                            style: StyleTag::Brick(kind),
                        })
                    }
                    FieldEvent::Fading { index } => {
                        self.events.push(GameEvent::FadeBrick { index })
                    }
                    FieldEvent::Removed { index } => {
                        self.events.push(GameEvent::RemoveBrick { index })
                    }
                    FieldEvent::Cleared => self.complete_level(),
                }
            }
        }
    }

    // === Counters ===

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::debug!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }

    fn set_score(&mut self, score: u32) {
        self.score = score;
        self.events.push(GameEvent::ScoreChanged(score));
    }

    fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
        self.events.push(GameEvent::LivesChanged(lives));
    }

    fn set_combo(&mut self, combo: u32) {
        self.combo = combo;
        self.events.push(GameEvent::ComboChanged(combo));
    }
}

/// Negative extents collapse to an empty field
fn sanitize_field(bounds: Rect) -> Rect {
    if bounds.width() < 0.0 || bounds.height() < 0.0 {
        log::warn!("negative field size {:?}, clamping", bounds.size);
    }
    bounds.clamped()
}
