//! Breakout headless demo
//!
//! Runs a session with an autopilot paddle and logs what the UI would draw.
//! Usage: `breakout-demo [seed] [frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use breakout_core::persistence::MemoryStore;
    use breakout_core::platform::InputEvent;
    use breakout_core::sim::{GameEvent, GamePhase, GameSession, Rect};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345u64);
    let frames = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60u32);
    log::info!("Breakout demo starting (seed {}, {} frames)", seed, frames);

    let store = MemoryStore::load_or_default(None);
    let field = Rect::new(0.0, 0.0, 320.0, 519.0);
    let mut session = GameSession::from_store(store, field, seed);
    let frame_dt = 1.0 / 60.0;

    for frame in 0..frames {
        match session.phase() {
            GamePhase::NotStarted | GamePhase::Paused => session.handle_input(InputEvent::Tap),
            GamePhase::LevelCleared | GamePhase::GameOver => session.acknowledge_outcome(),
            GamePhase::InPlay => {}
        }

        // Autopilot: chase the ball
        if let Some(ball) = session.ball() {
            let paddle_mid = session.paddle().rect.center().x;
            let dx = (ball.pos.x - paddle_mid).clamp(-6.0, 6.0);
            session.handle_input(InputEvent::DragDelta(dx));
        }

        session.tick(frame_dt);

        for event in session.drain_events() {
            match event {
                GameEvent::PlaceBall { .. }
                | GameEvent::PlacePaddle { .. }
                | GameEvent::BoundaryAdded { .. }
                | GameEvent::BoundaryRemoved { .. } => log::trace!("{:?}", event),
                GameEvent::LevelCleared(outcome) => {
                    log::info!("[frame {}] level cleared: {:?}", frame, outcome)
                }
                GameEvent::GameOver(outcome) => {
                    log::info!("[frame {}] game over: {:?}", frame, outcome)
                }
                other => log::debug!("[frame {}] {:?}", frame, other),
            }
        }
    }

    log::info!(
        "Finished on level {} with score {} and {} lives",
        session.level(),
        session.score(),
        session.lives()
    );
    println!("{}", session.store().to_json());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The host embeds the library directly; nothing to run here
}
