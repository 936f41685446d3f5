//! Laser Invaders headless demo
//!
//! Runs the simulation on the autopilot at a fixed frame step and logs how
//! each game ends. Drawing is left to a real host; here frames are counted.

use laser_invaders::autopilot::Autopilot;
use laser_invaders::events::Message;
use laser_invaders::sim::GamePhase;
use laser_invaders::{Game, Settings};

/// Simulated host frame (ms)
const FRAME_MS: u32 = 16;
/// Games to play before exiting
const GAMES: u32 = 3;
/// Give up on a game after this much simulated time (ms)
const GAME_TIMEOUT_MS: u64 = 10 * 60 * 1000;

fn main() {
    env_logger::init();
    log::info!("Laser Invaders (native demo) starting...");

    let settings = Settings::load_or_default(None);
    let mut game = Game::new(settings);
    let mut pilot = Autopilot::new(0x5eed);

    for round in 1..=GAMES {
        let mut frames = 0u64;
        let mut elapsed_ms = 0u64;

        game.subscribe(Message::CollisionEnemyLaser, |event| {
            log::debug!("Hit: {event:?}");
        });

        while game.phase() == GamePhase::Running && elapsed_ms < GAME_TIMEOUT_MS {
            if let Some(input) = pilot.next_input(game.state()) {
                game.handle_input(input);
            }
            if game.advance(FRAME_MS).is_some() {
                frames += 1;
            }
            elapsed_ms += u64::from(FRAME_MS);
        }

        let state = game.state();
        log::info!(
            "Game {round}: {:?} after {:.1}s, {} points, {} lives, {frames} frames",
            state.phase,
            elapsed_ms as f64 / 1000.0,
            state.hero.points,
            state.hero.life,
        );
        if let Ok(json) = state.snapshot_json() {
            log::trace!("Final state: {json}");
        }

        // Let the end screen come up, then press Enter
        if !game.is_running() {
            while game.advance(FRAME_MS).is_none() {}
        }
        if round < GAMES && !game.restart() {
            log::warn!("Game {round} timed out, stopping");
            break;
        }
    }

    log::info!("Demo finished");
}
