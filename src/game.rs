//! Game driver
//!
//! Owns the simulation state, the event bus and the tick driver. The host
//! feeds it key presses and elapsed time and gets render commands back.

use crate::driver::TickDriver;
use crate::events::{EventBus, GameEvent, InputEvent, Message};
use crate::render::{self, RenderCommand};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, apply_input, tick};

pub struct Game {
    settings: Settings,
    state: GameState,
    bus: EventBus,
    /// Main loop; `None` once the game has ended
    driver: Option<TickDriver>,
    /// Time left before the end screen is shown
    end_delay_ms: Option<u32>,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        let settings = settings.sanitized();
        log::info!("Starting game ({}ms ticks)", settings.tick_interval_ms);

        let mut game = Self {
            state: GameState::new(settings.clone()),
            driver: Some(TickDriver::new(settings.tick_interval_ms)),
            settings,
            bus: EventBus::new(),
            end_delay_ms: None,
        };
        game.install_subscribers();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Whether the main loop is ticking
    pub fn is_running(&self) -> bool {
        self.driver.is_some()
    }

    /// Register a bus handler. Restarting clears every handler, so hosts
    /// re-subscribe after [`Game::restart`].
    pub fn subscribe<F>(&mut self, message: Message, handler: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.bus.subscribe(message, handler);
    }

    /// Feed a DOM key name; unknown keys are ignored
    pub fn handle_key(&mut self, key: &str) {
        match InputEvent::from_key_name(key) {
            Some(input) => self.handle_input(input),
            None => log::trace!("Ignoring key {key:?}"),
        }
    }

    pub fn handle_input(&mut self, input: InputEvent) {
        self.bus.publish(&GameEvent::Input(input));

        if input == InputEvent::Confirm {
            if self.state.phase.is_terminal() {
                self.restart();
            }
            return;
        }

        apply_input(&mut self.state, input);
        self.flush_events();
    }

    /// Advance wall time. Returns the commands for the newest frame, or
    /// `None` when nothing needs redrawing.
    pub fn advance(&mut self, elapsed_ms: u32) -> Option<Vec<RenderCommand>> {
        let (due, interval) = match self.driver.as_mut() {
            Some(driver) => (driver.advance(elapsed_ms), driver.interval_ms()),
            None => return self.advance_end_delay(elapsed_ms),
        };
        let mut frame = None;

        for _ in 0..due {
            tick(&mut self.state, interval);
            self.flush_events();
            if self.driver.is_none() {
                break;
            }
            frame = Some(render::draw(&self.state));
        }

        frame
    }

    /// Start over after a win or loss. No-op while the main loop is live.
    pub fn restart(&mut self) -> bool {
        if self.driver.is_some() {
            return false;
        }

        self.bus.clear();
        self.state = GameState::new(self.settings.clone());
        self.install_subscribers();
        self.driver = Some(TickDriver::new(self.settings.tick_interval_ms));
        self.end_delay_ms = None;

        log::info!("Game restarted");
        true
    }

    /// Publish handled events and stop the loop if the game just ended
    fn flush_events(&mut self) {
        for event in self.state.take_events() {
            self.bus.publish(&event);
            if event.is_terminal() {
                self.finish();
            }
        }
    }

    fn finish(&mut self) {
        if self.driver.take().is_some() {
            self.end_delay_ms = Some(self.settings.end_message_delay_ms);
        }
    }

    fn advance_end_delay(&mut self, elapsed_ms: u32) -> Option<Vec<RenderCommand>> {
        let remaining = self.end_delay_ms?;
        if elapsed_ms < remaining {
            self.end_delay_ms = Some(remaining - elapsed_ms);
            return None;
        }
        self.end_delay_ms = None;
        render::end_screen(&self.state)
    }

    fn install_subscribers(&mut self) {
        self.bus.subscribe(Message::LaserFired, |event| {
            log::trace!("{event:?}");
        });
        self.bus.subscribe(Message::CollisionEnemyHero, |_| {
            log::debug!("Hero hit");
        });
        for message in [Message::GameEndWin, Message::GameEndLoss] {
            self.bus.subscribe(message, |_| {
                log::info!("Press [Enter] to start a new game");
            });
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.state.phase)
            .field("running", &self.is_running())
            .field("end_delay_ms", &self.end_delay_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{LOSS_MESSAGE, WIN_MESSAGE};
    use crate::sim::EntityKind;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Game whose only enemy sits on top of the hero
    fn doomed_game(life: u32) -> Game {
        let mut game = Game::new(Settings::default());
        let state = &mut game.state;
        state.entities.retain(|e| e.is(EntityKind::Hero));
        state.hero.life = life;
        let hero_pos = state.hero_entity().unwrap().pos;
        state.spawn_enemy(hero_pos);
        game
    }

    fn recorder(game: &mut Game, message: Message) -> Rc<RefCell<Vec<GameEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        game.subscribe(message, move |event| sink.borrow_mut().push(*event));
        seen
    }

    fn text_of(commands: &[RenderCommand]) -> Option<&str> {
        commands.iter().find_map(|c| match c {
            RenderCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    #[test]
    fn test_frames_follow_tick_interval() {
        let mut game = Game::new(Settings::default());
        assert!(game.advance(50).is_none());
        let frame = game.advance(50).unwrap();
        assert_eq!(text_of(&frame), Some("Points: 0"));
        assert_eq!(game.state().time_ms, 100);
    }

    #[test]
    fn test_loss_stops_loop_then_shows_message() {
        let mut game = doomed_game(1);
        let losses = recorder(&mut game, Message::GameEndLoss);
        let wins = recorder(&mut game, Message::GameEndWin);

        // The final tick is not drawn
        assert!(game.advance(100).is_none());
        assert_eq!(game.phase(), GamePhase::Lost);
        assert!(!game.is_running());
        assert_eq!(losses.borrow().len(), 1);
        assert!(wins.borrow().is_empty());

        // The end screen waits out the settle delay
        assert!(game.advance(150).is_none());
        let screen = game.advance(50).unwrap();
        assert_eq!(text_of(&screen), Some(LOSS_MESSAGE));
        assert!(game.advance(1000).is_none());
        assert_eq!(losses.borrow().len(), 1);
    }

    #[test]
    fn test_hit_with_lives_left_keeps_running() {
        let mut game = doomed_game(3);
        game.state.spawn_enemy(Vec2::ZERO);
        let losses = recorder(&mut game, Message::GameEndLoss);
        let hits = recorder(&mut game, Message::CollisionEnemyHero);

        assert!(game.advance(100).is_some());
        assert_eq!(game.state().hero.life, 2);
        assert_eq!(hits.borrow().len(), 1);
        assert!(losses.borrow().is_empty());
        assert!(game.is_running());
    }

    #[test]
    fn test_win_shows_win_message() {
        let mut game = Game::new(Settings::default());
        let state = &mut game.state;
        state.entities.retain(|e| e.is(EntityKind::Hero));
        let enemy = state.spawn_enemy(Vec2::new(100.0, 100.0));
        let laser = state.spawn_laser(Vec2::new(120.0, 140.0));
        let kills = recorder(&mut game, Message::CollisionEnemyLaser);
        let wins = recorder(&mut game, Message::GameEndWin);

        game.advance(100);
        assert_eq!(*kills.borrow(), vec![GameEvent::CollisionEnemyLaser { laser, enemy }]);
        assert_eq!(wins.borrow().len(), 1);
        assert_eq!(game.state().hero.points, 100);

        let screen = game.advance(200).unwrap();
        assert_eq!(text_of(&screen), Some(WIN_MESSAGE));
    }

    #[test]
    fn test_restart_after_loss() {
        let mut game = doomed_game(1);
        game.advance(100);
        assert_eq!(game.phase(), GamePhase::Lost);

        let stale = recorder(&mut game, Message::KeySpace);
        game.handle_key("Enter");

        let fresh = GameState::new(Settings::default());
        assert_eq!(game.phase(), GamePhase::Running);
        assert!(game.is_running());
        assert_eq!(game.state().entities, fresh.entities);
        assert_eq!(game.state().hero.life, 3);
        assert_eq!(game.state().hero.points, 0);

        // Subscriptions were reset
        game.handle_key(" ");
        assert!(stale.borrow().is_empty());
        assert_eq!(game.bus.subscriber_count(Message::GameEndLoss), 1);
    }

    #[test]
    fn test_confirm_while_running_is_noop() {
        let mut game = Game::new(Settings::default());
        game.handle_input(InputEvent::MoveLeft);
        game.advance(100);
        let before = game.state().clone();

        game.handle_input(InputEvent::Confirm);
        assert!(!game.restart());
        assert_eq!(game.state().entities, before.entities);
        assert_eq!(game.state().time_ms, before.time_ms);
    }

    #[test]
    fn test_fire_publishes_events() {
        let mut game = Game::new(Settings::default());
        let keys = recorder(&mut game, Message::KeySpace);
        let shots = recorder(&mut game, Message::LaserFired);

        game.handle_key(" ");
        game.handle_key(" ");
        game.handle_key("Escape");

        assert_eq!(keys.borrow().len(), 2);
        assert_eq!(shots.borrow().len(), 1);
    }

    #[test]
    fn test_input_ignored_after_end() {
        let mut game = doomed_game(1);
        game.advance(100);
        let shots = recorder(&mut game, Message::LaserFired);
        game.handle_input(InputEvent::Fire);
        assert!(shots.borrow().is_empty());
    }
}
