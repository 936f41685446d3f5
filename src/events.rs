//! Game events and the publish/subscribe bus
//!
//! Events are plain enum values. The simulation produces them, the [`Game`]
//! publishes them to the bus in the order they were handled, and subscribers
//! (HUD, audio, logging) react. Subscribers only see the event; they cannot
//! publish while a dispatch is running. Anything that follows from an event
//! is queued by the simulation instead.
//!
//! [`Game`]: crate::game::Game

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Discrete player inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Fire,
    /// Enter - restarts a finished game
    Confirm,
}

impl InputEvent {
    /// Map a DOM `KeyboardEvent.key` name to an input. Unknown keys are ignored.
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(InputEvent::MoveUp),
            "ArrowDown" => Some(InputEvent::MoveDown),
            "ArrowLeft" => Some(InputEvent::MoveLeft),
            "ArrowRight" => Some(InputEvent::MoveRight),
            " " => Some(InputEvent::Fire),
            "Enter" => Some(InputEvent::Confirm),
            _ => None,
        }
    }

    pub fn message(self) -> Message {
        match self {
            InputEvent::MoveUp => Message::KeyUp,
            InputEvent::MoveDown => Message::KeyDown,
            InputEvent::MoveLeft => Message::KeyLeft,
            InputEvent::MoveRight => Message::KeyRight,
            InputEvent::Fire => Message::KeySpace,
            InputEvent::Confirm => Message::KeyEnter,
        }
    }
}

/// Event names (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Message {
    KeyUp,
    KeyDown,
    KeyLeft,
    KeyRight,
    KeySpace,
    KeyEnter,
    LaserFired,
    CollisionEnemyLaser,
    CollisionEnemyHero,
    GameEndWin,
    GameEndLoss,
}

impl Message {
    pub fn as_str(&self) -> &'static str {
        match self {
            Message::KeyUp => "KEY_EVENT_UP",
            Message::KeyDown => "KEY_EVENT_DOWN",
            Message::KeyLeft => "KEY_EVENT_LEFT",
            Message::KeyRight => "KEY_EVENT_RIGHT",
            Message::KeySpace => "KEY_EVENT_SPACE",
            Message::KeyEnter => "KEY_EVENT_ENTER",
            Message::LaserFired => "LASER_FIRED",
            Message::CollisionEnemyLaser => "COLLISION_ENEMY_LASER",
            Message::CollisionEnemyHero => "COLLISION_ENEMY_HERO",
            Message::GameEndWin => "GAME_END_WIN",
            Message::GameEndLoss => "GAME_END_LOSS",
        }
    }
}

/// An event: a message name plus its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Input(InputEvent),
    /// A fire request was accepted
    LaserFired { laser: u32 },
    CollisionEnemyLaser { laser: u32, enemy: u32 },
    CollisionEnemyHero { enemy: u32 },
    GameEndWin,
    GameEndLoss,
}

impl GameEvent {
    pub fn message(&self) -> Message {
        match self {
            GameEvent::Input(input) => input.message(),
            GameEvent::LaserFired { .. } => Message::LaserFired,
            GameEvent::CollisionEnemyLaser { .. } => Message::CollisionEnemyLaser,
            GameEvent::CollisionEnemyHero { .. } => Message::CollisionEnemyHero,
            GameEvent::GameEndWin => Message::GameEndWin,
            GameEvent::GameEndLoss => Message::GameEndLoss,
        }
    }

    /// True for win/loss
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameEndWin | GameEvent::GameEndLoss)
    }
}

type Handler = Box<dyn FnMut(&GameEvent)>;

/// Synchronous, single-threaded publish/subscribe register
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<Message, Vec<Handler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `message`. Handlers run in registration order.
    pub fn subscribe<F>(&mut self, message: Message, handler: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.listeners.entry(message).or_default().push(Box::new(handler));
    }

    /// Deliver `event` to every handler registered for its message
    pub fn publish(&mut self, event: &GameEvent) {
        if let Some(handlers) = self.listeners.get_mut(&event.message()) {
            for handler in handlers.iter_mut() {
                handler(event);
            }
        }
    }

    /// Remove every handler
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Number of handlers registered for `message`
    pub fn subscriber_count(&self, message: Message) -> usize {
        self.listeners.get(&message).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&'static str, usize> = self
            .listeners
            .iter()
            .map(|(message, handlers)| (message.as_str(), handlers.len()))
            .collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_handlers_run_in_registration_order() {
        let mut bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            bus.subscribe(Message::GameEndWin, move |_| log.borrow_mut().push(tag));
        }

        bus.publish(&GameEvent::GameEndWin);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_only_matching_message_dispatched() {
        let mut bus = EventBus::new();
        let hits = Rc::new(RefCell::new(Vec::new()));

        let h = Rc::clone(&hits);
        bus.subscribe(Message::CollisionEnemyLaser, move |event| h.borrow_mut().push(*event));

        bus.publish(&GameEvent::GameEndLoss);
        bus.publish(&GameEvent::CollisionEnemyLaser { laser: 7, enemy: 3 });

        assert_eq!(
            *hits.borrow(),
            vec![GameEvent::CollisionEnemyLaser { laser: 7, enemy: 3 }]
        );
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let mut bus = EventBus::new();
        bus.publish(&GameEvent::Input(InputEvent::Fire));
        assert_eq!(bus.subscriber_count(Message::KeySpace), 0);
    }

    #[test]
    fn test_clear_removes_handlers() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        bus.subscribe(Message::KeyEnter, move |_| *c.borrow_mut() += 1);

        bus.publish(&GameEvent::Input(InputEvent::Confirm));
        bus.clear();
        bus.publish(&GameEvent::Input(InputEvent::Confirm));

        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.subscriber_count(Message::KeyEnter), 0);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(InputEvent::from_key_name("ArrowLeft"), Some(InputEvent::MoveLeft));
        assert_eq!(InputEvent::from_key_name(" "), Some(InputEvent::Fire));
        assert_eq!(InputEvent::from_key_name("Enter"), Some(InputEvent::Confirm));
        assert_eq!(InputEvent::from_key_name("q"), None);
        assert_eq!(InputEvent::Fire.message(), Message::KeySpace);
    }
}
