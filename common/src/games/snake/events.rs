use std::time::Duration;

use super::game_state::SnakeSnapshot;
use super::types::{DeathReason, Direction};

/// Feedback events produced by the simulation, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnakeEvent {
    DirectionChanged(Direction),
    FoodEaten { score: u32 },
    LevelUp { level: u32, tick_interval: Duration },
    GameOver { reason: DeathReason, score: u32 },
    BoardFull { score: u32 },
}

/// Subscriber for feedback events, e.g. a sound player.
pub trait SnakeObserver {
    fn on_event(&mut self, event: &SnakeEvent);
}

/// Receives the board after every reset and tick.
pub trait SnakeRenderer {
    fn render(&mut self, snapshot: &SnakeSnapshot);
}

impl<F: FnMut(&SnakeEvent)> SnakeObserver for F {
    fn on_event(&mut self, event: &SnakeEvent) {
        self(event)
    }
}
