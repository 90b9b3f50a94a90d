use std::time::Duration;

use crate::games::{RandomSource, SessionRng};
use crate::identifiers::GameId;
use crate::log;
use crate::stats::{GameStats, StatsStore};

use super::events::{SnakeObserver, SnakeRenderer};
use super::game_state::{SnakeGameState, TickOutcome, TickStatus};
use super::types::Direction;

/// Wires a simulation to its renderer, feedback observers and the stats store.
///
/// Storage failures never interrupt play: they are logged and the unsaved record is retried
/// on the next tick.
pub struct SnakeSession<R: RandomSource = SessionRng> {
    game_id: GameId,
    state: SnakeGameState<R>,
    renderer: Box<dyn SnakeRenderer>,
    observers: Vec<Box<dyn SnakeObserver>>,
    stats_store: Box<dyn StatsStore>,
    stats: GameStats,
    stats_dirty: bool,
    play_time: Duration,
}

impl<R: RandomSource> SnakeSession<R> {
    pub fn new(
        game_id: GameId,
        state: SnakeGameState<R>,
        renderer: Box<dyn SnakeRenderer>,
        stats_store: Box<dyn StatsStore>,
    ) -> Self {
        let mut session = Self {
            game_id,
            state,
            renderer,
            observers: Vec::new(),
            stats_store,
            stats: GameStats::default(),
            stats_dirty: false,
            play_time: Duration::ZERO,
        };
        session.reload_stats();
        session.render();
        session
    }

    pub fn add_observer(&mut self, observer: Box<dyn SnakeObserver>) {
        self.observers.push(observer);
    }

    pub fn turn(&mut self, direction: Direction) -> bool {
        let accepted = self.state.set_direction(direction);
        self.dispatch_events();
        accepted
    }

    pub fn tick(&mut self) -> TickOutcome {
        let interval = self.state.tick_interval();
        let outcome = self.state.advance();

        if matches!(outcome.status, TickStatus::Moved | TickStatus::BoardFull) {
            self.play_time += interval;
        }

        self.dispatch_events();

        if self.stats.record_score(outcome.snapshot.score) {
            self.stats_dirty = true;
        }
        if outcome.status == TickStatus::BoardFull {
            if self.stats.record_win(self.play_time) {
                log!("[{}] New best time: {}s", self.game_id, self.play_time.as_secs());
            }
            self.stats_dirty = true;
        }
        if self.stats_dirty {
            self.save_stats();
        }

        self.renderer.render(&outcome.snapshot);
        outcome
    }

    /// Starts a new game on the same settings; the best score is re-read from storage. A record
    /// that still could not be saved is merged with the stored one and stays pending.
    pub fn restart(&mut self) {
        if self.stats_dirty {
            self.save_stats();
        }
        self.state.reset();
        self.play_time = Duration::ZERO;
        self.dispatch_events();
        self.reload_stats();
        self.render();
    }

    /// Clears the stored record of this game. On failure the in-memory record is kept.
    pub fn reset_stats(&mut self) -> bool {
        match self.stats_store.reset(&self.game_id) {
            Ok(()) => {
                self.stats = GameStats::default();
                self.stats_dirty = false;
                log!("[{}] Stats reset", self.game_id);
                true
            }
            Err(e) => {
                log!("[{}] Failed to reset stats: {}", self.game_id, e);
                false
            }
        }
    }

    pub fn pause(&mut self) -> bool {
        let paused = self.state.pause();
        if paused {
            self.render();
        }
        paused
    }

    pub fn resume(&mut self) -> bool {
        let resumed = self.state.resume();
        if resumed {
            self.render();
        }
        resumed
    }

    pub fn state(&self) -> &SnakeGameState<R> {
        &self.state
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn best_score(&self) -> u32 {
        self.stats.high_score
    }

    pub fn play_time(&self) -> Duration {
        self.play_time
    }

    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            for observer in self.observers.iter_mut() {
                observer.on_event(&event);
            }
        }
    }

    fn render(&mut self) {
        let snapshot = self.state.snapshot();
        self.renderer.render(&snapshot);
    }

    fn reload_stats(&mut self) {
        match self.stats_store.load(&self.game_id) {
            Ok(stats) if self.stats_dirty => self.stats.merge(&stats),
            Ok(stats) => self.stats = stats,
            Err(e) => {
                // Keep whatever we already know rather than forgetting a better record.
                log!("[{}] Failed to load stats: {}", self.game_id, e);
            }
        }
    }

    fn save_stats(&mut self) {
        match self.stats_store.save(&self.game_id, &self.stats) {
            Ok(()) => self.stats_dirty = false,
            Err(e) => log!("[{}] Failed to save stats: {}", self.game_id, e),
        }
    }
}
