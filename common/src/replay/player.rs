use crate::games::SessionRng;
use crate::games::snake::{Direction, SettingsError, SnakeGameState, SnakeSettings, SnakeSnapshot};

use super::SnakeReplay;

pub struct ReplayPlayer {
    replay: SnakeReplay,
    current_turn_index: usize,
}

impl ReplayPlayer {
    pub fn new(replay: SnakeReplay) -> Self {
        Self {
            replay,
            current_turn_index: 0,
        }
    }

    pub fn engine_version(&self) -> &str {
        &self.replay.engine_version
    }

    pub fn seed(&self) -> u64 {
        self.replay.seed
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.replay.settings
    }

    pub fn game_started_timestamp_ms(&self) -> i64 {
        self.replay.game_started_timestamp_ms
    }

    pub fn total_turns(&self) -> usize {
        self.replay.turns.len()
    }

    pub fn is_finished(&self) -> bool {
        self.current_turn_index >= self.replay.turns.len()
    }

    /// Turns recorded for `tick`. Turns for earlier ticks that were never asked for are skipped.
    pub fn turns_for_tick(&mut self, tick: u64) -> Vec<Direction> {
        let mut turns = Vec::new();
        while let Some(turn) = self.replay.turns.get(self.current_turn_index) {
            if turn.tick > tick {
                break;
            }
            if turn.tick == tick {
                turns.push(turn.direction);
            }
            self.current_turn_index += 1;
        }
        turns
    }

    pub fn reset(&mut self) {
        self.current_turn_index = 0;
    }

    /// A fresh simulation seeded the way the recorded one was.
    pub fn new_game(&self) -> Result<SnakeGameState, SettingsError> {
        SnakeGameState::new(self.replay.settings.clone(), SessionRng::new(self.replay.seed))
    }

    pub fn into_replay(self) -> SnakeReplay {
        self.replay
    }
}

/// Re-simulates a replay, returning the snapshot after every tick until the game ends or
/// `max_ticks` ticks have run.
pub fn replay_trace(replay: &SnakeReplay, max_ticks: u64) -> Result<Vec<SnakeSnapshot>, SettingsError> {
    let mut player = ReplayPlayer::new(replay.clone());
    let mut state = player.new_game()?;
    let mut snapshots = Vec::new();

    while state.tick() < max_ticks && !state.phase().is_terminal() {
        for direction in player.turns_for_tick(state.tick()) {
            state.set_direction(direction);
        }
        snapshots.push(state.advance().snapshot);
    }

    Ok(snapshots)
}
