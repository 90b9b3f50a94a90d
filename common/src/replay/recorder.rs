use crate::games::snake::{Direction, SnakeSettings};

use super::{REPLAY_VERSION, RecordedTurn, SnakeReplay};

pub struct ReplayRecorder {
    engine_version: String,
    game_started_timestamp_ms: i64,
    seed: u64,
    settings: SnakeSettings,
    turns: Vec<RecordedTurn>,
}

impl ReplayRecorder {
    pub fn new(engine_version: String, seed: u64, settings: SnakeSettings) -> Self {
        Self {
            engine_version,
            game_started_timestamp_ms: chrono::Utc::now().timestamp_millis(),
            seed,
            settings,
            turns: Vec::new(),
        }
    }

    /// `tick` is the number of ticks already simulated when the request was made.
    pub fn record_turn(&mut self, tick: u64, direction: Direction) {
        self.turns.push(RecordedTurn { tick, direction });
    }

    /// Turns within one tick keep their recording order.
    pub fn finalize(&mut self) -> SnakeReplay {
        let mut turns = std::mem::take(&mut self.turns);
        turns.sort_by_key(|turn| turn.tick);

        SnakeReplay {
            format_version: REPLAY_VERSION,
            engine_version: std::mem::take(&mut self.engine_version),
            game_started_timestamp_ms: self.game_started_timestamp_ms,
            seed: self.seed,
            settings: self.settings.clone(),
            turns,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn turns_count(&self) -> usize {
        self.turns.len()
    }
}
