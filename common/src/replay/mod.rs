mod file_io;
mod player;
mod recorder;

use serde::{Deserialize, Serialize};

use crate::games::snake::{Direction, SnakeSettings};

pub use file_io::{
    ReplayError, generate_replay_filename, load_replay, load_replay_from_str, save_replay,
    save_replay_to_string,
};
pub use player::{ReplayPlayer, replay_trace};
pub use recorder::ReplayRecorder;

pub const REPLAY_FILE_EXTENSION: &str = "snakereplay";
pub const REPLAY_VERSION: u8 = 1;

/// A direction request made before the given tick was simulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedTurn {
    pub tick: u64,
    pub direction: Direction,
}

/// Everything needed to re-simulate a game: seed, settings and the ordered turn requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeReplay {
    pub format_version: u8,
    pub engine_version: String,
    pub game_started_timestamp_ms: i64,
    pub seed: u64,
    pub settings: SnakeSettings,
    pub turns: Vec<RecordedTurn>,
}
