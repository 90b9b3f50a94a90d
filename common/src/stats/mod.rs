mod game_stats;
mod stats_store;

pub use game_stats::GameStats;
pub use stats_store::{FileStatsStore, MemoryStatsStore, StatsError, StatsStore};

pub const STATS_FILE_NAME: &str = "mini_arcade_stats.yaml";
