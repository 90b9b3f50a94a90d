use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::config::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, MemoryContentProvider,
    YamlConfigSerializer,
};
use crate::identifiers::GameId;

use super::GameStats;

type StatsDocument = BTreeMap<GameId, GameStats>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    Read(String),
    Write(String),
    Format(String),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::Read(e) => write!(f, "Failed to read stats: {}", e),
            StatsError::Write(e) => write!(f, "Failed to write stats: {}", e),
            StatsError::Format(e) => write!(f, "Malformed stats document: {}", e),
        }
    }
}

impl std::error::Error for StatsError {}

/// Persistent key-value storage of per-game statistics.
pub trait StatsStore {
    /// Unknown games read as default stats.
    fn load(&self, game_id: &GameId) -> Result<GameStats, StatsError>;
    fn save(&mut self, game_id: &GameId, stats: &GameStats) -> Result<(), StatsError>;
    /// Forgets the record of one game; other games are kept.
    fn reset(&mut self, game_id: &GameId) -> Result<(), StatsError>;
}

/// All games share one YAML document, keyed by game id.
pub struct FileStatsStore<TProvider: ConfigContentProvider = FileContentConfigProvider> {
    provider: TProvider,
    serializer: YamlConfigSerializer,
}

impl FileStatsStore<FileContentConfigProvider> {
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path))
    }
}

impl FileStatsStore<MemoryContentProvider> {
    pub fn in_memory() -> Self {
        Self::new(MemoryContentProvider::new())
    }
}

impl<TProvider: ConfigContentProvider> FileStatsStore<TProvider> {
    pub fn new(provider: TProvider) -> Self {
        Self {
            provider,
            serializer: YamlConfigSerializer::new(),
        }
    }

    fn read_document(&self) -> Result<StatsDocument, StatsError> {
        match self.provider.get_config_content().map_err(StatsError::Read)? {
            Some(content) if !content.trim().is_empty() => {
                self.serializer.deserialize(&content).map_err(StatsError::Format)
            }
            _ => Ok(StatsDocument::new()),
        }
    }

    fn write_document(&mut self, document: &StatsDocument) -> Result<(), StatsError> {
        let content = self.serializer.serialize(document).map_err(StatsError::Format)?;
        self.provider
            .set_config_content(&content)
            .map_err(StatsError::Write)
    }
}

impl<TProvider: ConfigContentProvider> StatsStore for FileStatsStore<TProvider> {
    fn load(&self, game_id: &GameId) -> Result<GameStats, StatsError> {
        Ok(self.read_document()?.remove(game_id).unwrap_or_default())
    }

    fn save(&mut self, game_id: &GameId, stats: &GameStats) -> Result<(), StatsError> {
        let mut document = self.read_document()?;
        document.insert(game_id.clone(), stats.clone());
        self.write_document(&document)
    }

    fn reset(&mut self, game_id: &GameId) -> Result<(), StatsError> {
        let mut document = self.read_document()?;
        if document.remove(game_id).is_none() {
            return Ok(());
        }
        self.write_document(&document)
    }
}

/// Keeps stats for the lifetime of the process.
#[derive(Default)]
pub struct MemoryStatsStore {
    stats: HashMap<GameId, GameStats>,
    fail_writes: bool,
}

impl MemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `save` and `reset` fails; reads still work.
    pub fn failing() -> Self {
        Self {
            stats: HashMap::new(),
            fail_writes: true,
        }
    }

    pub fn with_stats(game_id: GameId, stats: GameStats) -> Self {
        Self {
            stats: HashMap::from([(game_id, stats)]),
            fail_writes: false,
        }
    }
}

impl StatsStore for MemoryStatsStore {
    fn load(&self, game_id: &GameId) -> Result<GameStats, StatsError> {
        Ok(self.stats.get(game_id).cloned().unwrap_or_default())
    }

    fn save(&mut self, game_id: &GameId, stats: &GameStats) -> Result<(), StatsError> {
        if self.fail_writes {
            return Err(StatsError::Write("storage unavailable".to_string()));
        }
        self.stats.insert(game_id.clone(), stats.clone());
        Ok(())
    }

    fn reset(&mut self, game_id: &GameId) -> Result<(), StatsError> {
        if self.fail_writes {
            return Err(StatsError::Write("storage unavailable".to_string()));
        }
        self.stats.remove(game_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_temp_file_path() -> String {
        let random_number: u32 = rand::random();
        std::env::temp_dir()
            .join(format!("mini_arcade_stats_{}.yaml", random_number))
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn test_unknown_game_reads_as_default() {
        let store = FileStatsStore::in_memory();
        assert_eq!(store.load(&GameId::snake()).unwrap(), GameStats::default());
    }

    #[test]
    fn test_games_are_stored_side_by_side() {
        let mut store = FileStatsStore::in_memory();
        let snake_stats = GameStats {
            high_score: 120,
            wins: 1,
            best_time_secs: Some(300),
        };
        let other_stats = GameStats {
            high_score: 7,
            ..GameStats::default()
        };

        store.save(&GameId::snake(), &snake_stats).unwrap();
        store.save(&GameId::new("tetris"), &other_stats).unwrap();

        assert_eq!(store.load(&GameId::snake()).unwrap(), snake_stats);
        assert_eq!(store.load(&GameId::new("tetris")).unwrap(), other_stats);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let path = get_temp_file_path();
        let stats = GameStats {
            high_score: 90,
            ..GameStats::default()
        };

        FileStatsStore::from_yaml_file(&path)
            .save(&GameId::snake(), &stats)
            .unwrap();
        let reopened = FileStatsStore::from_yaml_file(&path);

        assert_eq!(reopened.load(&GameId::snake()).unwrap(), stats);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_garbage_document_is_format_error() {
        let store = FileStatsStore::new(MemoryContentProvider::with_content("snake: [1, 2"));
        assert!(matches!(store.load(&GameId::snake()), Err(StatsError::Format(_))));
    }

    #[test]
    fn test_read_only_storage_fails_writes() {
        let mut store = FileStatsStore::new(MemoryContentProvider::read_only());
        let result = store.save(&GameId::snake(), &GameStats::default());
        assert!(matches!(result, Err(StatsError::Write(_))));
    }

    #[test]
    fn test_failing_memory_store() {
        let mut store = MemoryStatsStore::failing();
        assert!(store.save(&GameId::snake(), &GameStats::default()).is_err());
        assert_eq!(store.load(&GameId::snake()).unwrap(), GameStats::default());
    }

    #[test]
    fn test_reset_forgets_one_game() {
        let path = get_temp_file_path();
        let mut store = FileStatsStore::from_yaml_file(&path);
        let other_stats = GameStats {
            high_score: 7,
            ..GameStats::default()
        };
        store
            .save(
                &GameId::snake(),
                &GameStats {
                    high_score: 120,
                    wins: 2,
                    best_time_secs: Some(300),
                },
            )
            .unwrap();
        store.save(&GameId::new("tetris"), &other_stats).unwrap();

        store.reset(&GameId::snake()).unwrap();

        let reopened = FileStatsStore::from_yaml_file(&path);
        assert_eq!(reopened.load(&GameId::snake()).unwrap(), GameStats::default());
        assert_eq!(reopened.load(&GameId::new("tetris")).unwrap(), other_stats);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_reset_of_unknown_game_is_noop() {
        let mut store = FileStatsStore::new(MemoryContentProvider::read_only());
        assert_eq!(store.reset(&GameId::snake()), Ok(()));
    }

    #[test]
    fn test_memory_store_reset() {
        let mut store = MemoryStatsStore::with_stats(
            GameId::snake(),
            GameStats {
                high_score: 40,
                ..GameStats::default()
            },
        );
        store.reset(&GameId::snake()).unwrap();
        assert_eq!(store.load(&GameId::snake()).unwrap(), GameStats::default());

        let mut failing = MemoryStatsStore::failing();
        assert!(matches!(failing.reset(&GameId::snake()), Err(StatsError::Write(_))));
    }
}
