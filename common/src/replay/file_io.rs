use std::path::Path;

use super::{REPLAY_FILE_EXTENSION, REPLAY_VERSION, SnakeReplay};

#[derive(Debug)]
pub enum ReplayError {
    IoError(std::io::Error),
    DecodeError(serde_yaml_ng::Error),
    UnsupportedVersion { found: u8, expected: u8 },
    EmptyFile,
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::IoError(e) => write!(f, "IO error: {}", e),
            ReplayError::DecodeError(e) => write!(f, "Decode error: {}", e),
            ReplayError::UnsupportedVersion { found, expected } => {
                write!(f, "Unsupported replay version: found {}, expected {}", found, expected)
            }
            ReplayError::EmptyFile => write!(f, "Empty replay file"),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        ReplayError::IoError(e)
    }
}

impl From<serde_yaml_ng::Error> for ReplayError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        ReplayError::DecodeError(e)
    }
}

pub fn save_replay(path: &Path, replay: &SnakeReplay) -> Result<(), ReplayError> {
    std::fs::write(path, save_replay_to_string(replay)?)?;
    Ok(())
}

pub fn save_replay_to_string(replay: &SnakeReplay) -> Result<String, ReplayError> {
    Ok(serde_yaml_ng::to_string(replay)?)
}

pub fn load_replay(path: &Path) -> Result<SnakeReplay, ReplayError> {
    let content = std::fs::read_to_string(path)?;
    load_replay_from_str(&content)
}

pub fn load_replay_from_str(content: &str) -> Result<SnakeReplay, ReplayError> {
    if content.trim().is_empty() {
        return Err(ReplayError::EmptyFile);
    }

    let replay: SnakeReplay = serde_yaml_ng::from_str(content)?;
    if replay.format_version != REPLAY_VERSION {
        return Err(ReplayError::UnsupportedVersion {
            found: replay.format_version,
            expected: REPLAY_VERSION,
        });
    }

    Ok(replay)
}

pub fn generate_replay_filename(version: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    let sanitized_version = version.replace('.', "_");

    format!("{}_SNAKE_{}.{}", timestamp, sanitized_version, REPLAY_FILE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::{Direction, SnakeSettings};
    use crate::replay::RecordedTurn;

    fn create_test_replay() -> SnakeReplay {
        SnakeReplay {
            format_version: REPLAY_VERSION,
            engine_version: "1.0.0".to_string(),
            game_started_timestamp_ms: 1234567890,
            seed: 42,
            settings: SnakeSettings::classic(),
            turns: vec![RecordedTurn { tick: 4, direction: Direction::Down }],
        }
    }

    #[test]
    fn test_save_load_replay_file() {
        let random_number: u32 = rand::random();
        let path = std::env::temp_dir().join(format!("mini_arcade_replay_{}.{}", random_number, REPLAY_FILE_EXTENSION));
        let replay = create_test_replay();

        save_replay(&path, &replay).unwrap();
        let loaded = load_replay(&path).unwrap();

        assert_eq!(loaded, replay);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_generate_replay_filename() {
        let filename = generate_replay_filename("1.2.3");
        assert!(filename.ends_with(".snakereplay"));
        assert!(filename.contains("SNAKE"));
        assert!(filename.contains("1_2_3"));
    }

    #[test]
    fn test_load_empty_file_error() {
        let result = load_replay_from_str("  \n");
        assert!(matches!(result, Err(ReplayError::EmptyFile)));
    }

    #[test]
    fn test_load_unsupported_version_error() {
        let replay = SnakeReplay {
            format_version: 99,
            ..create_test_replay()
        };
        let text = save_replay_to_string(&replay).unwrap();

        let result = load_replay_from_str(&text);

        assert!(matches!(result, Err(ReplayError::UnsupportedVersion { found: 99, .. })));
    }

    #[test]
    fn test_load_garbage_is_decode_error() {
        let result = load_replay_from_str("seed: [unterminated");
        assert!(matches!(result, Err(ReplayError::DecodeError(_))));
    }
}
