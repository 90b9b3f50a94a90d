pub(crate) use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::snake::{SnakeBotType, SnakeSettings};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "mini_arcade_runner_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager(path: Option<&str>) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(&get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub snake: SnakeSettings,
    pub bot: SnakeBotType,
    pub stats: StatsConfig,
    pub replays: ReplayConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        Validate::validate(&self.snake)?;
        self.stats.validate()?;
        self.replays.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snake: SnakeSettings::default(),
            bot: SnakeBotType::Efficient,
            stats: StatsConfig {
                file: common::stats::STATS_FILE_NAME.to_string(),
            },
            replays: ReplayConfig {
                save: true,
                location: "snakereplays".to_string(),
            },
            audio: AudioConfig::default(),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct StatsConfig {
    pub file: String,
}

impl Validate for StatsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.file.trim().is_empty() {
            return Err("stats file must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ReplayConfig {
    pub save: bool,
    pub location: String,
}

impl Validate for ReplayConfig {
    fn validate(&self) -> Result<(), String> {
        if self.save && self.location.trim().is_empty() {
            return Err("replay location must not be empty when saving replays".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct AudioConfig {
    pub enabled: bool,
    /// The move cue fires on every accepted turn, which gets chatty with a bot at the wheel.
    pub move_cues: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            move_cues: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigSerializer};
    use common::games::snake::SpeedCurve;

    fn get_temp_file_path() -> String {
        use std::env;
        let mut path = env::temp_dir();
        let random_number: u32 = rand::random();
        let file_name = format!("temp_mini_arcade_runner_config_{}.yaml", random_number);
        path.push(file_name);
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();

        let serialized_string = serializer.serialize(&default_config).unwrap();
        let deserialized_config: Config = serializer.deserialize(&serialized_string).unwrap();

        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_file() {
        let file_path = get_temp_file_path();
        let config_manager = get_config_manager(Some(&file_path));
        let mut config = Config::default();
        config.snake = SnakeSettings::classic();
        config.bot = SnakeBotType::Random;

        config_manager.set_config(&config).unwrap();

        let content = FileContentConfigProvider::new(file_path.clone())
            .get_config_content()
            .unwrap();
        assert!(content.is_some());

        let reloaded = get_config_manager(Some(&file_path)).get_config().unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.snake.speed_curve, SpeedCurve::PerFood { percent: 98 });

        let _ = std::fs::remove_file(&file_path);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config_manager = get_config_manager(Some(&get_temp_file_path()));
        assert_eq!(config_manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_snake_settings_rejected() {
        let mut config = Config::default();
        config.snake.field_width = 0;

        let err = config.validate().unwrap_err();

        assert!(err.contains("Field size"));
    }

    #[test]
    fn test_empty_replay_location_rejected_only_when_saving() {
        let mut config = Config::default();
        config.replays.location = String::new();
        assert!(config.validate().is_err());

        config.replays.save = false;
        assert_eq!(config.validate(), Ok(()));
    }
}
