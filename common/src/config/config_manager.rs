use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, MemoryContentProvider,
    Validate, YamlConfigSerializer,
};

/// Loads, validates and caches a typed config document. A missing document yields defaults.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer::new())
    }
}

impl<TConfig> ConfigManager<MemoryContentProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_str(content: &str) -> Self {
        Self::new(MemoryContentProvider::with_content(content), YamlConfigSerializer::new())
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(config_content_provider: TConfigContentProvider, config_serializer: TConfigSerializer) -> Self {
        Self {
            config: Mutex::new(None),
            config_content_provider,
            config_serializer,
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::{SnakeSettings, SpeedCurve};

    #[test]
    fn test_missing_document_gives_defaults() {
        let manager: ConfigManager<_, SnakeSettings> =
            ConfigManager::new(MemoryContentProvider::new(), YamlConfigSerializer::new());

        assert_eq!(manager.get_config().unwrap(), SnakeSettings::default());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let manager: ConfigManager<_, SnakeSettings> =
            ConfigManager::from_yaml_str("field_width: 30\nspeed_curve: !PerFood\n  percent: 95\n");

        let settings = manager.get_config().unwrap();

        assert_eq!(settings.field_width, 30);
        assert_eq!(settings.field_height, 20);
        assert_eq!(settings.speed_curve, SpeedCurve::PerFood { percent: 95 });
    }

    #[test]
    fn test_invalid_document_rejected() {
        let manager: ConfigManager<_, SnakeSettings> = ConfigManager::from_yaml_str("field_width: 0\n");

        let err = manager.get_config().unwrap_err();

        assert!(err.contains("Config validation error"));
    }

    #[test]
    fn test_set_config_rejects_invalid_and_keeps_previous() {
        let manager: ConfigManager<_, SnakeSettings> =
            ConfigManager::new(MemoryContentProvider::new(), YamlConfigSerializer::new());
        let classic = SnakeSettings::classic();
        manager.set_config(&classic).unwrap();

        let broken = SnakeSettings {
            points_per_food: 0,
            ..SnakeSettings::default()
        };

        assert!(manager.set_config(&broken).is_err());
        assert_eq!(manager.get_config().unwrap(), classic);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let manager: ConfigManager<_, SnakeSettings> =
            ConfigManager::new(MemoryContentProvider::read_only(), YamlConfigSerializer::new());

        assert!(manager.set_config(&SnakeSettings::default()).is_err());
    }
}
