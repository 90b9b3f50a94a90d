use crate::games::snake::SnakeSettings;

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        SnakeSettings::validate(self).map_err(|e| e.to_string())
    }
}
