use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::food::DEFAULT_PLACEMENT_ATTEMPTS;
use super::speed::SpeedCurve;
use super::types::FieldSize;

pub const MAX_FIELD_SIDE: usize = 1024;
/// Upper bound on levels gained from a single food item.
pub const MAX_LEVELS_PER_FOOD: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    pub field_width: usize,
    pub field_height: usize,
    pub initial_length: usize,
    pub initial_tick_interval_ms: u64,
    pub min_tick_interval_ms: u64,
    pub points_per_food: u32,
    pub points_to_level_up: u32,
    pub speed_curve: SpeedCurve,
    /// Every n-th level adds one more food item, 0 disables bonus food.
    pub bonus_food_every_levels: u32,
    pub max_food_count: usize,
    pub placement_attempts: usize,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self::leveled()
    }
}

impl SnakeSettings {
    /// Level-based speed-up with bonus food every five levels.
    pub fn leveled() -> Self {
        Self {
            field_width: 20,
            field_height: 20,
            initial_length: 3,
            initial_tick_interval_ms: 150,
            min_tick_interval_ms: 50,
            points_per_food: 10,
            points_to_level_up: 100,
            speed_curve: SpeedCurve::PerLevel,
            bonus_food_every_levels: 5,
            max_food_count: 3,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
        }
    }

    /// Every food speeds the game up by 2%, a single food item at a time.
    pub fn classic() -> Self {
        Self {
            speed_curve: SpeedCurve::PerFood { percent: 98 },
            bonus_food_every_levels: 0,
            max_food_count: 1,
            ..Self::leveled()
        }
    }

    pub fn with_field(&self, width: usize, height: usize, initial_length: usize) -> Self {
        Self {
            field_width: width,
            field_height: height,
            initial_length,
            ..self.clone()
        }
    }

    pub fn field_size(&self) -> FieldSize {
        FieldSize::new(self.field_width, self.field_height)
    }

    pub fn initial_tick_interval(&self) -> Duration {
        Duration::from_millis(self.initial_tick_interval_ms)
    }

    pub fn min_tick_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let side_range = 1..=MAX_FIELD_SIDE;
        if !side_range.contains(&self.field_width) || !side_range.contains(&self.field_height) {
            return Err(SettingsError::FieldSize {
                width: self.field_width,
                height: self.field_height,
            });
        }

        let max_length = self
            .field_width
            .min(self.field_size().cell_count() - 1);
        if self.initial_length == 0 || self.initial_length > max_length {
            return Err(SettingsError::InitialLength {
                length: self.initial_length,
                max: max_length,
            });
        }

        if self.min_tick_interval_ms == 0 || self.min_tick_interval_ms > self.initial_tick_interval_ms {
            return Err(SettingsError::TickInterval {
                initial_ms: self.initial_tick_interval_ms,
                min_ms: self.min_tick_interval_ms,
            });
        }

        if self.points_per_food == 0 {
            return Err(SettingsError::PointsPerFood);
        }
        if self.points_to_level_up == 0 {
            return Err(SettingsError::PointsToLevelUp);
        }

        // The score of a board filled with food has to fit in u32.
        let cell_count = self.field_size().cell_count();
        let max_score = (cell_count as u64).saturating_mul(u64::from(self.points_per_food));
        if max_score > u64::from(u32::MAX) {
            return Err(SettingsError::ScoreOverflow {
                points_per_food: self.points_per_food,
                cell_count,
            });
        }
        if u64::from(self.points_per_food) > u64::from(self.points_to_level_up) * u64::from(MAX_LEVELS_PER_FOOD) {
            return Err(SettingsError::LevelsPerFood {
                points_per_food: self.points_per_food,
                points_to_level_up: self.points_to_level_up,
            });
        }
        if self.max_food_count == 0 {
            return Err(SettingsError::MaxFoodCount);
        }
        if self.placement_attempts == 0 {
            return Err(SettingsError::PlacementAttempts);
        }

        if let SpeedCurve::PerFood { percent } = self.speed_curve
            && !(1..=100).contains(&percent)
        {
            return Err(SettingsError::SpeedPercent(percent));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    FieldSize { width: usize, height: usize },
    InitialLength { length: usize, max: usize },
    TickInterval { initial_ms: u64, min_ms: u64 },
    PointsPerFood,
    PointsToLevelUp,
    ScoreOverflow { points_per_food: u32, cell_count: usize },
    LevelsPerFood { points_per_food: u32, points_to_level_up: u32 },
    MaxFoodCount,
    PlacementAttempts,
    SpeedPercent(u32),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::FieldSize { width, height } => write!(
                f,
                "Field size {}x{} is invalid, each side must be between 1 and {}",
                width, height, MAX_FIELD_SIDE
            ),
            SettingsError::InitialLength { length, max } => {
                write!(f, "Initial snake length {} must be between 1 and {}", length, max)
            }
            SettingsError::TickInterval { initial_ms, min_ms } => write!(
                f,
                "Tick interval floor {}ms must be positive and not above the initial {}ms",
                min_ms, initial_ms
            ),
            SettingsError::PointsPerFood => write!(f, "Points per food must be at least 1"),
            SettingsError::PointsToLevelUp => write!(f, "Points to level up must be at least 1"),
            SettingsError::ScoreOverflow { points_per_food, cell_count } => write!(
                f,
                "{} points per food on {} cells can overflow the score",
                points_per_food, cell_count
            ),
            SettingsError::LevelsPerFood {
                points_per_food,
                points_to_level_up,
            } => write!(
                f,
                "{} points per food with {} points per level gains more than {} levels at once",
                points_per_food, points_to_level_up, MAX_LEVELS_PER_FOOD
            ),
            SettingsError::MaxFoodCount => write!(f, "Max food count must be at least 1"),
            SettingsError::PlacementAttempts => write!(f, "Placement attempts must be at least 1"),
            SettingsError::SpeedPercent(percent) => {
                write!(f, "Per-food speed factor {}% must be between 1 and 100", percent)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(SnakeSettings::leveled().validate(), Ok(()));
        assert_eq!(SnakeSettings::classic().validate(), Ok(()));
        assert_eq!(SnakeSettings::default(), SnakeSettings::leveled());
    }

    #[test]
    fn test_zero_sized_field_rejected() {
        let settings = SnakeSettings::default().with_field(0, 20, 3);
        assert_eq!(
            settings.validate(),
            Err(SettingsError::FieldSize { width: 0, height: 20 })
        );

        let settings = SnakeSettings::default().with_field(20, MAX_FIELD_SIDE + 1, 3);
        assert!(matches!(settings.validate(), Err(SettingsError::FieldSize { .. })));
    }

    #[test]
    fn test_initial_length_must_fit() {
        let settings = SnakeSettings::default().with_field(5, 5, 6);
        assert_eq!(
            settings.validate(),
            Err(SettingsError::InitialLength { length: 6, max: 5 })
        );

        let settings = SnakeSettings::default().with_field(5, 5, 0);
        assert!(matches!(settings.validate(), Err(SettingsError::InitialLength { .. })));

        // A 2x1 field has room for a one-segment snake plus one food cell.
        let settings = SnakeSettings::default().with_field(2, 1, 2);
        assert_eq!(
            settings.validate(),
            Err(SettingsError::InitialLength { length: 2, max: 1 })
        );
        assert_eq!(SnakeSettings::default().with_field(2, 1, 1).validate(), Ok(()));
    }

    #[test]
    fn test_single_cell_field_has_no_room() {
        let settings = SnakeSettings::default().with_field(1, 1, 1);
        assert_eq!(
            settings.validate(),
            Err(SettingsError::InitialLength { length: 1, max: 0 })
        );
    }

    #[test]
    fn test_tick_floor_above_initial_rejected() {
        let settings = SnakeSettings {
            min_tick_interval_ms: 200,
            ..SnakeSettings::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::TickInterval { .. })));
    }

    #[test]
    fn test_speed_percent_range() {
        let settings = SnakeSettings {
            speed_curve: SpeedCurve::PerFood { percent: 0 },
            ..SnakeSettings::classic()
        };
        assert_eq!(settings.validate(), Err(SettingsError::SpeedPercent(0)));
    }

    #[test]
    fn test_huge_points_per_food_rejected() {
        let settings = SnakeSettings {
            points_per_food: 3_000_000_000,
            points_to_level_up: 3_000_000_000,
            ..SnakeSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::ScoreOverflow {
                points_per_food: 3_000_000_000,
                cell_count: 400
            })
        );

        // Largest reward a 20x20 board can still hold.
        let settings = SnakeSettings {
            points_per_food: u32::MAX / 400,
            points_to_level_up: u32::MAX / 400,
            ..SnakeSettings::default()
        };
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn test_levels_per_food_bounded() {
        let settings = SnakeSettings {
            points_per_food: 101,
            points_to_level_up: 1,
            ..SnakeSettings::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::LevelsPerFood { .. })));

        let settings = SnakeSettings {
            points_per_food: 100,
            points_to_level_up: 1,
            ..SnakeSettings::default()
        };
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn test_error_message_is_descriptive() {
        let message = SettingsError::InitialLength { length: 9, max: 4 }.to_string();
        assert!(message.contains('9'));
        assert!(message.contains('4'));
    }
}
