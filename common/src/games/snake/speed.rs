use std::time::Duration;

use serde::{Deserialize, Serialize};

const LEVEL_STEP_MIN_MS: u64 = 10;
const LEVEL_STEP_BASE_MS: u64 = 100;

/// How the tick interval shrinks as the game goes on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedCurve {
    /// Each new level takes `max(10ms, 100ms / level)` off the interval.
    PerLevel,
    /// Each eaten food scales the interval to `percent`% of its value.
    PerFood { percent: u32 },
}

impl SpeedCurve {
    pub fn after_level_up(&self, current: Duration, new_level: u32, floor: Duration) -> Duration {
        match self {
            SpeedCurve::PerLevel => {
                let step = (LEVEL_STEP_BASE_MS / u64::from(new_level.max(1))).max(LEVEL_STEP_MIN_MS);
                current.saturating_sub(Duration::from_millis(step)).max(floor)
            }
            SpeedCurve::PerFood { .. } => current,
        }
    }

    pub fn after_food(&self, current: Duration, floor: Duration) -> Duration {
        match self {
            SpeedCurve::PerLevel => current,
            SpeedCurve::PerFood { percent } => {
                let scaled_ms = current.as_millis() as u64 * u64::from(*percent) / 100;
                Duration::from_millis(scaled_ms).max(floor)
            }
        }
    }
}
