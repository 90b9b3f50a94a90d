use std::fmt;

use serde::{Deserialize, Serialize};

/// Key under which per-game statistics are stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub const SNAKE: &'static str = "snake";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn snake() -> Self {
        Self::new(Self::SNAKE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for GameId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<GameId> for String {
    fn from(id: GameId) -> Self {
        id.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
