mod bot_controller;
mod events;
mod food;
mod game_state;
mod session;
mod settings;
mod snake;
mod speed;
mod types;

pub use bot_controller::{BotController, SnakeBotType};
pub use events::{SnakeEvent, SnakeObserver, SnakeRenderer};
pub use food::{DEFAULT_PLACEMENT_ATTEMPTS, Placement, place_food};
pub use game_state::{SimulationPhase, SnakeGameState, SnakeSnapshot, TickOutcome, TickStatus};
pub use session::SnakeSession;
pub use settings::{MAX_FIELD_SIDE, MAX_LEVELS_PER_FOOD, SettingsError, SnakeSettings};
pub use snake::Snake;
pub use speed::SpeedCurve;
pub use types::{DeathReason, Direction, FieldSize, Point};
