pub mod config;
pub mod games;
pub mod identifiers;
pub mod logger;
pub mod replay;
pub mod stats;

pub use identifiers::GameId;

pub mod version {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
