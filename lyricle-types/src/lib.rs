pub mod errors;
pub mod game;
pub mod song;
pub mod stats;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use song::*;
pub use stats::*;

pub type GameId = uuid::Uuid;
pub type SongId = uuid::Uuid;
pub type GuessId = uuid::Uuid;
/// Opaque, caller-supplied player identifier
pub type PlayerId = String;
