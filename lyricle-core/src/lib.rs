pub mod error;
pub mod game_state;
pub mod ingestion;
pub mod masked_lyrics;
pub mod repository;
pub mod service;
pub mod stats;
pub mod tokenizer;
pub mod word_validation;

// Re-export main components
pub use error::*;
pub use game_state::*;
pub use ingestion::*;
pub use masked_lyrics::*;
pub use repository::*;
pub use service::*;
pub use stats::*;
pub use tokenizer::*;
pub use word_validation::*;
