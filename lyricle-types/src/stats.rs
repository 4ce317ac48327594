use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Cross-player aggregates for one game, recomputed from the guess rows on every read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameStats {
    pub total_guesses: u32,
    pub correct_guesses: u32,
    pub average_attempts: f64,
    /// Players with at least one valid guess. This is coarser than the
    /// win condition used for game states.
    pub wins: u32,
    pub total_players: u32,
    pub average_guesses: f64,
    pub total_valid_guesses: u32,
    /// Placeholder: 1.0 when anyone has won, 0.0 otherwise
    pub average_lyrics_completion_for_winners: f64,
    /// Placeholder: always 0.0
    pub difficulty_score: f64,
}
