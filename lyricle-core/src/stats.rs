use lyricle_types::{GameStats, Guess};
use std::collections::HashSet;

pub struct StatsAggregator;

impl StatsAggregator {
    /// Aggregate every guess of one game, across all players.
    ///
    /// `wins` counts players with at least one valid guess. It does not apply
    /// the lyrics/title win condition used for game states.
    pub fn aggregate(guesses: &[Guess]) -> GameStats {
        let total_guesses = guesses.len() as u32;
        let correct_guesses = guesses.iter().filter(|guess| guess.valid).count() as u32;

        let players: HashSet<&str> = guesses.iter().map(|guess| guess.player_id.as_str()).collect();
        let winners: HashSet<&str> = guesses
            .iter()
            .filter(|guess| guess.valid)
            .map(|guess| guess.player_id.as_str())
            .collect();

        let total_players = players.len() as u32;
        let wins = winners.len() as u32;
        let average_attempts = if total_players > 0 {
            f64::from(total_guesses) / f64::from(total_players)
        } else {
            0.0
        };

        GameStats {
            total_guesses,
            correct_guesses,
            average_attempts,
            wins,
            total_players,
            average_guesses: average_attempts,
            total_valid_guesses: correct_guesses,
            average_lyrics_completion_for_winners: if wins > 0 { 1.0 } else { 0.0 },
            difficulty_score: 0.0,
        }
    }
}
