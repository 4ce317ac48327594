use crate::masked_lyrics::MaskedLyricsService;
use anyhow::{Result, anyhow};
use lyricle_types::{Game, GameState, Guess, MaskedLyrics, Song, SongIdentity, Token};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

pub const DEFAULT_LYRICS_WIN_RATIO: f64 = 0.8;

/// Thresholds that decide when a player has won the day's game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinRules {
    /// Share of guessable lyrics tokens that must be found, inclusive
    pub lyrics_ratio: f64,
}

impl Default for WinRules {
    fn default() -> Self {
        Self {
            lyrics_ratio: DEFAULT_LYRICS_WIN_RATIO,
        }
    }
}

impl WinRules {
    pub fn with_lyrics_ratio(lyrics_ratio: f64) -> Result<Self> {
        if !(lyrics_ratio > 0.0 && lyrics_ratio <= 1.0) {
            return Err(anyhow!(
                "lyrics win ratio must be in (0, 1], got {}",
                lyrics_ratio
            ));
        }
        Ok(Self { lyrics_ratio })
    }
}

/// Found/total counts of guessable tokens for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealProgress {
    pub lyrics_found: usize,
    pub lyrics_total: usize,
    pub title_artist_found: usize,
    pub title_artist_total: usize,
}

impl RevealProgress {
    pub fn measure(masked: &MaskedLyrics, found_words: &HashSet<String>) -> Self {
        let (lyrics_found, lyrics_total) = count(&masked.lyrics, found_words);
        let (title_found, title_total) = count(&masked.title, found_words);
        let (artist_found, artist_total) = count(&masked.artist, found_words);

        Self {
            lyrics_found,
            lyrics_total,
            title_artist_found: title_found + artist_found,
            title_artist_total: title_total + artist_total,
        }
    }

    /// Fraction of lyrics tokens found, `None` when the lyrics have no words
    pub fn lyrics_completion(&self) -> Option<f64> {
        if self.lyrics_total == 0 {
            return None;
        }
        Some(self.lyrics_found as f64 / self.lyrics_total as f64)
    }

    pub fn is_won(&self, rules: &WinRules) -> bool {
        let lyrics_won = self
            .lyrics_completion()
            .is_some_and(|completion| completion >= rules.lyrics_ratio);
        let title_artist_won = self.title_artist_total > 0
            && self.title_artist_found == self.title_artist_total;

        lyrics_won || title_artist_won
    }
}

fn count(tokens: &[Token], found_words: &HashSet<String>) -> (usize, usize) {
    tokens
        .iter()
        .filter(|token| token.is_to_guess)
        .fold((0, 0), |(found, total), token| {
            let hit = found_words.contains(&token.normalized());
            (found + usize::from(hit), total + 1)
        })
}

/// Lowercased words of the valid guesses
pub fn found_words(guesses: &[Guess]) -> HashSet<String> {
    guesses
        .iter()
        .filter(|guess| guess.valid)
        .map(|guess| guess.word.to_lowercase())
        .collect()
}

/// Projects a song plus one player's guesses into that player's game state
#[derive(Debug, Clone, Default)]
pub struct GameStateEngine {
    rules: WinRules,
}

impl GameStateEngine {
    pub fn new(rules: WinRules) -> Self {
        Self { rules }
    }

    /// `guesses` must be the player's guesses in chronological order
    pub fn project(&self, game: &Game, song: &Song, guesses: Vec<Guess>) -> GameState {
        let found = found_words(&guesses);
        let progress = RevealProgress::measure(&song.masked_lyrics, &found);
        let is_won = progress.is_won(&self.rules);

        debug!(
            game_id = %game.id,
            lyrics_found = progress.lyrics_found,
            lyrics_total = progress.lyrics_total,
            title_artist_found = progress.title_artist_found,
            title_artist_total = progress.title_artist_total,
            is_won,
            "projected game state"
        );

        let is_revealed = |token: &Token| is_won || found.contains(&token.normalized());
        let source = &song.masked_lyrics;
        let masked = MaskedLyrics {
            title: MaskedLyricsService::mask_tokens(&source.title, &is_revealed),
            artist: MaskedLyricsService::mask_tokens(&source.artist, &is_revealed),
            lyrics: MaskedLyricsService::mask_tokens(&source.lyrics, &is_revealed),
        };

        let song = is_won.then(|| SongIdentity {
            title: song.title.clone(),
            artist: song.artist.clone(),
        });

        GameState {
            id: game.id,
            date: game.date.clone(),
            masked,
            guesses,
            song,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyricle_types::TrackMetadata;
    use uuid::Uuid;

    fn song(title: &str, artist: &str, lyrics: &str) -> Song {
        Song {
            id: Uuid::new_v4(),
            title: title.to_string(),
            artist: artist.to_string(),
            lyrics: lyrics.to_string(),
            masked_lyrics: MaskedLyricsService::create(title, artist, lyrics),
            metadata: TrackMetadata::default(),
        }
    }

    fn game_for(song: &Song) -> Game {
        Game {
            id: Uuid::new_v4(),
            date: "2025-03-14".to_string(),
            song_id: song.id,
        }
    }

    fn guess(game: &Game, word: &str, valid: bool) -> Guess {
        Guess {
            id: Uuid::new_v4(),
            game_id: game.id,
            player_id: "player-1".to_string(),
            word: word.to_string(),
            valid,
            created_at: "2025-03-14T10:00:00+00:00".to_string(),
        }
    }

    fn words(list: &[&str]) -> HashSet<String> {
        list.iter().map(|word| word.to_string()).collect()
    }

    const TEN_WORDS: &str = "one two three four five six seven eight nine ten";

    #[test]
    fn test_win_threshold_is_inclusive() {
        let masked = MaskedLyricsService::create("", "", TEN_WORDS);
        let rules = WinRules::default();

        let eight = words(&["one", "two", "three", "four", "five", "six", "seven", "eight"]);
        let progress = RevealProgress::measure(&masked, &eight);
        assert_eq!(progress.lyrics_found, 8);
        assert_eq!(progress.lyrics_total, 10);
        assert!(progress.is_won(&rules));

        let seven = words(&["one", "two", "three", "four", "five", "six", "seven"]);
        assert!(!RevealProgress::measure(&masked, &seven).is_won(&rules));
    }

    #[test]
    fn test_repeated_tokens_count_each_occurrence() {
        let masked = MaskedLyricsService::create("", "", "la la la land");
        let progress = RevealProgress::measure(&masked, &words(&["la"]));
        assert_eq!(progress.lyrics_found, 3);
        assert_eq!(progress.lyrics_total, 4);
        assert_eq!(progress.lyrics_completion(), Some(0.75));
    }

    #[test]
    fn test_zero_denominators_never_win() {
        let masked = MaskedLyricsService::create("...", "!!", "");
        let progress = RevealProgress::measure(&masked, &HashSet::new());
        assert_eq!(progress, RevealProgress::default());
        assert_eq!(progress.lyrics_completion(), None);
        assert!(!progress.is_won(&WinRules::default()));
    }

    #[test]
    fn test_title_and_artist_branch_wins() {
        let song = song("Hello", "Adele", TEN_WORDS);
        let game = game_for(&song);
        let engine = GameStateEngine::default();

        let state = engine.project(
            &game,
            &song,
            vec![guess(&game, "hello", true), guess(&game, "adele", true)],
        );

        assert!(state.is_won());
        assert_eq!(
            state.song,
            Some(SongIdentity {
                title: "Hello".to_string(),
                artist: "Adele".to_string()
            })
        );
        // A won game reveals everything, lyrics included
        assert_eq!(state.masked, song.masked_lyrics);
    }

    #[test]
    fn test_partial_progress_masks_unfound_words() {
        let song = song("Hello", "Adele", "Hello from the other side");
        let game = game_for(&song);
        let engine = GameStateEngine::default();

        let state = engine.project(
            &game,
            &song,
            vec![guess(&game, "hello", true), guess(&game, "wrong", false)],
        );

        assert!(!state.is_won());
        assert!(state.song.is_none());
        assert_eq!(state.masked.title, vec![Token::guessable("Hello")]);
        assert_eq!(state.masked.artist, vec![Token::guessable("_____")]);
        let lyrics: String = state.masked.lyrics.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(lyrics, "Hello ____ ___ _____ ____");
        assert_eq!(state.guesses.len(), 2);
        assert_eq!(state.date, "2025-03-14");
        assert_eq!(state.id, game.id);
    }

    #[test]
    fn test_invalid_guess_never_reveals() {
        let song = song("Hello", "Adele", "Hello from the other side");
        let game = game_for(&song);

        // Stored invalid rows do not count even if the word happens to match
        let state = GameStateEngine::default().project(&game, &song, vec![guess(&game, "adele", false)]);
        assert_eq!(state.masked.artist, vec![Token::guessable("_____")]);
    }

    #[test]
    fn test_custom_ratio() {
        let masked = MaskedLyricsService::create("", "", TEN_WORDS);
        let rules = WinRules::with_lyrics_ratio(0.5).unwrap();
        let five = words(&["one", "two", "three", "four", "five"]);
        assert!(RevealProgress::measure(&masked, &five).is_won(&rules));

        assert!(WinRules::with_lyrics_ratio(0.0).is_err());
        assert!(WinRules::with_lyrics_ratio(1.5).is_err());
        assert!(WinRules::with_lyrics_ratio(f64::NAN).is_err());
        assert!(WinRules::with_lyrics_ratio(1.0).is_ok());
    }
}
