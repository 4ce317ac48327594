use crate::{GameId, GuessId, PlayerId, SongId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An atomic span of source text. Guessable tokens are runs of letters or digits,
/// everything in between (spaces, punctuation, symbols) is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Token {
    pub value: String,
    pub is_to_guess: bool,
}

impl Token {
    pub fn guessable(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_to_guess: true,
        }
    }

    pub fn separator(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_to_guess: false,
        }
    }

    /// Lowercased value, the form guesses are compared against
    pub fn normalized(&self) -> String {
        self.value.to_lowercase()
    }

    /// Underscore run with one `_` per character of the original value
    pub fn blank(&self) -> String {
        "_".repeat(self.value.chars().count())
    }
}

/// Tokenized title, artist and lyrics of one song. The three arrays are
/// independent token spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MaskedLyrics {
    pub title: Vec<Token>,
    pub artist: Vec<Token>,
    pub lyrics: Vec<Token>,
}

impl MaskedLyrics {
    /// All tokens of the three sections, title first
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.title
            .iter()
            .chain(self.artist.iter())
            .chain(self.lyrics.iter())
    }

    pub fn guessable_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens().filter(|token| token.is_to_guess)
    }
}

/// Plain-text rendering of a `MaskedLyrics`, with hidden words replaced by underscores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RevealedText {
    pub title: String,
    pub artist: String,
    pub lyrics: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Guess {
    pub id: GuessId,
    pub game_id: GameId,
    pub player_id: PlayerId,
    /// Trimmed and lowercased
    pub word: String,
    pub valid: bool,
    pub created_at: String, // ISO 8601 string
}

/// A guess ready to be appended; id and timestamp are assigned by storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuess {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub word: String,
    pub valid: bool,
}

/// A song scheduled on a calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Game {
    pub id: GameId,
    pub date: String, // YYYY-MM-DD
    pub song_id: SongId,
}

/// The true identity of the song, only ever exposed once a game is won
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SongIdentity {
    pub title: String,
    pub artist: String,
}

/// Per-player projection of a day's game. Recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameState {
    pub id: GameId,
    pub date: String,
    pub masked: MaskedLyrics,
    pub guesses: Vec<Guess>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub song: Option<SongIdentity>,
}

impl GameState {
    pub fn is_won(&self) -> bool {
        self.song.is_some()
    }
}
