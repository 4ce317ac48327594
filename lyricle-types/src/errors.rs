use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Caller-supplied input that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InputField {
    Date,
    Month,
    PlayerId,
    Word,
    Title,
    Artist,
    Lyrics,
    Metadata,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputField::Date => "date",
            InputField::Month => "month",
            InputField::PlayerId => "playerId",
            InputField::Word => "word",
            InputField::Title => "title",
            InputField::Artist => "artist",
            InputField::Lyrics => "lyrics",
            InputField::Metadata => "metadata",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export)]
pub enum GameError {
    #[error("invalid {field}: {reason}")]
    Validation { field: InputField, reason: String },
    #[error("no game found for {date}")]
    GameNotFound { date: String },
    #[error("cannot submit a guess: no game found for {date}")]
    GameNotFoundForGuess { date: String },
    #[error("word already guessed: {word}")]
    DuplicateGuess { word: String },
    #[error("song not found: {song_id}")]
    SongNotFound { song_id: String },
}

impl GameError {
    pub fn validation(field: InputField, reason: impl Into<String>) -> Self {
        GameError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// The offending field, when this is a validation failure
    pub fn field(&self) -> Option<InputField> {
        match self {
            GameError::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}
