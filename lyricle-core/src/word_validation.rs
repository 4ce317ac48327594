use crate::tokenizer::{guessable_words, normalize_word};
use chrono::{Months, NaiveDate};
use lyricle_types::{GameError, InputField, Song};
use regex::Regex;
use std::sync::LazyLock;

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("invalid date pattern")
});
static MONTH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})$").expect("invalid month pattern")
});

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive range of days covered by a `YYYY-MM` month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

/// Input checks and guess classification. Never rejects a wrong guess:
/// only malformed input is an error.
pub struct GuessValidator;

impl GuessValidator {
    /// Strict `YYYY-MM-DD` calendar date
    pub fn validate_date(date: &str) -> Result<NaiveDate, GameError> {
        if !DATE_PATTERN.is_match(date) {
            return Err(GameError::validation(
                InputField::Date,
                format!("expected YYYY-MM-DD, got {date:?}"),
            ));
        }

        NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
            GameError::validation(InputField::Date, format!("{date} is not a calendar date"))
        })
    }

    /// Strict `YYYY-MM` month
    pub fn validate_month(month: &str) -> Result<MonthRange, GameError> {
        let invalid = || {
            GameError::validation(
                InputField::Month,
                format!("expected YYYY-MM, got {month:?}"),
            )
        };

        let captures = MONTH_PATTERN.captures(month).ok_or_else(invalid)?;
        let component = |index| captures.get(index).map(|found| found.as_str());
        let year: i32 = component(1)
            .and_then(|year| year.parse().ok())
            .ok_or_else(invalid)?;
        let month_number: u32 = component(2)
            .and_then(|number| number.parse().ok())
            .ok_or_else(invalid)?;

        let first = NaiveDate::from_ymd_opt(year, month_number, 1).ok_or_else(invalid)?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(invalid)?;

        Ok(MonthRange { first, last })
    }

    pub fn validate_player_id(player_id: &str) -> Result<(), GameError> {
        if player_id.trim().is_empty() {
            return Err(GameError::validation(
                InputField::PlayerId,
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// Returns the normalized (trimmed, lowercased) word
    pub fn validate_word(raw_word: &str) -> Result<String, GameError> {
        let word = normalize_word(raw_word);
        if word.is_empty() {
            return Err(GameError::validation(InputField::Word, "must not be empty"));
        }
        Ok(word)
    }

    /// Whether a normalized word is one of the song's guessable units, split
    /// the same way the masked view is
    pub fn is_valid_guess(word: &str, song: &Song) -> bool {
        [&song.title, &song.artist, &song.lyrics]
            .into_iter()
            .flat_map(|text| guessable_words(text))
            .any(|unit| unit.to_lowercase() == word)
    }
}

/// Render a date the way games are keyed
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
