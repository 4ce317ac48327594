use async_trait::async_trait;
use chrono::NaiveDate;
use lyricle_types::{Game, GameId, Guess, NewGuess, Song, SongId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// A write hit a uniqueness constraint enforced by the store
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A scheduled game together with its song
#[derive(Debug, Clone, PartialEq)]
pub struct DailyGame {
    pub game: Game,
    pub song: Song,
}

/// Storage boundary for songs, games and guesses.
///
/// Implementations must enforce at write time that a `(game_id, player_id, word)`
/// triple is stored at most once and report violations as
/// [`StorageError::UniqueViolation`].
#[async_trait]
pub trait SongRepository: Send + Sync {
    async fn find_song(&self, song_id: SongId) -> StorageResult<Option<Song>>;

    async fn list_songs(&self) -> StorageResult<Vec<Song>>;

    async fn insert_song(&self, song: Song) -> StorageResult<Song>;

    async fn find_game_by_date(&self, date: NaiveDate) -> StorageResult<Option<DailyGame>>;

    /// Games dated within `[from, to]`, ordered by date ascending
    async fn find_games_between(&self, from: NaiveDate, to: NaiveDate)
    -> StorageResult<Vec<DailyGame>>;

    /// Insert or repoint the game for `date` in a single transaction.
    /// Returns `None` when `song_id` does not exist.
    async fn upsert_game(&self, date: NaiveDate, song_id: SongId) -> StorageResult<Option<Game>>;

    /// All guesses of a game, oldest first
    async fn game_guesses(&self, game_id: GameId) -> StorageResult<Vec<Guess>>;

    /// One player's guesses for a game, oldest first
    async fn player_guesses(&self, game_id: GameId, player_id: &str) -> StorageResult<Vec<Guess>>;

    async fn find_guess(
        &self,
        game_id: GameId,
        player_id: &str,
        word: &str,
    ) -> StorageResult<Option<Guess>>;

    /// Append a guess; the store assigns id and timestamp
    async fn append_guess(&self, guess: NewGuess) -> StorageResult<Guess>;
}

