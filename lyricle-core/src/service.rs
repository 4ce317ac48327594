use crate::error::{ServiceError, ServiceResult};
use crate::game_state::GameStateEngine;
use crate::ingestion::prepare_song;
use crate::repository::{DailyGame, SongRepository, StorageError};
use crate::stats::StatsAggregator;
use crate::word_validation::{GuessValidator, format_date};
use lyricle_types::{Game, GameError, GameId, GameState, GameStats, NewGuess, NewSong, Song, SongId};
use std::sync::Arc;
use tracing::{info, warn};

/// Entry point for the daily game: guesses, per-player state, stats and the
/// administrative song/calendar operations. All collaborators are injected.
pub struct DailyGameService {
    repository: Arc<dyn SongRepository>,
    engine: GameStateEngine,
}

impl DailyGameService {
    pub fn new(repository: Arc<dyn SongRepository>, engine: GameStateEngine) -> Self {
        Self { repository, engine }
    }

    /// Record a guess and return the player's updated state. A wrong guess is
    /// stored with `valid = false`, it is not an error.
    pub async fn submit_guess(
        &self,
        date: &str,
        player_id: &str,
        raw_word: &str,
    ) -> ServiceResult<GameState> {
        let day = GuessValidator::validate_date(date)?;
        GuessValidator::validate_player_id(player_id)?;
        let word = GuessValidator::validate_word(raw_word)?;

        let daily = self
            .repository
            .find_game_by_date(day)
            .await?
            .ok_or_else(|| GameError::GameNotFoundForGuess {
                date: date.to_string(),
            })?;
        let game_id = daily.game.id;

        // Advisory only: the store's unique index is authoritative
        if self
            .repository
            .find_guess(game_id, player_id, &word)
            .await?
            .is_some()
        {
            return Err(GameError::DuplicateGuess { word }.into());
        }

        let valid = GuessValidator::is_valid_guess(&word, &daily.song);
        let new_guess = NewGuess {
            game_id,
            player_id: player_id.to_string(),
            word: word.clone(),
            valid,
        };

        match self.repository.append_guess(new_guess).await {
            Ok(guess) => {
                info!(%game_id, player_id, word = %guess.word, valid, "recorded guess");
            }
            Err(StorageError::UniqueViolation(constraint)) => {
                warn!(%game_id, player_id, %word, %constraint, "concurrent duplicate guess rejected by store");
                return Err(GameError::DuplicateGuess { word }.into());
            }
            Err(err) => return Err(err.into()),
        }

        self.project(daily, player_id).await
    }

    pub async fn get_game_state(&self, date: &str, player_id: &str) -> ServiceResult<GameState> {
        let day = GuessValidator::validate_date(date)?;
        GuessValidator::validate_player_id(player_id)?;

        let daily = self
            .repository
            .find_game_by_date(day)
            .await?
            .ok_or_else(|| GameError::GameNotFound {
                date: date.to_string(),
            })?;

        self.project(daily, player_id).await
    }

    /// Game states for every game in `month` (`YYYY-MM`), ordered by date
    pub async fn get_game_states_by_month(
        &self,
        month: &str,
        player_id: &str,
    ) -> ServiceResult<Vec<GameState>> {
        let range = GuessValidator::validate_month(month)?;
        GuessValidator::validate_player_id(player_id)?;

        let games = self
            .repository
            .find_games_between(range.first, range.last)
            .await?;

        let mut states = Vec::with_capacity(games.len());
        for daily in games {
            states.push(self.project(daily, player_id).await?);
        }
        states.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(states)
    }

    /// Aggregates over every player's guesses. An unknown game id yields zeroed stats.
    pub async fn get_game_stats(&self, game_id: GameId) -> ServiceResult<GameStats> {
        let guesses = self.repository.game_guesses(game_id).await?;
        Ok(StatsAggregator::aggregate(&guesses))
    }

    pub async fn ingest_song(&self, new_song: NewSong) -> ServiceResult<Song> {
        let song = prepare_song(new_song)?;
        let song = self.repository.insert_song(song).await?;
        info!(song_id = %song.id, title = %song.title, "ingested song");
        Ok(song)
    }

    pub async fn find_song(&self, song_id: SongId) -> ServiceResult<Option<Song>> {
        Ok(self.repository.find_song(song_id).await?)
    }

    pub async fn list_songs(&self) -> ServiceResult<Vec<Song>> {
        Ok(self.repository.list_songs().await?)
    }

    /// Assign a song to a date, creating the game or repointing the existing one
    pub async fn schedule_song(&self, date: &str, song_id: SongId) -> ServiceResult<Game> {
        let day = GuessValidator::validate_date(date)?;

        let game = self
            .repository
            .upsert_game(day, song_id)
            .await?
            .ok_or_else(|| GameError::SongNotFound {
                song_id: song_id.to_string(),
            })?;

        info!(game_id = %game.id, date = %format_date(day), %song_id, "scheduled song");
        Ok(game)
    }

    async fn project(&self, daily: DailyGame, player_id: &str) -> Result<GameState, ServiceError> {
        let guesses = self
            .repository
            .player_guesses(daily.game.id, player_id)
            .await?;
        Ok(self.engine.project(&daily.game, &daily.song, guesses))
    }
}
