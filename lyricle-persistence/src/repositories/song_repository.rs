use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionError, TransactionTrait,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::entities::{games, guesses, prelude::*, songs};
use lyricle_core::{format_date, DailyGame, SongRepository, StorageError, StorageResult};
use lyricle_types::{Game, GameId, Guess, MaskedLyrics, NewGuess, Song, SongId, TrackMetadata};

/// `SongRepository` backed by a sea-orm connection
#[derive(Clone)]
pub struct SeaOrmSongRepository {
    db: DatabaseConnection,
}

impl SeaOrmSongRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_song(model: songs::Model) -> StorageResult<Song> {
        let masked_lyrics: MaskedLyrics = serde_json::from_str(&model.masked_lyrics)
            .with_context(|| format!("corrupt masked lyrics for song {}", model.id))?;
        let metadata: TrackMetadata = serde_json::from_str(&model.metadata)
            .with_context(|| format!("corrupt metadata for song {}", model.id))?;

        Ok(Song {
            id: model.id,
            title: model.title,
            artist: model.artist,
            lyrics: model.lyrics,
            masked_lyrics,
            metadata,
        })
    }

    fn model_to_game(model: &games::Model) -> Game {
        Game {
            id: model.id,
            date: format_date(model.date),
            song_id: model.song_id,
        }
    }

    fn model_to_guess(model: guesses::Model) -> Guess {
        Guess {
            id: model.id,
            game_id: model.game_id,
            player_id: model.player_id,
            word: model.word,
            valid: model.valid,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    fn to_daily_game(
        (game, song): (games::Model, Option<songs::Model>),
    ) -> StorageResult<DailyGame> {
        let song = song.ok_or_else(|| {
            anyhow!("game {} references missing song {}", game.id, game.song_id)
        })?;

        Ok(DailyGame {
            game: Self::model_to_game(&game),
            song: Self::model_to_song(song)?,
        })
    }
}

/// Uniqueness violations are reported distinctly; everything else is opaque
fn db_error(err: DbErr) -> StorageError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(constraint)) => {
            StorageError::UniqueViolation(constraint)
        }
        _ => StorageError::Backend(err.into()),
    }
}

#[async_trait]
impl SongRepository for SeaOrmSongRepository {
    async fn find_song(&self, song_id: SongId) -> StorageResult<Option<Song>> {
        let model = Songs::find_by_id(song_id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        model.map(Self::model_to_song).transpose()
    }

    async fn list_songs(&self) -> StorageResult<Vec<Song>> {
        let models = Songs::find()
            .order_by_asc(songs::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        models.into_iter().map(Self::model_to_song).collect()
    }

    async fn insert_song(&self, song: Song) -> StorageResult<Song> {
        let masked_lyrics =
            serde_json::to_string(&song.masked_lyrics).context("failed to encode masked lyrics")?;
        let metadata =
            serde_json::to_string(&song.metadata).context("failed to encode track metadata")?;

        let model = songs::ActiveModel {
            id: Set(song.id),
            title: Set(song.title.clone()),
            artist: Set(song.artist.clone()),
            lyrics: Set(song.lyrics.clone()),
            masked_lyrics: Set(masked_lyrics),
            metadata: Set(metadata),
            created_at: Set(chrono::Utc::now().into()),
        };

        model.insert(&self.db).await.map_err(db_error)?;
        Ok(song)
    }

    async fn find_game_by_date(&self, date: NaiveDate) -> StorageResult<Option<DailyGame>> {
        let row = Games::find()
            .filter(games::Column::Date.eq(date))
            .find_also_related(Songs)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        row.map(Self::to_daily_game).transpose()
    }

    async fn find_games_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StorageResult<Vec<DailyGame>> {
        let rows = Games::find()
            .filter(games::Column::Date.between(from, to))
            .order_by_asc(games::Column::Date)
            .find_also_related(Songs)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        rows.into_iter().map(Self::to_daily_game).collect()
    }

    async fn upsert_game(&self, date: NaiveDate, song_id: SongId) -> StorageResult<Option<Game>> {
        let outcome = self
            .db
            .transaction::<_, Option<games::Model>, DbErr>(|txn| {
                Box::pin(async move {
                    if Songs::find_by_id(song_id).one(txn).await?.is_none() {
                        return Ok(None);
                    }

                    let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
                    let existing = Games::find()
                        .filter(games::Column::Date.eq(date))
                        .one(txn)
                        .await?;

                    let game = match existing {
                        Some(game) => {
                            let mut active: games::ActiveModel = game.into();
                            active.song_id = Set(song_id);
                            active.updated_at = Set(now);
                            active.update(txn).await?
                        }
                        None => {
                            games::ActiveModel {
                                id: Set(Uuid::new_v4()),
                                date: Set(date),
                                song_id: Set(song_id),
                                created_at: Set(now),
                                updated_at: Set(now),
                            }
                            .insert(txn)
                            .await?
                        }
                    };

                    Ok(Some(game))
                })
            })
            .await
            .map_err(|err| match err {
                TransactionError::Connection(err) | TransactionError::Transaction(err) => {
                    db_error(err)
                }
            })?;

        if outcome.is_none() {
            debug!(%song_id, "upsert skipped: song does not exist");
        }
        Ok(outcome.as_ref().map(Self::model_to_game))
    }

    async fn game_guesses(&self, game_id: GameId) -> StorageResult<Vec<Guess>> {
        let models = Guesses::find()
            .filter(guesses::Column::GameId.eq(game_id))
            .order_by_asc(guesses::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Self::model_to_guess).collect())
    }

    async fn player_guesses(&self, game_id: GameId, player_id: &str) -> StorageResult<Vec<Guess>> {
        let models = Guesses::find()
            .filter(guesses::Column::GameId.eq(game_id))
            .filter(guesses::Column::PlayerId.eq(player_id))
            .order_by_asc(guesses::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Self::model_to_guess).collect())
    }

    async fn find_guess(
        &self,
        game_id: GameId,
        player_id: &str,
        word: &str,
    ) -> StorageResult<Option<Guess>> {
        let model = Guesses::find()
            .filter(guesses::Column::GameId.eq(game_id))
            .filter(guesses::Column::PlayerId.eq(player_id))
            .filter(guesses::Column::Word.eq(word))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Self::model_to_guess))
    }

    async fn append_guess(&self, guess: NewGuess) -> StorageResult<Guess> {
        let model = guesses::ActiveModel {
            id: Set(Uuid::new_v4()),
            game_id: Set(guess.game_id),
            player_id: Set(guess.player_id),
            word: Set(guess.word),
            valid: Set(guess.valid),
            created_at: Set(chrono::Utc::now().into()),
        };

        let saved = model.insert(&self.db).await.map_err(|err| {
            let err = db_error(err);
            if let StorageError::UniqueViolation(constraint) = &err {
                warn!(%constraint, "guess rejected by unique index");
            }
            err
        })?;

        Ok(Self::model_to_guess(saved))
    }
}
