#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use lyricle_core::{
    DailyGame, DailyGameService, GameStateEngine, SongRepository, StorageError, StorageResult,
    format_date,
};
use lyricle_types::{Game, GameId, Guess, NewGuess, NewSong, Song, SongId, TrackMetadata};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    songs: Vec<Song>,
    games: Vec<Game>,
    guesses: Vec<Guess>,
}

/// Repository double backed by vectors, enforcing the same uniqueness rules as the database
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<Mutex<Tables>>,
    /// Makes `find_guess` miss, as a concurrent writer racing the advisory check would
    stale_reads: bool,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stale_reads() -> Self {
        Self {
            stale_reads: true,
            ..Self::default()
        }
    }

    pub fn guess_count(&self) -> usize {
        self.tables.lock().unwrap().guesses.len()
    }

    pub fn game_count(&self) -> usize {
        self.tables.lock().unwrap().games.len()
    }

    fn daily(tables: &Tables, game: &Game) -> Option<DailyGame> {
        tables
            .songs
            .iter()
            .find(|song| song.id == game.song_id)
            .map(|song| DailyGame {
                game: game.clone(),
                song: song.clone(),
            })
    }
}

#[async_trait]
impl SongRepository for InMemoryRepository {
    async fn find_song(&self, song_id: SongId) -> StorageResult<Option<Song>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.songs.iter().find(|song| song.id == song_id).cloned())
    }

    async fn list_songs(&self) -> StorageResult<Vec<Song>> {
        Ok(self.tables.lock().unwrap().songs.clone())
    }

    async fn insert_song(&self, song: Song) -> StorageResult<Song> {
        self.tables.lock().unwrap().songs.push(song.clone());
        Ok(song)
    }

    async fn find_game_by_date(&self, date: NaiveDate) -> StorageResult<Option<DailyGame>> {
        let tables = self.tables.lock().unwrap();
        let key = format_date(date);
        Ok(tables
            .games
            .iter()
            .find(|game| game.date == key)
            .and_then(|game| Self::daily(&tables, game)))
    }

    async fn find_games_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StorageResult<Vec<DailyGame>> {
        let tables = self.tables.lock().unwrap();
        let (from, to) = (format_date(from), format_date(to));
        let mut games: Vec<DailyGame> = tables
            .games
            .iter()
            .filter(|game| game.date >= from && game.date <= to)
            .filter_map(|game| Self::daily(&tables, game))
            .collect();
        games.sort_by(|a, b| a.game.date.cmp(&b.game.date));
        Ok(games)
    }

    async fn upsert_game(&self, date: NaiveDate, song_id: SongId) -> StorageResult<Option<Game>> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.songs.iter().any(|song| song.id == song_id) {
            return Ok(None);
        }

        let key = format_date(date);
        if let Some(game) = tables.games.iter_mut().find(|game| game.date == key) {
            game.song_id = song_id;
            return Ok(Some(game.clone()));
        }

        let game = Game {
            id: Uuid::new_v4(),
            date: key,
            song_id,
        };
        tables.games.push(game.clone());
        Ok(Some(game))
    }

    async fn game_guesses(&self, game_id: GameId) -> StorageResult<Vec<Guess>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .guesses
            .iter()
            .filter(|guess| guess.game_id == game_id)
            .cloned()
            .collect())
    }

    async fn player_guesses(&self, game_id: GameId, player_id: &str) -> StorageResult<Vec<Guess>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .guesses
            .iter()
            .filter(|guess| guess.game_id == game_id && guess.player_id == player_id)
            .cloned()
            .collect())
    }

    async fn find_guess(
        &self,
        game_id: GameId,
        player_id: &str,
        word: &str,
    ) -> StorageResult<Option<Guess>> {
        if self.stale_reads {
            return Ok(None);
        }
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .guesses
            .iter()
            .find(|guess| {
                guess.game_id == game_id && guess.player_id == player_id && guess.word == word
            })
            .cloned())
    }

    async fn append_guess(&self, new_guess: NewGuess) -> StorageResult<Guess> {
        let mut tables = self.tables.lock().unwrap();
        let exists = tables.guesses.iter().any(|guess| {
            guess.game_id == new_guess.game_id
                && guess.player_id == new_guess.player_id
                && guess.word == new_guess.word
        });
        if exists {
            return Err(StorageError::UniqueViolation(
                "guesses.game_id, guesses.player_id, guesses.word".to_string(),
            ));
        }

        let guess = Guess {
            id: Uuid::new_v4(),
            game_id: new_guess.game_id,
            player_id: new_guess.player_id,
            word: new_guess.word,
            valid: new_guess.valid,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        tables.guesses.push(guess.clone());
        Ok(guess)
    }
}

/// Repository whose every call fails, for error propagation tests
pub struct BrokenRepository;

#[async_trait]
impl SongRepository for BrokenRepository {
    async fn find_song(&self, _song_id: SongId) -> StorageResult<Option<Song>> {
        Err(broken())
    }

    async fn list_songs(&self) -> StorageResult<Vec<Song>> {
        Err(broken())
    }

    async fn insert_song(&self, _song: Song) -> StorageResult<Song> {
        Err(broken())
    }

    async fn find_game_by_date(&self, _date: NaiveDate) -> StorageResult<Option<DailyGame>> {
        Err(broken())
    }

    async fn find_games_between(
        &self,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> StorageResult<Vec<DailyGame>> {
        Err(broken())
    }

    async fn upsert_game(&self, _date: NaiveDate, _song_id: SongId) -> StorageResult<Option<Game>> {
        Err(broken())
    }

    async fn game_guesses(&self, _game_id: GameId) -> StorageResult<Vec<Guess>> {
        Err(broken())
    }

    async fn player_guesses(&self, _game_id: GameId, _player_id: &str) -> StorageResult<Vec<Guess>> {
        Err(broken())
    }

    async fn find_guess(
        &self,
        _game_id: GameId,
        _player_id: &str,
        _word: &str,
    ) -> StorageResult<Option<Guess>> {
        Err(broken())
    }

    async fn append_guess(&self, _guess: NewGuess) -> StorageResult<Guess> {
        Err(broken())
    }
}

fn broken() -> StorageError {
    StorageError::Backend(anyhow::anyhow!("connection refused"))
}

pub fn create_service(repository: &InMemoryRepository) -> DailyGameService {
    DailyGameService::new(Arc::new(repository.clone()), GameStateEngine::default())
}

pub fn party_in_the_usa() -> NewSong {
    NewSong {
        title: "Party in the U.S.A.".to_string(),
        artist: "Miley Cyrus".to_string(),
        lyrics: "Hopped off the plane at LAX with a dream and my cardigan".to_string(),
        metadata: TrackMetadata::default(),
    }
}

/// Ten distinct lyric words, so every found word is worth ten percent
pub fn counting_song() -> NewSong {
    NewSong {
        title: "Count".to_string(),
        artist: "The Numbers".to_string(),
        lyrics: "one two three four five six seven eight nine ten".to_string(),
        metadata: TrackMetadata::default(),
    }
}

/// Ingest `song` and schedule it on `date`
pub async fn schedule(service: &DailyGameService, date: &str, song: NewSong) -> (Song, Game) {
    let song = service.ingest_song(song).await.unwrap();
    let game = service.schedule_song(date, song.id).await.unwrap();
    (song, game)
}
