use anyhow::{Context, Result, anyhow};
use crate::config::Config;
use clap::{Parser, Subcommand};
use lyricle_core::{DailyGameService, MaskedLyricsService, normalize_word};
use lyricle_types::{NewSong, TrackMetadata};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "lyricle", about = "Administer and play the daily lyrics guessing game")]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create or update the database schema
    Migrate,
    /// Ingest a song from a lyrics file
    AddSong {
        #[arg(long)]
        title: String,
        #[arg(long)]
        artist: String,
        #[arg(long)]
        lyrics_file: PathBuf,
        /// JSON file with album, artist credits and provider URLs
        #[arg(long)]
        metadata_file: Option<PathBuf>,
    },
    /// List ingested songs
    Songs,
    /// Assign a song to a date (YYYY-MM-DD)
    Schedule {
        #[arg(long)]
        date: String,
        #[arg(long)]
        song_id: Uuid,
    },
    /// Render a song with only the given words revealed, listing words the
    /// song does not contain
    Preview {
        #[arg(long)]
        song_id: Uuid,
        /// Words to reveal
        words: Vec<String>,
    },
    /// Submit a guess for a player
    Guess {
        #[arg(long)]
        date: String,
        #[arg(long)]
        player: String,
        word: String,
    },
    /// Show a player's state for one day
    State {
        #[arg(long)]
        date: String,
        #[arg(long)]
        player: String,
    },
    /// Show a player's states for a month (YYYY-MM)
    Month {
        #[arg(long)]
        month: String,
        #[arg(long)]
        player: String,
    },
    /// Aggregate stats for a game
    Stats {
        #[arg(long)]
        game_id: Uuid,
    },
}

/// Run one command against the service and return its JSON output
pub async fn execute(service: &DailyGameService, command: Command) -> Result<Value> {
    let output = match command {
        Command::Migrate => json!({ "status": "up to date" }),
        Command::AddSong {
            title,
            artist,
            lyrics_file,
            metadata_file,
        } => {
            let lyrics = fs::read_to_string(&lyrics_file)
                .with_context(|| format!("failed to read {}", lyrics_file.display()))?;
            let metadata = match metadata_file {
                Some(path) => read_metadata(&path)?,
                None => TrackMetadata::default(),
            };
            let song = service
                .ingest_song(NewSong {
                    title,
                    artist,
                    lyrics,
                    metadata,
                })
                .await?;
            serde_json::to_value(song)?
        }
        Command::Songs => {
            let songs = service.list_songs().await?;
            let listing: Vec<Value> = songs
                .iter()
                .map(|song| json!({ "id": song.id, "title": song.title, "artist": song.artist }))
                .collect();
            Value::Array(listing)
        }
        Command::Schedule { date, song_id } => {
            serde_json::to_value(service.schedule_song(&date, song_id).await?)?
        }
        Command::Preview { song_id, words } => {
            let song = service
                .find_song(song_id)
                .await?
                .ok_or_else(|| anyhow!("song not found: {song_id}"))?;
            let revealed: HashSet<String> =
                words.iter().map(|word| normalize_word(word)).collect();
            let vocabulary = MaskedLyricsService::vocabulary(&song.masked_lyrics);
            let mut unknown: Vec<&String> = revealed.difference(&vocabulary).collect();
            unknown.sort();
            json!({
                "revealed": MaskedLyricsService::reveal(&song.masked_lyrics, &revealed),
                "unknown": unknown,
            })
        }
        Command::Guess { date, player, word } => {
            serde_json::to_value(service.submit_guess(&date, &player, &word).await?)?
        }
        Command::State { date, player } => {
            serde_json::to_value(service.get_game_state(&date, &player).await?)?
        }
        Command::Month { month, player } => {
            serde_json::to_value(service.get_game_states_by_month(&month, &player).await?)?
        }
        Command::Stats { game_id } => serde_json::to_value(service.get_game_stats(game_id).await?)?,
    };

    Ok(output)
}

fn read_metadata(path: &Path) -> Result<TrackMetadata> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid track metadata", path.display()))
}
