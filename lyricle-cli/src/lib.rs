use anyhow::{Context, Result};
use lyricle_core::{DailyGameService, GameStateEngine};
use lyricle_persistence::{SeaOrmSongRepository, connection::connect_and_migrate};
use std::sync::Arc;
use tracing::info;

pub mod commands;
pub mod config;

use config::Config;

/// Connect to storage, apply migrations and wire the game service
pub async fn build_service(config: &Config) -> Result<DailyGameService> {
    let rules = config.win_rules()?;
    let db = connect_and_migrate(&config.database_url)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    info!(
        database_url = %config.database_url,
        lyrics_win_ratio = rules.lyrics_ratio,
        "game service ready"
    );

    Ok(DailyGameService::new(
        Arc::new(SeaOrmSongRepository::new(db)),
        GameStateEngine::new(rules),
    ))
}
