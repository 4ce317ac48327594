use anyhow::Result;
use clap::Args;
use lyricle_core::WinRules;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://lyricle.db?mode=rwc";
pub const DEFAULT_LYRICS_WIN_RATIO: &str = "0.8";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings. Each flag falls back to its environment variable, then
/// to a default.
#[derive(Debug, Clone, PartialEq, Args)]
pub struct Config {
    /// Database connection string
    #[arg(long, global = true, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Share of lyric words a player must find to win, in (0, 1]
    #[arg(
        long,
        global = true,
        env = "LYRICS_WIN_RATIO",
        default_value = DEFAULT_LYRICS_WIN_RATIO,
        value_parser = parse_win_ratio
    )]
    pub lyrics_win_ratio: f64,

    /// tracing filter used when RUST_LOG is unset
    #[arg(long, global = true, env = "LOG_FILTER", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

impl Config {
    pub fn win_rules(&self) -> Result<WinRules> {
        WinRules::with_lyrics_ratio(self.lyrics_win_ratio)
    }
}

fn parse_win_ratio(raw: &str) -> Result<f64, String> {
    let ratio: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{raw:?} is not a number"))?;
    WinRules::with_lyrics_ratio(ratio).map_err(|e| e.to_string())?;
    Ok(ratio)
}
