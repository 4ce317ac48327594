use crate::{MaskedLyrics, SongId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    pub lyrics: String,
    /// Tokenized once at ingestion, never recomputed
    pub masked_lyrics: MaskedLyrics,
    pub metadata: TrackMetadata,
}

/// Ingestion input for a song, before tokenization and storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub lyrics: String,
    #[serde(default)]
    pub metadata: TrackMetadata,
}

/// Catalog information about the track as supplied by music providers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS, Validate)]
#[validate(schema(function = "validate_url_schemes", skip_on_field_errors = false))]
#[ts(export)]
pub struct TrackMetadata {
    #[serde(default)]
    #[validate(nested)]
    pub album: Option<AlbumInfo>,
    #[serde(default)]
    #[validate(nested)]
    pub artists: Vec<ArtistCredit>,
    #[serde(default)]
    #[validate(url)]
    pub preview_url: Option<String>,
    #[serde(default)]
    #[validate(url)]
    pub external_url: Option<String>,
    #[serde(default)]
    #[validate(url)]
    pub genius_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Validate)]
#[ts(export)]
pub struct AlbumInfo {
    #[validate(length(min = 1), custom(function = "validate_not_blank"))]
    pub name: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    #[validate(url)]
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Validate)]
#[ts(export)]
pub struct ArtistCredit {
    #[validate(length(min = 1), custom(function = "validate_not_blank"))]
    pub name: String,
    #[serde(default)]
    pub external_id: Option<String>,
}

impl TrackMetadata {
    /// Every URL carried by the metadata, labelled by where it came from
    pub fn urls(&self) -> Vec<(&'static str, &str)> {
        let mut urls = Vec::new();
        if let Some(url) = &self.preview_url {
            urls.push(("preview_url", url.as_str()));
        }
        if let Some(url) = &self.external_url {
            urls.push(("external_url", url.as_str()));
        }
        if let Some(url) = &self.genius_url {
            urls.push(("genius_url", url.as_str()));
        }
        if let Some(url) = self.album.as_ref().and_then(|album| album.cover_url.as_ref()) {
            urls.push(("album.cover_url", url.as_str()));
        }
        urls
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Provider links must use http or https
fn validate_url_schemes(metadata: &TrackMetadata) -> Result<(), ValidationError> {
    for (label, url) in metadata.urls() {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            let mut err = ValidationError::new("url_scheme");
            err.message = Some(format!("{label} must be an http(s) URL, got {url:?}").into());
            return Err(err);
        }
    }
    Ok(())
}
