use crate::masked_lyrics::MaskedLyricsService;
use lyricle_types::{GameError, InputField, NewSong, Song, TrackMetadata};
use uuid::Uuid;
use validator::Validate;

/// Validate a song submitted for ingestion and build its stored form,
/// tokenizing title, artist and lyrics once
pub fn prepare_song(new_song: NewSong) -> Result<Song, GameError> {
    require_text(InputField::Title, &new_song.title)?;
    require_text(InputField::Artist, &new_song.artist)?;
    require_text(InputField::Lyrics, &new_song.lyrics)?;
    validate_metadata(&new_song.metadata)?;

    let masked_lyrics =
        MaskedLyricsService::create(&new_song.title, &new_song.artist, &new_song.lyrics);
    if masked_lyrics.guessable_tokens().next().is_none() {
        return Err(GameError::validation(
            InputField::Lyrics,
            "song contains no guessable words",
        ));
    }

    Ok(Song {
        id: Uuid::new_v4(),
        title: new_song.title,
        artist: new_song.artist,
        lyrics: new_song.lyrics,
        masked_lyrics,
        metadata: new_song.metadata,
    })
}

fn require_text(field: InputField, value: &str) -> Result<(), GameError> {
    if value.trim().is_empty() {
        return Err(GameError::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Check album and artist names and provider URLs, reporting every failure
/// as a `metadata` validation error
pub fn validate_metadata(metadata: &TrackMetadata) -> Result<(), GameError> {
    metadata.validate().map_err(|errors| {
        GameError::validation(InputField::Metadata, errors.to_string().trim_end().to_string())
    })
}
