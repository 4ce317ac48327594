use crate::tokenizer::{normalize_word, tokenize};
use lyricle_types::{MaskedLyrics, RevealedText, Token};
use std::collections::HashSet;

/// Builds and renders the tokenized form of a song. Stateless.
pub struct MaskedLyricsService;

impl MaskedLyricsService {
    /// Tokenize the three fields of a song independently
    pub fn create(title: &str, artist: &str, lyrics: &str) -> MaskedLyrics {
        MaskedLyrics {
            title: tokenize(title),
            artist: tokenize(artist),
            lyrics: tokenize(lyrics),
        }
    }

    /// Render the song as text, showing only the words in `guessed_words`
    /// (lowercase). Hidden words become an underscore run of the same length.
    pub fn reveal(masked: &MaskedLyrics, guessed_words: &HashSet<String>) -> RevealedText {
        RevealedText {
            title: render(&masked.title, guessed_words),
            artist: render(&masked.artist, guessed_words),
            lyrics: render(&masked.lyrics, guessed_words),
        }
    }

    /// Whether `word` matches a guessable token anywhere in the song
    pub fn has_word(word: &str, masked: &MaskedLyrics) -> bool {
        let word = normalize_word(word);
        if word.is_empty() {
            return false;
        }

        masked.guessable_tokens().any(|token| token.normalized() == word)
    }

    /// Lowercased set of every guessable word in the song
    pub fn vocabulary(masked: &MaskedLyrics) -> HashSet<String> {
        masked.guessable_tokens().map(Token::normalized).collect()
    }

    /// Copy `tokens`, replacing each guessable token that `is_revealed` rejects
    /// with its blank form
    pub fn mask_tokens(tokens: &[Token], is_revealed: impl Fn(&Token) -> bool) -> Vec<Token> {
        tokens
            .iter()
            .map(|token| {
                if !token.is_to_guess || is_revealed(token) {
                    token.clone()
                } else {
                    Token::guessable(token.blank())
                }
            })
            .collect()
    }
}

fn render(tokens: &[Token], guessed_words: &HashSet<String>) -> String {
    let mut rendered = String::new();
    for token in tokens {
        if !token.is_to_guess || guessed_words.contains(&token.normalized()) {
            rendered.push_str(&token.value);
        } else {
            rendered.push_str(&token.blank());
        }
    }
    rendered
}
