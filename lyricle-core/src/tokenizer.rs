use lyricle_types::Token;
use regex::Regex;
use std::sync::LazyLock;

// A run starts on a letter or digit; combining marks may follow inside the run
// so decomposed accents stay attached to their base character.
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}][\p{L}\p{M}\p{N}]*").expect("invalid word pattern")
});

/// Split `text` into guessable word runs and the verbatim gaps between them.
/// Concatenating the token values always reproduces `text`.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for word in WORD_PATTERN.find_iter(text) {
        if word.start() > last {
            tokens.push(Token::separator(&text[last..word.start()]));
        }
        tokens.push(Token::guessable(word.as_str()));
        last = word.end();
    }

    if last < text.len() {
        tokens.push(Token::separator(&text[last..]));
    }

    tokens
}

/// The guessable units of `text`, in order, exactly as `tokenize` marks them
pub fn guessable_words(text: &str) -> impl Iterator<Item = &str> {
    WORD_PATTERN.find_iter(text).map(|word| word.as_str())
}

/// Canonical form of a submitted word
pub fn normalize_word(raw: &str) -> String {
    raw.trim().to_lowercase()
}
