use thiserror::Error;

/// Reason a word was rejected by [`validate_word`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordDefect {
    #[error("is empty")]
    Empty,
    #[error("contains control characters")]
    ControlCharacter,
    #[error("has a misplaced minus")]
    BadMinus,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{word} {defect}")]
pub struct WordError {
    pub word: String,
    pub defect: WordDefect,
}

/// Split text on runs of ASCII spaces. Tabs and newlines are part of words.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split(' ').filter(|w| !w.is_empty())
}

pub fn has_control_chars(word: &str) -> bool {
    word.bytes().any(|b| b < b' ')
}

/// A leading minus must be followed by a word: `-`, `--x` and `-x-` are rejected.
pub fn has_bad_minus(word: &str) -> bool {
    match word.strip_prefix('-') {
        Some(rest) => rest.is_empty() || rest.starts_with('-') || rest.ends_with('-'),
        None => false,
    }
}

pub fn is_malformed(word: &str) -> bool {
    word.is_empty() || has_control_chars(word) || has_bad_minus(word)
}

pub fn validate_word(word: &str) -> Result<(), WordError> {
    let defect = if word.is_empty() {
        WordDefect::Empty
    } else if has_control_chars(word) {
        WordDefect::ControlCharacter
    } else if has_bad_minus(word) {
        WordDefect::BadMinus
    } else {
        return Ok(());
    };
    Err(WordError { word: word.to_string(), defect })
}
