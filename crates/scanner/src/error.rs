use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Empty answer text")]
    EmptyAnswer,

    #[error("Lexicon parse error: {0}")]
    LexiconParse(#[from] toml::de::Error),

    #[error("Invalid lexicon: {0}")]
    InvalidLexicon(String),

    #[error("{0}")]
    Other(String),
}
