use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimSnakeError {
    #[error("Bad token on line {line}: \"{token}\"")]
    BadToken { line: usize, token: String },

    #[error("Unresolved label reference: {label}")]
    UnresolvedLabel { label: String },

    #[error("Duplicate label definition on line {line}: {label}")]
    DuplicateLabel { line: usize, label: String },

    #[error("Genome format error: {0}")]
    GenomeFormat(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config source error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, SimSnakeError>;
