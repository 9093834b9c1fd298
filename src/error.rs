use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyEvolveError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corpus Read Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Signal Handler Error: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Corpus Error (line {line}): {reason}")]
    Corpus { line: u64, reason: String },

    #[error("A mapping supports at most 256 symbols (got {0})")]
    TooManySymbols(usize),

    #[error("Symbol '{0}' appears more than once")]
    DuplicateSymbol(char),

    #[error("Could not map '{0}' on the layout")]
    UnknownSymbol(char),

    #[error("Expected exactly {expected} symbols, got {got}")]
    LayoutLength { expected: usize, got: usize },
}

pub type KeResult<T> = Result<T, KeyEvolveError>;
