use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("table has no header row")]
    MissingHeader,

    #[error("header is missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}
