use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum MirrorError {
    #[error("invalid year: {0} (expected four digits, e.g. 2005)")]
    InvalidYear(String),

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    #[error("malformed data file name: {0}")]
    MalformedFileName(String),

    #[error("NCEI request failed: {0}")]
    NceiHttp(String),

    #[error("NCEI returned status {status}: {message}")]
    NceiStatus { status: u16, message: String },

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("{failed} file(s) failed to download")]
    #[diagnostic(help("re-run for the same year; files already present are skipped"))]
    Incomplete { failed: usize },
}
