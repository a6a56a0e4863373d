/// Errors raised at the fallible edges of the roster: configuration, csv import and sessions.
///
/// Looking up an unknown student is not an error; the store answers with `None` or `false`.
#[derive(thiserror::Error, Debug)]
pub enum CustomError {
    /// failed to read a file
    #[error("failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),
    /// csv could not be parsed
    #[error("failed to parse csv: {0}")]
    CsvParseError(#[from] csv::Error),
    /// csv parsed but a row holds unexpected data
    #[error("csv data error: {0}")]
    CsvDataError(String),
    /// regex related errors
    #[error("failed to parse or compile a regular expression: {0}")]
    RegexError(#[from] regex::Error),
    /// invalid environment configuration
    #[error("invalid configuration: {0}")]
    ConfigError(String),
    /// login, register or logout rejected by the session provider
    #[error("authentication failed: {0}")]
    AuthError(String),
    #[error("unknown error: {0}")]
    UnknownError(String),
}
