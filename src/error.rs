// ⚠️ Errors - Library-wide error type
// Provider failures are NOT errors here: they degrade to warnings (see profile.rs)

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LeakError>;

#[derive(Debug, Error)]
pub enum LeakError {
    /// A date string from a provider could not be parsed
    #[error("malformed date '{value}' (expected {expected})")]
    MalformedDate { value: String, expected: &'static str },

    /// A provider payload did not have the expected shape
    #[error("unexpected {provider} payload: {reason}")]
    ProviderPayload { provider: String, reason: String },

    #[error("config error: {0}")]
    Config(String),

    /// Client roster row could not be interpreted
    #[error("roster line {line}: {reason}")]
    Roster { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl LeakError {
    pub fn malformed_date(value: &str, expected: &'static str) -> Self {
        LeakError::MalformedDate {
            value: value.to_string(),
            expected,
        }
    }
}
