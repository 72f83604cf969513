//! Error definitions.
use std::error::Error;
use std::{fmt, result};

/// A specialized Result type for this library.
pub type Result<T, E = KMedoidsError> = result::Result<T, E>;

/// Errors in this library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KMedoidsError {
    /// Contains [`ConfigError`].
    InvalidConfiguration(ConfigError),

    /// Contains [`InputError`].
    Input(InputError),
}

impl fmt::Display for KMedoidsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(e) => e.fmt(f),
            Self::Input(e) => e.fmt(f),
        }
    }
}

impl Error for KMedoidsError {}

impl KMedoidsError {
    pub(crate) const fn config(msg: String) -> Self {
        Self::InvalidConfiguration(ConfigError { msg })
    }

    pub(crate) const fn input(msg: String) -> Self {
        Self::Input(InputError { msg })
    }
}

/// Error used when a clustering run is configured with unusable parameters,
/// such as a cluster count of zero or one exceeding the number of documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    msg: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidConfiguration: {}", self.msg)
    }
}

/// Error used when the input argument is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputError {
    msg: String,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InputError: {}", self.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = KMedoidsError::config("k must not be 0.".to_string());
        assert_eq!(e.to_string(), "InvalidConfiguration: k must not be 0.");
        let e = KMedoidsError::input("line 3 has no text field.".to_string());
        assert_eq!(e.to_string(), "InputError: line 3 has no text field.");
    }
}
