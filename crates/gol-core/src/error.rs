//! Error types for the simulation and tournament.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid shape for {name}: {found:?}; expected {expected:?}")]
    ShapeMismatch {
        name: String,
        found: (usize, usize),
        expected: (usize, usize),
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = Error::ShapeMismatch {
            name: "glider".to_string(),
            found: (249, 100),
            expected: (250, 100),
        };
        assert_eq!(
            err.to_string(),
            "Invalid shape for glider: (249, 100); expected (250, 100)"
        );
    }
}
