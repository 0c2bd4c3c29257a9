use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum WaveError {
    /// Empty embedding, non-finite component, or a malformed pattern.
    InvalidInput(String),
    /// Two patterns (or a pattern and the index) disagree on dimensionality.
    DimensionMismatch { expected: usize, actual: usize },
    /// Unknown or removed id.
    NotFound(String),
    /// Search against an index with no live items.
    EmptyIndex,
    /// A snapshot whose slots, levels or adjacency do not line up.
    CorruptSnapshot(String),
}

impl fmt::Display for WaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            WaveError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            WaveError::NotFound(id) => write!(f, "item not found: {id}"),
            WaveError::EmptyIndex => write!(f, "index has no live items"),
            WaveError::CorruptSnapshot(msg) => write!(f, "corrupt snapshot: {msg}"),
        }
    }
}

impl std::error::Error for WaveError {}

pub type Result<T> = std::result::Result<T, WaveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_dimensions() {
        let err = WaveError::DimensionMismatch {
            expected: 384,
            actual: 768,
        };
        let msg = err.to_string();
        assert!(msg.contains("384") && msg.contains("768"), "got: {msg}");
    }

    #[test]
    fn test_not_found_names_id() {
        assert_eq!(
            WaveError::NotFound("doc-7".into()).to_string(),
            "item not found: doc-7"
        );
    }
}
