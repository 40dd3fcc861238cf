//! Error types for loading and transforming a mesh.

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors raised by the parser and the transform engine.
///
/// Line numbers are 1-based and refer to the source being read.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The source could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A `v` line did not hold exactly three numeric coordinates.
    #[error("line {line}: vertex needs exactly 3 coordinates, found {found}")]
    MalformedVertex {
        /// Line of the offending record.
        line: usize,
        /// Number of leading tokens that parsed as numbers.
        found: usize,
    },

    /// A token of an `f` line is not an integer.
    #[error("line {line}: face index `{token}` is not an integer")]
    MalformedIndex {
        /// Line of the offending record.
        line: usize,
        /// The token as written in the source.
        token: String,
    },

    /// A face references a vertex that does not exist (yet).
    #[error("line {line}: invalid vertex index {index}, {available} vertices parsed so far")]
    InvalidIndex {
        /// Line of the offending record.
        line: usize,
        /// The index as written in the source.
        index: i64,
        /// Vertices parsed before this line.
        available: usize,
    },

    /// The data pass found more records than the counting pass sized for.
    #[error("line {line}: more {what} than the {capacity} counted")]
    CapacityExceeded {
        /// Line of the offending record.
        line: usize,
        /// `"vertices"` or `"faces"`.
        what: &'static str,
        /// Slots allocated by the counting pass.
        capacity: usize,
    },

    /// A whole-mesh transform was requested on a mesh without vertices.
    #[error("model is empty")]
    EmptyModel,
}

impl MeshError {
    /// True for errors caused by a badly formed record.
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(
            self,
            Self::MalformedVertex { .. }
                | Self::MalformedIndex { .. }
                | Self::CapacityExceeded { .. }
        )
    }

    /// True for references to vertices that do not exist.
    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(self, Self::InvalidIndex { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let err = MeshError::InvalidIndex {
            line: 3,
            index: 0,
            available: 2,
        };
        assert!(err.is_index());
        assert!(!err.is_format());

        let err = MeshError::MalformedVertex { line: 1, found: 2 };
        assert!(err.is_format());
        assert!(!MeshError::EmptyModel.is_format());
    }

    #[test]
    fn test_display_mentions_line() {
        let err = MeshError::MalformedIndex {
            line: 7,
            token: "a".to_string(),
        };
        assert_eq!(err.to_string(), "line 7: face index `a` is not an integer");
    }
}
