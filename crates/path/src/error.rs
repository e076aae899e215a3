use thiserror::Error;

/// Broad classification of a [`SubpathError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied malformed input. Not retried.
    InvalidArgument,
    /// An operation that needs at least one segment was called on an empty subpath.
    EmptyChainAccess,
}

/// Errors produced while building or querying a subpath.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum SubpathError {
    #[error("Segment {index} is missing.")]
    MissingSegment { index: usize },
    #[error("Segment {index} has a coordinate or parameter that is not a finite number.")]
    NonFiniteSegment { index: usize },
    #[error("Start point ({x}, {y}) is not a finite position.")]
    NonFiniteStartPoint { x: f32, y: f32 },
    #[error("Flattening tolerance {tolerance} must be a finite number of at least 1e-4.")]
    InvalidTolerance { tolerance: f32 },
    #[error("The subpath has no segments.")]
    EmptyChainAccess,
}

impl SubpathError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SubpathError::MissingSegment { .. }
            | SubpathError::NonFiniteSegment { .. }
            | SubpathError::NonFiniteStartPoint { .. }
            | SubpathError::InvalidTolerance { .. } => ErrorKind::InvalidArgument,
            SubpathError::EmptyChainAccess => ErrorKind::EmptyChainAccess,
        }
    }

    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }
}

#[test]
fn error_kinds() {
    assert_eq!(
        SubpathError::MissingSegment { index: 3 }.kind(),
        ErrorKind::InvalidArgument
    );
    assert!(SubpathError::InvalidTolerance { tolerance: -1.0 }.is_invalid_argument());
    assert_eq!(
        SubpathError::EmptyChainAccess.kind(),
        ErrorKind::EmptyChainAccess
    );
}

#[test]
fn error_messages() {
    assert_eq!(
        SubpathError::MissingSegment { index: 2 }.to_string(),
        "Segment 2 is missing."
    );
    assert_eq!(
        SubpathError::EmptyChainAccess.to_string(),
        "The subpath has no segments."
    );
}
