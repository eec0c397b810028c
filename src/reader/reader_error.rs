//! Error types for character readers.
//!
//! This module provides [ReaderError] and [ReaderErrorKind]. Only argument
//! validation can fail; reaching the end of a sequence is a normal return
//! value, never an error.

use std::io;
use thiserror::Error;

// =#========================================================================#=
// READER ERROR KIND
// =#========================================================================$=
/// Broad category of a [ReaderError].
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ReaderErrorKind {
    /// An argument was outside its domain, e.g. a negative skip count.
    InvalidArgument,
    /// A requested window does not fit into the destination buffer.
    OutOfBounds,
}

// =#========================================================================#=
// READER ERROR
// =#========================================================================$=
/// Error returned by [CharReader](crate::reader::CharReader) operations.
#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum ReaderError {
    /// `skip` was called with a negative count.
    #[error("Number of characters to skip is less than zero: {0}")]
    NegativeSkip(i64),

    /// `read_into` was asked to fill `buffer[offset..offset + count]`,
    /// which does not fit into the buffer.
    #[error("Buffer size={buffer_len}, offset={offset}, length={count}")]
    OutOfBounds {
        buffer_len: usize,
        offset: usize,
        count: usize,
    },
}

impl ReaderError {
    /// Get the error kind
    pub fn kind(&self) -> ReaderErrorKind {
        match self {
            ReaderError::NegativeSkip(_) => ReaderErrorKind::InvalidArgument,
            ReaderError::OutOfBounds { .. } => ReaderErrorKind::OutOfBounds,
        }
    }
}

impl From<ReaderError> for io::Error {
    fn from(err: ReaderError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

// =#========================================================================#=
// TESTS - READER ERROR
// =#========================================================================$=
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(
            ReaderError::NegativeSkip(-3).kind(),
            ReaderErrorKind::InvalidArgument
        );
        let err = ReaderError::OutOfBounds {
            buffer_len: 4,
            offset: 2,
            count: 3,
        };
        assert_eq!(err.kind(), ReaderErrorKind::OutOfBounds);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ReaderError::NegativeSkip(-1).to_string(),
            "Number of characters to skip is less than zero: -1"
        );
        let err = ReaderError::OutOfBounds {
            buffer_len: 10,
            offset: 2,
            count: 20,
        };
        assert_eq!(err.to_string(), "Buffer size=10, offset=2, length=20");
    }

    #[test]
    fn test_into_io_error() {
        let err: io::Error = ReaderError::NegativeSkip(-7).into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("-7"));
    }
}
