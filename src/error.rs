//! Error type shared by the containers.

use thiserror::Error;

/// Errors reported by the array-backed containers.
///
/// Every variant is raised synchronously by the call that detected it.
/// Nothing is queued or retried.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A positional accessor was called with an index outside `0..len`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// The number of live entries at the time of the call.
        len: usize,
    },

    /// A mutation that needs backing storage was attempted on an immutable
    /// container.
    #[error("unsupported operation on an immutable container: {operation}")]
    Unsupported {
        /// The operation that was refused.
        operation: &'static str,
    },

    /// A cursor was asked to operate on its current element before a
    /// successful `next`, or twice for the same element.
    #[error("cursor has no current element")]
    NoCurrentElement,

    /// The container was structurally modified behind a cursor's back.
    ///
    /// Detection is best effort. The absence of this error does not prove
    /// that no conflicting modification happened.
    #[error("container was structurally modified during iteration")]
    ConcurrentModification,
}

impl Error {
    /// Create an index out of range error.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create an unsupported operation error.
    pub fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }
}

/// Result type used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            Error::out_of_range(7, 3).to_string(),
            "index 7 out of range for length 3"
        );
        assert_eq!(
            Error::unsupported("insert").to_string(),
            "unsupported operation on an immutable container: insert"
        );
        assert_eq!(
            Error::NoCurrentElement.to_string(),
            "cursor has no current element"
        );
    }
}
