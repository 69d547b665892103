//! Error types for list, cursor and sub-list operations.

use std::fmt;

/// The error returned by fallible operations on a [`List`], a [`Cursor`]
/// or a [`SubList`].
///
/// Errors are reported synchronously and never recovered internally. A
/// structural change made through one handle is *not* an error for the
/// other handles on the same list: cursors and sub-lists adjust themselves
/// instead.
///
/// [`List`]: crate::List
/// [`Cursor`]: crate::Cursor
/// [`SubList`]: crate::SubList
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An index argument was outside the valid range.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The length of the list (or view) at the time of the call.
        len: usize,
    },
    /// A cursor was used outside its protocol, or after it was closed.
    IllegalState(&'static str),
    /// Traversal past an end, or first/last access on an empty list.
    NoSuchElement,
    /// The operation is not supported by this configuration.
    UnsupportedOperation(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "index {} out of bounds for length {}", index, len)
            }
            Error::IllegalState(reason) => write!(f, "illegal state: {}", reason),
            Error::NoSuchElement => f.write_str("no such element"),
            Error::UnsupportedOperation(op) => write!(f, "unsupported operation: {}", op),
        }
    }
}

impl std::error::Error for Error {}

/// Shorthand for results of this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfBounds { index, len })
    }
}

pub(crate) fn check_position(index: usize, len: usize) -> Result<()> {
    if index <= len {
        Ok(())
    } else {
        Err(Error::IndexOutOfBounds { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            Error::IndexOutOfBounds { index: 5, len: 3 }.to_string(),
            "index 5 out of bounds for length 3"
        );
        assert_eq!(
            Error::IllegalState("cursor is closed").to_string(),
            "illegal state: cursor is closed"
        );
        assert_eq!(Error::NoSuchElement.to_string(), "no such element");
    }

    #[test]
    fn index_checks() {
        assert!(check_index(0, 1).is_ok());
        assert_eq!(
            check_index(1, 1),
            Err(Error::IndexOutOfBounds { index: 1, len: 1 })
        );
        assert!(check_position(1, 1).is_ok());
        assert!(check_position(2, 1).is_err());
    }
}
