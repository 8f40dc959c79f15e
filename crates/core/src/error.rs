//! Typed error definitions shared by every seqlinq crate.
//!
//! [`Error`] is raised synchronously by the call that detects the problem.
//! Operators that have a defaulting variant (`first_or_default`,
//! `element_at_or_default`, ...) return their fallback instead of an error;
//! nothing else swallows one.

use thiserror::Error;

use crate::types::TypeDescriptor;
use crate::value::Value;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure raised by cursors, query operators and the type identity helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// `current` was read while the cursor was not positioned on an element.
    #[error("cursor is not positioned on an element")]
    InvalidState,

    /// A selection or aggregate found nothing and no default was supplied.
    #[error("sequence contains no matching element")]
    NoElement,

    /// An explicit index was negative or past the end of the sequence.
    #[error("index {index} is out of range")]
    IndexOutOfRange { index: i64 },

    /// A value does not satisfy the requested cast target.
    #[error("cannot cast {value} to {target}")]
    InvalidCast {
        /// Rendered form of the rejected value.
        value: String,
        /// Display name of the target descriptor.
        target: String,
    },

    /// A type name was registered twice with different ancestry.
    #[error("type `{name}` is already registered with a different parent")]
    TypeConflict { name: String },

    /// A generated element does not fit in `i64`.
    #[error("range starting at {start} overflows at offset {offset}")]
    Overflow { start: i64, offset: usize },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidState => ErrorKind::InvalidState,
            Error::NoElement => ErrorKind::NoElement,
            Error::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Error::InvalidCast { .. } => ErrorKind::InvalidCast,
            Error::TypeConflict { .. } => ErrorKind::TypeConflict,
            Error::Overflow { .. } => ErrorKind::Overflow,
        }
    }

    pub fn invalid_cast(value: &Value, target: &TypeDescriptor) -> Self {
        Self::InvalidCast { value: value.to_string(), target: target.name().to_owned() }
    }
}

/// Fieldless discriminant of [`Error`] for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidState,
    NoElement,
    IndexOutOfRange,
    InvalidCast,
    TypeConflict,
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::type_of;
    use rstest::rstest;

    #[rstest]
    #[case(Error::InvalidState, ErrorKind::InvalidState)]
    #[case(Error::NoElement, ErrorKind::NoElement)]
    #[case(Error::IndexOutOfRange { index: -1 }, ErrorKind::IndexOutOfRange)]
    #[case(Error::TypeConflict { name: "Base".into() }, ErrorKind::TypeConflict)]
    #[case(Error::Overflow { start: i64::MAX, offset: 1 }, ErrorKind::Overflow)]
    fn kind_matches_variant(#[case] error: Error, #[case] expected: ErrorKind) {
        assert_eq!(error.kind(), expected);
    }

    #[rstest]
    fn invalid_cast_renders_value_and_target() {
        let err = Error::invalid_cast(&Value::from(1.0), &type_of::STRING);
        assert_eq!(err.kind(), ErrorKind::InvalidCast);
        assert_eq!(err.to_string(), "cannot cast 1 to string");
    }
}
