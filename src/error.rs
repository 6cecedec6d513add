// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `Error` struct and the `ErrorKind` enum, which are
//! used to represent errors that can occur in the library.

/// A macro for defining the `ErrorKind` enum, the `Display` implementation for
/// it, and the constructors for the `Error` struct.
macro_rules! ErrorKind {
    ($(
        ($kind:ident, $ctor:ident)
    ),*) => {
        /// The kind of error that occurred.
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum ErrorKind {
            $(
                $kind,
            )*
        }

        impl std::fmt::Display for ErrorKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$kind => write!(f, "{}", stringify!($kind)),
                    )*
                }
            }
        }

        /// Constructors for [`Error`].
        impl Error {
            $(
                #[doc = concat!(
                    "Creates a new [`Error`] with the `",
                    stringify!($kind),
                    "` kind and the given description."
                )]
                pub(crate) fn $ctor(desc: impl Into<String>) -> crate::Error {
                    Self {
                        kind: ErrorKind::$kind,
                        desc: desc.into(),
                    }
                }
            )*
        }
    };
}

ErrorKind!(
    (DivisionByZero, division_by_zero),
    (Internal, internal),
    (InvalidConnection, invalid_connection),
    (InvalidDocument, invalid_document),
    (InvalidField, invalid_field),
    (InvalidGraph, invalid_graph),
    (InvalidNumeric, invalid_numeric),
    (MissingField, missing_field),
    (NodeNotFound, node_not_found),
    (StationNotFound, station_not_found),
    (UnknownTemplate, unknown_template)
);

/// An error that can occur while compiling an instance, evaluating a twin or
/// validating a [TwinGraph][crate::TwinGraph].
#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    desc: String,
}

impl Error {
    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human readable description of the error.
    pub fn desc(&self) -> &str {
        &self.desc
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.desc)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_kind() {
        let err = Error::missing_field("station.availability_pct");
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert_eq!(err.desc(), "station.availability_pct");
        assert_eq!(err.to_string(), "MissingField: station.availability_pct");

        let err = Error::division_by_zero("cycle_time_s is 0");
        assert_eq!(err.to_string(), "DivisionByZero: cycle_time_s is 0");
    }
}
