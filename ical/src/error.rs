// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Error types returned by the parser.

use chumsky::error::Rich;
use jiff::Timestamp;

use crate::parser::Calendar;

/// Errors raised while parsing a feed.
///
/// Structural errors and I/O errors always stop the parse. The others are
/// routed through the configured [`StrictMode`](crate::StrictMode).
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A logical line has no unquoted colon
    #[error("malformed line {line}: {content:?}")]
    MalformedLine {
        /// One-based number of the first physical line
        line: usize,
        /// The unfolded line
        content: String,
    },

    /// A single-valued property appeared twice in one event
    #[error("duplicate property '{property}' with value '{value}'")]
    DuplicateAttribute {
        /// Property name
        property: String,
        /// Raw value of the repeated occurrence
        value: String,
    },

    /// A property value could not be decoded
    #[error("invalid value '{value}' for property '{property}': {reason}")]
    FieldParse {
        /// Property name
        property: String,
        /// Raw value
        value: String,
        /// Why decoding failed
        #[source]
        reason: ValueError,
    },

    /// A required property is absent at event close
    #[error("missing required property '{property}'")]
    MissingRequiredField {
        /// Property name
        property: &'static str,
    },

    /// Both DTEND and DURATION are present
    #[error("event has both DTEND and DURATION")]
    ConflictingTerminators,

    /// END without a matching BEGIN
    #[error("unmatched END:{block} (no corresponding BEGIN)")]
    StructuralMismatch {
        /// Name given on the END line
        block: String,
    },

    /// The input stream failed
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Whether the error stops the parse regardless of strict mode.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::StructuralMismatch { .. } | Self::Io(_))
    }
}

/// A parse that stopped early, with the events committed before the failure.
#[derive(Debug, thiserror::Error)]
#[error("parse aborted: {error}")]
pub struct ParseFailure {
    /// The error that stopped the parse
    #[source]
    pub error: ParseError,
    /// Events committed before the failure
    pub partial: Calendar,
}

/// A value that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValueError {
    message: String,
}

impl ValueError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub(crate) fn from_rich(errs: &[Rich<'_, char>]) -> Self {
        let message = errs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self { message }
    }

    /// Human readable description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<jiff::Error> for ValueError {
    fn from(err: jiff::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Invalid parser configuration.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The all-day time zone is not a known IANA name
    #[error("unknown time zone '{name}'")]
    UnknownTimeZone {
        /// Name as configured
        name: String,
        /// Lookup failure
        #[source]
        source: jiff::Error,
    },

    /// The window ends before it starts
    #[error("window end {end} is before start {start}")]
    InvertedWindow {
        /// Window start
        start: Timestamp,
        /// Window end
        end: Timestamp,
    },
}
