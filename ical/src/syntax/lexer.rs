// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexer for unfolded iCalendar content lines.
//!
//! Only the delimiters that decide how a content line splits are told apart,
//! everything else is a single run of text.

use std::fmt::{self, Display};

use logos::Logos;

/// Token emitted by the content line lexer
#[derive(Debug, PartialEq, Eq, Clone, Copy, Logos)]
pub(crate) enum Token<'a> {
    /// Double Quote ("), decimal codepoint 22
    #[token(r#"""#)]
    DQuote,

    /// Colon (:), decimal codepoint 58
    #[token(":")]
    Colon,

    /// Semicolon (;), decimal codepoint 59
    #[token(";")]
    Semicolon,

    /// Any run of characters that are not delimiters
    #[regex(r#"[^":;]+"#)]
    Text(&'a str),
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DQuote => write!(f, "DQuote"),
            Self::Colon => write!(f, "Colon"),
            Self::Semicolon => write!(f, "Semicolon"),
            Self::Text(s) => write!(f, "Text({s})"),
        }
    }
}
