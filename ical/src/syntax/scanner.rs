// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scanner for iCalendar content lines.
//!
//! Per RFC 5545, a content line has the format:
//! ```text
//! contentline = name *(";" param) ":" value CRLF
//! ```
//!
//! Quoted parameter values may contain `:` and `;`, so the line is split on the
//! first delimiter that is not inside double quotes. Parameter values are kept
//! exactly as written, the property value is unescaped.

use logos::Logos;

use crate::keyword::{KW_VALUE, KW_VALUE_DATE};
use crate::syntax::lexer::Token;
use crate::value::unescape_text;

/// A scanned iCalendar content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name as written
    pub name: String,
    /// Property parameters, in source order
    pub parameters: Parameters,
    /// Unescaped property value
    pub value: String,
}

impl ContentLine {
    /// Whether the property name is `name`, ignoring ASCII case.
    #[must_use]
    pub fn name_is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Ordered parameter set of a content line.
///
/// Lookups ignore ASCII case. Values keep surrounding quotes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Parameters(Vec<(String, String)>);

impl Parameters {
    /// Raw value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Value of a parameter with one pair of surrounding double quotes removed.
    #[must_use]
    pub fn unquoted(&self, name: &str) -> Option<&str> {
        self.get(name).map(|v| {
            v.strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(v)
        })
    }

    /// Set a parameter, replacing an earlier value of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&name)) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Whether `VALUE=DATE` is present.
    #[must_use]
    pub fn is_date(&self) -> bool {
        self.unquoted(KW_VALUE)
            .is_some_and(|v| v.eq_ignore_ascii_case(KW_VALUE_DATE))
    }

    /// Iterate over parameters in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::default();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Why a logical line is not a content line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// No colon outside double quotes
    #[error("missing ':' between name and value")]
    MissingColon,

    /// Nothing before the first delimiter
    #[error("empty property name")]
    EmptyName,
}

/// Split an unfolded line into name, parameters and unescaped value.
///
/// # Errors
///
/// Returns an error if there is no unquoted colon or the name is empty.
pub fn split_content_line(line: &str) -> Result<ContentLine, ScanError> {
    let mut quoted = false;
    let mut segment_start = 0;
    let mut segments = Vec::new();
    let mut value = None;

    for (token, span) in Token::lexer(line).spanned() {
        match token {
            Ok(Token::DQuote) => quoted = !quoted,
            Ok(Token::Semicolon) if !quoted => {
                segments.push(line.get(segment_start..span.start).unwrap_or_default());
                segment_start = span.end;
            }
            Ok(Token::Colon) if !quoted => {
                segments.push(line.get(segment_start..span.start).unwrap_or_default());
                value = Some(line.get(span.end..).unwrap_or_default());
                break;
            }
            _ => {}
        }
    }

    let value = value.ok_or(ScanError::MissingColon)?;
    let mut segments = segments.into_iter();
    let name = segments.next().unwrap_or_default();
    if name.is_empty() {
        return Err(ScanError::EmptyName);
    }

    let parameters = segments
        .filter_map(|segment| segment.split_once('='))
        .collect();

    let value = value.strip_prefix(' ').unwrap_or(value);
    Ok(ContentLine {
        name: name.to_owned(),
        parameters,
        value: unescape_text(value),
    })
}
