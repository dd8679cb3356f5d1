// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! TEXT value unescaping as defined in RFC 5545 Section 3.3.11.

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::input::ValueInput;
use chumsky::prelude::*;

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// text       = *(TSAFE-CHAR / ":" / DQUOTE / ESCAPED-CHAR)
/// ; Folded according to description above
///
/// ESCAPED-CHAR = ("\\" / "\;" / "\," / "\N" / "\n")
/// ; \\ encodes \, \N or \n encodes newline
/// ; \; encodes ;, \, encodes ,
/// ```
///
/// Unlike the grammar, bare `;`, `,` and lone backslashes are kept verbatim so
/// that sloppy producers still round-trip, which makes this parser infallible.
pub fn value_text<'src, I, E>() -> impl Parser<'src, I, String, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let escape = just('\\').ignore_then(select! {
        ';' => ';',
        ',' => ',',
        'N' | 'n' => '\n',
        '\\' => '\\',
    });

    choice((escape, any())).repeated().collect()
}

/// Escape text so that [`value_text`] restores it.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str(r"\\"),
            ';' => escaped.push_str(r"\;"),
            ',' => escaped.push_str(r"\,"),
            '\n' => escaped.push_str(r"\n"),
            c => escaped.push(c),
        }
    }
    escaped
}
