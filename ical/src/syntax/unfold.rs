// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Line unfolding as defined in RFC 5545 Section 3.1.
//!
//! A physical line that starts with a single space or horizontal tab continues
//! the previous one. The leading whitespace character is removed and the rest
//! is appended verbatim. Bytes that are not valid UTF-8 are replaced with
//! U+FFFD rather than failing the read.

use std::io::{self, BufRead};

/// A logical line assembled from one or more physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// One-based number of the first physical line
    pub line: usize,
    /// Unfolded content, without the line terminator
    pub content: String,
}

/// Iterator over the logical lines of a reader.
#[derive(Debug)]
pub struct Unfolder<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    pending: Option<(usize, String)>,
}

/// Unfold the lines of `reader`.
pub fn unfold<R: BufRead>(reader: R) -> Unfolder<R> {
    Unfolder {
        reader,
        buf: Vec::new(),
        line_no: 0,
        pending: None,
    }
}

impl<R: BufRead> Unfolder<R> {
    fn physical(&mut self) -> Option<io::Result<(usize, String)>> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => return None,
            Ok(_) => {}
            Err(err) => return Some(Err(err)),
        }
        self.line_no += 1;

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        while self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        let mut line = String::from_utf8_lossy(&self.buf).into_owned();

        if self.line_no == 1
            && let Some(rest) = line.strip_prefix('\u{feff}')
        {
            line = rest.to_owned();
        }
        Some(Ok((self.line_no, line)))
    }
}

impl<R: BufRead> Iterator for Unfolder<R> {
    type Item = io::Result<RawLine>;

    fn next(&mut self) -> Option<Self::Item> {
        let (line, mut content) = match self.pending.take() {
            Some(pending) => pending,
            None => match self.physical()? {
                Ok(first) => first,
                Err(err) => return Some(Err(err)),
            },
        };

        loop {
            match self.physical() {
                None => break,
                Some(Err(err)) => return Some(Err(err)),
                Some(Ok((no, next))) => match next.strip_prefix([' ', '\t']) {
                    Some(rest) => content.push_str(rest),
                    None => {
                        self.pending = Some((no, next));
                        break;
                    }
                },
            }
        }

        Some(Ok(RawLine { line, content }))
    }
}
