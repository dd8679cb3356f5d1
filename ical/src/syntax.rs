// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Syntax layer: physical lines to content lines.
//!
//! ```text
//! Reader → Unfolder → Logical Lines → Scanner → Content Lines
//! ```

mod lexer;
mod scanner;
mod unfold;

pub use crate::syntax::scanner::{ContentLine, Parameters, ScanError, split_content_line};
pub use crate::syntax::unfold::{RawLine, Unfolder, unfold};
