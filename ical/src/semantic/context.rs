// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tracking of nested BEGIN/END blocks.

/// Kind of block the parser is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockKind {
    /// Outside any recognized block
    Root,
    /// Inside a top-level VEVENT
    Event,
    /// Inside any other block, at any depth
    Unknown,
}

/// Stack of open blocks. The root is never popped.
#[derive(Debug)]
pub(crate) struct ContextStack {
    stack: Vec<BlockKind>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self {
            stack: vec![BlockKind::Root],
        }
    }

    pub fn current(&self) -> BlockKind {
        self.stack.last().copied().unwrap_or(BlockKind::Root)
    }

    /// Open a block. Only a VEVENT directly under the root is an event,
    /// everything else is skipped.
    pub fn push(&mut self, is_event: bool) -> BlockKind {
        let kind = match self.current() {
            BlockKind::Root if is_event => BlockKind::Event,
            _ => BlockKind::Unknown,
        };
        self.stack.push(kind);
        kind
    }

    /// Close the innermost block, `None` if only the root is left.
    pub fn pop(&mut self) -> Option<BlockKind> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }
}
