// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Time window used to filter events and to bound recurrence expansion.

use jiff::{SignedDuration, Timestamp};

use crate::error::ConfigError;

const DAYS_BEFORE_NOW: i64 = 1;
const DAYS_AFTER_NOW: i64 = 90;

/// Closed interval of instants an event must overlap to be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseWindow {
    start: Timestamp,
    end: Timestamp,
}

impl ParseWindow {
    /// Create a window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvertedWindow`] if `end` is before `start`.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ConfigError> {
        if end < start {
            return Err(ConfigError::InvertedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// The default window, from one day ago to ninety days ahead.
    #[must_use]
    pub fn around_now() -> Self {
        let now = Timestamp::now();
        let start = now
            .checked_sub(SignedDuration::from_hours(24 * DAYS_BEFORE_NOW))
            .unwrap_or(Timestamp::MIN);
        let end = now
            .checked_add(SignedDuration::from_hours(24 * DAYS_AFTER_NOW))
            .unwrap_or(Timestamp::MAX);
        Self { start, end }
    }

    /// Lower bound.
    #[must_use]
    pub const fn start(&self) -> Timestamp {
        self.start
    }

    /// Upper bound.
    #[must_use]
    pub const fn end(&self) -> Timestamp {
        self.end
    }

    /// Whether an event spanning `start..end` overlaps the window.
    ///
    /// An event matches when it straddles the window start, lies strictly
    /// inside, or straddles the window end. Touching either bound exactly does
    /// not count as straddling it.
    #[must_use]
    pub fn overlaps(&self, start: Timestamp, end: Timestamp) -> bool {
        (start < self.start && end > self.start)
            || (start > self.start && end < self.end)
            || (start < self.end && end > self.end)
    }
}

impl Default for ParseWindow {
    fn default() -> Self {
        Self::around_now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn window() -> ParseWindow {
        ParseWindow::new(ts("2024-01-01T00:00:00Z"), ts("2024-01-31T00:00:00Z")).unwrap()
    }

    #[test]
    fn rejects_inverted_window() {
        let err = ParseWindow::new(ts("2024-02-01T00:00:00Z"), ts("2024-01-01T00:00:00Z"));
        assert!(matches!(err, Err(ConfigError::InvertedWindow { .. })));
        assert!(ParseWindow::new(ts("2024-01-01T00:00:00Z"), ts("2024-01-01T00:00:00Z")).is_ok());
    }

    #[test]
    fn default_window_contains_now() {
        let w = ParseWindow::around_now();
        let now = Timestamp::now();
        assert!(w.start() < now && now < w.end());
        assert_eq!(
            w.end().duration_since(w.start()),
            SignedDuration::from_hours(24 * 91)
        );
    }

    #[test]
    fn overlaps_window() {
        let w = window();

        #[rustfmt::skip]
        let cases = [
            // straddles the start
            ("2023-12-31T12:00:00Z", "2024-01-01T12:00:00Z", true),
            // strictly inside
            ("2024-01-10T00:00:00Z", "2024-01-10T01:00:00Z", true),
            // straddles the end
            ("2024-01-30T12:00:00Z", "2024-01-31T12:00:00Z", true),
            // covers the whole window
            ("2023-12-01T00:00:00Z", "2024-02-01T00:00:00Z", true),
            // entirely before or after
            ("2023-12-01T00:00:00Z", "2023-12-02T00:00:00Z", false),
            ("2024-02-01T00:00:00Z", "2024-02-02T00:00:00Z", false),
        ];
        for (start, end, expected) in cases {
            assert_eq!(w.overlaps(ts(start), ts(end)), expected, "{start} .. {end}");
        }
    }

    #[test]
    fn overlaps_window_boundaries() {
        let w = window();

        #[rustfmt::skip]
        let cases = [
            // ends exactly at the window start
            ("2023-12-31T00:00:00Z", "2024-01-01T00:00:00Z", false),
            // starts exactly at the window start and ends inside
            ("2024-01-01T00:00:00Z", "2024-01-01T01:00:00Z", false),
            // starts exactly at the window start and ends past the end
            ("2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z", true),
            // starts inside and ends exactly at the window end
            ("2024-01-30T00:00:00Z", "2024-01-31T00:00:00Z", false),
            // starts exactly at the window end
            ("2024-01-31T00:00:00Z", "2024-01-31T01:00:00Z", false),
            // zero length, strictly inside
            ("2024-01-15T00:00:00Z", "2024-01-15T00:00:00Z", true),
        ];
        for (start, end, expected) in cases {
            assert_eq!(w.overlaps(ts(start), ts(end)), expected, "{start} .. {end}");
        }
    }
}
