// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expansion of recurring events into concrete instances.
//!
//! The rule is walked with a cursor that starts at the base event and moves by
//! FREQ × INTERVAL. Each cursor position yields one instance, or with BYDAY,
//! one instance for each matching day of the seven days starting at the cursor.
//! The walk stops when COUNT runs out or the cursor moves past UNTIL or the
//! window.

use jiff::tz::TimeZone;
use jiff::{Span, Timestamp, Zoned};
use tracing::{debug, trace, warn};

use crate::semantic::{AllDayEnd, Event, TimeRole, parse_instant};
use crate::syntax::Parameters;
use crate::value::{RecurrenceFrequency, RecurrenceRule, WeekDay};
use crate::window::ParseWindow;

const DAYS_PER_WEEK: i64 = 7;

/// Expand a recurring event into the instances that overlap `window`.
///
/// Instances are clones of `base` with their own start, end and a sequence
/// number counting the candidates of the series. Instances outside the window
/// do not count against COUNT, excluded dates do unless BYDAY is set.
#[must_use]
pub fn expand(base: &Event, window: &ParseWindow) -> Vec<Event> {
    let (Some(rule), Some(start), Some(end)) = (&base.recurrence_rule, &base.start, &base.end)
    else {
        return Vec::new();
    };
    let Some(step) = step(rule) else {
        warn!(uid = ?base.uid, %rule, "unsupported recurrence frequency");
        return Vec::new();
    };

    let until = rule.until().and_then(|raw| {
        let role = TimeRole::End(AllDayEnd::Inclusive);
        match parse_instant(raw, &Parameters::default(), role, &TimeZone::UTC, None) {
            Ok(until) => Some(until.timestamp()),
            Err(err) => {
                debug!(value = raw, %err, "ignoring unreadable UNTIL");
                None
            }
        }
    });
    let by_day = rule.by_day();
    let by_month = rule.by_month();
    let excluded: Vec<Timestamp> = base.exclude_dates.iter().map(Zoned::timestamp).collect();

    let mut series = Series {
        base,
        window,
        until,
        remaining: rule.count(),
        sequence: 0,
        instances: Vec::new(),
    };

    for n in 0_i64.. {
        if series.exhausted() {
            break;
        }
        let Some((cursor_start, cursor_end)) = shift(start, end, step, n) else {
            break;
        };
        let cursor = cursor_start.timestamp();
        if until.is_some_and(|until| cursor > until) || cursor > window.end() {
            break;
        }

        let month = cursor_start.month();
        if !by_month.as_ref().is_none_or(|months| months.contains(&month)) {
            continue;
        }

        match &by_day {
            Some(days) => {
                for offset in 0..DAYS_PER_WEEK {
                    let Some((day_start, day_end)) =
                        shift(&cursor_start, &cursor_end, Span::new().days(1), offset)
                    else {
                        break;
                    };
                    if excluded.contains(&day_start.timestamp())
                        || !days.contains(&WeekDay::from(day_start.weekday()))
                    {
                        continue;
                    }

                    series.emit(day_start, day_end);
                    if series.exhausted() {
                        break;
                    }
                }
            }
            None if excluded.contains(&cursor) => series.skip(),
            None => series.emit(cursor_start, cursor_end),
        }
    }

    series.instances
}

/// Distance between two cursor positions.
fn step(rule: &RecurrenceRule) -> Option<Span> {
    let interval = i64::from(rule.interval());
    let span = match rule.frequency()? {
        RecurrenceFrequency::Daily => Span::new().try_days(interval),
        RecurrenceFrequency::Weekly => Span::new().try_days(DAYS_PER_WEEK * interval),
        RecurrenceFrequency::Monthly => Span::new().try_months(interval),
        RecurrenceFrequency::Yearly => Span::new().try_years(interval),
        RecurrenceFrequency::Secondly
        | RecurrenceFrequency::Minutely
        | RecurrenceFrequency::Hourly => return None,
    };
    span.ok()
}

/// Move both ends of an event by `n` steps from their base position.
///
/// Always counting from the base keeps month-end dates from drifting.
fn shift(start: &Zoned, end: &Zoned, step: Span, n: i64) -> Option<(Zoned, Zoned)> {
    let span = step.checked_mul(n).ok()?;
    Some((start.checked_add(span).ok()?, end.checked_add(span).ok()?))
}

struct Series<'a> {
    base: &'a Event,
    window: &'a ParseWindow,
    until: Option<Timestamp>,
    remaining: Option<u32>,
    sequence: i32,
    instances: Vec<Event>,
}

impl Series<'_> {
    fn exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    /// An excluded candidate, it still takes its place in the series.
    fn skip(&mut self) {
        self.sequence += 1;
        self.consume();
    }

    fn emit(&mut self, start: Zoned, end: Zoned) {
        self.sequence += 1;

        let (from, to) = (start.timestamp(), end.timestamp());
        if self.until.is_some_and(|until| from > until) {
            return;
        }
        if !self.window.overlaps(from, to) {
            trace!(uid = ?self.base.uid, start = %start, "recurrence instance outside window");
            return;
        }

        self.consume();
        let mut instance = self.base.clone();
        instance.start = Some(start);
        instance.end = Some(end);
        instance.sequence = self.sequence;
        self.instances.push(instance);
    }

    fn consume(&mut self) {
        if let Some(remaining) = &mut self.remaining {
            *remaining = remaining.saturating_sub(1);
        }
    }
}
