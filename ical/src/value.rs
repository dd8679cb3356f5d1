// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsers for the value types of iCalendar properties.
//!
//! Each parser works on the unfolded, unescaped value string of a single
//! content line. The `parse_*` functions wrap them for callers that only need
//! the final value and a readable error.

mod datetime;
mod duration;
mod miscellaneous;
mod numeric;
mod rrule;
mod text;

use chumsky::prelude::*;
use jiff::SignedDuration;

pub use crate::error::ValueError;
pub use crate::value::datetime::{
    ValueDate, ValueDateTime, ValueTime, value_date, value_date_time,
};
pub use crate::value::duration::{ValueDuration, value_duration};
pub use crate::value::numeric::{Geo, value_float, value_geo};
pub use crate::value::rrule::{RecurrenceFrequency, RecurrenceRule, WeekDay, value_rrule};
pub use crate::value::text::{escape_text, value_text};

/// Run a value parser over the whole of `src`.
pub(crate) fn parse_with<'src, O, P>(parser: P, src: &'src str) -> Result<O, ValueError>
where
    P: Parser<'src, &'src str, O, extra::Err<Rich<'src, char>>>,
{
    parser
        .then_ignore(end())
        .parse(src)
        .into_result()
        .map_err(|errs| ValueError::from_rich(&errs))
}

/// Decode a duration value into a signed elapsed time.
///
/// # Errors
///
/// Returns an error if `raw` is not a duration.
pub fn parse_duration(raw: &str) -> Result<SignedDuration, ValueError> {
    parse_with(value_duration(), raw).map(|d| d.signed_duration())
}

/// Decode a GEO value into its latitude and longitude.
///
/// # Errors
///
/// Returns an error if the delimiter is missing or either half is not a float.
pub fn parse_geo(raw: &str) -> Result<Geo, ValueError> {
    parse_with(value_geo(), raw)
}

/// Decode a recurrence rule into its parts.
///
/// # Errors
///
/// Never fails in practice, malformed parts are skipped.
pub fn parse_rrule(raw: &str) -> Result<RecurrenceRule, ValueError> {
    parse_with(value_rrule(), raw)
}

/// Undo TEXT escaping: `\\`, `\;`, `\,`, `\n` and `\N`.
#[must_use]
pub fn unescape_text(raw: &str) -> String {
    parse_with(value_text(), raw).unwrap_or_else(|_| raw.to_owned())
}
