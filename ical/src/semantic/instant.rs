// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Interpretation of DATE and DATE-TIME values as instants.

use jiff::tz::TimeZone;
use jiff::{SignedDuration, Zoned};

use crate::config::TzidResolver;
use crate::error::ValueError;
use crate::keyword::KW_TZID;
use crate::syntax::Parameters;
use crate::value::{parse_with, value_date, value_date_time};

/// Which end of an event a value describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRole {
    /// DTSTART and friends, date-only values start at midnight
    Start,
    /// DTEND, date-only values are turned into the last instant of a day
    End(AllDayEnd),
}

/// How a date-only end value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllDayEnd {
    /// The date is the first day after the event, ends one millisecond before
    /// that day starts
    Exclusive,
    /// The date is the last day of the event, ends at 23:59:59 that day
    Inclusive,
}

/// Whether a value is date-only: `VALUE=DATE` or exactly eight characters.
#[must_use]
pub fn is_date_only(raw: &str, params: &Parameters) -> bool {
    params.is_date() || raw.len() == 8
}

/// Resolve a date or date-time value to an instant.
///
/// Date-only values are placed in `all_day_tz`. Date-times ending in `Z` are
/// UTC, those with a TZID go through [`resolve_tzid`], and the rest are read in
/// the system zone.
///
/// # Errors
///
/// Returns an error if `raw` is not a date or date-time, or the local time
/// cannot be placed in its zone.
pub fn parse_instant(
    raw: &str,
    params: &Parameters,
    role: TimeRole,
    all_day_tz: &TimeZone,
    resolver: Option<&TzidResolver>,
) -> Result<Zoned, ValueError> {
    let raw = raw.trim();
    if is_date_only(raw, params) {
        let date = parse_with(value_date(), raw)?.civil_date()?;
        let tz = all_day_tz.clone();
        let zoned = match role {
            TimeRole::Start => date.to_zoned(tz),
            TimeRole::End(AllDayEnd::Inclusive) => date.at(23, 59, 59, 0).to_zoned(tz),
            TimeRole::End(AllDayEnd::Exclusive) => date
                .to_zoned(tz)
                .and_then(|z| z.checked_sub(SignedDuration::from_millis(1))),
        };
        return Ok(zoned?);
    }

    let date_time = parse_with(value_date_time(), raw)?;
    let tz = if date_time.time.utc {
        TimeZone::UTC
    } else if let Some(tzid) = params.unquoted(KW_TZID).filter(|s| !s.is_empty()) {
        resolve_tzid(tzid, resolver)
    } else {
        TimeZone::system()
    };
    Ok(date_time.civil_date_time().to_zoned(tz)?)
}

/// Find the zone named by a TZID parameter.
///
/// The resolver is asked first, then the IANA database with the name as given
/// and in its [normalized](normalize_tzid) form. Unknown names fall back to UTC.
#[must_use]
pub fn resolve_tzid(tzid: &str, resolver: Option<&TzidResolver>) -> TimeZone {
    if let Some(tz) = resolver.and_then(|resolve| resolve(tzid)) {
        return tz;
    }
    if let Ok(tz) = TimeZone::get(tzid) {
        return tz;
    }

    let normalized = normalize_tzid(tzid);
    match TimeZone::get(&normalized) {
        Ok(tz) => tz,
        Err(err) => {
            tracing::warn!(tzid, %err, "unknown time zone, falling back to UTC");
            TimeZone::UTC
        }
    }
}

/// Restore the usual capitalization of an IANA zone name.
///
/// Each underscore separated word is lowercased and every letter that starts
/// a word is capitalized, except for the articles `of` and `es`.
#[must_use]
pub fn normalize_tzid(tzid: &str) -> String {
    tzid.split('_')
        .map(|word| {
            let word = word.to_lowercase();
            if word == "of" || word == "es" {
                return word;
            }

            let mut titled = String::with_capacity(word.len());
            let mut boundary = true;
            for c in word.chars() {
                if boundary {
                    titled.extend(c.to_uppercase());
                } else {
                    titled.push(c);
                }
                boundary = !c.is_alphanumeric();
            }
            titled
        })
        .collect::<Vec<_>>()
        .join("_")
}
