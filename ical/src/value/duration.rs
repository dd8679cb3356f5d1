// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Duration value type parser as defined in RFC 5545 Section 3.3.6.
//!
//! The grammar is widened to the ISO 8601 designators `Y` and `M` (months) that
//! many producers emit, so `P1Y5DT1H10M30S` is accepted.

use chumsky::extra::ParserExtra;
use chumsky::input::ValueInput;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;
use jiff::SignedDuration;

use crate::value::miscellaneous::{ValueExpected, digits};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const DAYS_PER_WEEK: i64 = 7;
const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_YEAR: i64 = 365;

/// Duration value, every designator kept as written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ValueDuration {
    /// Whether the duration is positive
    pub positive: bool,
    /// Years, counted as 365 days
    pub years: u32,
    /// Months, counted as 30 days
    pub months: u32,
    /// Weeks
    pub weeks: u32,
    /// Days
    pub days: u32,
    /// Hours
    pub hours: u32,
    /// Minutes
    pub minutes: u32,
    /// Seconds
    pub seconds: u32,
}

impl ValueDuration {
    /// Convert into an exact elapsed time.
    #[must_use]
    pub fn signed_duration(&self) -> SignedDuration {
        let days = i64::from(self.years) * DAYS_PER_YEAR
            + i64::from(self.months) * DAYS_PER_MONTH
            + i64::from(self.weeks) * DAYS_PER_WEEK
            + i64::from(self.days);

        let secs = days * SECONDS_PER_DAY
            + i64::from(self.hours) * SECONDS_PER_HOUR
            + i64::from(self.minutes) * SECONDS_PER_MINUTE
            + i64::from(self.seconds);

        SignedDuration::from_secs(if self.positive { secs } else { -secs })
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// dur-value  = (["+"] / "-") "P" [dur-year] [dur-month] [dur-week] [dur-day] [dur-time]
///
/// dur-time   = "T" [dur-hour] [dur-minute] [dur-second]
/// dur-year   = 1*DIGIT "Y"
/// dur-month  = 1*DIGIT "M"
/// dur-week   = 1*DIGIT "W"
/// dur-day    = 1*DIGIT "D"
/// dur-hour   = 1*DIGIT "H"
/// dur-minute = 1*DIGIT "M"
/// dur-second = 1*DIGIT "S"
/// ```
///
/// At least one component must be present, and "T" must be followed by one.
pub fn value_duration<'src, I, E>() -> impl Parser<'src, I, ValueDuration, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    // case-sensitive
    let int = digits().try_map(|str, span| match lexical::parse::<u32, _>(&str) {
        Ok(v) => Ok(v),
        Err(_) => Err(E::Error::expected_found([ValueExpected::U32], None, span)),
    });
    let component = move |designator: char| int.clone().then_ignore(just(designator)).or_not();

    let sign = select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|sign| !matches!(sign, Some('-')));

    let time = just('T').ignore_then(
        component('H')
            .then(component('M'))
            .then(component('S'))
            .try_map(|((hours, minutes), seconds), span| {
                if hours.is_none() && minutes.is_none() && seconds.is_none() {
                    Err(E::Error::expected_found([ValueExpected::Duration], None, span))
                } else {
                    Ok((hours, minutes, seconds))
                }
            }),
    );

    sign.then_ignore(just('P'))
        .then(component('Y'))
        .then(component('M'))
        .then(component('W'))
        .then(component('D'))
        .then(time.or_not())
        .try_map(|(((((positive, years), months), weeks), days), time), span| {
            let date_empty =
                years.is_none() && months.is_none() && weeks.is_none() && days.is_none();
            if date_empty && time.is_none() {
                return Err(E::Error::expected_found([ValueExpected::Duration], None, span));
            }

            let (hours, minutes, seconds) = time.unwrap_or_default();
            Ok(ValueDuration {
                positive,
                years: years.unwrap_or(0),
                months: months.unwrap_or(0),
                weeks: weeks.unwrap_or(0),
                days: days.unwrap_or(0),
                hours: hours.unwrap_or(0),
                minutes: minutes.unwrap_or(0),
                seconds: seconds.unwrap_or(0),
            })
        })
}
