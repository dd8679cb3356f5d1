// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule values.
//!
//! A rule is kept as the raw `NAME=value` mapping it was written as. Typed
//! accessors decode the parts the expander understands on demand, so unknown
//! or malformed parts never reject the whole rule.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use chumsky::extra::ParserExtra;
use chumsky::input::ValueInput;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE, KW_RRULE_BYDAY,
    KW_RRULE_BYMONTH, KW_RRULE_COUNT, KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL,
};
use crate::value::miscellaneous::{digits, i8_0_2, i8_0_3, i8_0_9, i8_1_4, i8_1_9};
use crate::value::parse_with;

/// Recurrence rule as a mapping of rule part name to raw value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    parts: BTreeMap<String, String>,
}

impl RecurrenceRule {
    /// Raw value of a rule part, looked up case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parts
            .get(&name.to_ascii_uppercase())
            .map(String::as_str)
    }

    /// Iterate over all rule parts in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parts.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of rule parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the rule has no parts at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The FREQ part, `None` when absent or not a known frequency.
    #[must_use]
    pub fn frequency(&self) -> Option<RecurrenceFrequency> {
        self.get(KW_RRULE_FREQ)
            .and_then(|v| RecurrenceFrequency::from_str(v).ok())
    }

    /// The INTERVAL part, 1 when absent, zero or malformed.
    #[must_use]
    pub fn interval(&self) -> u32 {
        self.get(KW_RRULE_INTERVAL)
            .and_then(|v| parse_with(digits(), v).ok())
            .and_then(|v| lexical::parse::<u32, _>(v).ok())
            .filter(|&n| n > 0)
            .unwrap_or(1)
    }

    /// The COUNT part, `None` when absent or malformed.
    #[must_use]
    pub fn count(&self) -> Option<u32> {
        self.get(KW_RRULE_COUNT)
            .and_then(|v| parse_with(digits(), v).ok())
            .and_then(|v| lexical::parse::<u32, _>(v).ok())
    }

    /// The raw UNTIL part.
    #[must_use]
    pub fn until(&self) -> Option<&str> {
        self.get(KW_RRULE_UNTIL)
    }

    /// The weekdays listed in BYDAY, ordinals dropped.
    ///
    /// `None` when the part is absent or cannot be read.
    #[must_use]
    pub fn by_day(&self) -> Option<Vec<WeekDay>> {
        self.get(KW_RRULE_BYDAY)
            .and_then(|v| parse_with(bywdaylist(), v).ok())
    }

    /// The months listed in BYMONTH.
    ///
    /// `None` when the part is absent or cannot be read.
    #[must_use]
    pub fn by_month(&self) -> Option<Vec<i8>> {
        self.get(KW_RRULE_BYMONTH)
            .and_then(|v| parse_with(bymolist(), v).ok())
    }
}

impl Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for RecurrenceRule {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let parts = iter
            .into_iter()
            .map(|(k, v)| (k.to_ascii_uppercase(), v))
            .collect();
        Self { parts }
    }
}

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum RecurrenceFrequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(missing_docs)]
pub enum WeekDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl From<jiff::civil::Weekday> for WeekDay {
    fn from(value: jiff::civil::Weekday) -> Self {
        use jiff::civil::Weekday;
        match value {
            Weekday::Sunday => Self::Sunday,
            Weekday::Monday => Self::Monday,
            Weekday::Tuesday => Self::Tuesday,
            Weekday::Wednesday => Self::Wednesday,
            Weekday::Thursday => Self::Thursday,
            Weekday::Friday => Self::Friday,
            Weekday::Saturday => Self::Saturday,
        }
    }
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekDay::Sunday => write!(f, "{KW_DAY_SU}"),
            WeekDay::Monday => write!(f, "{KW_DAY_MO}"),
            WeekDay::Tuesday => write!(f, "{KW_DAY_TU}"),
            WeekDay::Wednesday => write!(f, "{KW_DAY_WE}"),
            WeekDay::Thursday => write!(f, "{KW_DAY_TH}"),
            WeekDay::Friday => write!(f, "{KW_DAY_FR}"),
            WeekDay::Saturday => write!(f, "{KW_DAY_SA}"),
        }
    }
}

/// Format Definition:
///
/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
/// recur-rule-part = name "=" value
/// ```
///
/// Parts without "=" are skipped, a repeated name keeps the last value.
pub fn value_rrule<'src, I, E>() -> impl Parser<'src, I, RecurrenceRule, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let name = none_of("=;").repeated().at_least(1).collect::<String>();
    let value = none_of(';').repeated().collect::<String>();
    let part = choice((
        name.then_ignore(just('=')).then(value).map(Some),
        none_of(';').repeated().to(None),
    ));

    part.separated_by(just(';'))
        .collect::<Vec<_>>()
        .map(|parts| parts.into_iter().flatten().collect())
}

/// ```txt
/// bywdaylist  = ( weekdaynum *("," weekdaynum) )
/// ```
fn bywdaylist<'src, I, E>() -> impl Parser<'src, I, Vec<WeekDay>, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    weekdaynum().separated_by(just(',')).at_least(1).collect()
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// plus        = "+"
/// minus       = "-"
/// ```
fn weekdaynum<'src, I, E>() -> impl Parser<'src, I, WeekDay, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    one_of("+-")
        .or_not()
        .then(ordwk())
        .or_not()
        .ignore_then(weekday())
}

/// ```txt
/// ordwk       = 1*2DIGIT       ;1 to 53
/// ```
fn ordwk<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        i8_1_4().then(i8_0_9()).map(|(a, b)| a * 10 + b), // 10-49
        just('5').ignore_then(i8_0_3()).map(|a| 50 + a),  // 50-53
        just('0').ignore_then(i8_1_9()),                  // 01-09
        i8_1_9(),                                         // 1-9
    ))
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src, I, E>() -> impl Parser<'src, I, WeekDay, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        just(KW_DAY_SU).to(WeekDay::Sunday),
        just(KW_DAY_MO).to(WeekDay::Monday),
        just(KW_DAY_TU).to(WeekDay::Tuesday),
        just(KW_DAY_WE).to(WeekDay::Wednesday),
        just(KW_DAY_TH).to(WeekDay::Thursday),
        just(KW_DAY_FR).to(WeekDay::Friday),
        just(KW_DAY_SA).to(WeekDay::Saturday),
    ))
}

/// ```txt
/// bymolist    = ( monthnum *("," monthnum) )
/// monthnum    = 1*2DIGIT       ;1 to 12
/// ```
fn bymolist<'src, I, E>() -> impl Parser<'src, I, Vec<i8>, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let monthnum = choice((
        just('1').ignore_then(i8_0_2()).map(|b| 10 + b), // 10-12
        just('0').or_not().ignore_then(i8_1_9()),        // 1-9 / 01-09
    ));
    monthnum.separated_by(just(',')).at_least(1).collect()
}
