// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Checks and fixes applied when a VEVENT closes.

use jiff::SignedDuration;

use crate::error::{ParseError, ValueError};
use crate::keyword::{KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_UID};
use crate::semantic::event::Event;
use crate::semantic::instant::{AllDayEnd, TimeRole, is_date_only};
use crate::semantic::resolver::Resolver;

const ALL_DAY: SignedDuration = SignedDuration::from_hours(24);

/// Settle the end of an all-day event.
///
/// Some producers write a single all-day event with the same DTSTART and
/// DTEND date. Such an end is read as the last second of that day instead of
/// one millisecond before it starts. A date-only start without any end lasts
/// one day.
pub(crate) fn reconcile(event: &mut Event, resolver: &Resolver<'_>) -> Result<(), ParseError> {
    if let (Some(raw_start), Some(raw_end)) = (&event.raw_start, &event.raw_end)
        && raw_start.value == raw_end.value
        && raw_end.params.is_date()
    {
        let end = resolver
            .instant(
                &raw_end.value,
                &raw_end.params,
                TimeRole::End(AllDayEnd::Inclusive),
            )
            .map_err(|reason| ParseError::FieldParse {
                property: KW_DTEND.to_owned(),
                value: raw_end.value.clone(),
                reason,
            })?;
        event.end = Some(end);
    }

    if event.end.is_none()
        && let (Some(start), Some(raw_start)) = (&event.start, &event.raw_start)
        && is_date_only(&raw_start.value, &raw_start.params)
    {
        let end = start
            .checked_add(ALL_DAY)
            .map_err(|err| ParseError::FieldParse {
                property: KW_DTSTART.to_owned(),
                value: raw_start.value.clone(),
                reason: ValueError::from(err),
            })?;
        event.end = Some(end);
    }

    Ok(())
}

/// Check the fields every event needs.
pub(crate) fn validate(event: &Event) -> Result<(), ParseError> {
    if event.uid.is_none() {
        return Err(ParseError::MissingRequiredField { property: KW_UID });
    }
    if event.start.is_none() {
        return Err(ParseError::MissingRequiredField {
            property: KW_DTSTART,
        });
    }
    if event.stamp.is_none() {
        return Err(ParseError::MissingRequiredField {
            property: KW_DTSTAMP,
        });
    }
    if event.raw_end.is_some() && event.duration.is_some() {
        return Err(ParseError::ConflictingTerminators);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use jiff::tz::TimeZone;

    use super::*;
    use crate::config::ParserConfig;
    use crate::syntax::split_content_line;

    fn event(lines: &[&str]) -> Event {
        let config = ParserConfig::default();
        let resolver = Resolver::new(&config);
        let mut event = Event::default();
        for src in lines {
            let line = split_content_line(src).unwrap();
            resolver.resolve(&mut event, &line).unwrap();
        }
        reconcile(&mut event, &resolver).unwrap();
        event
    }

    fn end_of(event: &Event) -> jiff::civil::DateTime {
        event.end.as_ref().unwrap().datetime()
    }

    #[test]
    fn same_day_all_day_event_lasts_the_whole_day() {
        let e = event(&["DTSTART;VALUE=DATE:20190101", "DTEND;VALUE=DATE:20190101"]);
        assert_eq!(end_of(&e), date(2019, 1, 1).at(23, 59, 59, 0));
    }

    #[test]
    fn exclusive_all_day_end_is_kept() {
        let e = event(&["DTSTART;VALUE=DATE:20190101", "DTEND;VALUE=DATE:20190103"]);
        assert_eq!(end_of(&e), date(2019, 1, 2).at(23, 59, 59, 999_000_000));

        // the inclusive reading needs VALUE=DATE on DTEND
        let e = event(&["DTSTART:20190101", "DTEND:20190101"]);
        assert_eq!(end_of(&e), date(2018, 12, 31).at(23, 59, 59, 999_000_000));
    }

    #[test]
    fn date_only_start_defaults_to_one_day() {
        let e = event(&["DTSTART;VALUE=DATE:20190101"]);
        assert_eq!(
            e.end,
            Some(date(2019, 1, 2).to_zoned(TimeZone::UTC).unwrap())
        );

        let e = event(&["DTSTART:20190101T090000Z"]);
        assert!(e.end.is_none());
    }

    #[test]
    fn validates_required_fields() {
        #[rustfmt::skip]
        let cases: [(&[&str], Option<&str>); 5] = [
            (&["UID:a", "DTSTART:20190101T090000Z", "DTSTAMP:20190101T090000Z"], None),
            (&["DTSTART:20190101T090000Z", "DTSTAMP:20190101T090000Z"],          Some("UID")),
            (&["UID:a", "DTSTAMP:20190101T090000Z"],                             Some("DTSTART")),
            (&["UID:a", "DTSTART:20190101T090000Z"],                             Some("DTSTAMP")),
            (&["UID:", "DTSTART:20190101T090000Z", "DTSTAMP:20190101T090000Z"],  None),
        ];
        for (lines, missing) in cases {
            match (validate(&event(lines)), missing) {
                (Ok(()), None) => {}
                (Err(ParseError::MissingRequiredField { property }), Some(expected)) => {
                    assert_eq!(property, expected);
                }
                (got, _) => panic!("unexpected result {got:?} for {lines:?}"),
            }
        }
    }

    #[test]
    fn rejects_end_and_duration_together() {
        let e = event(&[
            "UID:a",
            "DTSTAMP:20190101T090000Z",
            "DTSTART:20190101T090000Z",
            "DTEND:20190101T100000Z",
            "DURATION:PT1H",
        ]);
        assert!(matches!(
            validate(&e),
            Err(ParseError::ConflictingTerminators)
        ));
    }
}
