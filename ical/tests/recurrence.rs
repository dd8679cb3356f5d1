// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for recurring events
//!
//! These tests check recurrence expansion, exception dates and overridden
//! instances as seen through the parser.

use icsfeed::{Calendar, ParseWindow, Parser, ParserConfig};
use jiff::Timestamp;
use jiff::tz::TimeZone;

fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

fn parse_within(src: &str, window: ParseWindow) -> Calendar {
    let config = ParserConfig::default().with_window(window);
    Parser::new(config).parse_str(src).unwrap()
}

fn utc_window(start: &str, end: &str) -> ParseWindow {
    ParseWindow::new(ts(start), ts(end)).unwrap()
}

fn starts_of(calendar: &Calendar, uid: &str) -> Vec<Timestamp> {
    calendar
        .events
        .iter()
        .filter(|e| e.uid.as_deref() == Some(uid))
        .map(|e| e.start.as_ref().unwrap().timestamp())
        .collect()
}

const RECURRING_ICS: &str = "\
BEGIN:VCALENDAR\r
PRODID:-//Example//Feed//EN\r
VERSION:2.0\r
BEGIN:VEVENT\r
DTSTART:20180102\r
DTEND:20180103\r
DTSTAMP:20151116T133227Z\r
UID:0001@google.com\r
SUMMARY:Every month on the second\r
RRULE:FREQ=MONTHLY;BYMONTHDAY=2\r
END:VEVENT\r
BEGIN:VEVENT\r
DTSTART:20180101T090000Z\r
DTEND:20180101T110000Z\r
DTSTAMP:20151116T133227Z\r
UID:0002@google.com\r
SUMMARY:Every two weeks on mondays and tuesdays forever\r
RRULE:FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,TU\r
EXDATE;VALUE=DATE-TIME:20180129T090000Z\r
END:VEVENT\r
BEGIN:VEVENT\r
DTSTART:20180101T090000Z\r
DTEND:20180101T110000Z\r
DTSTAMP:20151116T133227Z\r
UID:0003@google.com\r
SUMMARY:Every two weeks on mondays and tuesdays for three events\r
RRULE:FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,TU;COUNT=3\r
EXDATE;VALUE=DATE-TIME:20180129T090000Z\r
END:VEVENT\r
BEGIN:VEVENT\r
DTSTART:20180101T110000Z\r
DTEND:20180101T130000Z\r
DTSTAMP:20151116T133227Z\r
UID:004@google.com\r
RECURRENCE-ID:20180101T090000Z\r
SUMMARY:This changed!\r
END:VEVENT\r
END:VCALENDAR\r
";

#[test]
fn expands_recurring_events() {
    let calendar = parse_within(
        RECURRING_ICS,
        utc_window("2018-01-01T00:00:00Z", "2018-02-05T23:59:59Z"),
    );
    assert_eq!(calendar.events.len(), 11);

    let summaries: Vec<_> = calendar
        .events
        .iter()
        .map(|e| e.summary.as_deref().unwrap())
        .collect();
    assert_eq!(summaries[0], "This changed!");
    assert_eq!(summaries[2], "Every month on the second");
    assert_eq!(
        summaries[4],
        "Every two weeks on mondays and tuesdays forever"
    );

    assert_eq!(
        starts_of(&calendar, "0001@google.com"),
        [ts("2018-01-02T00:00:00Z"), ts("2018-02-02T00:00:00Z")]
    );
    assert_eq!(
        starts_of(&calendar, "0002@google.com"),
        [
            ts("2018-01-01T09:00:00Z"),
            ts("2018-01-02T09:00:00Z"),
            ts("2018-01-15T09:00:00Z"),
            ts("2018-01-16T09:00:00Z"),
            ts("2018-01-30T09:00:00Z"),
        ]
    );
    assert_eq!(starts_of(&calendar, "0003@google.com").len(), 3);
}

#[test]
fn instances_carry_their_position() {
    let calendar = parse_within(
        RECURRING_ICS,
        utc_window("2018-01-01T00:00:00Z", "2018-02-05T23:59:59Z"),
    );
    let sequences: Vec<_> = calendar
        .events
        .iter()
        .filter(|e| e.uid.as_deref() == Some("0002@google.com"))
        .map(|e| e.sequence)
        .collect();
    assert_eq!(sequences, [1, 2, 3, 4, 5]);
    assert!(calendar.events.iter().skip(1).all(|e| e.is_recurring()));
}

const OVERRIDE_ICS: &str = "\
BEGIN:VCALENDAR\r
BEGIN:VEVENT\r
UID:standup@example.com\r
DTSTAMP:20151116T133227Z\r
DTSTART;TZID=Europe/Paris:20190107T090000\r
DTEND;TZID=Europe/Paris:20190107T091500\r
RRULE:FREQ=DAILY;COUNT=5\r
SUMMARY:Standup\r
END:VEVENT\r
BEGIN:VEVENT\r
UID:standup@example.com\r
DTSTAMP:20151116T133227Z\r
RECURRENCE-ID;TZID=Europe/Paris:20190109T090000\r
DTSTART;TZID=Europe/Paris:20190109T100000\r
DTEND;TZID=Europe/Paris:20190109T101500\r
SUMMARY:Standup (moved)\r
END:VEVENT\r
END:VCALENDAR\r
";

#[test]
fn overridden_instances_are_replaced() {
    let calendar = parse_within(
        OVERRIDE_ICS,
        utc_window("2019-01-01T00:00:00Z", "2019-02-01T00:00:00Z"),
    );
    assert_eq!(calendar.events.len(), 5);

    let moved = &calendar.events[0];
    assert_eq!(moved.summary.as_deref(), Some("Standup (moved)"));
    assert_eq!(
        moved.start.as_ref().unwrap().timestamp(),
        ts("2019-01-09T09:00:00Z")
    );

    assert_eq!(
        starts_of(&calendar, "standup@example.com"),
        [
            ts("2019-01-09T09:00:00Z"),
            ts("2019-01-07T08:00:00Z"),
            ts("2019-01-08T08:00:00Z"),
            ts("2019-01-10T08:00:00Z"),
            ts("2019-01-11T08:00:00Z"),
        ]
    );
}

#[test]
fn override_outside_window_still_replaces() {
    let src = OVERRIDE_ICS
        .replace("20190109T100000", "20190301T100000")
        .replace("20190109T101500", "20190301T101500");
    let calendar = parse_within(
        &src,
        utc_window("2019-01-01T00:00:00Z", "2019-02-01T00:00:00Z"),
    );
    assert_eq!(calendar.events.len(), 4);
    assert!(
        calendar
            .events
            .iter()
            .all(|e| e.summary.as_deref() == Some("Standup"))
    );
}

const EXDATE_ICS: &str = "\
BEGIN:VCALENDAR\r
BEGIN:VEVENT\r
UID:plop\r
SUMMARY:Lorem ipsum dolor sit amet\r
DTSTAMP:20151116T133227Z\r
DTSTART:20190101T130000Z\r
DTEND:20190101T140000Z\r
RRULE:FREQ=MONTHLY;COUNT=5\r
EXDATE:20190201T130000Z\r
END:VEVENT\r
END:VCALENDAR\r
";

#[test]
fn honours_exception_dates() {
    let calendar = parse_within(
        EXDATE_ICS,
        utc_window("2019-01-01T00:00:00Z", "2019-12-31T23:59:59Z"),
    );
    assert_eq!(calendar.events.len(), 4);
    assert!(!starts_of(&calendar, "plop").contains(&ts("2019-02-01T13:00:00Z")));
}

const MULTIPLE_EXDATE_ICS: &str = "\
BEGIN:VCALENDAR\r
PRODID:-//Example//Family Calendar//EN\r
VERSION:2.0\r
CALSCALE:GREGORIAN\r
METHOD:PUBLISH\r
X-WR-TIMEZONE:America/New_York\r
BEGIN:VTIMEZONE\r
TZID:America/New_York\r
X-LIC-LOCATION:America/New_York\r
BEGIN:DAYLIGHT\r
TZOFFSETFROM:-0500\r
TZOFFSETTO:-0400\r
TZNAME:EDT\r
DTSTART:19700308T020000\r
RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=2SU\r
END:DAYLIGHT\r
BEGIN:STANDARD\r
TZOFFSETFROM:-0400\r
TZOFFSETTO:-0500\r
TZNAME:EST\r
DTSTART:19701101T020000\r
RRULE:FREQ=YEARLY;BYMONTH=11;BYDAY=1SU\r
END:STANDARD\r
END:VTIMEZONE\r
BEGIN:VEVENT\r
DTSTART;TZID=America/New_York:20201220T173000\r
DTEND;TZID=America/New_York:20201220T183000\r
EXDATE;TZID=America/New_York:20210425T173000\r
EXDATE;TZID=America/New_York:20211024T173000\r
EXDATE;TZID=America/New_York:20211031T173000\r
EXDATE;TZID=America/New_York:20211121T173000\r
EXDATE;TZID=America/New_York:20211128T173000\r
EXDATE;TZID=America/New_York:20220220T173000\r
RRULE:FREQ=WEEKLY\r
DTSTAMP:20220220T161319Z\r
UID:05F28281-077F-4059-971E-40E43F8AB3B5\r
URL:https://example.com/j/9288411040?pwd=ZVZFWVNGUWc4UHVzaHRKK010dGwrdz\r
\t09\r
CREATED:20201220T170112Z\r
DESCRIPTION:\r
LAST-MODIFIED:20220205T221812Z\r
LOCATION:\r
SEQUENCE:0\r
STATUS:CONFIRMED\r
SUMMARY:Family conference call\r
TRANSP:OPAQUE\r
BEGIN:VALARM\r
ACTION:NONE\r
TRIGGER;VALUE=DATE-TIME:19760401T005545Z\r
END:VALARM\r
END:VEVENT\r
BEGIN:VEVENT\r
DTSTART;VALUE=DATE:20220218\r
DTEND;VALUE=DATE:20220222\r
DTSTAMP:20220220T161319Z\r
UID:6952A06D-6C4A-46D2-83DC-427A0FC5F53B\r
CREATED:20211021T173647Z\r
DESCRIPTION:\r
LAST-MODIFIED:20211021T173647Z\r
LOCATION:\r
SEQUENCE:0\r
STATUS:CONFIRMED\r
SUMMARY:Dress Shopping\r
TRANSP:OPAQUE\r
END:VEVENT\r
END:VCALENDAR\r
";

fn new_york_day(day: &str) -> ParseWindow {
    let tz = TimeZone::get("America/New_York").unwrap();
    let start: jiff::civil::DateTime = format!("{day}T00:00:00").parse().unwrap();
    let end: jiff::civil::DateTime = format!("{day}T23:59:59").parse().unwrap();
    ParseWindow::new(
        start.to_zoned(tz.clone()).unwrap().timestamp(),
        end.to_zoned(tz).unwrap().timestamp(),
    )
    .unwrap()
}

#[test]
fn honours_zoned_exception_dates() {
    let calendar = parse_within(MULTIPLE_EXDATE_ICS, new_york_day("2022-02-20"));
    assert_eq!(calendar.method, "PUBLISH");
    assert_eq!(calendar.events.len(), 1);
    assert_eq!(calendar.events[0].summary.as_deref(), Some("Dress Shopping"));
}

#[test]
fn keeps_wall_clock_across_daylight_saving() {
    let calendar = parse_within(MULTIPLE_EXDATE_ICS, new_york_day("2022-03-13"));
    assert_eq!(calendar.events.len(), 1);

    let call = &calendar.events[0];
    assert_eq!(call.summary.as_deref(), Some("Family conference call"));
    assert_eq!(
        call.url.as_deref(),
        Some("https://example.com/j/9288411040?pwd=ZVZFWVNGUWc4UHVzaHRKK010dGwrdz09")
    );
    let start = call.start.as_ref().unwrap();
    assert_eq!(start.hour(), 17);
    assert_eq!(start.minute(), 30);
    assert_eq!(start.timestamp(), ts("2022-03-13T21:30:00Z"));
}

const BOUNDED_ICS: &str = "\
BEGIN:VCALENDAR\r
BEGIN:VEVENT\r
UID:until@example.com\r
DTSTAMP:20151116T133227Z\r
DTSTART:20190101T090000Z\r
DTEND:20190101T100000Z\r
RRULE:FREQ=DAILY;UNTIL=20190105T090000Z\r
END:VEVENT\r
BEGIN:VEVENT\r
UID:quarterly@example.com\r
DTSTAMP:20151116T133227Z\r
DTSTART:20190115T090000Z\r
DTEND:20190115T100000Z\r
RRULE:FREQ=MONTHLY;BYMONTH=1,4,7,10\r
END:VEVENT\r
END:VCALENDAR\r
";

#[test]
fn honours_until_and_by_month() {
    let calendar = parse_within(
        BOUNDED_ICS,
        utc_window("2019-01-01T00:00:00Z", "2019-12-31T00:00:00Z"),
    );
    assert_eq!(starts_of(&calendar, "until@example.com").len(), 5);
    assert_eq!(
        starts_of(&calendar, "quarterly@example.com"),
        [
            ts("2019-01-15T09:00:00Z"),
            ts("2019-04-15T09:00:00Z"),
            ts("2019-07-15T09:00:00Z"),
            ts("2019-10-15T09:00:00Z"),
        ]
    );
}

#[test]
fn skip_bounds_does_not_lift_the_window_from_recurrences() {
    let config = ParserConfig::default()
        .with_window(utc_window("2019-01-01T00:00:00Z", "2019-01-03T00:00:00Z"))
        .with_skip_bounds(true);
    let calendar = Parser::new(config).parse_str(BOUNDED_ICS).unwrap();
    assert_eq!(starts_of(&calendar, "until@example.com").len(), 2);
    assert!(starts_of(&calendar, "quarterly@example.com").is_empty());
}
