// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Print the `X-` properties of every event in a feed.
//!
//! Run with `RUST_LOG=icsfeed=debug` to see what the parser skips.

use icsfeed::{ParseWindow, Parser, ParserConfig};
use tracing_subscriber::EnvFilter;

const FEED: &str = "\
BEGIN:VCALENDAR\r
BEGIN:VEVENT\r
DTSTAMP:20151116T133227Z\r
DTSTART;TZID=Europe/Paris:20190101T090000\r
DTEND;TZID=Europe/Paris:20190101T110000\r
UID:one@example.com\r
SUMMARY:Event with custom labels\r
X-ROOMID:128-132P\r
X-COLOR:#000000\r
END:VEVENT\r
\r
BEGIN:VEVENT\r
DTSTAMP:20151116T133227Z\r
DTSTART;TZID=Europe/Paris:20190201T090000\r
DTEND;TZID=Europe/Paris:20190201T110000\r
UID:two@example.com\r
SUMMARY:Second event with custom labels\r
X-ROOMID:802-127A\r
X-COLOR:#ffffff\r
END:VEVENT\r
END:VCALENDAR\r
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let window = ParseWindow::new(
        "2019-01-01T00:00:00Z".parse()?,
        "2019-12-31T23:59:59Z".parse()?,
    )?;
    let parser = Parser::new(ParserConfig::default().with_window(window));
    let calendar = parser.parse_str(FEED)?;

    for event in &calendar.events {
        let label = |name: &str| event.custom_attributes.get(name).map_or("-", String::as_str);
        println!(
            "{} on {} - {}",
            event.summary.as_deref().unwrap_or_default(),
            label("X-ROOMID"),
            label("X-COLOR"),
        );
    }
    Ok(())
}
