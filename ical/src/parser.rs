// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Line-oriented driver that turns a feed into events.

use std::io::BufRead;

use jiff::Timestamp;
use tracing::{debug, trace, warn};

use crate::config::{ParserConfig, StrictMode};
use crate::error::{ParseError, ParseFailure};
use crate::keyword::{KW_BEGIN, KW_END, KW_METHOD, KW_VCALENDAR, KW_VEVENT};
use crate::recurrence::expand;
use crate::semantic::{BlockKind, ContextStack, Event, Resolver, TimeRole, reconcile, validate};
use crate::syntax::{ContentLine, split_content_line, unfold};
use crate::window::ParseWindow;

/// Result of a parse.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Calendar {
    /// METHOD of the calendar, empty when absent
    pub method: String,

    /// Events overlapping the window, followed by recurrence instances
    pub events: Vec<Event>,
}

/// iCalendar feed parser.
///
/// One parser can be reused for any number of feeds.
#[derive(Debug, Default, Clone)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a parser with the given configuration.
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a feed from a reader.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseFailure`] if reading fails, the block structure is
    /// broken, or an event fails under [`StrictMode::FailFeed`]. It carries the
    /// events committed so far.
    #[tracing::instrument(skip(self, reader))]
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Calendar, ParseFailure> {
        let mut state = ParserState::new(&self.config);

        for raw in unfold(reader) {
            let raw = match raw {
                Ok(raw) => raw,
                Err(err) => return Err(state.abort(err.into())),
            };
            if raw.content.trim().is_empty() {
                continue;
            }

            let line = match split_content_line(&raw.content) {
                Ok(line) => line,
                Err(reason) => {
                    let err = ParseError::MalformedLine {
                        line: raw.line,
                        content: raw.content,
                    };
                    debug!(%err, %reason, "skipping line");
                    continue;
                }
            };

            if let Err(err) = state.feed(line) {
                return Err(state.abort(err));
            }
        }

        Ok(state.finish())
    }

    /// Parse a feed held in memory.
    ///
    /// # Errors
    ///
    /// See [`Parser::parse`].
    pub fn parse_str(&self, src: &str) -> Result<Calendar, ParseFailure> {
        self.parse(src.as_bytes())
    }
}

/// Parse a feed with the default configuration.
///
/// ## Errors
///
/// See [`Parser::parse`].
///
/// ## Examples
///
/// ```
/// # use icsfeed::{Parser, ParserConfig, ParseWindow};
/// let src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// UID:1@example.com\r\n\
/// DTSTAMP:20240101T000000Z\r\n\
/// DTSTART:20240110T090000Z\r\n\
/// DTEND:20240110T100000Z\r\n\
/// SUMMARY:Test Event\r\n\
/// END:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// ";
/// let window = ParseWindow::new(
///     "2024-01-01T00:00:00Z".parse().unwrap(),
///     "2024-02-01T00:00:00Z".parse().unwrap(),
/// )
/// .unwrap();
/// let parser = Parser::new(ParserConfig::default().with_window(window));
/// let calendar = parser.parse_str(src).unwrap();
/// assert_eq!(calendar.events.len(), 1);
/// assert_eq!(calendar.events[0].summary.as_deref(), Some("Test Event"));
/// ```
pub fn parse(src: &str) -> Result<Calendar, ParseFailure> {
    Parser::default().parse_str(src)
}

struct ParserState<'a> {
    config: &'a ParserConfig,
    resolver: Resolver<'a>,
    window: ParseWindow,
    context: ContextStack,
    method: String,
    buffer: Option<Event>,
    events: Vec<Event>,
    instances: Vec<Event>,
    /// `(uid, start)` of every instance replaced by a RECURRENCE-ID event
    overrides: Vec<(String, Timestamp)>,
}

impl<'a> ParserState<'a> {
    fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            resolver: Resolver::new(config),
            window: config.window().unwrap_or_default(),
            context: ContextStack::new(),
            method: String::new(),
            buffer: None,
            events: Vec::new(),
            instances: Vec::new(),
            overrides: Vec::new(),
        }
    }

    fn feed(&mut self, line: ContentLine) -> Result<(), ParseError> {
        let is_begin = line.name_is(KW_BEGIN);
        let is_end = line.name_is(KW_END);
        let block = line.value.trim();

        if (is_begin || is_end) && block.eq_ignore_ascii_case(KW_VCALENDAR) {
            return Ok(());
        }

        if is_begin {
            let is_event = block.eq_ignore_ascii_case(KW_VEVENT);
            if self.context.push(is_event) == BlockKind::Event {
                self.buffer = Some(Event::default());
            }
            return Ok(());
        }

        if is_end {
            return match self.context.pop() {
                None => Err(ParseError::StructuralMismatch {
                    block: block.to_owned(),
                }),
                Some(BlockKind::Event) => self.close_event(),
                Some(_) => Ok(()),
            };
        }

        match self.context.current() {
            BlockKind::Root => {
                if line.name_is(KW_METHOD) {
                    self.method = line.value;
                }
                Ok(())
            }
            BlockKind::Event => {
                let Some(event) = self.buffer.as_mut() else {
                    return Ok(());
                };
                let result = self.resolver.resolve(event, &line);
                route(self.config.strict_mode(), event, result)
            }
            BlockKind::Unknown => Ok(()),
        }
    }

    fn close_event(&mut self) -> Result<(), ParseError> {
        let Some(mut event) = self.buffer.take() else {
            return Ok(());
        };
        let strict = self.config.strict_mode();

        for line in std::mem::take(&mut event.deferred) {
            let result = self.resolver.resolve(&mut event, &line);
            route(strict, &mut event, result)?;
        }
        let result = reconcile(&mut event, &self.resolver);
        route(strict, &mut event, result)?;
        let result = validate(&event);
        route(strict, &mut event, result)?;

        if !event.valid && strict == StrictMode::FailEvent {
            debug!(uid = ?event.uid, "dropping invalid event");
            return Ok(());
        }

        let (Some(start), Some(end)) = (&event.start, &event.end) else {
            debug!(uid = ?event.uid, "skipping event without start or end");
            return Ok(());
        };
        let (start, end) = (start.timestamp(), end.timestamp());

        self.record_override(&event);

        if event.is_recurring() {
            let instances = expand(&event, &self.window);
            trace!(uid = ?event.uid, instances = instances.len(), "expanded recurrence");
            self.instances.extend(instances);
        } else if self.config.skip_bounds() || self.window.overlaps(start, end) {
            self.events.push(event);
        } else {
            debug!(uid = ?event.uid, %start, %end, "event outside window");
        }

        Ok(())
    }

    /// Remember the instance a RECURRENCE-ID event replaces.
    fn record_override(&mut self, event: &Event) {
        let (Some(uid), Some(raw)) = (&event.uid, &event.recurrence_id) else {
            return;
        };

        let params = match &event.raw_start {
            Some(raw_start) if raw.params.is_empty() => &raw_start.params,
            _ => &raw.params,
        };
        match self.resolver.instant(&raw.value, params, TimeRole::Start) {
            Ok(at) => self.overrides.push((uid.clone(), at.timestamp())),
            Err(err) => debug!(uid, value = %raw.value, %err, "ignoring unreadable RECURRENCE-ID"),
        }
    }

    fn finish(mut self) -> Calendar {
        if let Some(event) = self.buffer.take() {
            warn!(uid = ?event.uid, "discarding unterminated VEVENT");
        }
        let calendar = self.into_calendar();
        debug!(method = %calendar.method, events = calendar.events.len(), "parsed feed");
        calendar
    }

    fn abort(self, error: ParseError) -> ParseFailure {
        ParseFailure {
            error,
            partial: self.into_calendar(),
        }
    }

    fn into_calendar(self) -> Calendar {
        let Self {
            method,
            mut events,
            mut instances,
            overrides,
            ..
        } = self;

        instances.retain(|instance| {
            let (Some(uid), Some(start)) = (&instance.uid, &instance.start) else {
                return true;
            };
            let at = start.timestamp();
            let replaced = overrides.iter().any(|(u, t)| u == uid && *t == at);
            if replaced {
                debug!(uid, start = %start, "instance replaced by RECURRENCE-ID");
            }
            !replaced
        });

        events.append(&mut instances);
        Calendar { method, events }
    }
}

/// Apply the strict mode to the outcome of one step on `event`.
fn route(
    strict: StrictMode,
    event: &mut Event,
    result: Result<(), ParseError>,
) -> Result<(), ParseError> {
    let Err(err) = result else {
        return Ok(());
    };
    if err.is_structural() || strict == StrictMode::FailFeed {
        return Err(err);
    }
    debug!(uid = ?event.uid, %err, "marking event invalid");
    event.valid = false;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(src: &str) -> ContentLine {
        split_content_line(src).unwrap()
    }

    #[test]
    fn routes_errors_by_strict_mode() {
        let err = || {
            Err(ParseError::MissingRequiredField {
                property: "DTSTAMP",
            })
        };

        let mut event = Event::default();
        assert!(route(StrictMode::FailFeed, &mut event, err()).is_err());

        for strict in [StrictMode::FailEvent, StrictMode::FailAttribute] {
            let mut event = Event::default();
            assert!(route(strict, &mut event, err()).is_ok());
            assert!(!event.valid);
        }

        let mut event = Event::default();
        assert!(route(StrictMode::FailAttribute, &mut event, Ok(())).is_ok());
        assert!(event.valid);
    }

    #[test]
    fn structural_errors_always_abort() {
        let mut event = Event::default();
        let err = Err(ParseError::StructuralMismatch {
            block: "VEVENT".to_owned(),
        });
        assert!(route(StrictMode::FailAttribute, &mut event, err).is_err());
        assert!(event.valid);
    }

    #[test]
    fn tracks_method_and_blocks() {
        let config = ParserConfig::default().with_strict_mode(StrictMode::FailEvent);
        let mut state = ParserState::new(&config);
        state.feed(line("BEGIN:VCALENDAR")).unwrap();
        state.feed(line("METHOD:PUBLISH")).unwrap();
        state.feed(line("BEGIN:VTIMEZONE")).unwrap();
        state.feed(line("METHOD:IGNORED")).unwrap();
        state.feed(line("END:VTIMEZONE")).unwrap();
        state.feed(line("BEGIN:VEVENT")).unwrap();
        assert!(state.buffer.is_some());
        state.feed(line("END:VEVENT")).unwrap();
        assert!(state.buffer.is_none());
        state.feed(line("END:VCALENDAR")).unwrap();

        let calendar = state.finish();
        assert_eq!(calendar.method, "PUBLISH");
    }

    #[test]
    fn rejects_unmatched_end() {
        let config = ParserConfig::default();
        let mut state = ParserState::new(&config);
        let err = state.feed(line("END:VEVENT")).unwrap_err();
        assert!(matches!(err, ParseError::StructuralMismatch { block } if block == "VEVENT"));
    }

    #[test]
    fn nested_event_is_not_an_event() {
        let config = ParserConfig::default();
        let mut state = ParserState::new(&config);
        state.feed(line("BEGIN:VTODO")).unwrap();
        state.feed(line("BEGIN:VEVENT")).unwrap();
        assert!(state.buffer.is_none());
        state.feed(line("UID:ignored")).unwrap();
        state.feed(line("END:VEVENT")).unwrap();
        state.feed(line("END:VTODO")).unwrap();
        assert!(state.finish().events.is_empty());
    }
}
