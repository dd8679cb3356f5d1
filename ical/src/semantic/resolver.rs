// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Assignment of content lines to event fields.

use jiff::Zoned;
use tracing::{debug, trace};

use crate::config::{DuplicateMode, ParserConfig};
use crate::error::{ParseError, ValueError};
use crate::keyword::{
    KW_ATTACH, KW_ATTENDEE, KW_CATEGORIES, KW_CLASS, KW_CN, KW_COMMENT, KW_CREATED,
    KW_DESCRIPTION, KW_DIR, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DURATION, KW_ENCODING,
    KW_EXDATE, KW_FILENAME, KW_FMTTYPE, KW_GEO, KW_LAST_MODIFIED, KW_LOCATION, KW_ORGANIZER,
    KW_PARTSTAT, KW_RECURRENCE_ID, KW_ROLE, KW_RRULE, KW_SEQUENCE, KW_STATUS, KW_SUMMARY, KW_UID,
    KW_URL, KW_VALUE, KW_X_PREFIX,
};
use crate::semantic::event::{Attachment, Attendee, Event, Organizer, RawDate};
use crate::semantic::instant::{AllDayEnd, TimeRole, parse_instant};
use crate::syntax::{ContentLine, Parameters};
use crate::value::{parse_duration, parse_geo, parse_rrule};

/// Runs after a value has been stored.
type PostHook = fn(&mut Event, &ContentLine) -> Result<(), ValueError>;

/// Resolves content lines into the fields of an event.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Resolver<'a> {
    config: &'a ParserConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a ParserConfig) -> Self {
        Self { config }
    }

    /// Resolve a date or date-time with the configured zones.
    pub fn instant(
        &self,
        raw: &str,
        params: &Parameters,
        role: TimeRole,
    ) -> Result<Zoned, ValueError> {
        parse_instant(
            raw,
            params,
            role,
            self.config.all_day_timezone(),
            self.config.tzid_resolver(),
        )
    }

    /// Assign one line to `event`.
    ///
    /// Safe to call again for a line that was deferred.
    pub fn resolve(&self, event: &mut Event, line: &ContentLine) -> Result<(), ParseError> {
        let name = line.name.to_ascii_uppercase();
        match name.as_str() {
            KW_UID => self.resolve_field(event, line, |e| &mut e.uid, text, None),
            KW_SUMMARY => self.resolve_field(event, line, |e| &mut e.summary, text, None),
            KW_DESCRIPTION => self.resolve_field(event, line, |e| &mut e.description, text, None),
            KW_LOCATION => self.resolve_field(event, line, |e| &mut e.location, text, None),
            KW_STATUS => self.resolve_field(event, line, |e| &mut e.status, text, None),
            KW_URL => self.resolve_field(event, line, |e| &mut e.url, text, None),
            KW_COMMENT => self.resolve_field(event, line, |e| &mut e.comment, text, None),
            KW_CLASS => self.resolve_field(event, line, |e| &mut e.class, text, None),

            KW_DTSTART => self.resolve_field(
                event,
                line,
                |e| &mut e.start,
                |l| self.instant(&l.value, &l.parameters, TimeRole::Start),
                Some(record_raw_start),
            ),
            KW_DTEND => {
                // an end derived from DURATION is not a duplicate DTEND
                if event.duration.is_some() && event.raw_end.is_none() {
                    return Err(ParseError::ConflictingTerminators);
                }
                self.resolve_field(
                    event,
                    line,
                    |e| &mut e.end,
                    |l| self.instant(&l.value, &l.parameters, TimeRole::End(AllDayEnd::Exclusive)),
                    Some(record_raw_end),
                )
            }
            KW_DTSTAMP => self.resolve_field(event, line, |e| &mut e.stamp, self.start(), None),
            KW_CREATED => self.resolve_field(event, line, |e| &mut e.created, self.start(), None),
            KW_LAST_MODIFIED => {
                self.resolve_field(event, line, |e| &mut e.last_modified, self.start(), None)
            }

            KW_DURATION => {
                if event.start.is_none() {
                    trace!(value = %line.value, "deferring DURATION until DTSTART is known");
                    event.deferred.push(line.clone());
                    return Ok(());
                }
                self.resolve_field(
                    event,
                    line,
                    |e| &mut e.duration,
                    |l| parse_duration(l.value.trim()),
                    Some(apply_duration),
                )
            }

            KW_GEO => {
                self.resolve_field(event, line, |e| &mut e.geo, |l| parse_geo(&l.value), None)
            }
            KW_ORGANIZER => self.resolve_field(
                event,
                line,
                |e| &mut e.organizer,
                |l| Ok(organizer(l)),
                None,
            ),
            KW_RECURRENCE_ID => self.resolve_field(
                event,
                line,
                |e| &mut e.recurrence_id,
                |l| Ok(RawDate::from(l)),
                None,
            ),

            KW_RRULE => {
                if event.recurrence_rule.is_some() {
                    return Err(duplicate(line));
                }
                let rule = parse_rrule(&line.value).map_err(|reason| field_error(line, reason))?;
                event.recurrence_rule = Some(rule);
                Ok(())
            }
            KW_EXDATE => {
                for raw in line.value.split(',') {
                    match self.instant(raw, &line.parameters, TimeRole::Start) {
                        Ok(date) => event.exclude_dates.push(date),
                        Err(err) => debug!(value = raw, %err, "ignoring unreadable EXDATE"),
                    }
                }
                Ok(())
            }
            KW_SEQUENCE => {
                match lexical::parse::<i32, _>(line.value.trim()) {
                    Ok(sequence) => event.sequence = sequence,
                    Err(err) => debug!(value = %line.value, %err, "ignoring unreadable SEQUENCE"),
                }
                Ok(())
            }
            KW_CATEGORIES => {
                let categories = line.value.split(',').filter(|c| !c.is_empty());
                event.categories.extend(categories.map(str::to_owned));
                Ok(())
            }
            KW_ATTENDEE => {
                event.attendees.push(attendee(line));
                Ok(())
            }
            KW_ATTACH => {
                event.attachments.push(attachment(line));
                Ok(())
            }

            _ if name.starts_with(KW_X_PREFIX) => {
                event.custom_attributes.insert(name.clone(), line.value.clone());
                Ok(())
            }
            _ => {
                trace!(property = %line.name, "dropping unknown property");
                Ok(())
            }
        }
    }

    fn start(&self) -> impl FnOnce(&ContentLine) -> Result<Zoned, ValueError> + '_ {
        move |l| self.instant(&l.value, &l.parameters, TimeRole::Start)
    }

    /// Store a single-valued field under the duplicate policy.
    ///
    /// The value is decoded before the duplicate check, so a malformed repeat
    /// is reported as such even when it would have been ignored.
    fn resolve_field<T, F, P>(
        &self,
        event: &mut Event,
        line: &ContentLine,
        field: F,
        parse: P,
        post: Option<PostHook>,
    ) -> Result<(), ParseError>
    where
        F: FnOnce(&mut Event) -> &mut Option<T>,
        P: FnOnce(&ContentLine) -> Result<T, ValueError>,
    {
        let value = parse(line).map_err(|reason| field_error(line, reason))?;

        let slot = field(event);
        if slot.is_some() {
            match self.config.duplicate_mode() {
                DuplicateMode::FailStrict => return Err(duplicate(line)),
                DuplicateMode::KeepFirst => {
                    trace!(property = %line.name, "ignoring duplicate property");
                    return Ok(());
                }
                DuplicateMode::KeepLast => {}
            }
        }
        *slot = Some(value);

        if let Some(post) = post {
            post(event, line).map_err(|reason| field_error(line, reason))?;
        }
        Ok(())
    }
}

#[expect(clippy::unnecessary_wraps)]
fn text(line: &ContentLine) -> Result<String, ValueError> {
    Ok(line.value.clone())
}

#[expect(clippy::unnecessary_wraps)]
fn record_raw_start(event: &mut Event, line: &ContentLine) -> Result<(), ValueError> {
    event.raw_start = Some(RawDate::from(line));
    Ok(())
}

#[expect(clippy::unnecessary_wraps)]
fn record_raw_end(event: &mut Event, line: &ContentLine) -> Result<(), ValueError> {
    event.raw_end = Some(RawDate::from(line));
    Ok(())
}

fn apply_duration(event: &mut Event, _: &ContentLine) -> Result<(), ValueError> {
    if let (Some(start), Some(duration)) = (&event.start, event.duration) {
        event.end = Some(start.checked_add(duration)?);
    }
    Ok(())
}

fn organizer(line: &ContentLine) -> Organizer {
    let params = &line.parameters;
    Organizer {
        cn: params.unquoted(KW_CN).map(str::to_owned),
        directory: params.unquoted(KW_DIR).map(str::to_owned),
        value: line.value.clone(),
    }
}

fn attendee(line: &ContentLine) -> Attendee {
    let params = &line.parameters;
    let custom_attributes = params
        .iter()
        .filter_map(|(name, value)| {
            let name = name.to_ascii_uppercase();
            name.starts_with(KW_X_PREFIX)
                .then(|| (name, value.to_owned()))
        })
        .collect();

    Attendee {
        cn: params.unquoted(KW_CN).map(str::to_owned),
        directory: params.unquoted(KW_DIR).map(str::to_owned),
        status: params.unquoted(KW_PARTSTAT).map(str::to_owned),
        role: params.unquoted(KW_ROLE).map(str::to_owned),
        value: line.value.clone(),
        custom_attributes,
    }
}

fn attachment(line: &ContentLine) -> Attachment {
    let params = &line.parameters;
    Attachment {
        kind: params.unquoted(KW_VALUE).map(str::to_owned),
        encoding: params.unquoted(KW_ENCODING).map(str::to_owned),
        mime: params.unquoted(KW_FMTTYPE).map(str::to_owned),
        filename: params.unquoted(KW_FILENAME).map(str::to_owned),
        value: line.value.clone(),
    }
}

fn duplicate(line: &ContentLine) -> ParseError {
    ParseError::DuplicateAttribute {
        property: line.name.to_ascii_uppercase(),
        value: line.value.clone(),
    }
}

fn field_error(line: &ContentLine, reason: ValueError) -> ParseError {
    ParseError::FieldParse {
        property: line.name.to_ascii_uppercase(),
        value: line.value.clone(),
        reason,
    }
}
