// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Event component (VEVENT) and the small records attached to it.

use std::collections::BTreeMap;

use jiff::{SignedDuration, Zoned};

use crate::syntax::{ContentLine, Parameters};
use crate::value::{Geo, RecurrenceRule};

/// Event component (VEVENT)
///
/// Recurrence instances share the uid of their series and differ in
/// `start`, `end` and `sequence`.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Unique identifier for the event
    pub uid: Option<String>,

    /// Summary/title of the event
    pub summary: Option<String>,

    /// Description of the event
    pub description: Option<String>,

    /// Categories, accumulated over every CATEGORIES line
    pub categories: Vec<String>,

    /// Date/time the event starts
    pub start: Option<Zoned>,

    /// Date/time the event ends, computed from DURATION when absent
    pub end: Option<Zoned>,

    /// DTSTART as written
    pub raw_start: Option<RawDate>,

    /// DTEND as written
    pub raw_end: Option<RawDate>,

    /// Duration of the event (alternative to DTEND)
    pub duration: Option<SignedDuration>,

    /// Date/time the event was stamped
    pub stamp: Option<Zoned>,

    /// Date/time the event was created
    pub created: Option<Zoned>,

    /// Last modification date/time
    pub last_modified: Option<Zoned>,

    /// Location of the event
    pub location: Option<String>,

    /// Geographic position
    pub geo: Option<Geo>,

    /// Organizer of the event
    pub organizer: Option<Organizer>,

    /// Attendees of the event
    pub attendees: Vec<Attendee>,

    /// Attachments of the event
    pub attachments: Vec<Attachment>,

    /// Recurrence rule
    pub recurrence_rule: Option<RecurrenceRule>,

    /// RECURRENCE-ID as written, set on events overriding one instance
    pub recurrence_id: Option<RawDate>,

    /// Exception dates
    pub exclude_dates: Vec<Zoned>,

    /// Sequence number; for recurrence instances, the position in the series
    pub sequence: i32,

    /// Status of the event
    pub status: Option<String>,

    /// URL associated with the event
    pub url: Option<String>,

    /// Comment
    pub comment: Option<String>,

    /// Classification
    pub class: Option<String>,

    /// `X-` properties, keyed by uppercased name
    pub custom_attributes: BTreeMap<String, String>,

    /// Whether the event parsed cleanly
    pub valid: bool,

    pub(crate) deferred: Vec<ContentLine>,
}

impl Event {
    /// Whether the event carries a recurrence rule.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.recurrence_rule.is_some()
    }
}

impl Default for Event {
    fn default() -> Self {
        Self {
            uid: None,
            summary: None,
            description: None,
            categories: Vec::new(),
            start: None,
            end: None,
            raw_start: None,
            raw_end: None,
            duration: None,
            stamp: None,
            created: None,
            last_modified: None,
            location: None,
            geo: None,
            organizer: None,
            attendees: Vec::new(),
            attachments: Vec::new(),
            recurrence_rule: None,
            recurrence_id: None,
            exclude_dates: Vec::new(),
            sequence: 0,
            status: None,
            url: None,
            comment: None,
            class: None,
            custom_attributes: BTreeMap::new(),
            valid: true,
            deferred: Vec::new(),
        }
    }
}

/// A date property value kept as written, for later reinterpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDate {
    /// Raw value
    pub value: String,
    /// Parameters of the line
    pub params: Parameters,
}

impl From<&ContentLine> for RawDate {
    fn from(line: &ContentLine) -> Self {
        Self {
            value: line.value.clone(),
            params: line.parameters.clone(),
        }
    }
}

/// Organizer of an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organizer {
    /// Common name (CN)
    pub cn: Option<String>,
    /// Directory entry reference (DIR)
    pub directory: Option<String>,
    /// Calendar user address
    pub value: String,
}

/// Attendee of an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    /// Common name (CN)
    pub cn: Option<String>,
    /// Directory entry reference (DIR)
    pub directory: Option<String>,
    /// Participation status (PARTSTAT)
    pub status: Option<String>,
    /// Participation role (ROLE)
    pub role: Option<String>,
    /// Calendar user address
    pub value: String,
    /// `X-` parameters, keyed by uppercased name, values as written
    pub custom_attributes: BTreeMap<String, String>,
}

/// Attachment of an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Value type (VALUE), e.g. BINARY
    pub kind: Option<String>,
    /// Inline encoding (ENCODING)
    pub encoding: Option<String>,
    /// Format type (FMTTYPE)
    pub mime: Option<String>,
    /// File name (FILENAME)
    pub filename: Option<String>,
    /// URI or inline data
    pub value: String,
}
