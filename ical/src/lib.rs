// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse iCalendar feeds into the events that fall within a time window.
//!
//! The parser reads a feed line by line, resolves every VEVENT into an
//! [`Event`], expands recurrence rules, and keeps the events and instances that
//! overlap the configured [`ParseWindow`].

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod config;
mod error;
pub mod keyword;
mod parser;
mod recurrence;
pub mod semantic;
pub mod syntax;
pub mod value;
mod window;

pub use crate::config::{DuplicateMode, ParserConfig, ParserOptions, StrictMode, TzidResolver};
pub use crate::error::{ConfigError, ParseError, ParseFailure, ValueError};
pub use crate::parser::{Calendar, Parser, parse};
pub use crate::recurrence::expand;
pub use crate::semantic::{
    AllDayEnd, Attachment, Attendee, Event, Organizer, RawDate, TimeRole, normalize_tzid,
    parse_instant, resolve_tzid,
};
pub use crate::syntax::{ContentLine, Parameters, split_content_line, unfold};
pub use crate::value::{
    Geo, RecurrenceFrequency, RecurrenceRule, WeekDay, escape_text, parse_duration, parse_geo,
    parse_rrule, unescape_text,
};
pub use crate::window::ParseWindow;
