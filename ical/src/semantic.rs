// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Semantic layer: content lines to events.
//!
//! Lines inside a VEVENT are assigned to event fields by the resolver, date
//! and date-time values are placed in time zones, and the finished event is
//! reconciled and validated when its block closes.

mod context;
mod event;
mod finalize;
mod instant;
mod resolver;

pub use crate::semantic::event::{Attachment, Attendee, Event, Organizer, RawDate};
pub use crate::semantic::instant::{
    AllDayEnd, TimeRole, is_date_only, normalize_tzid, parse_instant, resolve_tzid,
};

pub(crate) use crate::semantic::context::{BlockKind, ContextStack};
pub(crate) use crate::semantic::finalize::{reconcile, validate};
pub(crate) use crate::semantic::resolver::Resolver;
