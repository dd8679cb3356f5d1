// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords defined in iCalendar RFC 5545.

pub const KW_BEGIN: &str = "BEGIN";
pub const KW_END: &str = "END";

pub const KW_VCALENDAR: &str = "VCALENDAR";
pub const KW_VEVENT: &str = "VEVENT";

// Section 3.2 - Property Parameters
pub const KW_CN: &str = "CN";
pub const KW_DIR: &str = "DIR";
pub const KW_ENCODING: &str = "ENCODING";
pub const KW_FILENAME: &str = "FILENAME";
pub const KW_FMTTYPE: &str = "FMTTYPE";
pub const KW_PARTSTAT: &str = "PARTSTAT";
pub const KW_ROLE: &str = "ROLE";
pub const KW_TZID: &str = "TZID";
pub const KW_VALUE: &str = "VALUE";
pub const KW_VALUE_DATE: &str = "DATE";

// Section 3.7 - Calendar Properties
pub const KW_METHOD: &str = "METHOD";

// Section 3.8 - Component Properties
pub const KW_ATTACH: &str = "ATTACH";
pub const KW_ATTENDEE: &str = "ATTENDEE";
pub const KW_CATEGORIES: &str = "CATEGORIES";
pub const KW_CLASS: &str = "CLASS";
pub const KW_COMMENT: &str = "COMMENT";
pub const KW_CREATED: &str = "CREATED";
pub const KW_DESCRIPTION: &str = "DESCRIPTION";
pub const KW_DTEND: &str = "DTEND";
pub const KW_DTSTAMP: &str = "DTSTAMP";
pub const KW_DTSTART: &str = "DTSTART";
pub const KW_DURATION: &str = "DURATION";
pub const KW_EXDATE: &str = "EXDATE";
pub const KW_GEO: &str = "GEO";
pub const KW_LAST_MODIFIED: &str = "LAST-MODIFIED";
pub const KW_LOCATION: &str = "LOCATION";
pub const KW_ORGANIZER: &str = "ORGANIZER";
pub const KW_RECURRENCE_ID: &str = "RECURRENCE-ID";
pub const KW_RRULE: &str = "RRULE";
pub const KW_SEQUENCE: &str = "SEQUENCE";
pub const KW_STATUS: &str = "STATUS";
pub const KW_SUMMARY: &str = "SUMMARY";
pub const KW_UID: &str = "UID";
pub const KW_URL: &str = "URL";

// Section 3.3.10 - Recurrence Rule
pub const KW_RRULE_FREQ: &str = "FREQ";
pub const KW_RRULE_UNTIL: &str = "UNTIL";
pub const KW_RRULE_COUNT: &str = "COUNT";
pub const KW_RRULE_INTERVAL: &str = "INTERVAL";
pub const KW_RRULE_BYDAY: &str = "BYDAY";
pub const KW_RRULE_BYMONTH: &str = "BYMONTH";
pub const KW_DAY_SU: &str = "SU";
pub const KW_DAY_MO: &str = "MO";
pub const KW_DAY_TU: &str = "TU";
pub const KW_DAY_WE: &str = "WE";
pub const KW_DAY_TH: &str = "TH";
pub const KW_DAY_FR: &str = "FR";
pub const KW_DAY_SA: &str = "SA";

// Section 3.8.8.2 - Non-Standard Properties
pub const KW_X_PREFIX: &str = "X-";
