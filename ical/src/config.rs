// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parser configuration.

use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::window::ParseWindow;

/// Maps a TZID parameter value to a time zone.
///
/// Returning `None` falls through to the built-in IANA lookup.
pub type TzidResolver = Arc<dyn Fn(&str) -> Option<TimeZone> + Send + Sync>;

/// How a failing event or property affects the whole parse.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StrictMode {
    /// Abort the parse and report the error
    #[default]
    FailFeed,
    /// Drop the failing event and keep going
    FailEvent,
    /// Keep the failing event, flagged invalid
    FailAttribute,
}

/// What to do when a single-valued property repeats within one event.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DuplicateMode {
    /// Raise an error, routed through the strict mode
    #[default]
    FailStrict,
    /// Ignore later occurrences
    KeepFirst,
    /// Overwrite with each later occurrence
    KeepLast,
}

/// Settings for one [`Parser`](crate::Parser).
#[derive(Clone)]
pub struct ParserConfig {
    window: Option<ParseWindow>,
    skip_bounds: bool,
    strict_mode: StrictMode,
    duplicate_mode: DuplicateMode,
    all_day_timezone: TimeZone,
    tzid_resolver: Option<TzidResolver>,
}

impl ParserConfig {
    /// Set the window events must overlap.
    #[must_use]
    pub fn with_window(mut self, window: ParseWindow) -> Self {
        self.window = Some(window);
        self
    }

    /// Report every event regardless of the window.
    #[must_use]
    pub fn with_skip_bounds(mut self, skip_bounds: bool) -> Self {
        self.skip_bounds = skip_bounds;
        self
    }

    /// Set the strict mode.
    #[must_use]
    pub fn with_strict_mode(mut self, mode: StrictMode) -> Self {
        self.strict_mode = mode;
        self
    }

    /// Set the duplicate mode.
    #[must_use]
    pub fn with_duplicate_mode(mut self, mode: DuplicateMode) -> Self {
        self.duplicate_mode = mode;
        self
    }

    /// Set the zone date-only values are placed in.
    #[must_use]
    pub fn with_all_day_timezone(mut self, tz: TimeZone) -> Self {
        self.all_day_timezone = tz;
        self
    }

    /// Install a TZID resolver, consulted before the IANA database.
    #[must_use]
    pub fn with_tzid_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&str) -> Option<TimeZone> + Send + Sync + 'static,
    {
        self.tzid_resolver = Some(Arc::new(resolver));
        self
    }

    /// The configured window, if any.
    #[must_use]
    pub const fn window(&self) -> Option<ParseWindow> {
        self.window
    }

    /// Whether window filtering is disabled.
    #[must_use]
    pub const fn skip_bounds(&self) -> bool {
        self.skip_bounds
    }

    /// Strict mode.
    #[must_use]
    pub const fn strict_mode(&self) -> StrictMode {
        self.strict_mode
    }

    /// Duplicate mode.
    #[must_use]
    pub const fn duplicate_mode(&self) -> DuplicateMode {
        self.duplicate_mode
    }

    /// Zone for date-only values.
    #[must_use]
    pub const fn all_day_timezone(&self) -> &TimeZone {
        &self.all_day_timezone
    }

    /// TZID resolver, if installed.
    #[must_use]
    pub fn tzid_resolver(&self) -> Option<&TzidResolver> {
        self.tzid_resolver.as_ref()
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            window: None,
            skip_bounds: false,
            strict_mode: StrictMode::default(),
            duplicate_mode: DuplicateMode::default(),
            all_day_timezone: TimeZone::UTC,
            tzid_resolver: None,
        }
    }
}

impl fmt::Debug for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserConfig")
            .field("window", &self.window)
            .field("skip_bounds", &self.skip_bounds)
            .field("strict_mode", &self.strict_mode)
            .field("duplicate_mode", &self.duplicate_mode)
            .field("all_day_timezone", &self.all_day_timezone)
            .field("tzid_resolver", &self.tzid_resolver.is_some())
            .finish()
    }
}

/// Serializable parser options, e.g. a `[parser]` table in a TOML file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserOptions {
    /// Window start, RFC 3339
    pub window_start: Option<Timestamp>,
    /// Window end, RFC 3339
    pub window_end: Option<Timestamp>,
    /// Disable window filtering
    pub skip_bounds: bool,
    /// Strict mode
    pub strict_mode: StrictMode,
    /// Duplicate mode
    pub duplicate_mode: DuplicateMode,
    /// IANA name of the zone for date-only values
    pub all_day_timezone: Option<String>,
}

impl ParserOptions {
    /// Validate the options and build a configuration.
    ///
    /// A missing window bound is taken from the default window.
    ///
    /// # Errors
    ///
    /// Returns an error if the time zone is unknown or the window is inverted.
    pub fn into_config(self) -> Result<ParserConfig, ConfigError> {
        let mut config = ParserConfig::default()
            .with_skip_bounds(self.skip_bounds)
            .with_strict_mode(self.strict_mode)
            .with_duplicate_mode(self.duplicate_mode);

        if let Some(name) = self.all_day_timezone {
            let tz = TimeZone::get(&name)
                .map_err(|source| ConfigError::UnknownTimeZone { name, source })?;
            config = config.with_all_day_timezone(tz);
        }

        if self.window_start.is_some() || self.window_end.is_some() {
            let fallback = ParseWindow::around_now();
            let window = ParseWindow::new(
                self.window_start.unwrap_or(fallback.start()),
                self.window_end.unwrap_or(fallback.end()),
            )?;
            config = config.with_window(window);
        }

        Ok(config)
    }
}
