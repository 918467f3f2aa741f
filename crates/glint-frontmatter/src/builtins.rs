//! Built-in variables computed at substitution time.
//!
//! # Variables
//!
//! - Date/time: `datetime_rfc3339`, `datetime_rfc1123`, `datetime`,
//!   `datetime_iso`, `date_short`, `date_long`, `date_full`, `date`,
//!   `custom_date` (formatted with the `custom_date_fmt` variable)
//! - Clock: `time_12h`, `time_24h`, `time_long`, `time`
//! - Timezone: `tz_short`, `tz_offset`, `tz`
//! - Working directory: `pwd`, `cwd`, `pwd_short`, `cwd_short` (omitted when
//!   the working directory cannot be read)

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Utc};
use chrono_tz::{OffsetName, Tz};

use crate::variables::Variables;

/// Variable holding the user's layout for `custom_date`.
pub const CUSTOM_DATE_FMT: &str = "custom_date_fmt";

/// Snapshot of the clock and working directory used to build built-ins.
#[derive(Clone, Debug)]
pub struct BuiltinContext {
    now: DateTime<FixedOffset>,
    /// Zone abbreviation (`CEST`), if the zone is known by name.
    zone: Option<String>,
    cwd: Option<PathBuf>,
}

impl BuiltinContext {
    /// Read the local time and the process working directory once.
    ///
    /// The local zone is taken from `TZ`, or from the system zone setting.
    /// When it cannot be resolved to an IANA name, the zone is rendered
    /// numerically.
    #[must_use]
    pub fn capture() -> Self {
        let cwd = match std::env::current_dir() {
            Ok(cwd) => Some(cwd),
            Err(e) => {
                tracing::debug!(error = %e, "Working directory unavailable");
                None
            }
        };

        match local_zone() {
            Some(tz) => Self::in_zone(Utc::now().with_timezone(&tz), cwd),
            None => Self::new(Local::now().fixed_offset(), cwd),
        }
    }

    /// Create a context from a fixed offset. The zone is rendered numerically.
    #[must_use]
    pub fn new(now: DateTime<FixedOffset>, cwd: Option<PathBuf>) -> Self {
        Self {
            now,
            zone: None,
            cwd,
        }
    }

    /// Create a context from a time in a named zone.
    #[must_use]
    pub fn in_zone(now: DateTime<Tz>, cwd: Option<PathBuf>) -> Self {
        Self {
            zone: now.offset().abbreviation().map(str::to_owned),
            now: now.fixed_offset(),
            cwd,
        }
    }

    /// Captured time.
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }

    /// Captured working directory, if it could be read.
    #[must_use]
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Build the built-in variable table.
    ///
    /// `custom_date_fmt` is a chrono strftime layout. An empty or invalid
    /// layout produces an empty `custom_date`.
    #[must_use]
    pub fn variables(&self, custom_date_fmt: Option<&str>) -> Variables {
        let now = &self.now;
        let tz_short = self
            .zone
            .clone()
            .unwrap_or_else(|| numeric_zone(now.offset()));
        let mut vars = Variables::with_capacity(20);

        vars.insert(
            "datetime_rfc3339",
            now.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        vars.insert(
            "datetime_rfc1123",
            format!("{} {tz_short}", now.format("%a, %d %b %Y %H:%M:%S")),
        );
        vars.insert("datetime", now.format("%Y-%m-%d %H:%M").to_string());
        vars.insert("datetime_iso", now.format("%Y-%m-%d %H:%M:%S").to_string());

        let date_short = now.format("%Y-%m-%d").to_string();
        vars.insert("date_long", now.format("%b %d, %Y").to_string());
        vars.insert("date_full", now.format("%A, %d %b %Y").to_string());
        vars.insert(
            "custom_date",
            format_custom(now, custom_date_fmt.unwrap_or_default()),
        );
        vars.insert("date", date_short.clone());
        vars.insert("date_short", date_short);

        let time_24h = now.format("%H:%M").to_string();
        vars.insert("time_12h", now.format("%I:%M %p").to_string());
        vars.insert("time_long", now.format("%H:%M:%S").to_string());
        vars.insert("time", time_24h.clone());
        vars.insert("time_24h", time_24h);

        vars.insert("tz_offset", now.format("%:z").to_string());
        vars.insert("tz", tz_short.clone());
        vars.insert("tz_short", tz_short);

        if let Some(cwd) = &self.cwd {
            let full = cwd.to_string_lossy().into_owned();
            let short = cwd
                .file_name()
                .map_or_else(|| full.clone(), |name| name.to_string_lossy().into_owned());

            vars.insert("pwd", full.clone());
            vars.insert("cwd", full);
            vars.insert("pwd_short", short.clone());
            vars.insert("cwd_short", short);
        }

        vars
    }
}

/// Resolve the local IANA zone: `TZ` first, then the system setting.
fn local_zone() -> Option<Tz> {
    let name = match std::env::var("TZ") {
        Ok(name) if !name.is_empty() => name.trim_start_matches(':').to_owned(),
        _ => match iana_time_zone::get_timezone() {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!(error = %e, "System time zone unavailable");
                return None;
            }
        },
    };

    match name.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(e) => {
            tracing::debug!(zone = %name, error = %e, "Unknown time zone");
            None
        }
    }
}

/// Zone name for a bare offset: `UTC`, `+02`, or `+0530`.
fn numeric_zone(offset: &FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    if secs == 0 {
        return "UTC".to_owned();
    }

    let sign = if secs < 0 { '-' } else { '+' };
    let minutes = secs.unsigned_abs() / 60;
    let (hh, mm) = (minutes / 60, minutes % 60);
    if mm == 0 {
        format!("{sign}{hh:02}")
    } else {
        format!("{sign}{hh:02}{mm:02}")
    }
}

/// Format `now` with a user-supplied strftime layout without panicking.
fn format_custom(now: &DateTime<FixedOffset>, layout: &str) -> String {
    if layout.is_empty() {
        return String::new();
    }

    let items = StrftimeItems::new(layout);
    if items.clone().any(|item| matches!(item, Item::Error)) {
        tracing::debug!(layout, "Invalid custom date layout");
        return String::new();
    }

    let mut out = String::new();
    if write!(out, "{}", now.format_with_items(items)).is_err() {
        tracing::debug!(layout, "Failed to format custom date");
        return String::new();
    }
    out
}
