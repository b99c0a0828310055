use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Shown when a date cannot be rendered with the configured pattern.
pub const UNFORMATTABLE_DATE: &str = "Não especificado";

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` (assumed UTC) or a bare date.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Whether chrono understands every specifier in `pattern`.
pub fn is_valid_pattern(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// The single date formatter every view goes through.
#[derive(Debug, Clone)]
pub struct DateFormatter {
    timezone: Tz,
    pattern: String,
}

impl DateFormatter {
    pub fn new(timezone: Tz, pattern: impl Into<String>) -> Self {
        Self {
            timezone,
            pattern: pattern.into(),
        }
    }

    pub fn format(&self, value: &DateTime<Utc>) -> String {
        let mut out = String::new();
        let local = value.with_timezone(&self.timezone);
        match write!(out, "{}", local.format(&self.pattern)) {
            Ok(()) => out,
            Err(_) => {
                warn!(
                    target: "app::render",
                    pattern = %self.pattern,
                    "date pattern could not be applied"
                );
                UNFORMATTABLE_DATE.to_string()
            }
        }
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(chrono_tz::America::Sao_Paulo, "%d/%m/%Y")
    }
}
