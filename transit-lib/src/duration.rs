use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const HOURS_PER_DAY: f64 = 24.0;

// A minus sign only counts as a sign when it does not follow a number ("3-5 days").
static DAY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\D)(-?\d+(?:\.\d+)?)\s*d").unwrap());
static HOUR_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\D)(-?\d+(?:\.\d+)?)\s*h").unwrap());
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\D)(-?\d+(?:\.\d+)?)").unwrap());

/// Raw transit time as it shows up in rate sheets and carrier payloads.
///
/// Deserializes untagged, so JSON `null`, `5` and `"5 days"` all map onto a variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    #[default]
    Absent,
    Number(f64),
    Text(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationParserError {
    #[error("empty duration")]
    Empty,
    #[error("no duration found in '{0}'")]
    InvalidFormat(String),
    #[error("duration '{0}' is not positive")]
    NonPositive(String),
}

impl DurationInput {
    pub fn is_absent(&self) -> bool {
        matches!(self, DurationInput::Absent)
    }

    pub fn hours(&self) -> Option<u64> {
        match self {
            DurationInput::Absent => None,
            DurationInput::Number(value) if !value.is_finite() || *value <= 0.0 => None,
            DurationInput::Number(value) => parse_text(&value.to_string()),
            DurationInput::Text(text) => parse_text(text),
        }
    }

    pub fn days(&self) -> Option<u64> {
        days_from_hours(self.hours())
    }
}

impl fmt::Display for DurationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationInput::Absent => write!(f, "(absent)"),
            DurationInput::Number(value) => write!(f, "{}", value),
            DurationInput::Text(text) => write!(f, "{:?}", text),
        }
    }
}

impl From<&str> for DurationInput {
    fn from(value: &str) -> Self {
        DurationInput::Text(value.to_string())
    }
}

impl From<String> for DurationInput {
    fn from(value: String) -> Self {
        DurationInput::Text(value)
    }
}

impl From<&DurationInput> for DurationInput {
    fn from(value: &DurationInput) -> Self {
        value.clone()
    }
}

impl<T: Into<DurationInput>> From<Option<T>> for DurationInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(DurationInput::Absent, Into::into)
    }
}

macro_rules! numeric_input {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for DurationInput {
                fn from(value: $ty) -> Self {
                    DurationInput::Number(value as f64)
                }
            }
        )*
    };
}

numeric_input!(f64, f32, i32, i64, u32, u64);

/// Normalizes a transit time to a whole, positive number of hours.
///
/// Explicit `d`/`h` components win (`"1d 12h"` is 36). Without them the first
/// number is read as days unless the text mentions hours. A bare number, string
/// or not, counts as days. Anything else yields `None`.
pub fn hours_from_duration(value: impl Into<DurationInput>) -> Option<u64> {
    value.into().hours()
}

/// Same as [`hours_from_duration`], rounded to whole days with a floor of one.
pub fn days_from_duration(value: impl Into<DurationInput>) -> Option<u64> {
    days_from_hours(hours_from_duration(value))
}

pub fn days_from_hours(hours: Option<u64>) -> Option<u64> {
    hours.map(|hours| (hours.saturating_add(12) / 24).max(1))
}

pub(crate) fn contains_number(text: &str) -> bool {
    NUMBER.is_match(text)
}

/// Outcome of searching a single unit pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Component {
    Missing,
    Discarded,
    Value(f64),
}

impl Component {
    fn find(pattern: &Regex, text: &str) -> Self {
        let Some(captures) = pattern.captures(text) else {
            return Component::Missing;
        };
        match captures[1].parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Component::Value(value),
            _ => {
                debug!("discarding non-positive component '{}' in '{}'", &captures[1], text);
                Component::Discarded
            }
        }
    }

    fn matched(self) -> bool {
        self != Component::Missing
    }

    fn value(self) -> f64 {
        match self {
            Component::Value(value) => value,
            _ => 0.0,
        }
    }
}

fn parse_text(text: &str) -> Option<u64> {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    let day = Component::find(&DAY_TOKEN, &normalized);
    let hour = Component::find(&HOUR_TOKEN, &normalized);
    if day.matched() || hour.matched() {
        let total = day.value() * HOURS_PER_DAY + hour.value();
        debug!("'{}' parsed from tokens: {:?} {:?}", normalized, day, hour);
        return round_hours(total);
    }

    fallback(&normalized)
}

fn fallback(normalized: &str) -> Option<u64> {
    let captures = NUMBER.captures(normalized)?;
    let value = captures[1].parse::<f64>().ok()?;
    if !value.is_finite() || value <= 0.0 {
        return None;
    }

    let hours = if normalized.contains("day") {
        value * HOURS_PER_DAY
    } else if normalized.contains("hour") || normalized.contains("hr") || normalized.contains('h') {
        value
    } else {
        value * HOURS_PER_DAY
    };
    debug!("'{}' parsed by fallback as {} hours", normalized, hours);
    round_hours(hours)
}

fn round_hours(hours: f64) -> Option<u64> {
    if hours.is_nan() || hours <= 0.0 {
        return None;
    }
    // saturates at u64::MAX; a positive duration never reports zero hours
    Some((hours.round() as u64).max(1))
}
