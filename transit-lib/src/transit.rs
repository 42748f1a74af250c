use crate::duration::{contains_number, days_from_hours, DurationInput, DurationParserError};
use chrono::Duration;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A parsed, strictly positive transit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitTime {
    hours: u64,
}

impl TransitTime {
    pub fn parse(value: impl Into<DurationInput>) -> Option<Self> {
        value.into().hours().map(|hours| TransitTime { hours })
    }

    pub fn from_hours(hours: u64) -> Option<Self> {
        (hours > 0).then_some(TransitTime { hours })
    }

    pub fn hours(&self) -> u64 {
        self.hours
    }

    pub fn days(&self) -> u64 {
        days_from_hours(Some(self.hours)).unwrap_or(1)
    }

    pub fn as_duration(&self) -> Duration {
        i64::try_from(self.hours)
            .ok()
            .and_then(Duration::try_hours)
            .unwrap_or(Duration::MAX)
    }
}

impl FromStr for TransitTime {
    type Err = DurationParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DurationParserError::Empty);
        }
        match TransitTime::parse(trimmed) {
            Some(transit) => Ok(transit),
            None if contains_number(trimmed) => {
                Err(DurationParserError::NonPositive(trimmed.to_string()))
            }
            None => Err(DurationParserError::InvalidFormat(trimmed.to_string())),
        }
    }
}

impl fmt::Display for TransitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.hours / 24;
        let hours = self.hours % 24;
        match (days, hours) {
            (0, hours) => write!(f, "{}h", hours),
            (days, 0) => write!(f, "{}d", days),
            (days, hours) => write!(f, "{}d {}h", days, hours),
        }
    }
}

impl Serialize for TransitTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TransitTime", 2)?;
        state.serialize_field("hours", &self.hours)?;
        state.serialize_field("days", &self.days())?;
        state.end()
    }
}
