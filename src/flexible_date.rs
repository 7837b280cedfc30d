use chrono::NaiveDate;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A calendar date decoded leniently from the Octopus API.
///
/// Upstream mixes bare dates (`2000-01-02`) and full timestamps
/// (`2000-01-02T00:00:00+01:00`) across endpoints. Both decode to the same
/// calendar date; the time of day and offset are discarded. An empty string,
/// the text `null`, a JSON `null` or a missing field decode as `Absent`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FlexibleDate {
    /// No date was supplied.
    #[default]
    Absent,
    /// A calendar date.
    Date(NaiveDate),
}

impl FlexibleDate {
    /// Returns the date, if one was supplied.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            FlexibleDate::Absent => None,
            FlexibleDate::Date(date) => Some(*date),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FlexibleDate::Absent)
    }

    /// Returns the date, or the zero calendar date (`0001-01-01`) when absent.
    ///
    /// For consumers that expect the zero-value sentinel instead of an
    /// explicit absence.
    pub fn date_or_zero(&self) -> NaiveDate {
        self.date().unwrap_or_else(zero_date)
    }

    /// Parses the textual form of an upstream date value.
    ///
    /// Surrounding quotes are dropped and everything from the first `T` on is
    /// ignored. What remains must be empty, `null`, or a strict `YYYY-MM-DD`.
    pub fn parse(raw: &str) -> Result<Self, InvalidDate> {
        let trimmed = raw.trim_matches('"');
        let date_part = trimmed.split('T').next().unwrap_or_default();

        if date_part.is_empty() || date_part == "null" {
            return Ok(FlexibleDate::Absent);
        }

        if !is_date_shape(date_part) {
            return Err(InvalidDate(date_part.to_string()));
        }

        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map(FlexibleDate::Date)
            .map_err(|_| InvalidDate(date_part.to_string()))
    }
}

impl From<NaiveDate> for FlexibleDate {
    fn from(date: NaiveDate) -> Self {
        FlexibleDate::Date(date)
    }
}

impl From<Option<NaiveDate>> for FlexibleDate {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(FlexibleDate::Absent, FlexibleDate::Date)
    }
}

impl fmt::Display for FlexibleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlexibleDate::Absent => f.write_str("-"),
            FlexibleDate::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// The zero calendar date, `0001-01-01`.
pub fn zero_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Zero-padded `YYYY-MM-DD` only. `chrono` alone also accepts `2000-1-2`.
fn is_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Error for a date value that is not a `YYYY-MM-DD` calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDate(pub String);

impl fmt::Display for InvalidDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid date {:?}: expected YYYY-MM-DD", self.0)
    }
}

impl std::error::Error for InvalidDate {}

struct FlexibleDateVisitor;

impl<'de> Visitor<'de> for FlexibleDateVisitor {
    type Value = FlexibleDate;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a YYYY-MM-DD date, an ISO 8601 timestamp, an empty string or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        FlexibleDate::parse(v).map_err(E::custom)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(FlexibleDate::Absent)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(FlexibleDate::Absent)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for FlexibleDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlexibleDateVisitor)
    }
}

impl Serialize for FlexibleDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FlexibleDate::Absent => serializer.serialize_none(),
            FlexibleDate::Date(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
        }
    }
}
