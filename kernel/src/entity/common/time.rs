use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::marker::PhantomData;

use time::format_description::well_known::Rfc3339;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, Time};
use vodca::{AsRefln, Fromln};

use crate::{FieldViolation, KernelError};

pub const CLOCK_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]");
const CLOCK_FORMAT_WITH_SECONDS: &[FormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CreatedAt<T>(OffsetDateTime, PhantomData<T>);

impl<T> CreatedAt<T> {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into(), PhantomData)
    }
}

impl<T> AsRef<OffsetDateTime> for CreatedAt<T> {
    fn as_ref(&self) -> &OffsetDateTime {
        &self.0
    }
}

impl<T> From<CreatedAt<T>> for OffsetDateTime {
    fn from(value: CreatedAt<T>) -> Self {
        value.0
    }
}

impl<T> Serialize for CreatedAt<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_rfc3339(&self.0, serializer)
    }
}

impl<'de, T> Deserialize<'de> for CreatedAt<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_rfc3339(deserializer).map(|time| Self(time, PhantomData))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpdatedAt<T>(OffsetDateTime, PhantomData<T>);

impl<T> UpdatedAt<T> {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into(), PhantomData)
    }
}

impl<T> AsRef<OffsetDateTime> for UpdatedAt<T> {
    fn as_ref(&self) -> &OffsetDateTime {
        &self.0
    }
}

impl<T> From<UpdatedAt<T>> for OffsetDateTime {
    fn from(value: UpdatedAt<T>) -> Self {
        value.0
    }
}

impl<T> Serialize for UpdatedAt<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_rfc3339(&self.0, serializer)
    }
}

impl<'de, T> Deserialize<'de> for UpdatedAt<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_rfc3339(deserializer).map(|time| Self(time, PhantomData))
    }
}

fn serialize_rfc3339<S: Serializer>(time: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    let formatted = time.format(&Rfc3339).map_err(S::Error::custom)?;
    serializer.serialize_str(&formatted)
}

fn deserialize_rfc3339<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OffsetDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    OffsetDateTime::parse(&raw, &Rfc3339).map_err(D::Error::custom)
}

/// Wall-clock time without a date, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Fromln, AsRefln)]
pub struct TimeOfDay(Time);

impl TimeOfDay {
    pub fn new(time: impl Into<Time>) -> Self {
        Self(time.into())
    }

    /// Accepts `HH:MM` as well as `HH:MM:SS`.
    pub fn parse(raw: &str) -> Option<Self> {
        Time::parse(raw, CLOCK_FORMAT)
            .or_else(|_| Time::parse(raw, CLOCK_FORMAT_WITH_SECONDS))
            .ok()
            .map(Self)
    }

    /// [`TimeOfDay::parse`] reporting failures against a form field.
    pub fn parse_field(field: &'static str, raw: &str) -> error_stack::Result<Self, KernelError> {
        Self::parse(raw.trim())
            .ok_or_else(|| FieldViolation::new(field, "Enter a valid time.").into_report())
    }

    pub fn to_clock_string(&self) -> String {
        format!("{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_clock_string())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_clock_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid time of day: {raw}")))
    }
}

#[cfg(test)]
mod test {
    use super::{CreatedAt, TimeOfDay};
    use time::macros::{datetime, time};

    #[test]
    fn time_of_day_accepts_both_clock_forms() {
        assert_eq!(TimeOfDay::parse("07:30"), Some(TimeOfDay::new(time!(7:30))));
        assert_eq!(TimeOfDay::parse("07:30:00"), Some(TimeOfDay::new(time!(7:30))));
        assert_eq!(TimeOfDay::parse("7.30"), None);
    }

    #[test]
    fn field_parse_names_the_field() {
        assert_eq!(
            TimeOfDay::parse_field("opening_time", " 09:00 ").unwrap(),
            TimeOfDay::new(time!(9:00))
        );
        let report = TimeOfDay::parse_field("closing_time", "25:00").unwrap_err();
        let violations = crate::FieldViolation::collect(&report);
        assert_eq!(violations[0].field(), "closing_time");
        assert_eq!(violations[0].message(), "Enter a valid time.");
    }

    #[test]
    fn time_of_day_serializes_without_seconds() {
        let json = serde_json::to_string(&TimeOfDay::new(time!(22:05:59))).unwrap();
        assert_eq!(json, "\"22:05\"");
    }

    #[test]
    fn created_at_is_rfc3339() {
        let created: CreatedAt<()> = CreatedAt::new(datetime!(2025-06-01 10:15 UTC));
        let json = serde_json::to_string(&created).unwrap();
        assert_eq!(json, "\"2025-06-01T10:15:00Z\"");
        let back: CreatedAt<()> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, created);
    }
}
