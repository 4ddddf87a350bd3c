use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::Date;
use vodca::{AsRefln, Fromln};

use crate::{FieldViolation, KernelError};

const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DISPLAY_DATE: &[FormatItem<'static>] = format_description!("[day].[month].[year]");

pub const MIN_DURATION_HOURS: i32 = 1;
pub const MAX_DURATION_HOURS: i32 = 12;

#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Fromln, AsRefln)]
pub struct BookingDate(Date);

impl BookingDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }

    pub fn parse(raw: &str) -> error_stack::Result<Self, KernelError> {
        Date::parse(raw.trim(), ISO_DATE)
            .map(Self)
            .map_err(|_| FieldViolation::new("booking_date", "Enter a valid date.").into_report())
    }

    /// Bookings may be placed for today or any later day. `today` must already be the
    /// venue's local date; this check knows nothing about time zones.
    pub fn ensure_not_before(&self, today: Date) -> error_stack::Result<(), KernelError> {
        if self.0 < today {
            return Err(FieldViolation::new(
                "booking_date",
                "Booking date cannot be earlier than today.",
            )
            .into_report());
        }
        Ok(())
    }

    /// `dd.mm.yyyy`, the format used on receipts and in chat messages.
    pub fn display(&self) -> String {
        self.0
            .format(DISPLAY_DATE)
            .unwrap_or_else(|_| self.0.to_string())
    }
}

impl Serialize for BookingDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = self
            .0
            .format(ISO_DATE)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

impl<'de> Deserialize<'de> for BookingDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Date::parse(&raw, ISO_DATE)
            .map(Self)
            .map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct DurationHours(i32);

impl DurationHours {
    pub fn new(hours: impl Into<i32>) -> Self {
        Self(hours.into())
    }

    pub fn parse(hours: i32) -> error_stack::Result<Self, KernelError> {
        if !(MIN_DURATION_HOURS..=MAX_DURATION_HOURS).contains(&hours) {
            return Err(FieldViolation::new(
                "duration_hours",
                format!(
                    "Ensure this value is between {MIN_DURATION_HOURS} and {MAX_DURATION_HOURS}."
                ),
            )
            .into_report());
        }
        Ok(Self(hours))
    }
}

#[cfg(test)]
mod test {
    use super::{BookingDate, DurationHours};
    use time::macros::date;

    #[test]
    fn past_dates_are_rejected() {
        let today = date!(2025 - 06 - 10);
        assert!(BookingDate::new(date!(2025 - 06 - 09))
            .ensure_not_before(today)
            .is_err());
        assert!(BookingDate::new(today).ensure_not_before(today).is_ok());
        assert!(BookingDate::new(date!(2026 - 01 - 01))
            .ensure_not_before(today)
            .is_ok());
    }

    #[test]
    fn date_formats() {
        let date = BookingDate::parse("2025-06-09").unwrap();
        assert_eq!(date.display(), "09.06.2025");
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2025-06-09\"");
        assert!(BookingDate::parse("09/06/2025").is_err());
    }

    #[test]
    fn duration_is_one_to_twelve_hours() {
        assert!(DurationHours::parse(0).is_err());
        assert!(DurationHours::parse(1).is_ok());
        assert!(DurationHours::parse(12).is_ok());
        assert!(DurationHours::parse(13).is_err());
    }
}
