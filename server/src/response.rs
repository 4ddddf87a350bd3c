mod booking;
mod profile;
mod statistics;
mod venue;

pub use self::{booking::*, profile::*, statistics::*, venue::*};

use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime, Time};

pub(crate) fn date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

pub(crate) fn clock(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

pub(crate) fn timestamp(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.to_string())
}

#[cfg(test)]
mod test {
    use time::macros::{date, datetime, time};

    #[test]
    fn wire_formats() {
        assert_eq!(super::date(date!(2025 - 06 - 01)), "2025-06-01");
        assert_eq!(super::clock(time!(9:05)), "09:05");
        assert_eq!(
            super::timestamp(datetime!(2025-06-01 10:30 UTC)),
            "2025-06-01T10:30:00Z"
        );
    }
}
