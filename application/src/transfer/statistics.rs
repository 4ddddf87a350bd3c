use rust_decimal::Decimal;
use uuid::Uuid;

use kernel::prelude::entity::{BookingStatistics, BookingStatus, DestructBookingStatistics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodDto {
    pub bookings: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopularVenueDto {
    pub venue_id: Uuid,
    pub name: String,
    pub bookings: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsDto {
    pub total_bookings: i64,
    pub total_revenue: Decimal,
    pub today: PeriodDto,
    pub week: PeriodDto,
    pub by_status: Vec<(BookingStatus, i64)>,
    pub top_venues: Vec<PopularVenueDto>,
}

impl From<BookingStatistics> for StatisticsDto {
    fn from(value: BookingStatistics) -> Self {
        let DestructBookingStatistics {
            total_bookings,
            total_revenue,
            today,
            week,
            by_status,
            top_venues,
        } = value.into_destruct();
        Self {
            total_bookings,
            total_revenue: total_revenue.into(),
            today: PeriodDto {
                bookings: *today.bookings(),
                revenue: (*today.revenue()).into(),
            },
            week: PeriodDto {
                bookings: *week.bookings(),
                revenue: (*week.revenue()).into(),
            },
            by_status: by_status
                .into_iter()
                .map(|count| (*count.status(), *count.count()))
                .collect(),
            top_venues: top_venues
                .into_iter()
                .map(|venue| PopularVenueDto {
                    venue_id: venue.venue_id().clone().into(),
                    name: venue.name().as_ref().clone(),
                    bookings: *venue.bookings(),
                })
                .collect(),
        }
    }
}
