use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::common::Price;
use crate::entity::{BookingStatus, VenueId, VenueName};

pub const TOP_VENUE_COUNT: i64 = 3;
pub const WEEK_WINDOW_DAYS: i64 = 7;

/// Count and revenue of bookings created within a window.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, References)]
pub struct PeriodSummary {
    bookings: i64,
    revenue: Price,
}

impl PeriodSummary {
    pub fn new(bookings: i64, revenue: Price) -> Self {
        Self { bookings, revenue }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, References)]
pub struct StatusCount {
    status: BookingStatus,
    count: i64,
}

impl StatusCount {
    pub fn new(status: BookingStatus, count: i64) -> Self {
        Self { status, count }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References)]
pub struct VenuePopularity {
    venue_id: VenueId,
    name: VenueName,
    bookings: i64,
}

impl VenuePopularity {
    pub fn new(venue_id: VenueId, name: VenueName, bookings: i64) -> Self {
        Self {
            venue_id,
            name,
            bookings,
        }
    }
}

/// Revenue only counts completed bookings; the today/week windows follow the creation time.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct BookingStatistics {
    total_bookings: i64,
    total_revenue: Price,
    today: PeriodSummary,
    week: PeriodSummary,
    by_status: Vec<StatusCount>,
    top_venues: Vec<VenuePopularity>,
}

impl BookingStatistics {
    pub fn new(
        total_bookings: i64,
        total_revenue: Price,
        today: PeriodSummary,
        week: PeriodSummary,
        by_status: Vec<StatusCount>,
        top_venues: Vec<VenuePopularity>,
    ) -> Self {
        let by_status = BookingStatus::ALL
            .into_iter()
            .map(|status| {
                let count = by_status
                    .iter()
                    .filter(|found| found.status == status)
                    .map(|found| found.count)
                    .sum();
                StatusCount::new(status, count)
            })
            .collect();
        Self {
            total_bookings,
            total_revenue,
            today,
            week,
            by_status,
            top_venues,
        }
    }

    pub fn count_of(&self, status: BookingStatus) -> i64 {
        self.by_status
            .iter()
            .find(|found| found.status == status)
            .map(|found| found.count)
            .unwrap_or_default()
    }
}
