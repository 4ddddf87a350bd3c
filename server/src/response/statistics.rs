use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::{PeriodDto, StatisticsDto};
use kernel::prelude::entity::BookingStatus;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct PeriodResponse {
    bookings: i64,
    revenue: Decimal,
}

impl From<PeriodDto> for PeriodResponse {
    fn from(value: PeriodDto) -> Self {
        Self {
            bookings: value.bookings,
            revenue: value.revenue,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PopularVenueResponse {
    venue_id: Uuid,
    name: String,
    bookings: i64,
}

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    total_bookings: i64,
    total_revenue: Decimal,
    today: PeriodResponse,
    week: PeriodResponse,
    by_status: BTreeMap<&'static str, i64>,
    top_venues: Vec<PopularVenueResponse>,
}

impl IntoResponse for StatisticsResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct StatisticsPresenter;

impl Exhaust<StatisticsDto> for StatisticsPresenter {
    type To = StatisticsResponse;
    fn emit(&self, input: StatisticsDto) -> Self::To {
        let mut by_status = BookingStatus::ALL
            .iter()
            .map(|status| (status.as_str(), 0))
            .collect::<BTreeMap<_, _>>();
        by_status.extend(
            input
                .by_status
                .into_iter()
                .map(|(status, count)| (status.as_str(), count)),
        );
        StatisticsResponse {
            total_bookings: input.total_bookings,
            total_revenue: input.total_revenue,
            today: input.today.into(),
            week: input.week.into(),
            by_status,
            top_venues: input
                .top_venues
                .into_iter()
                .map(|venue| PopularVenueResponse {
                    venue_id: venue.venue_id,
                    name: venue.name,
                    bookings: venue.bookings,
                })
                .collect(),
        }
    }
}
