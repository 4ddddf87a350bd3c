use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::{VenueDto, VenuePageDto};
use kernel::prelude::entity::{Amenities, Price};

use crate::controller::{Exhaust, TryExhaust};
use crate::error::ErrorStatus;
use crate::response::{clock, timestamp};

#[derive(Debug, Serialize)]
pub struct AmenitiesResponse {
    sauna: bool,
    cafe: bool,
    sports_area: bool,
    parking: bool,
    wifi: bool,
}

impl From<Amenities> for AmenitiesResponse {
    fn from(value: Amenities) -> Self {
        Self {
            sauna: value.sauna,
            cafe: value.cafe,
            sports_area: value.sports_area,
            parking: value.parking,
            wifi: value.wifi,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DiscountsResponse {
    children: i32,
    group: i32,
}

#[derive(Debug, Serialize)]
pub struct VenueResponse {
    id: Uuid,
    name: String,
    description: String,
    address: String,
    hourly_rate: Decimal,
    hourly_rate_display: String,
    capacity: i32,
    opening_time: String,
    closing_time: String,
    amenities: AmenitiesResponse,
    discounts: DiscountsResponse,
    rules: String,
    is_active: bool,
    created_at: String,
}

impl From<VenueDto> for VenueResponse {
    fn from(value: VenueDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            address: value.address,
            hourly_rate: value.hourly_rate,
            hourly_rate_display: Price::new(value.hourly_rate).display(),
            capacity: value.capacity,
            opening_time: clock(value.opening_time),
            closing_time: clock(value.closing_time),
            amenities: value.amenities.into(),
            discounts: DiscountsResponse {
                children: value.children_discount,
                group: value.group_discount,
            },
            rules: value.rules,
            is_active: value.is_active,
            created_at: timestamp(value.created_at),
        }
    }
}

impl IntoResponse for VenueResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedVenueResponse(VenueResponse);

impl IntoResponse for CreatedVenueResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::CREATED, Json(self.0)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct VenuePageResponse {
    venues: Vec<VenueResponse>,
    page: i64,
    total_pages: i64,
    total: i64,
}

impl IntoResponse for VenuePageResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, Json(self)).into_response()
    }
}

pub struct VenuePresenter;

impl Exhaust<VenueDto> for VenuePresenter {
    type To = VenueResponse;
    fn emit(&self, input: VenueDto) -> Self::To {
        VenueResponse::from(input)
    }
}

impl TryExhaust<Option<VenueDto>> for VenuePresenter {
    type To = VenueResponse;
    type Error = ErrorStatus;
    fn emit(&self, input: Option<VenueDto>) -> Result<Self::To, Self::Error> {
        input
            .map(VenueResponse::from)
            .ok_or_else(|| ErrorStatus::new(kernel::KernelError::NotFound))
    }
}

impl Exhaust<Vec<VenueDto>> for VenuePresenter {
    type To = Json<Vec<VenueResponse>>;
    fn emit(&self, input: Vec<VenueDto>) -> Self::To {
        Json(input.into_iter().map(VenueResponse::from).collect())
    }
}

impl Exhaust<VenuePageDto> for VenuePresenter {
    type To = VenuePageResponse;
    fn emit(&self, input: VenuePageDto) -> Self::To {
        VenuePageResponse {
            venues: input.venues.into_iter().map(VenueResponse::from).collect(),
            page: input.page,
            total_pages: input.total_pages,
            total: input.total,
        }
    }
}

/// Admin writes answer `201` on create and `204` on delete.
pub struct VenueAdminPresenter;

impl Exhaust<VenueDto> for VenueAdminPresenter {
    type To = CreatedVenueResponse;
    fn emit(&self, input: VenueDto) -> Self::To {
        CreatedVenueResponse(VenueResponse::from(input))
    }
}

impl Exhaust<()> for VenueAdminPresenter {
    type To = axum::http::StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        axum::http::StatusCode::NO_CONTENT
    }
}
