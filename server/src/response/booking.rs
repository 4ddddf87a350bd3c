use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use application::receipt::ReceiptDocument;
use application::transfer::{BookingDto, BookingFormDto, BookingListDto};
use kernel::prelude::entity::Price;
use kernel::KernelError;

use crate::controller::{Exhaust, TryExhaust};
use crate::error::ErrorStatus;
use crate::response::{clock, date, timestamp, VenueResponse};

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    name: String,
    phone: String,
    address: String,
    age: i32,
}

#[derive(Debug, Serialize)]
pub struct PriceResponse {
    base_price: Decimal,
    discount_percent: i32,
    discount_amount: Decimal,
    total_price: Decimal,
    total_display: String,
}

impl PriceResponse {
    fn of(booking: &BookingDto) -> Self {
        Self {
            base_price: booking.base_price,
            discount_percent: booking.discount_percent,
            discount_amount: booking.discount_amount,
            total_price: booking.total_price,
            total_display: Price::new(booking.total_price).display(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    id: Uuid,
    venue_id: Uuid,
    venue_name: String,
    booking_date: String,
    start_time: String,
    duration_hours: i32,
    number_of_people: i32,
    customer: CustomerResponse,
    price: PriceResponse,
    status: &'static str,
    status_label: &'static str,
    special_requests: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<BookingDto> for BookingResponse {
    fn from(value: BookingDto) -> Self {
        let price = PriceResponse::of(&value);
        Self {
            id: value.id,
            venue_id: value.venue_id,
            venue_name: value.venue_name,
            booking_date: date(value.booking_date),
            start_time: clock(value.start_time),
            duration_hours: value.duration_hours,
            number_of_people: value.number_of_people,
            customer: CustomerResponse {
                name: value.customer_name,
                phone: value.customer_phone,
                address: value.customer_address,
                age: value.customer_age,
            },
            price,
            status: value.status.as_str(),
            status_label: value.status.label(),
            special_requests: value.special_requests,
            created_at: timestamp(value.created_at),
            updated_at: timestamp(value.updated_at),
        }
    }
}

impl IntoResponse for BookingResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedBookingResponse {
    id: Uuid,
    status: &'static str,
    price: PriceResponse,
}

impl IntoResponse for CreatedBookingResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    total: i64,
    bookings: Vec<BookingResponse>,
}

impl IntoResponse for BookingListResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct BookingFormResponse {
    venue: VenueResponse,
    customer_name: String,
    customer_phone: String,
    customer_address: String,
    customer_age: Option<i32>,
}

impl IntoResponse for BookingFormResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct ReceiptResponse {
    file_name: String,
    body: String,
}

impl IntoResponse for ReceiptResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.file_name),
                ),
            ],
            self.body,
        )
            .into_response()
    }
}

pub struct BookingPresenter;

impl Exhaust<BookingDto> for BookingPresenter {
    type To = BookingResponse;
    fn emit(&self, input: BookingDto) -> Self::To {
        BookingResponse::from(input)
    }
}

impl TryExhaust<Option<BookingDto>> for BookingPresenter {
    type To = BookingResponse;
    type Error = ErrorStatus;
    fn emit(&self, input: Option<BookingDto>) -> Result<Self::To, Self::Error> {
        input
            .map(BookingResponse::from)
            .ok_or_else(|| ErrorStatus::new(KernelError::NotFound))
    }
}

impl Exhaust<BookingListDto> for BookingPresenter {
    type To = BookingListResponse;
    fn emit(&self, input: BookingListDto) -> Self::To {
        BookingListResponse {
            total: input.total,
            bookings: input.bookings.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

impl TryExhaust<Option<BookingFormDto>> for BookingPresenter {
    type To = BookingFormResponse;
    type Error = ErrorStatus;
    fn emit(&self, input: Option<BookingFormDto>) -> Result<Self::To, Self::Error> {
        let form = input.ok_or_else(|| ErrorStatus::new(KernelError::NotFound))?;
        Ok(BookingFormResponse {
            venue: VenueResponse::from(form.venue),
            customer_name: form.customer_name,
            customer_phone: form.customer_phone,
            customer_address: form.customer_address,
            customer_age: form.customer_age,
        })
    }
}

impl TryExhaust<Option<ReceiptDocument>> for BookingPresenter {
    type To = ReceiptResponse;
    type Error = ErrorStatus;
    fn emit(&self, input: Option<ReceiptDocument>) -> Result<Self::To, Self::Error> {
        let document = input.ok_or_else(|| ErrorStatus::new(KernelError::NotFound))?;
        Ok(ReceiptResponse {
            file_name: document.file_name(),
            body: document.render(),
        })
    }
}

/// Fresh bookings answer `201` with their price breakdown.
pub struct CreatedBookingPresenter;

impl Exhaust<BookingDto> for CreatedBookingPresenter {
    type To = CreatedBookingResponse;
    fn emit(&self, input: BookingDto) -> Self::To {
        CreatedBookingResponse {
            price: PriceResponse::of(&input),
            id: input.id,
            status: input.status.as_str(),
        }
    }
}
