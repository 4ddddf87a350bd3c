use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::ProfileDto;

use crate::controller::Exhaust;
use crate::response::{timestamp, BookingResponse};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    id: Uuid,
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    address: String,
    age: Option<i32>,
    created_at: String,
    bookings: Vec<BookingResponse>,
}

impl IntoResponse for ProfileResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct ProfilePresenter;

impl Exhaust<ProfileDto> for ProfilePresenter {
    type To = ProfileResponse;
    fn emit(&self, input: ProfileDto) -> Self::To {
        ProfileResponse {
            id: input.user.id,
            username: input.user.username,
            first_name: input.user.first_name,
            last_name: input.user.last_name,
            email: input.user.email,
            phone: input.phone,
            address: input.address,
            age: input.age,
            created_at: timestamp(input.created_at),
            bookings: input.bookings.into_iter().map(BookingResponse::from).collect(),
        }
    }
}
