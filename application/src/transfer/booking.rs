use rust_decimal::Decimal;
use time::{Date, OffsetDateTime, Time, UtcOffset};
use uuid::Uuid;

use kernel::prelude::entity::{BookingEntry, BookingStatus, DestructBooking};

use crate::transfer::VenueDto;

pub const RECENT_BOOKINGS_LIMIT: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub venue_id: Uuid,
    pub venue_name: String,
    pub booking_date: Date,
    pub start_time: Time,
    pub duration_hours: i32,
    pub number_of_people: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_age: i32,
    pub base_price: Decimal,
    pub discount_percent: i32,
    pub discount_amount: Decimal,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<BookingEntry> for BookingDto {
    fn from(value: BookingEntry) -> Self {
        let venue_name: String = value.venue_name().as_ref().clone();
        let DestructBooking {
            id,
            user_id,
            venue_id,
            date,
            start_time,
            duration,
            headcount,
            customer,
            price,
            status,
            special_request,
            created_at,
            updated_at,
        } = value.into_booking().into_destruct();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            venue_id: venue_id.into(),
            venue_name,
            booking_date: date.into(),
            start_time: start_time.into(),
            duration_hours: duration.into(),
            number_of_people: headcount.into(),
            customer_name: customer.name().as_ref().clone(),
            customer_phone: customer.phone().as_ref().clone(),
            customer_address: customer.address().as_ref().clone(),
            customer_age: *customer.age().as_ref(),
            base_price: (*price.base_price()).into(),
            discount_percent: (*price.discount_percent()).into(),
            discount_amount: (*price.discount_amount()).into(),
            total_price: (*price.total_price()).into(),
            status,
            special_requests: special_request.as_option().map(ToString::to_string),
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

/// Raw booking form input. Dates and times arrive as text so parse failures point at their field.
/// `utc_offset` is the venues' local offset, which decides what "today" is.
#[derive(Debug, Clone)]
pub struct CreateBookingDto {
    pub user_id: Uuid,
    pub venue_id: Uuid,
    pub utc_offset: UtcOffset,
    pub booking_date: String,
    pub start_time: String,
    pub duration_hours: i32,
    pub number_of_people: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_age: i32,
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BookingFormDto {
    pub venue: VenueDto,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_age: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct GetBookingFormDto {
    pub user_id: Uuid,
    pub venue_id: Uuid,
}

/// `owner` restricts the lookup to bookings placed by that user.
#[derive(Debug, Clone)]
pub struct GetBookingDto {
    pub id: Uuid,
    pub owner: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct ListBookingDto {
    pub status: Option<BookingStatus>,
    pub limit: i64,
}

impl Default for ListBookingDto {
    fn default() -> Self {
        Self {
            status: None,
            limit: RECENT_BOOKINGS_LIMIT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookingListDto {
    /// Every booking matching the status, not just the ones returned.
    pub total: i64,
    pub bookings: Vec<BookingDto>,
}

#[derive(Debug, Clone)]
pub struct UpdateBookingStatusDto {
    pub id: Uuid,
    pub status: BookingStatus,
}
