use serde::Deserialize;
use time::UtcOffset;
use uuid::Uuid;

use application::transfer::{CreateBookingDto, GetBookingDto, GetBookingFormDto};

use crate::controller::Intake;

/// Checked field by field by the booking service, never here.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    booking_date: String,
    start_time: String,
    duration_hours: i32,
    number_of_people: i32,
    customer_name: String,
    customer_phone: String,
    customer_address: String,
    customer_age: i32,
    #[serde(default)]
    special_requests: Option<String>,
}

/// Booking form posted by `user_id` for `venue_id`.
#[derive(Debug)]
pub struct BookVenueRequest {
    user_id: Uuid,
    venue_id: Uuid,
    utc_offset: UtcOffset,
    form: CreateBookingRequest,
}

impl BookVenueRequest {
    pub fn new(
        user_id: Uuid,
        venue_id: Uuid,
        utc_offset: UtcOffset,
        form: CreateBookingRequest,
    ) -> Self {
        Self {
            user_id,
            venue_id,
            utc_offset,
            form,
        }
    }
}

#[derive(Debug)]
pub struct BookingFormRequest {
    user_id: Uuid,
    venue_id: Uuid,
}

impl BookingFormRequest {
    pub fn new(user_id: Uuid, venue_id: Uuid) -> Self {
        Self { user_id, venue_id }
    }
}

/// A booking looked up on behalf of its owner.
#[derive(Debug)]
pub struct OwnBookingRequest {
    id: Uuid,
    owner: Uuid,
}

impl OwnBookingRequest {
    pub fn new(id: Uuid, owner: Uuid) -> Self {
        Self { id, owner }
    }
}

pub struct BookingTransformer;

impl Intake<BookVenueRequest> for BookingTransformer {
    type To = CreateBookingDto;
    fn emit(&self, input: BookVenueRequest) -> Self::To {
        let BookVenueRequest {
            user_id,
            venue_id,
            utc_offset,
            form,
        } = input;
        CreateBookingDto {
            user_id,
            venue_id,
            utc_offset,
            booking_date: form.booking_date,
            start_time: form.start_time,
            duration_hours: form.duration_hours,
            number_of_people: form.number_of_people,
            customer_name: form.customer_name,
            customer_phone: form.customer_phone,
            customer_address: form.customer_address,
            customer_age: form.customer_age,
            special_requests: form.special_requests,
        }
    }
}

impl Intake<BookingFormRequest> for BookingTransformer {
    type To = GetBookingFormDto;
    fn emit(&self, input: BookingFormRequest) -> Self::To {
        GetBookingFormDto {
            user_id: input.user_id,
            venue_id: input.venue_id,
        }
    }
}

impl Intake<OwnBookingRequest> for BookingTransformer {
    type To = GetBookingDto;
    fn emit(&self, input: OwnBookingRequest) -> Self::To {
        GetBookingDto {
            id: input.id,
            owner: Some(input.owner),
        }
    }
}

#[cfg(test)]
mod test {
    use time::macros::offset;
    use uuid::Uuid;

    use super::{BookVenueRequest, BookingTransformer, CreateBookingRequest};
    use crate::controller::Intake;

    fn request(age: i32, booking_date: &str) -> CreateBookingRequest {
        serde_json::from_value(serde_json::json!({
            "booking_date": booking_date,
            "start_time": "10:00",
            "duration_hours": 2,
            "number_of_people": 6,
            "customer_name": "Aziza Karimova",
            "customer_phone": "+998901234567",
            "customer_address": "Tashkent",
            "customer_age": age
        }))
        .unwrap()
    }

    #[test]
    fn special_requests_are_optional() {
        assert_eq!(request(25, "2030-01-01").special_requests, None);
    }

    #[test]
    fn bad_values_reach_the_service_unchanged() {
        let (user_id, venue_id) = (Uuid::new_v4(), Uuid::new_v4());
        let dto = Intake::emit(
            &BookingTransformer,
            BookVenueRequest::new(user_id, venue_id, offset!(+5), request(0, "2000-01-01")),
        );
        assert_eq!(dto.user_id, user_id);
        assert_eq!(dto.venue_id, venue_id);
        assert_eq!(dto.utc_offset, offset!(+5));
        assert_eq!(dto.booking_date, "2000-01-01");
        assert_eq!(dto.customer_age, 0);
    }
}
