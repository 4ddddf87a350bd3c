use std::str::FromStr;

use error_stack::Report;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use application::transfer::{
    DeleteVenueDto, ListBookingDto, UpdateBookingStatusDto, RECENT_BOOKINGS_LIMIT,
};
use kernel::prelude::entity::BookingStatus;
use kernel::{FieldViolation, KernelError};

use crate::controller::{Intake, TryIntake};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListBookingRequest {
    status: Option<String>,
    #[validate(range(min = 1, max = 100))]
    limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    status: String,
}

#[derive(Debug)]
pub struct DeleteVenueRequest {
    id: Uuid,
}

impl DeleteVenueRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

fn status(raw: &str) -> error_stack::Result<BookingStatus, KernelError> {
    BookingStatus::from_str(raw.trim()).map_err(|_| {
        FieldViolation::new(
            "status",
            format!("Select a valid choice. {raw} is not one of the available choices."),
        )
        .into_report()
    })
}

pub struct AdminTransformer;

impl TryIntake<ListBookingRequest> for AdminTransformer {
    type To = ListBookingDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: ListBookingRequest) -> Result<Self::To, Self::Error> {
        let status = input
            .status
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| status(&raw))
            .transpose()?;
        Ok(ListBookingDto {
            status,
            limit: input.limit.unwrap_or(RECENT_BOOKINGS_LIMIT),
        })
    }
}

impl TryIntake<(Uuid, UpdateBookingStatusRequest)> for AdminTransformer {
    type To = UpdateBookingStatusDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: (Uuid, UpdateBookingStatusRequest)) -> Result<Self::To, Self::Error> {
        let (id, input) = input;
        Ok(UpdateBookingStatusDto {
            id,
            status: status(&input.status)?,
        })
    }
}

impl Intake<DeleteVenueRequest> for AdminTransformer {
    type To = DeleteVenueDto;
    fn emit(&self, input: DeleteVenueRequest) -> Self::To {
        DeleteVenueDto { id: input.id }
    }
}

#[cfg(test)]
mod test {
    use kernel::prelude::entity::BookingStatus;
    use kernel::FieldViolation;

    use super::{AdminTransformer, ListBookingRequest, UpdateBookingStatusRequest};
    use crate::controller::TryIntake;

    #[test]
    fn list_defaults_to_recent_bookings() {
        let dto = TryIntake::emit(&AdminTransformer, ListBookingRequest::default()).unwrap();
        assert_eq!(dto.status, None);
        assert_eq!(dto.limit, application::transfer::RECENT_BOOKINGS_LIMIT);
    }

    #[test]
    fn unknown_status_is_a_field_error() {
        let id = uuid::Uuid::new_v4();
        let dto = TryIntake::emit(
            &AdminTransformer,
            (id, UpdateBookingStatusRequest { status: "confirmed".to_string() }),
        )
        .unwrap();
        assert_eq!(dto.status, BookingStatus::Confirmed);

        let report = TryIntake::emit(
            &AdminTransformer,
            (id, UpdateBookingStatusRequest { status: "archived".to_string() }),
        )
        .unwrap_err();
        assert_eq!(FieldViolation::collect(&report)[0].field(), "status");
    }
}
