use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{BookingQuery, DependOnBookingQuery, DependOnVenueQuery, VenueQuery};
use kernel::prelude::entity::BookingId;
use kernel::KernelError;

use crate::receipt::ReceiptDocument;
use crate::transfer::{BookingDto, GetBookingDto, VenueDto};

#[async_trait::async_trait]
pub trait ReceiptService: 'static + Sync + Send + DependOnBookingQuery + DependOnVenueQuery {
    /// `None` when the booking does not exist or belongs to someone else.
    #[tracing::instrument(skip_all, fields(booking_id = %dto.id))]
    async fn receipt(&self, dto: GetBookingDto) -> error_stack::Result<Option<ReceiptDocument>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let Some(entry) = self
            .booking_query()
            .find_entry_by_id(&mut connection, &BookingId::new(dto.id))
            .await?
        else {
            return Ok(None);
        };
        if let Some(owner) = dto.owner {
            if entry.booking().user_id().as_ref() != &owner {
                return Ok(None);
            }
        }
        let venue = self
            .venue_query()
            .find_by_id(&mut connection, entry.booking().venue_id())
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("venue of booking {} is gone", dto.id))
            })?;
        Ok(Some(ReceiptDocument::new(
            BookingDto::from(entry),
            VenueDto::from(venue),
            OffsetDateTime::now_utc(),
        )))
    }
}

impl<T> ReceiptService for T where T: DependOnBookingQuery + DependOnVenueQuery {}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::ReceiptService;
    use crate::service::test::{sample_venue, InMemory};
    use crate::service::BookVenueService;
    use crate::transfer::{CreateBookingDto, GetBookingDto};

    #[tokio::test]
    async fn receipt_is_only_for_the_owner() {
        let store = InMemory::default();
        let venue = sample_venue(dec!(100000), 0, 0);
        let venue_id = *venue.id().as_ref();
        store.insert_venue(venue);
        let owner = Uuid::new_v4();
        let booking = store
            .book_venue(CreateBookingDto {
                user_id: owner,
                venue_id,
                utc_offset: time::UtcOffset::UTC,
                booking_date: (time::OffsetDateTime::now_utc().date() + time::Duration::days(1))
                    .to_string(),
                start_time: "18:30".to_string(),
                duration_hours: 2,
                number_of_people: 2,
                customer_name: "Aziza Karimova".to_string(),
                customer_phone: "+998901234567".to_string(),
                customer_address: "Tashkent".to_string(),
                customer_age: 25,
                special_requests: None,
            })
            .await
            .unwrap();

        let receipt = store
            .receipt(GetBookingDto {
                id: booking.id,
                owner: Some(owner),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            receipt.file_name(),
            format!("poolly_receipt_{}.txt", booking.id)
        );
        assert!(receipt.render().contains("200,000 so'm"));

        let stranger = store
            .receipt(GetBookingDto {
                id: booking.id,
                owner: Some(Uuid::new_v4()),
            })
            .await
            .unwrap();
        assert!(stranger.is_none());
    }
}
