use error_stack::Report;
use time::{Date, OffsetDateTime, UtcOffset};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::notify::{BookingNotifier, DependOnBookingNotifier};
use kernel::interface::query::{
    BookingQuery, DependOnBookingQuery, DependOnProfileQuery, DependOnUserQuery,
    DependOnVenueQuery, ProfileQuery, UserQuery, VenueQuery,
};
use kernel::interface::update::{BookingModifier, DependOnBookingModifier};
use kernel::prelude::entity::{
    Address, Age, Booking, BookingDate, BookingDraft, BookingEntry, BookingId, Customer,
    CustomerName, DurationHours, Headcount, PhoneNumber, SelectLimit, SpecialRequest, TimeOfDay,
    UserId, VenueId,
};
use kernel::{KernelError, Violations};

use crate::transfer::{
    BookingDto, BookingFormDto, BookingListDto, CreateBookingDto, GetBookingDto,
    GetBookingFormDto, ListBookingDto, UpdateBookingStatusDto, VenueDto,
};

/// Checks every form field at once so all problems are reported together.
pub(crate) fn validate_booking(
    dto: &CreateBookingDto,
    today: Date,
) -> error_stack::Result<BookingDraft, KernelError> {
    let mut violations = Violations::default();
    let date = violations.check(
        BookingDate::parse(&dto.booking_date)
            .and_then(|date| date.ensure_not_before(today).map(|_| date)),
    );
    let start_time = violations.check(TimeOfDay::parse_field("start_time", &dto.start_time));
    let duration = violations.check(DurationHours::parse(dto.duration_hours));
    let headcount = violations.check(Headcount::parse(dto.number_of_people));
    let name = violations.check(CustomerName::parse(dto.customer_name.as_str()));
    let phone = violations.check(PhoneNumber::parse(
        "customer_phone",
        dto.customer_phone.as_str(),
    ));
    let address = violations.check(Address::parse(
        "customer_address",
        dto.customer_address.as_str(),
    ));
    let age = violations.check(Age::parse("customer_age", dto.customer_age));

    match (date, start_time, duration, headcount, name, phone, address, age) {
        (
            Some(date),
            Some(start_time),
            Some(duration),
            Some(headcount),
            Some(name),
            Some(phone),
            Some(address),
            Some(age),
        ) => Ok(BookingDraft {
            date,
            start_time,
            duration,
            headcount,
            customer: Customer::new(name, phone, address, age),
            special_request: SpecialRequest::new(
                dto.special_requests.clone().unwrap_or_default(),
            ),
        }),
        _ => Err(violations.into_report()),
    }
}

/// The calendar date at `offset` for the instant `now`.
pub(crate) fn local_today(now: OffsetDateTime, offset: UtcOffset) -> Date {
    now.to_offset(offset).date()
}

fn not_found(what: &str, id: impl std::fmt::Display) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("{what} {id} not found"))
}

#[async_trait::async_trait]
pub trait BookVenueService:
    'static
    + Sync
    + Send
    + DependOnVenueQuery
    + DependOnBookingModifier
    + DependOnBookingNotifier
{
    /// Stores a pending booking and then tells the administrators about it.
    /// A failed notification is logged and otherwise ignored.
    #[tracing::instrument(skip_all, fields(venue_id = %dto.venue_id, user_id = %dto.user_id))]
    async fn book_venue(&self, dto: CreateBookingDto) -> error_stack::Result<BookingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let venue_id = VenueId::new(dto.venue_id);
        let venue = self
            .venue_query()
            .find_by_id(&mut connection, &venue_id)
            .await?
            .filter(|venue| *venue.is_active())
            .ok_or_else(|| not_found("venue", &venue_id))?;

        let now = OffsetDateTime::now_utc();
        let draft = validate_booking(&dto, local_today(now, dto.utc_offset))?;
        let booking = Booking::place(
            BookingId::generate(),
            UserId::new(dto.user_id),
            &venue,
            draft,
            now,
        );
        self.booking_modifier()
            .create(&mut connection, &booking)
            .await?;
        connection.commit().await?;
        tracing::info!(booking_id = %booking.id(), total = %booking.price().total_price().display(), "booking created");

        let entry = BookingEntry::new(booking, venue.name().clone());
        if let Err(report) = self.booking_notifier().notify_created(&entry).await {
            tracing::warn!("failed to notify administrators about booking {}: {report:?}", entry.booking().id());
        }
        Ok(BookingDto::from(entry))
    }
}

impl<T> BookVenueService for T where
    T: DependOnVenueQuery + DependOnBookingModifier + DependOnBookingNotifier
{
}

#[async_trait::async_trait]
pub trait BookingFormService:
    'static + Sync + Send + DependOnVenueQuery + DependOnUserQuery + DependOnProfileQuery
{
    /// Initial form values taken from the account name and the stored profile.
    async fn booking_form(
        &self,
        dto: GetBookingFormDto,
    ) -> error_stack::Result<Option<BookingFormDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let Some(venue) = self
            .venue_query()
            .find_by_id(&mut connection, &VenueId::new(dto.venue_id))
            .await?
            .filter(|venue| *venue.is_active())
        else {
            return Ok(None);
        };
        let user_id = UserId::new(dto.user_id);
        let customer_name = self
            .user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .map(|user| user.full_name())
            .unwrap_or_default();
        let profile = self
            .profile_query()
            .find_by_user_id(&mut connection, &user_id)
            .await?;

        let (customer_phone, customer_address, customer_age) = match profile {
            Some(profile) => (
                profile.phone().as_ref().clone(),
                profile.address().as_ref().clone(),
                profile.age().map(|age| *age.as_ref()),
            ),
            None => (String::new(), String::new(), None),
        };
        Ok(Some(BookingFormDto {
            venue: VenueDto::from(venue),
            customer_name,
            customer_phone,
            customer_address,
            customer_age,
        }))
    }
}

impl<T> BookingFormService for T where
    T: DependOnVenueQuery + DependOnUserQuery + DependOnProfileQuery
{
}

#[async_trait::async_trait]
pub trait GetBookingService: 'static + Sync + Send + DependOnBookingQuery {
    async fn get_booking(&self, dto: GetBookingDto) -> error_stack::Result<Option<BookingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let entry = self
            .booking_query()
            .find_entry_by_id(&mut connection, &BookingId::new(dto.id))
            .await?;
        Ok(entry
            .filter(|entry| match dto.owner {
                Some(owner) => entry.booking().user_id().as_ref() == &owner,
                None => true,
            })
            .map(BookingDto::from))
    }
}

impl<T> GetBookingService for T where T: DependOnBookingQuery {}

#[async_trait::async_trait]
pub trait ListBookingService: 'static + Sync + Send + DependOnBookingQuery {
    async fn list_bookings(&self, dto: ListBookingDto) -> error_stack::Result<BookingListDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let total = self
            .booking_query()
            .count(&mut connection, dto.status.as_ref())
            .await?;
        let bookings = self
            .booking_query()
            .find_recent(
                &mut connection,
                dto.status.as_ref(),
                &SelectLimit::new(dto.limit.max(0)),
            )
            .await?;
        Ok(BookingListDto {
            total,
            bookings: bookings.into_iter().map(BookingDto::from).collect(),
        })
    }
}

impl<T> ListBookingService for T where T: DependOnBookingQuery {}

#[async_trait::async_trait]
pub trait UpdateBookingStatusService:
    'static + Sync + Send + DependOnBookingQuery + DependOnBookingModifier + DependOnVenueQuery
{
    /// Sets any status from any other. Saving re-applies the venue's current discount
    /// rules on top of the stored base price.
    #[tracing::instrument(skip_all, fields(booking_id = %dto.id, status = %dto.status))]
    async fn update_booking_status(
        &self,
        dto: UpdateBookingStatusDto,
    ) -> error_stack::Result<BookingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = BookingId::new(dto.id);
        let entry = self
            .booking_query()
            .find_entry_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found("booking", &id))?;
        let venue_name = entry.venue_name().clone();
        let booking = entry
            .into_booking()
            .change_status(dto.status, OffsetDateTime::now_utc());
        let booking = match self
            .venue_query()
            .find_by_id(&mut connection, booking.venue_id())
            .await?
        {
            Some(venue) => booking.reprice(venue.discounts()),
            None => booking,
        };
        self.booking_modifier()
            .update(&mut connection, &booking)
            .await?;
        connection.commit().await?;
        tracing::info!("booking status changed");
        Ok(BookingDto::from(BookingEntry::new(booking, venue_name)))
    }
}

impl<T> UpdateBookingStatusService for T where
    T: DependOnBookingQuery + DependOnBookingModifier + DependOnVenueQuery
{
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use time::macros::{date, datetime, offset};
    use time::{Duration, OffsetDateTime, UtcOffset};
    use uuid::Uuid;

    use kernel::prelude::entity::BookingStatus;
    use kernel::{FieldViolation, KernelError};

    use super::{
        local_today, validate_booking, BookVenueService, BookingFormService, GetBookingService,
        ListBookingService, UpdateBookingStatusService,
    };
    use crate::service::test::{sample_profile, sample_user, sample_venue, InMemory};
    use crate::transfer::{
        CreateBookingDto, GetBookingDto, GetBookingFormDto, ListBookingDto,
        UpdateBookingStatusDto,
    };

    fn tomorrow() -> String {
        (OffsetDateTime::now_utc().date() + Duration::days(1)).to_string()
    }

    fn create_dto(user_id: Uuid, venue_id: Uuid) -> CreateBookingDto {
        CreateBookingDto {
            user_id,
            venue_id,
            utc_offset: UtcOffset::UTC,
            booking_date: tomorrow(),
            start_time: "10:00".to_string(),
            duration_hours: 2,
            number_of_people: 6,
            customer_name: "Aziza Karimova".to_string(),
            customer_phone: "+998901234567".to_string(),
            customer_address: "Tashkent".to_string(),
            customer_age: 25,
            special_requests: Some("Need a lifeguard".to_string()),
        }
    }

    fn fields(report: &error_stack::Report<KernelError>) -> Vec<String> {
        FieldViolation::collect(report)
            .into_iter()
            .map(|violation| violation.field().to_string())
            .collect()
    }

    #[test]
    fn past_date_is_rejected_regardless_of_other_fields() {
        let dto = CreateBookingDto {
            booking_date: "2025-06-09".to_string(),
            ..create_dto(Uuid::new_v4(), Uuid::new_v4())
        };
        let report = validate_booking(&dto, date!(2025 - 06 - 10)).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Invalid));
        assert_eq!(fields(&report), vec!["booking_date".to_string()]);
    }

    #[test]
    fn past_date_is_reported_with_other_fields() {
        let dto = CreateBookingDto {
            booking_date: "2025-06-09".to_string(),
            customer_age: 0,
            customer_phone: "9".repeat(21),
            ..create_dto(Uuid::new_v4(), Uuid::new_v4())
        };
        let report = validate_booking(&dto, date!(2025 - 06 - 10)).unwrap_err();
        let found = fields(&report);
        for field in ["booking_date", "customer_age", "customer_phone"] {
            assert!(found.contains(&field.to_string()), "missing {field}");
        }
    }

    #[test]
    fn today_follows_the_venue_offset() {
        let now = datetime!(2025-06-09 21:30 UTC);
        assert_eq!(local_today(now, UtcOffset::UTC), date!(2025 - 06 - 09));
        assert_eq!(local_today(now, offset!(+5)), date!(2025 - 06 - 10));

        let dto = CreateBookingDto {
            booking_date: "2025-06-09".to_string(),
            ..create_dto(Uuid::new_v4(), Uuid::new_v4())
        };
        assert!(validate_booking(&dto, local_today(now, UtcOffset::UTC)).is_ok());
        let report = validate_booking(&dto, local_today(now, offset!(+5))).unwrap_err();
        assert_eq!(fields(&report), vec!["booking_date".to_string()]);
    }

    #[test]
    fn every_bad_field_is_reported() {
        let dto = CreateBookingDto {
            start_time: "noon".to_string(),
            duration_hours: 13,
            number_of_people: 0,
            customer_name: String::new(),
            customer_age: 0,
            ..create_dto(Uuid::new_v4(), Uuid::new_v4())
        };
        let report = validate_booking(&dto, date!(2025 - 06 - 10)).unwrap_err();
        let found = fields(&report);
        for field in [
            "start_time",
            "duration_hours",
            "number_of_people",
            "customer_name",
            "customer_age",
        ] {
            assert!(found.contains(&field.to_string()), "missing {field}");
        }
    }

    #[tokio::test]
    async fn booking_is_priced_stored_and_announced() {
        let store = InMemory::default();
        let venue = sample_venue(dec!(100000), 0, 15);
        let venue_id = *venue.id().as_ref();
        store.insert_venue(venue);

        let booking = store
            .book_venue(create_dto(Uuid::new_v4(), venue_id))
            .await
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.base_price, dec!(200000));
        assert_eq!(booking.discount_amount, dec!(30000));
        assert_eq!(booking.total_price, dec!(170000));
        assert_eq!(booking.venue_name, "Aqua Park");
        assert_eq!(store.bookings().len(), 1);
        assert_eq!(store.notified(), vec![booking.id]);
    }

    #[tokio::test]
    async fn failed_notification_keeps_the_booking() {
        let store = InMemory::failing_notifier();
        let venue = sample_venue(dec!(50000), 50, 0);
        let venue_id = *venue.id().as_ref();
        store.insert_venue(venue);

        let booking = store
            .book_venue(CreateBookingDto {
                number_of_people: 1,
                customer_age: 10,
                duration_hours: 3,
                ..create_dto(Uuid::new_v4(), venue_id)
            })
            .await
            .unwrap();
        assert_eq!(booking.total_price, dec!(75000));
        assert_eq!(store.bookings().len(), 1);
        assert!(store.notified().is_empty());
    }

    #[tokio::test]
    async fn past_date_is_never_stored() {
        let store = InMemory::default();
        let venue = sample_venue(dec!(100000), 0, 0);
        let venue_id = *venue.id().as_ref();
        store.insert_venue(venue);

        let report = store
            .book_venue(CreateBookingDto {
                booking_date: "2000-01-01".to_string(),
                ..create_dto(Uuid::new_v4(), venue_id)
            })
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Invalid));
        assert!(store.bookings().is_empty());
        assert!(store.notified().is_empty());
    }

    #[tokio::test]
    async fn unknown_venue_is_not_found() {
        let store = InMemory::default();
        let report = store
            .book_venue(create_dto(Uuid::new_v4(), Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::NotFound));
    }

    #[tokio::test]
    async fn form_is_prefilled_from_account_and_profile() {
        let store = InMemory::default();
        let venue = sample_venue(dec!(100000), 0, 0);
        let venue_id = *venue.id().as_ref();
        store.insert_venue(venue);
        let user = sample_user();
        let user_id = *user.id().as_ref();
        store.insert_user(user);
        store.insert_profile(sample_profile(user_id));

        let form = store
            .booking_form(GetBookingFormDto { user_id, venue_id })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(form.customer_name, "Aziza Karimova");
        assert_eq!(form.customer_phone, "+998901234567");
        assert_eq!(form.customer_age, Some(25));
    }

    #[tokio::test]
    async fn bookings_are_visible_to_their_owner_only() {
        let store = InMemory::default();
        let venue = sample_venue(dec!(100000), 0, 0);
        let venue_id = *venue.id().as_ref();
        store.insert_venue(venue);
        let owner = Uuid::new_v4();
        let booking = store.book_venue(create_dto(owner, venue_id)).await.unwrap();

        let mine = store
            .get_booking(GetBookingDto {
                id: booking.id,
                owner: Some(owner),
            })
            .await
            .unwrap();
        assert!(mine.is_some());
        let theirs = store
            .get_booking(GetBookingDto {
                id: booking.id,
                owner: Some(Uuid::new_v4()),
            })
            .await
            .unwrap();
        assert!(theirs.is_none());
    }

    #[tokio::test]
    async fn status_change_is_idempotent_and_listed() {
        let store = InMemory::default();
        let venue = sample_venue(dec!(100000), 0, 0);
        let venue_id = *venue.id().as_ref();
        store.insert_venue(venue);
        let booking = store
            .book_venue(create_dto(Uuid::new_v4(), venue_id))
            .await
            .unwrap();

        for _ in 0..2 {
            let confirmed = store
                .update_booking_status(UpdateBookingStatusDto {
                    id: booking.id,
                    status: BookingStatus::Confirmed,
                })
                .await
                .unwrap();
            assert_eq!(confirmed.status, BookingStatus::Confirmed);
            assert_eq!(confirmed.total_price, booking.total_price);
        }

        let pending = store
            .list_bookings(ListBookingDto {
                status: Some(BookingStatus::Pending),
                limit: 5,
            })
            .await
            .unwrap();
        assert_eq!(pending.total, 0);
        let all = store.list_bookings(ListBookingDto::default()).await.unwrap();
        assert_eq!(all.total, 1);
        assert_eq!(all.bookings[0].status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn status_change_reapplies_current_discounts() {
        let store = InMemory::default();
        let venue = sample_venue(dec!(100000), 0, 0);
        let venue_id = *venue.id().as_ref();
        store.insert_venue(venue);
        let booking = store
            .book_venue(create_dto(Uuid::new_v4(), venue_id))
            .await
            .unwrap();
        assert_eq!(booking.total_price, dec!(200000));

        store.set_group_discount(venue_id, 10);
        let completed = store
            .update_booking_status(UpdateBookingStatusDto {
                id: booking.id,
                status: BookingStatus::Completed,
            })
            .await
            .unwrap();
        assert_eq!(completed.base_price, dec!(200000));
        assert_eq!(completed.total_price, dec!(180000));
    }

    #[tokio::test]
    async fn unknown_booking_status_change_is_not_found() {
        let store = InMemory::default();
        let report = store
            .update_booking_status(UpdateBookingStatusDto {
                id: Uuid::new_v4(),
                status: BookingStatus::Cancelled,
            })
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::NotFound));
        assert!(store.bookings().is_empty());
    }
}
