use rust_decimal::Decimal;
use sqlx::types::time::{Date, OffsetDateTime, Time};
use sqlx::types::Uuid;
use sqlx::PgConnection;

use error_stack::ResultExt;
use kernel::interface::query::BookingQuery;
use kernel::interface::update::BookingModifier;
use kernel::prelude::entity::{
    Address, Age, Booking, BookingDate, BookingEntry, BookingId, BookingStatus, CreatedAt,
    Customer, CustomerName, DiscountPercent, DurationHours, Headcount, PhoneNumber, Price,
    PriceBreakdown, SelectLimit, SpecialRequest, TimeOfDay, UpdatedAt, UserId, VenueId, VenueName,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBookingRepository;

#[async_trait::async_trait]
impl BookingQuery for PostgresBookingRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError> {
        let entry = PgBookingInternal::find_entry_by_id(con, id).await?;
        Ok(entry.map(BookingEntry::into_booking))
    }

    async fn find_entry_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BookingId,
    ) -> error_stack::Result<Option<BookingEntry>, KernelError> {
        PgBookingInternal::find_entry_by_id(con, id).await
    }

    async fn find_by_user(
        &self,
        con: &mut PostgresConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<BookingEntry>, KernelError> {
        PgBookingInternal::find_by_user(con, user_id).await
    }

    async fn find_recent(
        &self,
        con: &mut PostgresConnection,
        status: Option<&BookingStatus>,
        limit: &SelectLimit,
    ) -> error_stack::Result<Vec<BookingEntry>, KernelError> {
        PgBookingInternal::find_recent(con, status, limit).await
    }

    async fn count(
        &self,
        con: &mut PostgresConnection,
        status: Option<&BookingStatus>,
    ) -> error_stack::Result<i64, KernelError> {
        PgBookingInternal::count(con, status).await
    }
}

#[async_trait::async_trait]
impl BookingModifier for PostgresBookingRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError> {
        PgBookingInternal::create(con, booking).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        booking: &Booking,
    ) -> error_stack::Result<(), KernelError> {
        PgBookingInternal::update(con, booking).await
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    user_id: Uuid,
    venue_id: Uuid,
    venue_name: String,
    booking_date: Date,
    start_time: Time,
    duration_hours: i32,
    number_of_people: i32,
    customer_name: String,
    customer_phone: String,
    customer_address: String,
    customer_age: i32,
    base_price: Decimal,
    discount_percent: i32,
    status: String,
    special_requests: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<BookingRow> for BookingEntry {
    type Error = error_stack::Report<KernelError>;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<BookingStatus>()
            .change_context(KernelError::Internal)
            .attach_printable_lazy(|| format!("booking {} has an unknown status", row.id))?;
        let booking = Booking::new(
            BookingId::new(row.id),
            UserId::new(row.user_id),
            VenueId::new(row.venue_id),
            BookingDate::new(row.booking_date),
            TimeOfDay::new(row.start_time),
            DurationHours::new(row.duration_hours),
            Headcount::new(row.number_of_people),
            Customer::new(
                CustomerName::new(row.customer_name),
                PhoneNumber::new(row.customer_phone),
                Address::new(row.customer_address),
                Age::new(row.customer_age),
            ),
            PriceBreakdown::from_base(
                Price::new(row.base_price),
                DiscountPercent::new(row.discount_percent),
            ),
            status,
            SpecialRequest::new(row.special_requests),
            CreatedAt::new(row.created_at),
            UpdatedAt::new(row.updated_at),
        );
        Ok(BookingEntry::new(booking, VenueName::new(row.venue_name)))
    }
}

fn into_entries(rows: Vec<BookingRow>) -> error_stack::Result<Vec<BookingEntry>, KernelError> {
    rows.into_iter().map(BookingEntry::try_from).collect()
}

const ENTRY_SELECT: &str = r#"
    SELECT b.id, b.user_id, b.venue_id, v.name AS venue_name, b.booking_date, b.start_time,
           b.duration_hours, b.number_of_people, b.customer_name, b.customer_phone,
           b.customer_address, b.customer_age, b.base_price, b.discount_percent, b.status,
           b.special_requests, b.created_at, b.updated_at
    FROM bookings b
    JOIN venues v ON v.id = b.venue_id
"#;

pub(in crate::database) struct PgBookingInternal;

impl PgBookingInternal {
    async fn find_entry_by_id(
        con: &mut PgConnection,
        id: &BookingId,
    ) -> error_stack::Result<Option<BookingEntry>, KernelError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            // language=postgresql
            "{ENTRY_SELECT} WHERE b.id = $1"
        ))
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(BookingEntry::try_from).transpose()
    }

    async fn find_by_user(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<BookingEntry>, KernelError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            // language=postgresql
            "{ENTRY_SELECT} WHERE b.user_id = $1 ORDER BY b.created_at DESC"
        ))
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        into_entries(rows)
    }

    async fn find_recent(
        con: &mut PgConnection,
        status: Option<&BookingStatus>,
        limit: &SelectLimit,
    ) -> error_stack::Result<Vec<BookingEntry>, KernelError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            // language=postgresql
            "{ENTRY_SELECT} WHERE ($1::VARCHAR IS NULL OR b.status = $1) ORDER BY b.created_at DESC LIMIT $2"
        ))
        .bind(status.map(BookingStatus::as_str))
        .bind(limit.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        into_entries(rows)
    }

    async fn count(
        con: &mut PgConnection,
        status: Option<&BookingStatus>,
    ) -> error_stack::Result<i64, KernelError> {
        // language=postgresql
        let (count,) = sqlx::query_as::<_, (i64,)>(
            r#"
            SELECT COUNT(*)
            FROM bookings
            WHERE ($1::VARCHAR IS NULL OR status = $1)
            "#,
        )
        .bind(status.map(BookingStatus::as_str))
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(count)
    }

    async fn create(con: &mut PgConnection, booking: &Booking) -> error_stack::Result<(), KernelError> {
        let customer = booking.customer();
        let price = booking.price();
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO bookings (id, user_id, venue_id, booking_date, start_time, duration_hours,
                                  number_of_people, customer_name, customer_phone,
                                  customer_address, customer_age, base_price, discount_percent,
                                  discount_amount, total_price, status, special_requests,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            "#,
        )
        .bind(booking.id().as_ref())
        .bind(booking.user_id().as_ref())
        .bind(booking.venue_id().as_ref())
        .bind(booking.date().as_ref())
        .bind(booking.start_time().as_ref())
        .bind(booking.duration().as_ref())
        .bind(booking.headcount().as_ref())
        .bind(customer.name().as_ref())
        .bind(customer.phone().as_ref())
        .bind(customer.address().as_ref())
        .bind(customer.age().as_ref())
        .bind(price.base_price().as_ref())
        .bind(price.discount_percent().as_ref())
        .bind(price.discount_amount().as_ref())
        .bind(price.total_price().as_ref())
        .bind(booking.status().as_str())
        .bind(booking.special_request().as_ref())
        .bind(booking.created_at().as_ref())
        .bind(booking.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, booking: &Booking) -> error_stack::Result<(), KernelError> {
        let price = booking.price();
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE bookings
            SET status = $2, base_price = $3, discount_percent = $4, discount_amount = $5,
                total_price = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(booking.id().as_ref())
        .bind(booking.status().as_str())
        .bind(price.base_price().as_ref())
        .bind(price.discount_percent().as_ref())
        .bind(price.discount_amount().as_ref())
        .bind(price.total_price().as_ref())
        .bind(booking.updated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
