use rust_decimal::Decimal;
use sqlx::types::time::{OffsetDateTime, Time};
use sqlx::types::Uuid;
use sqlx::{PgConnection, Postgres, QueryBuilder};

use kernel::interface::query::VenueQuery;
use kernel::interface::update::VenueModifier;
use kernel::prelude::entity::{
    Address, Amenities, CreatedAt, DiscountPercent, DiscountRules, OpeningHours, Price,
    SelectLimit, SelectOffset, TimeOfDay, Venue, VenueCapacity, VenueDescription, VenueFilter,
    VenueId, VenueName, VenueRules,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresVenueRepository;

#[async_trait::async_trait]
impl VenueQuery for PostgresVenueRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &VenueId,
    ) -> error_stack::Result<Option<Venue>, KernelError> {
        PgVenueInternal::find_by_id(con, id).await
    }

    async fn find_active(
        &self,
        con: &mut PostgresConnection,
        filter: &VenueFilter,
        limit: Option<&SelectLimit>,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Venue>, KernelError> {
        PgVenueInternal::find_active(con, filter, limit, offset).await
    }

    async fn count_active(
        &self,
        con: &mut PostgresConnection,
        filter: &VenueFilter,
    ) -> error_stack::Result<i64, KernelError> {
        PgVenueInternal::count_active(con, filter).await
    }
}

#[async_trait::async_trait]
impl VenueModifier for PostgresVenueRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        venue: &Venue,
    ) -> error_stack::Result<(), KernelError> {
        PgVenueInternal::create(con, venue).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        venue: &Venue,
    ) -> error_stack::Result<(), KernelError> {
        PgVenueInternal::update(con, venue).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        venue_id: &VenueId,
    ) -> error_stack::Result<(), KernelError> {
        PgVenueInternal::delete(con, venue_id).await
    }
}

#[derive(sqlx::FromRow)]
struct VenueRow {
    id: Uuid,
    name: String,
    description: String,
    address: String,
    hourly_rate: Decimal,
    capacity: i32,
    opening_time: Time,
    closing_time: Time,
    has_sauna: bool,
    has_cafe: bool,
    has_sports_area: bool,
    has_parking: bool,
    has_wifi: bool,
    children_discount: i32,
    group_discount: i32,
    rules: String,
    is_active: bool,
    created_at: OffsetDateTime,
}

impl From<VenueRow> for Venue {
    fn from(row: VenueRow) -> Self {
        Venue::new(
            VenueId::new(row.id),
            VenueName::new(row.name),
            VenueDescription::new(row.description),
            Address::new(row.address),
            Price::new(row.hourly_rate),
            VenueCapacity::new(row.capacity),
            OpeningHours::new(
                TimeOfDay::new(row.opening_time),
                TimeOfDay::new(row.closing_time),
            ),
            Amenities {
                sauna: row.has_sauna,
                cafe: row.has_cafe,
                sports_area: row.has_sports_area,
                parking: row.has_parking,
                wifi: row.has_wifi,
            },
            DiscountRules::new(
                DiscountPercent::new(row.children_discount),
                DiscountPercent::new(row.group_discount),
            ),
            VenueRules::new(row.rules),
            row.is_active,
            CreatedAt::new(row.created_at),
        )
    }
}

const VENUE_COLUMNS: &str = "id, name, description, address, hourly_rate, capacity, \
    opening_time, closing_time, has_sauna, has_cafe, has_sports_area, has_parking, has_wifi, \
    children_discount, group_discount, rules, is_active, created_at";

/// Appends the `WHERE` clause shared by listing and counting.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &VenueFilter) {
    builder.push(" WHERE is_active = TRUE");
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search.replace('%', "\\%").replace('_', "\\_"));
        builder
            .push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR address ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(min) = &filter.min_price {
        builder.push(" AND hourly_rate >= ").push_bind(*min.as_ref());
    }
    if let Some(max) = &filter.max_price {
        builder.push(" AND hourly_rate <= ").push_bind(*max.as_ref());
    }
    if filter.has_sauna {
        builder.push(" AND has_sauna = TRUE");
    }
    if filter.has_cafe {
        builder.push(" AND has_cafe = TRUE");
    }
}

pub(in crate::database) struct PgVenueInternal;

impl PgVenueInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &VenueId,
    ) -> error_stack::Result<Option<Venue>, KernelError> {
        let row = sqlx::query_as::<_, VenueRow>(&format!(
            // language=postgresql
            "SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1"
        ))
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Venue::from))
    }

    async fn find_active(
        con: &mut PgConnection,
        filter: &VenueFilter,
        limit: Option<&SelectLimit>,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Venue>, KernelError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {VENUE_COLUMNS} FROM venues"));
        push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit.map(|limit| *limit.as_ref()))
            .push(" OFFSET ")
            .push_bind(*offset.as_ref());
        let rows = builder
            .build_query_as::<VenueRow>()
            .fetch_all(con)
            .await
            .convert_error()?;
        Ok(rows.into_iter().map(Venue::from).collect())
    }

    async fn count_active(
        con: &mut PgConnection,
        filter: &VenueFilter,
    ) -> error_stack::Result<i64, KernelError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM venues");
        push_filter(&mut builder, filter);
        let (count,) = builder
            .build_query_as::<(i64,)>()
            .fetch_one(con)
            .await
            .convert_error()?;
        Ok(count)
    }

    async fn create(con: &mut PgConnection, venue: &Venue) -> error_stack::Result<(), KernelError> {
        let amenities = venue.amenities();
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO venues (id, name, description, address, hourly_rate, capacity,
                                opening_time, closing_time, has_sauna, has_cafe, has_sports_area,
                                has_parking, has_wifi, children_discount, group_discount, rules,
                                is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(venue.id().as_ref())
        .bind(venue.name().as_ref())
        .bind(venue.description().as_ref())
        .bind(venue.address().as_ref())
        .bind(venue.hourly_rate().as_ref())
        .bind(venue.capacity().as_ref())
        .bind(venue.hours().opening_time().as_ref())
        .bind(venue.hours().closing_time().as_ref())
        .bind(amenities.sauna)
        .bind(amenities.cafe)
        .bind(amenities.sports_area)
        .bind(amenities.parking)
        .bind(amenities.wifi)
        .bind(venue.discounts().children().as_ref())
        .bind(venue.discounts().group().as_ref())
        .bind(venue.rules().as_ref())
        .bind(venue.is_active())
        .bind(venue.created_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, venue: &Venue) -> error_stack::Result<(), KernelError> {
        let amenities = venue.amenities();
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE venues
            SET name = $2, description = $3, address = $4, hourly_rate = $5, capacity = $6,
                opening_time = $7, closing_time = $8, has_sauna = $9, has_cafe = $10,
                has_sports_area = $11, has_parking = $12, has_wifi = $13,
                children_discount = $14, group_discount = $15, rules = $16, is_active = $17
            WHERE id = $1
            "#,
        )
        .bind(venue.id().as_ref())
        .bind(venue.name().as_ref())
        .bind(venue.description().as_ref())
        .bind(venue.address().as_ref())
        .bind(venue.hourly_rate().as_ref())
        .bind(venue.capacity().as_ref())
        .bind(venue.hours().opening_time().as_ref())
        .bind(venue.hours().closing_time().as_ref())
        .bind(amenities.sauna)
        .bind(amenities.cafe)
        .bind(amenities.sports_area)
        .bind(amenities.parking)
        .bind(amenities.wifi)
        .bind(venue.discounts().children().as_ref())
        .bind(venue.discounts().group().as_ref())
        .bind(venue.rules().as_ref())
        .bind(venue.is_active())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, venue_id: &VenueId) -> error_stack::Result<(), KernelError> {
        // bookings go with the venue through ON DELETE CASCADE
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM venues
            WHERE id = $1
            "#,
        )
        .bind(venue_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
