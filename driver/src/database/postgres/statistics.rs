use rust_decimal::Decimal;
use sqlx::types::time::Date;
use sqlx::types::Uuid;
use sqlx::PgConnection;
use time::Duration;

use error_stack::ResultExt;
use kernel::interface::query::BookingStatisticsQuery;
use kernel::prelude::entity::{
    BookingStatistics, BookingStatus, PeriodSummary, Price, StatusCount, VenueId, VenueName,
    VenuePopularity, TOP_VENUE_COUNT, WEEK_WINDOW_DAYS,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBookingStatisticsRepository;

#[async_trait::async_trait]
impl BookingStatisticsQuery for PostgresBookingStatisticsRepository {
    type Transaction = PostgresConnection;

    async fn aggregate(
        &self,
        con: &mut PostgresConnection,
        today: Date,
    ) -> error_stack::Result<BookingStatistics, KernelError> {
        PgBookingStatisticsInternal::aggregate(con, today).await
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    total: i64,
    revenue: Decimal,
    today_total: i64,
    today_revenue: Decimal,
    week_total: i64,
    week_revenue: Decimal,
}

#[derive(sqlx::FromRow)]
struct StatusRow {
    status: String,
    count: i64,
}

#[derive(sqlx::FromRow)]
struct PopularRow {
    venue_id: Uuid,
    name: String,
    bookings: i64,
}

pub(in crate::database) struct PgBookingStatisticsInternal;

impl PgBookingStatisticsInternal {
    async fn aggregate(
        con: &mut PgConnection,
        today: Date,
    ) -> error_stack::Result<BookingStatistics, KernelError> {
        let week_start = today - Duration::days(WEEK_WINDOW_DAYS);
        // language=postgresql
        let summary = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT COUNT(*) AS total,
                   COALESCE(SUM(total_price) FILTER (WHERE status = 'completed'), 0) AS revenue,
                   COUNT(*) FILTER (WHERE (created_at AT TIME ZONE 'UTC')::DATE = $1) AS today_total,
                   COALESCE(SUM(total_price) FILTER (
                       WHERE status = 'completed' AND (created_at AT TIME ZONE 'UTC')::DATE = $1
                   ), 0) AS today_revenue,
                   COUNT(*) FILTER (WHERE (created_at AT TIME ZONE 'UTC')::DATE >= $2) AS week_total,
                   COALESCE(SUM(total_price) FILTER (
                       WHERE status = 'completed' AND (created_at AT TIME ZONE 'UTC')::DATE >= $2
                   ), 0) AS week_revenue
            FROM bookings
            "#,
        )
        .bind(today)
        .bind(week_start)
        .fetch_one(&mut *con)
        .await
        .convert_error()?;

        // language=postgresql
        let statuses = sqlx::query_as::<_, StatusRow>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM bookings
            GROUP BY status
            "#,
        )
        .fetch_all(&mut *con)
        .await
        .convert_error()?;

        // language=postgresql
        let popular = sqlx::query_as::<_, PopularRow>(
            r#"
            SELECT v.id AS venue_id, v.name, COUNT(b.id) AS bookings
            FROM bookings b
            JOIN venues v ON v.id = b.venue_id
            GROUP BY v.id, v.name
            ORDER BY bookings DESC, v.name
            LIMIT $1
            "#,
        )
        .bind(TOP_VENUE_COUNT)
        .fetch_all(con)
        .await
        .convert_error()?;

        let by_status = statuses
            .into_iter()
            .map(|row| -> error_stack::Result<StatusCount, KernelError> {
                let status = row
                    .status
                    .parse::<BookingStatus>()
                    .change_context(KernelError::Internal)?;
                Ok(StatusCount::new(status, row.count))
            })
            .collect::<error_stack::Result<Vec<_>, KernelError>>()?;
        let top_venues = popular
            .into_iter()
            .map(|row| {
                VenuePopularity::new(VenueId::new(row.venue_id), VenueName::new(row.name), row.bookings)
            })
            .collect();

        Ok(BookingStatistics::new(
            summary.total,
            Price::new(summary.revenue),
            PeriodSummary::new(summary.today_total, Price::new(summary.today_revenue)),
            PeriodSummary::new(summary.week_total, Price::new(summary.week_revenue)),
            by_status,
            top_venues,
        ))
    }
}

#[cfg(test)]
mod test {
    use time::OffsetDateTime;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookingStatisticsQuery;
    use kernel::prelude::entity::BookingStatus;
    use kernel::KernelError;

    use crate::database::postgres::statistics::PostgresBookingStatisticsRepository;
    use crate::database::postgres::PostgresDatabase;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn statuses_are_always_complete() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let stats = PostgresBookingStatisticsRepository
            .aggregate(&mut con, OffsetDateTime::now_utc().date())
            .await?;
        assert_eq!(stats.by_status().len(), BookingStatus::ALL.len());
        assert!(stats.today().bookings() <= stats.week().bookings());
        assert!(stats.week().bookings() <= stats.total_bookings());
        assert!(stats.top_venues().len() <= 3);
        Ok(())
    }
}
