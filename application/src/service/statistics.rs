use time::OffsetDateTime;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{BookingStatisticsQuery, DependOnBookingStatisticsQuery};
use kernel::KernelError;

use crate::transfer::StatisticsDto;

#[async_trait::async_trait]
pub trait BookingStatisticsService: 'static + Sync + Send + DependOnBookingStatisticsQuery {
    async fn booking_statistics(&self) -> error_stack::Result<StatisticsDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let statistics = self
            .booking_statistics_query()
            .aggregate(&mut connection, OffsetDateTime::now_utc().date())
            .await?;
        Ok(StatisticsDto::from(statistics))
    }
}

impl<T> BookingStatisticsService for T where T: DependOnBookingStatisticsQuery {}
