use time::Date;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::BookingStatistics;
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookingStatisticsQuery: Sync + Send + 'static {
    type Transaction: Transaction;
    /// Aggregates every booking; `today` anchors the daily and weekly windows.
    async fn aggregate(
        &self,
        con: &mut Self::Transaction,
        today: Date,
    ) -> error_stack::Result<BookingStatistics, KernelError>;
}

pub trait DependOnBookingStatisticsQuery:
    Sync + Send + 'static + DependOnDatabaseConnection
{
    type BookingStatisticsQuery: BookingStatisticsQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn booking_statistics_query(&self) -> &Self::BookingStatisticsQuery;
}
