use driver::database::{
    PostgresBookingRepository, PostgresBookingStatisticsRepository, PostgresConnection,
    PostgresDatabase, PostgresVenueRepository,
};
use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{
    DependOnBookingQuery, DependOnBookingStatisticsQuery, DependOnVenueQuery,
};
use kernel::interface::update::DependOnBookingModifier;
use kernel::KernelError;

/// Everything the admin commands reach through the application services.
#[derive(Clone)]
pub struct BotModule {
    pgpool: PostgresDatabase,
}

impl BotModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;
        Ok(Self { pgpool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for BotModule {
    type Transaction = PostgresConnection;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        self.pgpool.transact().await
    }
}

impl DependOnVenueQuery for BotModule {
    type VenueQuery = PostgresVenueRepository;
    fn venue_query(&self) -> &Self::VenueQuery {
        &PostgresVenueRepository
    }
}

impl DependOnBookingQuery for BotModule {
    type BookingQuery = PostgresBookingRepository;
    fn booking_query(&self) -> &Self::BookingQuery {
        &PostgresBookingRepository
    }
}

impl DependOnBookingModifier for BotModule {
    type BookingModifier = PostgresBookingRepository;
    fn booking_modifier(&self) -> &Self::BookingModifier {
        &PostgresBookingRepository
    }
}

impl DependOnBookingStatisticsQuery for BotModule {
    type BookingStatisticsQuery = PostgresBookingStatisticsRepository;
    fn booking_statistics_query(&self) -> &Self::BookingStatisticsQuery {
        &PostgresBookingStatisticsRepository
    }
}
