use std::ops::Deref;
use std::sync::Arc;

use driver::database::{
    PostgresBookingRepository, PostgresBookingStatisticsRepository, PostgresConnection,
    PostgresDatabase, PostgresProfileRepository, PostgresUserRepository, PostgresVenueRepository,
};
use driver::notify::TelegramNotifier;
use kernel::interface::database::DatabaseConnection;
use kernel::interface::notify::DependOnBookingNotifier;
use kernel::interface::query::{
    DependOnBookingQuery, DependOnBookingStatisticsQuery, DependOnProfileQuery, DependOnUserQuery,
    DependOnVenueQuery,
};
use kernel::interface::update::{
    DependOnBookingModifier, DependOnProfileModifier, DependOnUserModifier, DependOnVenueModifier,
};
use kernel::KernelError;
use time::UtcOffset;
use vodca::References;

use crate::config::Config;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new(config: &Config) -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init(config).await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    pgpool: PostgresDatabase,
    notifier: TelegramNotifier,
    admin_token: Option<String>,
    utc_offset: UtcOffset,
}

impl Handler {
    pub async fn init(config: &Config) -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;
        pgpool.migrate().await?;
        let notifier = TelegramNotifier::from_env();
        if !notifier.is_enabled() {
            tracing::info!("telegram notifications are disabled");
        }

        Ok(Self {
            pgpool,
            notifier,
            admin_token: config.admin_token.clone(),
            utc_offset: config.utc_offset,
        })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for Handler {
    type Transaction = PostgresConnection;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        self.pgpool.transact().await
    }
}

impl DependOnVenueQuery for Handler {
    type VenueQuery = PostgresVenueRepository;
    fn venue_query(&self) -> &Self::VenueQuery {
        &PostgresVenueRepository
    }
}

impl DependOnVenueModifier for Handler {
    type VenueModifier = PostgresVenueRepository;
    fn venue_modifier(&self) -> &Self::VenueModifier {
        &PostgresVenueRepository
    }
}

impl DependOnBookingQuery for Handler {
    type BookingQuery = PostgresBookingRepository;
    fn booking_query(&self) -> &Self::BookingQuery {
        &PostgresBookingRepository
    }
}

impl DependOnBookingModifier for Handler {
    type BookingModifier = PostgresBookingRepository;
    fn booking_modifier(&self) -> &Self::BookingModifier {
        &PostgresBookingRepository
    }
}

impl DependOnUserQuery for Handler {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &PostgresUserRepository
    }
}

impl DependOnUserModifier for Handler {
    type UserModifier = PostgresUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &PostgresUserRepository
    }
}

impl DependOnProfileQuery for Handler {
    type ProfileQuery = PostgresProfileRepository;
    fn profile_query(&self) -> &Self::ProfileQuery {
        &PostgresProfileRepository
    }
}

impl DependOnProfileModifier for Handler {
    type ProfileModifier = PostgresProfileRepository;
    fn profile_modifier(&self) -> &Self::ProfileModifier {
        &PostgresProfileRepository
    }
}

impl DependOnBookingStatisticsQuery for Handler {
    type BookingStatisticsQuery = PostgresBookingStatisticsRepository;
    fn booking_statistics_query(&self) -> &Self::BookingStatisticsQuery {
        &PostgresBookingStatisticsRepository
    }
}

impl DependOnBookingNotifier for Handler {
    type BookingNotifier = TelegramNotifier;
    fn booking_notifier(&self) -> &Self::BookingNotifier {
        &self.notifier
    }
}
