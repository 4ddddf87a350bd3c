use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{SelectLimit, SelectOffset, Venue, VenueFilter, VenueId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait VenueQuery: Sync + Send + 'static {
    type Transaction: Transaction;
    /// Finds a venue whether or not it is active.
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &VenueId,
    ) -> error_stack::Result<Option<Venue>, KernelError>;

    /// Active venues matching the filter, newest first. `None` returns every match.
    async fn find_active(
        &self,
        con: &mut Self::Transaction,
        filter: &VenueFilter,
        limit: Option<&SelectLimit>,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Venue>, KernelError>;

    async fn count_active(
        &self,
        con: &mut Self::Transaction,
        filter: &VenueFilter,
    ) -> error_stack::Result<i64, KernelError>;
}

pub trait DependOnVenueQuery: Sync + Send + 'static + DependOnDatabaseConnection {
    type VenueQuery: VenueQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn venue_query(&self) -> &Self::VenueQuery;
}
