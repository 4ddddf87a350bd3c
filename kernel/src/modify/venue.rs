use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Venue, VenueId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait VenueModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        venue: &Venue,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        venue: &Venue,
    ) -> error_stack::Result<(), KernelError>;
    /// Removes the venue together with its bookings.
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        venue_id: &VenueId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnVenueModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type VenueModifier: VenueModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn venue_modifier(&self) -> &Self::VenueModifier;
}
