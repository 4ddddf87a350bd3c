use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Booking, BookingEntry, BookingId, BookingStatus, SelectLimit, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookingQuery: Sync + Send + 'static {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError>;

    async fn find_entry_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookingId,
    ) -> error_stack::Result<Option<BookingEntry>, KernelError>;

    async fn find_by_user(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<BookingEntry>, KernelError>;

    /// Most recently created first.
    async fn find_recent(
        &self,
        con: &mut Self::Transaction,
        status: Option<&BookingStatus>,
        limit: &SelectLimit,
    ) -> error_stack::Result<Vec<BookingEntry>, KernelError>;

    async fn count(
        &self,
        con: &mut Self::Transaction,
        status: Option<&BookingStatus>,
    ) -> error_stack::Result<i64, KernelError>;
}

pub trait DependOnBookingQuery: Sync + Send + 'static + DependOnDatabaseConnection {
    type BookingQuery: BookingQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn booking_query(&self) -> &Self::BookingQuery;
}
