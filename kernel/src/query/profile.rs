use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{UserId, UserProfile};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ProfileQuery: Sync + Send + 'static {
    type Transaction: Transaction;
    async fn find_by_user_id(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
    ) -> error_stack::Result<Option<UserProfile>, KernelError>;
}

pub trait DependOnProfileQuery: Sync + Send + 'static + DependOnDatabaseConnection {
    type ProfileQuery: ProfileQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn profile_query(&self) -> &Self::ProfileQuery;
}
