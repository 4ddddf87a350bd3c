use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::UserProfile;
use crate::KernelError;

#[async_trait::async_trait]
pub trait ProfileModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        profile: &UserProfile,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        profile: &UserProfile,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnProfileModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type ProfileModifier: ProfileModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn profile_modifier(&self) -> &Self::ProfileModifier;
}
