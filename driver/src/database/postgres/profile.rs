use sqlx::types::time::OffsetDateTime;
use sqlx::types::Uuid;
use sqlx::PgConnection;

use kernel::interface::query::ProfileQuery;
use kernel::interface::update::ProfileModifier;
use kernel::prelude::entity::{Address, Age, CreatedAt, PhoneNumber, UserId, UserProfile};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresProfileRepository;

#[async_trait::async_trait]
impl ProfileQuery for PostgresProfileRepository {
    type Transaction = PostgresConnection;

    async fn find_by_user_id(
        &self,
        con: &mut PostgresConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Option<UserProfile>, KernelError> {
        PgProfileInternal::find_by_user_id(con, user_id).await
    }
}

#[async_trait::async_trait]
impl ProfileModifier for PostgresProfileRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        profile: &UserProfile,
    ) -> error_stack::Result<(), KernelError> {
        PgProfileInternal::create(con, profile).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        profile: &UserProfile,
    ) -> error_stack::Result<(), KernelError> {
        PgProfileInternal::update(con, profile).await
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: Uuid,
    phone: String,
    address: String,
    age: Option<i32>,
    created_at: OffsetDateTime,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        UserProfile::new(
            UserId::new(row.user_id),
            PhoneNumber::new(row.phone),
            Address::new(row.address),
            row.age.map(Age::new),
            CreatedAt::new(row.created_at),
        )
    }
}

pub(in crate::database) struct PgProfileInternal;

impl PgProfileInternal {
    async fn find_by_user_id(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Option<UserProfile>, KernelError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            // language=postgresql
            r#"
            SELECT user_id, phone, address, age, created_at
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(UserProfile::from))
    }

    async fn create(
        con: &mut PgConnection,
        profile: &UserProfile,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO user_profiles (user_id, phone, address, age, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(profile.user_id().as_ref())
        .bind(profile.phone().as_ref())
        .bind(profile.address().as_ref())
        .bind(profile.age().map(|age| *age.as_ref()))
        .bind(profile.created_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(
        con: &mut PgConnection,
        profile: &UserProfile,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE user_profiles
            SET phone = $2, address = $3, age = $4
            WHERE user_id = $1
            "#,
        )
        .bind(profile.user_id().as_ref())
        .bind(profile.phone().as_ref())
        .bind(profile.address().as_ref())
        .bind(profile.age().map(|age| *age.as_ref()))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
