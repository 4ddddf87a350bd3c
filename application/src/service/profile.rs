use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    BookingQuery, DependOnBookingQuery, DependOnProfileQuery, DependOnUserQuery, ProfileQuery,
    UserQuery,
};
use kernel::interface::update::{
    DependOnProfileModifier, DependOnUserModifier, ProfileModifier, UserModifier,
};
use kernel::prelude::entity::{
    Address, Age, CreatedAt, Email, PersonName, PhoneNumber, UserId, UserProfile,
};
use kernel::{KernelError, Violations};

use crate::transfer::{BookingDto, GetProfileDto, ProfileDto, UpdateProfileDto};

#[async_trait::async_trait]
pub trait ProfileService:
    'static
    + Sync
    + Send
    + DependOnUserQuery
    + DependOnUserModifier
    + DependOnProfileQuery
    + DependOnProfileModifier
    + DependOnBookingQuery
{
    /// Creates an empty profile the first time it is requested.
    #[tracing::instrument(skip_all, fields(user_id = %dto.user_id))]
    async fn get_profile(&self, dto: GetProfileDto) -> error_stack::Result<ProfileDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let user_id = UserId::new(dto.user_id);
        let user = self
            .user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("user {} not found", dto.user_id))
            })?;
        let profile = match self
            .profile_query()
            .find_by_user_id(&mut connection, &user_id)
            .await?
        {
            Some(profile) => profile,
            None => {
                let profile =
                    UserProfile::empty(user_id.clone(), CreatedAt::new(OffsetDateTime::now_utc()));
                self.profile_modifier()
                    .create(&mut connection, &profile)
                    .await?;
                tracing::debug!("created empty profile");
                profile
            }
        };
        let bookings = self
            .booking_query()
            .find_by_user(&mut connection, &user_id)
            .await?;
        connection.commit().await?;
        Ok(ProfileDto::new(
            user,
            profile,
            bookings.into_iter().map(BookingDto::from).collect(),
        ))
    }

    /// Writes the account names and email together with the profile contact fields.
    #[tracing::instrument(skip_all, fields(user_id = %dto.user_id))]
    async fn update_profile(&self, dto: UpdateProfileDto) -> error_stack::Result<ProfileDto, KernelError> {
        let mut violations = Violations::default();
        let first_name = violations.check(PersonName::parse("first_name", dto.first_name));
        let last_name = violations.check(PersonName::parse("last_name", dto.last_name));
        let email = violations.check(Email::parse(dto.email));
        let phone = violations.check(PhoneNumber::parse("phone", dto.phone));
        let address = violations.check(Address::parse("address", dto.address));
        let age = match dto.age {
            Some(age) => violations.check(Age::parse("age", age)).map(Some),
            None => Some(None),
        };
        let (Some(first_name), Some(last_name), Some(email), Some(phone), Some(address), Some(age)) =
            (first_name, last_name, email, phone, address, age)
        else {
            return Err(violations.into_report());
        };

        let mut connection = self.database_connection().transact().await?;
        let user_id = UserId::new(dto.user_id);
        let user = self
            .user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("user {} not found", dto.user_id))
            })?
            .reconstruct(|u| {
                u.first_name = first_name;
                u.last_name = last_name;
                u.email = email;
            });
        self.user_modifier().update(&mut connection, &user).await?;

        match self
            .profile_query()
            .find_by_user_id(&mut connection, &user_id)
            .await?
        {
            Some(profile) => {
                let profile = profile.reconstruct(|p| {
                    p.phone = phone;
                    p.address = address;
                    p.age = age;
                });
                self.profile_modifier()
                    .update(&mut connection, &profile)
                    .await?;
            }
            None => {
                let profile = UserProfile::new(
                    user_id,
                    phone,
                    address,
                    age,
                    CreatedAt::new(OffsetDateTime::now_utc()),
                );
                self.profile_modifier()
                    .create(&mut connection, &profile)
                    .await?;
            }
        }
        connection.commit().await?;
        tracing::info!("profile updated");

        self.get_profile(GetProfileDto {
            user_id: dto.user_id,
        })
        .await
    }
}

impl<T> ProfileService for T where
    T: DependOnUserQuery
        + DependOnUserModifier
        + DependOnProfileQuery
        + DependOnProfileModifier
        + DependOnBookingQuery
{
}
