use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructUser, DestructUserProfile, User, UserProfile};

use crate::transfer::BookingDto;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            username,
            first_name,
            last_name,
            email,
        } = value.into_destruct();
        Self {
            id: id.into(),
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileDto {
    pub user: UserDto,
    pub phone: String,
    pub address: String,
    pub age: Option<i32>,
    pub created_at: OffsetDateTime,
    pub bookings: Vec<BookingDto>,
}

impl ProfileDto {
    pub(crate) fn new(user: User, profile: UserProfile, bookings: Vec<BookingDto>) -> Self {
        let DestructUserProfile {
            phone,
            address,
            age,
            created_at,
            ..
        } = profile.into_destruct();
        Self {
            user: UserDto::from(user),
            phone: phone.into(),
            address: address.into(),
            age: age.map(Into::into),
            created_at: created_at.into(),
            bookings,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetProfileDto {
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileDto {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub age: Option<i32>,
}
