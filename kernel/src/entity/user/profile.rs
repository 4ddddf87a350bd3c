use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::common::{Address, CreatedAt, PhoneNumber};
use crate::entity::{Age, UserId};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct UserProfile {
    user_id: UserId,
    phone: PhoneNumber,
    address: Address,
    age: Option<Age>,
    created_at: CreatedAt<UserProfile>,
}

impl UserProfile {
    pub fn new(
        user_id: UserId,
        phone: PhoneNumber,
        address: Address,
        age: Option<Age>,
        created_at: CreatedAt<UserProfile>,
    ) -> Self {
        Self {
            user_id,
            phone,
            address,
            age,
            created_at,
        }
    }

    /// The blank profile made the first time a user opens the profile page.
    pub fn empty(user_id: UserId, created_at: CreatedAt<UserProfile>) -> Self {
        Self::new(
            user_id,
            PhoneNumber::new(""),
            Address::new(""),
            None,
            created_at,
        )
    }
}
