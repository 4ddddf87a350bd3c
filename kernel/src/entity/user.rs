mod age;
mod id;
mod name;
mod profile;

pub use self::{age::*, id::*, name::*, profile::*};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

/// Account owned by the external authentication service; only names and email are editable here.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct User {
    id: UserId,
    username: Username,
    first_name: PersonName,
    last_name: PersonName,
    email: Email,
}

impl User {
    pub fn new(
        id: UserId,
        username: Username,
        first_name: PersonName,
        last_name: PersonName,
        email: Email,
    ) -> Self {
        Self {
            id,
            username,
            first_name,
            last_name,
            email,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.as_ref(), self.last_name.as_ref())
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod test {
    use super::{Email, PersonName, User, UserId, Username};
    use uuid::Uuid;

    #[test]
    fn full_name_skips_missing_parts() {
        let user = User::new(
            UserId::new(Uuid::new_v4()),
            Username::new("aziza"),
            PersonName::new("Aziza"),
            PersonName::new(""),
            Email::new("aziza@example.com"),
        );
        assert_eq!(user.full_name(), "Aziza");
    }
}
