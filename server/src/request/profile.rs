use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{GetProfileDto, UpdateProfileDto};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    address: String,
    age: Option<i32>,
}

pub struct ProfileTransformer;

impl Intake<Uuid> for ProfileTransformer {
    type To = GetProfileDto;
    fn emit(&self, input: Uuid) -> Self::To {
        GetProfileDto { user_id: input }
    }
}

impl Intake<(Uuid, UpdateProfileRequest)> for ProfileTransformer {
    type To = UpdateProfileDto;
    fn emit(&self, input: (Uuid, UpdateProfileRequest)) -> Self::To {
        let (user_id, input) = input;
        UpdateProfileDto {
            user_id,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            age: input.age,
        }
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use super::{ProfileTransformer, UpdateProfileRequest};
    use crate::controller::Intake;

    #[test]
    fn email_is_left_to_the_profile_service() {
        let request: UpdateProfileRequest = serde_json::from_value(serde_json::json!({
            "first_name": "Aziza",
            "last_name": "Karimova",
            "email": "aziza@localhost",
            "phone": "",
            "address": "",
            "age": 0
        }))
        .unwrap();
        let user_id = Uuid::new_v4();
        let dto = Intake::emit(&ProfileTransformer, (user_id, request));
        assert_eq!(dto.user_id, user_id);
        assert_eq!(dto.email, "aziza@localhost");
        assert_eq!(dto.age, Some(0));
    }
}
