use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln, References};

use crate::entity::common::{Address, PhoneNumber};
use crate::entity::Age;
use crate::{FieldViolation, KernelError};

pub const CUSTOMER_NAME_MAX_LENGTH: usize = 200;
pub const MIN_HEADCOUNT: i32 = 1;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CustomerName(String);

impl CustomerName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn parse(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(
                FieldViolation::new("customer_name", "This field is required.").into_report(),
            );
        }
        if trimmed.chars().count() > CUSTOMER_NAME_MAX_LENGTH {
            return Err(FieldViolation::new(
                "customer_name",
                format!("Ensure this value has at most {CUSTOMER_NAME_MAX_LENGTH} characters."),
            )
            .into_report());
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Headcount(i32);

impl Headcount {
    pub fn new(count: impl Into<i32>) -> Self {
        Self(count.into())
    }

    pub fn parse(count: i32) -> error_stack::Result<Self, KernelError> {
        if count < MIN_HEADCOUNT {
            return Err(FieldViolation::new(
                "number_of_people",
                format!("Ensure this value is greater than or equal to {MIN_HEADCOUNT}."),
            )
            .into_report());
        }
        Ok(Self(count))
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize, Fromln, AsRefln)]
pub struct SpecialRequest(String);

impl SpecialRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into().trim().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_option(&self) -> Option<&str> {
        (!self.0.is_empty()).then_some(self.0.as_str())
    }
}

/// Contact details captured on the booking form; may differ from the account's profile.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References)]
pub struct Customer {
    name: CustomerName,
    phone: PhoneNumber,
    address: Address,
    age: Age,
}

impl Customer {
    pub fn new(name: CustomerName, phone: PhoneNumber, address: Address, age: Age) -> Self {
        Self {
            name,
            phone,
            address,
            age,
        }
    }
}
