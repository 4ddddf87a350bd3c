use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::{FieldViolation, KernelError};

pub const PHONE_MAX_LENGTH: usize = 20;
pub const ADDRESS_MAX_LENGTH: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn parse(
        field: &'static str,
        phone: impl Into<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let phone = phone.into();
        let trimmed = phone.trim();
        if trimmed.is_empty() {
            return Err(FieldViolation::new(field, "This field is required.").into_report());
        }
        if trimmed.chars().count() > PHONE_MAX_LENGTH {
            return Err(FieldViolation::new(
                field,
                format!("Ensure this value has at most {PHONE_MAX_LENGTH} characters."),
            )
            .into_report());
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn parse(
        field: &'static str,
        address: impl Into<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let address = address.into();
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Err(FieldViolation::new(field, "This field is required.").into_report());
        }
        if trimmed.chars().count() > ADDRESS_MAX_LENGTH {
            return Err(FieldViolation::new(
                field,
                format!("Ensure this value has at most {ADDRESS_MAX_LENGTH} characters."),
            )
            .into_report());
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::{Address, PhoneNumber};
    use crate::{FieldViolation, KernelError};

    #[test]
    fn phone_is_trimmed() {
        let phone = PhoneNumber::parse("phone", "  +998 90 123 45 67 ").unwrap();
        assert_eq!(phone.as_ref(), "+998 90 123 45 67");
    }

    #[test]
    fn blank_address_points_at_field() {
        let report = Address::parse("customer_address", "   ").unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Invalid));
        let violation = report
            .frames()
            .find_map(|frame| frame.downcast_ref::<FieldViolation>())
            .unwrap();
        assert_eq!(violation.field(), "customer_address");
    }

    #[test]
    fn overlong_phone_is_rejected() {
        assert!(PhoneNumber::parse("phone", "1".repeat(21)).is_err());
    }
}
