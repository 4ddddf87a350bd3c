use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::{FieldViolation, KernelError};

pub const PERSON_NAME_MAX_LENGTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn parse(field: &'static str, name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(FieldViolation::new(field, "This field is required.").into_report());
        }
        if trimmed.chars().count() > PERSON_NAME_MAX_LENGTH {
            return Err(FieldViolation::new(
                field,
                format!("Ensure this value has at most {PERSON_NAME_MAX_LENGTH} characters."),
            )
            .into_report());
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Shape check only: one `@` with something on both sides and a dot in the domain.
    pub fn parse(email: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let email = email.into();
        let trimmed = email.trim();
        let valid = match trimmed.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            }
            None => false,
        };
        if !valid {
            return Err(FieldViolation::new("email", "Enter a valid email address.").into_report());
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::{Email, PersonName};

    #[test]
    fn email_shape() {
        assert!(Email::parse("aziza@example.uz").is_ok());
        assert!(Email::parse("aziza@example").is_err());
        assert!(Email::parse("@example.uz").is_err());
        assert!(Email::parse("a@b@example.uz").is_err());
    }

    #[test]
    fn names_are_required() {
        assert!(PersonName::parse("first_name", " ").is_err());
        assert_eq!(
            PersonName::parse("first_name", " Bekzod ").unwrap().as_ref(),
            "Bekzod"
        );
    }
}
