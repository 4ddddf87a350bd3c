use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::{FieldViolation, KernelError};

pub const VENUE_NAME_MAX_LENGTH: usize = 200;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct VenueName(String);

impl VenueName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn parse(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(FieldViolation::new("name", "This field is required.").into_report());
        }
        if trimmed.chars().count() > VENUE_NAME_MAX_LENGTH {
            return Err(FieldViolation::new(
                "name",
                format!("Ensure this value has at most {VENUE_NAME_MAX_LENGTH} characters."),
            )
            .into_report());
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize, Fromln, AsRefln)]
pub struct VenueDescription(String);

impl VenueDescription {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize, Fromln, AsRefln)]
pub struct VenueRules(String);

impl VenueRules {
    pub fn new(rules: impl Into<String>) -> Self {
        Self(rules.into())
    }
}
