use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::{FieldViolation, KernelError};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct VenueCapacity(i32);

impl VenueCapacity {
    pub fn new(capacity: impl Into<i32>) -> Self {
        Self(capacity.into())
    }

    pub fn parse(capacity: i32) -> error_stack::Result<Self, KernelError> {
        if capacity < 1 {
            return Err(FieldViolation::new(
                "capacity",
                "Ensure this value is greater than or equal to 1.",
            )
            .into_report());
        }
        Ok(Self(capacity))
    }
}
