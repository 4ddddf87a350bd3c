use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::{FieldViolation, KernelError};

pub const MIN_AGE: i32 = 1;
pub const MAX_AGE: i32 = 120;

#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Age(i32);

impl Age {
    pub fn new(age: impl Into<i32>) -> Self {
        Self(age.into())
    }

    pub fn parse(field: &'static str, age: i32) -> error_stack::Result<Self, KernelError> {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(FieldViolation::new(
                field,
                format!("Ensure this value is between {MIN_AGE} and {MAX_AGE}."),
            )
            .into_report());
        }
        Ok(Self(age))
    }
}
