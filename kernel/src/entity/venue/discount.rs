use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln, References};

use crate::entity::{Age, Headcount};
use crate::{FieldViolation, KernelError};

pub const CHILD_AGE_LIMIT: i32 = 18;
pub const GROUP_SIZE_THRESHOLD: i32 = 5;

/// Whole percent in `0..=100`.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize, Fromln, AsRefln,
)]
pub struct DiscountPercent(i32);

impl DiscountPercent {
    pub fn new(percent: impl Into<i32>) -> Self {
        Self(percent.into())
    }

    pub fn none() -> Self {
        Self(0)
    }

    pub fn parse(field: &'static str, percent: i32) -> error_stack::Result<Self, KernelError> {
        if !(0..=100).contains(&percent) {
            return Err(FieldViolation::new(
                field,
                "Ensure this value is between 0 and 100.",
            )
            .into_report());
        }
        Ok(Self(percent))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize, References)]
pub struct DiscountRules {
    children: DiscountPercent,
    group: DiscountPercent,
}

impl DiscountRules {
    pub fn new(children: DiscountPercent, group: DiscountPercent) -> Self {
        Self { children, group }
    }

    /// Child and group discounts never stack; the larger one wins.
    pub fn applicable_percent(&self, age: &Age, headcount: &Headcount) -> DiscountPercent {
        let mut percent = DiscountPercent::none();
        if *age.as_ref() < CHILD_AGE_LIMIT && !self.children.is_zero() {
            percent = percent.max(self.children);
        }
        if *headcount.as_ref() >= GROUP_SIZE_THRESHOLD && !self.group.is_zero() {
            percent = percent.max(self.group);
        }
        percent
    }
}
