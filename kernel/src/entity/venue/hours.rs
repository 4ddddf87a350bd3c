use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::common::TimeOfDay;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, References)]
pub struct OpeningHours {
    opening_time: TimeOfDay,
    closing_time: TimeOfDay,
}

impl OpeningHours {
    pub fn new(opening_time: TimeOfDay, closing_time: TimeOfDay) -> Self {
        Self {
            opening_time,
            closing_time,
        }
    }
}

impl std::fmt::Display for OpeningHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.opening_time, self.closing_time)
    }
}
