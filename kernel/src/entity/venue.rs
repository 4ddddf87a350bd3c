mod amenity;
mod capacity;
mod discount;
mod hours;
mod id;
mod name;

pub use self::{amenity::*, capacity::*, discount::*, hours::*, id::*, name::*};
use crate::entity::common::{Address, CreatedAt, Price};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Venue {
    id: VenueId,
    name: VenueName,
    description: VenueDescription,
    address: Address,
    hourly_rate: Price,
    capacity: VenueCapacity,
    hours: OpeningHours,
    amenities: Amenities,
    discounts: DiscountRules,
    rules: VenueRules,
    is_active: bool,
    created_at: CreatedAt<Venue>,
}

impl Venue {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: VenueId,
        name: VenueName,
        description: VenueDescription,
        address: Address,
        hourly_rate: Price,
        capacity: VenueCapacity,
        hours: OpeningHours,
        amenities: Amenities,
        discounts: DiscountRules,
        rules: VenueRules,
        is_active: bool,
        created_at: CreatedAt<Venue>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            address,
            hourly_rate,
            capacity,
            hours,
            amenities,
            discounts,
            rules,
            is_active,
            created_at,
        }
    }
}

/// Browse filters; every field narrows the result set when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueFilter {
    pub search: Option<String>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub has_sauna: bool,
    pub has_cafe: bool,
}
