use rust_decimal::Decimal;
use time::{OffsetDateTime, Time};
use uuid::Uuid;

use kernel::prelude::entity::{Amenities, DestructVenue, Venue};

pub const VENUES_PER_PAGE: i64 = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub address: String,
    pub hourly_rate: Decimal,
    pub capacity: i32,
    pub opening_time: Time,
    pub closing_time: Time,
    pub amenities: Amenities,
    pub children_discount: i32,
    pub group_discount: i32,
    pub rules: String,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
}

impl From<Venue> for VenueDto {
    fn from(value: Venue) -> Self {
        let DestructVenue {
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
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            address: address.into(),
            hourly_rate: hourly_rate.into(),
            capacity: capacity.into(),
            opening_time: (*hours.opening_time()).into(),
            closing_time: (*hours.closing_time()).into(),
            amenities,
            children_discount: (*discounts.children()).into(),
            group_discount: (*discounts.group()).into(),
            rules: rules.into(),
            is_active,
            created_at: created_at.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetVenueDto {
    pub id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct BrowseVenueDto {
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub has_sauna: bool,
    pub has_cafe: bool,
    pub page: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct VenuePageDto {
    pub venues: Vec<VenueDto>,
    pub page: i64,
    pub total_pages: i64,
    pub total: i64,
}

/// Opening and closing times arrive as text and are checked with the other fields.
#[derive(Debug, Clone)]
pub struct CreateVenueDto {
    pub name: String,
    pub description: String,
    pub address: String,
    pub hourly_rate: Decimal,
    pub capacity: i32,
    pub opening_time: String,
    pub closing_time: String,
    pub amenities: Amenities,
    pub children_discount: i32,
    pub group_discount: i32,
    pub rules: String,
    pub is_active: bool,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateVenueDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub hourly_rate: Option<Decimal>,
    pub capacity: Option<i32>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub amenities: Option<Amenities>,
    pub children_discount: Option<i32>,
    pub group_discount: Option<i32>,
    pub rules: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct DeleteVenueDto {
    pub id: Uuid,
}
