use std::str::FromStr;

use error_stack::Report;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{BrowseVenueDto, CreateVenueDto, GetVenueDto, UpdateVenueDto};
use kernel::prelude::entity::Amenities;
use kernel::{FieldViolation, KernelError, Violations};

use crate::controller::{Intake, TryIntake};

/// Pages outside the available range are clamped by the service.
#[derive(Debug, Default, Deserialize)]
pub struct BrowseVenueRequest {
    search: Option<String>,
    min_price: Option<String>,
    max_price: Option<String>,
    has_sauna: Option<String>,
    has_cafe: Option<String>,
    page: Option<i64>,
}

#[derive(Debug)]
pub struct GetVenueRequest {
    id: Uuid,
}

impl GetVenueRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AmenitiesRequest {
    #[serde(default)]
    sauna: bool,
    #[serde(default)]
    cafe: bool,
    #[serde(default)]
    sports_area: bool,
    #[serde(default)]
    parking: bool,
    #[serde(default)]
    wifi: bool,
}

impl From<AmenitiesRequest> for Amenities {
    fn from(value: AmenitiesRequest) -> Self {
        Amenities {
            sauna: value.sauna,
            cafe: value.cafe,
            sports_area: value.sports_area,
            parking: value.parking,
            wifi: value.wifi,
        }
    }
}

fn active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CreateVenueRequest {
    name: String,
    #[serde(default)]
    description: String,
    address: String,
    hourly_rate: Decimal,
    capacity: i32,
    opening_time: String,
    closing_time: String,
    #[serde(default)]
    amenities: AmenitiesRequest,
    #[serde(default)]
    children_discount: i32,
    #[serde(default)]
    group_discount: i32,
    #[serde(default)]
    rules: String,
    #[serde(default = "active")]
    is_active: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateVenueRequest {
    name: Option<String>,
    description: Option<String>,
    address: Option<String>,
    hourly_rate: Option<Decimal>,
    capacity: Option<i32>,
    opening_time: Option<String>,
    closing_time: Option<String>,
    amenities: Option<AmenitiesRequest>,
    children_discount: Option<i32>,
    group_discount: Option<i32>,
    rules: Option<String>,
    is_active: Option<bool>,
}

/// Checkbox semantics: present and not explicitly off.
fn flag(value: Option<String>) -> bool {
    value
        .map(|value| !matches!(value.trim(), "" | "0" | "false" | "off"))
        .unwrap_or(false)
}

fn price(violations: &mut Violations, field: &'static str, raw: Option<String>) -> Option<Decimal> {
    let raw = raw.filter(|raw| !raw.trim().is_empty())?;
    match Decimal::from_str(raw.trim()) {
        Ok(price) => Some(price),
        Err(_) => {
            violations.push(FieldViolation::new(field, "Enter a number."));
            None
        }
    }
}

pub struct VenueTransformer;

impl Intake<GetVenueRequest> for VenueTransformer {
    type To = GetVenueDto;
    fn emit(&self, input: GetVenueRequest) -> Self::To {
        GetVenueDto { id: input.id }
    }
}

impl TryIntake<BrowseVenueRequest> for VenueTransformer {
    type To = BrowseVenueDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: BrowseVenueRequest) -> Result<Self::To, Self::Error> {
        let mut violations = Violations::default();
        let min_price = price(&mut violations, "min_price", input.min_price);
        let max_price = price(&mut violations, "max_price", input.max_price);
        violations.finish()?;
        Ok(BrowseVenueDto {
            search: input.search.filter(|search| !search.trim().is_empty()),
            min_price,
            max_price,
            has_sauna: flag(input.has_sauna),
            has_cafe: flag(input.has_cafe),
            page: input.page,
        })
    }
}

impl Intake<CreateVenueRequest> for VenueTransformer {
    type To = CreateVenueDto;
    fn emit(&self, input: CreateVenueRequest) -> Self::To {
        CreateVenueDto {
            name: input.name,
            description: input.description,
            address: input.address,
            hourly_rate: input.hourly_rate,
            capacity: input.capacity,
            opening_time: input.opening_time,
            closing_time: input.closing_time,
            amenities: input.amenities.into(),
            children_discount: input.children_discount,
            group_discount: input.group_discount,
            rules: input.rules,
            is_active: input.is_active,
        }
    }
}

impl Intake<(Uuid, UpdateVenueRequest)> for VenueTransformer {
    type To = UpdateVenueDto;
    fn emit(&self, input: (Uuid, UpdateVenueRequest)) -> Self::To {
        let (id, input) = input;
        UpdateVenueDto {
            id,
            name: input.name,
            description: input.description,
            address: input.address,
            hourly_rate: input.hourly_rate,
            capacity: input.capacity,
            opening_time: input.opening_time,
            closing_time: input.closing_time,
            amenities: input.amenities.map(Amenities::from),
            children_discount: input.children_discount,
            group_discount: input.group_discount,
            rules: input.rules,
            is_active: input.is_active,
        }
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;

    use kernel::FieldViolation;

    use super::{BrowseVenueRequest, UpdateVenueRequest, VenueTransformer};
    use crate::controller::{Intake, TryIntake};

    #[test]
    fn browse_filters_are_parsed_leniently() {
        let request = BrowseVenueRequest {
            search: Some("  ".to_string()),
            min_price: Some("50000".to_string()),
            max_price: Some(String::new()),
            has_sauna: Some("on".to_string()),
            has_cafe: Some("false".to_string()),
            page: Some(0),
        };
        let dto = TryIntake::emit(&VenueTransformer, request).unwrap();
        assert_eq!(dto.search, None);
        assert_eq!(dto.min_price, Some(dec!(50000)));
        assert_eq!(dto.max_price, None);
        assert!(dto.has_sauna);
        assert!(!dto.has_cafe);
        assert_eq!(dto.page, Some(0));
    }

    #[test]
    fn bad_price_filter_is_a_field_error() {
        let request = BrowseVenueRequest {
            min_price: Some("cheap".to_string()),
            ..Default::default()
        };
        let report = TryIntake::emit(&VenueTransformer, request).unwrap_err();
        assert_eq!(FieldViolation::collect(&report)[0].field(), "min_price");
    }

    #[test]
    fn venue_times_are_passed_as_written() {
        let request = UpdateVenueRequest {
            closing_time: Some("25:00".to_string()),
            ..Default::default()
        };
        let dto = Intake::emit(&VenueTransformer, (uuid::Uuid::new_v4(), request));
        assert_eq!(dto.closing_time.as_deref(), Some("25:00"));
        assert_eq!(dto.opening_time, None);
    }
}
