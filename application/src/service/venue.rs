use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnVenueQuery, VenueQuery};
use kernel::interface::update::{DependOnVenueModifier, VenueModifier};
use kernel::prelude::entity::{
    Address, CreatedAt, DiscountPercent, DiscountRules, OpeningHours, Price, SelectLimit,
    SelectOffset, TimeOfDay, Venue, VenueCapacity, VenueDescription, VenueFilter, VenueId,
    VenueName, VenueRules,
};
use kernel::{KernelError, Violations};

use crate::transfer::{
    BrowseVenueDto, CreateVenueDto, DeleteVenueDto, GetVenueDto, UpdateVenueDto, VenueDto,
    VenuePageDto, VENUES_PER_PAGE,
};

#[async_trait::async_trait]
pub trait GetVenueService: 'static + Sync + Send + DependOnVenueQuery {
    /// Inactive venues are reported as missing.
    async fn get_venue(&self, dto: GetVenueDto) -> error_stack::Result<Option<VenueDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let venue = self
            .venue_query()
            .find_by_id(&mut connection, &VenueId::new(dto.id))
            .await?;
        Ok(venue.filter(|venue| *venue.is_active()).map(VenueDto::from))
    }
}

impl<T> GetVenueService for T where T: DependOnVenueQuery {}

#[async_trait::async_trait]
pub trait BrowseVenueService: 'static + Sync + Send + DependOnVenueQuery {
    async fn browse_venues(&self, dto: BrowseVenueDto) -> error_stack::Result<VenuePageDto, KernelError> {
        let filter = VenueFilter {
            search: dto
                .search
                .map(|search| search.trim().to_string())
                .filter(|search| !search.is_empty()),
            min_price: dto.min_price.map(Price::new),
            max_price: dto.max_price.map(Price::new),
            has_sauna: dto.has_sauna,
            has_cafe: dto.has_cafe,
        };
        let mut connection = self.database_connection().transact().await?;
        let total = self
            .venue_query()
            .count_active(&mut connection, &filter)
            .await?;
        let total_pages = page_count(total);
        let page = dto.page.unwrap_or(1).clamp(1, total_pages);
        let venues = self
            .venue_query()
            .find_active(
                &mut connection,
                &filter,
                Some(&SelectLimit::new(VENUES_PER_PAGE)),
                &SelectOffset::new((page - 1) * VENUES_PER_PAGE),
            )
            .await?;
        Ok(VenuePageDto {
            venues: venues.into_iter().map(VenueDto::from).collect(),
            page,
            total_pages,
            total,
        })
    }

    async fn list_active_venues(&self) -> error_stack::Result<Vec<VenueDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let venues = self
            .venue_query()
            .find_active(
                &mut connection,
                &VenueFilter::default(),
                None,
                &SelectOffset::default(),
            )
            .await?;
        Ok(venues.into_iter().map(VenueDto::from).collect())
    }
}

impl<T> BrowseVenueService for T where T: DependOnVenueQuery {}

/// An empty result still has one (empty) page.
fn page_count(total: i64) -> i64 {
    ((total + VENUES_PER_PAGE - 1) / VENUES_PER_PAGE).max(1)
}

#[async_trait::async_trait]
pub trait ManageVenueService:
    'static + Sync + Send + DependOnVenueQuery + DependOnVenueModifier
{
    #[tracing::instrument(skip_all, fields(name = %dto.name))]
    async fn create_venue(&self, dto: CreateVenueDto) -> error_stack::Result<VenueDto, KernelError> {
        let mut violations = Violations::default();
        let name = violations.check(VenueName::parse(dto.name));
        let address = violations.check(Address::parse("address", dto.address));
        let hourly_rate = violations.check(Price::parse("price_per_hour", dto.hourly_rate));
        let capacity = violations.check(VenueCapacity::parse(dto.capacity));
        let children = violations.check(DiscountPercent::parse(
            "children_discount",
            dto.children_discount,
        ));
        let group = violations.check(DiscountPercent::parse("group_discount", dto.group_discount));
        let opening = violations.check(TimeOfDay::parse_field("opening_time", &dto.opening_time));
        let closing = violations.check(TimeOfDay::parse_field("closing_time", &dto.closing_time));

        let (
            Some(name),
            Some(address),
            Some(hourly_rate),
            Some(capacity),
            Some(children),
            Some(group),
            Some(opening),
            Some(closing),
        ) = (name, address, hourly_rate, capacity, children, group, opening, closing)
        else {
            return Err(violations.into_report());
        };

        let venue = Venue::new(
            VenueId::new(Uuid::new_v4()),
            name,
            VenueDescription::new(dto.description),
            address,
            hourly_rate,
            capacity,
            OpeningHours::new(opening, closing),
            dto.amenities,
            DiscountRules::new(children, group),
            VenueRules::new(dto.rules),
            dto.is_active,
            CreatedAt::new(OffsetDateTime::now_utc()),
        );

        let mut connection = self.database_connection().transact().await?;
        self.venue_modifier().create(&mut connection, &venue).await?;
        connection.commit().await?;
        tracing::info!(venue_id = %venue.id(), "venue created");
        Ok(VenueDto::from(venue))
    }

    #[tracing::instrument(skip_all, fields(venue_id = %dto.id))]
    async fn update_venue(&self, dto: UpdateVenueDto) -> error_stack::Result<VenueDto, KernelError> {
        let mut violations = Violations::default();
        let name = dto.name.and_then(|name| violations.check(VenueName::parse(name)));
        let address = dto
            .address
            .and_then(|address| violations.check(Address::parse("address", address)));
        let hourly_rate = dto
            .hourly_rate
            .and_then(|rate| violations.check(Price::parse("price_per_hour", rate)));
        let capacity = dto
            .capacity
            .and_then(|capacity| violations.check(VenueCapacity::parse(capacity)));
        let children = dto.children_discount.and_then(|percent| {
            violations.check(DiscountPercent::parse("children_discount", percent))
        });
        let group = dto
            .group_discount
            .and_then(|percent| violations.check(DiscountPercent::parse("group_discount", percent)));
        let opening = dto
            .opening_time
            .and_then(|raw| violations.check(TimeOfDay::parse_field("opening_time", &raw)));
        let closing = dto
            .closing_time
            .and_then(|raw| violations.check(TimeOfDay::parse_field("closing_time", &raw)));
        violations.finish()?;

        let mut connection = self.database_connection().transact().await?;
        let id = VenueId::new(dto.id);
        let venue = self
            .venue_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable(format!("venue {id} not found"))
            })?;

        let venue = venue.reconstruct(|v| {
            if let Some(name) = name {
                v.name = name;
            }
            if let Some(description) = dto.description {
                v.description = VenueDescription::new(description);
            }
            if let Some(address) = address {
                v.address = address;
            }
            if let Some(hourly_rate) = hourly_rate {
                v.hourly_rate = hourly_rate;
            }
            if let Some(capacity) = capacity {
                v.capacity = capacity;
            }
            if opening.is_some() || closing.is_some() {
                v.hours = OpeningHours::new(
                    opening.unwrap_or(*v.hours.opening_time()),
                    closing.unwrap_or(*v.hours.closing_time()),
                );
            }
            if let Some(amenities) = dto.amenities {
                v.amenities = amenities;
            }
            if children.is_some() || group.is_some() {
                v.discounts = DiscountRules::new(
                    children.unwrap_or(*v.discounts.children()),
                    group.unwrap_or(*v.discounts.group()),
                );
            }
            if let Some(rules) = dto.rules {
                v.rules = VenueRules::new(rules);
            }
            if let Some(is_active) = dto.is_active {
                v.is_active = is_active;
            }
        });

        self.venue_modifier().update(&mut connection, &venue).await?;
        connection.commit().await?;
        Ok(VenueDto::from(venue))
    }

    #[tracing::instrument(skip_all, fields(venue_id = %dto.id))]
    async fn delete_venue(&self, dto: DeleteVenueDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = VenueId::new(dto.id);
        if self
            .venue_query()
            .find_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Err(
                Report::new(KernelError::NotFound).attach_printable(format!("venue {id} not found"))
            );
        }
        self.venue_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;
        tracing::info!("venue deleted with its bookings");
        Ok(())
    }
}

impl<T> ManageVenueService for T where T: DependOnVenueQuery + DependOnVenueModifier {}
