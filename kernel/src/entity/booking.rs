mod customer;
mod id;
mod price;
mod schedule;
mod status;

pub use self::{customer::*, id::*, price::*, schedule::*, status::*};
use crate::entity::common::{CreatedAt, TimeOfDay, UpdatedAt};
use crate::entity::{DiscountRules, UserId, Venue, VenueId, VenueName};
use destructure::Destructure;
use time::OffsetDateTime;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Booking {
    id: BookingId,
    user_id: UserId,
    venue_id: VenueId,
    date: BookingDate,
    start_time: TimeOfDay,
    duration: DurationHours,
    headcount: Headcount,
    customer: Customer,
    price: PriceBreakdown,
    status: BookingStatus,
    special_request: SpecialRequest,
    created_at: CreatedAt<Booking>,
    updated_at: UpdatedAt<Booking>,
}

/// Validated form input for a new booking.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookingDraft {
    pub date: BookingDate,
    pub start_time: TimeOfDay,
    pub duration: DurationHours,
    pub headcount: Headcount,
    pub customer: Customer,
    pub special_request: SpecialRequest,
}

impl Booking {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookingId,
        user_id: UserId,
        venue_id: VenueId,
        date: BookingDate,
        start_time: TimeOfDay,
        duration: DurationHours,
        headcount: Headcount,
        customer: Customer,
        price: PriceBreakdown,
        status: BookingStatus,
        special_request: SpecialRequest,
        created_at: CreatedAt<Booking>,
        updated_at: UpdatedAt<Booking>,
    ) -> Self {
        Self {
            id,
            user_id,
            venue_id,
            date,
            start_time,
            duration,
            headcount,
            customer,
            price,
            status,
            special_request,
            created_at,
            updated_at,
        }
    }

    /// A fresh pending booking priced from the venue's current rate and discounts.
    pub fn place(id: BookingId, user_id: UserId, venue: &Venue, draft: BookingDraft, now: OffsetDateTime) -> Self {
        let price = PriceBreakdown::calculate(
            venue.hourly_rate(),
            &draft.duration,
            &draft.headcount,
            draft.customer.age(),
            venue.discounts(),
        );
        Self::new(
            id,
            user_id,
            venue.id().clone(),
            draft.date,
            draft.start_time,
            draft.duration,
            draft.headcount,
            draft.customer,
            price,
            BookingStatus::Pending,
            draft.special_request,
            CreatedAt::new(now),
            UpdatedAt::new(now),
        )
    }

    pub fn change_status(self, status: BookingStatus, now: OffsetDateTime) -> Self {
        self.reconstruct(|b| {
            b.status = status;
            b.updated_at = UpdatedAt::new(now);
        })
    }

    /// Re-applies discount rules on save. The stored base price is kept as is.
    pub fn reprice(self, rules: &DiscountRules) -> Self {
        self.reconstruct(|b| {
            let percent = rules.applicable_percent(b.customer.age(), &b.headcount);
            b.price = PriceBreakdown::from_base(*b.price.base_price(), percent);
        })
    }
}

/// A booking together with the name of the venue it was made for, as shown in lists.
#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct BookingEntry {
    booking: Booking,
    venue_name: VenueName,
}

impl BookingEntry {
    pub fn new(booking: Booking, venue_name: VenueName) -> Self {
        Self {
            booking,
            venue_name,
        }
    }

    pub fn into_booking(self) -> Booking {
        self.booking
    }
}

#[cfg(test)]
mod test {
    use super::{
        Booking, BookingDate, BookingDraft, BookingId, BookingStatus, Customer, CustomerName,
        DurationHours, Headcount, SpecialRequest,
    };
    use crate::entity::{
        Address, Age, Amenities, CreatedAt, DiscountPercent, DiscountRules, OpeningHours,
        PhoneNumber, Price, TimeOfDay, UserId, Venue, VenueCapacity, VenueDescription, VenueId,
        VenueName, VenueRules,
    };
    use rust_decimal_macros::dec;
    use time::macros::{date, datetime, time};
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn venue(rate: rust_decimal::Decimal, children: i32, group: i32) -> Venue {
        Venue::new(
            VenueId::new(Uuid::new_v4()),
            VenueName::new("Aqua Park"),
            VenueDescription::new("Heated indoor pool"),
            Address::new("Tashkent, Chilonzor 7"),
            Price::new(rate),
            VenueCapacity::new(40),
            OpeningHours::new(TimeOfDay::new(time!(8:00)), TimeOfDay::new(time!(22:00))),
            Amenities::default(),
            DiscountRules::new(
                DiscountPercent::parse("children_discount", children).unwrap(),
                DiscountPercent::parse("group_discount", group).unwrap(),
            ),
            VenueRules::new(""),
            true,
            CreatedAt::new(OffsetDateTime::UNIX_EPOCH),
        )
    }

    fn draft(headcount: i32, age: i32) -> BookingDraft {
        BookingDraft {
            date: BookingDate::new(date!(2025 - 07 - 01)),
            start_time: TimeOfDay::new(time!(10:00)),
            duration: DurationHours::new(2),
            headcount: Headcount::new(headcount),
            customer: Customer::new(
                CustomerName::new("Aziza Karimova"),
                PhoneNumber::new("+998901234567"),
                Address::new("Tashkent"),
                Age::new(age),
            ),
            special_request: SpecialRequest::default(),
        }
    }

    #[test]
    fn placed_booking_is_pending_and_priced() {
        let now = datetime!(2025-06-20 09:00 UTC);
        let booking = Booking::place(
            BookingId::generate(),
            UserId::new(Uuid::new_v4()),
            &venue(dec!(100000), 0, 15),
            draft(6, 30),
            now,
        );
        assert_eq!(booking.status(), &BookingStatus::Pending);
        assert_eq!(booking.price().total_price(), &Price::new(dec!(170000)));
        assert_eq!(booking.created_at(), &CreatedAt::new(now));
    }

    #[test]
    fn status_change_is_idempotent() {
        let booking = Booking::place(
            BookingId::generate(),
            UserId::new(Uuid::new_v4()),
            &venue(dec!(100000), 0, 0),
            draft(2, 30),
            datetime!(2025-06-20 09:00 UTC),
        );
        let later = datetime!(2025-06-21 12:00 UTC);
        let once = booking.change_status(BookingStatus::Confirmed, later);
        let twice = once.clone().change_status(BookingStatus::Confirmed, later);
        assert_eq!(once, twice);
        assert_eq!(twice.status(), &BookingStatus::Confirmed);

        let back = twice.change_status(BookingStatus::Pending, later);
        assert_eq!(back.status(), &BookingStatus::Pending);
    }

    #[test]
    fn reprice_keeps_base_price() {
        let booking = Booking::place(
            BookingId::generate(),
            UserId::new(Uuid::new_v4()),
            &venue(dec!(100000), 0, 0),
            draft(6, 30),
            datetime!(2025-06-20 09:00 UTC),
        );
        let rules = DiscountRules::new(
            DiscountPercent::none(),
            DiscountPercent::parse("group_discount", 10).unwrap(),
        );
        let repriced = booking.reprice(&rules);
        assert_eq!(repriced.price().base_price(), &Price::new(dec!(200000)));
        assert_eq!(repriced.price().total_price(), &Price::new(dec!(180000)));
    }
}
