use time::macros::format_description;
use time::OffsetDateTime;

use kernel::prelude::entity::{BookingDate, Price, TimeOfDay};

use crate::transfer::{BookingDto, VenueDto};

pub const SITE_NAME: &str = "Poolly";
const LINE_WIDTH: usize = 72;
const LINES_PER_PAGE: usize = 48;
const PAGE_BREAK: char = '\u{c}';

/// Printable summary of one booking, laid out as fixed-width text pages.
#[derive(Debug, Clone)]
pub struct ReceiptDocument {
    booking: BookingDto,
    venue: VenueDto,
    generated_at: OffsetDateTime,
}

impl ReceiptDocument {
    pub fn new(booking: BookingDto, venue: VenueDto, generated_at: OffsetDateTime) -> Self {
        Self {
            booking,
            venue,
            generated_at,
        }
    }

    pub fn file_name(&self) -> String {
        format!("poolly_receipt_{}.txt", self.booking.id)
    }

    /// Pages are separated by a form feed and each starts with the same header.
    pub fn render(&self) -> String {
        let body = self.body();
        let chunk = LINES_PER_PAGE - 3;
        let pages = body.chunks(chunk).collect::<Vec<_>>();
        let total = pages.len();
        pages
            .into_iter()
            .enumerate()
            .map(|(index, lines)| {
                let mut page = vec![
                    format!(
                        "{SITE_NAME} receipt #{}{:>width$}",
                        short_id(&self.booking.id.to_string()),
                        format!("page {} of {total}", index + 1),
                        width = LINE_WIDTH - SITE_NAME.len() - 18,
                    ),
                    "=".repeat(LINE_WIDTH),
                    String::new(),
                ];
                page.extend(lines.iter().cloned());
                page.join("\n")
            })
            .collect::<Vec<_>>()
            .join(&format!("\n{PAGE_BREAK}"))
    }

    pub fn page_count(&self) -> usize {
        self.body().len().div_ceil(LINES_PER_PAGE - 3).max(1)
    }

    fn body(&self) -> Vec<String> {
        let booking = &self.booking;
        let venue = &self.venue;
        let mut lines = Vec::new();

        lines.push(center(&format!("{} - BOOKING RECEIPT", SITE_NAME.to_uppercase())));
        lines.push(String::new());

        section(&mut lines, "Booking");
        row(&mut lines, "Booking ID", &booking.id.to_string());
        row(
            &mut lines,
            "Date",
            &BookingDate::new(booking.booking_date).display(),
        );
        row(
            &mut lines,
            "Start time",
            &TimeOfDay::new(booking.start_time).to_clock_string(),
        );
        row(&mut lines, "Duration", &format!("{} h", booking.duration_hours));
        row(&mut lines, "Status", booking.status.label());

        section(&mut lines, "Venue");
        row(&mut lines, "Name", &venue.name);
        row(&mut lines, "Address", &venue.address);
        row(&mut lines, "Capacity", &format!("{} people", venue.capacity));
        row(
            &mut lines,
            "Hourly rate",
            &Price::new(venue.hourly_rate).display(),
        );

        section(&mut lines, "Customer");
        row(&mut lines, "Name", &booking.customer_name);
        row(&mut lines, "Phone", &booking.customer_phone);
        row(&mut lines, "Address", &booking.customer_address);
        row(&mut lines, "Age", &booking.customer_age.to_string());
        row(&mut lines, "People", &booking.number_of_people.to_string());

        section(&mut lines, "Price");
        row(&mut lines, "Base price", &Price::new(booking.base_price).display());
        if booking.discount_percent > 0 {
            row(
                &mut lines,
                &format!("Discount ({}%)", booking.discount_percent),
                &format!("-{}", Price::new(booking.discount_amount).display()),
            );
        }
        row(&mut lines, "Total", &Price::new(booking.total_price).display());

        if let Some(requests) = &booking.special_requests {
            section(&mut lines, "Special requests");
            lines.extend(wrap(requests, LINE_WIDTH));
        }

        lines.push(String::new());
        lines.push("-".repeat(LINE_WIDTH));
        let generated = self
            .generated_at
            .format(format_description!(
                "[day].[month].[year] [hour]:[minute]"
            ))
            .unwrap_or_else(|_| self.generated_at.to_string());
        lines.push(center(&format!("Generated {generated}")));
        lines.push(center(&format!("Thank you for choosing {SITE_NAME}!")));
        lines
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn center(text: &str) -> String {
    format!("{text:^LINE_WIDTH$}").trim_end().to_string()
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.to_uppercase());
    lines.push("-".repeat(title.chars().count()));
}

fn row(lines: &mut Vec<String>, label: &str, value: &str) {
    let label = format!("{label}:");
    let mut wrapped = wrap(value, LINE_WIDTH - 20).into_iter();
    let first = wrapped.next().unwrap_or_default();
    lines.push(format!("{label:<20}{first}"));
    lines.extend(wrapped.map(|rest| format!("{:<20}{rest}", "")));
}

/// Greedy word wrap; words longer than the width are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            while word.chars().count() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let head = word.chars().take(width).collect::<String>();
                word = word.chars().skip(width).collect();
                lines.push(head);
            }
            let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use time::macros::{date, datetime, time};
    use uuid::Uuid;

    use kernel::prelude::entity::{Amenities, BookingStatus};

    use super::{wrap, ReceiptDocument, PAGE_BREAK};
    use crate::transfer::{BookingDto, VenueDto};

    fn document(special_requests: Option<String>) -> ReceiptDocument {
        let venue = VenueDto {
            id: Uuid::new_v4(),
            name: "Aqua Park".to_string(),
            description: String::new(),
            address: "Tashkent, Chilonzor 7".to_string(),
            hourly_rate: dec!(100000),
            capacity: 40,
            opening_time: time!(8:00),
            closing_time: time!(22:00),
            amenities: Amenities::default(),
            children_discount: 0,
            group_discount: 15,
            rules: String::new(),
            is_active: true,
            created_at: datetime!(2025-01-01 0:00 UTC),
        };
        let booking = BookingDto {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            venue_id: venue.id,
            venue_name: venue.name.clone(),
            booking_date: date!(2025 - 07 - 01),
            start_time: time!(10:00),
            duration_hours: 2,
            number_of_people: 6,
            customer_name: "Aziza Karimova".to_string(),
            customer_phone: "+998901234567".to_string(),
            customer_address: "Tashkent".to_string(),
            customer_age: 25,
            base_price: dec!(200000),
            discount_percent: 15,
            discount_amount: dec!(30000),
            total_price: dec!(170000),
            status: BookingStatus::Confirmed,
            special_requests,
            created_at: datetime!(2025-06-20 9:00 UTC),
            updated_at: datetime!(2025-06-20 9:00 UTC),
        };
        ReceiptDocument::new(booking, venue, datetime!(2025-06-21 14:05 UTC))
    }

    #[test]
    fn receipt_lists_price_breakdown() {
        let text = document(None).render();
        assert!(text.contains("01.07.2025"));
        assert!(text.contains("10:00"));
        assert!(text.contains("Confirmed"));
        assert!(text.contains("200,000 so'm"));
        assert!(text.contains("Discount (15%):"));
        assert!(text.contains("-30,000 so'm"));
        assert!(text.contains("170,000 so'm"));
        assert!(text.contains("Generated 21.06.2025 14:05"));
        assert!(!text.contains("SPECIAL REQUESTS"));
        assert!(!text.contains(PAGE_BREAK));
    }

    #[test]
    fn long_requests_spill_onto_more_pages() {
        let requests = "Please prepare a birthday corner near the shallow end. ".repeat(60);
        let document = document(Some(requests));
        let text = document.render();
        let pages = text.split(PAGE_BREAK).collect::<Vec<_>>();
        assert!(pages.len() > 1);
        assert_eq!(pages.len(), document.page_count());
        for (index, page) in pages.iter().enumerate() {
            let header = page.trim_start_matches('\n').lines().next().unwrap();
            assert!(header.starts_with("Poolly receipt #"));
            assert!(header.ends_with(&format!("page {} of {}", index + 1, pages.len())));
        }
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("one two three four five six", 9);
        assert_eq!(lines, vec!["one two", "three", "four five", "six"]);
        let long = wrap("abcdefghijkl", 5);
        assert_eq!(long, vec!["abcde", "fghij", "kl"]);
    }
}
