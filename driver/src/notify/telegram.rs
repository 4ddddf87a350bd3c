use error_stack::Report;
use teloxide::payloads::SendMessageSetters;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, ParseMode};
use teloxide::utils::html::escape;
use teloxide::{Bot, RequestError};
use time::macros::format_description;

use kernel::interface::notify::BookingNotifier;
use kernel::prelude::entity::BookingEntry;
use kernel::KernelError;

use crate::env_opt;
use crate::error::ConvertError;

const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
const TELEGRAM_ADMIN_CHAT_ID: &str = "TELEGRAM_ADMIN_CHAT_ID";

/// Sends new-booking alerts to the administrators' chat.
#[derive(Clone)]
pub struct TelegramNotifier {
    target: Option<(Bot, ChatId)>,
}

impl TelegramNotifier {
    /// Reads the token and chat id from the environment; without both, every notification is skipped.
    pub fn from_env() -> Self {
        let token = env_opt(TELEGRAM_BOT_TOKEN);
        let chat_id = env_opt(TELEGRAM_ADMIN_CHAT_ID).and_then(|raw| raw.trim().parse::<i64>().ok());
        let target = match (token, chat_id) {
            (Some(token), Some(chat_id)) => Some((Bot::new(token), ChatId(chat_id))),
            _ => None,
        };
        Self { target }
    }

    pub fn disabled() -> Self {
        Self { target: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }
}

#[async_trait::async_trait]
impl BookingNotifier for TelegramNotifier {
    #[tracing::instrument(skip_all, fields(booking_id = %entry.booking().id()))]
    async fn notify_created(&self, entry: &BookingEntry) -> error_stack::Result<(), KernelError> {
        let Some((bot, chat_id)) = &self.target else {
            tracing::debug!("telegram is not configured, skipping notification");
            return Ok(());
        };
        bot.send_message(*chat_id, booking_created_message(entry))
            .parse_mode(ParseMode::Html)
            .await
            .convert_error()?;
        Ok(())
    }
}

pub fn booking_created_message(entry: &BookingEntry) -> String {
    let booking = entry.booking();
    let customer = booking.customer();
    let created = booking
        .created_at()
        .as_ref()
        .format(format_description!("[day].[month].[year] [hour]:[minute]"))
        .unwrap_or_default();

    let mut lines = vec![
        "🏊 <b>NEW BOOKING - POOLLY</b>".to_string(),
        String::new(),
        format!("📋 <b>Booking ID:</b> <code>{}</code>", booking.id()),
        format!("👤 <b>Customer:</b> {}", escape(customer.name().as_ref())),
        format!("📞 <b>Phone:</b> {}", escape(customer.phone().as_ref())),
        format!("🏊 <b>Venue:</b> {}", escape(entry.venue_name().as_ref())),
        format!("📅 <b>Date:</b> {}", booking.date().display()),
        format!("⏰ <b>Time:</b> {}", booking.start_time()),
        format!("⏱ <b>Duration:</b> {} h", booking.duration().as_ref()),
        format!("👥 <b>People:</b> {}", booking.headcount().as_ref()),
        format!("💰 <b>Total:</b> {}", booking.price().total_price().display()),
        String::new(),
        format!("📍 <b>Address:</b> {}", escape(customer.address().as_ref())),
        format!("🎂 <b>Age:</b> {}", customer.age().as_ref()),
    ];
    if let Some(request) = booking.special_request().as_option() {
        lines.push(format!("📝 <b>Special requests:</b> {}", escape(request)));
    }
    lines.push(String::new());
    lines.push(format!("🕒 <b>Booked at:</b> {created}"));
    lines.join("\n")
}

impl<T> ConvertError for Result<T, RequestError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::new(error).change_context(KernelError::Internal))
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use time::macros::{date, datetime, time};
    use uuid::Uuid;

    use kernel::interface::notify::BookingNotifier;
    use kernel::prelude::entity::{
        Address, Age, Amenities, Booking, BookingDate, BookingDraft, BookingEntry, BookingId,
        CreatedAt, Customer, CustomerName, DiscountPercent, DiscountRules, DurationHours,
        Headcount, OpeningHours, PhoneNumber, Price, SpecialRequest, TimeOfDay, UserId, Venue,
        VenueCapacity, VenueDescription, VenueId, VenueName, VenueRules,
    };

    use super::{booking_created_message, TelegramNotifier};

    fn entry(request: &str) -> BookingEntry {
        let venue = Venue::new(
            VenueId::new(Uuid::new_v4()),
            VenueName::new("Aqua <Park>"),
            VenueDescription::default(),
            Address::new("Tashkent"),
            Price::new(dec!(100000)),
            VenueCapacity::new(20),
            OpeningHours::new(TimeOfDay::new(time!(8:00)), TimeOfDay::new(time!(22:00))),
            Amenities::default(),
            DiscountRules::new(DiscountPercent::none(), DiscountPercent::new(15)),
            VenueRules::default(),
            true,
            CreatedAt::new(datetime!(2025-01-01 0:00 UTC)),
        );
        let draft = BookingDraft {
            date: BookingDate::new(date!(2025 - 07 - 01)),
            start_time: TimeOfDay::new(time!(18:30)),
            duration: DurationHours::new(2),
            headcount: Headcount::new(6),
            customer: Customer::new(
                CustomerName::new("Aziza & Co"),
                PhoneNumber::new("+998901234567"),
                Address::new("Chilonzor 7"),
                Age::new(25),
            ),
            special_request: SpecialRequest::new(request),
        };
        let booking = Booking::place(
            BookingId::generate(),
            UserId::new(Uuid::new_v4()),
            &venue,
            draft,
            datetime!(2025-06-20 9:15 UTC),
        );
        BookingEntry::new(booking, venue.name().clone())
    }

    #[test]
    fn message_lists_booking_details() {
        let entry = entry("");
        let message = booking_created_message(&entry);
        assert!(message.contains(&entry.booking().id().to_string()));
        assert!(message.contains("Aziza &amp; Co"));
        assert!(message.contains("Aqua &lt;Park&gt;"));
        assert!(message.contains("01.07.2025"));
        assert!(message.contains("18:30"));
        assert!(message.contains("170,000 so'm"));
        assert!(message.contains("20.06.2025 09:15"));
        assert!(!message.contains("Special requests"));
    }

    #[test]
    fn message_includes_special_request_when_given() {
        let message = booking_created_message(&entry("Birthday cake"));
        assert!(message.contains("<b>Special requests:</b> Birthday cake"));
    }

    #[tokio::test]
    async fn unconfigured_notifier_skips_silently() {
        let notifier = TelegramNotifier::disabled();
        assert!(!notifier.is_enabled());
        assert!(notifier.notify_created(&entry("")).await.is_ok());
    }
}
