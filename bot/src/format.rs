use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::html::escape;

use application::transfer::{BookingDto, BookingListDto, StatisticsDto, VenueDto};
use kernel::prelude::entity::{BookingDate, BookingStatus, Price, TimeOfDay};

use crate::callback::Callback;

/// Pending bookings listed by `/new_bookings`.
pub const NEW_BOOKINGS_SHOWN: usize = 5;
/// Pending bookings that get confirm/cancel buttons.
pub const NEW_BOOKINGS_ACTIONABLE: usize = 3;

pub const BOOKING_NOT_FOUND: &str = "❌ Booking not found.";
pub const FAILURE: &str = "❌ Something went wrong, please try again later.";

/// An HTML message with an optional inline keyboard.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Reply {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }
}

fn button(label: impl Into<String>, callback: Callback) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label, callback.to_string())
}

fn emoji(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "⏳",
        BookingStatus::Confirmed => "✅",
        BookingStatus::Cancelled => "❌",
        BookingStatus::Completed => "🏁",
    }
}

fn short_id(booking: &BookingDto) -> String {
    booking.id.simple().to_string()[..8].to_string()
}

fn when(booking: &BookingDto) -> String {
    format!(
        "📅 {} ⏰ {}",
        BookingDate::new(booking.booking_date).display(),
        TimeOfDay::new(booking.start_time).to_clock_string()
    )
}

fn money(amount: rust_decimal::Decimal) -> String {
    Price::new(amount).display()
}

pub fn welcome(first_name: &str) -> String {
    format!(
        "🏊 Welcome to the <b>Poolly Admin Bot</b>, {}!\n\n{}",
        escape(first_name),
        commands()
    )
}

pub fn help() -> String {
    format!(
        "🤖 <b>Poolly Admin Bot commands</b>\n\n{}\n\n<b>Booking statuses:</b>\n{}",
        commands(),
        BookingStatus::ALL
            .iter()
            .map(|status| format!("• {} {}", emoji(*status), status.label()))
            .collect::<Vec<_>>()
            .join("\n")
    )
}

fn commands() -> &'static str {
    "📋 /bookings - latest bookings\n\
     🆕 /new_bookings - bookings waiting for review\n\
     📊 /stats - statistics\n\
     🏊 /venues - active venues\n\
     ℹ️ /help - help"
}

pub fn bookings(list: &BookingListDto) -> Reply {
    if list.bookings.is_empty() {
        return Reply::plain("📭 There are no bookings yet.");
    }
    let mut text = format!("📋 <b>Latest {} bookings:</b>\n", list.bookings.len());
    for booking in &list.bookings {
        text.push_str(&format!(
            "\n{} <b>#{}</b>\n👤 {}\n🏊 {}\n{}\n💰 {}\n📞 {}\n",
            emoji(booking.status),
            booking.id,
            escape(&booking.customer_name),
            escape(&booking.venue_name),
            when(booking),
            money(booking.total_price),
            escape(&booking.customer_phone),
        ));
    }
    Reply {
        text,
        keyboard: Some(InlineKeyboardMarkup::new(vec![
            vec![button("🆕 New bookings", Callback::NewBookings)],
            vec![button("📊 Statistics", Callback::Stats)],
            vec![button("🔄 Refresh", Callback::RefreshBookings)],
        ])),
    }
}

pub fn new_bookings(list: &BookingListDto) -> Reply {
    if list.bookings.is_empty() {
        return Reply::plain("✅ Every booking has been reviewed!");
    }
    let mut text = format!("🆕 <b>New bookings ({}):</b>\n", list.total);
    for booking in list.bookings.iter().take(NEW_BOOKINGS_SHOWN) {
        text.push_str(&format!(
            "\n⏳ <b>#{}</b>\n👤 {}\n🏊 {}\n{}\n👥 {} people\n💰 {}\n📞 {}\n",
            booking.id,
            escape(&booking.customer_name),
            escape(&booking.venue_name),
            when(booking),
            booking.number_of_people,
            money(booking.total_price),
            escape(&booking.customer_phone),
        ));
    }
    let mut rows = list
        .bookings
        .iter()
        .take(NEW_BOOKINGS_ACTIONABLE)
        .map(|booking| {
            let short = short_id(booking);
            vec![
                button(format!("✅ Confirm #{short}"), Callback::Confirm(booking.id)),
                button(format!("❌ Cancel #{short}"), Callback::Cancel(booking.id)),
            ]
        })
        .collect::<Vec<_>>();
    rows.push(vec![button("🔄 Refresh", Callback::NewBookings)]);
    Reply {
        text,
        keyboard: Some(InlineKeyboardMarkup::new(rows)),
    }
}

pub fn statistics(stats: &StatisticsDto) -> Reply {
    let mut text = format!(
        "📊 <b>Poolly statistics</b>\n\n\
         <b>📈 Overall:</b>\n• Bookings: {}\n• Revenue: {}\n\n\
         <b>📅 Today:</b>\n• Bookings: {}\n• Revenue: {}\n\n\
         <b>📆 Last 7 days:</b>\n• Bookings: {}\n• Revenue: {}\n\n\
         <b>📋 By status:</b>\n",
        stats.total_bookings,
        money(stats.total_revenue),
        stats.today.bookings,
        money(stats.today.revenue),
        stats.week.bookings,
        money(stats.week.revenue),
    );
    for (status, count) in &stats.by_status {
        text.push_str(&format!("• {} {}: {}\n", emoji(*status), status.label(), count));
    }
    if !stats.top_venues.is_empty() {
        text.push_str("\n<b>🏊 Most booked venues:</b>\n");
        for (rank, venue) in stats.top_venues.iter().enumerate() {
            text.push_str(&format!(
                "{}. {}: {} bookings\n",
                rank + 1,
                escape(&venue.name),
                venue.bookings
            ));
        }
    }
    Reply {
        text,
        keyboard: Some(InlineKeyboardMarkup::new(vec![vec![button(
            "🔄 Refresh",
            Callback::Stats,
        )]])),
    }
}

pub fn venues(venues: &[VenueDto]) -> String {
    if venues.is_empty() {
        return "🏊 There are no active venues yet.".to_string();
    }
    let mut text = format!("🏊 <b>Active venues ({}):</b>\n", venues.len());
    for venue in venues {
        let amenities = [
            (venue.amenities.sauna, "🧖 Sauna"),
            (venue.amenities.cafe, "☕ Cafe"),
            (venue.amenities.sports_area, "🏃 Sports"),
            (venue.amenities.parking, "🚗 Parking"),
            (venue.amenities.wifi, "📶 WiFi"),
        ]
        .into_iter()
        .filter_map(|(present, label)| present.then_some(label))
        .collect::<Vec<_>>();
        let amenities = if amenities.is_empty() {
            "none".to_string()
        } else {
            amenities.join(" • ")
        };
        text.push_str(&format!(
            "\n🏊 <b>{}</b>\n📍 {}\n💰 {}/hour\n👥 {} people\n⏰ {} - {}\n🎯 {}\n",
            escape(&venue.name),
            escape(&venue.address),
            money(venue.hourly_rate),
            venue.capacity,
            TimeOfDay::new(venue.opening_time).to_clock_string(),
            TimeOfDay::new(venue.closing_time).to_clock_string(),
            amenities,
        ));
    }
    text
}

pub fn confirmed(booking: &BookingDto) -> String {
    format!(
        "✅ <b>Booking confirmed!</b>\n\n📋 <b>#{}</b>\n👤 {}\n🏊 {}\n{}\n💰 {}\n\n\
         Let the customer know by SMS or phone.",
        booking.id,
        escape(&booking.customer_name),
        escape(&booking.venue_name),
        when(booking),
        money(booking.total_price),
    )
}

pub fn cancelled(booking: &BookingDto) -> String {
    format!(
        "❌ <b>Booking cancelled!</b>\n\n📋 <b>#{}</b>\n👤 {}\n🏊 {}\n{}\n\n\
         Explain the reason for the cancellation to the customer.",
        booking.id,
        escape(&booking.customer_name),
        escape(&booking.venue_name),
        when(booking),
    )
}
