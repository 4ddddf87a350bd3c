use error_stack::Report;
use teloxide::prelude::*;
use teloxide::types::{MaybeInaccessibleMessage, ParseMode};
use teloxide::utils::command::BotCommands;

use application::service::{
    BrowseVenueService, BookingStatisticsService, ListBookingService, UpdateBookingStatusService,
};
use application::transfer::{ListBookingDto, UpdateBookingStatusDto};
use driver::error::ConvertError;
use kernel::prelude::entity::BookingStatus;
use kernel::KernelError;

use crate::callback::Callback;
use crate::format::{self, Reply, BOOKING_NOT_FOUND, FAILURE, NEW_BOOKINGS_SHOWN};
use crate::module::BotModule;

pub type HandlerResult = error_stack::Result<(), KernelError>;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "snake_case", description = "Poolly admin commands:")]
pub enum Command {
    #[command(description = "start the bot")]
    Start,
    #[command(description = "show this help")]
    Help,
    #[command(description = "latest bookings")]
    Bookings,
    #[command(description = "bookings waiting for review")]
    NewBookings,
    #[command(description = "booking statistics")]
    Stats,
    #[command(description = "active venues")]
    Venues,
}

/// Chat allowed to use the bot. `None` lets every chat in.
#[derive(Debug, Clone, Copy)]
pub struct AdminChat(pub Option<ChatId>);

impl AdminChat {
    pub fn allows(&self, chat: Option<ChatId>) -> bool {
        match self.0 {
            None => true,
            Some(admin) => chat == Some(admin),
        }
    }
}

async fn recent(module: &BotModule) -> error_stack::Result<Reply, KernelError> {
    let list = module.list_bookings(ListBookingDto::default()).await?;
    Ok(format::bookings(&list))
}

async fn pending(module: &BotModule) -> error_stack::Result<Reply, KernelError> {
    let list = module
        .list_bookings(ListBookingDto {
            status: Some(BookingStatus::Pending),
            limit: NEW_BOOKINGS_SHOWN as i64,
        })
        .await?;
    Ok(format::new_bookings(&list))
}

async fn statistics(module: &BotModule) -> error_stack::Result<Reply, KernelError> {
    let stats = module.booking_statistics().await?;
    Ok(format::statistics(&stats))
}

async fn venues(module: &BotModule) -> error_stack::Result<Reply, KernelError> {
    let venues = module.list_active_venues().await?;
    Ok(Reply {
        text: format::venues(&venues),
        keyboard: None,
    })
}

async fn change_status(
    module: &BotModule,
    id: uuid::Uuid,
    status: BookingStatus,
) -> error_stack::Result<Reply, KernelError> {
    let text = match module
        .update_booking_status(UpdateBookingStatusDto { id, status })
        .await
    {
        Ok(booking) if status == BookingStatus::Cancelled => format::cancelled(&booking),
        Ok(booking) => format::confirmed(&booking),
        Err(report) if matches!(report.current_context(), KernelError::NotFound) => {
            tracing::debug!("{report:?}");
            BOOKING_NOT_FOUND.to_string()
        }
        Err(report) => return Err(report),
    };
    Ok(Reply {
        text,
        keyboard: None,
    })
}

fn or_failure(result: error_stack::Result<Reply, KernelError>) -> Reply {
    result.unwrap_or_else(|report: Report<KernelError>| {
        tracing::error!("{report:?}");
        Reply {
            text: FAILURE.to_string(),
            keyboard: None,
        }
    })
}

pub async fn command(bot: Bot, msg: Message, cmd: Command, module: BotModule) -> HandlerResult {
    tracing::debug!(chat_id = %msg.chat.id, ?cmd, "command received");
    let reply = match cmd {
        Command::Start => {
            let name = msg
                .from
                .as_ref()
                .map(|user| user.first_name.as_str())
                .unwrap_or("admin");
            Reply {
                text: format::welcome(name),
                keyboard: None,
            }
        }
        Command::Help => Reply {
            text: format::help(),
            keyboard: None,
        },
        Command::Bookings => or_failure(recent(&module).await),
        Command::NewBookings => or_failure(pending(&module).await),
        Command::Stats => or_failure(statistics(&module).await),
        Command::Venues => or_failure(venues(&module).await),
    };

    let mut request = bot
        .send_message(msg.chat.id, reply.text)
        .parse_mode(ParseMode::Html);
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(keyboard);
    }
    request.await.convert_error()?;
    Ok(())
}

pub async fn callback(bot: Bot, query: CallbackQuery, module: BotModule) -> HandlerResult {
    bot.answer_callback_query(query.id.clone())
        .await
        .convert_error()?;
    let Some(message) = query
        .message
        .as_ref()
        .and_then(MaybeInaccessibleMessage::regular_message)
    else {
        return Ok(());
    };
    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };

    let reply = match data.parse::<Callback>() {
        Ok(Callback::NewBookings) => or_failure(pending(&module).await),
        Ok(Callback::Stats) => or_failure(statistics(&module).await),
        Ok(Callback::RefreshBookings) => or_failure(recent(&module).await),
        Ok(Callback::Confirm(id)) => {
            or_failure(change_status(&module, id, BookingStatus::Confirmed).await)
        }
        Ok(Callback::Cancel(id)) => {
            or_failure(change_status(&module, id, BookingStatus::Cancelled).await)
        }
        Err(unknown) => {
            tracing::warn!("unknown callback data {:?}", unknown.0);
            return Ok(());
        }
    };

    let mut request = bot
        .edit_message_text(message.chat.id, message.id, reply.text)
        .parse_mode(ParseMode::Html);
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(keyboard);
    }
    request.await.convert_error()?;
    Ok(())
}
