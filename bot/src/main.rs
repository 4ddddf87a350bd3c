use error_stack::ResultExt;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use driver::error::ConvertError;
use kernel::KernelError;

use crate::error::StackTrace;
use crate::handler::{AdminChat, Command};
use crate::module::BotModule;

mod callback;
mod error;
mod format;
mod handler;
mod module;

const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
const TELEGRAM_ADMIN_CHAT_ID: &str = "TELEGRAM_ADMIN_CHAT_ID";

const DEFAULT_LOG_FILTER: &str = "bot=debug,driver=debug,application=debug,sqlx=info";

fn admin_chat() -> error_stack::Result<AdminChat, KernelError> {
    let Some(raw) = dotenvy::var(TELEGRAM_ADMIN_CHAT_ID)
        .ok()
        .filter(|raw| !raw.trim().is_empty())
    else {
        return Ok(AdminChat(None));
    };
    let id = raw
        .trim()
        .parse::<i64>()
        .change_context(KernelError::Internal)
        .attach_printable_lazy(|| format!("{TELEGRAM_ADMIN_CHAT_ID}={raw} is not a chat id"))?;
    Ok(AdminChat(Some(ChatId(id))))
}

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer().with_filter(tracing_subscriber::EnvFilter::new(
                std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
            )),
        )
        .init();

    let token = dotenvy::var(TELEGRAM_BOT_TOKEN)
        .convert_error()
        .attach_printable_lazy(|| format!("missing env {TELEGRAM_BOT_TOKEN}"))?;
    let admin_chat = admin_chat()?;
    if admin_chat.0.is_none() {
        tracing::warn!("{TELEGRAM_ADMIN_CHAT_ID} is not set, every chat can use the bot");
    }
    let module = BotModule::new().await?;
    let bot = Bot::new(token);
    bot.set_my_commands(Command::bot_commands())
        .await
        .convert_error()?;

    let handler = dptree::entry()
        .filter(|update: Update, admin_chat: AdminChat| {
            admin_chat.allows(update.chat().map(|chat| chat.id))
        })
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handler::command),
        )
        .branch(Update::filter_callback_query().endpoint(handler::callback));

    tracing::info!("Poolly admin bot is starting");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![module, admin_chat])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
