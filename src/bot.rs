use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{MenuButton, ParseMode, WebAppData, WebAppInfo};
use teloxide::utils::command::BotCommands;
use teloxide::{ApiError, RequestError};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::menu::{self, texts, Panel};
use crate::order::relay::{relay_order, Submission};
use crate::platform::telegram::customer_from_user;

/// Shared application state
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Commandes disponibles :")]
pub enum Command {
    #[command(description = "afficher le menu principal.")]
    Start,
    #[command(description = "nos produits.")]
    Info,
    #[command(description = "modes et délais de livraison.")]
    Livraison,
    #[command(description = "nous contacter.")]
    Contact,
    #[command(description = "ouvrir la boutique.")]
    Shop,
}

impl Command {
    pub fn panel(&self) -> Panel {
        match self {
            Command::Start => Panel::Welcome,
            Command::Info => Panel::Info,
            Command::Livraison => Panel::Shipping,
            Command::Contact => Panel::Contact,
            Command::Shop => Panel::Shop,
        }
    }
}

/// Bind the persistent menu button to the shop and publish the command list.
/// Failures are logged; the bot still starts.
async fn register_menu(bot: &Bot, config: &Config) {
    let button = MenuButton::WebApp {
        text: texts::MENU_BUTTON.to_string(),
        web_app: WebAppInfo {
            url: config.web_app_url.clone(),
        },
    };

    match bot.set_chat_menu_button().menu_button(button).await {
        Ok(_) => info!("Menu button configured"),
        Err(e) => error!("Failed to configure menu button: {}", e),
    }

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register bot commands: {}", e);
    }
}

/// Start the Telegram bot
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let bot = Bot::new(&state.config.bot_token);

    info!("Starting Telegram bot...");
    register_menu(&bot, &state.config).await;

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(
            Update::filter_message()
                .filter_map(|msg: Message| msg.web_app_data().cloned())
                .endpoint(handle_web_app_data),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("bot"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    info!("Command {:?} in chat {}", cmd, msg.chat.id);

    let panel = menu::render(&state.config, cmd.panel());
    bot.send_message(msg.chat.id, panel.text.clone())
        .parse_mode(ParseMode::Html)
        .reply_markup(panel.keyboard())
        .await?;

    Ok(())
}

async fn handle_callback(bot: Bot, q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(panel) = q.data.as_deref().and_then(Panel::from_callback) else {
        warn!("Callback with unknown data: {:?}", q.data);
        return Ok(());
    };
    let Some(message) = q.regular_message() else {
        debug!("Callback {:?} without an accessible message", q.data);
        return Ok(());
    };

    let rendered = menu::render(&state.config, panel);
    let result = bot
        .edit_message_text(message.chat.id, message.id, rendered.text.clone())
        .parse_mode(ParseMode::Html)
        .reply_markup(rendered.keyboard())
        .await;

    match result {
        Ok(_) => Ok(()),
        // Pressing the button of the panel already on screen
        Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
        Err(e) => Err(e),
    }
}

async fn handle_web_app_data(
    bot: Bot,
    msg: Message,
    data: WebAppData,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let customer = customer_from_user(msg.from.as_ref());
    debug!(
        "Web app data from {} ({} bytes)",
        customer.id_label(),
        data.data.len()
    );

    let submission = Submission {
        customer: &customer,
        chat_id: msg.chat.id,
        message_id: Some(msg.id),
        data: &data.data,
    };
    relay_order(&bot, &state.config, submission).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let parse = |text: &str| Command::parse(text, "shopbot").ok();
        assert_eq!(parse("/start"), Some(Command::Start));
        assert_eq!(parse("/info"), Some(Command::Info));
        assert_eq!(parse("/livraison"), Some(Command::Livraison));
        assert_eq!(parse("/contact"), Some(Command::Contact));
        assert_eq!(parse("/shop@shopbot"), Some(Command::Shop));
        assert_eq!(parse("/unknown"), None);
    }

    #[test]
    fn test_commands_map_to_panels() {
        assert_eq!(Command::Start.panel(), Panel::Welcome);
        assert_eq!(Command::Info.panel(), Panel::Info);
        assert_eq!(Command::Livraison.panel(), Panel::Shipping);
        assert_eq!(Command::Contact.panel(), Panel::Contact);
        assert_eq!(Command::Shop.panel(), Panel::Shop);
    }

    #[test]
    fn test_command_list_is_complete() {
        let names: Vec<String> = Command::bot_commands()
            .into_iter()
            .map(|c| c.command)
            .collect();
        assert_eq!(names.len(), 5);
        assert!(names.iter().all(|n| !n.is_empty()));
    }
}
