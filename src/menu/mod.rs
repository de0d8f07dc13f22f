pub mod texts;

use reqwest::Url;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, WebAppInfo};
use teloxide::utils::html;

use crate::config::Config;

/// A screen the user can be shown. Navigation between them happens by
/// editing the displayed message in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Welcome,
    Info,
    Shipping,
    Contact,
    Shop,
}

impl Panel {
    /// Callback token carried by navigation buttons. `Shop` is only reachable
    /// through `/shop` and has none.
    pub fn callback_data(self) -> Option<&'static str> {
        match self {
            Panel::Welcome => Some("menu"),
            Panel::Info => Some("info"),
            Panel::Shipping => Some("livraison"),
            Panel::Contact => Some("contact"),
            Panel::Shop => None,
        }
    }

    pub fn from_callback(data: &str) -> Option<Self> {
        match data {
            "menu" => Some(Panel::Welcome),
            "info" => Some(Panel::Info),
            "livraison" => Some(Panel::Shipping),
            "contact" => Some(Panel::Contact),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Button {
    /// Re-render the current message as another panel.
    Navigate { label: &'static str, target: Panel },
    /// Open an external URL.
    Link { label: &'static str, url: Url },
    /// Open the shop mini-app.
    Launch { label: &'static str, url: Url },
}

impl Button {
    fn navigate(label: &'static str, target: Panel) -> Self {
        Button::Navigate { label, target }
    }

    fn link(label: &'static str, url: &Url) -> Self {
        Button::Link {
            label,
            url: url.clone(),
        }
    }

    fn launch(label: &'static str, config: &Config) -> Self {
        Button::Launch {
            label,
            url: config.web_app_url.clone(),
        }
    }

    fn into_inline(self) -> InlineKeyboardButton {
        match self {
            Button::Navigate { label, target } => {
                // Every navigation target has a token; see `Panel::callback_data`.
                let data = target.callback_data().unwrap_or("menu");
                InlineKeyboardButton::callback(label, data)
            }
            Button::Link { label, url } => InlineKeyboardButton::url(label, url),
            Button::Launch { label, url } => {
                InlineKeyboardButton::web_app(label, WebAppInfo { url })
            }
        }
    }
}

/// Body text (HTML) plus button rows of one panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPanel {
    pub text: String,
    pub rows: Vec<Vec<Button>>,
}

impl MenuPanel {
    pub fn keyboard(&self) -> InlineKeyboardMarkup {
        keyboard(self.rows.clone())
    }

    /// All buttons, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}

pub fn keyboard(rows: Vec<Vec<Button>>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        rows.into_iter()
            .map(|row| row.into_iter().map(Button::into_inline).collect::<Vec<_>>()),
    )
}

pub fn contact_text(config: &Config) -> String {
    texts::CONTACT_TEMPLATE
        .replace("{contact}", &html::escape(&config.contact_username))
        .replace("{channel}", &html::escape(config.channel_url.as_str()))
}

/// Render a panel from the configuration. Pure; cannot fail once the
/// configuration has been validated.
pub fn render(config: &Config, panel: Panel) -> MenuPanel {
    let back = || vec![Button::navigate(texts::BACK_TO_MENU, Panel::Welcome)];

    let (text, rows) = match panel {
        Panel::Welcome => (
            texts::WELCOME.to_string(),
            vec![
                vec![Button::launch(texts::OPEN_SHOP, config)],
                vec![
                    Button::navigate(texts::INFO_BUTTON, Panel::Info),
                    Button::navigate(texts::SHIPPING_BUTTON, Panel::Shipping),
                ],
                vec![
                    Button::navigate(texts::CONTACT_BUTTON, Panel::Contact),
                    Button::link(texts::CHANNEL_BUTTON, &config.channel_url),
                ],
            ],
        ),
        Panel::Info => (
            texts::INFO.to_string(),
            vec![vec![Button::launch(texts::SEE_SHOP, config)], back()],
        ),
        Panel::Shipping => (
            texts::SHIPPING.to_string(),
            vec![vec![Button::launch(texts::ORDER_NOW, config)], back()],
        ),
        Panel::Contact => (
            contact_text(config),
            vec![
                vec![Button::link(texts::SEND_MESSAGE, &config.contact_url)],
                vec![Button::link(texts::JOIN_CHANNEL, &config.channel_url)],
                back(),
            ],
        ),
        Panel::Shop => (
            texts::SHOP.to_string(),
            vec![vec![Button::launch(texts::SHOP_OPEN, config)]],
        ),
    };

    MenuPanel { text, rows }
}

/// Single "contact support" link attached to every order reply.
pub fn support_keyboard(config: &Config) -> InlineKeyboardMarkup {
    keyboard(vec![vec![Button::link(
        texts::SUPPORT_BUTTON,
        &config.contact_url,
    )]])
}
