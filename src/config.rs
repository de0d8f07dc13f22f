use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::Deserialize;
use teloxide::types::ChatId;
use thiserror::Error;

pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_ADMIN_ID: &str = "TELEGRAM_ADMIN_ID";
pub const ENV_WEB_APP_URL: &str = "TELEGRAM_WEB_APP_URL";
pub const ENV_CHANNEL_URL: &str = "TELEGRAM_CHANNEL_URL";
pub const ENV_CONTACT_USERNAME: &str = "TELEGRAM_CONTACT_USERNAME";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("setting {0} is required to start the bot")]
    Missing(&'static str),
    #[error("TELEGRAM_ADMIN_ID must be a numeric Telegram identifier, got {0:?}")]
    InvalidAdminId(String),
    #[error("TELEGRAM_ADMIN_ID must be strictly positive, got {0}")]
    NonPositiveAdminId(i64),
    #[error("TELEGRAM_WEB_APP_URL must use HTTPS")]
    InsecureWebAppUrl,
    #[error("{name} is not a valid URL ({value:?}): {reason}")]
    MalformedUrl {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("TELEGRAM_CONTACT_USERNAME cannot be empty")]
    EmptyContact,
    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// `admin_id` may be written as a TOML integer or as a string.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum RawAdminId {
    Number(i64),
    Text(String),
}

/// Unvalidated settings, as read from the environment or from the
/// `[telegram]` table of a TOML file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub admin_id: Option<RawAdminId>,
    pub web_app_url: Option<String>,
    pub channel_url: Option<String>,
    pub contact_username: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RawConfig {
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Validated, immutable bot configuration. Built once before the dispatcher
/// starts and shared read-only with every handler.
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub admin_id: ChatId,
    /// Always ends with `/`.
    pub web_app_url: Url,
    pub channel_url: Url,
    /// Handle without the leading `@`.
    pub contact_username: String,
    /// `https://t.me/<contact_username>`
    pub contact_url: Url,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("admin_id", &self.admin_id)
            .field("web_app_url", &self.web_app_url.as_str())
            .field("channel_url", &self.channel_url.as_str())
            .field("contact_username", &self.contact_username)
            .finish()
    }
}

fn ensure_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::MalformedUrl {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Trimmed value, or `Missing` when absent or blank.
fn require(name: &'static str, value: Option<&str>) -> Result<String, ConfigError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::Missing(name)),
    }
}

impl TelegramConfig {
    /// Collect settings through an arbitrary lookup; `from_env` passes
    /// `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bot_token: lookup(ENV_BOT_TOKEN),
            admin_id: lookup(ENV_ADMIN_ID).map(RawAdminId::Text),
            web_app_url: lookup(ENV_WEB_APP_URL),
            channel_url: lookup(ENV_CHANNEL_URL),
            contact_username: lookup(ENV_CONTACT_USERNAME),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn validate(self) -> Result<Config, ConfigError> {
        let bot_token = require(ENV_BOT_TOKEN, self.bot_token.as_deref())?;

        let admin_id = match self.admin_id {
            Some(RawAdminId::Number(n)) => n,
            Some(RawAdminId::Text(text)) => {
                let text = require(ENV_ADMIN_ID, Some(text.as_str()))?;
                text.parse::<i64>()
                    .map_err(|_| ConfigError::InvalidAdminId(text))?
            }
            None => return Err(ConfigError::Missing(ENV_ADMIN_ID)),
        };
        if admin_id <= 0 {
            return Err(ConfigError::NonPositiveAdminId(admin_id));
        }

        let web_app_raw = require(ENV_WEB_APP_URL, self.web_app_url.as_deref())?;
        if !web_app_raw.to_lowercase().starts_with("https://") {
            return Err(ConfigError::InsecureWebAppUrl);
        }
        let web_app_url = parse_url(ENV_WEB_APP_URL, &ensure_trailing_slash(&web_app_raw))?;

        let channel_raw = require(ENV_CHANNEL_URL, self.channel_url.as_deref())?;
        let channel_url = parse_url(ENV_CHANNEL_URL, &channel_raw)?;
        if !matches!(channel_url.scheme(), "http" | "https") {
            return Err(ConfigError::MalformedUrl {
                name: ENV_CHANNEL_URL,
                value: channel_raw,
                reason: "expected an http:// or https:// URL".to_string(),
            });
        }

        let contact_raw = require(ENV_CONTACT_USERNAME, self.contact_username.as_deref())
            .map_err(|_| ConfigError::EmptyContact)?;
        let contact_username = contact_raw.trim_start_matches('@').trim().to_string();
        if contact_username.is_empty() {
            return Err(ConfigError::EmptyContact);
        }
        let contact_url = parse_url(
            ENV_CONTACT_USERNAME,
            &format!("https://t.me/{contact_username}"),
        )?;

        Ok(Config {
            bot_token,
            admin_id: ChatId(admin_id),
            web_app_url,
            channel_url,
            contact_username,
            contact_url,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        TelegramConfig::from_env().validate()
    }

    /// Load the `[telegram]` table of a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        raw.telegram.validate()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(overrides: &[(&str, &str)]) -> TelegramConfig {
        let mut vars: HashMap<String, String> = [
            (ENV_BOT_TOKEN, "123:abc"),
            (ENV_ADMIN_ID, "42"),
            (ENV_WEB_APP_URL, "https://shop.example.com/app"),
            (ENV_CHANNEL_URL, "https://t.me/shopchannel"),
            (ENV_CONTACT_USERNAME, "@shop_support"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        for (k, v) in overrides {
            vars.insert(k.to_string(), v.to_string());
        }
        TelegramConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_valid_config() {
        let config = settings(&[]).validate().unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.admin_id, ChatId(42));
        assert_eq!(config.web_app_url.as_str(), "https://shop.example.com/app/");
        assert_eq!(config.channel_url.as_str(), "https://t.me/shopchannel");
        assert_eq!(config.contact_username, "shop_support");
        assert_eq!(config.contact_url.as_str(), "https://t.me/shop_support");
    }

    #[test]
    fn test_web_app_url_always_ends_with_slash() {
        for url in [
            "https://shop.example.com",
            "https://shop.example.com/",
            "https://shop.example.com/app",
            "https://shop.example.com/app/",
            "HTTPS://shop.example.com/x",
        ] {
            let config = settings(&[(ENV_WEB_APP_URL, url)]).validate().unwrap();
            assert!(
                config.web_app_url.as_str().ends_with('/'),
                "{url} -> {}",
                config.web_app_url
            );
        }
    }

    #[test]
    fn test_values_are_trimmed() {
        let config = settings(&[(ENV_BOT_TOKEN, "  tok  "), (ENV_ADMIN_ID, " 7 ")])
            .validate()
            .unwrap();
        assert_eq!(config.bot_token, "tok");
        assert_eq!(config.admin_id, ChatId(7));
    }

    #[test]
    fn test_missing_token() {
        let raw = TelegramConfig {
            bot_token: None,
            ..settings(&[])
        };
        assert!(matches!(
            raw.validate(),
            Err(ConfigError::Missing(ENV_BOT_TOKEN))
        ));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        assert!(matches!(
            settings(&[(ENV_BOT_TOKEN, "   ")]).validate(),
            Err(ConfigError::Missing(ENV_BOT_TOKEN))
        ));
    }

    #[test]
    fn test_admin_id_must_be_numeric() {
        assert!(matches!(
            settings(&[(ENV_ADMIN_ID, "admin")]).validate(),
            Err(ConfigError::InvalidAdminId(_))
        ));
    }

    #[test]
    fn test_admin_id_must_be_positive() {
        assert!(matches!(
            settings(&[(ENV_ADMIN_ID, "0")]).validate(),
            Err(ConfigError::NonPositiveAdminId(0))
        ));
        assert!(matches!(
            settings(&[(ENV_ADMIN_ID, "-5")]).validate(),
            Err(ConfigError::NonPositiveAdminId(-5))
        ));
    }

    #[test]
    fn test_web_app_requires_https() {
        assert!(matches!(
            settings(&[(ENV_WEB_APP_URL, "http://shop.example.com")]).validate(),
            Err(ConfigError::InsecureWebAppUrl)
        ));
    }

    #[test]
    fn test_channel_url_must_be_http() {
        assert!(matches!(
            settings(&[(ENV_CHANNEL_URL, "t.me/shopchannel")]).validate(),
            Err(ConfigError::MalformedUrl { .. })
        ));
        assert!(matches!(
            settings(&[(ENV_CHANNEL_URL, "ftp://example.com")]).validate(),
            Err(ConfigError::MalformedUrl { .. })
        ));
        let config = settings(&[(ENV_CHANNEL_URL, "http://example.com/news")])
            .validate()
            .unwrap();
        assert_eq!(config.channel_url.as_str(), "http://example.com/news");
    }

    #[test]
    fn test_contact_must_not_be_empty() {
        assert!(matches!(
            settings(&[(ENV_CONTACT_USERNAME, "@")]).validate(),
            Err(ConfigError::EmptyContact)
        ));
        assert!(matches!(
            settings(&[(ENV_CONTACT_USERNAME, "")]).validate(),
            Err(ConfigError::EmptyContact)
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = settings(&[]).validate().unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("123:abc"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_toml_accepts_integer_admin_id() {
        let raw: RawConfig = toml::from_str(
            r#"
[telegram]
bot_token = "t"
admin_id = 99
web_app_url = "https://shop.example.com"
channel_url = "https://t.me/c"
contact_username = "support"
"#,
        )
        .unwrap();
        let config = raw.telegram.validate().unwrap();
        assert_eq!(config.admin_id, ChatId(99));
        assert_eq!(config.web_app_url.as_str(), "https://shop.example.com/");
    }

    #[test]
    fn test_toml_accepts_string_admin_id() {
        let raw: RawConfig = toml::from_str(
            r#"
[telegram]
bot_token = "t"
admin_id = "12"
web_app_url = "https://shop.example.com/"
channel_url = "https://t.me/c"
contact_username = "support"
"#,
        )
        .unwrap();
        assert_eq!(raw.telegram.validate().unwrap().admin_id, ChatId(12));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/shopbot.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
