use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::cookies::CookieJar;
use crate::enums::Region;
use crate::error::{KuroError, Result};

pub const DEFAULT_LANG: &str = "en-us";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings used to open a [`Session`](crate::session::Session).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Raw cookie input in any format [`CookieJar::parse`] accepts.
    pub cookies: Option<String>,
    pub headers: HashMap<String, String>,
    pub user_token: Option<String>,
    pub account_id: Option<i64>,
    pub player_id: Option<u64>,
    pub region: Region,
    pub lang: String,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
    /// Replaces the routed host of every request. Route support checks
    /// still run against `region` first.
    pub api_base_override: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cookies: None,
            headers: HashMap::new(),
            user_token: None,
            account_id: None,
            player_id: None,
            region: Region::Overseas,
            lang: DEFAULT_LANG.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_base_override: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cookies(mut self, cookies: &CookieJar) -> Self {
        self.cookies = Some(cookies.to_header_string());
        self
    }

    pub fn with_cookie_string(mut self, cookies: &str) -> Self {
        self.cookies = Some(cookies.to_string());
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_user_token(mut self, token: &str) -> Self {
        self.user_token = Some(token.to_string());
        self
    }

    pub fn with_account_id(mut self, account_id: i64) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn with_player_id(mut self, player_id: u64) -> Self {
        self.player_id = Some(player_id);
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = lang.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base_override = Some(api_base.to_string());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Read settings from `KURONET_*` environment variables, keeping the
    /// defaults for any that are unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        config.cookies = get("KURONET_COOKIES");
        config.account_id = get("KURONET_ACCOUNT_ID")
            .map(|v| parse_var("KURONET_ACCOUNT_ID", &v))
            .transpose()?;
        config.player_id = get("KURONET_PLAYER_ID")
            .map(|v| parse_var("KURONET_PLAYER_ID", &v))
            .transpose()?;
        if let Some(region) = get("KURONET_REGION") {
            config.region = parse_var("KURONET_REGION", &region)?;
        }
        if let Some(lang) = get("KURONET_LANG") {
            config.lang = lang;
        }
        if let Some(timeout) = get("KURONET_TIMEOUT_SECS") {
            config.timeout_secs = parse_var("KURONET_TIMEOUT_SECS", &timeout)?;
        }
        config.api_base_override = get("KURONET_API_BASE");

        Ok(config)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| KuroError::Validation(format!("{} has an invalid value: {}", key, value)))
}
