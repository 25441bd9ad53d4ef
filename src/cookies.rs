use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{KuroError, Result};

const ACCOUNT_ID_NAMES: &[&str] = &["account_id"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
        }
    }
}

/// Name -> value cookie set. Domain and path are kept but ignored for
/// lookups; a later cookie with the same name replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    cookies: HashMap<String, Cookie>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse cookies from various formats:
    /// - JSON array format (browser extension export)
    /// - Netscape format (cookies.txt)
    /// - Header string format (Cookie: key=value; key2=value2)
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Ok(Self::new());
        }

        if trimmed.starts_with('[') {
            Self::parse_json(trimmed)
        } else if trimmed.contains('\t') || trimmed.starts_with('#') {
            Ok(Self::parse_netscape(trimmed))
        } else {
            Ok(Self::parse_header_string(trimmed))
        }
    }

    fn parse_json(input: &str) -> Result<Self> {
        let cookies: Vec<Cookie> =
            serde_json::from_str(input).map_err(|e| KuroError::InvalidJson(e.to_string()))?;
        Ok(cookies.into_iter().filter(|c| !c.name.is_empty()).collect())
    }

    /// Format: domain\tflag\tpath\tsecure\texpiry\tname\tvalue
    fn parse_netscape(input: &str) -> Self {
        let mut jar = Self::new();

        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() >= 7 && !parts[5].is_empty() {
                jar.insert(Cookie {
                    name: parts[5].to_string(),
                    value: parts[6].to_string(),
                    domain: Some(parts[0].to_string()),
                    path: Some(parts[2].to_string()),
                });
            }
        }

        jar
    }

    fn parse_header_string(input: &str) -> Self {
        let cookie_str = match input.get(..7) {
            Some(prefix) if prefix.eq_ignore_ascii_case("cookie:") => input[7..].trim(),
            _ => input,
        };

        cookie_str
            .split(';')
            .filter_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some(Cookie::new(name, value.trim().trim_matches('"')))
            })
            .collect()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(name, value)| Cookie::new(name, value))
            .collect()
    }

    /// Convert to Cookie header string
    pub fn to_header_string(&self) -> String {
        let mut pairs: Vec<_> = self
            .cookies
            .values()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect();
        pairs.sort();
        pairs.join("; ")
    }

    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name)
            .map(|c| c.value.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Insert a cookie (replaces existing cookie with same name)
    pub fn insert(&mut self, cookie: Cookie) {
        self.cookies.insert(cookie.name.clone(), cookie);
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn to_simple_map(&self) -> HashMap<String, String> {
        self.cookies
            .values()
            .map(|c| (c.name.clone(), c.value.clone()))
            .collect()
    }

    /// Lab account id, if a cookie carries one that parses as an integer.
    pub fn account_id(&self) -> Option<i64> {
        ACCOUNT_ID_NAMES
            .iter()
            .filter_map(|name| self.value(name))
            .find_map(|v| v.trim().parse().ok())
    }

    pub fn user_token(&self) -> Option<&str> {
        self.value("user_token")
    }

    pub fn platform(&self) -> Option<&str> {
        self.value("platform")
    }
}

impl FromIterator<Cookie> for CookieJar {
    fn from_iter<I: IntoIterator<Item = Cookie>>(iter: I) -> Self {
        let mut jar = Self::new();
        for cookie in iter {
            jar.insert(cookie);
        }
        jar
    }
}

impl From<HashMap<String, String>> for CookieJar {
    fn from(map: HashMap<String, String>) -> Self {
        Self::from_pairs(map)
    }
}

impl From<Vec<(String, String)>> for CookieJar {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::from_pairs(pairs)
    }
}
