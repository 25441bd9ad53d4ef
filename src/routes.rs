//! Static route tables and URL helpers.

use std::collections::HashMap;

use url::Url;

use crate::enums::{Game, Region};
use crate::error::{KuroError, Result};

/// Join `path` onto `base` with exactly one `/` between them.
///
/// Joining with an empty path returns `base` unchanged.
pub fn join_url(base: &str, path: &str) -> String {
    if path.is_empty() {
        return base.to_string();
    }
    if base.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// A route with one URL per region. An empty URL marks the region as
/// unsupported.
#[derive(Debug, Clone)]
pub struct InternationalRoute {
    urls: HashMap<Region, &'static str>,
}

impl InternationalRoute {
    pub fn new(overseas: &'static str, chinese: &'static str) -> Self {
        let mut urls = HashMap::new();
        urls.insert(Region::Overseas, overseas);
        urls.insert(Region::Chinese, chinese);
        Self { urls }
    }

    pub fn get_url(&self, region: Region) -> Result<&'static str> {
        match self.urls.get(&region) {
            Some(url) if !url.is_empty() => Ok(*url),
            _ => Err(KuroError::RegionNotSupported(format!(
                "URL does not support {:?} region.",
                region
            ))),
        }
    }
}

/// A route with one URL per (region, game).
#[derive(Debug, Clone)]
pub struct GameRoute {
    urls: HashMap<Region, HashMap<Game, &'static str>>,
}

impl GameRoute {
    pub fn new(overseas: &[(Game, &'static str)], chinese: &[(Game, &'static str)]) -> Self {
        let mut urls = HashMap::new();
        urls.insert(Region::Overseas, overseas.iter().copied().collect());
        urls.insert(Region::Chinese, chinese.iter().copied().collect());
        Self { urls }
    }

    pub fn get_url(&self, region: Region, game: Game) -> Result<&'static str> {
        let games = match self.urls.get(&region) {
            Some(games) if !games.is_empty() => games,
            _ => {
                return Err(KuroError::RegionNotSupported(format!(
                    "URL does not support {:?} region.",
                    region
                )))
            }
        };

        match games.get(&game) {
            Some(url) if !url.is_empty() => Ok(*url),
            _ => Err(KuroError::GameNotSupported(format!(
                "URL does not support {:?} game for {:?} region.",
                game, region
            ))),
        }
    }
}

lazy_static::lazy_static! {
    pub static ref BBS_URL: InternationalRoute =
        InternationalRoute::new("", "https://api.kurobbs.com");

    pub static ref GACHA_INFO_URL: GameRoute = GameRoute::new(
        &[(Game::Mc, "https://gmserver-api.aki-game2.net")],
        &[(Game::Mc, "https://gmserver-api.aki-game2.com")],
    );
}

/// Swap the scheme/host/port of `routed` for those of `base_override`,
/// keeping any path prefix of the override.
pub fn apply_override(routed: &str, base_override: Option<&str>) -> Result<String> {
    let Some(base) = base_override else {
        return Ok(routed.to_string());
    };
    let routed = Url::parse(routed)?;
    Ok(join_url(base, routed.path()))
}
