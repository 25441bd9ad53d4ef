//! Player id -> game server / region resolution.

use crate::enums::{Game, Region};
use crate::error::{KuroError, Result};

pub const MC_CN_SERVER: &str = "76402e5b20be2c39f095a152090afddc";
pub const MC_AMERICA_SERVER: &str = "591d6af3a3090d8ea00d8f86cf6d7501";
pub const MC_EUROPE_SERVER: &str = "6eb2a235b30d05efd77bedb5cf60999e";
pub const MC_ASIA_SERVER: &str = "86d52186155b148b5c138ceb41be9650";
pub const MC_HMT_SERVER: &str = "919752ae5ea09c1ced910dd668a63ffb";
pub const MC_SEA_SERVER: &str = "10cd7254d57e58ae560b15d51e34b4c8";

/// Expected number of digits in a player id.
pub fn uid_length(game: Game) -> u32 {
    match game {
        Game::Mc => 9,
    }
}

/// Leading digit -> server id.
const MC_SERVERS: &[(u64, &str)] = &[
    (1, MC_CN_SERVER),
    (2, MC_CN_SERVER),
    (5, MC_AMERICA_SERVER),
    (6, MC_EUROPE_SERVER),
    (7, MC_ASIA_SERVER),
    (8, MC_HMT_SERVER),
    (9, MC_SEA_SERVER),
];

/// Region -> leading digits.
const MC_REGIONS: &[(Region, &[u64])] = &[
    (Region::Chinese, &[1, 2]),
    (Region::Overseas, &[5, 6, 7, 8, 9]),
];

fn servers(game: Game) -> &'static [(u64, &'static str)] {
    match game {
        Game::Mc => MC_SERVERS,
    }
}

fn regions(game: Game) -> &'static [(Region, &'static [u64])] {
    match game {
        Game::Mc => MC_REGIONS,
    }
}

/// Digits above the last `uid_length - 1` positions of `player_id`.
///
/// Fails when the id is shorter than the game's uid length.
pub fn leading_digit(player_id: u64, game: Game) -> Result<u64> {
    let digit = player_id / 10u64.pow(uid_length(game) - 1);
    if digit == 0 {
        return Err(KuroError::Validation(format!(
            "Invalid player id {}: expected {} digits.",
            player_id,
            uid_length(game)
        )));
    }
    Ok(digit)
}

pub fn recognize_server(player_id: u64, game: Game) -> Result<&'static str> {
    let digit = leading_digit(player_id, game)?;
    servers(game)
        .iter()
        .find(|(d, _)| *d == digit)
        .map(|(_, server)| *server)
        .ok_or_else(|| {
            KuroError::Validation(format!("Server for player id {} not found.", player_id))
        })
}

pub fn recognize_mc_server(player_id: u64) -> Result<&'static str> {
    recognize_server(player_id, Game::Mc)
}

/// Region owning `player_id`, or `None` when no bucket matches.
pub fn recognize_region(player_id: u64, game: Game) -> Option<Region> {
    let digit = leading_digit(player_id, game).ok()?;
    regions(game)
        .iter()
        .find(|(_, digits)| digits.contains(&digit))
        .map(|(region, _)| *region)
}
