use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Service region. Overseas and Chinese accounts live on separate hosts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantArray,
)]
pub enum Region {
    #[default]
    #[serde(rename = "os")]
    #[strum(serialize = "os")]
    Overseas,
    #[serde(rename = "cn")]
    #[strum(serialize = "cn")]
    Chinese,
}

/// Supported games. MC is Wuthering Waves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantArray,
)]
pub enum Game {
    #[serde(rename = "G152")]
    #[strum(serialize = "G152")]
    Mc,
}

impl Game {
    /// Numeric id used as `gameId` in request bodies.
    pub fn game_id(self) -> u32 {
        match self {
            Game::Mc => 3,
        }
    }
}
