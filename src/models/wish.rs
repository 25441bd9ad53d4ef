use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::lenient;

/// Gacha pool category, the `cardPoolType` request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum McBannerType {
    /// Rotating character banner.
    Character = 1,
    /// Rotating weapon banner.
    Weapon = 2,
    Standard = 3,
    StandardWeapon = 4,
    Temporary = 5,
    TemporarySelf = 6,
    TemporaryGift = 7,
}

impl McBannerType {
    pub const ALL: [McBannerType; 7] = [
        McBannerType::Character,
        McBannerType::Weapon,
        McBannerType::Standard,
        McBannerType::StandardWeapon,
        McBannerType::Temporary,
        McBannerType::TemporarySelf,
        McBannerType::TemporaryGift,
    ];

    pub fn value(self) -> u32 {
        self as u32
    }
}

impl From<McBannerType> for u32 {
    fn from(banner: McBannerType) -> Self {
        banner.value()
    }
}

impl TryFrom<u32> for McBannerType {
    type Error = UnknownBannerType;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        McBannerType::ALL
            .iter()
            .copied()
            .find(|b| b.value() == value)
            .ok_or(UnknownBannerType(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownBannerType(pub u32);

impl fmt::Display for UnknownBannerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not a valid banner type", self.0)
    }
}

impl std::error::Error for UnknownBannerType {}

/// A single pull. `id` is synthetic and assigned after sorting, see
/// [`WishClient::fix_wish_item_id`](crate::components::wish::WishClient::fix_wish_item_id).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct McWish {
    #[serde(default)]
    pub id: u128,
    #[serde(rename = "resourceType")]
    pub item_type: String,
    #[serde(rename = "resourceId", deserialize_with = "lenient::u64")]
    pub item_id: u64,
    pub name: String,
    #[serde(rename = "qualityLevel")]
    pub rarity: i64,
    pub count: i64,
    #[serde(with = "wish_time")]
    pub time: DateTime<FixedOffset>,
    #[serde(rename = "cardPoolType")]
    pub banner_name: String,
    #[serde(default)]
    pub banner_type: Option<McBannerType>,
}

impl McWish {
    pub fn timestamp(&self) -> i64 {
        self.time.timestamp()
    }
}

/// `YYYY-MM-DD HH:MM:SS`, server local time (UTC+8).
pub(crate) mod wish_time {
    use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    const OFFSET_SECS: i32 = 8 * 3600;

    pub fn parse(value: &str) -> Result<DateTime<FixedOffset>, String> {
        let offset = FixedOffset::east_opt(OFFSET_SECS).ok_or("invalid offset")?;
        let naive = NaiveDateTime::parse_from_str(value.trim(), FORMAT)
            .map_err(|e| format!("invalid wish time {:?}: {}", value, e))?;
        offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| format!("ambiguous wish time {:?}", value))
    }

    pub fn serialize<S: Serializer>(
        time: &DateTime<FixedOffset>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<FixedOffset>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }
}
