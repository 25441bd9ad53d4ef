//! Typed records built from response payloads.
//!
//! Rust field names are snake_case; wire names come from `serde` renames, so
//! serialising a model reproduces the payload it was read from.

pub mod character;
pub mod chronicle;
pub mod lab;
pub mod wish;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

pub use character::McRole;
pub use chronicle::{
    McCalabash, McCalabashPhantom, McCalabashPhantomItem, McExplorer, McExplorerArea,
    McExplorerAreaItem, McExplorerDetection, McNote, McNoteBoxListItem, McNoteDataEntryModel,
    McNoteWidget, McRoleChain, McRoleDetail, McRolePhantomData, McRolePhantomDetail,
    McRolePhantomFetterDetail, McRolePhantomProp, McRoleSkill, McRoleSkillDetail,
    McRoleWeaponData, McRoleWeaponDetail, McRoles,
};
pub use lab::{
    Account, DailyRewardInfo, DisposableGoodsListItem, Mine, SignInGoods, SignInGoodsConfig,
    SignInResult,
};
pub use wish::{McBannerType, McWish};

/// Build a model from a payload. Missing required fields surface as
/// `KuroError::InvalidJson`.
pub fn from_payload<T: DeserializeOwned>(data: Value) -> Result<T> {
    Ok(serde_json::from_value(data)?)
}

/// Values above this are taken to be milliseconds.
const MILLIS_THRESHOLD: i64 = 20_000_000_000;

/// Convert a wire timestamp (seconds or milliseconds) to UTC.
pub fn timestamp_to_datetime(value: i64) -> Option<DateTime<Utc>> {
    if value.unsigned_abs() > MILLIS_THRESHOLD.unsigned_abs() {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

/// Integers the API sometimes sends as strings.
pub(crate) mod lenient {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        Str(String),
    }

    pub fn i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match IntOrString::deserialize(deserializer)? {
            IntOrString::Int(v) => Ok(v),
            IntOrString::Str(s) => s.trim().parse().map_err(de::Error::custom),
        }
    }

    pub fn u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let v = i64(deserializer)?;
        u64::try_from(v).map_err(de::Error::custom)
    }
}
