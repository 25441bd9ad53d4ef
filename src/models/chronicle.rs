//! Game record (battle chronicle) models.
//!
//! Timestamps are kept as the raw wire integers; use
//! [`timestamp_to_datetime`](super::timestamp_to_datetime) to convert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{lenient, timestamp_to_datetime, McRole};

/// One progress bar on the home widget (stamina, liveness, battle pass).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McNoteDataEntryModel {
    pub name: String,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub refresh_time_stamp: Option<i64>,
    #[serde(default)]
    pub expire_time_stamp: Option<i64>,
    pub status: i64,
    pub cur: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McNoteWidget {
    pub game_id: i64,
    #[serde(rename = "userId", deserialize_with = "lenient::i64")]
    pub account_id: i64,
    pub server_time: i64,
    pub server_id: String,
    pub server_name: String,
    pub has_sign_in: bool,
    #[serde(rename = "roleId", deserialize_with = "lenient::u64")]
    pub uid: u64,
    #[serde(rename = "roleName")]
    pub nickname: String,
    pub energy_data: McNoteDataEntryModel,
    #[serde(default)]
    pub liveness_data: Option<McNoteDataEntryModel>,
    #[serde(default)]
    pub battle_pass_data: Vec<Option<McNoteDataEntryModel>>,
}

impl McNoteWidget {
    pub fn current_stamina(&self) -> i64 {
        self.energy_data.cur
    }

    pub fn max_stamina(&self) -> i64 {
        self.energy_data.total
    }

    pub fn current_liveness(&self) -> i64 {
        self.liveness_data.as_ref().map_or(0, |d| d.cur)
    }

    pub fn max_liveness(&self) -> i64 {
        self.liveness_data.as_ref().map_or(0, |d| d.total)
    }

    pub fn server_datetime(&self) -> Option<DateTime<Utc>> {
        timestamp_to_datetime(self.server_time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McNoteBoxListItem {
    pub box_name: String,
    pub num: i64,
}

/// Account overview from the game record home page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McNote {
    #[serde(rename = "name")]
    pub nickname: String,
    #[serde(rename = "id", deserialize_with = "lenient::u64")]
    pub uid: u64,
    pub creat_time: i64,
    pub active_days: i64,
    pub level: i64,
    pub world_level: i64,
    pub role_num: i64,
    pub sound_box: i64,
    #[serde(rename = "energy")]
    pub current_stamina: i64,
    #[serde(rename = "maxEnergy")]
    pub max_stamina: i64,
    #[serde(rename = "liveness")]
    pub current_liveness: i64,
    #[serde(rename = "livenessMaxCount")]
    pub max_liveness: i64,
    pub liveness_unlock: bool,
    pub chapter_id: i64,
    pub big_count: i64,
    pub small_count: i64,
    pub achievement_count: i64,
    #[serde(default)]
    pub box_list: Vec<McNoteBoxListItem>,
    pub show_to_guest: bool,
}

impl McNote {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        timestamp_to_datetime(self.creat_time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct McExplorerAreaItem {
    #[serde(rename = "type")]
    pub item_type: i64,
    pub name: String,
    pub progress: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McExplorerArea {
    pub area_id: i64,
    pub area_progress: i64,
    pub area_name: String,
    #[serde(default)]
    pub item_list: Vec<McExplorerAreaItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McExplorerDetection {
    pub detection_id: i64,
    pub detection_name: String,
    pub detection_icon: String,
    pub level: i64,
    pub level_name: String,
    pub acronym: String,
}

/// Exploration progress for one country.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McExplorer {
    pub country_code: i64,
    pub country_name: String,
    pub country_progress: f64,
    #[serde(default)]
    pub area_info_list: Vec<McExplorerArea>,
    #[serde(default)]
    pub detection_info_list: Vec<McExplorerDetection>,
    pub open: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McRoles {
    #[serde(default)]
    pub role_list: Vec<McRole>,
    pub show_to_guest: bool,
}

/// Resonance chain node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McRoleChain {
    pub name: String,
    pub order: i64,
    pub description: String,
    pub icon_url: String,
    pub unlocked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McRoleWeaponDetail {
    pub weapon_id: i64,
    pub weapon_name: String,
    pub weapon_type: i64,
    pub weapon_star_level: i64,
    pub weapon_icon: String,
    pub weapon_effect_name: String,
    pub effect_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McRoleWeaponData {
    pub weapon: McRoleWeaponDetail,
    pub level: i64,
    pub reson_level: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McRolePhantomProp {
    pub phantom_prop_id: i64,
    pub name: String,
    pub phantom_id: i64,
    pub quality: i64,
    pub cost: i64,
    pub icon_url: String,
    pub skill_description: String,
}

/// Sonata set bonus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McRolePhantomFetterDetail {
    pub group_id: i64,
    pub name: String,
    pub icon_url: String,
    pub num: i64,
    pub first_description: String,
    pub second_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McRolePhantomDetail {
    pub phantom_prop: McRolePhantomProp,
    pub cost: i64,
    pub quality: i64,
    pub level: i64,
    pub fetter_detail: McRolePhantomFetterDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McRolePhantomData {
    pub cost: i64,
    /// Empty slots come back as `null`.
    #[serde(default)]
    pub equip_phantom_list: Option<Vec<Option<McRolePhantomDetail>>>,
}

impl McRolePhantomData {
    pub fn equipped(&self) -> impl Iterator<Item = &McRolePhantomDetail> {
        self.equip_phantom_list.iter().flatten().flatten()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McRoleSkillDetail {
    pub id: i64,
    #[serde(rename = "type")]
    pub skill_type: String,
    pub name: String,
    pub description: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct McRoleSkill {
    pub skill: McRoleSkillDetail,
    pub level: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McRoleDetail {
    pub role: McRole,
    pub level: i64,
    #[serde(default)]
    pub chain_list: Vec<McRoleChain>,
    pub weapon_data: McRoleWeaponData,
    pub phantom_data: McRolePhantomData,
    #[serde(default)]
    pub skill_list: Vec<McRoleSkill>,
}

impl McRoleDetail {
    /// Number of unlocked resonance chain nodes.
    pub fn chain_level(&self) -> usize {
        self.chain_list.iter().filter(|c| c.unlocked).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McCalabashPhantomItem {
    pub name: String,
    pub phantom_id: i64,
    pub cost: i64,
    pub icon_url: String,
    pub acronym: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McCalabashPhantom {
    pub phantom: McCalabashPhantomItem,
    pub star: i64,
    pub max_star: i64,
}

/// Data bank (echo collection) summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McCalabash {
    pub level: i64,
    pub base_catch: String,
    pub strengthen_catch: String,
    pub catch_quality: i64,
    pub cost: i64,
    #[serde(default)]
    pub phantom_list: Vec<McCalabashPhantom>,
    pub max_count: i64,
    pub unlock_count: i64,
}
