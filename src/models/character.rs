use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McRole {
    #[serde(deserialize_with = "lenient::i64")]
    pub role_id: i64,
    pub level: i64,
    pub role_name: String,
    pub role_icon_url: String,
    pub role_pic_url: String,
    pub star_level: i64,
    pub attribute_id: i64,
    pub attribute_name: String,
    pub weapon_type_id: i64,
    pub weapon_type_name: String,
    pub acronym: String,
}
