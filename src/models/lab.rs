use serde::{Deserialize, Serialize};

use super::lenient;

/// A game role bound to the community account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(deserialize_with = "lenient::i64")]
    pub user_id: i64,
    pub game_id: i64,
    #[serde(rename = "serverId")]
    pub server: String,
    pub server_name: String,
    #[serde(rename = "roleId", deserialize_with = "lenient::u64")]
    pub uid: u64,
    #[serde(rename = "gameLevel")]
    pub level: i64,
    #[serde(rename = "roleName")]
    pub nickname: String,
    pub is_default: bool,
    #[serde(default)]
    pub game_head_url: Option<String>,
    pub role_num: i64,
    pub fashion_collection_percent: f64,
    pub phantom_percent: f64,
    pub achievement_count: i64,
    pub action_recover_switch: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisposableGoodsListItem {
    pub goods_id: i64,
    #[serde(rename = "goodsName")]
    pub name: String,
    #[serde(rename = "goodsNum")]
    pub amount: i64,
    #[serde(rename = "goodsUrl")]
    pub icon: String,
    pub is_gain: bool,
    pub serial_num: i64,
}

/// One day of the monthly sign-in calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignInGoodsConfig {
    pub goods_id: i64,
    #[serde(rename = "goodsName")]
    pub name: String,
    #[serde(rename = "goodsNum")]
    pub amount: i64,
    #[serde(rename = "goodsUrl")]
    pub icon: String,
    pub id: i64,
    pub is_gain: bool,
    pub serial_num: i64,
    pub sign_id: i64,
}

/// Monthly sign-in state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyRewardInfo {
    #[serde(default)]
    pub disposable_goods_list: Vec<DisposableGoodsListItem>,
    pub disposable_sign_num: i64,
    pub event_end_times: String,
    pub event_start_times: String,
    pub expend_gold: i64,
    pub expend_num: i64,
    #[serde(rename = "isSigIn")]
    pub signed_in: bool,
    pub now_server_times: String,
    // Upstream spelling.
    #[serde(rename = "omissionNnm")]
    pub missed_rewards: i64,
    pub open_notifica: bool,
    pub redirect_content: String,
    pub redirect_text: String,
    pub redirect_type: i64,
    pub reple_num: i64,
    #[serde(rename = "sigInNum")]
    pub claimed_rewards: i64,
    #[serde(default)]
    pub sign_in_goods_configs: Vec<SignInGoodsConfig>,
}

impl DailyRewardInfo {
    /// Calendar entry for today's reward, if the month has one left.
    pub fn next_reward(&self) -> Option<&SignInGoodsConfig> {
        self.sign_in_goods_configs.iter().find(|g| !g.is_gain)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignInGoods {
    pub goods_id: i64,
    #[serde(rename = "goodsName", default)]
    pub name: String,
    #[serde(rename = "goodsNum")]
    pub amount: i64,
    #[serde(rename = "goodsUrl", default)]
    pub icon: String,
}

/// Rewards granted by a successful sign-in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignInResult {
    #[serde(default)]
    pub today_list: Vec<SignInGoods>,
    #[serde(default)]
    pub tomorrow_list: Vec<SignInGoods>,
}

/// Community profile of the logged in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mine {
    pub collect_count: i64,
    pub comment_count: i64,
    pub fans_count: i64,
    pub fans_new_count: i64,
    pub follow_count: i64,
    pub gender: i64,
    pub gold_num: i64,
    pub head_url: String,
    pub ip_region: String,
    pub is_follow: i64,
    pub is_login_user: i64,
    pub is_mute: i64,
    pub last_login_model_type: String,
    pub last_login_time: String,
    pub level_total: i64,
    pub like_count: i64,
    pub post_count: i64,
    pub register_time: String,
    pub signature: String,
    pub signature_review_status: i64,
    pub status: i64,
    pub user_id: String,
    pub user_name: String,
}
