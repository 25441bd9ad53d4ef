use std::collections::HashMap;

use chrono::{FixedOffset, Utc};
use serde_json::{json, Map, Value};
use wreq::Method;

use crate::enums::{Game, Region};
use crate::error::{ApiError, ApiErrorKind, KuroError, Result};
use crate::http::Request;
use crate::models::{from_payload, Account, DailyRewardInfo, Mine, SignInResult};
use crate::player::recognize_server;
use crate::routes::{join_url, BBS_URL};
use crate::session::Session;

/// Per-call overrides for [`LabClient::request_bbs`].
#[derive(Debug, Clone, Default)]
pub struct BbsOptions {
    pub lang: Option<String>,
    pub region: Option<Region>,
    pub method: Option<Method>,
    pub params: Vec<(String, String)>,
    pub data: Option<Map<String, Value>>,
    pub headers: HashMap<String, String>,
}

impl BbsOptions {
    pub fn with_data(data: Value) -> Self {
        Self {
            data: data.as_object().cloned(),
            ..Self::default()
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

/// Community account operations.
pub struct LabClient<'a> {
    session: &'a Session,
}

impl<'a> LabClient<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn request_bbs(&self, endpoint: &str, options: BbsOptions) -> Result<Value> {
        let region = options.region.unwrap_or(self.session.region());
        let lang = options
            .lang
            .unwrap_or_else(|| self.session.lang().to_string());

        let url = self.session.route(&join_url(BBS_URL.get_url(region)?, endpoint))?;
        let mut request = Request::new(url).with_headers(options.headers);
        request.method = options.method;
        request.params = options.params;
        if let Some(data) = options.data {
            request = request.with_form(data);
        }

        self.session.lab_request(request, Some(&lang)).await
    }

    pub async fn find_event_list(
        &self,
        event_type: u32,
        game_id: u32,
        page_no: u32,
        page_size: u32,
    ) -> Result<Value> {
        let data = json!({
            "eventType": event_type.to_string(),
            "gameId": game_id.to_string(),
            "pageNo": page_no.to_string(),
            "pageSize": page_size.to_string(),
        });
        self.request_bbs("forum/companyEvent/findEventList", BbsOptions::with_data(data))
            .await
    }

    /// Check a user token by fetching the profile it belongs to.
    pub async fn verify_token(
        &self,
        user_token: Option<&str>,
        account_id: Option<i64>,
    ) -> Result<Mine> {
        let user_token = user_token.or(self.session.user_token()).ok_or_else(|| {
            KuroError::Validation("The 'user_token' argument cannot be None.".into())
        })?;
        let account_id = self.session.resolve_account_id(account_id)?;

        let options = BbsOptions::with_data(json!({ "otherUserId": account_id.to_string() }))
            .header("token", user_token);
        let mut data = self.request_bbs("user/mineV2", options).await?;

        from_payload(data.get_mut("mine").map(Value::take).unwrap_or_default())
    }

    /// Game roles bound to the account.
    pub async fn get_game_accounts(&self, game: Option<Game>) -> Result<Vec<Account>> {
        let game = self.session.resolve_game(game)?;
        let data = self
            .request_bbs(
                "gamer/role/list",
                BbsOptions::with_data(json!({ "gameId": game.game_id() })),
            )
            .await?;
        if data.is_null() {
            return Ok(Vec::new());
        }
        from_payload(data)
    }

    pub async fn get_daily_reward_info(
        &self,
        player_id: Option<u64>,
        game: Option<Game>,
    ) -> Result<DailyRewardInfo> {
        let body = self.sign_in_body(player_id, game)?;
        let data = self
            .request_bbs("encourage/signIn/initSignInV2", BbsOptions::with_data(body))
            .await?;
        from_payload(data)
    }

    /// Claim today's sign-in reward. A captcha challenge comes back as
    /// `GeetestTriggered` carrying the tokens to solve it with.
    pub async fn claim_daily_reward(
        &self,
        player_id: Option<u64>,
        game: Option<Game>,
    ) -> Result<SignInResult> {
        let mut body = self.sign_in_body(player_id, game)?;
        body["reqMonth"] = Value::String(server_month());

        let data = self
            .request_bbs("encourage/signIn/v2", BbsOptions::with_data(body))
            .await?;

        if let Some((gt, challenge)) = geetest_tokens(&data) {
            return Err(ApiError::new(ApiErrorKind::GeetestTriggered { gt, challenge }).into());
        }
        if data.is_null() || data.as_bool().is_some() {
            return Ok(SignInResult::default());
        }
        from_payload(data)
    }

    fn sign_in_body(&self, player_id: Option<u64>, game: Option<Game>) -> Result<Value> {
        let game = self.session.resolve_game(game)?;
        let player_id = self.session.resolve_player_id(player_id)?;
        let account_id = self.session.resolve_account_id(None)?;
        let server_id = recognize_server(player_id, game)?;
        Ok(json!({
            "gameId": game.game_id(),
            "serverId": server_id,
            "roleId": player_id.to_string(),
            "userId": account_id.to_string(),
        }))
    }
}

/// Current month as the sign-in service expects it (`MM`, UTC+8).
fn server_month() -> String {
    let now = Utc::now();
    match FixedOffset::east_opt(8 * 3600) {
        Some(offset) => now.with_timezone(&offset).format("%m").to_string(),
        None => now.format("%m").to_string(),
    }
}

fn geetest_tokens(data: &Value) -> Option<(String, String)> {
    let gt = data.get("gt")?.as_str()?;
    let challenge = data.get("challenge")?.as_str()?;
    Some((gt.to_string(), challenge.to_string()))
}
