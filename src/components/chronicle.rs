use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::crypto::decrypt;
use crate::enums::{Game, Region};
use crate::error::{ApiError, ApiErrorKind, KuroError, Result};
use crate::http::Request;
use crate::models::{
    from_payload, McCalabash, McExplorer, McNote, McNoteWidget, McRoleDetail, McRoles,
};
use crate::player::recognize_server;
use crate::routes::{join_url, BBS_URL};
use crate::session::Session;

/// Endpoint families under `gamer/`.
pub const ROLE_BOX: &str = "roleBox";
pub const WIDGET: &str = "widget";

const CHANNEL_ID: &str = "19";

/// Options for one game record call.
#[derive(Debug, Clone)]
pub struct GameRecordRequest<'r> {
    pub endpoint: &'r str,
    pub endpoint_type: &'r str,
    pub player_id: Option<u64>,
    pub game: Option<Game>,
    pub data: Option<Value>,
    pub lang: Option<&'r str>,
    pub region: Option<Region>,
    pub need_decrypt: bool,
}

impl<'r> GameRecordRequest<'r> {
    pub fn new(endpoint: &'r str) -> Self {
        Self {
            endpoint,
            endpoint_type: ROLE_BOX,
            player_id: None,
            game: None,
            data: None,
            lang: None,
            region: None,
            need_decrypt: false,
        }
    }

    pub fn endpoint_type(mut self, endpoint_type: &'r str) -> Self {
        self.endpoint_type = endpoint_type;
        self
    }

    pub fn player(mut self, player_id: Option<u64>) -> Self {
        self.player_id = player_id;
        self
    }

    pub fn game(mut self, game: Option<Game>) -> Self {
        self.game = game;
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn lang(mut self, lang: Option<&'r str>) -> Self {
        self.lang = lang;
        self
    }

    pub fn region(mut self, region: Option<Region>) -> Self {
        self.region = region;
        self
    }

    pub fn decrypted(mut self) -> Self {
        self.need_decrypt = true;
        self
    }
}

/// Battle chronicle reads for one game role.
///
/// Most reads call [`ChronicleClient::refresh_data`] first unless
/// `auto_refresh` is false, in which case the server may return stale data.
pub struct ChronicleClient<'a> {
    session: &'a Session,
}

impl<'a> ChronicleClient<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Send a game record request. The role template (`gameId`, `roleId`,
    /// `serverId`) is merged under the caller's body.
    pub async fn request_game_record(&self, request: GameRecordRequest<'_>) -> Result<Value> {
        let game = self.session.resolve_game(request.game)?;
        let player_id = self.session.resolve_player_id(request.player_id)?;
        let region = request.region.unwrap_or(self.session.region());

        let base = join_url(BBS_URL.get_url(region)?, "gamer");
        let base = join_url(&base, request.endpoint_type);
        let url = self.session.route(&join_url(&base, request.endpoint))?;

        let body = merge_body(role_template(player_id, game)?, request.data)?;
        let lang = request
            .lang
            .map(String::from)
            .unwrap_or_else(|| self.session.lang().to_string());

        let data = self
            .session
            .lab_request(Request::new(url).with_form(body), Some(&lang))
            .await?;

        if request.need_decrypt {
            decode_payload(data)
        } else {
            Ok(data)
        }
    }

    /// Ask the server to rebuild its cached records for the role.
    pub async fn refresh_data(&self, player_id: Option<u64>, game: Option<Game>) -> Result<bool> {
        let data = self
            .request_game_record(
                GameRecordRequest::new("aki/refreshData")
                    .player(player_id)
                    .game(game),
            )
            .await?;
        Ok(data.as_bool().unwrap_or(!data.is_null()))
    }

    async fn maybe_refresh(&self, player_id: Option<u64>, auto_refresh: bool) -> Result<()> {
        if auto_refresh {
            self.refresh_data(player_id, Some(Game::Mc)).await?;
        }
        Ok(())
    }

    async fn fetch<T: DeserializeOwned>(&self, request: GameRecordRequest<'_>) -> Result<T> {
        from_payload(self.request_game_record(request).await?)
    }

    pub async fn get_mc_notes(
        &self,
        player_id: Option<u64>,
        lang: Option<&str>,
        auto_refresh: bool,
    ) -> Result<McNote> {
        self.maybe_refresh(player_id, auto_refresh).await?;
        let data = self
            .request_game_record(
                GameRecordRequest::new("akiBox/baseData")
                    .player(player_id)
                    .game(Some(Game::Mc))
                    .lang(lang)
                    .decrypted(),
            )
            .await?;
        if player_id.is_some() && data.is_null() {
            return Err(ApiError::new(ApiErrorKind::AccountNotFound).into());
        }
        from_payload(data)
    }

    /// Home screen widget. With `auto_refresh` the widget's own refresh
    /// endpoint is used instead of a separate refresh call.
    pub async fn get_mc_notes_widget(
        &self,
        player_id: Option<u64>,
        lang: Option<&str>,
        auto_refresh: bool,
    ) -> Result<McNoteWidget> {
        let endpoint = if auto_refresh {
            "game3/refresh"
        } else {
            "game3/getData"
        };
        self.fetch(
            GameRecordRequest::new(endpoint)
                .endpoint_type(WIDGET)
                .player(player_id)
                .game(Some(Game::Mc))
                .lang(lang)
                .data(json!({ "type": "2", "sizeType": "1" })),
        )
        .await
    }

    pub async fn get_mc_explorer(
        &self,
        player_id: Option<u64>,
        country_code: u32,
        lang: Option<&str>,
        auto_refresh: bool,
    ) -> Result<McExplorer> {
        self.maybe_refresh(player_id, auto_refresh).await?;
        self.fetch(
            GameRecordRequest::new("akiBox/exploreIndex")
                .player(player_id)
                .game(Some(Game::Mc))
                .lang(lang)
                .data(json!({ "channelId": CHANNEL_ID, "countryCode": country_code.to_string() }))
                .decrypted(),
        )
        .await
    }

    pub async fn get_mc_roles(
        &self,
        player_id: Option<u64>,
        lang: Option<&str>,
        auto_refresh: bool,
    ) -> Result<McRoles> {
        self.maybe_refresh(player_id, auto_refresh).await?;
        self.fetch(
            GameRecordRequest::new("akiBox/roleData")
                .player(player_id)
                .game(Some(Game::Mc))
                .lang(lang)
                .decrypted(),
        )
        .await
    }

    pub async fn get_mc_calabash(
        &self,
        player_id: Option<u64>,
        lang: Option<&str>,
        auto_refresh: bool,
    ) -> Result<McCalabash> {
        self.maybe_refresh(player_id, auto_refresh).await?;
        self.fetch(
            GameRecordRequest::new("akiBox/calabashData")
                .player(player_id)
                .game(Some(Game::Mc))
                .lang(lang)
                .decrypted(),
        )
        .await
    }

    pub async fn get_mc_role_detail(
        &self,
        player_id: Option<u64>,
        role_id: i64,
        lang: Option<&str>,
        auto_refresh: bool,
    ) -> Result<McRoleDetail> {
        self.maybe_refresh(player_id, auto_refresh).await?;
        let data = self
            .request_game_record(
                GameRecordRequest::new("akiBox/getRoleDetail")
                    .player(player_id)
                    .game(Some(Game::Mc))
                    .lang(lang)
                    .data(json!({ "channelId": CHANNEL_ID, "countryCode": "1", "id": role_id }))
                    .decrypted(),
            )
            .await?;
        if data.get("level").map_or(true, Value::is_null) {
            return Err(KuroError::Validation("Role not found.".into()));
        }
        from_payload(data)
    }
}

fn role_template(player_id: u64, game: Game) -> Result<Map<String, Value>> {
    let server_id = recognize_server(player_id, game)?;
    let mut body = Map::new();
    body.insert("gameId".into(), json!(game.game_id()));
    body.insert("roleId".into(), json!(player_id));
    body.insert("serverId".into(), json!(server_id));
    Ok(body)
}

/// Caller keys override the template.
fn merge_body(mut template: Map<String, Value>, data: Option<Value>) -> Result<Map<String, Value>> {
    match data {
        None | Some(Value::Null) => Ok(template),
        Some(Value::Object(extra)) => {
            template.extend(extra);
            Ok(template)
        }
        Some(other) => Err(KuroError::Validation(format!(
            "Game record body must be an object, got {}",
            other
        ))),
    }
}

/// Decode an encrypted payload. Plain objects are passed through.
fn decode_payload(data: Value) -> Result<Value> {
    match data {
        Value::String(cipher) => Ok(serde_json::from_str(&decrypt(&cipher)?)?),
        Value::Null => Ok(Value::Null),
        other => {
            warn!("expected an encrypted payload, using it as-is");
            Ok(other)
        }
    }
}
