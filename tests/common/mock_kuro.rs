#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    http::Method,
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{net::TcpListener, task::JoinHandle};

use super::{encrypt_payload, CN_CAPTCHA_PLAYER, CN_MISSING_PLAYER, USER_TOKEN};

/// One request the mock received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub form: HashMap<String, String>,
    pub json: Value,
    /// Raw body, kept only by the catch-all echo routes.
    pub body: String,
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockState {
    fn record(&self, path: &str, headers: &HeaderMap, form: HashMap<String, String>, json: Value) {
        self.record_raw(Method::POST, path, headers, form, json, String::new());
    }

    fn record_raw(
        &self,
        method: Method,
        path: &str,
        headers: &HeaderMap,
        form: HashMap<String, String>,
        json: Value,
        body: String,
    ) {
        let headers = headers
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    v.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        self.requests.lock().expect("mock state poisoned").push(Recorded {
            method: method.to_string(),
            path: path.to_string(),
            headers,
            form,
            json,
            body,
        });
    }
}

/// Local stand-in for the community, game record and gacha services so
/// integration tests never leave the machine.
pub struct MockKuroServer {
    pub base_url: String,
    state: MockState,
    _task: JoinHandle<()>,
}

type FormBody = Form<HashMap<String, String>>;

fn ok(data: Value) -> Response {
    Json(json!({"code": 200, "msg": "请求成功", "data": data})).into_response()
}

fn fail(code: i64, msg: &str) -> Response {
    Json(json!({"code": code, "msg": msg})).into_response()
}

fn role_id(form: &HashMap<String, String>) -> u64 {
    form.get("roleId")
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

pub fn note_payload() -> Value {
    json!({
        "name": "漂泊者",
        "id": 100000001,
        "creatTime": 1716000000000i64,
        "activeDays": 30,
        "level": 60,
        "worldLevel": 6,
        "roleNum": 24,
        "soundBox": 5,
        "energy": 180,
        "maxEnergy": 240,
        "liveness": 100,
        "livenessMaxCount": 100,
        "livenessUnlock": true,
        "chapterId": 4,
        "bigCount": 3,
        "smallCount": 12,
        "achievementCount": 320,
        "boxList": [{"boxName": "朴素奇藏箱", "num": 120}],
        "showToGuest": true
    })
}

fn role_payload(role_id: i64) -> Value {
    json!({
        "roleId": role_id,
        "level": 90,
        "roleName": "忌炎",
        "roleIconUrl": "https://example.invalid/icon.png",
        "rolePicUrl": "https://example.invalid/pic.png",
        "starLevel": 5,
        "attributeId": 4,
        "attributeName": "气动",
        "weaponTypeId": 2,
        "weaponTypeName": "长刃",
        "acronym": "jy"
    })
}

fn role_detail_payload(role_id: i64) -> Value {
    json!({
        "role": role_payload(role_id),
        "level": 90,
        "chainList": [
            {"name": "一链", "order": 1, "description": "", "iconUrl": "", "unlocked": true},
            {"name": "二链", "order": 2, "description": "", "iconUrl": "", "unlocked": false}
        ],
        "weaponData": {
            "weapon": {
                "weaponId": 21020015,
                "weaponName": "苍鳞千嶂",
                "weaponType": 2,
                "weaponStarLevel": 5,
                "weaponIcon": "",
                "weaponEffectName": "",
                "effectDescription": ""
            },
            "level": 90,
            "resonLevel": 1
        },
        "phantomData": {"cost": 12, "equipPhantomList": [null]},
        "skillList": [{
            "skill": {"id": 1, "type": "常态攻击", "name": "攻击", "description": "", "iconUrl": ""},
            "level": 10
        }]
    })
}

fn widget_payload(refreshed: bool) -> Value {
    json!({
        "gameId": 3,
        "userId": 10000001,
        "serverTime": 1717286400,
        "serverId": "76402e5b20be2c39f095a152090afddc",
        "serverName": "鸣潮",
        "hasSignIn": refreshed,
        "roleId": 100000001,
        "roleName": "漂泊者",
        "energyData": {"name": "结晶波片", "status": 1, "cur": 200, "total": 240},
        "livenessData": {"name": "活跃度", "status": 1, "cur": 40, "total": 100},
        "battlePassData": [null]
    })
}

fn account_payload() -> Value {
    json!({
        "userId": 10000001,
        "gameId": 3,
        "serverId": "76402e5b20be2c39f095a152090afddc",
        "serverName": "鸣潮",
        "roleId": "100000001",
        "gameLevel": 60,
        "roleName": "漂泊者",
        "isDefault": true,
        "gameHeadUrl": null,
        "roleNum": 24,
        "fashionCollectionPercent": 0.4,
        "phantomPercent": 0.2,
        "achievementCount": 320,
        "actionRecoverSwitch": false
    })
}

fn mine_payload(account_id: &str) -> Value {
    json!({
        "collectCount": 0, "commentCount": 0, "fansCount": 1, "fansNewCount": 0,
        "followCount": 2, "gender": 1, "goldNum": 100, "headUrl": "",
        "ipRegion": "上海", "isFollow": 0, "isLoginUser": 1, "isMute": 0,
        "lastLoginModelType": "android", "lastLoginTime": "2024-06-01 12:00:00",
        "levelTotal": 3, "likeCount": 0, "postCount": 0,
        "registerTime": "2024-05-23", "signature": "", "signatureReviewStatus": 0,
        "status": 0, "userId": account_id, "userName": "rover"
    })
}

fn wish(item_id: u64, name: &str, time: &str, pool: &str) -> Value {
    json!({
        "cardPoolType": pool,
        "resourceId": item_id,
        "qualityLevel": 3,
        "resourceType": "武器",
        "name": name,
        "count": 1,
        "time": time
    })
}

async fn refresh_data(
    State(state): State<MockState>,
    headers: HeaderMap,
    Form(form): FormBody,
) -> Response {
    state.record("/gamer/roleBox/aki/refreshData", &headers, form, Value::Null);
    ok(json!(true))
}

async fn base_data(State(state): State<MockState>, headers: HeaderMap, Form(form): FormBody) -> Response {
    let missing = role_id(&form) == CN_MISSING_PLAYER;
    state.record("/gamer/roleBox/akiBox/baseData", &headers, form, Value::Null);
    if missing {
        return ok(Value::Null);
    }
    ok(json!(encrypt_payload(&note_payload())))
}

async fn role_data(State(state): State<MockState>, headers: HeaderMap, Form(form): FormBody) -> Response {
    state.record("/gamer/roleBox/akiBox/roleData", &headers, form, Value::Null);
    // Some deployments return this one unencrypted.
    ok(json!({"roleList": [role_payload(1404)], "showToGuest": true}))
}

async fn calabash_data(
    State(state): State<MockState>,
    headers: HeaderMap,
    Form(form): FormBody,
) -> Response {
    state.record("/gamer/roleBox/akiBox/calabashData", &headers, form, Value::Null);
    let payload = json!({
        "level": 8,
        "baseCatch": "55%",
        "strengthenCatch": "+30%",
        "catchQuality": 5,
        "cost": 12,
        "phantomList": [{
            "phantom": {"name": "鸣钟之龟", "phantomId": 390080005, "cost": 4, "iconUrl": "", "acronym": "mzzg"},
            "star": 5,
            "maxStar": 5
        }],
        "maxCount": 200,
        "unlockCount": 150
    });
    ok(json!(encrypt_payload(&payload)))
}

async fn explore_index(
    State(state): State<MockState>,
    headers: HeaderMap,
    Form(form): FormBody,
) -> Response {
    let country = form.get("countryCode").cloned().unwrap_or_default();
    state.record("/gamer/roleBox/akiBox/exploreIndex", &headers, form, Value::Null);
    let payload = json!({
        "countryCode": country.parse::<i64>().unwrap_or_default(),
        "countryName": "瑝珑",
        "countryProgress": 87.5,
        "areaInfoList": [{
            "areaId": 1,
            "areaProgress": 90,
            "areaName": "今州城",
            "itemList": [{"type": 1, "name": "宝箱", "progress": 95}]
        }],
        "detectionInfoList": [],
        "open": true
    });
    ok(json!(encrypt_payload(&payload)))
}

async fn role_detail(
    State(state): State<MockState>,
    headers: HeaderMap,
    Form(form): FormBody,
) -> Response {
    let id: i64 = form.get("id").and_then(|v| v.parse().ok()).unwrap_or_default();
    state.record("/gamer/roleBox/akiBox/getRoleDetail", &headers, form, Value::Null);
    let payload = if id == 0 {
        json!({"role": null, "level": null})
    } else {
        role_detail_payload(id)
    };
    ok(json!(encrypt_payload(&payload)))
}

async fn widget_refresh(
    State(state): State<MockState>,
    headers: HeaderMap,
    Form(form): FormBody,
) -> Response {
    state.record("/gamer/widget/game3/refresh", &headers, form, Value::Null);
    ok(widget_payload(true))
}

async fn widget_get(
    State(state): State<MockState>,
    headers: HeaderMap,
    Form(form): FormBody,
) -> Response {
    state.record("/gamer/widget/game3/getData", &headers, form, Value::Null);
    ok(widget_payload(false))
}

async fn mine(State(state): State<MockState>, headers: HeaderMap, Form(form): FormBody) -> Response {
    let token = headers
        .get("token")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let account_id = form.get("otherUserId").cloned().unwrap_or_default();
    state.record("/user/mineV2", &headers, form, Value::Null);
    if token != USER_TOKEN {
        return fail(220, "登录已过期，请重新登录");
    }
    ok(json!({"mine": mine_payload(&account_id)}))
}

async fn role_list(State(state): State<MockState>, headers: HeaderMap, Form(form): FormBody) -> Response {
    state.record("/gamer/role/list", &headers, form, Value::Null);
    ok(json!([account_payload()]))
}

async fn sign_in_info(
    State(state): State<MockState>,
    headers: HeaderMap,
    Form(form): FormBody,
) -> Response {
    state.record("/encourage/signIn/initSignInV2", &headers, form, Value::Null);
    ok(json!({
        "disposableGoodsList": [],
        "disposableSignNum": 0,
        "eventEndTimes": "",
        "eventStartTimes": "",
        "expendGold": 0,
        "expendNum": 0,
        "isSigIn": false,
        "nowServerTimes": "2024-06-02 10:00:00",
        "omissionNnm": 0,
        "openNotifica": false,
        "redirectContent": "",
        "redirectText": "",
        "redirectType": 0,
        "repleNum": 0,
        "sigInNum": 1,
        "signInGoodsConfigs": [
            {"goodsId": 1, "goodsName": "贝币", "goodsNum": 5000, "goodsUrl": "", "id": 1, "isGain": true, "serialNum": 0, "signId": 7},
            {"goodsId": 2, "goodsName": "星声", "goodsNum": 20, "goodsUrl": "", "id": 2, "isGain": false, "serialNum": 1, "signId": 7}
        ]
    }))
}

async fn sign_in(State(state): State<MockState>, headers: HeaderMap, Form(form): FormBody) -> Response {
    let captcha = role_id(&form) == CN_CAPTCHA_PLAYER;
    state.record("/encourage/signIn/v2", &headers, form, Value::Null);
    if captcha {
        return ok(json!({"gt": "gt-token", "challenge": "challenge-token", "success": 1}));
    }
    ok(json!({
        "todayList": [{"goodsId": 2, "goodsName": "星声", "goodsNum": 20, "goodsUrl": ""}],
        "tomorrowList": []
    }))
}

async fn event_list(State(state): State<MockState>, headers: HeaderMap, Form(form): FormBody) -> Response {
    state.record("/forum/companyEvent/findEventList", &headers, form, Value::Null);
    ok(json!({"list": [{"eventId": 1, "title": "版本活动"}], "total": 1}))
}

async fn gacha_query(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let record_id = body["recordId"].as_str().unwrap_or_default().to_string();
    let pool = body["cardPoolType"].as_u64().unwrap_or_default();
    state.record("/gacha/record/query", &headers, HashMap::new(), body);

    if record_id == "expired" {
        return Json(json!({"code": -1, "message": "record id error"})).into_response();
    }
    let items = match pool {
        1 => json!([
            wish(1404, "忌炎", "2024-06-01 12:00:00", "角色精准调谐"),
            wish(1404, "忌炎", "2024-06-01 12:00:00", "角色精准调谐"),
            wish(21010013, "暗夜长刃·玄明", "2024-06-01 12:00:01", "角色精准调谐")
        ]),
        3 => json!([wish(21010013, "暗夜长刃·玄明", "2024-05-30 08:00:00", "角色常驻调谐")]),
        _ => json!([]),
    };
    Json(json!({"code": 0, "message": "success", "data": items})).into_response()
}

async fn raw_ok() -> Response {
    ok(json!({"x": 1}))
}

async fn raw_cookie() -> Response {
    fail(220, "bad cookie")
}

async fn raw_gone() -> Response {
    (StatusCode::NOT_FOUND, "not found").into_response()
}

async fn raw_boom() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
}

async fn raw_slow() -> Response {
    tokio::time::sleep(Duration::from_secs(5)).await;
    ok(Value::Null)
}

async fn raw_badjson() -> Response {
    (StatusCode::OK, "{not-json").into_response()
}

async fn raw_echo(headers: HeaderMap) -> Response {
    let headers: HashMap<String, String> = headers
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
        .collect();
    ok(json!(headers))
}

/// Accepts any method and records it with the raw body.
async fn echo_request(
    State(state): State<MockState>,
    method: Method,
    uri: axum::http::Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let code = if uri.path().starts_with("/gacha/") { 0 } else { 200 };
    state.record_raw(method, uri.path(), &headers, HashMap::new(), Value::Null, body);
    Json(json!({"code": code, "msg": "ok", "data": null})).into_response()
}

impl MockKuroServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock server");
        let addr: SocketAddr = listener
            .local_addr()
            .expect("failed to get mock server addr");
        let base_url = format!("http://{}", addr);

        let state = MockState::default();
        let app = Router::new()
            .route("/gamer/roleBox/aki/refreshData", post(refresh_data))
            .route("/gamer/roleBox/akiBox/baseData", post(base_data))
            .route("/gamer/roleBox/akiBox/roleData", post(role_data))
            .route("/gamer/roleBox/akiBox/calabashData", post(calabash_data))
            .route("/gamer/roleBox/akiBox/exploreIndex", post(explore_index))
            .route("/gamer/roleBox/akiBox/getRoleDetail", post(role_detail))
            .route("/gamer/widget/game3/refresh", post(widget_refresh))
            .route("/gamer/widget/game3/getData", post(widget_get))
            .route("/user/mineV2", post(mine))
            .route("/gamer/role/list", post(role_list))
            .route("/encourage/signIn/initSignInV2", post(sign_in_info))
            .route("/encourage/signIn/v2", post(sign_in))
            .route("/forum/companyEvent/findEventList", post(event_list))
            .route("/gacha/record/query", post(gacha_query))
            .route("/forum/list", any(echo_request))
            .route("/gacha/record/echo", any(echo_request))
            .route("/raw/ok", get(raw_ok))
            .route("/raw/cookie", get(raw_cookie))
            .route("/raw/gone", get(raw_gone))
            .route("/raw/boom", get(raw_boom))
            .route("/raw/slow", get(raw_slow))
            .route("/raw/badjson", get(raw_badjson))
            .route("/raw/echo", get(raw_echo))
            .with_state(state.clone());

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("mock server failed");
        });

        Self {
            base_url,
            state,
            _task: task,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<Recorded> {
        self.state
            .requests
            .lock()
            .expect("mock state poisoned")
            .clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

impl Drop for MockKuroServer {
    fn drop(&mut self) {
        self._task.abort();
    }
}
