use std::collections::HashMap;
use std::sync::atomic::{AtomicU8, Ordering};

use serde_json::Value;
use tracing::info;
use wreq::{header::COOKIE, Method};

use crate::config::ClientConfig;
use crate::cookies::CookieJar;
use crate::envelope::{ApiEnvelope, SUCCESS_CODE};
use crate::enums::{Game, Region};
use crate::error::{ApiError, KuroError, Result};
use crate::http::{HttpClient, RawResponse, Request};
use crate::routes::apply_override;

const DEVICE_NAME: &str = "KuroNet Build 114514";
const DEV_CODE: &str = "D006C4D753D3D0049DF4339D3562C11A6676CDDB";
const DISTINCT_ID: &str = "ac442a9e-0085-4fd3-8a31-583275dfdc35";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Active,
    Closed,
}

impl SessionState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => SessionState::Uninitialized,
            1 => SessionState::Active,
            _ => SessionState::Closed,
        }
    }
}

/// Shared state for one logical API session: transport, credentials and
/// defaults. Domain clients borrow it for each call.
///
/// Lifecycle: uninitialized -> active (first request or [`Session::initialize`])
/// -> closed ([`Session::close`]). A closed session never reopens.
pub struct Session {
    http: HttpClient,
    cookies: CookieJar,
    headers: HashMap<String, String>,
    user_token: Option<String>,
    account_id: Option<i64>,
    player_id: Option<u64>,
    region: Region,
    lang: String,
    game: Option<Game>,
    api_base_override: Option<String>,
    state: AtomicU8,
}

impl Session {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let cookies = match config.cookies.as_deref() {
            Some(raw) => CookieJar::parse(raw)?,
            None => CookieJar::new(),
        };
        let http = HttpClient::new(config.timeout(), config.connect_timeout())?;

        Ok(Self {
            http,
            user_token: config
                .user_token
                .or_else(|| cookies.user_token().map(String::from)),
            account_id: config.account_id.or_else(|| cookies.account_id()),
            player_id: config.player_id,
            cookies,
            headers: config.headers,
            region: config.region,
            lang: config.lang,
            game: None,
            api_base_override: config.api_base_override,
            state: AtomicU8::new(SessionState::Uninitialized as u8),
        })
    }

    pub fn with_game(mut self, game: Game) -> Self {
        self.game = Some(game);
        self
    }

    /// Build and initialize a session. If initialization fails the session
    /// is closed before the error is returned.
    pub async fn open(config: ClientConfig) -> Result<Self> {
        let session = Self::new(config)?;
        match session.initialize().await {
            Ok(()) => Ok(session),
            Err(e) => {
                session.close().await;
                Err(e)
            }
        }
    }

    pub async fn initialize(&self) -> Result<()> {
        self.activate()
    }

    /// Close the session. Closing twice is a no-op.
    pub async fn close(&self) {
        let previous = self.state.swap(SessionState::Closed as u8, Ordering::SeqCst);
        if SessionState::from_u8(previous) == SessionState::Closed {
            info!("This session is already shut down. Returning.");
        }
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn is_closed(&self) -> bool {
        self.state() == SessionState::Closed
    }

    fn activate(&self) -> Result<()> {
        match self.state.compare_exchange(
            SessionState::Uninitialized as u8,
            SessionState::Active as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        ) {
            Ok(_) => Ok(()),
            Err(current) if SessionState::from_u8(current) == SessionState::Active => Ok(()),
            Err(_) => Err(KuroError::SessionClosed),
        }
    }

    // Accessors

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// Replace the whole cookie jar.
    pub fn set_cookies(&mut self, cookies: CookieJar) {
        self.cookies = cookies;
    }

    pub fn user_token(&self) -> Option<&str> {
        self.user_token.as_deref()
    }

    pub fn set_user_token(&mut self, token: Option<String>) {
        self.user_token = token;
    }

    pub fn account_id(&self) -> Option<i64> {
        self.account_id
    }

    pub fn set_account_id(&mut self, account_id: Option<i64>) {
        self.account_id = account_id;
    }

    pub fn player_id(&self) -> Option<u64> {
        self.player_id
    }

    pub fn set_player_id(&mut self, player_id: Option<u64>) {
        self.player_id = player_id;
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn set_lang(&mut self, lang: &str) {
        self.lang = lang.to_string();
    }

    pub fn game(&self) -> Option<Game> {
        self.game
    }

    pub fn resolve_game(&self, game: Option<Game>) -> Result<Game> {
        game.or(self.game)
            .ok_or_else(|| KuroError::Validation("A game is required for this request.".into()))
    }

    pub fn resolve_player_id(&self, player_id: Option<u64>) -> Result<u64> {
        player_id
            .or(self.player_id)
            .ok_or_else(|| KuroError::Validation("The 'player_id' argument cannot be None.".into()))
    }

    pub fn resolve_account_id(&self, account_id: Option<i64>) -> Result<i64> {
        account_id
            .or(self.account_id)
            .ok_or_else(|| KuroError::Validation("The 'account_id' argument cannot be None.".into()))
    }

    /// Point a routed URL at the configured override host, if any.
    pub fn route(&self, url: &str) -> Result<String> {
        apply_override(url, self.api_base_override.as_deref())
    }

    // Headers

    pub fn app_version(&self) -> &'static str {
        match self.region {
            Region::Chinese => "2.2.0",
            Region::Overseas => "1.5.0",
        }
    }

    pub fn user_agent(&self) -> String {
        match self.region {
            Region::Chinese => format!(
                "Mozilla/5.0 (Linux; {}) AppleWebKit/537.36 (KHTML, like Gecko) \
                 Version/4.0 Chrome/111.0.5563.116 Mobile Safari/537.36",
                DEVICE_NAME
            ),
            Region::Overseas => "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                 AppleWebKit/537.36 (KHTML, like Gecko) Chrome/111.0.5563.116 Safari/537.36"
                .to_string(),
        }
    }

    /// Device and auth header bundle for community API requests. `headers`
    /// are kept unless the bundle sets the same name, except `token`.
    pub fn lab_headers(
        &self,
        headers: HashMap<String, String>,
        lang: Option<&str>,
    ) -> HashMap<String, String> {
        let mut headers = headers;
        let version = self.app_version();
        headers.insert("user-agent".into(), self.user_agent());
        if self.region == Region::Overseas {
            if let Some(lang) = lang.filter(|l| !l.is_empty()) {
                headers.insert("lang".into(), lang.to_string());
            }
        }
        // An explicit token from the caller wins over the session token.
        if let Some(token) = &self.user_token {
            headers
                .entry("token".into())
                .or_insert_with(|| token.clone());
        }
        headers.insert("devCode".into(), DEV_CODE.into());
        headers.insert("source".into(), "android".into());
        headers.insert("version".into(), version.into());
        headers.insert("versionCode".into(), format!("{}0", version.replace('.', "")));
        headers.insert("osVersion".into(), "Android".into());
        headers.insert("distinct_id".into(), DISTINCT_ID.into());
        headers.insert("countryCode".into(), "CN".into());
        headers
    }

    // Requests

    /// One HTTP round trip. Fails only with `TimedOut`, `Network`, or
    /// `SessionClosed`; no retry is attempted.
    pub async fn raw_request(&self, request: Request) -> Result<RawResponse> {
        self.activate()?;

        let mut request = request;
        for (name, value) in &self.headers {
            request
                .headers
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
        if !self.cookies.is_empty() {
            request
                .headers
                .entry(COOKIE.as_str().to_string())
                .or_insert_with(|| self.cookies.to_header_string());
        }

        self.http.send(&request).await
    }

    /// Round trip plus envelope unwrapping; `success_code` is the envelope
    /// code that means success for this endpoint.
    pub async fn api_request(&self, request: Request, success_code: i64) -> Result<Value> {
        let response = self.raw_request(request).await?;
        unwrap_response(response, success_code)
    }

    /// Community API request: adds the device/auth header bundle and picks
    /// POST when a body is present, GET otherwise.
    pub async fn lab_request(&self, request: Request, lang: Option<&str>) -> Result<Value> {
        let mut request = request;
        if request.method.is_none() {
            request.method = Some(if request.body.is_empty() {
                Method::GET
            } else {
                Method::POST
            });
        }
        request.headers = self.lab_headers(std::mem::take(&mut request.headers), lang);
        self.api_request(request, SUCCESS_CODE).await
    }
}

/// Map a raw response to its payload or error.
pub fn unwrap_response(response: RawResponse, success_code: i64) -> Result<Value> {
    if !response.is_error() {
        return ApiEnvelope::parse(&response.body)?.into_data(success_code);
    }
    if response.status == 404 {
        return Err(KuroError::NotSupported(
            "API not supported or has been removed.".into(),
        ));
    }
    Err(KuroError::Api(ApiError::from_status(
        response.status,
        &response.body,
    )))
}
