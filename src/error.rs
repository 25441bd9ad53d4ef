use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum KuroError {
    // Network errors
    #[error("Request timed out: {0}")]
    TimedOut(String),

    #[error("Network error: {0}")]
    Network(String),

    // API errors (non-200 envelope or HTTP error status)
    #[error("{0}")]
    Api(ApiError),

    // Routing errors
    #[error("{0}")]
    NotSupported(String),

    #[error("{0}")]
    RegionNotSupported(String),

    #[error("{0}")]
    GameNotSupported(String),

    // Local input errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // Parse errors
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to decrypt payload: {0}")]
    Decrypt(String),

    // Session errors
    #[error("Session is closed")]
    SessionClosed,
}

impl KuroError {
    /// The application error carried by this error, if it came from the API.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            KuroError::Api(err) => Some(err),
            _ => None,
        }
    }

    pub fn api_kind(&self) -> Option<&ApiErrorKind> {
        self.api().map(|err| &err.kind)
    }

    /// True for every kind of the `NotSupported` family.
    pub fn is_not_supported(&self) -> bool {
        matches!(
            self,
            KuroError::NotSupported(_)
                | KuroError::RegionNotSupported(_)
                | KuroError::GameNotSupported(_)
        )
    }

    /// True for transport failures, including timeouts.
    pub fn is_network(&self) -> bool {
        matches!(self, KuroError::TimedOut(_) | KuroError::Network(_))
    }
}

/// Known application error conditions. `BadRequest` is the generic one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApiErrorKind {
    BadRequest,
    InternalDatabaseError,
    AccountNotFound,
    DataNotPublic,
    InvalidCookies,
    LabAccountNotFound,
    TooManyRequests,
    /// Callers must back off before retrying.
    VisitsTooFrequently,
    AlreadyClaimed,
    AuthkeyException,
    InvalidAuthkey,
    AuthkeyTimeout,
    RedemptionException,
    RedemptionInvalid,
    RedemptionClaimed,
    RedemptionCooldown,
    NeedChallenge,
    /// Geetest captcha raised during a sign-in claim. The tokens are meant
    /// for out-of-band solving.
    GeetestTriggered {
        gt: String,
        challenge: String,
    },
    GeetestChallengeFailed,
    RequestNotSupported,
    InvalidDevice,
}

impl ApiErrorKind {
    pub fn default_ret_code(&self) -> i64 {
        match self {
            ApiErrorKind::InternalDatabaseError => -1,
            ApiErrorKind::InvalidCookies => -100,
            ApiErrorKind::LabAccountNotFound => 10103,
            ApiErrorKind::TooManyRequests => 10101,
            ApiErrorKind::VisitsTooFrequently => -110,
            ApiErrorKind::AlreadyClaimed => -5003,
            ApiErrorKind::InvalidAuthkey => -100,
            ApiErrorKind::AuthkeyTimeout => -101,
            ApiErrorKind::NeedChallenge | ApiErrorKind::GeetestChallengeFailed => 1034,
            ApiErrorKind::GeetestTriggered { .. } => 0,
            ApiErrorKind::RequestNotSupported => -520,
            ApiErrorKind::InvalidDevice => 5003,
            _ => 200,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            ApiErrorKind::AccountNotFound => "Could not find user; uid may be invalid.",
            ApiErrorKind::DataNotPublic => "User's data is not public.",
            ApiErrorKind::InvalidCookies => "Cookies are not valid.",
            ApiErrorKind::LabAccountNotFound => {
                "Cookies are valid but do not have a lab account bound to them."
            }
            ApiErrorKind::TooManyRequests => {
                "Cannot get data for more than 30 accounts per cookie per day."
            }
            ApiErrorKind::VisitsTooFrequently => "Visits too frequently.",
            ApiErrorKind::AlreadyClaimed => "Already claimed the daily reward today.",
            ApiErrorKind::InvalidAuthkey => "Authkey is not valid.",
            ApiErrorKind::AuthkeyTimeout => "Authkey has timed out.",
            ApiErrorKind::RedemptionInvalid => "Invalid redemption code.",
            ApiErrorKind::RedemptionClaimed => "Redemption code has been claimed already.",
            ApiErrorKind::RedemptionCooldown => "Redemption is on cooldown.",
            ApiErrorKind::NeedChallenge => "Need to complete a captcha challenge.",
            ApiErrorKind::GeetestTriggered { .. } => {
                "Geetest triggered during daily reward claim."
            }
            ApiErrorKind::GeetestChallengeFailed => "Geetest challenge failed.",
            ApiErrorKind::RequestNotSupported => "service not supported for this request.",
            ApiErrorKind::InvalidDevice => "Device id and fp are invalid.",
            _ => "",
        }
    }

    pub fn is_cookie_error(&self) -> bool {
        matches!(
            self,
            ApiErrorKind::InvalidCookies
                | ApiErrorKind::LabAccountNotFound
                | ApiErrorKind::TooManyRequests
        )
    }

    pub fn is_authkey_error(&self) -> bool {
        matches!(
            self,
            ApiErrorKind::AuthkeyException
                | ApiErrorKind::InvalidAuthkey
                | ApiErrorKind::AuthkeyTimeout
        )
    }

    pub fn is_redemption_error(&self) -> bool {
        matches!(
            self,
            ApiErrorKind::RedemptionException
                | ApiErrorKind::RedemptionInvalid
                | ApiErrorKind::RedemptionClaimed
                | ApiErrorKind::RedemptionCooldown
        )
    }

    pub fn is_challenge(&self) -> bool {
        matches!(
            self,
            ApiErrorKind::NeedChallenge
                | ApiErrorKind::GeetestTriggered { .. }
                | ApiErrorKind::GeetestChallengeFailed
        )
    }
}

/// An application-level failure reported by the API.
///
/// `status_code` is the HTTP status (200 when the failure came from the
/// envelope of a successful response), `ret_code` the envelope `code`,
/// `original` the raw server message and `message` the resolved one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status_code: u16,
    pub ret_code: i64,
    pub original: String,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind) -> Self {
        let ret_code = kind.default_ret_code();
        let message = kind.default_message().to_string();
        Self {
            kind,
            status_code: 200,
            ret_code,
            original: String::new(),
            message,
        }
    }

    /// Build from an envelope's `code` and `msg`.
    pub fn from_envelope(kind: ApiErrorKind, code: Option<i64>, msg: Option<&str>) -> Self {
        let mut err = Self::new(kind);
        if let Some(code) = code {
            err.ret_code = code;
        }
        if let Some(msg) = msg {
            err.original = msg.to_string();
            if !msg.is_empty() {
                err.message = msg.to_string();
            }
        }
        err
    }

    /// Build from an HTTP error status and the raw body.
    pub fn from_status(status_code: u16, body: &str) -> Self {
        let mut err = Self::new(ApiErrorKind::BadRequest);
        err.status_code = status_code;
        err.original = body.to_string();
        err.message = body.to_string();
        err
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    fn display_code(&self) -> i64 {
        if self.status_code != 200 {
            i64::from(self.status_code)
        } else {
            self.ret_code
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_code() {
            0 => write!(f, "{}", self.message),
            code => write!(f, "[{}] {}", code, self.message),
        }
    }
}

impl From<ApiError> for KuroError {
    fn from(err: ApiError) -> Self {
        KuroError::Api(err)
    }
}

impl From<wreq::Error> for KuroError {
    fn from(err: wreq::Error) -> Self {
        if err.is_timeout() {
            KuroError::TimedOut(err.to_string())
        } else if err.is_connect() {
            KuroError::Network(format!("Connection failed: {}", err))
        } else {
            KuroError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for KuroError {
    fn from(err: serde_json::Error) -> Self {
        KuroError::InvalidJson(err.to_string())
    }
}

impl From<url::ParseError> for KuroError {
    fn from(err: url::ParseError) -> Self {
        KuroError::InvalidUrl(err.to_string())
    }
}

/// Type alias for Result with KuroError
pub type Result<T> = std::result::Result<T, KuroError>;
