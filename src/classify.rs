//! Envelope -> error classification.
//!
//! The upstream API reuses numeric codes across unrelated features, so the
//! message text is consulted alongside the code. Rules are evaluated in
//! order and the first match wins; the authkey prefix rule must stay ahead
//! of the code table because authkey codes overlap it.

use crate::envelope::ApiEnvelope;
use crate::error::{ApiError, ApiErrorKind};

/// Codes with a dedicated error kind.
pub const ERROR_CODES: &[(i64, ApiErrorKind)] = &[
    (500, ApiErrorKind::InternalDatabaseError),
    (220, ApiErrorKind::InvalidCookies),
    (1511, ApiErrorKind::AlreadyClaimed),
];

pub struct Rule {
    pub name: &'static str,
    matches: fn(&ApiEnvelope) -> bool,
    kind: fn(&ApiEnvelope) -> ApiErrorKind,
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "authkey",
        matches: |env| env.msg().starts_with("authkey"),
        kind: |env| match env.code() {
            -100 => ApiErrorKind::InvalidAuthkey,
            -101 => ApiErrorKind::AuthkeyTimeout,
            _ => ApiErrorKind::AuthkeyException,
        },
    },
    Rule {
        name: "code_table",
        matches: |env| lookup_code(env.code()).is_some(),
        kind: |env| lookup_code(env.code()).unwrap_or(ApiErrorKind::BadRequest),
    },
    Rule {
        name: "redemption",
        matches: |env| env.msg().contains("redemption"),
        kind: |_| ApiErrorKind::RedemptionException,
    },
    Rule {
        name: "fallback",
        matches: |_| true,
        kind: |_| ApiErrorKind::BadRequest,
    },
];

pub fn lookup_code(code: i64) -> Option<ApiErrorKind> {
    ERROR_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, kind)| kind.clone())
}

/// Always yields an error; the caller decides to return it.
pub fn classify(envelope: &ApiEnvelope) -> ApiError {
    let kind = RULES
        .iter()
        .find(|rule| (rule.matches)(envelope))
        .map(|rule| (rule.kind)(envelope))
        .unwrap_or(ApiErrorKind::BadRequest);
    ApiError::from_envelope(kind, envelope.code, envelope.msg.as_deref())
}
