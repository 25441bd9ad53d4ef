use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classify::classify;
use crate::error::{KuroError, Result};

pub const SUCCESS_CODE: i64 = 200;

/// The `{code, msg, data}` wrapper carried by every API response.
///
/// The gacha service spells the message field `message`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default, alias = "message")]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl ApiEnvelope {
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| KuroError::InvalidJson(e.to_string()))
    }

    pub fn code(&self) -> i64 {
        self.code.unwrap_or(0)
    }

    pub fn msg(&self) -> &str {
        self.msg.as_deref().unwrap_or("")
    }

    /// Return the payload when `code` matches `success_code`, otherwise the
    /// classified error.
    pub fn into_data(self, success_code: i64) -> Result<Value> {
        if self.code() != success_code {
            tracing::debug!(code = self.code(), msg = %self.msg(), "API returned error envelope");
            return Err(KuroError::Api(classify(&self)));
        }
        Ok(self.data)
    }
}
