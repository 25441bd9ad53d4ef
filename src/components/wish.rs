use std::collections::HashMap;

use futures::future::try_join_all;
use serde_json::{json, Value};
use tracing::debug;

use crate::enums::Game;
use crate::error::{ApiError, ApiErrorKind, KuroError, Result};
use crate::http::Request;
use crate::models::{from_payload, McBannerType, McWish};
use crate::player::recognize_mc_server;
use crate::routes::{join_url, GACHA_INFO_URL};
use crate::session::Session;

/// Gacha services answer with `code == 0` on success.
pub const GACHA_SUCCESS_CODE: i64 = 0;

const CARD_POOL_ID: &str = "917dfa695d6c6634ee4e972bb9168f6a";
pub const DEFAULT_WISH_LANG: &str = "zh-Hans";

/// Gacha record access. Authorisation comes from the `record_id` the game
/// client hands out, not from the session cookies.
pub struct WishClient<'a> {
    session: &'a Session,
}

impl<'a> WishClient<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// POST `body` as JSON to a gacha endpoint. `languageCode` is added when
    /// both a body and `lang` are given.
    pub async fn request_gacha_info(
        &self,
        endpoint: &str,
        game: Game,
        lang: Option<&str>,
        body: Option<Value>,
    ) -> Result<Value> {
        let base = GACHA_INFO_URL.get_url(self.session.region(), game)?;
        let url = self.session.route(&join_url(base, endpoint))?;

        let mut body = body.unwrap_or(Value::Null);
        if let (Some(map), Some(lang)) = (body.as_object_mut(), lang) {
            map.insert("languageCode".into(), json!(lang));
        }

        self.session
            .api_request(Request::post(url).with_json(body), GACHA_SUCCESS_CODE)
            .await
    }

    /// Pull history across `banner_types` (all seven when `None`), oldest
    /// first, with synthetic ids assigned.
    pub async fn wish_history(
        &self,
        record_id: &str,
        banner_types: Option<&[u32]>,
        player_id: Option<u64>,
        lang: Option<&str>,
    ) -> Result<Vec<McWish>> {
        let banners = match banner_types {
            Some(types) if !types.is_empty() => types
                .iter()
                .map(|t| {
                    McBannerType::try_from(*t).map_err(|e| KuroError::Validation(e.to_string()))
                })
                .collect::<Result<Vec<_>>>()?,
            _ => McBannerType::ALL.to_vec(),
        };
        let player_id = self.session.resolve_player_id(player_id)?;
        let server_id = recognize_mc_server(player_id)?;
        let lang = lang.unwrap_or(DEFAULT_WISH_LANG);

        let requests = banners.iter().map(|banner| {
            let body = json!({
                "playerId": player_id.to_string(),
                "cardPoolId": CARD_POOL_ID,
                "serverId": server_id,
                "recordId": record_id,
                "cardPoolType": banner.value(),
            });
            self.banner_history(*banner, body, lang)
        });
        let per_banner = try_join_all(requests).await?;

        let mut wishes: Vec<McWish> = per_banner.into_iter().flatten().collect();
        // Stable: equal timestamps keep banner/arrival order.
        wishes.sort_by_key(McWish::timestamp);
        debug!(count = wishes.len(), "assembled wish history");
        Self::fix_wish_item_id(wishes)
    }

    async fn banner_history(
        &self,
        banner: McBannerType,
        body: Value,
        lang: &str,
    ) -> Result<Vec<McWish>> {
        let data = self
            .request_gacha_info("gacha/record/query", Game::Mc, Some(lang), Some(body))
            .await
            .map_err(|e| match e {
                // The gacha service reports a bad record id as a plain failure.
                KuroError::Api(_) => ApiError::new(ApiErrorKind::InvalidAuthkey).into(),
                other => other,
            })?;
        if data.is_null() {
            return Ok(Vec::new());
        }

        let mut wishes: Vec<McWish> = from_payload(data)?;
        for wish in &mut wishes {
            wish.banner_type = Some(banner);
        }
        Ok(wishes)
    }

    /// Assign `id = "{timestamp}{item_id:08}{n}"` to records sorted by time,
    /// where `n` counts repeats of an item within one timestamp. A record
    /// whose id does not form a number fails with `InvalidJson`.
    pub fn fix_wish_item_id(mut wishes: Vec<McWish>) -> Result<Vec<McWish>> {
        let mut seen: HashMap<u64, u32> = HashMap::new();
        let mut current = None;
        for wish in &mut wishes {
            let ts = wish.timestamp();
            if current != Some(ts) {
                current = Some(ts);
                seen.clear();
            }
            let count = seen.entry(wish.item_id).or_insert(0);
            *count += 1;
            let id = format!("{}{:08}{}", ts, wish.item_id, count);
            wish.id = id
                .parse()
                .map_err(|_| KuroError::InvalidJson(format!("invalid wish id {}", id)))?;
        }
        Ok(wishes)
    }
}
