use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::error::{INVALID_ID, MISSING_ID, RelayError};
use crate::secrets::RelayConfig;

pub const SONG_URL_PATH: &str = "/song/url/v1";

/// A validated inbound `/song` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongRequest {
    pub song_id: i64,
    pub level: String,
    pub client_ip: String,
}

impl SongRequest {
    /// Reads `id`, `level` and `realip`. A present parameter is taken as-is,
    /// an absent one falls back to the config default.
    pub fn from_query(
        queries: &HashMap<String, String>,
        config: &RelayConfig,
    ) -> Result<Self, RelayError> {
        let raw_id = match queries.get("id") {
            Some(id) if !id.is_empty() => id,
            _ => return Err(RelayError::InvalidRequest(MISSING_ID)),
        };
        let song_id = raw_id
            .parse::<i64>()
            .map_err(|_| RelayError::InvalidRequest(INVALID_ID))?;

        Ok(SongRequest {
            song_id,
            level: queries
                .get("level")
                .cloned()
                .unwrap_or_else(|| config.default_level.clone()),
            client_ip: queries
                .get("realip")
                .cloned()
                .unwrap_or_else(|| config.default_client_ip.clone()),
        })
    }

    /// Builds `{base}/song/url/v1` with the signed query, keys in sorted order.
    pub fn upstream_url(&self, config: &RelayConfig, timestamp_ms: i64) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("{}{}", config.upstream_base_url, SONG_URL_PATH))?;
        url.query_pairs_mut()
            .append_pair("cookie", &config.auth_cookie)
            .append_pair("id", &self.song_id.to_string())
            .append_pair("level", &self.level)
            .append_pair("realIP", &self.client_ip)
            .append_pair("timestamp", &timestamp_ms.to_string());
        Ok(url)
    }
}

/// Shape of the upstream `/song/url/v1` envelope. Only used to check the body;
/// callers get the body as it was decoded, not this struct re-serialized.
/// `null` is accepted for every field, and unknown fields are ignored.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SongUrlResponse {
    pub code: Option<i64>,
    pub data: Option<Vec<TrackEntry>>,
}

#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct TrackEntry {
    pub id: Option<i64>,
    pub url: Option<String>,
    pub br: Option<i64>,
    pub size: Option<i64>,
    pub md5: Option<String>,
    pub code: Option<i64>,
    pub expi: Option<i64>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub gain: Option<f64>,
    pub peak: Option<f64>,
    pub fee: Option<i64>,
    #[serde(default)]
    pub uf: Value,
    pub payed: Option<i64>,
    pub flag: Option<i64>,
    #[serde(rename = "canExtend")]
    pub can_extend: Option<bool>,
    #[serde(default, rename = "freeTrialInfo")]
    pub free_trial_info: Value,
    pub level: Option<String>,
}

impl SongUrlResponse {
    /// Parses `body` as JSON and checks it against the envelope shape.
    /// Returns the upstream `code` (missing or `null` reads as 0) and the
    /// untouched JSON value.
    pub fn decode(body: &[u8]) -> Result<(i64, Value), serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        let shape = SongUrlResponse::deserialize(&value)?;
        Ok((shape.code.unwrap_or(0), value))
    }
}
