use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    error::RelayError,
    models::song::{SongRequest, SongUrlResponse},
    secrets::RelayConfig,
};

/// Relays `/song` lookups to the upstream music API.
#[derive(Clone)]
pub struct SongController {
    config: Arc<RelayConfig>,
    client: Client,
}

impl SongController {
    pub fn new(config: Arc<RelayConfig>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.upstream_timeout).build()?;
        Ok(SongController { config, client })
    }

    pub async fn get_song_url(&self, queries: HashMap<String, String>) -> Response {
        match self.resolve(&queries).await {
            Ok(song) => (StatusCode::OK, Json(song)).into_response(),
            Err(e) => {
                let id = queries.get("id").map(String::as_str).unwrap_or("");
                match &e {
                    RelayError::InvalidRequest(_) | RelayError::UpstreamRejected(_) => {
                        warn!("song lookup failed for id={:?}: {}", id, e);
                    }
                    _ => error!("song lookup failed for id={:?}: {}", id, e),
                }
                e.into_response()
            }
        }
    }

    async fn resolve(&self, queries: &HashMap<String, String>) -> Result<Value, RelayError> {
        let request = SongRequest::from_query(queries, &self.config)?;
        let url = request.upstream_url(&self.config, Utc::now().timestamp_millis())?;
        debug!(
            "requesting song id={} level={} from {}",
            request.song_id, request.level, self.config.upstream_base_url
        );

        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(RelayError::UpstreamUnreachable)?;

        let body = res.bytes().await.map_err(|e| {
            if e.is_timeout() {
                RelayError::UpstreamUnreachable(e)
            } else {
                RelayError::UpstreamReadError(e)
            }
        })?;

        let (code, song) = SongUrlResponse::decode(&body)?;
        if code != 200 {
            return Err(RelayError::UpstreamRejected(code));
        }
        Ok(song)
    }
}
