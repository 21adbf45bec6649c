// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of [`AccessoryApi`].

use std::sync::Arc;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::auth::TokenManager;
use crate::cache::AccessoryCache;
use crate::client::{AccessoryApi, CharacteristicValue, WriteAck};
use crate::config::BridgeConfig;
use crate::error::{Error, ParseError, Result, ValidationError};
use crate::model::{Accessory, CharacteristicKind, RoomLayout};

const ACCESSORIES_PATH: &str = "/api/accessories";
const LAYOUT_PATH: &str = "/api/accessories/layout";
const RESET_CACHE_PATH: &str = "/api/server/reset-cached-accessories";

/// HTTP client for the controller's accessory endpoints.
///
/// Every request first obtains a token from the shared [`TokenManager`]
/// and is bounded by the configured timeout. Nothing is retried.
///
/// # Examples
///
/// ```no_run
/// use homebridge_lib::{AccessoryApi, AccessoryClient, BridgeConfig};
///
/// # async fn example() -> homebridge_lib::Result<()> {
/// let client = AccessoryClient::new(&BridgeConfig::new("192.168.1.20:8581"))?;
/// for accessory in client.list_accessories().await? {
///     println!("{}: {}", accessory.unique_id, accessory.service_name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AccessoryClient {
    base_url: String,
    http: Client,
    session: Arc<TokenManager>,
    cache: Option<AccessoryCache>,
}

impl AccessoryClient {
    /// Creates a client with its own session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the HTTP client cannot be created.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::communication(&e))?;
        let session = Arc::new(TokenManager::new(http.clone(), config));
        Ok(Self::with_session(http, session, config))
    }

    /// Creates a client that shares an existing session.
    #[must_use]
    pub fn with_session(http: Client, session: Arc<TokenManager>, config: &BridgeConfig) -> Self {
        Self {
            base_url: config.base_url(),
            http,
            session,
            cache: config.accessory_cache().then(AccessoryCache::new),
        }
    }

    /// Returns the base URL of the controller.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the shared session.
    #[must_use]
    pub fn session(&self) -> &Arc<TokenManager> {
        &self.session
    }

    /// Drops any cached accessory list or layout.
    pub fn reset_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.reset();
        }
    }

    /// Asks the controller to drop its own cached accessories and rediscover them.
    ///
    /// # Errors
    ///
    /// Returns `Communication` or `Api` errors.
    pub async fn reset_controller_cache(&self) -> Result<()> {
        self.request(Method::PUT, RESET_CACHE_PATH, None).await?;
        tracing::info!("Controller accessory cache reset requested");
        Ok(())
    }

    fn accessory_path(unique_id: &str) -> String {
        format!("{ACCESSORIES_PATH}/{}", urlencoding::encode(unique_id))
    }

    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<String> {
        let token = self.session.token().await?;
        let url = format!("{}{path}", self.base_url);

        tracing::debug!(method = %method, url = %url, "Sending controller request");

        let mut builder = self.http.request(method, &url).bearer_auth(token);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| Error::communication(&e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| Error::communication(&e))?;

        tracing::debug!(status = status.as_u16(), "Received controller response");

        if status.is_success() {
            return Ok(text);
        }
        if status == StatusCode::UNAUTHORIZED {
            self.session.invalidate().await;
        }
        Err(Error::Api {
            status: status.as_u16(),
            body: text,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.request(Method::GET, path, None).await?;
        serde_json::from_str(&body).map_err(|e| ParseError::from(e).into())
    }
}

/// Maps a per-accessory status error onto the error taxonomy.
fn accessory_error(err: Error, unique_id: &str, write: bool) -> Error {
    match err {
        Error::Api { status: 404, .. } => Error::NotFound(unique_id.to_string()),
        Error::Api { status: 400, body } if write => {
            let reason = if body.trim().is_empty() {
                "characteristic unsupported or accessory not writable".to_string()
            } else {
                body
            };
            ValidationError::Rejected(reason).into()
        }
        other => other,
    }
}

impl AccessoryApi for AccessoryClient {
    async fn list_accessories(&self) -> Result<Vec<Accessory>> {
        if let Some(cached) = self.cache.as_ref().and_then(AccessoryCache::accessories) {
            tracing::debug!(count = cached.len(), "Serving accessories from cache");
            return Ok(cached);
        }
        let accessories: Vec<Accessory> = self.get_json(ACCESSORIES_PATH).await?;
        if let Some(cache) = &self.cache {
            cache.store_accessories(accessories.clone());
        }
        Ok(accessories)
    }

    async fn get_layout(&self) -> Result<RoomLayout> {
        if let Some(cached) = self.cache.as_ref().and_then(AccessoryCache::layout) {
            tracing::debug!("Serving layout from cache");
            return Ok(cached);
        }
        let layout: RoomLayout = self.get_json(LAYOUT_PATH).await?;
        if let Some(cache) = &self.cache {
            cache.store_layout(layout.clone());
        }
        Ok(layout)
    }

    async fn get_accessory(&self, unique_id: &str) -> Result<Accessory> {
        self.get_json(&Self::accessory_path(unique_id))
            .await
            .map_err(|e| accessory_error(e, unique_id, false))
    }

    async fn set_characteristic(
        &self,
        unique_id: &str,
        kind: CharacteristicKind,
        value: CharacteristicValue,
    ) -> Result<WriteAck> {
        let payload = json!({
            "characteristicType": kind.type_name(),
            "value": value,
        });
        tracing::debug!(unique_id, characteristic = kind.type_name(), %value, "Writing characteristic");

        let body = self
            .request(Method::PUT, &Self::accessory_path(unique_id), Some(&payload))
            .await
            .map_err(|e| accessory_error(e, unique_id, true))?;

        let ack = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).unwrap_or(Value::String(body))
        };
        Ok(WriteAck::new(ack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessory_path_encodes_identifier() {
        assert_eq!(
            AccessoryClient::accessory_path("abc123"),
            "/api/accessories/abc123"
        );
        assert_eq!(
            AccessoryClient::accessory_path("a b/c"),
            "/api/accessories/a%20b%2Fc"
        );
    }

    #[test]
    fn client_uses_configured_base_url() {
        let client = AccessoryClient::new(&BridgeConfig::new("10.0.0.5:8581")).unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.5:8581");
    }

    #[test]
    fn not_found_maps_for_reads_and_writes() {
        let api = || Error::Api {
            status: 404,
            body: String::new(),
        };
        assert!(matches!(accessory_error(api(), "x", false), Error::NotFound(id) if id == "x"));
        assert!(matches!(accessory_error(api(), "x", true), Error::NotFound(_)));
    }

    #[test]
    fn bad_request_is_validation_only_for_writes() {
        let api = || Error::Api {
            status: 400,
            body: String::new(),
        };
        assert!(matches!(
            accessory_error(api(), "x", true),
            Error::Validation(ValidationError::Rejected(_))
        ));
        assert!(matches!(
            accessory_error(api(), "x", false),
            Error::Api { status: 400, .. }
        ));
    }

    #[test]
    fn other_statuses_pass_through() {
        let err = accessory_error(
            Error::Api {
                status: 503,
                body: "busy".into(),
            },
            "x",
            true,
        );
        assert!(matches!(err, Error::Api { status: 503, .. }));
    }
}
