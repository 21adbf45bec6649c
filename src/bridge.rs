// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The callable operations a tool-calling protocol layer exposes.
//!
//! Each method takes only primitive arguments and returns a structured,
//! `Serialize`-able result or a typed [`Error`]. Every result also
//! implements `Display` for a human-readable reply; [`Error::report`]
//! renders a failure the same way.

use std::fmt;

use serde::Serialize;

use crate::client::{AccessoryApi, AccessoryClient};
use crate::config::BridgeConfig;
use crate::control::{BulkResult, ControlOutcome, Controller, ToggleOutcome};
use crate::error::{Error, Result, ValidationError};
use crate::grouping::{RoomGroups, group_by_keywords};
use crate::model::{Accessory, RoomLayout};

/// The accessory inventory as returned by [`Bridge::list_accessories`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AccessoryList {
    /// Accessories in controller order.
    pub accessories: Vec<Accessory>,
}

impl fmt::Display for AccessoryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.accessories.is_empty() {
            return f.write_str("No accessories found");
        }
        write!(f, "Found {} accessories:", self.accessories.len())?;
        for accessory in &self.accessories {
            write!(f, "\n\n{accessory}")?;
        }
        Ok(())
    }
}

/// Entry point for every tool operation against one controller.
///
/// # Examples
///
/// ```no_run
/// use homebridge_lib::Bridge;
///
/// #[tokio::main]
/// async fn main() -> homebridge_lib::Result<()> {
///     // Reads HOMEBRIDGE_HOST, defaulting to homebridge.local:8081
///     let bridge = Bridge::from_env()?;
///
///     println!("{}", bridge.list_accessories().await?);
///
///     match bridge.quick_toggle("abc123").await {
///         Ok(outcome) => println!("{outcome}"),
///         Err(err) => eprintln!("{}", err.report("toggle abc123")),
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Bridge {
    controller: Controller<AccessoryClient>,
}

impl Bridge {
    /// Creates a bridge for the configured controller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the HTTP client cannot be created.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        Ok(Self::with_client(AccessoryClient::new(config)?))
    }

    /// Creates a bridge configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Communication`] if the HTTP client cannot be created.
    pub fn from_env() -> Result<Self> {
        let config = BridgeConfig::from_env();
        tracing::info!(url = %config.base_url(), "Connecting to Homebridge");
        Self::new(&config)
    }

    /// Creates a bridge over an existing client.
    #[must_use]
    pub fn with_client(client: AccessoryClient) -> Self {
        Self {
            controller: Controller::new(client),
        }
    }

    /// Returns the underlying client.
    #[must_use]
    pub fn client(&self) -> &AccessoryClient {
        self.controller.api()
    }

    /// Lists every accessory known to the controller.
    ///
    /// # Errors
    ///
    /// See [`AccessoryApi::list_accessories`].
    pub async fn list_accessories(&self) -> Result<AccessoryList> {
        tracing::info!("Fetching accessories list");
        Ok(AccessoryList {
            accessories: self.client().list_accessories().await?,
        })
    }

    /// Returns the accessories organized by room.
    ///
    /// # Errors
    ///
    /// See [`AccessoryApi::get_layout`].
    pub async fn get_accessories_layout(&self) -> Result<RoomLayout> {
        tracing::info!("Fetching accessories layout");
        self.client().get_layout().await
    }

    /// Returns one accessory with every characteristic.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty identifier, otherwise see
    /// [`AccessoryApi::get_accessory`].
    pub async fn get_accessory_details(&self, unique_id: &str) -> Result<Accessory> {
        let unique_id = unique_id.trim();
        if unique_id.is_empty() {
            return Err(ValidationError::MissingIdentifier.into());
        }
        tracing::info!(unique_id, "Fetching accessory details");
        self.client().get_accessory(unique_id).await
    }

    /// Sets one characteristic of one accessory.
    ///
    /// # Errors
    ///
    /// See [`Controller::control`].
    pub async fn control_accessory(
        &self,
        unique_id: &str,
        action: &str,
        value: &str,
    ) -> Result<ControlOutcome> {
        tracing::info!(unique_id, action, value, "Controlling accessory");
        self.controller.control(unique_id, action, value).await
    }

    /// Inverts the power state of one accessory.
    ///
    /// # Errors
    ///
    /// See [`Controller::toggle`].
    pub async fn quick_toggle(&self, unique_id: &str) -> Result<ToggleOutcome> {
        tracing::info!(unique_id, "Quick toggling accessory");
        self.controller.toggle(unique_id).await
    }

    /// Drops the local accessory snapshot and asks the controller to
    /// rediscover its accessories.
    ///
    /// # Errors
    ///
    /// Returns `Communication` or `Api` errors from the controller call.
    /// The local snapshot is cleared even then.
    pub async fn reset_cached_accessories(&self) -> Result<()> {
        tracing::info!("Resetting cached accessories");
        self.client().reset_cache();
        self.client().reset_controller_cache().await
    }

    /// Applies one action to every accessory whose name contains `pattern`.
    ///
    /// # Errors
    ///
    /// See [`Controller::control_by_pattern`].
    pub async fn control_room_devices(
        &self,
        pattern: &str,
        action: &str,
        value: &str,
    ) -> Result<BulkResult> {
        tracing::info!(pattern, action, value, "Controlling room devices");
        self.controller
            .control_by_pattern(pattern, action, value)
            .await
    }

    /// Suggests room groups from accessory names.
    ///
    /// # Errors
    ///
    /// See [`AccessoryApi::list_accessories`].
    pub async fn suggest_room_groups(&self) -> Result<RoomGroups> {
        tracing::info!("Creating room-based organization");
        let accessories = self.client().list_accessories().await?;
        Ok(group_by_keywords(&accessories))
    }
}

/// Renders an operation result, or its failure report, as reply text.
///
/// # Examples
///
/// ```
/// use homebridge_lib::{Error, bridge::render};
///
/// let failed: homebridge_lib::Result<String> = Err(Error::NotFound("x".into()));
/// assert!(render(&failed, "toggle x").starts_with("Failed to toggle x"));
/// ```
#[must_use]
pub fn render<T: fmt::Display>(result: &std::result::Result<T, Error>, attempted: &str) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(err) => err.report(attempted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_display() {
        let list = AccessoryList {
            accessories: Vec::new(),
        };
        assert_eq!(list.to_string(), "No accessories found");
    }

    #[test]
    fn list_display_counts_accessories() {
        let accessories = serde_json::from_value(serde_json::json!([
            {"uniqueId": "a", "serviceName": "Lamp", "serviceType": "Lightbulb"},
            {"uniqueId": "b", "serviceName": "Fan", "serviceType": "Fan"}
        ]))
        .unwrap();
        let text = AccessoryList { accessories }.to_string();
        assert!(text.starts_with("Found 2 accessories:\n\nLamp (Lightbulb)"));
        assert!(text.contains("\n\nFan (Fan)"));
    }

    #[test]
    fn render_success_uses_display() {
        let ok: Result<&str> = Ok("done");
        assert_eq!(render(&ok, "anything"), "done");
    }

    #[tokio::test]
    async fn details_require_identifier() {
        let bridge = Bridge::new(&BridgeConfig::new("127.0.0.1:9")).unwrap();
        assert!(matches!(
            bridge.get_accessory_details("").await,
            Err(Error::Validation(ValidationError::MissingIdentifier))
        ));
    }
}
