// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory control: single writes, power toggles and name-pattern bulk control.
//!
//! Every operation validates its input before touching the network. A
//! rejected request never reaches the [`AccessoryApi`].
//!
//! # Examples
//!
//! ```no_run
//! use homebridge_lib::control::Controller;
//! use homebridge_lib::{AccessoryClient, BridgeConfig};
//!
//! # async fn example() -> homebridge_lib::Result<()> {
//! let controller = Controller::new(AccessoryClient::new(&BridgeConfig::from_env())?);
//!
//! let outcome = controller.control("abc123", "brightness", "150").await?;
//! println!("{outcome}"); // brightness clamped to 100
//!
//! let toggled = controller.toggle("abc123").await?;
//! println!("{} -> {}", toggled.before, toggled.after);
//!
//! let bulk = controller.control_by_pattern("kitchen", "off", "").await?;
//! println!("{bulk}");
//! # Ok(())
//! # }
//! ```

mod bulk;
mod request;
mod toggle;

#[cfg(test)]
pub(crate) mod fake;

pub use bulk::{BulkItem, BulkResult, ItemStatus};
pub use request::{Command, ControlRequest};
pub use toggle::ToggleOutcome;

use std::fmt;

use serde::Serialize;

use crate::client::{AccessoryApi, CharacteristicValue};
use crate::error::Result;
use crate::model::CharacteristicKind;
use crate::types::Action;

/// The confirmed result of a single characteristic write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlOutcome {
    /// Target accessory identifier.
    pub unique_id: String,
    /// The action as requested.
    pub action: Action,
    /// The characteristic that was written.
    pub characteristic: CharacteristicKind,
    /// The value that was written, after coercion and clamping.
    pub value: CharacteristicValue,
}

impl fmt::Display for ControlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            CharacteristicValue::Bool(on) => write!(
                f,
                "Set {} of {} to {}",
                self.characteristic,
                self.unique_id,
                if on { "On" } else { "Off" }
            ),
            CharacteristicValue::Int(n) => write!(
                f,
                "Set {} of {} to {n}",
                self.characteristic, self.unique_id
            ),
        }
    }
}

/// Validates and dispatches control operations through an [`AccessoryApi`].
#[derive(Debug)]
pub struct Controller<A> {
    api: A,
}

impl<A: AccessoryApi> Controller<A> {
    /// Creates a controller over the given API.
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Returns the underlying API.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Validates a control request and writes the resolved characteristic.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error without any network call when the
    /// identifier, action or value is rejected; otherwise whatever the
    /// write itself returns.
    pub async fn control(&self, unique_id: &str, action: &str, value: &str) -> Result<ControlOutcome> {
        let request = ControlRequest::parse(unique_id, action, value)?;
        self.dispatch(&request).await
    }

    /// Writes an already validated request.
    ///
    /// # Errors
    ///
    /// Returns whatever [`AccessoryApi::set_characteristic`] returns.
    pub async fn dispatch(&self, request: &ControlRequest) -> Result<ControlOutcome> {
        let command = request.command();
        tracing::debug!(
            unique_id = request.unique_id(),
            action = %command.action(),
            value = %command.value(),
            "Dispatching control request"
        );

        self.api
            .set_characteristic(request.unique_id(), command.characteristic(), command.value())
            .await?;

        Ok(ControlOutcome {
            unique_id: request.unique_id().to_string(),
            action: command.action(),
            characteristic: command.characteristic(),
            value: command.value(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fake::{Call, FakeApi};
    use super::*;
    use crate::error::{Error, ValidationError};

    #[tokio::test]
    async fn control_clamps_and_writes_once() {
        let api = FakeApi::new().with_light("lamp", "Lamp", false);
        let controller = Controller::new(api);

        let outcome = controller.control("lamp", "brightness", "150").await.unwrap();

        assert_eq!(outcome.characteristic, CharacteristicKind::Brightness);
        assert_eq!(outcome.value, CharacteristicValue::Int(100));
        assert_eq!(
            controller.api().calls(),
            vec![Call::Set {
                unique_id: "lamp".into(),
                kind: CharacteristicKind::Brightness,
                value: CharacteristicValue::Int(100),
            }]
        );
    }

    #[tokio::test]
    async fn hue_below_range_resolves_to_zero() {
        let controller = Controller::new(FakeApi::new().with_light("lamp", "Lamp", true));
        let outcome = controller.control("lamp", "hue", "-10").await.unwrap();
        assert_eq!(outcome.characteristic, CharacteristicKind::Hue);
        assert_eq!(outcome.value, CharacteristicValue::Int(0));
    }

    #[tokio::test]
    async fn unsupported_action_makes_no_calls() {
        let controller = Controller::new(FakeApi::new().with_light("lamp", "Lamp", true));
        let err = controller.control("lamp", "color", "5").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnsupportedAction(_))
        ));
        assert!(controller.api().calls().is_empty());
    }

    #[tokio::test]
    async fn missing_identifier_makes_no_calls() {
        let controller = Controller::new(FakeApi::new());
        let err = controller.control("", "on", "").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingIdentifier)
        ));
        assert!(controller.api().calls().is_empty());
    }

    #[tokio::test]
    async fn invalid_value_makes_no_calls() {
        let controller = Controller::new(FakeApi::new().with_light("lamp", "Lamp", true));
        let err = controller.control("lamp", "brightness", "lots").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidValue { .. })
        ));
        assert!(controller.api().calls().is_empty());
    }

    #[tokio::test]
    async fn repeated_power_on_is_idempotent() {
        let controller = Controller::new(FakeApi::new().with_light("lamp", "Lamp", false));
        let first = controller.control("lamp", "power", "on").await.unwrap();
        let second = controller.control("lamp", "power", "on").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.value, CharacteristicValue::Bool(true));
        assert_eq!(controller.api().calls().len(), 2);
    }

    #[tokio::test]
    async fn write_failure_propagates_unchanged() {
        let api = FakeApi::new().with_light("lamp", "Lamp", false).failing_writes("lamp", 500);
        let controller = Controller::new(api);
        let err = controller.control("lamp", "on", "").await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 500, .. }));
    }

    #[test]
    fn outcome_display() {
        let outcome = ControlOutcome {
            unique_id: "lamp".into(),
            action: Action::On,
            characteristic: CharacteristicKind::Power,
            value: CharacteristicValue::Bool(true),
        };
        assert_eq!(outcome.to_string(), "Set power of lamp to On");
    }
}
