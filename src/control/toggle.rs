// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-then-write power toggle.
//!
//! The read and the write are two separate requests. Another actor may
//! change the accessory in between; the last write wins at the controller.

use std::fmt;

use serde::Serialize;

use crate::client::AccessoryApi;
use crate::control::{Command, ControlRequest, Controller};
use crate::error::{Error, Result, ValidationError};
use crate::model::CharacteristicKind;
use crate::types::PowerState;

/// The power transition performed by a toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    /// Target accessory identifier.
    pub unique_id: String,
    /// Display name of the accessory.
    pub name: String,
    /// Power state read before the write.
    pub before: PowerState,
    /// Power state written.
    pub after: PowerState,
}

impl fmt::Display for ToggleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Toggled {}: {} → {}", self.name, self.before, self.after)
    }
}

impl<A: AccessoryApi> Controller<A> {
    /// Inverts the power state of an accessory.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty identifier, whatever
    /// [`AccessoryApi::get_accessory`] returns (including `NotFound`), and
    /// `Unsupported` if the accessory has no writable power characteristic.
    pub async fn toggle(&self, unique_id: &str) -> Result<ToggleOutcome> {
        let unique_id = unique_id.trim();
        if unique_id.is_empty() {
            return Err(ValidationError::MissingIdentifier.into());
        }

        let accessory = self.api().get_accessory(unique_id).await?;
        let power = accessory
            .characteristic(CharacteristicKind::Power)
            .ok_or_else(|| Error::Unsupported("no power characteristic".to_string()))?;
        if !power.can_write {
            return Err(Error::Unsupported(
                "power characteristic is read-only".to_string(),
            ));
        }

        let before = PowerState::from_reported(&power.value);
        let after = before.toggled();

        tracing::debug!(unique_id, %before, %after, "Toggling power");

        self.dispatch(&ControlRequest::new(unique_id, Command::power(after)))
            .await?;

        Ok(ToggleOutcome {
            unique_id: unique_id.to_string(),
            name: accessory.service_name,
            before,
            after,
        })
    }
}
