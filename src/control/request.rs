// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validation and normalization of control requests.

use crate::client::CharacteristicValue;
use crate::error::ValidationError;
use crate::model::CharacteristicKind;
use crate::types::{Action, Hue, Percentage, PowerState};

/// A validated action with its resolved characteristic and value.
///
/// # Examples
///
/// ```
/// use homebridge_lib::client::CharacteristicValue;
/// use homebridge_lib::control::Command;
/// use homebridge_lib::model::CharacteristicKind;
///
/// let cmd = Command::parse("brightness", "150").unwrap();
/// assert_eq!(cmd.characteristic(), CharacteristicKind::Brightness);
/// assert_eq!(cmd.value(), CharacteristicValue::Int(100));
///
/// let cmd = Command::parse("OFF", "on").unwrap();
/// assert_eq!(cmd.value(), CharacteristicValue::Bool(false));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    action: Action,
    value: CharacteristicValue,
}

impl Command {
    /// Validates `action` and coerces `raw` into the value it needs.
    ///
    /// `on`/`off` ignore `raw`. `power` needs an on/off-like token.
    /// Numeric actions need an integer, which is clamped to the
    /// characteristic's range.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedAction`] for an unknown action
    /// and [`ValidationError::InvalidValue`] for a value that cannot be parsed.
    pub fn parse(action: &str, raw: &str) -> Result<Self, ValidationError> {
        let action: Action = action.parse()?;
        let invalid = || ValidationError::InvalidValue {
            action: action.as_str(),
            value: raw.to_string(),
        };

        let value = match action {
            Action::On => CharacteristicValue::Bool(true),
            Action::Off => CharacteristicValue::Bool(false),
            Action::Power => {
                let state: PowerState = raw.parse().map_err(|()| invalid())?;
                CharacteristicValue::Bool(state.as_bool())
            }
            Action::Brightness | Action::Saturation => {
                let level = Percentage::parse(raw).ok_or_else(invalid)?;
                CharacteristicValue::Int(u16::from(level.value()))
            }
            Action::Hue => CharacteristicValue::Int(Hue::parse(raw).ok_or_else(invalid)?.value()),
        };

        Ok(Self { action, value })
    }

    /// Creates a power command for the given state.
    #[must_use]
    pub const fn power(state: PowerState) -> Self {
        Self {
            action: Action::Power,
            value: CharacteristicValue::Bool(state.as_bool()),
        }
    }

    /// Returns the requested action.
    #[must_use]
    pub const fn action(&self) -> Action {
        self.action
    }

    /// Returns the characteristic that will be written.
    #[must_use]
    pub const fn characteristic(&self) -> CharacteristicKind {
        self.action.characteristic()
    }

    /// Returns the value that will be written.
    #[must_use]
    pub const fn value(&self) -> CharacteristicValue {
        self.value
    }
}

/// A command addressed to one accessory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRequest {
    unique_id: String,
    command: Command,
}

impl ControlRequest {
    /// Validates a raw control request.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingIdentifier`] for an empty identifier,
    /// otherwise as for [`Command::parse`].
    pub fn parse(unique_id: &str, action: &str, value: &str) -> Result<Self, ValidationError> {
        let unique_id = unique_id.trim();
        if unique_id.is_empty() {
            return Err(ValidationError::MissingIdentifier);
        }
        Ok(Self {
            unique_id: unique_id.to_string(),
            command: Command::parse(action, value)?,
        })
    }

    pub(crate) fn new(unique_id: impl Into<String>, command: Command) -> Self {
        Self {
            unique_id: unique_id.into(),
            command,
        }
    }

    /// Returns the target accessory identifier.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Returns the validated command.
    #[must_use]
    pub const fn command(&self) -> Command {
        self.command
    }
}
