// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control action keywords.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::model::CharacteristicKind;

/// An action a caller can request on an accessory.
///
/// # Examples
///
/// ```
/// use homebridge_lib::types::Action;
///
/// let action: Action = "Brightness".parse().unwrap();
/// assert_eq!(action, Action::Brightness);
/// assert!("color".parse::<Action>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Set power from the supplied value.
    Power,
    /// Turn power on, ignoring any supplied value.
    On,
    /// Turn power off, ignoring any supplied value.
    Off,
    /// Set brightness (0-100).
    Brightness,
    /// Set hue (0-360).
    Hue,
    /// Set saturation (0-100).
    Saturation,
}

impl Action {
    /// All recognized actions.
    pub const ALL: [Self; 6] = [
        Self::Power,
        Self::On,
        Self::Off,
        Self::Brightness,
        Self::Hue,
        Self::Saturation,
    ];

    /// Returns the lowercase keyword for this action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::On => "on",
            Self::Off => "off",
            Self::Brightness => "brightness",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
        }
    }

    /// Returns the characteristic this action writes.
    #[must_use]
    pub const fn characteristic(&self) -> CharacteristicKind {
        match self {
            Self::Power | Self::On | Self::Off => CharacteristicKind::Power,
            Self::Brightness => CharacteristicKind::Brightness,
            Self::Hue => CharacteristicKind::Hue,
            Self::Saturation => CharacteristicKind::Saturation,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == lowered)
            .ok_or_else(|| ValidationError::UnsupportedAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_parses_case_insensitively() {
        assert_eq!("POWER".parse::<Action>().unwrap(), Action::Power);
        assert_eq!(" on ".parse::<Action>().unwrap(), Action::On);
        assert_eq!("Saturation".parse::<Action>().unwrap(), Action::Saturation);
    }

    #[test]
    fn action_rejects_unknown_keyword() {
        let err = "color".parse::<Action>().unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedAction("color".to_string()));
    }

    #[test]
    fn power_actions_share_characteristic() {
        assert_eq!(Action::On.characteristic(), CharacteristicKind::Power);
        assert_eq!(Action::Off.characteristic(), CharacteristicKind::Power);
        assert_eq!(Action::Hue.characteristic(), CharacteristicKind::Hue);
    }
}
