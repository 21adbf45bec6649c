// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state parsed from loosely typed caller input.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// Represents the power state of an accessory.
///
/// # Examples
///
/// ```
/// use homebridge_lib::types::PowerState;
///
/// assert_eq!("on".parse::<PowerState>().unwrap(), PowerState::On);
/// assert_eq!("FALSE".parse::<PowerState>().unwrap(), PowerState::Off);
/// assert_eq!(PowerState::On.toggled(), PowerState::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    /// Power is off.
    Off,
    /// Power is on.
    On,
}

impl PowerState {
    /// Returns the state as the boolean the controller expects.
    #[must_use]
    pub const fn as_bool(&self) -> bool {
        matches!(self, Self::On)
    }

    /// Returns the opposite state.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }

    /// Interprets a characteristic value reported by the controller.
    ///
    /// Homebridge reports `On` as either a boolean or `0`/`1`. Anything
    /// other than a truthy boolean, non-zero number or non-empty string is
    /// treated as off.
    #[must_use]
    pub fn from_reported(value: &Value) -> Self {
        let on = match value {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => s.parse::<Self>().map_or(!s.is_empty(), |p| p.as_bool()),
            Value::Null => false,
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
        };
        Self::from(on)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("On"),
            Self::Off => f.write_str("Off"),
        }
    }
}

impl FromStr for PowerState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on" | "true" | "1" | "yes" => Ok(Self::On),
            "off" | "false" | "0" | "no" => Ok(Self::Off),
            _ => Err(()),
        }
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn power_state_from_str() {
        for on in ["on", "ON", "true", "1", "Yes"] {
            assert_eq!(on.parse::<PowerState>(), Ok(PowerState::On), "{on}");
        }
        for off in ["off", "Off", "false", "0", "no"] {
            assert_eq!(off.parse::<PowerState>(), Ok(PowerState::Off), "{off}");
        }
        assert!("maybe".parse::<PowerState>().is_err());
        assert!("".parse::<PowerState>().is_err());
    }

    #[test]
    fn power_state_from_reported_value() {
        assert_eq!(PowerState::from_reported(&json!(true)), PowerState::On);
        assert_eq!(PowerState::from_reported(&json!(0)), PowerState::Off);
        assert_eq!(PowerState::from_reported(&json!(1)), PowerState::On);
        assert_eq!(PowerState::from_reported(&Value::Null), PowerState::Off);
    }

    #[test]
    fn power_state_toggle_and_bool() {
        assert_eq!(PowerState::Off.toggled(), PowerState::On);
        assert!(PowerState::On.as_bool());
        assert_eq!(PowerState::from(false), PowerState::Off);
    }

    #[test]
    fn power_state_display() {
        assert_eq!(PowerState::On.to_string(), "On");
        assert_eq!(PowerState::Off.to_string(), "Off");
    }
}
