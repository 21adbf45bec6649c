// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory and layout models as reported by the Homebridge UI API.
//!
//! These are transient copies of remote state. Nothing here is owned by the
//! bridge; a value may be stale as soon as it is returned.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Action, PowerState};

const HOMEKIT_UUID_SUFFIX: &str = "-0000-1000-8000-0026BB765291";

/// The characteristics this bridge knows how to read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CharacteristicKind {
    /// The `On` characteristic.
    Power,
    /// The `Brightness` characteristic.
    Brightness,
    /// The `Hue` characteristic.
    Hue,
    /// The `Saturation` characteristic.
    Saturation,
}

impl CharacteristicKind {
    /// Returns the characteristic type name used in write requests.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Power => "On",
            Self::Brightness => "Brightness",
            Self::Hue => "Hue",
            Self::Saturation => "Saturation",
        }
    }

    /// Returns the short HomeKit UUID prefix for this characteristic.
    const fn uuid_prefix(self) -> &'static str {
        match self {
            Self::Power => "00000025",
            Self::Brightness => "00000008",
            Self::Hue => "00000013",
            Self::Saturation => "0000002F",
        }
    }

    /// Recognizes a characteristic from its type name or HomeKit UUID.
    ///
    /// # Examples
    ///
    /// ```
    /// use homebridge_lib::model::CharacteristicKind;
    ///
    /// assert_eq!(CharacteristicKind::from_type("On"), Some(CharacteristicKind::Power));
    /// assert_eq!(
    ///     CharacteristicKind::from_type("00000008-0000-1000-8000-0026BB765291"),
    ///     Some(CharacteristicKind::Brightness)
    /// );
    /// assert_eq!(CharacteristicKind::from_type("OutletInUse"), None);
    /// ```
    #[must_use]
    pub fn from_type(type_name: &str) -> Option<Self> {
        const ALL: [CharacteristicKind; 4] = [
            CharacteristicKind::Power,
            CharacteristicKind::Brightness,
            CharacteristicKind::Hue,
            CharacteristicKind::Saturation,
        ];

        ALL.into_iter().find(|kind| {
            type_name.eq_ignore_ascii_case(kind.type_name())
                || type_name
                    .strip_suffix(HOMEKIT_UUID_SUFFIX)
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case(kind.uuid_prefix()))
        })
    }

    /// Returns the action that writes this characteristic.
    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::Power => Action::Power,
            Self::Brightness => Action::Brightness,
            Self::Hue => Action::Hue,
            Self::Saturation => Action::Saturation,
        }
    }
}

impl fmt::Display for CharacteristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action().as_str())
    }
}

/// A single characteristic of an accessory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Characteristic {
    /// Characteristic type name (e.g. `On`) or UUID.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Current value, if reported.
    #[serde(default)]
    pub value: Value,
    /// Whether the value can be read.
    #[serde(default)]
    pub can_read: bool,
    /// Whether the value can be written.
    #[serde(default)]
    pub can_write: bool,
    /// Value format (e.g. `bool`, `int`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Unit of the value (e.g. `percentage`, `arcdegrees`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Minimum value accepted by the accessory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    /// Maximum value accepted by the accessory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

impl Characteristic {
    /// Returns the recognized kind of this characteristic, if any.
    #[must_use]
    pub fn kind(&self) -> Option<CharacteristicKind> {
        CharacteristicKind::from_type(&self.type_name)
    }

    /// Returns the last segment of a dotted type name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.type_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.type_name)
    }

    fn permissions(&self) -> &'static str {
        match (self.can_read, self.can_write) {
            (true, true) => "Read | Write",
            (true, false) => "Read",
            (false, true) => "Write",
            (false, false) => "No permissions",
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(CharacteristicKind::Power) => write!(
                f,
                "Power: {}",
                PowerState::from_reported(&self.value)
            )?,
            Some(CharacteristicKind::Hue) => write!(f, "Hue: {}°", self.value)?,
            Some(kind @ (CharacteristicKind::Brightness | CharacteristicKind::Saturation)) => {
                write!(f, "{}: {}%", kind.type_name(), self.value)?;
            }
            None => write!(f, "{}: {}", self.short_name(), self.value)?,
        }
        write!(f, " ({})", self.permissions())
    }
}

/// One controllable accessory service exposed by the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessory {
    /// Identifier, unique within the controller's inventory.
    pub unique_id: String,
    /// Display name.
    #[serde(default)]
    pub service_name: String,
    /// Service type (e.g. `Lightbulb`).
    #[serde(default)]
    pub service_type: String,
    /// Human readable type, when the controller provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub human_type: Option<String>,
    /// Room or custom label assigned in the controller.
    #[serde(default, rename = "customName", skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    /// Characteristic states.
    #[serde(default)]
    pub service_characteristics: Vec<Characteristic>,
}

impl Accessory {
    /// Returns the first characteristic of the given kind.
    #[must_use]
    pub fn characteristic(&self, kind: CharacteristicKind) -> Option<&Characteristic> {
        self.service_characteristics
            .iter()
            .find(|c| c.kind() == Some(kind))
    }

    /// Returns the current power state, if the accessory has a power characteristic.
    #[must_use]
    pub fn power_state(&self) -> Option<PowerState> {
        self.characteristic(CharacteristicKind::Power)
            .map(|c| PowerState::from_reported(&c.value))
    }

    /// Returns whether the display name contains `pattern`, ignoring case.
    #[must_use]
    pub fn name_matches(&self, pattern: &str) -> bool {
        self.service_name
            .to_lowercase()
            .contains(&pattern.to_lowercase())
    }

    /// Returns a view that renders every characteristic with its permissions.
    #[must_use]
    pub fn details(&self) -> AccessoryDetails<'_> {
        AccessoryDetails(self)
    }

    fn status_line(&self) -> String {
        self.service_characteristics
            .iter()
            .filter_map(|c| match c.kind()? {
                CharacteristicKind::Power => {
                    Some(format!("Power: {}", PowerState::from_reported(&c.value)))
                }
                CharacteristicKind::Hue => Some(format!("Hue: {}°", c.value)),
                kind => Some(format!("{}: {}%", kind.type_name(), c.value)),
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl fmt::Display for Accessory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.service_name, self.service_type)?;
        writeln!(f, "   ID: {}", self.unique_id)?;
        writeln!(f, "   Room: {}", self.room.as_deref().unwrap_or("-"))?;
        write!(f, "   Status: {}", self.status_line())
    }
}

/// Full rendering of one accessory, see [`Accessory::details`].
#[derive(Debug, Clone, Copy)]
pub struct AccessoryDetails<'a>(&'a Accessory);

impl fmt::Display for AccessoryDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let acc = self.0;
        writeln!(f, "Accessory Details: {}", acc.service_name)?;
        writeln!(f, "   Type: {}", acc.service_type)?;
        writeln!(f, "   ID: {}", acc.unique_id)?;
        writeln!(
            f,
            "   Room: {}",
            acc.room.as_deref().unwrap_or("No room assigned")
        )?;
        write!(f, "Characteristics:")?;
        for characteristic in &acc.service_characteristics {
            write!(f, "\n   • {characteristic}")?;
        }
        Ok(())
    }
}

/// A service entry inside a layout room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutService {
    /// Accessory identifier.
    pub unique_id: String,
    /// Display name, when included in the layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    /// Custom name, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    /// Service type, when included in the layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
}

/// A room and the accessories assigned to it, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room name.
    pub name: String,
    /// Services assigned to the room.
    #[serde(default)]
    pub services: Vec<LayoutService>,
}

/// Rooms and their accessories, in the order the controller reports them.
///
/// # Examples
///
/// ```
/// use homebridge_lib::model::RoomLayout;
///
/// let layout: RoomLayout = serde_json::from_str(
///     r#"[{"name": "Kitchen", "services": [{"uniqueId": "a1"}, {"uniqueId": "b2"}]}]"#,
/// ).unwrap();
/// assert_eq!(layout.accessory_ids("kitchen"), Some(vec!["a1", "b2"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomLayout {
    /// Rooms in display order.
    pub rooms: Vec<Room>,
}

impl RoomLayout {
    /// Returns the accessory identifiers of the named room, ignoring case.
    #[must_use]
    pub fn accessory_ids(&self, room: &str) -> Option<Vec<&str>> {
        self.rooms
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(room))
            .map(|r| r.services.iter().map(|s| s.unique_id.as_str()).collect())
    }

    /// Returns whether no room has any accessory.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.iter().all(|r| r.services.is_empty())
    }
}

impl fmt::Display for RoomLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("No rooms configured");
        }
        let mut first = true;
        for room in self.rooms.iter().filter(|r| !r.services.is_empty()) {
            if !first {
                writeln!(f)?;
            }
            first = false;
            writeln!(f, "{} ({} devices):", room.name, room.services.len())?;
            for service in &room.services {
                let name = service
                    .custom_name
                    .as_deref()
                    .or(service.service_name.as_deref())
                    .unwrap_or(&service.unique_id);
                match &service.service_type {
                    Some(kind) => writeln!(f, "   • {name} ({kind})")?,
                    None => writeln!(f, "   • {name}")?,
                }
            }
        }
        Ok(())
    }
}
