// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room group suggestions derived from accessory names.
//!
//! Accessory names often carry the room ("Living Room Lamp", "Luz Comedor").
//! Grouping by keyword gives a caller name patterns it can pass straight to
//! bulk control. Formal room assignment still happens in the Home app.

use std::fmt;

use serde::Serialize;

use crate::model::Accessory;

/// Room rules, checked in order before the light rule. The first match wins.
const ROOM_RULES: &[(&str, &[&str])] = &[
    ("Living Room", &["living", "sala", "salon"]),
    ("Dining Room", &["dining", "comedor"]),
    ("Entry", &["entry", "entrada", "hall"]),
    ("Garden", &["garden", "jardin", "patio"]),
    ("Garage", &["garage"]),
    ("Decoration", &["christmas", "navidad", "arbol"]),
];

const LIGHT_KEYWORDS: &[&str] = &["light", "luz"];

/// Side groups for lights; a side keyword may appear anywhere in the name.
const LIGHT_SIDES: &[(&str, &[&str])] = &[
    ("Lights - Right", &["right", "derecha"]),
    ("Lights - Left", &["left", "izquierda"]),
];

const LIGHTS: &str = "Lights";
const SWITCHES: &str = "Switches";

/// Display order of every group that can be suggested.
const GROUP_ORDER: [&str; 10] = [
    "Living Room",
    "Dining Room",
    "Entry",
    "Garden",
    "Garage",
    "Decoration",
    "Lights - Right",
    "Lights - Left",
    LIGHTS,
    SWITCHES,
];

fn contains_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| name.contains(*k))
}

/// Picks the group for a lowercased accessory name.
fn classify(name: &str) -> Option<&'static str> {
    if let Some((group, _)) = ROOM_RULES
        .iter()
        .find(|(_, keywords)| contains_any(name, keywords))
    {
        return Some(*group);
    }
    if contains_any(name, LIGHT_KEYWORDS) {
        let side = LIGHT_SIDES
            .iter()
            .find(|(_, keywords)| contains_any(name, keywords))
            .map_or(LIGHTS, |(group, _)| *group);
        return Some(side);
    }
    name.contains("switch").then_some(SWITCHES)
}

/// An accessory listed in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedAccessory {
    /// Accessory identifier.
    pub unique_id: String,
    /// Display name.
    pub name: String,
    /// Service type.
    pub service_type: String,
}

impl From<&Accessory> for GroupedAccessory {
    fn from(accessory: &Accessory) -> Self {
        Self {
            unique_id: accessory.unique_id.clone(),
            name: accessory.service_name.clone(),
            service_type: accessory.service_type.clone(),
        }
    }
}

/// A suggested room and its accessories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomGroup {
    /// Suggested room name.
    pub name: String,
    /// Accessories in source list order.
    pub accessories: Vec<GroupedAccessory>,
}

/// Suggested room groups plus the accessories no rule matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomGroups {
    /// Non-empty groups, in rule order.
    pub groups: Vec<RoomGroup>,
    /// Accessories that need manual review.
    pub unassigned: Vec<GroupedAccessory>,
}

impl RoomGroups {
    /// Returns the group with the given name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&RoomGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}

fn write_entries(f: &mut fmt::Formatter<'_>, entries: &[GroupedAccessory]) -> fmt::Result {
    for acc in entries {
        writeln!(f, "   • {} ({})", acc.name, acc.service_type)?;
        writeln!(f, "     ID: {}", acc.unique_id)?;
    }
    Ok(())
}

impl fmt::Display for RoomGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Suggested room groups:")?;
        for group in &self.groups {
            writeln!(f)?;
            writeln!(f, "{} ({} devices):", group.name, group.accessories.len())?;
            write_entries(f, &group.accessories)?;
        }
        if !self.unassigned.is_empty() {
            writeln!(f)?;
            writeln!(f, "Unassigned (needs manual review):")?;
            write_entries(f, &self.unassigned)?;
        }
        Ok(())
    }
}

/// Groups accessories by keywords found in their display names.
///
/// # Examples
///
/// ```
/// use homebridge_lib::grouping::group_by_keywords;
/// use homebridge_lib::model::Accessory;
///
/// let accessories: Vec<Accessory> = serde_json::from_str(
///     r#"[{"uniqueId": "1", "serviceName": "Garage Door"},
///         {"uniqueId": "2", "serviceName": "Thermostat"}]"#,
/// ).unwrap();
///
/// let groups = group_by_keywords(&accessories);
/// assert_eq!(groups.groups[0].name, "Garage");
/// assert_eq!(groups.unassigned[0].unique_id, "2");
/// ```
#[must_use]
pub fn group_by_keywords(accessories: &[Accessory]) -> RoomGroups {
    let mut buckets: Vec<Vec<GroupedAccessory>> = vec![Vec::new(); GROUP_ORDER.len()];
    let mut unassigned = Vec::new();

    for accessory in accessories {
        let index = classify(&accessory.service_name.to_lowercase())
            .and_then(|group| GROUP_ORDER.iter().position(|g| *g == group));
        match index {
            Some(index) => buckets[index].push(accessory.into()),
            None => unassigned.push(accessory.into()),
        }
    }

    let groups = GROUP_ORDER
        .iter()
        .zip(buckets)
        .filter(|(_, members)| !members.is_empty())
        .map(|(name, accessories)| RoomGroup {
            name: (*name).to_string(),
            accessories,
        })
        .collect();

    RoomGroups { groups, unassigned }
}
