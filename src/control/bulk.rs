// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Best-effort control of every accessory whose name matches a pattern.

use std::fmt;

use serde::Serialize;

use crate::client::AccessoryApi;
use crate::control::{Command, ControlRequest, Controller};
use crate::error::{Error, Result, ValidationError};
use crate::types::Action;

/// Raw value that turns a bulk `power` request into a per-accessory toggle.
pub const TOGGLE_VALUE: &str = "toggle";

/// Outcome of one accessory within a bulk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// The write was acknowledged.
    Success,
    /// The write failed; see the item's detail.
    Failure,
}

/// Result entry for one matched accessory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkItem {
    /// Accessory identifier.
    pub unique_id: String,
    /// Display name of the accessory.
    pub name: String,
    /// Whether the write succeeded.
    pub status: ItemStatus,
    /// What was applied, or why it failed.
    pub detail: String,
    /// Corrective action for a failure, where known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl BulkItem {
    fn success(unique_id: &str, name: &str, detail: String) -> Self {
        Self {
            unique_id: unique_id.to_string(),
            name: name.to_string(),
            status: ItemStatus::Success,
            detail,
            hint: None,
        }
    }

    fn failure(unique_id: &str, name: &str, err: &Error) -> Self {
        Self {
            unique_id: unique_id.to_string(),
            name: name.to_string(),
            status: ItemStatus::Failure,
            detail: err.to_string(),
            hint: err.hint().map(str::to_string),
        }
    }

    /// Returns whether the write succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ItemStatus::Success
    }
}

impl fmt::Display for BulkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            ItemStatus::Success => write!(f, "OK {}: {}", self.name, self.detail),
            ItemStatus::Failure => {
                write!(f, "FAILED {}: {}", self.name, self.detail)?;
                if let Some(hint) = &self.hint {
                    write!(f, " ({hint})")?;
                }
                Ok(())
            }
        }
    }
}

/// Per-accessory outcomes of one bulk operation, in match order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkResult {
    /// The name pattern that was matched.
    pub pattern: String,
    /// The action that was applied.
    pub action: Action,
    /// One entry per matched accessory.
    pub items: Vec<BulkItem>,
}

impl BulkResult {
    /// Returns whether no accessory matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of successful writes.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.is_success()).count()
    }

    /// Returns the number of failed writes.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }
}

impl fmt::Display for BulkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No accessories match '{}'", self.pattern);
        }
        write!(
            f,
            "Applied {} to {} accessories matching '{}' ({} ok, {} failed)",
            self.action,
            self.items.len(),
            self.pattern,
            self.succeeded(),
            self.failed()
        )?;
        for item in &self.items {
            write!(f, "\n  {item}")?;
        }
        Ok(())
    }
}

enum BulkMode {
    Toggle,
    Write(Command),
}

impl<A: AccessoryApi> Controller<A> {
    /// Applies one action to every accessory whose display name contains
    /// `pattern`, ignoring case.
    ///
    /// A `power` action with the value `toggle` toggles each accessory
    /// individually. A failure on one accessory is recorded in its entry and
    /// does not stop the others. No match yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns `Validation` without any network call for an empty pattern or
    /// an invalid action/value, and whatever
    /// [`AccessoryApi::list_accessories`] returns.
    pub async fn control_by_pattern(
        &self,
        pattern: &str,
        action: &str,
        value: &str,
    ) -> Result<BulkResult> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(ValidationError::MissingPattern.into());
        }

        let mode = match action.parse::<Action>()? {
            Action::Power if value.trim().eq_ignore_ascii_case(TOGGLE_VALUE) => BulkMode::Toggle,
            _ => BulkMode::Write(Command::parse(action, value)?),
        };
        let action = match &mode {
            BulkMode::Toggle => Action::Power,
            BulkMode::Write(command) => command.action(),
        };

        let matched: Vec<_> = self
            .api()
            .list_accessories()
            .await?
            .into_iter()
            .filter(|a| a.name_matches(pattern))
            .collect();

        tracing::info!(pattern, %action, matched = matched.len(), "Bulk control");

        let mut items = Vec::with_capacity(matched.len());
        for accessory in &matched {
            let id = accessory.unique_id.as_str();
            let name = accessory.service_name.as_str();

            let item = match &mode {
                BulkMode::Toggle => match self.toggle(id).await {
                    Ok(outcome) => {
                        BulkItem::success(id, name, format!("{} → {}", outcome.before, outcome.after))
                    }
                    Err(err) => BulkItem::failure(id, name, &err),
                },
                BulkMode::Write(command) => {
                    match self.dispatch(&ControlRequest::new(id, *command)).await {
                        Ok(outcome) => BulkItem::success(
                            id,
                            name,
                            format!("{} = {}", outcome.characteristic, outcome.value),
                        ),
                        Err(err) => BulkItem::failure(id, name, &err),
                    }
                }
            };

            if !item.is_success() {
                tracing::warn!(unique_id = id, detail = %item.detail, "Bulk item failed");
            }
            items.push(item);
        }

        Ok(BulkResult {
            pattern: pattern.to_string(),
            action,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CharacteristicValue;
    use crate::control::fake::{Call, FakeApi};
    use crate::model::CharacteristicKind;

    fn kitchen() -> FakeApi {
        FakeApi::new()
            .with_light("k1", "Kitchen Ceiling", false)
            .with_light("b1", "Bedroom Lamp", false)
            .with_light("k2", "kitchen counter", true)
            .with_light("k3", "KITCHEN Island", false)
    }

    #[tokio::test]
    async fn partial_failure_keeps_going_in_order() {
        let controller = Controller::new(kitchen().failing_writes("k2", 500));

        let result = controller
            .control_by_pattern("kitchen", "on", "")
            .await
            .unwrap();

        let statuses: Vec<_> = result.items.iter().map(|i| i.status).collect();
        assert_eq!(
            statuses,
            [ItemStatus::Success, ItemStatus::Failure, ItemStatus::Success]
        );
        let ids: Vec<_> = result.items.iter().map(|i| i.unique_id.as_str()).collect();
        assert_eq!(ids, ["k1", "k2", "k3"]);
        assert!(result.items[1].detail.contains("HTTP 500"));
        assert_eq!(result.succeeded(), 2);
        assert_eq!(result.failed(), 1);
        assert_eq!(controller.api().set_calls().len(), 3);
    }

    #[tokio::test]
    async fn empty_match_is_not_an_error() {
        let controller = Controller::new(kitchen());
        let result = controller
            .control_by_pattern("nonexistent-name", "on", "")
            .await
            .unwrap();
        assert!(result.is_empty());
        assert!(controller.api().set_calls().is_empty());
        assert_eq!(result.to_string(), "No accessories match 'nonexistent-name'");
    }

    #[tokio::test]
    async fn bulk_applies_clamped_value() {
        let controller = Controller::new(kitchen());
        let result = controller
            .control_by_pattern("bedroom", "brightness", "250")
            .await
            .unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].detail, "brightness = 100");
        assert_eq!(
            controller.api().set_calls(),
            vec![Call::Set {
                unique_id: "b1".into(),
                kind: CharacteristicKind::Brightness,
                value: CharacteristicValue::Int(100),
            }]
        );
    }

    #[tokio::test]
    async fn bulk_toggle_inverts_each_accessory() {
        let controller = Controller::new(kitchen());
        let result = controller
            .control_by_pattern("kitchen", "power", "toggle")
            .await
            .unwrap();
        let details: Vec<_> = result.items.iter().map(|i| i.detail.as_str()).collect();
        assert_eq!(details, ["Off → On", "On → Off", "Off → On"]);
        assert_eq!(result.action, Action::Power);
    }

    #[tokio::test]
    async fn invalid_request_is_rejected_before_listing() {
        let controller = Controller::new(kitchen());
        assert!(matches!(
            controller.control_by_pattern("kitchen", "color", "5").await,
            Err(Error::Validation(ValidationError::UnsupportedAction(_)))
        ));
        assert!(matches!(
            controller.control_by_pattern("kitchen", "hue", "red").await,
            Err(Error::Validation(ValidationError::InvalidValue { .. }))
        ));
        assert!(matches!(
            controller.control_by_pattern("  ", "on", "").await,
            Err(Error::Validation(ValidationError::MissingPattern))
        ));
        assert!(controller.api().calls().is_empty());
    }

    #[tokio::test]
    async fn failure_entry_carries_hint() {
        let controller = Controller::new(kitchen().failing_writes("b1", 400));
        let result = controller
            .control_by_pattern("bedroom", "off", "")
            .await
            .unwrap();
        let item = &result.items[0];
        assert_eq!(item.status, ItemStatus::Failure);
        assert!(item.hint.as_deref().unwrap().contains("writable"));
        assert!(result.to_string().contains("FAILED Bedroom Lamp"));
    }
}
