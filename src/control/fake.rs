// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory [`AccessoryApi`] that records every call.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::client::{AccessoryApi, CharacteristicValue, WriteAck};
use crate::error::{Error, Result, ValidationError};
use crate::model::{Accessory, CharacteristicKind, RoomLayout};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    List,
    Layout,
    Get(String),
    Set {
        unique_id: String,
        kind: CharacteristicKind,
        value: CharacteristicValue,
    },
}

#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    accessories: Vec<Accessory>,
    write_failures: HashMap<String, u16>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_accessory(mut self, accessory: Value) -> Self {
        self.accessories
            .push(serde_json::from_value(accessory).expect("valid accessory json"));
        self
    }

    pub(crate) fn with_light(self, unique_id: &str, name: &str, on: bool) -> Self {
        self.with_accessory(json!({
            "uniqueId": unique_id,
            "serviceName": name,
            "serviceType": "Lightbulb",
            "serviceCharacteristics": [
                {"type": "On", "value": on, "canRead": true, "canWrite": true},
                {"type": "Brightness", "value": 50, "canRead": true, "canWrite": true},
                {"type": "Hue", "value": 0, "canRead": true, "canWrite": true},
                {"type": "Saturation", "value": 0, "canRead": true, "canWrite": true}
            ]
        }))
    }

    pub(crate) fn failing_writes(mut self, unique_id: &str, status: u16) -> Self {
        self.write_failures.insert(unique_id.to_string(), status);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub(crate) fn set_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Set { .. }))
            .collect()
    }
}

impl AccessoryApi for FakeApi {
    async fn list_accessories(&self) -> Result<Vec<Accessory>> {
        self.calls.lock().push(Call::List);
        Ok(self.accessories.clone())
    }

    async fn get_layout(&self) -> Result<RoomLayout> {
        self.calls.lock().push(Call::Layout);
        Ok(RoomLayout::default())
    }

    async fn get_accessory(&self, unique_id: &str) -> Result<Accessory> {
        self.calls.lock().push(Call::Get(unique_id.to_string()));
        self.accessories
            .iter()
            .find(|a| a.unique_id == unique_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(unique_id.to_string()))
    }

    async fn set_characteristic(
        &self,
        unique_id: &str,
        kind: CharacteristicKind,
        value: CharacteristicValue,
    ) -> Result<WriteAck> {
        self.calls.lock().push(Call::Set {
            unique_id: unique_id.to_string(),
            kind,
            value,
        });
        match self.write_failures.get(unique_id) {
            Some(404) => Err(Error::NotFound(unique_id.to_string())),
            Some(400) => Err(ValidationError::Rejected("not writable".into()).into()),
            Some(&status) => Err(Error::Api {
                status,
                body: "controller failure".into(),
            }),
            None => Ok(WriteAck::new(Value::Null)),
        }
    }
}
