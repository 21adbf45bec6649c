// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Access to the controller's accessory REST endpoints.
//!
//! [`AccessoryApi`] is the seam between the control logic and the network.
//! [`AccessoryClient`] implements it over HTTP with a bearer token from the
//! shared [`TokenManager`](crate::auth::TokenManager).
//!
//! # Endpoints
//!
//! | Operation | Request |
//! |---|---|
//! | list | `GET /api/accessories` |
//! | layout | `GET /api/accessories/layout` |
//! | detail | `GET /api/accessories/{uniqueId}` |
//! | write | `PUT /api/accessories/{uniqueId}` with `{characteristicType, value}` |
//! | controller cache reset | `PUT /api/server/reset-cached-accessories` |

mod http;

pub use http::AccessoryClient;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::model::{Accessory, CharacteristicKind, RoomLayout};

/// A value written to a characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CharacteristicValue {
    /// Boolean value, used for power.
    Bool(bool),
    /// Integer value, used for brightness, hue and saturation.
    Int(u16),
}

impl fmt::Display for CharacteristicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

/// Acknowledgement of a characteristic write.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteAck {
    body: Value,
}

impl WriteAck {
    /// Creates an acknowledgement from the controller's reply body.
    #[must_use]
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Returns the reply body, `Null` when the controller sent none.
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }
}

/// Operations the control logic needs from the controller.
#[allow(async_fn_in_trait)]
pub trait AccessoryApi {
    /// Lists every accessory.
    ///
    /// # Errors
    ///
    /// Returns `Communication`, `Api` or `Parse` errors.
    async fn list_accessories(&self) -> Result<Vec<Accessory>>;

    /// Returns the room layout.
    ///
    /// # Errors
    ///
    /// Returns `Communication`, `Api` or `Parse` errors.
    async fn get_layout(&self) -> Result<RoomLayout>;

    /// Returns one accessory.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` on HTTP 404, otherwise as for [`Self::list_accessories`].
    async fn get_accessory(&self, unique_id: &str) -> Result<Accessory>;

    /// Writes one characteristic of one accessory.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` on HTTP 404, `Validation` on HTTP 400 and `Api`
    /// for any other non-2xx status.
    async fn set_characteristic(
        &self,
        unique_id: &str,
        kind: CharacteristicKind,
        value: CharacteristicValue,
    ) -> Result<WriteAck>;
}
