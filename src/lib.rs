// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `homebridge_lib` - control Homebridge accessories through the Homebridge UI REST API.
//!
//! This library exposes a Homebridge controller's accessories as a small set
//! of callable operations, suitable for wiring into an AI tool-calling
//! protocol. A caller supplies only an accessory identifier and an action;
//! the library handles the session token, input validation and value
//! coercion, and reports every failure as a typed [`Error`].
//!
//! # Supported Features
//!
//! - **Discovery**: list accessories, room layout, per-accessory details
//! - **Control**: power, brightness, hue and saturation, with out-of-range
//!   values clamped rather than rejected
//! - **Toggle**: read-then-write power inversion
//! - **Bulk control**: apply one action to every accessory whose name
//!   contains a pattern, with per-accessory results
//! - **Cache reset**: drop local snapshots and trigger controller rediscovery
//!
//! # Quick Start
//!
//! ```no_run
//! use homebridge_lib::{Bridge, BridgeConfig};
//!
//! #[tokio::main]
//! async fn main() -> homebridge_lib::Result<()> {
//!     let bridge = Bridge::new(&BridgeConfig::new("192.168.1.20:8581"))?;
//!
//!     let accessories = bridge.list_accessories().await?;
//!     println!("{accessories}");
//!
//!     // Clamped to 100
//!     bridge.control_accessory("abc123", "brightness", "150").await?;
//!
//!     let result = bridge.control_room_devices("kitchen", "off", "").await?;
//!     println!("{result}");
//!     Ok(())
//! }
//! ```
//!
//! # Lower-level Use
//!
//! [`Controller`](control::Controller) is generic over [`AccessoryApi`], so the
//! control logic can run against any implementation of the four accessory
//! operations.

pub mod auth;
pub mod bridge;
pub mod cache;
pub mod client;
mod config;
pub mod control;
pub mod error;
pub mod grouping;
pub mod model;
pub mod types;

pub use auth::{SessionToken, TokenManager};
pub use bridge::{AccessoryList, Bridge};
pub use client::{AccessoryApi, AccessoryClient, CharacteristicValue, WriteAck};
pub use config::BridgeConfig;
pub use control::{BulkItem, BulkResult, ControlOutcome, Controller, ItemStatus, ToggleOutcome};
pub use error::{Error, ParseError, Result, ValidationError};
pub use grouping::RoomGroups;
pub use model::{Accessory, Characteristic, CharacteristicKind, RoomLayout};
pub use types::{Action, Hue, Percentage, PowerState};
