// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for accessory control.
//!
//! This module provides type-safe representations of the values a caller
//! may supply to a control operation. Numeric types clamp rather than
//! reject out-of-range input, so a rough request such as "brightness 150"
//! still applies as the nearest valid value.
//!
//! # Types
//!
//! - [`Action`] - The recognized control actions
//! - [`PowerState`] - On/Off parsed from loosely typed input
//! - [`Percentage`] - Brightness or saturation (0-100%)
//! - [`Hue`] - Hue angle (0-360°)

mod action;
mod level;
mod power;

pub use action::Action;
pub use level::{Hue, Percentage};
pub use power::PowerState;
