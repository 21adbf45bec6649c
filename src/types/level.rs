// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clamped numeric levels for brightness, saturation and hue.

use std::fmt;

/// A percentage level (0-100) used for brightness and saturation.
///
/// Construction clamps: values below 0 become 0 and values above 100
/// become 100.
///
/// # Examples
///
/// ```
/// use homebridge_lib::types::Percentage;
///
/// assert_eq!(Percentage::clamped(150).value(), 100);
/// assert_eq!(Percentage::clamped(-5).value(), 0);
/// assert_eq!(Percentage::parse(" 42 ").unwrap().value(), 42);
/// assert!(Percentage::parse("bright").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Minimum level (0%).
    pub const MIN: Self = Self(0);

    /// Maximum level (100%).
    pub const MAX: Self = Self(100);

    /// Creates a level, clamping to [0, 100].
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn clamped(value: i64) -> Self {
        if value < 0 {
            Self::MIN
        } else if value > 100 {
            Self::MAX
        } else {
            // Safe: 0 <= value <= 100
            Self(value as u8)
        }
    }

    /// Parses an integer from caller input and clamps it.
    ///
    /// Returns `None` if the input is not an integer.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().map(Self::clamped)
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A hue angle in degrees (0-360).
///
/// # Examples
///
/// ```
/// use homebridge_lib::types::Hue;
///
/// assert_eq!(Hue::clamped(-10).value(), 0);
/// assert_eq!(Hue::clamped(400).value(), 360);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Hue(u16);

impl Hue {
    /// Maximum hue angle.
    pub const MAX: u16 = 360;

    /// Creates a hue, clamping to [0, 360].
    #[must_use]
    #[allow(
        clippy::cast_lossless,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub const fn clamped(value: i64) -> Self {
        if value < 0 {
            Self(0)
        } else if value > Self::MAX as i64 {
            Self(Self::MAX)
        } else {
            // Safe: 0 <= value <= 360
            Self(value as u16)
        }
    }

    /// Parses an integer from caller input and clamps it.
    ///
    /// Returns `None` if the input is not an integer.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().map(Self::clamped)
    }

    /// Returns the hue in degrees.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}
