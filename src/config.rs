// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge configuration.

use std::time::Duration;

/// Configuration for a connection to a Homebridge controller.
///
/// The only setting normally supplied from outside is the controller
/// `host:port`; everything else has a sensible default.
///
/// # Examples
///
/// ```
/// use homebridge_lib::BridgeConfig;
/// use std::time::Duration;
///
/// let config = BridgeConfig::new("192.168.1.20:8581")
///     .with_timeout(Duration::from_secs(5))
///     .with_accessory_cache(false);
///
/// assert_eq!(config.base_url(), "http://192.168.1.20:8581");
/// assert!(!config.accessory_cache());
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    host: String,
    timeout: Duration,
    refresh_buffer: Duration,
    default_token_lifetime: Duration,
    accessory_cache: bool,
}

impl BridgeConfig {
    /// Environment variable holding the controller `host:port`.
    pub const HOST_ENV: &'static str = "HOMEBRIDGE_HOST";
    /// Controller address used when none is configured.
    pub const DEFAULT_HOST: &'static str = "homebridge.local:8081";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Margin before token expiry during which the token counts as expired.
    pub const DEFAULT_REFRESH_BUFFER: Duration = Duration::from_secs(5 * 60);
    /// Token lifetime assumed when the login reply carries none.
    pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

    /// Creates a configuration for the given `host:port`.
    ///
    /// A leading `http://` or `https://` is kept; otherwise plain HTTP is
    /// assumed. A blank host falls back to [`Self::DEFAULT_HOST`].
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let host = host.trim().trim_end_matches('/');
        Self {
            host: if host.is_empty() {
                Self::DEFAULT_HOST.to_string()
            } else {
                host.to_string()
            },
            timeout: Self::DEFAULT_TIMEOUT,
            refresh_buffer: Self::DEFAULT_REFRESH_BUFFER,
            default_token_lifetime: Self::DEFAULT_TOKEN_LIFETIME,
            accessory_cache: true,
        }
    }

    /// Creates a configuration from the `HOMEBRIDGE_HOST` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_host_setting(std::env::var(Self::HOST_ENV).ok())
    }

    fn from_host_setting(setting: Option<String>) -> Self {
        match setting {
            Some(host) => Self::new(host),
            None => Self::new(Self::DEFAULT_HOST),
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the token refresh buffer.
    #[must_use]
    pub fn with_refresh_buffer(mut self, buffer: Duration) -> Self {
        self.refresh_buffer = buffer;
        self
    }

    /// Sets the token lifetime assumed when the controller omits one.
    #[must_use]
    pub fn with_default_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.default_token_lifetime = lifetime;
        self
    }

    /// Enables or disables the accessory list/layout cache.
    #[must_use]
    pub fn with_accessory_cache(mut self, enabled: bool) -> Self {
        self.accessory_cache = enabled;
        self
    }

    /// Returns the configured host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the token refresh buffer.
    #[must_use]
    pub fn refresh_buffer(&self) -> Duration {
        self.refresh_buffer
    }

    /// Returns the default token lifetime.
    #[must_use]
    pub fn default_token_lifetime(&self) -> Duration {
        self.default_token_lifetime
    }

    /// Returns whether the accessory cache is enabled.
    #[must_use]
    pub fn accessory_cache(&self) -> bool {
        self.accessory_cache
    }

    /// Builds the base URL of the controller API.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            self.host.clone()
        } else {
            format!("http://{}", self.host)
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HOST)
    }
}
