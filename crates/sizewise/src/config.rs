use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Smallest allowed refresh window: one frame at 60Hz. Anything shorter
/// would re-measure faster than the host can re-layout.
pub const MIN_REFRESH_RATE_MS: u64 = 16;

/// Which rate-limiting policy wraps the change-detection callback.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RefreshMode {
    /// Bounded call frequency: first call in a window fires immediately,
    /// the rest collapse into at most one trailing call at the window edge.
    #[default]
    Throttle,
    /// Delay until quiescence: fires once no call has arrived for a full
    /// window, collapsing bursts into a single invocation.
    Debounce,
}

impl FromStr for RefreshMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "throttle" => Ok(RefreshMode::Throttle),
            "debounce" => Ok(RefreshMode::Debounce),
            other => Err(ConfigError::UnknownRefreshMode(other.to_owned())),
        }
    }
}

impl fmt::Display for RefreshMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshMode::Throttle => f.write_str("throttle"),
            RefreshMode::Debounce => f.write_str("debounce"),
        }
    }
}

/// Monitoring configuration for one composition call.
///
/// Built with the defaults and adjusted through the builder methods, or
/// deserialized from application config (with the `serde` feature).
/// Validation happens once, in [`MonitorConfig::validate`] via
/// [`crate::with_size`]; the validated form is captured for the lifetime of
/// the composed component and never changes afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "snake_case"))]
pub struct MonitorConfig {
    /// Include width in the injected size and in the change-detection diff.
    pub monitor_width: bool,
    /// Same for height.
    pub monitor_height: bool,
    /// Rate-limiter window in milliseconds, at least [`MIN_REFRESH_RATE_MS`].
    pub refresh_rate_ms: u64,
    pub refresh_mode: RefreshMode,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            monitor_width: true,
            monitor_height: false,
            refresh_rate_ms: MIN_REFRESH_RATE_MS,
            refresh_mode: RefreshMode::Throttle,
        }
    }
}

impl MonitorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn monitor_width(mut self, monitor: bool) -> Self {
        self.monitor_width = monitor;
        self
    }

    pub fn monitor_height(mut self, monitor: bool) -> Self {
        self.monitor_height = monitor;
        self
    }

    pub fn refresh_rate_ms(mut self, rate_ms: u64) -> Self {
        self.refresh_rate_ms = rate_ms;
        self
    }

    pub fn refresh_mode(mut self, mode: RefreshMode) -> Self {
        self.refresh_mode = mode;
        self
    }

    /// Check the configuration invariants, naming the violated one.
    ///
    /// These are programmer errors: a failed validation aborts the
    /// composition call instead of coercing the value. The third invariant
    /// of the monitoring contract (refresh mode being one of the two known
    /// policies) is carried by [`RefreshMode`] itself for values built in
    /// code, and by [`RefreshMode::from_str`] for string-sourced ones.
    pub fn validate(self) -> Result<ValidConfig, ConfigError> {
        if !self.monitor_width && !self.monitor_height {
            return Err(ConfigError::NoAxisMonitored);
        }
        if self.refresh_rate_ms < MIN_REFRESH_RATE_MS {
            return Err(ConfigError::RefreshRateTooLow {
                got: self.refresh_rate_ms,
            });
        }
        Ok(ValidConfig(self))
    }
}

/// A [`MonitorConfig`] that has passed validation. Immutable; copied into
/// every controller the composition creates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidConfig(MonitorConfig);

impl ValidConfig {
    pub fn monitors_width(&self) -> bool {
        self.0.monitor_width
    }

    pub fn monitors_height(&self) -> bool {
        self.0.monitor_height
    }

    pub fn refresh_rate_ms(&self) -> u64 {
        self.0.refresh_rate_ms
    }

    pub fn refresh_mode(&self) -> RefreshMode {
        self.0.refresh_mode
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("at least one of monitor_width/monitor_height must be enabled")]
    NoAxisMonitored,
    #[error("refresh_rate_ms must be at least {MIN_REFRESH_RATE_MS}ms, got {got}ms")]
    RefreshRateTooLow { got: u64 },
    #[error("unknown refresh mode `{0}`, expected `throttle` or `debounce`")]
    UnknownRefreshMode(String),
}
