use std::time::Duration;

use crate::tasks::{error::ProvisionError, validator::ConfigValidator};

pub const AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";

/// Settings that must be present before any builder is launched.
///
/// An unset variable is read as the empty string, so validation reports it
/// the same way as an explicitly empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredSettings {
    pub aws_default_region: String,
    pub aws_access_key_id: String,
}

impl RequiredSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads every setting through `lookup`, keyed by variable name.
    ///
    /// # Examples
    /// ```rust
    /// use provisioner::tasks::config::RequiredSettings;
    ///
    /// let settings = RequiredSettings::from_lookup(|name| Some(format!("{name}-value")));
    /// assert_eq!(settings.aws_default_region, "AWS_DEFAULT_REGION-value");
    /// assert!(settings.validate().is_ok());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        RequiredSettings {
            aws_default_region: lookup(AWS_DEFAULT_REGION).unwrap_or_default(),
            aws_access_key_id: lookup(AWS_ACCESS_KEY_ID).unwrap_or_default(),
        }
    }

    /// Named values in the order they are checked.
    pub fn fields(&self) -> [(&'static str, &str); 2] {
        [
            (AWS_DEFAULT_REGION, self.aws_default_region.as_str()),
            (AWS_ACCESS_KEY_ID, self.aws_access_key_id.as_str()),
        ]
    }

    pub fn validate(&self) -> Result<(), ProvisionError> {
        ConfigValidator::validate_required(self)
    }
}

/// Inclusive range of delay units a builder sleeps for.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayRange {
    pub min: u32,
    pub max: u32,
    /// Length of one unit
    pub unit: Duration,
}

impl Default for DelayRange {
    fn default() -> Self {
        DelayRange {
            min: 3,
            max: 20,
            unit: Duration::from_secs(1),
        }
    }
}

impl DelayRange {
    pub fn contains(&self, units: u32) -> bool {
        (self.min..=self.max).contains(&units)
    }

    pub fn shortest(&self) -> Duration {
        self.unit.saturating_mul(self.min)
    }

    pub fn longest(&self) -> Duration {
        self.unit.saturating_mul(self.max)
    }
}

/// What the collector does once a builder reports a failure.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort every outstanding builder and return the first failure
    #[default]
    FailFast,
    /// Wait for every builder, then return all failures together
    CollectAll,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Range every builder draws its delay from
    pub delay: DelayRange,

    /// Give up on stragglers after this many milliseconds
    pub timeout_ms: Option<u64>,

    pub failure_policy: FailurePolicy,

    /// Fixed seed for the shared random source, OS entropy otherwise
    pub seed: Option<u64>,
}

impl CollectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(mut self, min: u32, max: u32) -> Self {
        self.delay.min = min;
        self.delay.max = max;
        self
    }

    pub fn delay_unit(mut self, unit: Duration) -> Self {
        self.delay.unit = unit;
        self
    }

    pub fn timeout_ms(mut self, timeout: u64) -> Self {
        self.timeout_ms = Some(timeout);
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::InvalidConfiguration`] if:
    /// - the delay range is empty (`min > max`)
    /// - the timeout is zero
    ///
    /// # Examples
    /// ```rust
    /// use provisioner::tasks::config::CollectorConfig;
    ///
    /// assert!(CollectorConfig::new().validate().is_ok());
    /// assert!(CollectorConfig::new().delay(5, 2).validate().is_err());
    /// assert!(CollectorConfig::new().timeout_ms(0).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ProvisionError> {
        ConfigValidator::validate_delay_range(&self.delay)?;
        if let Some(timeout) = self.timeout_ms {
            ConfigValidator::validate_timeout(timeout)?;
        }
        Ok(())
    }
}
