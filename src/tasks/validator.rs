use crate::tasks::{
    config::{DelayRange, RequiredSettings},
    error::ProvisionError,
};

/// Validation for startup settings and collector configuration
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates that every required setting holds a value.
    ///
    /// Fields are checked in declaration order and the first empty one is
    /// reported. Whitespace-only values count as empty.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::MissingSetting`] naming the offending
    /// variable.
    ///
    /// # Examples
    /// ```rust
    /// use provisioner::tasks::{
    ///     config::RequiredSettings, error::ProvisionError, validator::ConfigValidator,
    /// };
    ///
    /// let settings = RequiredSettings {
    ///     aws_default_region: "eu-west-1".to_string(),
    ///     aws_access_key_id: String::new(),
    /// };
    /// assert_eq!(
    ///     ConfigValidator::validate_required(&settings),
    ///     Err(ProvisionError::MissingSetting("AWS_ACCESS_KEY_ID".to_string()))
    /// );
    /// ```
    pub fn validate_required(settings: &RequiredSettings) -> Result<(), ProvisionError> {
        for (name, value) in settings.fields() {
            if value.trim().is_empty() {
                return Err(ProvisionError::MissingSetting(name.to_string()));
            }
        }
        Ok(())
    }

    /// Validates that the delay range holds at least one value.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::InvalidConfiguration`] if `min > max`.
    pub fn validate_delay_range(range: &DelayRange) -> Result<(), ProvisionError> {
        if range.min > range.max {
            return Err(ProvisionError::InvalidConfiguration(format!(
                "Delay range {}..={} is empty",
                range.min, range.max
            )));
        }
        Ok(())
    }

    pub fn validate_timeout(timeout_ms: u64) -> Result<(), ProvisionError> {
        if timeout_ms == 0 {
            return Err(ProvisionError::InvalidConfiguration(
                "Timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
