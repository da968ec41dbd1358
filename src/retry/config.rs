//! Serializable retry settings.
//!
//! `RetryConfig` holds the numeric half of a [`RetryPolicy`] so it can be
//! loaded from a config file. Callbacks are attached after conversion.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::retry::error::PolicyError;
use crate::retry::policy::RetryPolicy;

/// Retry settings as they appear in configuration.
///
/// Missing fields take the same defaults as [`RetryPolicy::new`].
///
/// # Example
///
/// ```rust
/// use taskchain::retry::RetryConfig;
///
/// let config: RetryConfig = serde_json::from_str(r#"{ "max_retries": 5 }"#).unwrap();
/// let policy = config.into_policy().unwrap();
///
/// assert_eq!(policy.max_retries(), 5);
/// assert_eq!(policy.backoff_rate(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Number of attempts allowed.
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    pub initial_interval_ms: u64,
    /// Multiplier applied to the delay after each failure.
    pub backoff_rate: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_interval_ms: 1000,
            backoff_rate: 2.0,
        }
    }
}

impl RetryConfig {
    /// Build a validated policy from these settings.
    pub fn into_policy(self) -> Result<RetryPolicy, PolicyError> {
        let policy = RetryPolicy::new()
            .with_max_retries(self.max_retries)
            .with_initial_interval(Duration::from_millis(self.initial_interval_ms))
            .with_backoff_rate(self.backoff_rate);
        policy.validate()?;
        Ok(policy)
    }
}

impl From<&RetryPolicy> for RetryConfig {
    fn from(policy: &RetryPolicy) -> Self {
        Self {
            max_retries: policy.max_retries(),
            initial_interval_ms: u64::try_from(policy.initial_interval().as_millis())
                .unwrap_or(u64::MAX),
            backoff_rate: policy.backoff_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: RetryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RetryConfig::default());

        let policy = config.into_policy().unwrap();
        assert_eq!(policy.max_retries(), 3);
        assert_eq!(policy.initial_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_full_config() {
        let json = r#"{ "max_retries": 4, "initial_interval_ms": 25, "backoff_rate": 3.0 }"#;
        let policy = serde_json::from_str::<RetryConfig>(json)
            .unwrap()
            .into_policy()
            .unwrap();

        assert_eq!(policy.max_retries(), 4);
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(75));
    }

    #[test]
    fn test_invalid_rate_is_rejected() {
        let config = RetryConfig {
            backoff_rate: 0.25,
            ..RetryConfig::default()
        };
        assert_eq!(
            config.into_policy().unwrap_err(),
            PolicyError::BackoffRateBelowOne(0.25)
        );
    }

    #[test]
    fn test_from_policy() {
        let policy = RetryPolicy::new()
            .with_max_retries(9)
            .with_initial_interval(Duration::from_millis(40));
        let config = RetryConfig::from(&policy);

        assert_eq!(config.max_retries, 9);
        assert_eq!(config.initial_interval_ms, 40);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"initial_interval_ms\":40"));
    }
}
