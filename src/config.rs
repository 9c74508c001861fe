//! Environment-driven configuration for the probe binaries.

/// Environment variable holding the absolute tolerance of numeric checks
pub const ATOL_VAR: &str = "GEOTENSOR_ATOL";

/// Environment variable that keeps the probes on the host runtime
pub const FORCE_CPU_VAR: &str = "GEOTENSOR_FORCE_CPU";

/// Tolerance used when `GEOTENSOR_ATOL` is unset
pub const DEFAULT_ATOL: f64 = 1e-6;

/// Settings shared by the probe suites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeConfig {
    /// Absolute tolerance for value comparisons
    pub atol: f64,
    /// Skip the accelerator even when one is present
    pub force_cpu: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            atol: DEFAULT_ATOL,
            force_cpu: false,
        }
    }
}

impl ProbeConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the environment, logging and falling back to defaults on error.
    pub fn load() -> Self {
        Self::from_env().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring probe configuration, using defaults");
            Self::default()
        })
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ATOL_VAR) {
            let atol: f64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ATOL_VAR,
                value: raw.clone(),
                reason: "expected a number",
            })?;
            if !atol.is_finite() || atol < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: ATOL_VAR,
                    value: raw,
                    reason: "tolerance must be finite and non-negative",
                });
            }
            config.atol = atol;
        }

        if let Some(raw) = lookup(FORCE_CPU_VAR) {
            config.force_cpu = parse_flag(&raw).ok_or(ConfigError::InvalidValue {
                key: FORCE_CPU_VAR,
                value: raw.clone(),
                reason: "expected one of 1, 0, true, false, yes, no",
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Errors raised while reading `ProbeConfig` from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Raw value as found in the environment
        value: String,
        /// What was expected instead
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ProbeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ProbeConfig::default());
        assert_eq!(config.atol, 1e-6);
        assert!(!config.force_cpu);
    }

    #[test]
    fn test_overrides() {
        let config =
            ProbeConfig::from_lookup(lookup(&[(ATOL_VAR, "1e-4"), (FORCE_CPU_VAR, "TRUE")]))
                .unwrap();
        assert_eq!(config.atol, 1e-4);
        assert!(config.force_cpu);
    }

    #[test]
    fn test_invalid_values() {
        assert!(ProbeConfig::from_lookup(lookup(&[(ATOL_VAR, "tight")])).is_err());
        assert!(ProbeConfig::from_lookup(lookup(&[(ATOL_VAR, "-1")])).is_err());
        let err = ProbeConfig::from_lookup(lookup(&[(FORCE_CPU_VAR, "maybe")])).unwrap_err();
        assert!(err.to_string().contains(FORCE_CPU_VAR));
    }
}
