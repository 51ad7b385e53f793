//! Progress reporting configuration
//!
//! Controls the joint progress line the aggregator emits.
//!
//! # Defaults
//!
//! Enabled, sampled every 10 seconds, human format, and a stream that
//! stops leaves its last count frozen in the joint view.

use serde::Deserialize;
use std::time::Duration;

/// Default sampling interval for the joint progress line
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Progress line output format
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProgressFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON structured output
    Json,
}

/// What the aggregator does when one stream stops while the other runs
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StreamEndPolicy {
    /// Keep reporting, freezing the stopped stream's last value (default)
    #[default]
    Freeze,
    /// Stop reporting as soon as any stream stops
    Stop,
}

/// Progress reporting configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Enable the periodic progress line. Default: true
    pub enabled: bool,

    /// Sampling interval. Default: 10s
    #[serde(with = "humantime_serde")]
    pub interval: Duration,

    /// Output format (human, json). Default: human
    pub format: ProgressFormat,

    /// Behavior when one stream stops. Default: freeze
    pub on_stream_end: StreamEndPolicy,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: DEFAULT_INTERVAL,
            format: ProgressFormat::Human,
            on_stream_end: StreamEndPolicy::Freeze,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProgressConfig::default();
        assert!(config.enabled);
        assert_eq!(config.interval, Duration::from_secs(10));
        assert_eq!(config.format, ProgressFormat::Human);
        assert_eq!(config.on_stream_end, StreamEndPolicy::Freeze);
    }

    #[test]
    fn test_deserialize_policies() {
        let config: ProgressConfig =
            toml::from_str("format = \"json\"\non_stream_end = \"stop\"").unwrap();
        assert_eq!(config.format, ProgressFormat::Json);
        assert_eq!(config.on_stream_end, StreamEndPolicy::Stop);
    }

    #[test]
    fn test_deserialize_interval_variants() {
        for (s, expected) in [
            ("500ms", Duration::from_millis(500)),
            ("10s", Duration::from_secs(10)),
            ("1m", Duration::from_secs(60)),
        ] {
            let toml = format!("interval = \"{}\"", s);
            let config: ProgressConfig = toml::from_str(&toml).unwrap();
            assert_eq!(config.interval, expected, "failed for {}", s);
        }
    }
}
