use std::time::Duration;

use rand::Rng;

use crate::error::WidgetError;

pub const API_BASE_URL_KEY: &str = "FAQ_API_BASE_URL";
pub const SITE_BASE_URL_KEY: &str = "FAQ_SITE_BASE_URL";
pub const LATENCY_BASE_MS_KEY: &str = "FAQ_LATENCY_BASE_MS";
pub const LATENCY_JITTER_MS_KEY: &str = "FAQ_LATENCY_JITTER_MS";

const DEFAULT_LATENCY_BASE_MS: u64 = 450;
const DEFAULT_LATENCY_JITTER_MS: u64 = 300;

/// Simulated round-trip latency: `base` plus a uniform random extra of up to `jitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub base: Duration,
    pub jitter: Duration,
}

impl LatencyProfile {
    pub const NONE: LatencyProfile = LatencyProfile { base: Duration::ZERO, jitter: Duration::ZERO };

    pub fn sample(&self) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.base;
        }
        self.base + Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(DEFAULT_LATENCY_BASE_MS),
            jitter: Duration::from_millis(DEFAULT_LATENCY_JITTER_MS),
        }
    }
}

/// Settings injected at startup. With no `api_base_url` the widget answers
/// from the built-in mock pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetConfig {
    pub api_base_url: Option<String>,
    pub site_base_url: Option<String>,
    pub latency: LatencyProfile,
}

impl WidgetConfig {
    /// Builds the config from a key lookup (process env, build-time env, ...).
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WidgetError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let millis = |key: &str, default: u64| -> Result<Duration, WidgetError> {
            match get(key) {
                None => Ok(Duration::from_millis(default)),
                Some(raw) => raw.parse::<u64>().map(Duration::from_millis).map_err(|_| {
                    WidgetError::InvalidConfig { key: key.to_string(), value: raw }
                }),
            }
        };

        Ok(Self {
            api_base_url: get(API_BASE_URL_KEY).map(|url| url.trim_end_matches('/').to_string()),
            site_base_url: get(SITE_BASE_URL_KEY),
            latency: LatencyProfile {
                base: millis(LATENCY_BASE_MS_KEY, DEFAULT_LATENCY_BASE_MS)?,
                jitter: millis(LATENCY_JITTER_MS_KEY, DEFAULT_LATENCY_JITTER_MS)?,
            },
        })
    }
}
