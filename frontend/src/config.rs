use faq_widget_core::WidgetConfig;
use faq_widget_core::config::{
    API_BASE_URL_KEY, LATENCY_BASE_MS_KEY, LATENCY_JITTER_MS_KEY, SITE_BASE_URL_KEY,
};

/// Widget settings injected at build time (e.g. `FAQ_API_BASE_URL=... trunk build`).
pub fn load() -> WidgetConfig {
    let lookup = |key: &str| {
        match key {
            API_BASE_URL_KEY => option_env!("FAQ_API_BASE_URL"),
            SITE_BASE_URL_KEY => option_env!("FAQ_SITE_BASE_URL"),
            LATENCY_BASE_MS_KEY => option_env!("FAQ_LATENCY_BASE_MS"),
            LATENCY_JITTER_MS_KEY => option_env!("FAQ_LATENCY_JITTER_MS"),
            _ => None,
        }
        .map(str::to_string)
    };

    WidgetConfig::from_lookup(lookup).unwrap_or_else(|e| {
        log::error!("Invalid widget configuration, using defaults: {e}");
        WidgetConfig::default()
    })
}
