//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Default chat service location used when nothing is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Number of trailing history entries included in a lead's conversation snippet.
pub const DEFAULT_SNIPPET_ENTRIES: usize = 5;

/// Widget instance configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Base URL of the chat/lead service.
    pub api_base: String,
    /// Tenant identifier sent with every request.
    pub client_id: String,
    /// Page the widget is embedded in, reported with each lead.
    pub source_url: String,
    /// Per-request timeout applied by the controller. `None` waits forever.
    pub request_timeout: Option<Duration>,
    /// Pause between the lead confirmation and the follow-up contact details.
    pub contact_info_delay: Duration,
    /// How many history entries go into the conversation snippet.
    pub snippet_entries: usize,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            client_id: "default".to_string(),
            source_url: String::new(),
            request_timeout: None,
            contact_info_delay: Duration::from_millis(1000),
            snippet_entries: DEFAULT_SNIPPET_ENTRIES,
        }
    }
}

impl WidgetConfig {
    /// Build config from `LEAD_WIDGET_*` environment variables.
    ///
    /// Unset variables fall back to the defaults; set-but-unparseable ones
    /// are an error rather than silently ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base = lookup("LEAD_WIDGET_API_BASE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.api_base);
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "LEAD_WIDGET_API_BASE".into(),
                message: format!("expected an http(s) URL, got '{api_base}'"),
            });
        }

        let client_id = lookup("LEAD_WIDGET_CLIENT_ID")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.client_id);

        let source_url = lookup("LEAD_WIDGET_SOURCE_URL").unwrap_or(defaults.source_url);

        let request_timeout = match lookup("LEAD_WIDGET_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = parse_number::<u64>("LEAD_WIDGET_TIMEOUT_SECS", &raw)?;
                // 0 disables the timeout
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => defaults.request_timeout,
        };

        let contact_info_delay = match lookup("LEAD_WIDGET_CONTACT_DELAY_MS") {
            Some(raw) => Duration::from_millis(parse_number::<u64>(
                "LEAD_WIDGET_CONTACT_DELAY_MS",
                &raw,
            )?),
            None => defaults.contact_info_delay,
        };

        Ok(Self {
            api_base,
            client_id,
            source_url,
            request_timeout,
            contact_info_delay,
            snippet_entries: defaults.snippet_entries,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}
