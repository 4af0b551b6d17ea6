//! Client configuration.

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root; request paths are appended to it.
    pub base_url: String,
    pub currency_symbol: String,
    /// Disable the submit control while a submission is in flight and skip
    /// submits that arrive in the meantime.
    pub guard_resubmission: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            guard_resubmission: false,
        }
    }
}
