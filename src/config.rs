//! Decoder configuration.

use std::env;

use serde::Deserialize;

/// Name of the environment variable read by `Config::from_env`.
pub const JSON_STORE_ENABLED_VAR: &str = "TWITTER_OBJECT_JSON_STORE_ENABLED";

/// Configuration of a `Decoder`.
///
/// Can be embedded in an application's own configuration file:
///
/// ```
/// # use twitter_object::Config;
/// let config: Config = serde_json::from_str(r#"{"json_store_enabled":true}"#).unwrap();
/// assert!(config.json_store_enabled);
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Whether the decoder registers the raw JSON of top-level objects in its store.
    pub json_store_enabled: bool,
}

impl Config {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn json_store_enabled(mut self, enabled: bool) -> Self {
        self.json_store_enabled = enabled;
        self
    }

    /// Reads the configuration from the environment. Unset variables take their default values.
    pub fn from_env() -> Self {
        let json_store_enabled = env::var(JSON_STORE_ENABLED_VAR)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Config { json_store_enabled }
    }
}

fn parse_flag(v: &str) -> bool {
    let v = v.trim();
    v == "1" || v.eq_ignore_ascii_case("true")
}
