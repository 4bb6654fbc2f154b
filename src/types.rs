//! Common types used across the crate.

pub use serde_json::Value as JsonValue;

use chrono::{DateTime as ChronoDateTime, Utc};

pub type DateTime = ChronoDateTime<Utc>;
