//! Front door decoding users and Tweets from JSON texts.

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use static_assertions::assert_impl_all;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::store::{JsonStore, MemoryJsonStore, StoreKey};
use crate::tweet::Tweet;
use crate::types::JsonValue;
use crate::user::User;

/// Decodes users and Tweets from JSON texts, optionally recording their raw JSON in a
/// `JsonStore`.
///
/// ```
/// use twitter_object::{Config, Decoder, JsonStore, StoreKey};
///
/// let decoder = Decoder::new(Config::new().json_store_enabled(true));
/// let user = decoder.user(r#"{"id":42,"name":"A","screen_name":"a"}"#).unwrap();
/// assert_eq!(user.screen_name, "a");
/// assert!(decoder.store().get(StoreKey::User(42)).is_some());
/// ```
#[derive(Clone)]
pub struct Decoder {
    config: Config,
    store: Arc<dyn JsonStore>,
}

assert_impl_all!(Decoder: Send, Sync);
assert_impl_all!(User: Send, Sync);
assert_impl_all!(Tweet: Send, Sync);

impl Decoder {
    /// Creates a decoder with a fresh `MemoryJsonStore`.
    pub fn new(config: Config) -> Self {
        debug!(?config, "creating decoder");
        Decoder {
            config,
            store: Arc::new(MemoryJsonStore::new()),
        }
    }

    /// Replaces the store of the decoder.
    pub fn with_store(mut self, store: Arc<dyn JsonStore>) -> Self {
        self.store = store;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn JsonStore> {
        &self.store
    }

    pub fn user(&self, json: &str) -> Result<User> {
        self.decode(json, |u: &User| StoreKey::User(u.id))
    }

    /// Decodes a JSON array of users.
    pub fn users(&self, json: &str) -> Result<Vec<User>> {
        self.decode_list(json, |u: &User| StoreKey::User(u.id))
    }

    pub fn tweet(&self, json: &str) -> Result<Tweet> {
        self.decode(json, |t: &Tweet| StoreKey::Tweet(t.id))
    }

    /// Decodes a JSON array of Tweets.
    pub fn tweets(&self, json: &str) -> Result<Vec<Tweet>> {
        self.decode_list(json, |t: &Tweet| StoreKey::Tweet(t.id))
    }

    fn decode<T, F>(&self, json: &str, key: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> StoreKey,
    {
        if !self.config.json_store_enabled {
            return crate::from_str(json);
        }

        let value: JsonValue = crate::from_str(json)?;
        let object = crate::from_value(value.clone())?;
        self.store.register(key(&object), &value);
        Ok(object)
    }

    fn decode_list<T, F>(&self, json: &str, key: F) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> StoreKey,
    {
        if !self.config.json_store_enabled {
            return crate::from_str(json);
        }

        let values: Vec<JsonValue> = crate::from_str(json)?;
        let objects = values
            .iter()
            .map(|v| crate::from_value::<T>(v.clone()))
            .collect::<Result<Vec<T>>>()?;
        for (object, value) in objects.iter().zip(&values) {
            self.store.register(key(object), value);
        }
        Ok(objects)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new(Config::default())
    }
}

impl Debug for Decoder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("config", &self.config)
            .finish()
    }
}
