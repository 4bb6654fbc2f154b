#![doc(html_root_url = "https://docs.rs/twitter-object/0.1.0")]

/*!
# Twitter Object

Typed data bindings for the JSON objects returned by Twitter REST API.

## Usage

Add `twitter-object` to your dependencies in your project's `Cargo.toml`:

```toml
[dependencies]
twitter-object = "0.1.0"
```

## Overview

Texts returned by the API (a Tweet's `text` and a user's `description`) are HTML-escaped, and
the entities annotating them locate their substrings by offsets into the escaped text. This
crate unescapes the texts on decode and slides the offsets of the entities along, so that they
can be used to slice the unescaped text directly:

```rust
let json = r##"{
    "id": 1,
    "text": "Rust &amp; Twitter #rustlang",
    "entities": {"hashtags": [{"indices": [19, 28], "text": "rustlang"}]}
}"##;

let tweet: twitter_object::Tweet = twitter_object::from_str(json).unwrap();
assert_eq!(tweet.text, "Rust & Twitter #rustlang");
assert_eq!(tweet.entities.hashtags[0].span.slice(&tweet.text), Some("#rustlang"));
```

Serializing a value produces the escaped wire form again.
*/

#[macro_use]
mod util;

pub mod config;
pub mod decoder;
pub mod entities;
pub mod error;
pub mod identity;
pub mod media;
pub mod store;
pub mod text;
pub mod tweet;
pub mod types;
pub mod user;

pub use crate::config::Config;
pub use crate::decoder::Decoder;
pub use crate::entities::{
    Entities, HashtagEntity, SymbolEntity, TextSpan, UrlEntity, UserMentionEntity,
};
pub use crate::error::{DecodeError, Result};
pub use crate::identity::IdentityKey;
pub use crate::media::{ExtendedMediaEntity, MediaEntity, MediaId, Resize, Size, SizeKind, Variant};
pub use crate::store::{JsonStore, MemoryJsonStore, StoreKey};
pub use crate::tweet::{StatusId, Tweet};
pub use crate::user::{User, UserId};

use serde::de::DeserializeOwned;

use crate::types::JsonValue;

/// Decodes an object from a JSON text.
pub fn from_str<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(DecodeError::new::<T>)
}

/// Decodes an object from an already parsed JSON value.
pub fn from_value<T: DeserializeOwned>(value: JsonValue) -> Result<T> {
    serde_json::from_value(value).map_err(DecodeError::new::<T>)
}
