//! Entities
//!
//! Entities annotate substrings of a text (a Tweet's `text` or a User's `description`). Each of
//! them carries a [`TextSpan`] locating the substring, followed by type-specific data.
//!
//! # Reference
//!
//! 1. [Entities — Twitter Developers](https://dev.twitter.com/overview/api/entities)
//! 1. [Entities in Objects — Twitter Developers](https://dev.twitter.com/overview/api/entities-in-twitter-objects)

use std::iter;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::media::MediaEntity;
use crate::user::UserId;
use crate::util;

/// A pair of character offsets locating an entity within its text.
///
/// Offsets count Unicode scalar values, not bytes. The first offset is the location of the first
/// character of the entity and the second one is the location of the first character after it.
/// On the wire, a span is the two-element `indices` array.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

/// Represents a URL in the `urls` field of `Entities` or within textual fields of a `User`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Hash, Serialize)]
#[serde(from = "RawUrlEntity")]
pub struct UrlEntity {
    /// Location of the wrapped URL in the text.
    #[serde(rename = "indices")]
    pub span: TextSpan,

    /// Wrapped URL, corresponding to the value embedded directly into the raw text.
    pub url: String,

    /// Expanded version of `display_url`. Same as `url` if the API omitted it.
    pub expanded_url: String,

    /// Version of the URL to display to clients. Same as `url` if the API omitted it.
    pub display_url: String,
}

/// Represents a hashtag in the `hashtags` field of `Entities`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Hash, Serialize)]
pub struct HashtagEntity {
    /// The first offset is the location of the `#` character.
    #[serde(rename = "indices")]
    pub span: TextSpan,

    /// Name of the hashtag, minus the leading `#` character.
    #[serde(default, deserialize_with = "util::deserialize_default")]
    pub text: String,
}

/// Represents a financial symbol (e.g. `$TWTR`) in the `symbols` field of `Entities`.
pub type SymbolEntity = HashtagEntity;

/// Represents a user in the `user_mentions` field of `Entities`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Hash, Serialize)]
pub struct UserMentionEntity {
    /// The first offset is the location of the `@` character.
    #[serde(rename = "indices")]
    pub span: TextSpan,

    /// Display name of the referenced user.
    #[serde(default, deserialize_with = "util::deserialize_default")]
    pub name: String,

    /// Screen name of the referenced user.
    #[serde(default, deserialize_with = "util::deserialize_default")]
    pub screen_name: String,

    /// ID of the mentioned user.
    #[serde(default, deserialize_with = "util::deserialize_lenient_int")]
    pub id: UserId,
}

/// Entities which have been parsed out of the text of a Tweet.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Entities {
    /// Hashtags parsed out of the Tweet text.
    #[serde(default, deserialize_with = "util::deserialize_default")]
    pub hashtags: Vec<HashtagEntity>,

    /// Financial symbols parsed out of the Tweet text.
    #[serde(default, deserialize_with = "util::deserialize_default")]
    pub symbols: Vec<SymbolEntity>,

    /// URLs included in the Tweet text.
    #[serde(default, deserialize_with = "util::deserialize_default")]
    pub urls: Vec<UrlEntity>,

    /// Other Twitter users mentioned in the Tweet text.
    #[serde(default, deserialize_with = "util::deserialize_default")]
    pub user_mentions: Vec<UserMentionEntity>,

    /// Media elements uploaded with the Tweet.
    #[serde(default, deserialize_with = "util::deserialize_default")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaEntity>,
}

#[derive(Deserialize)]
struct RawUrlEntity {
    indices: TextSpan,
    url: String,
    expanded_url: Option<String>,
    display_url: Option<String>,
}

impl TextSpan {
    pub fn new(start: usize, end: usize) -> Self {
        TextSpan { start, end }
    }

    /// Whether the span is not inverted. Spans from the API are assumed to be well-formed.
    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }

    /// Number of characters covered by the span, or `0` if it is inverted.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves both offsets by `delta` characters, saturating at zero.
    pub fn shift(&self, delta: isize) -> Self {
        let move_by = |offset: usize| {
            if delta < 0 {
                offset.saturating_sub(delta.unsigned_abs())
            } else {
                offset.saturating_add(delta as usize)
            }
        };
        TextSpan::new(move_by(self.start), move_by(self.end))
    }

    /// Returns the substring of `text` located by the span, or `None` if the span is inverted
    /// or runs past the end of `text`.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        if !self.is_well_formed() {
            return None;
        }

        let mut bounds = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(iter::once(text.len()));
        let start = bounds.nth(self.start)?;
        let end = if self.is_empty() {
            start
        } else {
            bounds.nth(self.len() - 1)?
        };

        Some(&text[start..end])
    }
}

impl<'de> Deserialize<'de> for TextSpan {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let (start, end) = <(usize, usize)>::deserialize(d)?;
        Ok(TextSpan { start, end })
    }
}

impl Serialize for TextSpan {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        (self.start, self.end).serialize(s)
    }
}

impl From<(usize, usize)> for TextSpan {
    fn from((start, end): (usize, usize)) -> Self {
        TextSpan { start, end }
    }
}

impl Entities {
    /// Spans of every entity in every list, in no particular order.
    pub(crate) fn spans_mut(&mut self) -> impl Iterator<Item = &mut TextSpan> {
        let Entities {
            hashtags,
            symbols,
            urls,
            user_mentions,
            media,
        } = self;
        hashtags
            .iter_mut()
            .map(|e| &mut e.span)
            .chain(symbols.iter_mut().map(|e| &mut e.span))
            .chain(urls.iter_mut().map(|e| &mut e.span))
            .chain(user_mentions.iter_mut().map(|e| &mut e.span))
            .chain(media.iter_mut().map(|e| &mut e.span))
    }
}

impl UrlEntity {
    /// Creates an entity spanning the whole of `url`, with all three URLs set to it.
    pub fn spanning(url: &str) -> Self {
        UrlEntity {
            span: TextSpan::new(0, url.chars().count()),
            url: url.to_owned(),
            expanded_url: url.to_owned(),
            display_url: url.to_owned(),
        }
    }
}

impl From<RawUrlEntity> for UrlEntity {
    fn from(raw: RawUrlEntity) -> Self {
        let RawUrlEntity {
            indices,
            url,
            expanded_url,
            display_url,
        } = raw;
        // Retweets occasionally carry `null` in place of these two.
        let expanded_url = expanded_url.unwrap_or_else(|| url.clone());
        let display_url = display_url.unwrap_or_else(|| url.clone());
        UrlEntity {
            span: indices,
            url,
            expanded_url,
            display_url,
        }
    }
}
