//! Tweets

use serde::{Deserialize, Serialize};

use crate::entities::Entities;
use crate::media::ExtendedMediaEntity;
use crate::text;
use crate::types::DateTime;
use crate::user::{User, UserId};
use crate::util;

/// Represents a Tweet.
///
/// `text` is unescaped, and the spans of all the entities (including `extended_media`) locate
/// their substrings in the unescaped `text`. Equality, hashing and ordering only consider `id`.
///
/// # Reference
///
/// [Tweets — Twitter Developers](https://dev.twitter.com/overview/api/tweets)
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(from = "RawTweet", into = "RawTweet")]
pub struct Tweet {
    /// The integer representation of the unique identifier for this Tweet.
    pub id: StatusId,

    /// UTC time when this Tweet was created.
    pub created_at: Option<DateTime>,

    /// The actual UTF-8 text of the status update.
    pub text: String,

    /// Utility used to post the Tweet, as an HTML-formatted string.
    /// Tweets from the Twitter website have a source value of `web`.
    pub source: String,

    /// Indicates whether the value of the `text` parameter was truncated, for example, as a result of a retweet
    /// exceeding the 140 character Tweet length.
    pub truncated: bool,

    /// If the represented Tweet is a reply, this field will contain the integer representation of
    /// the original Tweet's ID.
    pub in_reply_to_status_id: Option<StatusId>,

    /// If the represented Tweet is a reply, this field will contain the integer representation of the original Tweet's
    /// author ID.
    pub in_reply_to_user_id: Option<UserId>,

    /// If the represented Tweet is a reply, this field will contain the screen name of the original Tweet's author.
    pub in_reply_to_screen_name: Option<String>,

    /// Indicates approximately how many times this Tweet has been liked by Twitter users.
    pub favorite_count: u64,

    /// Number of times this Tweet has been retweeted.
    pub retweet_count: u64,

    /// *Perspectival* Indicates whether this Tweet has been liked by the authenticating user.
    pub favorited: bool,

    /// *Perspectival* Indicates whether this Tweet has been retweeted by the authenticating user.
    pub retweeted: bool,

    /// Indicates that the URL contained in the Tweet may contain content or media identified as sensitive content.
    pub possibly_sensitive: bool,

    /// Machine-detected language of the Tweet text, or `und` if no language could be detected.
    pub lang: Option<String>,

    /// The user who posted this Tweet. Perspectival attributes embedded within this object are unreliable.
    pub user: Option<User>,

    /// Representation of the original Tweet that was retweeted.
    pub retweeted_status: Option<Box<Tweet>>,

    /// This field only surfaces when the Tweet is a quote Tweet.
    pub quoted_status_id: Option<StatusId>,

    /// The original Tweet that was quoted.
    pub quoted_status: Option<Box<Tweet>>,

    /// Entities which have been parsed out of the text of the Tweet.
    pub entities: Entities,

    /// Media of `extended_entities`, carrying all the attached photos and video information.
    pub extended_media: Vec<ExtendedMediaEntity>,

    /// When present, indicates a list of uppercase two-letter country codes this content is withheld from.
    pub withheld_in_countries: Option<Vec<String>>,
}

/// ID of a Tweet.
pub type StatusId = u64;

#[derive(Deserialize, Serialize)]
struct RawTweet {
    id: StatusId,
    #[serde(default, with = "util::opt_datetime")]
    created_at: Option<DateTime>,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    text: String,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    source: String,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    truncated: bool,
    #[serde(default)]
    in_reply_to_status_id: Option<StatusId>,
    #[serde(default)]
    in_reply_to_user_id: Option<UserId>,
    #[serde(default)]
    in_reply_to_screen_name: Option<String>,
    #[serde(default, deserialize_with = "util::deserialize_lenient_int")]
    favorite_count: u64,
    #[serde(default, deserialize_with = "util::deserialize_lenient_int")]
    retweet_count: u64,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    favorited: bool,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    retweeted: bool,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    possibly_sensitive: bool,
    #[serde(default)]
    lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    retweeted_status: Option<Box<Tweet>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quoted_status_id: Option<StatusId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quoted_status: Option<Box<Tweet>>,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    entities: Entities,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extended_entities: Option<RawExtendedEntities>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    withheld_in_countries: Option<Vec<String>>,
}

#[derive(Default, Deserialize, Serialize)]
struct RawExtendedEntities {
    #[serde(default, deserialize_with = "util::deserialize_default")]
    media: Vec<ExtendedMediaEntity>,
}

identity_key!(Tweet, StatusId, |this| this.id);

impl Tweet {
    /// Whether this Tweet is a retweet of another one.
    pub fn is_retweet(&self) -> bool {
        self.retweeted_status.is_some()
    }
}

impl From<RawTweet> for Tweet {
    fn from(raw: RawTweet) -> Self {
        let mut entities = raw.entities;
        let mut extended_media = raw.extended_entities.unwrap_or_default().media;

        let text = text::unescape_and_slide(
            &raw.text,
            entities
                .spans_mut()
                .chain(extended_media.iter_mut().map(|e| &mut e.media.span)),
        );

        Tweet {
            id: raw.id,
            created_at: raw.created_at,
            text,
            source: raw.source,
            truncated: raw.truncated,
            in_reply_to_status_id: raw.in_reply_to_status_id,
            in_reply_to_user_id: raw.in_reply_to_user_id,
            in_reply_to_screen_name: raw.in_reply_to_screen_name,
            favorite_count: raw.favorite_count,
            retweet_count: raw.retweet_count,
            favorited: raw.favorited,
            retweeted: raw.retweeted,
            possibly_sensitive: raw.possibly_sensitive,
            lang: raw.lang,
            user: raw.user,
            retweeted_status: raw.retweeted_status,
            quoted_status_id: raw.quoted_status_id,
            quoted_status: raw.quoted_status,
            entities,
            extended_media,
            withheld_in_countries: raw.withheld_in_countries,
        }
    }
}

impl From<Tweet> for RawTweet {
    fn from(tweet: Tweet) -> Self {
        let mut entities = tweet.entities;
        let mut extended_media = tweet.extended_media;

        let text = text::escape_and_slide(
            &tweet.text,
            entities
                .spans_mut()
                .chain(extended_media.iter_mut().map(|e| &mut e.media.span)),
        );

        let extended_entities = if extended_media.is_empty() {
            None
        } else {
            Some(RawExtendedEntities {
                media: extended_media,
            })
        };

        RawTweet {
            id: tweet.id,
            created_at: tweet.created_at,
            text,
            source: tweet.source,
            truncated: tweet.truncated,
            in_reply_to_status_id: tweet.in_reply_to_status_id,
            in_reply_to_user_id: tweet.in_reply_to_user_id,
            in_reply_to_screen_name: tweet.in_reply_to_screen_name,
            favorite_count: tweet.favorite_count,
            retweet_count: tweet.retweet_count,
            favorited: tweet.favorited,
            retweeted: tweet.retweeted,
            possibly_sensitive: tweet.possibly_sensitive,
            lang: tweet.lang,
            user: tweet.user,
            retweeted_status: tweet.retweeted_status,
            quoted_status_id: tweet.quoted_status_id,
            quoted_status: tweet.quoted_status,
            entities,
            extended_entities,
            withheld_in_countries: tweet.withheld_in_countries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TextSpan;

    #[test]
    fn minimal() {
        let tweet: Tweet = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(tweet.id, 1);
        assert_eq!(tweet.text, "");
        assert!(tweet.user.is_none());
        assert!(tweet.extended_media.is_empty());
        assert!(!tweet.is_retweet());

        serde_json::from_str::<Tweet>(r#"{"text":"hi"}"#).unwrap_err();
    }

    #[test]
    fn slides_every_entity_list() {
        let tweet: Tweet = serde_json::from_str(
            r##"{
                "id": 2,
                "text": "&lt;3 &amp; @rustlang $RUST #rust https://t.co/m",
                "entities": {
                    "hashtags": [{"indices":[28,33],"text":"rust"}],
                    "symbols": [{"indices":[22,27],"text":"RUST"}],
                    "urls": [],
                    "user_mentions": [{"indices":[12,21],"screen_name":"rustlang","name":"Rust","id":1}],
                    "media": [{
                        "id": 9, "indices": [34,48],
                        "url": "https://t.co/m", "media_url": "http://m", "media_url_https": "https://m",
                        "expanded_url": "https://x", "display_url": "x", "type": "photo", "sizes": {}
                    }]
                },
                "extended_entities": {"media": [{
                    "id": 9, "indices": [34,48],
                    "url": "https://t.co/m", "media_url": "http://m", "media_url_https": "https://m",
                    "expanded_url": "https://x", "display_url": "x", "type": "photo", "sizes": {}
                }]}
            }"##,
        )
        .unwrap();

        assert_eq!(tweet.text, "<3 & @rustlang $RUST #rust https://t.co/m");
        let slice = |span: TextSpan| span.slice(&tweet.text);
        assert_eq!(slice(tweet.entities.user_mentions[0].span), Some("@rustlang"));
        assert_eq!(slice(tweet.entities.symbols[0].span), Some("$RUST"));
        assert_eq!(slice(tweet.entities.hashtags[0].span), Some("#rust"));
        assert_eq!(slice(tweet.entities.media[0].span), Some("https://t.co/m"));
        assert_eq!(slice(tweet.extended_media[0].media.span), Some("https://t.co/m"));
    }

    #[test]
    fn nested() {
        let tweet: Tweet = serde_json::from_str(
            r#"{
                "id": 3,
                "text": "RT @a: hi",
                "user": {"id": 10, "name": "B", "screen_name": "b"},
                "retweeted_status": {"id": 4, "text": "hi", "user": {"id": 11, "name": "A", "screen_name": "a"}},
                "quoted_status_id": null,
                "in_reply_to_status_id": null
            }"#,
        )
        .unwrap();
        assert!(tweet.is_retweet());
        assert_eq!(tweet.user.as_ref().unwrap().id, 10);
        assert_eq!(tweet.retweeted_status.as_ref().unwrap().id, 4);
        assert_eq!(tweet.quoted_status_id, None);

        serde_json::from_str::<Tweet>(r#"{"id":3,"user":{"id":10}}"#).unwrap_err();
    }

    #[test]
    fn identity() {
        let a: Tweet = serde_json::from_str(r#"{"id":5,"text":"a"}"#).unwrap();
        let b: Tweet = serde_json::from_str(r#"{"id":5,"text":"b","retweet_count":"3"}"#).unwrap();
        assert_eq!(b.retweet_count, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn serialize_span_past_end() {
        let json = format!(
            r##"{{"id":8,"text":"a &amp; b","entities":{{"hashtags":[{{"indices":[0,{}],"text":"a"}}]}}}}"##,
            usize::MAX
        );
        let tweet: Tweet = serde_json::from_str(&json).unwrap();
        assert_eq!(tweet.text, "a & b");

        let value = serde_json::to_value(&tweet).unwrap();
        assert_eq!(value["text"], "a &amp; b");
        assert_eq!(
            value["entities"]["hashtags"][0]["indices"],
            serde_json::json!([0, usize::MAX])
        );
    }

    #[test]
    fn round_trip() {
        let json = r##"{
            "id": 6,
            "created_at": "Mon May 01 00:01:02 +0000 2017",
            "text": "a &amp; b #c",
            "entities": {"hashtags": [{"indices":[10,12],"text":"c"}]}
        }"##;
        let tweet: Tweet = serde_json::from_str(json).unwrap();
        assert_eq!(tweet.entities.hashtags[0].span, TextSpan::new(6, 8));

        let value = serde_json::to_value(&tweet).unwrap();
        assert_eq!(value["text"], "a &amp; b #c");
        assert_eq!(value["entities"]["hashtags"][0]["indices"], serde_json::json!([10, 12]));
        assert_eq!(value["created_at"], "Mon May 01 00:01:02 +0000 2017");
        assert!(value.get("extended_entities").is_none());

        let again: Tweet = serde_json::from_value(value).unwrap();
        assert_eq!(again.text, tweet.text);
        assert_eq!(again.entities, tweet.entities);
        assert_eq!(again.created_at, tweet.created_at);
    }
}
