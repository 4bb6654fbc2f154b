//! Users

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::entities::UrlEntity;
use crate::text;
use crate::tweet::Tweet;
use crate::types::DateTime;
use crate::util;

/// Represents a user on Twitter.
///
/// Equality, hashing and ordering of users only consider their `id`.
///
/// # Reference
///
/// 1. [Users — Twitter Developers](https://dev.twitter.com/overview/api/users)
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(from = "RawUser", into = "RawUser")]
pub struct User {
    /// The integer representation of the unique identifier for this User.
    pub id: UserId,

    /// The name of the user, as they've defined it. Not necessarily a person's name.
    pub name: String,

    /// The screen name, handle, or alias that this user identifies themselves with.
    ///
    /// `screen_name`s are unique but subject to change. Use `id` as a user identifier whenever possible.
    pub screen_name: String,

    /// The user-defined location for this account's profile. Not necessarily a location nor parseable.
    pub location: Option<String>,

    /// The user-defined string describing their account, with HTML entities unescaped.
    pub description: Option<String>,

    /// URLs found in `description`. Their spans locate them in the unescaped `description`.
    pub description_url_entities: Vec<UrlEntity>,

    /// The entity of the URL provided by the user in association with their profile.
    ///
    /// If the API did not provide one, this spans the whole of `url`
    /// (or is empty if `url` is absent).
    pub url_entity: UrlEntity,

    /// Indicates that the user has an account with "contributor mode" enabled.
    pub contributors_enabled: bool,

    /// A HTTP-based URL pointing to the user's avatar image.
    pub profile_image_url: Option<String>,

    /// A HTTPS-based URL pointing to the user's avatar image.
    pub profile_image_url_https: Option<String>,

    /// When `true`, indicates that the user has not uploaded their own avatar.
    pub default_profile_image: bool,

    /// A URL provided by the user in association with their profile.
    pub url: Option<String>,

    /// When `true`, indicates that this user has chosen to protect their Tweets.
    pub protected: bool,

    /// The number of followers this account currently has.
    pub followers_count: u64,

    /// The user's most recent Tweet, if the API embedded it.
    pub status: Option<Box<Tweet>>,

    pub profile_background_color: Option<String>,
    pub profile_text_color: Option<String>,
    pub profile_link_color: Option<String>,
    pub profile_sidebar_fill_color: Option<String>,
    pub profile_sidebar_border_color: Option<String>,
    pub profile_use_background_image: bool,

    /// When `true`, indicates that the user has not altered the theme or background of their profile.
    pub default_profile: bool,

    pub show_all_inline_media: bool,

    /// The number of users this account is following.
    pub friends_count: u64,

    /// The UTC datetime that the user account was created on Twitter.
    pub created_at: Option<DateTime>,

    /// The number of Tweets this user has liked in the account's lifetime.
    pub favourites_count: u64,

    /// The offset from GMT/UTC in seconds.
    pub utc_offset: i32,

    pub time_zone: Option<String>,
    pub profile_background_image_url: Option<String>,
    pub profile_background_image_url_https: Option<String>,

    /// Base URL of the user's profile banner. See the `profile_banner_*_url` methods for the
    /// URLs of the actual images.
    pub profile_banner_url: Option<String>,

    pub profile_background_tile: bool,

    /// The BCP 47 code for the user's self-declared user interface language.
    pub lang: Option<String>,

    /// The number of Tweets (including retweets) issued by the user.
    pub statuses_count: u64,

    pub geo_enabled: bool,
    pub verified: bool,

    /// When `true`, indicates that the user is a participant in Twitter's translator community.
    pub is_translator: bool,

    /// The number of public lists that this user is a member of.
    pub listed_count: u64,

    /// *Perspectival*. When `true`, indicates that the authenticating user has issued a follow
    /// request to this protected user account.
    pub follow_request_sent: bool,

    /// Two-letter country codes this user is withheld from.
    pub withheld_in_countries: Option<Vec<String>>,
}

/// Numerical ID of a user.
pub type UserId = u64;

#[derive(Deserialize, Serialize)]
struct RawUser {
    id: UserId,
    name: String,
    screen_name: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    entities: RawUserEntities,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    contributors_enabled: bool,
    #[serde(default)]
    profile_image_url: Option<String>,
    #[serde(default)]
    profile_image_url_https: Option<String>,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    default_profile_image: bool,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    protected: bool,
    #[serde(default, deserialize_with = "util::deserialize_lenient_int")]
    followers_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<Box<Tweet>>,
    #[serde(default)]
    profile_background_color: Option<String>,
    #[serde(default)]
    profile_text_color: Option<String>,
    #[serde(default)]
    profile_link_color: Option<String>,
    #[serde(default)]
    profile_sidebar_fill_color: Option<String>,
    #[serde(default)]
    profile_sidebar_border_color: Option<String>,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    profile_use_background_image: bool,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    default_profile: bool,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    show_all_inline_media: bool,
    #[serde(default, deserialize_with = "util::deserialize_lenient_int")]
    friends_count: u64,
    #[serde(default, with = "util::opt_datetime")]
    created_at: Option<DateTime>,
    #[serde(default, deserialize_with = "util::deserialize_lenient_int")]
    favourites_count: u64,
    #[serde(default, deserialize_with = "util::deserialize_lenient_int")]
    utc_offset: i32,
    #[serde(default)]
    time_zone: Option<String>,
    #[serde(default)]
    profile_background_image_url: Option<String>,
    #[serde(default)]
    profile_background_image_url_https: Option<String>,
    #[serde(default)]
    profile_banner_url: Option<String>,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    profile_background_tile: bool,
    #[serde(default)]
    lang: Option<String>,
    #[serde(default, deserialize_with = "util::deserialize_lenient_int")]
    statuses_count: u64,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    geo_enabled: bool,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    verified: bool,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    is_translator: bool,
    #[serde(default, deserialize_with = "util::deserialize_lenient_int")]
    listed_count: u64,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    follow_request_sent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    withheld_in_countries: Option<Vec<String>>,
}

/// `entities` field of a user: `{"url": {"urls": [...]}, "description": {"urls": [...]}}`.
#[derive(Default, Deserialize, Serialize)]
struct RawUserEntities {
    #[serde(default, deserialize_with = "util::deserialize_default")]
    url: RawUrls,
    #[serde(default, deserialize_with = "util::deserialize_default")]
    description: RawUrls,
}

#[derive(Default, Deserialize, Serialize)]
struct RawUrls {
    #[serde(default, deserialize_with = "util::deserialize_default")]
    urls: Vec<UrlEntity>,
}

identity_key!(User, UserId, |this| this.id);

impl User {
    /// URL of the 73x73 version of the user's avatar.
    pub fn bigger_profile_image_url(&self) -> Option<String> {
        self.profile_image_url.as_ref().map(|u| resized_image_url(u, "_bigger"))
    }

    /// URL of the 24x24 version of the user's avatar.
    pub fn mini_profile_image_url(&self) -> Option<String> {
        self.profile_image_url.as_ref().map(|u| resized_image_url(u, "_mini"))
    }

    /// URL of the avatar in the size it was uploaded.
    pub fn original_profile_image_url(&self) -> Option<String> {
        self.profile_image_url.as_ref().map(|u| resized_image_url(u, ""))
    }

    pub fn bigger_profile_image_url_https(&self) -> Option<String> {
        self.profile_image_url_https.as_ref().map(|u| resized_image_url(u, "_bigger"))
    }

    pub fn mini_profile_image_url_https(&self) -> Option<String> {
        self.profile_image_url_https.as_ref().map(|u| resized_image_url(u, "_mini"))
    }

    pub fn original_profile_image_url_https(&self) -> Option<String> {
        self.profile_image_url_https.as_ref().map(|u| resized_image_url(u, ""))
    }

    pub fn profile_banner_web_url(&self) -> Option<String> {
        self.banner_variant("web")
    }

    pub fn profile_banner_retina_url(&self) -> Option<String> {
        self.banner_variant("web_retina")
    }

    pub fn profile_banner_ipad_url(&self) -> Option<String> {
        self.banner_variant("ipad")
    }

    pub fn profile_banner_ipad_retina_url(&self) -> Option<String> {
        self.banner_variant("ipad_retina")
    }

    pub fn profile_banner_mobile_url(&self) -> Option<String> {
        self.banner_variant("mobile")
    }

    pub fn profile_banner_mobile_retina_url(&self) -> Option<String> {
        self.banner_variant("mobile_retina")
    }

    fn banner_variant(&self, variant: &str) -> Option<String> {
        self.profile_banner_url
            .as_ref()
            .map(|base| format!("{}/{}", base, variant))
    }
}

/// Replaces the size suffix (e.g. `_normal`) of an avatar image URL with `suffix`,
/// keeping the file extension.
fn resized_image_url(url: &str, suffix: &str) -> String {
    let file_name = url.rfind('/').map_or(0, |i| i + 1);
    let underscore = match url[file_name..].rfind('_') {
        Some(i) => file_name + i,
        None => return url.to_owned(),
    };
    let mut resized = format!("{}{}", &url[..underscore], suffix);
    if let Some(dot) = url[underscore..].rfind('.') {
        resized.push_str(&url[underscore + dot..]);
    }
    resized
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        let RawUserEntities { url, description } = raw.entities;
        let mut description_url_entities = description.urls;
        let url_entity = url.urls.into_iter().next();

        let description = raw.description.map(|d| {
            text::unescape_and_slide(
                &d,
                description_url_entities.iter_mut().map(|e| &mut e.span),
            )
        });

        let url_entity = match url_entity {
            Some(entity) => entity,
            None => {
                trace!(user_id = raw.id, "synthesizing URL entity from `url`");
                UrlEntity::spanning(raw.url.as_deref().unwrap_or(""))
            }
        };

        User {
            id: raw.id,
            name: raw.name,
            screen_name: raw.screen_name,
            location: raw.location,
            description,
            description_url_entities,
            url_entity,
            contributors_enabled: raw.contributors_enabled,
            profile_image_url: raw.profile_image_url,
            profile_image_url_https: raw.profile_image_url_https,
            default_profile_image: raw.default_profile_image,
            url: raw.url,
            protected: raw.protected,
            followers_count: raw.followers_count,
            status: raw.status,
            profile_background_color: raw.profile_background_color,
            profile_text_color: raw.profile_text_color,
            profile_link_color: raw.profile_link_color,
            profile_sidebar_fill_color: raw.profile_sidebar_fill_color,
            profile_sidebar_border_color: raw.profile_sidebar_border_color,
            profile_use_background_image: raw.profile_use_background_image,
            default_profile: raw.default_profile,
            show_all_inline_media: raw.show_all_inline_media,
            friends_count: raw.friends_count,
            created_at: raw.created_at,
            favourites_count: raw.favourites_count,
            utc_offset: raw.utc_offset,
            time_zone: raw.time_zone,
            profile_background_image_url: raw.profile_background_image_url,
            profile_background_image_url_https: raw.profile_background_image_url_https,
            profile_banner_url: raw.profile_banner_url,
            profile_background_tile: raw.profile_background_tile,
            lang: raw.lang,
            statuses_count: raw.statuses_count,
            geo_enabled: raw.geo_enabled,
            verified: raw.verified,
            is_translator: raw.is_translator,
            listed_count: raw.listed_count,
            follow_request_sent: raw.follow_request_sent,
            withheld_in_countries: raw.withheld_in_countries,
        }
    }
}

impl From<User> for RawUser {
    fn from(user: User) -> Self {
        let mut description_urls = user.description_url_entities;
        let description = user.description.map(|d| {
            text::escape_and_slide(&d, description_urls.iter_mut().map(|e| &mut e.span))
        });

        RawUser {
            id: user.id,
            name: user.name,
            screen_name: user.screen_name,
            location: user.location,
            description,
            entities: RawUserEntities {
                url: RawUrls {
                    urls: vec![user.url_entity],
                },
                description: RawUrls {
                    urls: description_urls,
                },
            },
            contributors_enabled: user.contributors_enabled,
            profile_image_url: user.profile_image_url,
            profile_image_url_https: user.profile_image_url_https,
            default_profile_image: user.default_profile_image,
            url: user.url,
            protected: user.protected,
            followers_count: user.followers_count,
            status: user.status,
            profile_background_color: user.profile_background_color,
            profile_text_color: user.profile_text_color,
            profile_link_color: user.profile_link_color,
            profile_sidebar_fill_color: user.profile_sidebar_fill_color,
            profile_sidebar_border_color: user.profile_sidebar_border_color,
            profile_use_background_image: user.profile_use_background_image,
            default_profile: user.default_profile,
            show_all_inline_media: user.show_all_inline_media,
            friends_count: user.friends_count,
            created_at: user.created_at,
            favourites_count: user.favourites_count,
            utc_offset: user.utc_offset,
            time_zone: user.time_zone,
            profile_background_image_url: user.profile_background_image_url,
            profile_background_image_url_https: user.profile_background_image_url_https,
            profile_banner_url: user.profile_banner_url,
            profile_background_tile: user.profile_background_tile,
            lang: user.lang,
            statuses_count: user.statuses_count,
            geo_enabled: user.geo_enabled,
            verified: user.verified,
            is_translator: user.is_translator,
            listed_count: user.listed_count,
            follow_request_sent: user.follow_request_sent,
            withheld_in_countries: user.withheld_in_countries,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};

    use super::*;
    use crate::entities::TextSpan;

    fn user(json: &str) -> User {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn minimal() {
        let u = user(r#"{"id":42,"name":"A","screen_name":"a"}"#);
        assert_eq!(u.id, 42);
        assert_eq!(u.name, "A");
        assert_eq!(u.screen_name, "a");
        assert_eq!(u.description, None);
        assert!(u.description_url_entities.is_empty());
        assert_eq!(u.url_entity, UrlEntity::spanning(""));
        assert_eq!(u.url_entity.span, TextSpan::new(0, 0));
        assert_eq!(u.followers_count, 0);
        assert!(!u.verified);
        assert!(u.status.is_none());
        assert!(u.withheld_in_countries.is_none());
        assert_eq!(u.created_at, None);
    }

    #[test]
    fn required_fields() {
        serde_json::from_str::<User>(r#"{"name":"A","screen_name":"a"}"#).unwrap_err();
        serde_json::from_str::<User>(r#"{"id":42,"screen_name":"a"}"#).unwrap_err();
        serde_json::from_str::<User>(r#"{"id":42,"name":"A"}"#).unwrap_err();
        serde_json::from_str::<User>(r#"{"id":"x","name":"A","screen_name":"a"}"#).unwrap_err();
    }

    #[test]
    fn nulls_are_defaults() {
        let u = user(
            r#"{"id":1,"name":"A","screen_name":"a","location":null,"followers_count":null,
                "verified":null,"entities":null,"utc_offset":"-18000","status":null,
                "withheld_in_countries":["DE","FR"]}"#,
        );
        assert_eq!(u.location, None);
        assert_eq!(u.followers_count, 0);
        assert!(!u.verified);
        assert_eq!(u.utc_offset, -18000);
        assert_eq!(u.withheld_in_countries, Some(vec!["DE".to_owned(), "FR".to_owned()]));
    }

    #[test]
    fn url_entity_synthesized_from_url() {
        let u = user(r#"{"id":1,"name":"A","screen_name":"a","url":"http://example.com"}"#);
        assert_eq!(u.url_entity.span, TextSpan::new(0, 18));
        assert_eq!(u.url_entity.url, "http://example.com");
        assert_eq!(u.url_entity.expanded_url, "http://example.com");
        assert_eq!(u.url_entity.display_url, "http://example.com");
    }

    #[test]
    fn url_entity_from_entities() {
        let u = user(
            r#"{"id":1,"name":"A","screen_name":"a","url":"http://t.co/abc",
                "entities":{"url":{"urls":[
                    {"url":"http://t.co/abc","expanded_url":"http://example.com","display_url":"example.com","indices":[0,15]},
                    {"url":"http://t.co/def","indices":[0,15]}
                ]}}}"#,
        );
        assert_eq!(u.url_entity.expanded_url, "http://example.com");
        assert_eq!(u.url_entity.display_url, "example.com");
    }

    #[test]
    fn description_is_unescaped() {
        let u = user(
            r#"{"id":1,"name":"A","screen_name":"a",
                "description":"Check &amp; out http://t.co/x and &lt;3",
                "entities":{"description":{"urls":[
                    {"url":"http://t.co/x","expanded_url":"http://example.com","display_url":"example.com","indices":[16,29]}
                ]}}}"#,
        );
        let description = u.description.as_deref().unwrap();
        assert_eq!(description, "Check & out http://t.co/x and <3");
        assert_eq!(u.description_url_entities[0].span, TextSpan::new(12, 25));
        assert_eq!(
            u.description_url_entities[0].span.slice(description),
            Some("http://t.co/x")
        );
    }

    #[test]
    fn invalid_nested_entity_fails() {
        serde_json::from_str::<User>(
            r#"{"id":1,"name":"A","screen_name":"a","entities":{"description":{"urls":[{"indices":[0,1]}]}}}"#,
        )
        .unwrap_err();
        serde_json::from_str::<User>(
            r#"{"id":1,"name":"A","screen_name":"a","status":{"text":"no id"}}"#,
        )
        .unwrap_err();
    }

    #[test]
    fn identity() {
        let a = user(r#"{"id":7,"name":"A","screen_name":"a","followers_count":1}"#);
        let b = user(
            r#"{"id":7,"name":"B","screen_name":"b","followers_count":2,"verified":true,"url":"http://b"}"#,
        );
        let c = user(r#"{"id":8,"name":"A","screen_name":"a"}"#);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);

        let set: HashSet<User> = vec![a.clone(), b, c.clone()].into_iter().collect();
        assert_eq!(set.len(), 2);

        let ordered: BTreeSet<User> = vec![c, a].into_iter().collect();
        assert_eq!(ordered.iter().map(|u| u.id).collect::<Vec<_>>(), [7, 8]);
    }

    #[test]
    fn created_at() {
        let u = user(r#"{"id":1,"name":"A","screen_name":"a","created_at":"Wed Aug 27 13:08:45 +0000 2008"}"#);
        assert_eq!(u.created_at.unwrap().to_rfc3339(), "2008-08-27T13:08:45+00:00");
        serde_json::from_str::<User>(r#"{"id":1,"name":"A","screen_name":"a","created_at":"yesterday"}"#)
            .unwrap_err();
    }

    #[test]
    fn resized_images() {
        let u = user(
            r#"{"id":1,"name":"A","screen_name":"a",
                "profile_image_url":"http://pbs.twimg.com/profile_images/1/abc_normal.jpg",
                "profile_image_url_https":"https://pbs.twimg.com/profile_images/1/abc_normal"}"#,
        );
        assert_eq!(
            u.bigger_profile_image_url().as_deref(),
            Some("http://pbs.twimg.com/profile_images/1/abc_bigger.jpg")
        );
        assert_eq!(
            u.mini_profile_image_url().as_deref(),
            Some("http://pbs.twimg.com/profile_images/1/abc_mini.jpg")
        );
        assert_eq!(
            u.original_profile_image_url().as_deref(),
            Some("http://pbs.twimg.com/profile_images/1/abc.jpg")
        );
        assert_eq!(
            u.original_profile_image_url_https().as_deref(),
            Some("https://pbs.twimg.com/profile_images/1/abc")
        );
        assert_eq!(
            resized_image_url("http://example.com/my_images/avatar.png", "_mini"),
            "http://example.com/my_images/avatar.png"
        );
    }

    #[test]
    fn banners() {
        let u = user(r#"{"id":1,"name":"A","screen_name":"a"}"#);
        assert_eq!(u.profile_banner_web_url(), None);

        let u = user(
            r#"{"id":1,"name":"A","screen_name":"a","profile_banner_url":"https://pbs.twimg.com/profile_banners/1/2"}"#,
        );
        assert_eq!(
            u.profile_banner_mobile_retina_url().as_deref(),
            Some("https://pbs.twimg.com/profile_banners/1/2/mobile_retina")
        );
        assert_eq!(
            u.profile_banner_ipad_url().as_deref(),
            Some("https://pbs.twimg.com/profile_banners/1/2/ipad")
        );
    }
}
