//! Media entities

use std::collections::BTreeMap;
use std::fmt::{self, Formatter};

use serde::de::{Error as SerdeError, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::entities::TextSpan;
use crate::util;

pub type MediaId = u64;

/// Represents an element of the `media` field of `Entities`.
///
/// Equality, hashing and ordering of media entities only consider their `id`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MediaEntity {
    /// Location of the wrapped media URL in the Tweet text.
    #[serde(rename = "indices")]
    pub span: TextSpan,

    /// ID of the media expressed as a 64-bit integer.
    pub id: MediaId,

    /// Wrapped URL for the media link. This corresponds with the URL embedded directly into the raw
    /// Tweet text.
    pub url: String,

    /// An http:// URL pointing directly to the uploaded media file.
    pub media_url: String,

    /// An https:// URL pointing directly to the uploaded media file, for embedding on https pages.
    pub media_url_https: String,

    /// An expanded version of `display_url`. Links to the media display page.
    pub expanded_url: String,

    /// URL of the media to display to clients.
    pub display_url: String,

    /// Available sizes for the media file. Sizes the API did not report are absent.
    #[serde(deserialize_with = "deserialize_sizes")]
    pub sizes: BTreeMap<SizeKind, Size>,

    /// Type of uploaded media, e.g. `photo`, `video` or `animated_gif`.
    #[serde(rename = "type")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Keys of the `sizes` object of a media entity.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeKind {
    Large,
    Medium,
    Small,
    Thumb,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Hash, Serialize)]
pub struct Size {
    /// Width in pixels of this size.
    #[serde(rename = "w")]
    pub width: u32,

    /// Height in pixels of this size.
    #[serde(rename = "h")]
    pub height: u32,

    /// Resizing method used to obtain this size.
    pub resize: Resize,
}

/// Represents the `resize` field of `Size`.
///
/// Only the exact string `"fit"` maps to `Fit`. Every other value is read as `Crop`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Resize {
    /// The media was resized to fit one dimension, keeping its native aspect ratio.
    Fit,
    /// The media was cropped in order to fit a specific resolution.
    Crop,
}

/// A media entity from the `extended_entities` field of a Tweet, which may carry video
/// information in addition to the fields of a `MediaEntity`.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(from = "RawExtendedMediaEntity", into = "RawExtendedMediaEntity")]
pub struct ExtendedMediaEntity {
    pub media: MediaEntity,
    pub video_aspect_ratio_width: u32,
    pub video_aspect_ratio_height: u32,
    /// Zero for media without a duration (e.g. `animated_gif`).
    pub video_duration_millis: u64,
    pub video_variants: Vec<Variant>,
}

/// An encoding of a video.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Hash, Serialize)]
pub struct Variant {
    #[serde(default, deserialize_with = "util::deserialize_default")]
    pub bitrate: u32,
    pub content_type: String,
    pub url: String,
}

#[derive(Deserialize, Serialize)]
struct RawExtendedMediaEntity {
    #[serde(flatten)]
    media: MediaEntity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    video_info: Option<RawVideoInfo>,
}

#[derive(Deserialize, Serialize)]
struct RawVideoInfo {
    aspect_ratio: (u32, u32),
    #[serde(default, deserialize_with = "util::deserialize_default")]
    #[serde(skip_serializing_if = "util::is_zero")]
    duration_millis: u64,
    variants: Vec<Variant>,
}

#[derive(Deserialize)]
struct RawSizes {
    large: Option<Size>,
    medium: Option<Size>,
    small: Option<Size>,
    thumb: Option<Size>,
}

identity_key!(MediaEntity, MediaId, |this| this.id);
identity_key!(ExtendedMediaEntity, MediaId, |this| this.media.id);

impl Resize {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Resize::Fit => "fit",
            Resize::Crop => "crop",
        }
    }
}

impl AsRef<str> for Resize {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<'de> Deserialize<'de> for Resize {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct ResizeVisitor;

        impl<'de> Visitor<'de> for ResizeVisitor {
            type Value = Resize;

            fn visit_str<E: SerdeError>(self, s: &str) -> Result<Resize, E> {
                match s {
                    "fit" => Ok(Resize::Fit),
                    "crop" => Ok(Resize::Crop),
                    _ => {
                        trace!(resize = s, "unrecognized resize method; reading as crop");
                        Ok(Resize::Crop)
                    }
                }
            }

            fn expecting(&self, f: &mut Formatter) -> fmt::Result {
                write!(f, "a string")
            }
        }

        d.deserialize_str(ResizeVisitor)
    }
}

impl Serialize for Resize {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl MediaEntity {
    pub fn size(&self, kind: SizeKind) -> Option<&Size> {
        self.sizes.get(&kind)
    }
}

impl AsRef<MediaEntity> for ExtendedMediaEntity {
    fn as_ref(&self) -> &MediaEntity {
        &self.media
    }
}

impl ExtendedMediaEntity {
    /// Whether the API reported any video information for this media.
    pub fn has_video_info(&self) -> bool {
        !self.video_variants.is_empty()
            || self.video_aspect_ratio_width != 0
            || self.video_aspect_ratio_height != 0
            || self.video_duration_millis != 0
    }
}

impl From<RawExtendedMediaEntity> for ExtendedMediaEntity {
    fn from(raw: RawExtendedMediaEntity) -> Self {
        match raw.video_info {
            Some(info) => ExtendedMediaEntity {
                media: raw.media,
                video_aspect_ratio_width: info.aspect_ratio.0,
                video_aspect_ratio_height: info.aspect_ratio.1,
                video_duration_millis: info.duration_millis,
                video_variants: info.variants,
            },
            None => ExtendedMediaEntity {
                media: raw.media,
                video_aspect_ratio_width: 0,
                video_aspect_ratio_height: 0,
                video_duration_millis: 0,
                video_variants: Vec::new(),
            },
        }
    }
}

impl From<ExtendedMediaEntity> for RawExtendedMediaEntity {
    fn from(e: ExtendedMediaEntity) -> Self {
        let video_info = if e.has_video_info() {
            Some(RawVideoInfo {
                aspect_ratio: (e.video_aspect_ratio_width, e.video_aspect_ratio_height),
                duration_millis: e.video_duration_millis,
                variants: e.video_variants,
            })
        } else {
            None
        };
        RawExtendedMediaEntity {
            media: e.media,
            video_info,
        }
    }
}

fn deserialize_sizes<'de, D>(d: D) -> Result<BTreeMap<SizeKind, Size>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawSizes::deserialize(d)?;
    let sizes = [
        (SizeKind::Large, raw.large),
        (SizeKind::Medium, raw.medium),
        (SizeKind::Small, raw.small),
        (SizeKind::Thumb, raw.thumb),
    ];
    Ok(sizes
        .iter()
        .filter_map(|&(kind, size)| size.map(|size| (kind, size)))
        .collect())
}
