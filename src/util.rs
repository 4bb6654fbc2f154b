use std::convert::TryFrom;
use std::fmt::{self, Formatter};
use std::marker::PhantomData;
use std::str::FromStr;

use chrono::format::ParseResult;
use serde::de::{Deserialize, Deserializer, Error as SerdeError, Unexpected, Visitor};
use serde::ser::Serializer;

use crate::types::DateTime;

/// Implements `IdentityKey` and the comparison traits of a type in terms of one of its fields.
macro_rules! identity_key {
    ($T:ty, $Key:ty, |$this:ident| $key:expr) => {
        impl crate::identity::IdentityKey for $T {
            type Key = $Key;

            fn identity_key(&self) -> $Key {
                let $this = self;
                $key
            }
        }

        impl ::std::cmp::PartialEq for $T {
            fn eq(&self, other: &$T) -> bool {
                crate::identity::IdentityKey::identity_key(self)
                    == crate::identity::IdentityKey::identity_key(other)
            }
        }

        impl ::std::cmp::Eq for $T {}

        impl ::std::hash::Hash for $T {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                ::std::hash::Hash::hash(&crate::identity::IdentityKey::identity_key(self), state)
            }
        }

        impl ::std::cmp::PartialOrd for $T {
            fn partial_cmp(&self, other: &$T) -> Option<::std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl ::std::cmp::Ord for $T {
            fn cmp(&self, other: &$T) -> ::std::cmp::Ordering {
                crate::identity::IdentityKey::identity_key(self)
                    .cmp(&crate::identity::IdentityKey::identity_key(other))
            }
        }
    };
}

const DATETIME_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Deserializes a nullable value, substituting `T::default()` for `null`.
pub fn deserialize_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::deserialize(d).map(|o| o.unwrap_or_default())
}

/// Deserializes an integer given either as a JSON number or as a numeric string.
/// `null` and the empty string yield `T::default()`.
pub fn deserialize_lenient_int<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + FromStr + TryFrom<u64> + TryFrom<i64>,
{
    struct IntVisitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for IntVisitor<T>
    where
        T: Default + FromStr + TryFrom<u64> + TryFrom<i64>,
    {
        type Value = T;

        fn visit_u64<E: SerdeError>(self, v: u64) -> Result<T, E> {
            <T as TryFrom<u64>>::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_i64<E: SerdeError>(self, v: i64) -> Result<T, E> {
            <T as TryFrom<i64>>::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_str<E: SerdeError>(self, s: &str) -> Result<T, E> {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed == "null" {
                return Ok(T::default());
            }
            trimmed
                .parse()
                .map_err(|_| E::invalid_value(Unexpected::Str(s), &self))
        }

        fn visit_unit<E: SerdeError>(self) -> Result<T, E> {
            Ok(T::default())
        }

        fn visit_none<E: SerdeError>(self) -> Result<T, E> {
            Ok(T::default())
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<T, D::Error> {
            d.deserialize_any(self)
        }

        fn expecting(&self, f: &mut Formatter) -> fmt::Result {
            write!(f, "an integer or a string containing an integer")
        }
    }

    d.deserialize_any(IntVisitor(PhantomData))
}

pub fn parse_datetime(s: &str) -> ParseResult<DateTime> {
    chrono::DateTime::parse_from_str(s, DATETIME_FORMAT).map(|dt| dt.with_timezone(&chrono::Utc))
}

pub fn format_datetime(dt: &DateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// (De)serializes an optional `created_at`-style date string.
pub mod opt_datetime {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(s) => parse_datetime(&s)
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid date `{}`: {}", s, e))),
            None => Ok(None),
        }
    }

    pub fn serialize<S: Serializer>(dt: &Option<DateTime>, s: S) -> Result<S::Ok, S::Error> {
        match *dt {
            Some(ref dt) => s.serialize_some(&format_datetime(dt)),
            None => s.serialize_none(),
        }
    }
}

pub fn is_zero<T: Default + PartialEq>(v: &T) -> bool {
    *v == T::default()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[test]
    fn test_deserialize_default() {
        #[derive(Debug, Default, Deserialize, PartialEq)]
        struct S {
            #[serde(deserialize_with = "deserialize_default")]
            #[serde(default)]
            n: u32,
            #[serde(deserialize_with = "deserialize_default")]
            #[serde(default)]
            o: Option<bool>,
            #[serde(deserialize_with = "deserialize_default")]
            #[serde(default)]
            s: String,
            #[serde(deserialize_with = "deserialize_default")]
            #[serde(default)]
            v: Vec<u8>,
        }

        assert_eq!(
            serde_json::from_str::<S>(r#"{"n":null,"s":null}"#).unwrap(),
            serde_json::from_str(r#"{"o":null,"v":null}"#).unwrap()
        );
        assert_eq!(
            S { n: 1, o: Some(true), s: "s".to_owned(), v: vec![255] },
            serde_json::from_str(r#"{"n":1,"o":true,"s":"s","v":[255]}"#).unwrap()
        );
    }

    #[test]
    fn test_deserialize_lenient_int() {
        #[derive(Debug, Deserialize)]
        struct S {
            #[serde(default, deserialize_with = "deserialize_lenient_int")]
            n: i32,
        }

        let parse = |json: &str| serde_json::from_str::<S>(json).map(|s| s.n);

        assert_eq!(parse(r#"{"n":-3}"#).unwrap(), -3);
        assert_eq!(parse(r#"{"n":"42"}"#).unwrap(), 42);
        assert_eq!(parse(r#"{"n":""}"#).unwrap(), 0);
        assert_eq!(parse(r#"{"n":null}"#).unwrap(), 0);
        assert_eq!(parse(r#"{}"#).unwrap(), 0);
        assert!(parse(r#"{"n":"forty"}"#).is_err());
        assert!(parse(r#"{"n":4294967296}"#).is_err());
        assert!(parse(r#"{"n":true}"#).is_err());
    }

    #[test]
    fn test_parse_datetime() {
        use chrono::TimeZone;

        assert_eq!(
            chrono::Utc.with_ymd_and_hms(2017, 5, 1, 0, 1, 2).unwrap(),
            parse_datetime("Mon May 01 00:01:02 +0000 2017").unwrap()
        );
        assert_eq!(
            chrono::Utc.with_ymd_and_hms(2008, 8, 27, 13, 8, 45).unwrap(),
            parse_datetime("Wed Aug 27 22:08:45 +0900 2008").unwrap()
        );
        assert!(parse_datetime("2017-05-01T00:01:02Z").is_err());
    }

    #[test]
    fn datetime_format_round_trip() {
        let s = "Mon May 01 00:01:02 +0000 2017";
        assert_eq!(format_datetime(&parse_datetime(s).unwrap()), s);
    }
}
