//! Error types

use std::any;

use thiserror::Error;

pub use serde_json::error::Category;

/// An error occurred while decoding a JSON object into one of the types of this crate.
///
/// A required field being absent, a field of the wrong type and a malformed JSON text all
/// surface as this error. The underlying `serde_json::Error` is always available through
/// `std::error::Error::source`.
#[derive(Debug, Error)]
#[error("failed to decode `{target}`: {source}")]
pub struct DecodeError {
    target: &'static str,
    #[source]
    source: serde_json::Error,
}

pub type Result<T> = std::result::Result<T, DecodeError>;

impl DecodeError {
    pub(crate) fn new<T: ?Sized>(source: serde_json::Error) -> Self {
        DecodeError {
            target: short_type_name::<T>(),
            source,
        }
    }

    /// Name of the type that was being decoded, e.g. `User`.
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// One-based line number at which the error was detected, or `0` when decoding from
    /// an already parsed `serde_json::Value`.
    pub fn line(&self) -> usize {
        self.source.line()
    }

    /// One-based column number at which the error was detected.
    pub fn column(&self) -> usize {
        self.source.column()
    }

    /// Whether the error comes from malformed input, a premature end of input or
    /// a mismatch between the input and the expected shape of the object.
    pub fn category(&self) -> Category {
        self.source.classify()
    }

    pub fn into_inner(self) -> serde_json::Error {
        self.source
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let name = any::type_name::<T>();
    // Strip module paths but leave generic arguments (e.g. `Vec<User>`) readable.
    let end = name.find('<').unwrap_or_else(|| name.len());
    match name[..end].rfind("::") {
        Some(i) => &name[i + 2..],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;
    use crate::User;

    #[test]
    fn keeps_cause() {
        let cause = serde_json::from_str::<u64>("\"x\"").unwrap_err();
        let e = DecodeError::new::<User>(cause);
        assert_eq!(e.target(), "User");
        assert_eq!(e.category(), Category::Data);
        assert!(e.source().is_some());
        assert!(e.to_string().starts_with("failed to decode `User`: "));
    }

    #[test]
    fn type_name() {
        assert_eq!(short_type_name::<User>(), "User");
        assert_eq!(short_type_name::<u64>(), "u64");
        assert_eq!(short_type_name::<Vec<User>>(), "Vec<twitter_object::user::User>");
    }
}
