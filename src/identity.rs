//! Identity of records that Twitter assigns numeric IDs to.

use std::fmt::Debug;
use std::hash::Hash;

/// A record whose equality, hash and ordering are determined solely by an identifier.
///
/// Two `User`s with the same `id` compare equal even if every other field differs, so they can be
/// placed in `HashSet`s or `BTreeMap`s keyed by their identity.
pub trait IdentityKey {
    type Key: Copy + Debug + Eq + Hash + Ord;

    fn identity_key(&self) -> Self::Key;
}
