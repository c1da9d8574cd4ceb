//! Core editor types: identifiers, transforms, selection, and history.

mod history;
mod selection;
mod transform;

pub use history::History;
pub use selection::{HighlightGroup, SelectionGroup};
pub use transform::Transform;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Globally unique object identifier used throughout the editor.
///
/// Every mirrored object and every command carries one. The nil value is the
/// root sentinel: a node whose parent guid is empty sits at the top of the
/// mirror graph. Guids are never reused within an editing session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(Uuid);

impl Guid {
    /// The empty/nil guid, meaning "no parent" / "root".
    pub const EMPTY: Self = Self(Uuid::nil());

    /// Generate a fresh random guid.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Check if this is the empty sentinel.
    pub fn is_empty(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for Guid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Display for Guid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of the player a notification originated from.
///
/// The engine tags every confirmation with its originator so the mirror can
/// tell locally-initiated mutations apart from those of other players.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guid_empty_sentinel() {
        assert!(Guid::EMPTY.is_empty());
        assert!(Guid::default().is_empty());
        assert!(!Guid::new().is_empty());
    }

    #[test]
    fn test_guid_uniqueness() {
        let a = Guid::new();
        let b = Guid::new();
        assert_ne!(a, b);
        assert_eq!(a, a);
    }
}
