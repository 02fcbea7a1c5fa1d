use serde::{Deserialize, Serialize};
use std::fmt;

const PINNED_CATEGORY: &str = "pinned";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(String);

impl FolderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The built-in "Pinned" category. Listing it yields every pinned clip
    /// whatever its folder; it is not a drop destination.
    pub fn pinned() -> Self {
        Self(PINNED_CATEGORY.to_string())
    }

    pub fn is_pinned_category(&self) -> bool {
        self.0 == PINNED_CATEGORY
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FolderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A list container, which is also a drop zone. `None` is the "all items"
/// history bucket; it is a real destination (moving a clip there unfiles
/// it), distinct from hovering no zone at all.
pub type ContainerId = Option<FolderId>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_items_container_serializes_as_null() {
        let all: ContainerId = None;
        assert_eq!(serde_json::to_string(&all).unwrap(), "null");

        let folder: ContainerId = Some(FolderId::from("f2"));
        assert_eq!(serde_json::to_string(&folder).unwrap(), "\"f2\"");
    }

    #[test]
    fn test_pinned_category() {
        assert!(FolderId::pinned().is_pinned_category());
        assert!(!FolderId::from("work").is_pinned_category());
    }
}
