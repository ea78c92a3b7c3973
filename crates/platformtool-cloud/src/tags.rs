//! Provenance tag model
//!
//! Every resource this tool creates is stamped with the same two tags,
//! regardless of kind: `created-by-tool=true` plus the creating user. The
//! ownership gate reads these back through the capability traits before any
//! destructive action; resources without them are foreign and untouchable.

use serde::{Deserialize, Serialize};

/// A single key/value tag as providers store it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// An ordered set of tags attached to one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSet {
    entries: Vec<Tag>,
}

impl TagSet {
    /// Tag marking a resource as created by this tool.
    pub const CREATED_BY_TOOL: &'static str = "created-by-tool";

    /// Tag naming the user the resource was created for.
    pub const OWNER: &'static str = "owner";

    pub fn new() -> Self {
        Self::default()
    }

    /// The tag set stamped onto every resource at creation time.
    pub fn provenance(username: &str) -> Self {
        let mut tags = Self::new();
        tags.insert(Self::CREATED_BY_TOOL, "true");
        tags.insert(Self::OWNER, username);
        tags
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(Tag {
            key: key.into(),
            value: value.into(),
        });
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.value.as_str())
    }

    /// True iff the resource carries `created-by-tool=true`.
    pub fn is_tool_created(&self) -> bool {
        self.get(Self::CREATED_BY_TOOL) == Some("true")
    }

    /// True iff the resource is tool-created *and* owned by `username`.
    pub fn owned_by(&self, username: &str) -> bool {
        self.is_tool_created() && self.get(Self::OWNER) == Some(username)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(String, String)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut tags = Self::new();
        for (key, value) in iter {
            tags.insert(key, value);
        }
        tags
    }
}
