use serde::Deserialize;
use serde::Serialize;

use super::State;
use crate::constants::KIND_TAG;
use crate::utils::weak;
use crate::Result;
use crate::StateError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    #[serde(deserialize_with = "weak::int")]
    pub id: i64,
    #[serde(deserialize_with = "weak::string")]
    pub name: String,
    #[serde(deserialize_with = "weak::string")]
    pub color: String,
    /// Per-monitor value, only present when the tag is attached to a monitor.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "weak::opt_string")]
    pub value: Option<String>,
}

impl Tag {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            value: None,
        }
    }
}

impl State {
    /// All cached tags ordered by id.
    pub fn tags(&self) -> Result<Vec<Tag>> {
        self.read(|state| Ok(state.tags.get()?.values().cloned().collect()))
    }

    pub fn tag(
        &self,
        id: i64,
    ) -> Result<Tag> {
        self.read(|state| {
            state
                .tags
                .get()?
                .get(&id)
                .cloned()
                .ok_or_else(|| StateError::NotFound { kind: KIND_TAG, id }.into())
        })
    }

    /// Replaces the whole tag table; each tag's id becomes its key.
    pub fn set_tags(
        &self,
        tags: Vec<Tag>,
    ) -> Result<()> {
        self.write(|state| state.tags.set(tags.into_iter().map(|tag| (tag.id, tag)).collect()))
    }

    pub fn set_tag(
        &self,
        tag: Tag,
    ) -> Result<()> {
        self.write(|state| {
            state.tags.get_or_insert_with(Default::default).insert(tag.id, tag);
        })
    }

    /// Removes a tag; deleting an unknown id is not an error.
    pub fn delete_tag(
        &self,
        id: i64,
    ) -> Result<()> {
        self.write(|state| {
            if let Ok(tags) = state.tags.get_mut() {
                tags.remove(&id);
            }
        })
    }
}
