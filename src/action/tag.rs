use serde::Deserialize;
use serde_json::json;
use serde_json::Value;
use tracing::debug;

use super::request;
use super::Empty;
use super::StatefulEmitter;
use crate::ActionError;
use crate::Result;
use crate::Tag;
use crate::Validator;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TagsBody {
    tags: Vec<Tag>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TagBody {
    tag: Option<Tag>,
}

impl TagBody {
    fn into_tag(
        self,
        action: &'static str,
    ) -> Result<Tag> {
        self.tag.ok_or_else(|| ActionError::InvalidResponse { action }.into())
    }
}

/// Fetches every tag and replaces the cached tag table with them.
pub async fn get_tags<E: StatefulEmitter + ?Sized>(client: &E) -> Result<Vec<Tag>> {
    let body: TagsBody = request(client, "getTags", Vec::new()).await?;
    client.state().set_tags(body.tags.clone())?;
    debug!(count = body.tags.len(), "Fetched tags");
    Ok(body.tags)
}

/// Creates a tag and caches it under the id the server assigned.
pub async fn add_tag<E: StatefulEmitter + ?Sized>(
    client: &E,
    validator: &Validator,
    name: &str,
    color: &str,
) -> Result<Tag> {
    validator.validate_tag(&Tag::new(0, name, color))?;

    let args = vec![json!({
        "new": true,
        "name": name,
        "color": color,
    })];
    let tag = request::<_, TagBody>(client, "addTag", args).await?.into_tag("addTag")?;
    client.state().set_tag(tag.clone())?;
    debug!(id = tag.id, "Added tag");
    Ok(tag)
}

/// Renames or recolors an existing tag.
pub async fn edit_tag<E: StatefulEmitter + ?Sized>(
    client: &E,
    validator: &Validator,
    tag: &Tag,
) -> Result<Tag> {
    validator.validate_tag(tag)?;

    let args = vec![json!({
        "id": tag.id,
        "name": tag.name,
        "color": tag.color,
    })];
    let tag = request::<_, TagBody>(client, "editTag", args).await?.into_tag("editTag")?;
    client.state().set_tag(tag.clone())?;
    Ok(tag)
}

pub async fn delete_tag<E: StatefulEmitter + ?Sized>(
    client: &E,
    id: i64,
) -> Result<()> {
    request::<_, Empty>(client, "deleteTag", vec![Value::from(id)]).await?;
    client.state().delete_tag(id)
}
