//! Repository listing DTOs.
//!
//! - `RemoteEntry`: One entry of the upstream contents API response
//! - `EntryKind`: Upstream entry kind (`file`, `dir`, anything else)
//! - `ProjectItem`: Normalized shape served to the projects page
//! - `ItemType`: `file` | `directory` discriminator on `ProjectItem`
//! - `ProjectsResponse`: `{ "projects": [...] }` wrapper
//!
//! Every upstream field is optional on the wire. Missing strings become
//! empty, a missing size becomes 0 and a missing kind is unrecognized.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteEntry {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u64,
}

impl RemoteEntry {
    pub fn kind(&self) -> EntryKind {
        match self.kind.as_deref() {
            Some("file") => EntryKind::File,
            Some("dir") | Some("directory") => EntryKind::Dir,
            _ => EntryKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks, submodules and anything the upstream adds later.
    Other,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    File,
    Directory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectItem {
    pub name: String,
    pub path: String,
    pub url: Option<String>,
    pub download_url: Option<String>,
    pub size: u64,
    /// File extension, or `"folder"` for directories.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(rename = "itemType")]
    pub item_type: ItemType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub projects: Vec<ProjectItem>,
}
