//! Repository listing fetch and normalization.
//!
//! Fetches the flat contents listing of the configured repository and maps
//! each entry into a `ProjectItem`:
//! - files keep their download URL and size, `type` is the extension
//! - directories get `type = "folder"`, no download URL, size 0
//! - any other kind (symlink, submodule, ...) is dropped
//!
//! Output order follows input order. Directories are never expanded.
//!
//! Used by: GET /api/github

use std::sync::Arc;

use crate::error::Result;
use crate::models::{EntryKind, ItemType, ProjectItem, RemoteEntry};
use crate::upstream::UpstreamClient;

const FOLDER_TYPE: &str = "folder";

pub type SharedListing = Arc<ListingSource>;

/// The fixed repository contents endpoint and the client used to reach it.
#[derive(Debug, Clone)]
pub struct ListingSource {
    client: UpstreamClient,
    url: String,
}

impl ListingSource {
    pub fn new(client: UpstreamClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub async fn fetch_projects(&self) -> Result<Vec<ProjectItem>> {
        let entries: Vec<RemoteEntry> = self.client.get_json(&self.url).await?;
        let projects = normalize_entries(entries);
        tracing::debug!("Normalized {} listing entries", projects.len());
        Ok(projects)
    }
}

pub fn normalize_entries(entries: Vec<RemoteEntry>) -> Vec<ProjectItem> {
    entries.into_iter().filter_map(normalize_entry).collect()
}

pub fn normalize_entry(entry: RemoteEntry) -> Option<ProjectItem> {
    match entry.kind() {
        EntryKind::File => Some(ProjectItem {
            file_type: file_extension(&entry.name).map(str::to_string),
            name: entry.name,
            path: entry.path,
            url: entry.html_url,
            download_url: entry.download_url,
            size: entry.size,
            item_type: ItemType::File,
        }),
        EntryKind::Dir => Some(ProjectItem {
            name: entry.name,
            path: entry.path,
            url: entry.html_url,
            download_url: None,
            size: 0,
            file_type: Some(FOLDER_TYPE.to_string()),
            item_type: ItemType::Directory,
        }),
        EntryKind::Other => None,
    }
}

/// Text after the last `.` in `name`, `None` when there is no dot.
pub fn file_extension(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(value: serde_json::Value) -> Vec<RemoteEntry> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_file_entry_example() {
        let items = normalize_entries(entries(json!([{
            "type": "file",
            "name": "app.js",
            "path": "src/app.js",
            "html_url": "u",
            "download_url": "d",
            "size": 2048
        }])));

        assert_eq!(
            serde_json::to_value(&items).unwrap(),
            json!([{
                "name": "app.js",
                "path": "src/app.js",
                "url": "u",
                "download_url": "d",
                "size": 2048,
                "type": "js",
                "itemType": "file"
            }])
        );
    }

    #[test]
    fn test_directory_has_no_download_url_and_zero_size() {
        let items = normalize_entries(entries(json!([{
            "type": "dir",
            "name": "week1",
            "path": "week1",
            "html_url": "https://example.com/week1",
            "download_url": "https://example.com/should-not-leak",
            "size": 512
        }])));

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.download_url, None);
        assert_eq!(item.size, 0);
        assert_eq!(item.file_type.as_deref(), Some("folder"));
        assert_eq!(item.item_type, ItemType::Directory);

        let value = serde_json::to_value(item).unwrap();
        assert!(value["download_url"].is_null());
    }

    #[test]
    fn test_directory_alias_is_recognized() {
        let items = normalize_entries(entries(json!([
            { "type": "directory", "name": "docs", "path": "docs" }
        ])));
        assert_eq!(items[0].item_type, ItemType::Directory);
    }

    #[test]
    fn test_unknown_kinds_are_dropped_and_order_kept() {
        let items = normalize_entries(entries(json!([
            { "type": "file", "name": "b.html", "path": "b.html", "size": 10 },
            { "type": "symlink", "name": "link", "path": "link" },
            { "type": "dir", "name": "a", "path": "a" },
            { "type": "submodule", "name": "vendor", "path": "vendor" },
            { "name": "no-kind", "path": "no-kind" },
            { "type": "file", "name": "c.css", "path": "c.css", "size": 3 }
        ])));

        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["b.html", "a", "c.css"]);
    }

    #[test]
    fn test_extension_edge_cases() {
        assert_eq!(file_extension("archive.tar.gz"), Some("gz"));
        assert_eq!(file_extension(".gitignore"), Some("gitignore"));
        assert_eq!(file_extension("trailing."), Some(""));
        assert_eq!(file_extension("Makefile"), None);
    }

    #[test]
    fn test_file_without_dot_omits_type() {
        let items = normalize_entries(entries(json!([
            { "type": "file", "name": "LICENSE", "path": "LICENSE", "size": 1 }
        ])));

        let value = serde_json::to_value(&items[0]).unwrap();
        assert!(value.get("type").is_none());
        assert_eq!(value["itemType"], "file");
    }

    #[test]
    fn test_missing_and_null_fields_become_empty() {
        let items = normalize_entries(entries(json!([
            { "type": "file", "name": null, "size": null }
        ])));

        let item = &items[0];
        assert_eq!(item.name, "");
        assert_eq!(item.path, "");
        assert_eq!(item.url, None);
        assert_eq!(item.download_url, None);
        assert_eq!(item.size, 0);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_entries(Vec::new()).is_empty());
    }
}
