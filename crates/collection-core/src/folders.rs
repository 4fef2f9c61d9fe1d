//! Folder grouping of items by endpoint

use crate::collection::{CollectionEntry, Folder, Item};
use indexmap::IndexMap;

/// First non-empty path segment, `None` for the root endpoint
pub fn folder_name(endpoint: &str) -> Option<&str> {
    endpoint.split('/').find(|segment| !segment.is_empty())
}

/// Buckets items into folders keyed by their endpoint's first segment
#[derive(Debug, Default)]
pub struct FolderAssembler {
    folders: IndexMap<String, Folder>,
    direct: Vec<Item>,
}

impl FolderAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the items of one endpoint, preserving their order
    pub fn add(&mut self, endpoint: &str, items: Vec<Item>) {
        if items.is_empty() {
            return;
        }

        match folder_name(endpoint) {
            Some(name) => {
                self.folders
                    .entry(name.to_string())
                    .or_insert_with(|| Folder {
                        name: name.to_string(),
                        description: format!("Folder for {}", name),
                        item: Vec::new(),
                    })
                    .item
                    .extend(items);
            }
            None => self.direct.extend(items),
        }
    }

    /// Direct items and folders, sorted by name with unnamed entries first
    pub fn finish(self) -> Vec<CollectionEntry> {
        let mut entries: Vec<CollectionEntry> = self
            .direct
            .into_iter()
            .map(CollectionEntry::Item)
            .chain(self.folders.into_values().map(CollectionEntry::Folder))
            .collect();
        entries.sort_by(|a, b| a.name().unwrap_or("").cmp(b.name().unwrap_or("")));
        entries
    }
}
