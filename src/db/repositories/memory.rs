use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{SpaceStore, StoreResult};
use crate::db::models::space::{FIELD_ID, Item, Space, SpaceDraft};

/// In-process store used for local development and tests.
#[derive(Default)]
pub struct MemorySpaceRepo {
    items: RwLock<BTreeMap<String, Item>>,
}

impl MemorySpaceRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with raw items. Items without a string
    /// `id` attribute are skipped.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let items = items
            .into_iter()
            .filter_map(|item| {
                let id = item.get(FIELD_ID)?.as_str()?.to_string();
                Some((id, item))
            })
            .collect();
        Self {
            items: RwLock::new(items),
        }
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl SpaceStore for MemorySpaceRepo {
    async fn get(&self, id: &str) -> StoreResult<Option<Item>> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn scan(&self) -> StoreResult<Vec<Item>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn put(&self, space: &Space) -> StoreResult<()> {
        self.items
            .write()
            .await
            .insert(space.id.clone(), space.to_item());
        Ok(())
    }

    async fn update(&self, id: &str, changes: &SpaceDraft) -> StoreResult<Item> {
        let mut items = self.items.write().await;
        let item = items.entry(id.to_string()).or_insert_with(|| {
            let mut item = Item::new();
            item.insert(FIELD_ID.to_string(), Value::String(id.to_string()));
            item
        });
        for (name, value) in changes.changes() {
            item.insert(name.to_string(), Value::String(value.to_string()));
        }
        Ok(item.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.items.write().await.remove(id);
        Ok(())
    }
}
