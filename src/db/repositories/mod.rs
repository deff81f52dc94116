pub mod memory;
pub mod redis;

pub use memory::MemorySpaceRepo;
pub use self::redis::RedisSpaceRepo;

use async_trait::async_trait;
use thiserror::Error;

use crate::db::models::space::{Item, Space, SpaceDraft};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value backing store for Space items, keyed by `id`.
///
/// The store enforces no schema of its own; every rule about what a Space
/// looks like is checked before a write reaches it. Implementations are
/// shared across requests and must not hold per-request state.
#[async_trait]
pub trait SpaceStore: Send + Sync {
    /// Looks up a single item by key.
    async fn get(&self, id: &str) -> StoreResult<Option<Item>>;

    /// Unfiltered listing of every item.
    async fn scan(&self) -> StoreResult<Vec<Item>>;

    /// Writes a full item, replacing any item stored under the same key.
    async fn put(&self, space: &Space) -> StoreResult<()>;

    /// Sets only the attributes present in `changes` and returns the item as
    /// it reads after the update. An unknown key is created.
    async fn update(&self, id: &str, changes: &SpaceDraft) -> StoreResult<Item>;

    /// Removes the item if present. Deleting a missing key is not an error.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}
