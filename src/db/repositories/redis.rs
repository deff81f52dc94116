use std::collections::HashMap;

use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use serde_json::Value;

use super::{SpaceStore, StoreResult};
use crate::db::models::space::{
    FIELD_ID, FIELD_LOCATION, FIELD_PHOTO_URL, FIELD_WARD, Item, Space, SpaceDraft,
};

/// Redis-backed store. Each Space is a hash at `<table>:<id>`; the set
/// `<table>:ids` indexes every key for the unfiltered listing.
#[derive(Clone)]
pub struct RedisSpaceRepo {
    conn: MultiplexedConnection,
    table: String,
}

impl RedisSpaceRepo {
    /// Opens the single multiplexed connection shared by every request.
    pub async fn connect(client: &redis::Client, table: impl Into<String>) -> StoreResult<Self> {
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self {
            conn,
            table: table.into(),
        })
    }

    fn item_key(&self, id: &str) -> String {
        format!("{}:{}", self.table, id)
    }

    fn index_key(&self) -> String {
        format!("{}:ids", self.table)
    }
}

fn to_item(fields: HashMap<String, String>) -> Option<Item> {
    if fields.is_empty() {
        return None;
    }
    Some(
        fields
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect(),
    )
}

#[async_trait]
impl SpaceStore for RedisSpaceRepo {
    async fn get(&self, id: &str) -> StoreResult<Option<Item>> {
        let mut conn = self.conn.clone();
        let fields: HashMap<String, String> = conn.hgetall(self.item_key(id)).await?;
        Ok(to_item(fields))
    }

    async fn scan(&self) -> StoreResult<Vec<Item>> {
        let mut conn = self.conn.clone();
        let mut ids: Vec<String> = conn.smembers(self.index_key()).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        ids.sort();

        let mut pipe = redis::pipe();
        for id in &ids {
            pipe.hgetall(self.item_key(id));
        }
        let rows: Vec<HashMap<String, String>> = pipe.query_async(&mut conn).await?;

        // An index entry can outlive its hash if a delete was interrupted.
        Ok(rows.into_iter().filter_map(to_item).collect())
    }

    async fn put(&self, space: &Space) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let key = self.item_key(&space.id);

        let mut fields: Vec<(&str, &str)> = vec![
            (FIELD_ID, space.id.as_str()),
            (FIELD_LOCATION, space.location.as_str()),
            (FIELD_WARD, space.ward.as_str()),
        ];
        if let Some(ref url) = space.photo_url {
            fields.push((FIELD_PHOTO_URL, url.as_str()));
        }

        redis::pipe()
            .atomic()
            .del(&key)
            .ignore()
            .hset_multiple(&key, &fields)
            .ignore()
            .sadd(self.index_key(), &space.id)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn update(&self, id: &str, changes: &SpaceDraft) -> StoreResult<Item> {
        let mut conn = self.conn.clone();
        let key = self.item_key(id);

        let mut fields = changes.changes();
        fields.push((FIELD_ID, id));

        let (after,): (HashMap<String, String>,) = redis::pipe()
            .atomic()
            .hset_multiple(&key, &fields)
            .ignore()
            .sadd(self.index_key(), id)
            .ignore()
            .hgetall(&key)
            .query_async(&mut conn)
            .await?;

        let mut item = to_item(after).unwrap_or_default();
        item.entry(FIELD_ID.to_string())
            .or_insert_with(|| Value::String(id.to_string()));
        Ok(item)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        redis::pipe()
            .atomic()
            .del(self.item_key(id))
            .ignore()
            .srem(self.index_key(), id)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }
}
