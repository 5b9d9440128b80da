use redis::AsyncCommands;
use redis::Client;

use crate::error::AppResult;

use super::kv::{KvStore, StoreKey};

/// Creates a Redis client for the persistent store
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Redis-backed persistence for user state
///
/// Values are whole JSON documents written with plain SET and no expiry;
/// user state never ages out.
#[derive(Clone)]
pub struct RedisKvStore {
    client: Client,
}

impl RedisKvStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl KvStore for RedisKvStore {
    async fn get_raw(&self, key: StoreKey) -> AppResult<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key.to_string()).await?;
        Ok(value)
    }

    async fn put_raw(&self, key: StoreKey, value: String) -> AppResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(key.to_string(), value).await?;
        Ok(())
    }
}
