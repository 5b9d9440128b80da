pub mod catalog;
pub mod kv;
pub mod redis;

pub use catalog::Catalog;
pub use kv::{read_list, write_list, KvStore, MemoryKvStore, StoreKey};
pub use redis::{create_redis_client, RedisKvStore};
