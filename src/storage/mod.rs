pub mod backends;
pub mod link_store;
pub mod models;

pub use backends::{KvBackend, MemoryBackend, RedisBackend, create_backend};
pub use link_store::LinkStore;
pub use models::Link;
