// Storage module for expiring local key-value data.
// Layers typed values, expiry tokens and dotted-path documents over a host key-value store.

pub mod backend;
pub mod codec;
pub mod expiry;
pub mod file;
pub mod path;
pub mod store;

pub use backend::{KeyValueStore, MemoryStore, Result, StorageError};
pub use codec::Value;
pub use expiry::{EXPIRE_PREFIX, expire_key, is_expired, is_expired_at};
pub use file::FileStore;
pub use path::PathOutcome;
pub use store::Storage;
