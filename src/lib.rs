// brp mini-program client library.
// Expiring, path-addressable local storage plus the request wrapper and helpers around it.

pub mod config;
pub mod error;
pub mod request;
pub mod storage;
pub mod util;

pub use config::Config;
pub use error::{Result, WeappError};
pub use request::ApiClient;
pub use storage::{FileStore, KeyValueStore, MemoryStore, PathOutcome, Storage, Value};
