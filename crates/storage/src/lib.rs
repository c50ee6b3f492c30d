#![forbid(unsafe_code)]

pub mod repository;
pub mod results;
pub mod sqlite;

pub use repository::{InMemoryRepository, KeyValueRepository, Storage, StorageError};
pub use results::{CodecError, ResultRecord, STATS_STORAGE_KEY, decode_results, encode_results};
