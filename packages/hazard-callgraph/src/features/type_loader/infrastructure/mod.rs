pub mod error;
pub mod snapshot_cache;

pub use error::{CacheError, CacheResult};
pub use snapshot_cache::{decode_snapshot, encode_snapshot, read_snapshot, write_snapshot};
