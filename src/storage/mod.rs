pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::AppError;

/// Well-known key the stats blob lives under.
pub const STATS_KEY: &str = "winrateData";

/// Durable key-value storage for serialized blobs.
pub trait Store {
    /// Returns `None` when the key has never been written or can't be read.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<(), AppError>;
}
