pub mod file;
pub mod memory;
pub mod traits;

// Re-export
pub use file::{default_data_dir, FileKeyValueStore};
pub use memory::MemoryKeyValueStore;
pub use traits::{KeyValueStore, KEY_CURRENT_SAVINGS, KEY_SAVINGS_GOAL};
