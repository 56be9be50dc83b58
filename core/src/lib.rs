pub mod config;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;

pub use config::{Config, GoalPersistence};
pub use input::{parse_amount, parse_optional_amount};
pub use model::intent::Intent;
pub use model::savings::{SavingsState, UpdateError, DEFAULT_SEGMENT_COUNT};
pub use repository::{default_data_dir, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use service::dto::{SavingsView, TITLE};
pub use service::savings_service::{Outcome, SavingsService};
