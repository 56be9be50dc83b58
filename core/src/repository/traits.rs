use anyhow::Result;

pub const KEY_SAVINGS_GOAL: &str = "savingsGoal";
pub const KEY_CURRENT_SAVINGS: &str = "currentSavings";

/// Flat key-value storage for the two persisted savings fields.
///
/// Loads return `None` when the key is missing or holds a value of the wrong
/// type; callers supply the default.
pub trait KeyValueStore {
    fn load_string(&self, key: &str) -> Result<Option<String>>;
    fn load_f64(&self, key: &str) -> Result<Option<f64>>;
    fn save_string(&self, key: &str, value: &str) -> Result<()>;
    fn save_f64(&self, key: &str, value: f64) -> Result<()>;
}

