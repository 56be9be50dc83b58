pub mod intent;
pub mod savings;
