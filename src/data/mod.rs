pub mod loader;
pub mod types;

pub use loader::load_dataset;
pub use types::{Dataset, GrantRecord};
