pub mod loader;
pub mod summary;
pub mod types;

pub use loader::{load_dataset, read_dataset};
pub use summary::{summarize, DatasetSummary};
pub use types::{AttrValue, Dataset, Entity, Fighter};
