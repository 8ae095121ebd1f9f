pub mod loader;
pub mod records;
pub mod sample;

pub use loader::{Dataset, LoadError};
pub use records::{InventoryRecord, JoinedRow, Product, SalesAggregate, SalesRecord};
