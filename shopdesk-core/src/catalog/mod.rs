//! Catalog endpoints: categories and inventory

mod category;
mod inventory;
mod page;

pub use category::{Category, CategoryApi, NewCategory};
pub use inventory::{InventoryApi, InventoryItem, InventoryStatus, RentalFilter, Segment};
pub use page::{Envelope, ListQuery, Page, Pagination};
