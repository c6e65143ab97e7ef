pub mod catalog_item;
pub mod requests;

pub use catalog_item::{CatalogItem, ItemKind};
pub use requests::{CreateItemRequest, UpdateItemRequest};
