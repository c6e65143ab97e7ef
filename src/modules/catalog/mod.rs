pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CatalogItem, ItemKind};
pub use repositories::CatalogRepository;
pub use services::CatalogService;
