pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{StoreProfile, UpsertStoreProfileRequest};
pub use repositories::StoreRepository;
pub use services::StoreService;
