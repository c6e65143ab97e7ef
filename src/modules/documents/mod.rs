pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Document, DocumentType};
pub use repositories::DocumentRepository;
pub use services::DocumentService;
