pub mod document_service;
pub mod html_renderer;

pub use document_service::DocumentService;
