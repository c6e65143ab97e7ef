pub mod document;

pub use document::{Document, DocumentType, GenerateDocumentRequest, NewDocument};
