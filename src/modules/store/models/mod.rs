pub mod store_profile;

pub use store_profile::{StoreProfile, UpsertStoreProfileRequest};
