//! Image storage for the BinBot gateway.

pub mod image_store;

pub use image_store::{ImageStore, StorageStats, StoredImage};
