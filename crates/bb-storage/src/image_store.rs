//! In-memory image store keyed by image id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;
use uuid::Uuid;

/// An uploaded image plus its metadata.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub id: String,
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

/// Aggregate storage stats, as exposed by the image stats endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageStats {
    pub total_images: usize,
    pub total_bytes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    inner: Arc<RwLock<HashMap<String, StoredImage>>>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an uploaded image and return its minted id.
    pub fn save(&self, filename: &str, content_type: &str, bytes: Vec<u8>) -> String {
        let id = Uuid::new_v4().to_string();
        let image = StoredImage {
            id: id.clone(),
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            bytes,
            created_at: Utc::now(),
        };
        debug!(image_id = %id, filename, "image stored");
        self.inner.write().unwrap().insert(id.clone(), image);
        id
    }

    pub fn get(&self, id: &str) -> Option<StoredImage> {
        self.inner.read().unwrap().get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> Option<StoredImage> {
        self.inner.write().unwrap().remove(id)
    }

    pub fn count(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn stats(&self) -> StorageStats {
        let map = self.inner.read().unwrap();
        StorageStats {
            total_images: map.len(),
            total_bytes: map.values().map(|i| i.bytes.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_get() {
        let store = ImageStore::new();
        let id = store.save("red.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]);
        let img = store.get(&id).unwrap();
        assert_eq!(img.filename, "red.jpg");
        assert_eq!(img.bytes.len(), 3);
    }

    #[test]
    fn test_ids_are_unique() {
        let store = ImageStore::new();
        let a = store.save("a.jpg", "image/jpeg", vec![1]);
        let b = store.save("a.jpg", "image/jpeg", vec![1]);
        assert_ne!(a, b);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_remove() {
        let store = ImageStore::new();
        let id = store.save("a.png", "image/png", vec![1, 2]);
        assert!(store.remove(&id).is_some());
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn test_stats() {
        let store = ImageStore::new();
        store.save("a.jpg", "image/jpeg", vec![0; 10]);
        store.save("b.jpg", "image/jpeg", vec![0; 5]);
        let stats = store.stats();
        assert_eq!(stats.total_images, 2);
        assert_eq!(stats.total_bytes, 15);
    }
}
