use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::AppError;

/// Object storage for uploaded complaint photos
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store `data` under `key` and return the URL clients can fetch it from
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String, AppError>;

    /// Remove a stored object, used to undo an upload whose row was never written
    async fn remove(&self, key: &str) -> Result<(), AppError>;

    /// Key for a new complaint photo: `<prefix>/complaints/<user>/<uuid>.<ext>`
    fn complaint_key(&self, user_id: Uuid, extension: &str) -> String;
}

/// In-process store for local runs without MinIO
#[derive(Default)]
pub struct MemoryMediaStore {
    objects: Mutex<HashMap<String, (String, Vec<u8>)>>,
}

impl MemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<(String, Vec<u8>)> {
        self.objects
            .lock()
            .ok()
            .and_then(|objects| objects.get(key).cloned())
    }

    pub fn len(&self) -> usize {
        self.objects.lock().map(|o| o.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String, AppError> {
        self.objects
            .lock()
            .map_err(|_| AppError::Internal("Media store lock poisoned".to_string()))?
            .insert(key.to_string(), (content_type.to_string(), data));
        Ok(format!("memory://{}", key))
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.objects
            .lock()
            .map_err(|_| AppError::Internal("Media store lock poisoned".to_string()))?
            .remove(key);
        Ok(())
    }

    fn complaint_key(&self, user_id: Uuid, extension: &str) -> String {
        format!("public/complaints/{}/{}.{}", user_id, Uuid::now_v7(), extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_put_and_remove() {
        let store = MemoryMediaStore::new();
        let user_id = Uuid::new_v4();
        let key = store.complaint_key(user_id, "png");

        assert!(key.starts_with(&format!("public/complaints/{}/", user_id)));
        assert!(key.ends_with(".png"));

        let url = store.put(&key, vec![1, 2, 3], "image/png").await.unwrap();
        assert_eq!(url, format!("memory://{}", key));
        assert_eq!(store.get(&key), Some(("image/png".to_string(), vec![1, 2, 3])));

        store.remove(&key).await.unwrap();
        assert!(store.is_empty());
    }
}
