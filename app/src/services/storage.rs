use axum::body::Bytes;
use std::path::PathBuf;
use tokio::fs;

/// a key to store uploaded images
///
/// this joins into the relative path `folder`/`filename`, which is the
/// value persisted on the owning entity row, eg: `station/1/b1f2.jpeg`
#[derive(Clone)]
pub struct StorageKey {
    /// the "folder" a file using this key will be stored into, eg: `station/1`
    pub folder: String,

    /// filename with extension, eg: `b1f2.jpeg`
    pub filename: String,
}

impl From<StorageKey> for String {
    fn from(v: StorageKey) -> Self {
        format!("{}/{}", v.folder, v.filename)
    }
}

/// Local disk image storage under a configured base directory
#[derive(Clone)]
pub struct Storage {
    base_dir: PathBuf,
}

impl Storage {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// path of a stored object under the base directory from its key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }

    pub async fn upload(&self, key: String, bytes: Bytes) -> std::io::Result<()> {
        let path = self.path_for(&key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let result = fs::write(&path, &bytes).await;

        if result.is_err() {
            tracing::error!("[STORAGE] failed to write object: {}", key);
        }

        result
    }

    pub async fn delete(&self, key: String) -> std::io::Result<()> {
        let result = fs::remove_file(self.path_for(&key)).await;

        if result.is_err() {
            tracing::error!("[STORAGE] failed to delete object: {}", key);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_storage() -> Storage {
        let base_dir = std::env::temp_dir().join(format!("cps-storage-test-{}", Uuid::new_v4()));
        Storage::new(base_dir)
    }

    #[tokio::test]
    async fn uploaded_bytes_round_trip_through_the_key() {
        let storage = test_storage();

        let key = String::from(StorageKey {
            folder: String::from("user/1"),
            filename: String::from("avatar.png"),
        });

        storage
            .upload(key.clone(), Bytes::from_static(b"png bytes"))
            .await
            .unwrap();

        let written = tokio::fs::read(storage.path_for(&key)).await.unwrap();
        assert_eq!(written, b"png bytes");
    }

    #[tokio::test]
    async fn delete_removes_the_stored_object() {
        let storage = test_storage();

        let key = String::from(StorageKey {
            folder: String::from("station/3"),
            filename: String::from("image.jpeg"),
        });

        storage
            .upload(key.clone(), Bytes::from_static(b"jpeg bytes"))
            .await
            .unwrap();

        storage.delete(key.clone()).await.unwrap();
        assert!(!storage.path_for(&key).exists());
    }

    #[tokio::test]
    async fn deleting_a_missing_object_fails() {
        let storage = test_storage();

        let deleted = storage.delete(String::from("user/9/gone.png")).await;
        assert!(deleted.is_err());
    }
}
