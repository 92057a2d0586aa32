use std::{hash::Hash, path::{Path, PathBuf}, sync::Arc};
use indexmap::IndexMap;
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Keeps an insertion-ordered `IndexMap<K, V>` in memory and rewrites the
/// whole file after every mutation. The file is a JSON object whose key order
/// is the insertion order, so reloading preserves it. Mutations hold the write lock across the file write, so writers
/// are serialized and the file always reflects a committed map.
pub struct JsonMapStore<K, V> {
    inner: RwLock<IndexMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Open the store at `path`, creating the file with an empty map if missing.
    /// A file that exists but does not parse is an error rather than data loss.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(ServiceError::db)?;
        }

        let map: IndexMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => IndexMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Db(format!("corrupt store file {}: {e}", file_path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: IndexMap<K, V> = IndexMap::new();
                write_atomic(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(ServiceError::db(e)),
        };

        Ok(Arc::new(Self { inner: RwLock::new(map), file_path }))
    }

    /// All values, oldest insert first.
    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// First value matching `pred`.
    pub async fn find<F>(&self, pred: F) -> Option<V>
    where
        F: Fn(&V) -> bool,
    {
        let map = self.inner.read().await;
        map.values().find(|v| pred(v)).cloned()
    }

    /// Apply a mutation under the write lock and persist it.
    ///
    /// If `f` fails or the file write fails, the in-memory map is rolled back
    /// and memory and file stay identical.
    pub async fn update_map<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut IndexMap<K, V>) -> Result<R, ServiceError>,
    {
        let mut map = self.inner.write().await;
        let snapshot = map.clone();
        let out = match f(&mut map) {
            Ok(out) => out,
            Err(e) => {
                *map = snapshot;
                return Err(e);
            }
        };
        if let Err(e) = write_atomic(&self.file_path, &*map).await {
            *map = snapshot;
            return Err(e);
        }
        Ok(out)
    }
}

/// Write to a sibling temp file then rename over the target.
async fn write_atomic<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(value).map_err(ServiceError::db)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, data).await.map_err(ServiceError::db)?;
    fs::rename(&tmp, path).await.map_err(ServiceError::db)?;
    Ok(())
}
