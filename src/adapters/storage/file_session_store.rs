//! File-based Session Store Adapter
//!
//! Stores each session as `<dir>/<name>.json`, a pretty-printed JSON array
//! of turns. Writes go to a temporary file that is renamed into place, and
//! every operation on a session holds that session's lock, so concurrent
//! appends to the same session are serialized. A lock is dropped from the
//! map once no operation holds or waits on it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::session::{SessionName, Turn};
use crate::ports::{SessionStore, SessionStoreError};

/// File-based storage for session transcripts
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
    locks: Arc<Mutex<HashMap<SessionName, Arc<Mutex<()>>>>>,
}

impl FileSessionStore {
    /// Create a new file store with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::new("./data/sessions");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn session_path(&self, name: &SessionName) -> PathBuf {
        self.base_path.join(format!("{}.json", name))
    }

    /// The lock guarding one session's file. Hand it back with [`Self::release`].
    async fn lock_for(&self, name: &SessionName) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(name.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Forgets a session's lock when the map and `lock` are its only owners.
    async fn release(&self, name: &SessionName, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        if Arc::strong_count(&lock) == 2 {
            locks.remove(name);
        }
    }

    async fn ensure_dir(&self) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }

    /// Reads a session; `None` if the file does not exist. Caller holds the lock.
    async fn read_turns(&self, name: &SessionName) -> Result<Option<Vec<Turn>>, SessionStoreError> {
        let json = match fs::read_to_string(self.session_path(name)).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionStoreError::IoError(e.to_string())),
        };

        let turns = serde_json::from_str(&json).map_err(|e| {
            SessionStoreError::DeserializationFailed {
                name: name.clone(),
                reason: e.to_string(),
            }
        })?;

        Ok(Some(turns))
    }

    /// Replaces a session file atomically. Caller holds the lock.
    async fn write_turns(&self, name: &SessionName, turns: &[Turn]) -> Result<(), SessionStoreError> {
        self.ensure_dir().await?;

        let json = serde_json::to_string_pretty(turns)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        let tmp_path = self
            .base_path
            .join(format!(".{}.{}.tmp", name, Uuid::new_v4()));

        replace_file(&tmp_path, &self.session_path(name), json.as_bytes())
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }

    async fn append_locked(
        &self,
        name: &SessionName,
        turns: &[Turn],
    ) -> Result<usize, SessionStoreError> {
        let mut existing = self.read_turns(name).await?.unwrap_or_default();
        existing.extend_from_slice(turns);
        self.write_turns(name, &existing).await?;
        Ok(existing.len())
    }
}

/// Writes `contents` to `tmp_path` and renames it over `path`. The temporary
/// file is removed if either step fails.
async fn replace_file(tmp_path: &Path, path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let result = match fs::write(tmp_path, contents).await {
        Ok(()) => fs::rename(tmp_path, path).await,
        Err(e) => Err(e),
    };
    if result.is_err() {
        let _ = fs::remove_file(tmp_path).await;
    }
    result
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn list(&self) -> Result<Vec<SessionName>, SessionStoreError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SessionStoreError::IoError(e.to_string())),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            // Files that are not valid session names were not written by us.
            if let Some(name) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| SessionName::new(stem).ok())
            {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    async fn load(&self, name: &SessionName) -> Result<Vec<Turn>, SessionStoreError> {
        let lock = self.lock_for(name).await;
        let turns = {
            let _guard = lock.lock().await;
            self.read_turns(name).await
        };
        self.release(name, lock).await;

        turns?.ok_or_else(|| SessionStoreError::NotFound(name.clone()))
    }

    async fn save(&self, name: &SessionName, turns: &[Turn]) -> Result<(), SessionStoreError> {
        let lock = self.lock_for(name).await;
        let result = {
            let _guard = lock.lock().await;
            self.write_turns(name, turns).await
        };
        self.release(name, lock).await;

        result
    }

    async fn append(&self, name: &SessionName, turns: &[Turn]) -> Result<usize, SessionStoreError> {
        let lock = self.lock_for(name).await;
        let result = {
            let _guard = lock.lock().await;
            self.append_locked(name, turns).await
        };
        self.release(name, lock).await;

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn name(s: &str) -> SessionName {
        SessionName::new(s).unwrap()
    }

    fn tmp_files(dir: &Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok()?.file_name().into_string().ok())
            .filter(|file| file.ends_with(".tmp"))
            .collect()
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        let turns = vec![Turn::user("area of circle: 2"), Turn::assistant("12.5664")];

        store.save(&name("geo"), &turns).await.unwrap();

        assert_eq!(store.load(&name("geo")).await.unwrap(), turns);
        assert!(temp_dir.path().join("geo.json").exists());
    }

    #[tokio::test]
    async fn file_is_a_pretty_json_array_of_turns() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        store.save(&name("s1"), &[Turn::user("hi")]).await.unwrap();

        let raw = std::fs::read_to_string(temp_dir.path().join("s1.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!([{"role": "user", "content": "hi"}]));
        assert!(raw.contains('\n'));
    }

    #[tokio::test]
    async fn load_missing_session_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        let err = store.load(&name("absent")).await.unwrap_err();
        assert!(matches!(err, SessionStoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn save_overwrites_wholesale() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        store
            .save(&name("s"), &[Turn::user("a"), Turn::assistant("b")])
            .await
            .unwrap();
        store.save(&name("s"), &[Turn::user("c")]).await.unwrap();

        assert_eq!(store.load(&name("s")).await.unwrap(), vec![Turn::user("c")]);
    }

    #[tokio::test]
    async fn append_creates_and_extends() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("nested"));

        assert_eq!(store.append(&name("s"), &[Turn::user("a")]).await.unwrap(), 1);
        assert_eq!(
            store.append(&name("s"), &[Turn::assistant("b")]).await.unwrap(),
            2
        );
        assert_eq!(
            store.load(&name("s")).await.unwrap(),
            vec![Turn::user("a"), Turn::assistant("b")]
        );
    }

    #[tokio::test]
    async fn concurrent_appends_are_not_lost() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .append(&name("busy"), &[Turn::user(format!("q{}", i))])
                        .await
                        .unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.load(&name("busy")).await.unwrap().len(), 20);
        assert!(store.locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn locks_are_dropped_after_each_operation() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        for i in 0..50 {
            let session = name(&format!("s{}", i));
            store.append(&session, &[Turn::user("q")]).await.unwrap();
            store.load(&session).await.unwrap();
        }
        let _ = store.load(&name("absent")).await;

        assert!(store.locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn failed_rename_removes_the_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        // A non-empty directory where the session file should go.
        std::fs::create_dir_all(temp_dir.path().join("taken.json").join("inner")).unwrap();

        let err = store.save(&name("taken"), &[Turn::user("q")]).await.unwrap_err();

        assert!(matches!(err, SessionStoreError::IoError(_)));
        assert_eq!(tmp_files(temp_dir.path()), Vec::<String>::new());
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn failed_write_removes_the_temp_file() {
        if !Path::new("/dev/full").exists() {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        let tmp_path = temp_dir.path().join(".s.tmp");
        // Every write to /dev/full fails with ENOSPC.
        std::os::unix::fs::symlink("/dev/full", &tmp_path).unwrap();

        let result = replace_file(&tmp_path, &temp_dir.path().join("s.json"), b"[]").await;

        assert!(result.is_err());
        assert!(std::fs::symlink_metadata(&tmp_path).is_err());
        assert!(!temp_dir.path().join("s.json").exists());
    }

    #[tokio::test]
    async fn list_returns_sorted_session_names() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        store.save(&name("zeta"), &[]).await.unwrap();
        store.save(&name("alpha"), &[]).await.unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(store.list().await.unwrap(), vec![name("alpha"), name("zeta")]);
    }

    #[tokio::test]
    async fn list_of_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("never-created"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_deserialization_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("bad.json"), "{oops").unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        let err = store.load(&name("bad")).await.unwrap_err();
        assert!(matches!(err, SessionStoreError::DeserializationFailed { .. }));
    }
}
