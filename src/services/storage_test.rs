use super::*;

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("cloudcycle-storage-{}", uuid::Uuid::new_v4()));
        Self(dir)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

// =============================================================================
// validate_key
// =============================================================================

#[test]
fn validate_key_accepts_simple_names() {
    assert!(validate_key("cloudcycle_user").is_ok());
    assert!(validate_key("a-b-1").is_ok());
}

#[test]
fn validate_key_rejects_path_traversal() {
    assert!(matches!(validate_key("../etc/passwd"), Err(StorageError::InvalidKey(_))));
    assert!(matches!(validate_key("a/b"), Err(StorageError::InvalidKey(_))));
}

#[test]
fn validate_key_rejects_empty() {
    assert!(matches!(validate_key(""), Err(StorageError::InvalidKey(_))));
}

// =============================================================================
// MemoryStorage
// =============================================================================

#[test]
fn memory_get_missing_is_none() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("missing").unwrap(), None);
}

#[test]
fn memory_set_then_get() {
    let storage = MemoryStorage::new();
    storage.set("k", "v1").unwrap();
    storage.set("k", "v2").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));
}

#[test]
fn memory_remove_missing_is_ok() {
    let storage = MemoryStorage::new();
    assert!(storage.remove("nothing").is_ok());
}

#[test]
fn memory_clones_share_state() {
    let a = MemoryStorage::new();
    let b = a.clone();
    a.set("k", "shared").unwrap();
    assert_eq!(b.get("k").unwrap().as_deref(), Some("shared"));
    b.remove("k").unwrap();
    assert_eq!(a.get("k").unwrap(), None);
}

// =============================================================================
// FileStorage
// =============================================================================

#[test]
fn file_get_before_directory_exists_is_none() {
    let tmp = TempDir::new();
    let storage = FileStorage::new(&tmp.0);
    assert_eq!(storage.get("cloudcycle_user").unwrap(), None);
}

#[test]
fn file_set_creates_directory_and_persists() {
    let tmp = TempDir::new();
    let storage = FileStorage::new(&tmp.0);
    storage.set("cloudcycle_user", "{\"id\":\"x\"}").unwrap();
    assert!(tmp.0.join("cloudcycle_user.json").exists());

    let reopened = FileStorage::new(&tmp.0);
    assert_eq!(reopened.get("cloudcycle_user").unwrap().as_deref(), Some("{\"id\":\"x\"}"));
}

#[test]
fn file_remove_deletes_record() {
    let tmp = TempDir::new();
    let storage = FileStorage::new(&tmp.0);
    storage.set("k", "v").unwrap();
    storage.remove("k").unwrap();
    assert_eq!(storage.get("k").unwrap(), None);
    assert!(storage.remove("k").is_ok());
}

#[test]
fn file_rejects_invalid_key() {
    let tmp = TempDir::new();
    let storage = FileStorage::new(&tmp.0);
    assert!(matches!(storage.set("../escape", "v"), Err(StorageError::InvalidKey(_))));
}
