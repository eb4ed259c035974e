use super::*;

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_store_set_then_get() {
    let mut store = MemoryStore::default();
    store.set("auth_token", "tok-1");
    assert_eq!(store.get("auth_token").as_deref(), Some("tok-1"));
}

#[test]
fn memory_store_missing_key_is_none() {
    let store = MemoryStore::default();
    assert!(store.get("user").is_none());
}

#[test]
fn memory_store_remove_clears_key() {
    let mut store = MemoryStore::default();
    store.set("isDemo", "1");
    store.remove("isDemo");
    assert!(store.get("isDemo").is_none());
}

#[test]
fn memory_store_overwrite_replaces_value() {
    let mut store = MemoryStore::default();
    store.set("currentRole", "user");
    store.set("currentRole", "admin");
    assert_eq!(store.get("currentRole").as_deref(), Some("admin"));
}

#[test]
fn memory_store_clones_share_backing_map() {
    let mut store = MemoryStore::default();
    let viewer = store.clone();
    store.set("user", "{}");
    assert_eq!(viewer.get("user").as_deref(), Some("{}"));
}

// =============================================================
// BrowserStorage (no browser in native tests)
// =============================================================

#[test]
fn browser_storage_degrades_without_a_window() {
    let mut store = BrowserStorage;
    store.set("user", "{}");
    assert!(store.get("user").is_none());
    store.remove("user");
}
