use marknote_core::db::{open_db, open_db_in_memory, DbError};
use marknote_core::{
    KeyValueStore, NoteDraft, NotebookRepository, NotebookService, SqliteKeyValueStore,
    StoreError, Tag, NOTES_KEY, TAGS_KEY,
};
use std::cell::Cell;
use std::rc::Rc;

fn memory_store() -> SqliteKeyValueStore {
    SqliteKeyValueStore::new(open_db_in_memory().unwrap())
}

fn draft(title: &str, tags: Vec<Tag>) -> NoteDraft {
    NoteDraft {
        title: title.to_string(),
        body: "body".to_string(),
        tags,
    }
}

#[test]
fn first_open_binds_empty_collections_and_writes_nothing() {
    let repo = NotebookRepository::open(memory_store()).unwrap();
    assert!(repo.raw_notes().is_empty());
    assert!(repo.tags().is_empty());

    let store = repo.into_store();
    assert_eq!(store.get(NOTES_KEY).unwrap(), None);
    assert_eq!(store.get(TAGS_KEY).unwrap(), None);
}

#[test]
fn reload_preserves_collections_of_zero_one_and_many() {
    for count in [0usize, 1, 17] {
        let mut repo = NotebookRepository::open(memory_store()).unwrap();
        let tag = Tag::new("persisted");
        repo.add_tag(tag.clone()).unwrap();
        for idx in 0..count {
            repo.create_note(&draft(&format!("note {idx}"), vec![tag.clone()]))
                .unwrap();
        }
        let notes_before = repo.raw_notes().to_vec();
        let tags_before = repo.tags().to_vec();

        let reopened = NotebookRepository::open(repo.into_store()).unwrap();
        assert_eq!(reopened.raw_notes(), notes_before.as_slice());
        assert_eq!(reopened.tags(), tags_before.as_slice());
    }
}

#[test]
fn reload_works_across_a_real_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("marknote.db");

    let mut repo =
        NotebookRepository::open(SqliteKeyValueStore::new(open_db(&path).unwrap())).unwrap();
    let tag = Tag::new("durable");
    repo.add_tag(tag.clone()).unwrap();
    repo.create_note(&draft("survives restart", vec![tag])).unwrap();
    drop(repo);

    let reopened =
        NotebookRepository::open(SqliteKeyValueStore::new(open_db(&path).unwrap())).unwrap();
    assert_eq!(reopened.raw_notes().len(), 1);
    assert_eq!(reopened.raw_notes()[0].title, "survives restart");
    assert_eq!(reopened.tags().len(), 1);
}

#[test]
fn stored_shape_matches_the_legacy_json_layout() {
    let mut repo = NotebookRepository::open(memory_store()).unwrap();
    let tag = Tag::new("layout");
    repo.add_tag(tag.clone()).unwrap();
    repo.create_note(&draft("shape", vec![tag.clone()])).unwrap();

    let store = repo.into_store();
    let notes_json: serde_json::Value =
        serde_json::from_str(&store.get(NOTES_KEY).unwrap().unwrap()).unwrap();
    let tags_json: serde_json::Value =
        serde_json::from_str(&store.get(TAGS_KEY).unwrap().unwrap()).unwrap();

    let note = &notes_json.as_array().unwrap()[0];
    assert!(note.get("id").unwrap().is_string());
    assert_eq!(note.get("title").unwrap(), "shape");
    assert_eq!(
        note.get("tagIds").unwrap().as_array().unwrap()[0],
        serde_json::Value::String(tag.id.to_string())
    );

    let stored_tag = &tags_json.as_array().unwrap()[0];
    assert_eq!(stored_tag.get("label").unwrap(), "layout");
}

#[test]
fn legacy_stored_data_decodes_unchanged() {
    let mut store = memory_store();
    store
        .set(
            TAGS_KEY,
            r#"[{"id":"f3b9c0d4-9a1e-4f6b-8c2d-1e5a7b9c0d42","label":"inbox"}]"#,
        )
        .unwrap();
    store
        .set(
            NOTES_KEY,
            r##"[{"id":"0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9","title":"old","body":"# md","tagIds":["f3b9c0d4-9a1e-4f6b-8c2d-1e5a7b9c0d42"]}]"##,
        )
        .unwrap();

    let repo = NotebookRepository::open(store).unwrap();
    assert_eq!(repo.raw_notes()[0].title, "old");
    assert_eq!(repo.raw_notes()[0].tag_ids[0], repo.tags()[0].id);
}

#[test]
fn corrupt_stored_value_fails_open_and_is_preserved() {
    let mut store = memory_store();
    store.set(NOTES_KEY, "{definitely not an array").unwrap();

    let err = NotebookRepository::open(store).expect_err("corrupt notes must fail open");
    let message = err.to_string();
    assert!(message.contains("NOTES"), "unexpected error: {message}");
    assert!(message.contains("corrupt"), "unexpected error: {message}");
}

#[test]
fn missing_key_and_corrupt_value_are_distinguishable() {
    // Missing key: default, no error.
    assert!(NotebookRepository::open(memory_store()).is_ok());

    // Corrupt value: a reported condition, not a silent default.
    let mut store = memory_store();
    store.set(TAGS_KEY, "42").unwrap();
    assert!(NotebookRepository::open(store).is_err());
}

/// Test double that can be switched to reject writes, for atomicity checks.
struct FailingStore {
    inner: SqliteKeyValueStore,
    fail_writes: Rc<Cell<bool>>,
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Db(DbError::Sqlite(
                rusqlite::Error::InvalidQuery,
            )));
        }
        self.inner.set(key, value)
    }
}

#[test]
fn failed_write_leaves_memory_and_store_at_prior_state() {
    let fail_writes = Rc::new(Cell::new(false));
    let store = FailingStore {
        inner: memory_store(),
        fail_writes: Rc::clone(&fail_writes),
    };
    let mut repo = NotebookRepository::open(store).unwrap();
    repo.create_note(&draft("committed", vec![])).unwrap();
    let notes_before = repo.raw_notes().to_vec();
    let version_before = repo.notes_version();

    fail_writes.set(true);
    repo.create_note(&draft("never lands", vec![]))
        .expect_err("write should fail");

    assert_eq!(repo.raw_notes(), notes_before.as_slice());
    assert_eq!(repo.notes_version(), version_before);

    fail_writes.set(false);
    let stored = repo.into_store().inner.get(NOTES_KEY).unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}

#[test]
fn flush_is_a_safe_noop_after_synchronous_mutations() {
    let mut repo = NotebookRepository::open(memory_store()).unwrap();
    repo.create_note(&draft("flushed", vec![])).unwrap();

    let before = {
        let store = repo.into_store();
        let text = store.get(NOTES_KEY).unwrap().unwrap();
        repo = NotebookRepository::open(store).unwrap();
        text
    };

    repo.flush().unwrap();
    let after = repo.into_store().get(NOTES_KEY).unwrap().unwrap();
    assert_eq!(before, after);
}

#[test]
fn service_close_flushes_and_hands_back_the_store() {
    let mut service = NotebookService::open(memory_store()).unwrap();
    service
        .create_note(&draft("closed over", vec![]))
        .unwrap();

    let store = service.close().unwrap();
    let mut reopened = NotebookService::open(store).unwrap();
    assert_eq!(reopened.notes_with_tags().len(), 1);
}
