use std::fs;

use temple_shooter::high_scores::*;

fn filled_store(scores: &[u32]) -> HighScoreStore {
    let mut store = HighScoreStore::in_memory();
    for &score in scores {
        store.add_score(score, 1);
    }
    store
}

fn scores_of(store: &HighScoreStore) -> Vec<u32> {
    store.list().iter().map(|r| r.score).collect()
}

// ── Ranking ───────────────────────────────────────────────────────────────────

#[test]
fn empty_store() {
    let store = HighScoreStore::in_memory();
    assert!(store.list().is_empty());
    assert_eq!(store.best(), 0);
    assert!(store.qualifies(0));
}

#[test]
fn scores_kept_in_descending_order() {
    let store = filled_store(&[50, 300, 120, 10]);
    assert_eq!(scores_of(&store), vec![300, 120, 50, 10]);
    assert_eq!(store.best(), 300);
}

#[test]
fn table_holds_eight() {
    let store = filled_store(&[10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    assert_eq!(store.list().len(), CAPACITY);
    assert_eq!(scores_of(&store), vec![100, 90, 80, 70, 60, 50, 40, 30]);
}

#[test]
fn low_score_rejected_when_full() {
    let mut store = filled_store(&[10, 20, 30, 40, 50, 60, 70, 80]);
    assert!(!store.qualifies(5));
    assert!(!store.add_score(5, 1));
    // Ties with the lowest entry do not displace it.
    assert!(!store.add_score(10, 1));
    assert!(store.add_score(15, 2));
    assert_eq!(store.list().last().map(|r| r.score), Some(15));
}

#[test]
fn ties_keep_older_record_first() {
    let mut store = HighScoreStore::in_memory();
    store.add_score(100, 1);
    store.add_score(100, 2);
    let levels: Vec<u32> = store.list().iter().map(|r| r.level).collect();
    assert_eq!(levels, vec![1, 2]);
}

#[test]
fn clear_empties_the_table() {
    let mut store = filled_store(&[10, 20]);
    store.clear();
    assert!(store.list().is_empty());
}

// ── File backend ──────────────────────────────────────────────────────────────

#[test]
fn file_store_persists_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.ron");

    let mut store = HighScoreStore::file(&path);
    store.add_score(250, 2);
    store.add_score(900, 3);
    drop(store);

    let reopened = HighScoreStore::file(&path);
    assert_eq!(scores_of(&reopened), vec![900, 250]);
    assert_eq!(reopened.list()[0].level, 3);
}

#[test]
fn missing_file_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileBackend::new(dir.path().join("nope.ron"));
    assert_eq!(backend.load().unwrap(), Vec::new());
}

#[test]
fn save_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("scores.ron");
    let mut store = HighScoreStore::file(&path);
    store.add_score(42, 1);
    assert!(path.exists());
}

#[test]
fn corrupt_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.ron");
    fs::write(&path, "this is not ron [[[").unwrap();

    let backend = FileBackend::new(&path);
    assert!(matches!(backend.load(), Err(StoreError::Serialization(_))));

    let mut store = HighScoreStore::file(&path);
    assert!(store.list().is_empty());
    // The next save overwrites the broken file.
    store.add_score(10, 1);
    assert_eq!(scores_of(&HighScoreStore::file(&path)), vec![10]);
}

#[test]
fn unsorted_file_is_sorted_and_truncated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.ron");
    let records: Vec<ScoreRecord> = (1..=10)
        .map(|i| ScoreRecord {
            score: i * 10,
            level: 1,
            recorded_at: 0,
        })
        .collect();
    let mut backend = FileBackend::new(&path);
    backend.save(&records).unwrap();

    let store = HighScoreStore::file(&path);
    assert_eq!(store.list().len(), CAPACITY);
    assert_eq!(store.best(), 100);
    assert_eq!(store.list().last().map(|r| r.score), Some(30));
}
