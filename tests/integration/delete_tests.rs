use dupclean::actions::{delete_all, DeleteConfig, DeletionError};
use dupclean::duplicates::{DuplicateEntry, DuplicateFinder, FinderConfig};
use dupclean::progress::LogReporter;
use dupclean::scanner::{fingerprint_bytes, FileEntry};
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_confirmed_run_removes_only_the_duplicate() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", b"hello");
    write(dir.path(), "sub/b.txt", b"hello");
    write(dir.path(), "sub/c.txt", b"world");

    let report = DuplicateFinder::new(FinderConfig::default())
        .run(dir.path(), true)
        .unwrap();

    assert!(report.deletion.confirmed);
    assert_eq!(report.deletion.deleted_count(), 1);
    assert_eq!(report.deletion.failed_count(), 0);
    assert_eq!(report.deletion.bytes_freed(), 5);

    assert!(dir.path().join("a.txt").exists());
    assert!(!dir.path().join("sub/b.txt").exists());
    assert!(dir.path().join("sub/c.txt").exists());
}

#[test]
fn test_unconfirmed_run_mutates_nothing() {
    let dir = tempdir().unwrap();
    for i in 0..10 {
        write(dir.path(), &format!("copy{i}.txt"), b"same");
    }

    let report = DuplicateFinder::new(FinderConfig::default())
        .run(dir.path(), false)
        .unwrap();

    assert_eq!(report.duplicate_count(), 9);
    assert!(!report.deletion.confirmed);
    assert!(report.deletion.outcomes.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 10);
}

#[test]
fn test_every_duplicate_removed_across_threads() {
    let dir = tempdir().unwrap();
    for i in 0..64 {
        write(dir.path(), &format!("dir{}/f{}.bin", i % 8, i), &[(i % 3) as u8; 128]);
    }

    let config = FinderConfig::default().with_threads(4);
    let report = DuplicateFinder::new(config).run(dir.path(), true).unwrap();

    assert_eq!(report.unique_count(), 3);
    assert_eq!(report.deletion.deleted_count(), 61);
    for unique in &report.classification.unique {
        assert!(unique.path.exists());
    }
    for dup in &report.classification.duplicates {
        assert!(!dup.file.path.exists());
    }

    // A second run sees only the survivors
    let rerun = DuplicateFinder::new(FinderConfig::default())
        .run(dir.path(), true)
        .unwrap();
    assert_eq!(rerun.total_files, 3);
    assert_eq!(rerun.duplicate_count(), 0);
}

#[test]
fn test_failed_removal_does_not_stop_siblings() {
    let dir = tempdir().unwrap();
    write(dir.path(), "keep.txt", b"x");
    write(dir.path(), "one.txt", b"x");
    write(dir.path(), "two.txt", b"x");

    let entry = |name: &str| DuplicateEntry {
        file: FileEntry::new(dir.path().join(name), 1, SystemTime::now()),
        fingerprint: fingerprint_bytes(b"x"),
        original: dir.path().join("keep.txt"),
    };
    let duplicates = vec![entry("one.txt"), entry("vanished.txt"), entry("two.txt")];

    let report = delete_all(&duplicates, true, &DeleteConfig::default(), &LogReporter);

    assert_eq!(report.deleted_count(), 2);
    assert_eq!(report.failed_count(), 1);
    assert!(matches!(
        report.outcomes[1].result,
        Err(DeletionError::NotFound(ref p)) if p == &dir.path().join("vanished.txt")
    ));
    assert!(!dir.path().join("one.txt").exists());
    assert!(!dir.path().join("two.txt").exists());
    assert!(dir.path().join("keep.txt").exists());
}

#[test]
fn test_single_worker_pool() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a", b"dup");
    write(dir.path(), "b", b"dup");
    write(dir.path(), "c", b"dup");

    let report = DuplicateFinder::new(FinderConfig::default().with_threads(1))
        .run(dir.path(), true)
        .unwrap();

    assert_eq!(report.deletion.deleted_count(), 2);
    assert!(dir.path().join("a").exists());
}
