use dupclean::duplicates::{classify, DuplicateFinder, FinderConfig};
use dupclean::progress::LogReporter;
use dupclean::scanner::{fingerprint_bytes, Walker, WalkerConfig};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap().write_all(content).unwrap();
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let report = DuplicateFinder::new(FinderConfig::default())
        .run(dir.path(), true)
        .unwrap();

    assert_eq!(report.total_files, 0);
    assert!(report.classification.unique.is_empty());
    assert!(report.classification.duplicates.is_empty());
    assert!(report.deletion.outcomes.is_empty());
}

#[test]
fn test_scan_reference_scenario() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", b"hello");
    write(dir.path(), "sub/b.txt", b"hello");
    write(dir.path(), "sub/c.txt", b"world");

    let report = DuplicateFinder::new(FinderConfig::default())
        .run(dir.path(), false)
        .unwrap();

    assert_eq!(report.total_files, 3);

    let unique: Vec<_> = report
        .classification
        .unique
        .iter()
        .map(|f| f.path.clone())
        .collect();
    assert_eq!(
        unique,
        vec![dir.path().join("a.txt"), dir.path().join("sub/c.txt")]
    );

    let dups = &report.classification.duplicates;
    assert_eq!(dups.len(), 1);
    assert_eq!(dups[0].file.path, dir.path().join("sub/b.txt"));
    assert_eq!(dups[0].original, dir.path().join("a.txt"));
    assert_eq!(dups[0].fingerprint, fingerprint_bytes(b"hello"));

    // Nothing was touched
    assert!(dir.path().join("sub/b.txt").exists());
}

#[test]
fn test_entries_are_walked_in_name_order() {
    let dir = tempdir().unwrap();
    write(dir.path(), "b_dir/x.txt", b"hello");
    write(dir.path(), "c.txt", b"hello");

    let report = DuplicateFinder::new(FinderConfig::default())
        .run(dir.path(), false)
        .unwrap();

    // b_dir sorts before c.txt, so its contents are enumerated first
    assert_eq!(report.classification.unique[0].path, dir.path().join("b_dir/x.txt"));
    assert_eq!(
        report.classification.duplicates[0].file.path,
        dir.path().join("c.txt")
    );
    assert_eq!(
        report.classification.duplicates[0].original,
        dir.path().join("b_dir/x.txt")
    );
}

#[test]
fn test_sibling_directories_in_name_order() {
    let dir = tempdir().unwrap();
    write(dir.path(), "b/copy.txt", b"same");
    write(dir.path(), "a/copy.txt", b"same");
    write(dir.path(), "c/copy.txt", b"same");

    let report = DuplicateFinder::new(FinderConfig::default())
        .run(dir.path(), false)
        .unwrap();

    assert_eq!(report.classification.unique[0].path, dir.path().join("a/copy.txt"));
    let dup_paths: Vec<_> = report
        .classification
        .duplicates
        .iter()
        .map(|d| d.file.path.clone())
        .collect();
    assert_eq!(
        dup_paths,
        vec![dir.path().join("b/copy.txt"), dir.path().join("c/copy.txt")]
    );
}

#[test]
fn test_empty_files_are_duplicates_of_each_other() {
    let dir = tempdir().unwrap();
    write(dir.path(), "empty1", b"");
    write(dir.path(), "empty2", b"");

    let report = DuplicateFinder::new(FinderConfig::default())
        .run(dir.path(), false)
        .unwrap();

    assert_eq!(report.unique_count(), 1);
    assert_eq!(report.duplicate_count(), 1);
}

#[test]
fn test_file_removed_before_fingerprinting() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", b"hello");
    write(dir.path(), "b.txt", b"hello");
    write(dir.path(), "c.txt", b"world");

    let files = Walker::new(dir.path(), WalkerConfig::default())
        .walk(&LogReporter)
        .unwrap();
    assert_eq!(files.len(), 3);

    fs::remove_file(dir.path().join("a.txt")).unwrap();
    let result = classify(files, &LogReporter);

    assert_eq!(result.read_errors.len(), 1);
    assert_eq!(result.read_errors[0].path(), dir.path().join("a.txt"));
    // b.txt is now the first readable "hello"
    let unique: Vec<_> = result.unique.iter().map(|f| f.path.clone()).collect();
    assert_eq!(unique, vec![dir.path().join("b.txt"), dir.path().join("c.txt")]);
    assert!(result.duplicates.is_empty());
}

#[test]
fn test_unique_and_duplicates_partition_the_file_list() {
    let dir = tempdir().unwrap();
    for i in 0..30 {
        write(
            dir.path(),
            &format!("d{}/f{}.dat", i % 4, i),
            format!("content-{}", i % 7).as_bytes(),
        );
    }

    let report = DuplicateFinder::new(FinderConfig::default())
        .run(dir.path(), false)
        .unwrap();

    assert_eq!(report.total_files, 30);
    assert_eq!(report.unique_count() + report.duplicate_count(), 30);
    assert_eq!(report.unique_count(), 7);

    for dup in &report.classification.duplicates {
        assert!(report
            .classification
            .unique
            .iter()
            .any(|u| u.path == dup.original));
        assert_ne!(dup.file.path, dup.original);
    }
}

#[test]
fn test_repeated_scans_agree() {
    let dir = tempdir().unwrap();
    write(dir.path(), "x/1", b"one");
    write(dir.path(), "x/2", b"two");
    write(dir.path(), "y/1", b"one");
    write(dir.path(), "3", b"two");

    let finder = DuplicateFinder::new(FinderConfig::default());
    let first = finder.run(dir.path(), false).unwrap();
    let second = finder.run(dir.path(), false).unwrap();

    assert_eq!(first.classification.unique, second.classification.unique);
    assert_eq!(first.classification.duplicates, second.classification.duplicates);
}
