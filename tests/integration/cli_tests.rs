use clap::Parser;
use dupclean::cli::Cli;
use dupclean::error::ExitCode;
use dupclean::run_with;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn fixture(root: &Path) {
    fs::write(root.join("a.txt"), b"hello").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/b.txt"), b"hello").unwrap();
    fs::write(root.join("sub/c.txt"), b"world").unwrap();
}

fn run(args: &[&str], input: &str) -> (anyhow::Result<ExitCode>, String) {
    let mut argv = vec!["dupclean"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();

    let mut out = Vec::new();
    let result = run_with(cli, input.as_bytes(), &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_report_only_text_output() {
    let dir = tempdir().unwrap();
    fixture(dir.path());
    let root = dir.path().to_str().unwrap();

    let (result, out) = run(&["-q", "-p", root], "");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.starts_with("Files found: 3\n"));
    assert!(out.contains(&format!(
        "Duplicate: {} (of {})",
        dir.path().join("sub/b.txt").display(),
        dir.path().join("a.txt").display()
    )));
    assert!(dir.path().join("sub/b.txt").exists());
}

#[test]
fn test_delete_with_yes_skips_prompt() {
    let dir = tempdir().unwrap();
    fixture(dir.path());
    let root = dir.path().to_str().unwrap();

    let (result, out) = run(&["-q", "-p", root, "-f", "-y"], "");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.contains("Deleted 1 file(s)"));
    assert!(!dir.path().join("sub/b.txt").exists());
    assert!(dir.path().join("a.txt").exists());
}

#[test]
fn test_delete_confirmed_at_prompt() {
    let dir = tempdir().unwrap();
    fixture(dir.path());
    let root = dir.path().to_str().unwrap();

    let (result, _) = run(&["-q", "-p", root, "-f"], "YES\n");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(!dir.path().join("sub/b.txt").exists());
}

#[test]
fn test_delete_declined_at_prompt_reports_only() {
    let dir = tempdir().unwrap();
    fixture(dir.path());
    let root = dir.path().to_str().unwrap();

    let (result, out) = run(&["-q", "-p", root, "-f"], "yes\n");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(!out.contains("Deleted"));
    assert!(dir.path().join("sub/b.txt").exists());
}

#[test]
fn test_no_duplicates_exit_code() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("one"), b"1").unwrap();
    fs::write(dir.path().join("two"), b"2").unwrap();

    let (result, _) = run(&["-q", "-p", dir.path().to_str().unwrap()], "");

    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
}

#[test]
fn test_json_output() {
    let dir = tempdir().unwrap();
    fixture(dir.path());
    let root = dir.path().to_str().unwrap();

    let (result, out) = run(&["-p", root, "-o", "json", "-f", "-y"], "");
    assert_eq!(result.unwrap(), ExitCode::Success);

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["summary"]["total_files"], 3);
    assert_eq!(value["summary"]["unique_files"], 2);
    assert_eq!(value["summary"]["duplicate_files"], 1);
    assert_eq!(value["summary"]["deleted"], 1);
    assert_eq!(value["summary"]["exit_code"], 0);
    assert_eq!(value["summary"]["exit_code_name"], "DC000");
    assert_eq!(
        value["duplicates"][0]["original"],
        dir.path().join("a.txt").to_str().unwrap()
    );
    assert_eq!(value["deletion"]["confirmed"], true);
    assert_eq!(value["deletion"]["outcomes"][0]["deleted"], true);
}

#[test]
fn test_missing_root_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");

    let (result, out) = run(&["-q", "-p", missing.to_str().unwrap()], "");

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("Path not found"));
    assert!(out.is_empty());
}

#[test]
fn test_empty_directory_exit_code() {
    let dir = tempdir().unwrap();

    let (result, out) = run(&["-q", "-p", dir.path().to_str().unwrap(), "-f", "-y"], "");

    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
    assert!(out.starts_with("Files found: 0\n"));
}
