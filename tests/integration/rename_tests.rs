use dirdiff::cli::RenameArgs;
use dirdiff::config::Config;
use dirdiff::logging::RecordingSink;
use dirdiff::run_rename;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_rename_run_with_filter() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("20210101_000001.jpg"), b"a").unwrap();
    fs::write(dir.path().join("VID_20210102_120000.mp4"), b"b").unwrap();
    let args = RenameArgs {
        src: dir.path().to_path_buf(),
        filter: Some("*.jpg".to_string()),
    };
    let sink = RecordingSink::new();

    let summary = run_rename(&args, &Config::default(), &sink).unwrap();

    assert_eq!(summary.scanned, 1);
    assert_eq!(summary.renamed, 1);
    assert!(dir.path().join("2021-01-01 00-00-01_(mob)_.jpg").exists());
    assert!(dir.path().join("VID_20210102_120000.mp4").exists());
    assert!(sink
        .infos()
        .iter()
        .any(|line| line.starts_with("Is mobile :20210101_000001.jpg -> ")));
}

#[test]
fn test_rename_run_is_idempotent() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("VID_20210102_120000.mp4"), b"b").unwrap();
    let args = RenameArgs {
        src: dir.path().to_path_buf(),
        filter: None,
    };

    let first = run_rename(&args, &Config::default(), &RecordingSink::new()).unwrap();
    let second = run_rename(&args, &Config::default(), &RecordingSink::new()).unwrap();

    assert_eq!(first.renamed, 1);
    assert_eq!(second.renamed, 0);
    assert!(dir.path().join("2021-01-02 12-00-00_(mob)_.mp4").exists());
}

#[test]
fn test_rename_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let args = RenameArgs {
        src: dir.path().join("absent"),
        filter: None,
    };

    assert!(run_rename(&args, &Config::default(), &RecordingSink::new()).is_err());
}
