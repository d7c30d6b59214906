use clap::Parser;
use dirdiff::cli::{Cli, DedupeArgs};
use dirdiff::config::{Config, DedupePlan};
use dirdiff::error::{ConfigError, ExitCode, StructuredError};
use dirdiff::logging::RecordingSink;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_run_app_success_exit_code() {
    let src = tempdir().unwrap();
    let dest = tempdir().unwrap();
    fs::write(src.path().join("a.txt"), b"hello").unwrap();

    let cli = Cli::try_parse_from([
        "dirdiff",
        "-q",
        "dedupe",
        "--src",
        src.path().to_str().unwrap(),
        "--dest",
        dest.path().to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(dirdiff::run_app(cli).unwrap(), ExitCode::Success);
}

#[test]
fn test_run_app_missing_destination_fails() {
    let src = tempdir().unwrap();
    let cli = Cli::try_parse_from([
        "dirdiff",
        "-q",
        "dedupe",
        "--src",
        src.path().to_str().unwrap(),
    ])
    .unwrap();

    let err = dirdiff::run_app(cli).unwrap_err();

    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::MissingDestination)
    );
    let structured = StructuredError::new(&err, ExitCode::GeneralError);
    assert_eq!(structured.code, "DD001");
    assert_eq!(structured.exit_code, 1);
    assert_eq!(structured.message, "Expected non empty --dest");
}

#[test]
fn test_run_app_missing_source_tree_fails() {
    let dest = tempdir().unwrap();
    let missing = dest.path().join("nope");
    let cli = Cli::try_parse_from([
        "dirdiff",
        "-q",
        "dedupe",
        "--src",
        missing.to_str().unwrap(),
        "--dest",
        dest.path().to_str().unwrap(),
    ])
    .unwrap();

    let err = dirdiff::run_app(cli).unwrap_err();

    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::NotADirectory(missing))
    );
}

#[test]
fn test_defaults_file_drives_plan() {
    let home = tempdir().unwrap();
    let tree = tempdir().unwrap();
    let path = home.path().join("config.json");
    fs::write(&path, r#"{ "default_filter": "*.mp4", "default_min_size_mb": 2 }"#).unwrap();
    let defaults = Config::load_from(&path).unwrap();
    let args = DedupeArgs {
        src_only: Some(tree.path().to_path_buf()),
        ..Default::default()
    };

    let plan = DedupePlan::from_args(&args, &defaults, &RecordingSink::new()).unwrap();

    assert_eq!(plan.filter, "*.mp4");
    assert_eq!(plan.matching.min_size_mb, 2);
    assert!(plan.matching.search_only);
}
