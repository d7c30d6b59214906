use dirdiff::cli::DedupeArgs;
use dirdiff::config::Config;
use dirdiff::logging::RecordingSink;
use dirdiff::run_dedupe;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn search_only(dir: &Path) -> DedupeArgs {
    DedupeArgs {
        src_only: Some(dir.to_path_buf()),
        ..Default::default()
    }
}

#[test]
fn test_single_file_is_not_its_own_duplicate() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("only.txt"), b"lonely").unwrap();
    let sink = RecordingSink::new();

    let summary = run_dedupe(&search_only(dir.path()), &Config::default(), &sink).unwrap();

    assert_eq!(summary.duplicates, 0);
    assert_eq!(summary.scanned, 1);
    assert!(sink.warnings().is_empty());
    assert!(dir.path().join("only.txt").exists());
}

#[test]
fn test_same_name_in_two_folders_counted_once() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("backup");
    fs::create_dir(&sub).unwrap();
    fs::write(dir.path().join("report.pdf"), b"quarterly").unwrap();
    fs::write(sub.join("report.pdf"), b"quarterly").unwrap();
    let sink = RecordingSink::new();

    let summary = run_dedupe(&search_only(dir.path()), &Config::default(), &sink).unwrap();

    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.scanned, 2);
    assert!(sink.warnings().is_empty());
}

#[test]
fn test_content_pass_keeps_one_copy_of_three() {
    let dir = tempdir().unwrap();
    for name in ["one.bin", "two.bin", "three.bin"] {
        fs::write(dir.path().join(name), b"identical bytes").unwrap();
    }
    let mut args = search_only(dir.path());
    args.match_content = true;
    args.del_dupe_src = true;

    let summary = run_dedupe(&args, &Config::default(), &RecordingSink::new()).unwrap();

    let remaining = fs::read_dir(dir.path()).unwrap().count();
    assert!(summary.deleted >= 1);
    assert!(remaining >= 1);
    assert_eq!(remaining, 3 - summary.deleted);
}

#[test]
fn test_prefix_pass_warns_on_self_match() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scan.png");
    fs::write(&path, b"pixels").unwrap();
    let mut args = search_only(dir.path());
    args.match_prefix = true;
    let sink = RecordingSink::new();

    let summary = run_dedupe(&args, &Config::default(), &sink).unwrap();

    assert_eq!(summary.duplicates, 0);
    assert_eq!(
        sink.warnings(),
        vec![dirdiff::duplicates::finder::self_match_warning(2, &path)]
    );
}
