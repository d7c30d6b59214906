use dirdiff::cli::DedupeArgs;
use dirdiff::config::Config;
use dirdiff::logging::RecordingSink;
use dirdiff::run_dedupe;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_report_mode_deletes_nothing() {
    let src = tempdir().unwrap();
    let dest = tempdir().unwrap();
    fs::write(src.path().join("a.txt"), b"hello").unwrap();
    fs::write(dest.path().join("a.txt"), b"hello").unwrap();
    let args = DedupeArgs {
        src: Some(src.path().to_path_buf()),
        dest: Some(dest.path().to_path_buf()),
        ..Default::default()
    };
    let sink = RecordingSink::new();

    let summary = run_dedupe(&args, &Config::default(), &sink).unwrap();

    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.deleted, 0);
    assert!(src.path().join("a.txt").exists());
    let infos = sink.infos();
    assert_eq!(
        infos[0],
        format!(
            "0 MB \"{}\" => \"{}\"",
            src.path().join("a.txt").display(),
            dest.path().join("a.txt").display()
        )
    );
    assert_eq!(infos[2], "- Dupe files... 1/1");
    assert!(infos.last().unwrap().starts_with("Duration "));
}

#[test]
fn test_delete_mode_removes_only_sources() {
    let src = tempdir().unwrap();
    let dest = tempdir().unwrap();
    fs::write(src.path().join("a.txt"), b"hello").unwrap();
    fs::write(src.path().join("new.txt"), b"not in dest").unwrap();
    fs::write(src.path().join("IMG_9.jpg"), b"jpeg bytes").unwrap();
    fs::write(dest.path().join("a.txt"), b"hello").unwrap();
    fs::write(dest.path().join("IMG_9 (copy).jpg"), b"jpeg bytes").unwrap();
    let args = DedupeArgs {
        src: Some(src.path().to_path_buf()),
        dest: Some(dest.path().to_path_buf()),
        del_dupe_src: true,
        match_prefix: true,
        ..Default::default()
    };

    let summary = run_dedupe(&args, &Config::default(), &RecordingSink::new()).unwrap();

    assert_eq!(summary.deleted, 2);
    assert!(!src.path().join("a.txt").exists());
    assert!(!src.path().join("IMG_9.jpg").exists());
    assert!(src.path().join("new.txt").exists());
    assert!(dest.path().join("a.txt").exists());
    assert!(dest.path().join("IMG_9 (copy).jpg").exists());
}

#[test]
fn test_filter_limits_both_trees() {
    let src = tempdir().unwrap();
    let dest = tempdir().unwrap();
    for name in ["a.jpg", "a.txt"] {
        fs::write(src.path().join(name), b"same").unwrap();
        fs::write(dest.path().join(name), b"same").unwrap();
    }
    let args = DedupeArgs {
        src: Some(src.path().to_path_buf()),
        dest: Some(dest.path().to_path_buf()),
        filter: Some("*.JPG".to_string()),
        del_dupe_src: true,
        ..Default::default()
    };

    let summary = run_dedupe(&args, &Config::default(), &RecordingSink::new()).unwrap();

    assert_eq!(summary.scanned, 1);
    assert_eq!(summary.deleted, 1);
    assert!(!src.path().join("a.jpg").exists());
    assert!(src.path().join("a.txt").exists());
}
