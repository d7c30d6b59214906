use dirdiff::duplicates::{DuplicateMap, MatchConfig, MatchEngine, BYTES_PER_MB};
use dirdiff::logging::RecordingSink;
use dirdiff::scanner::{FileEntry, Walker, WalkerConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn list(dir: &Path) -> Vec<FileEntry> {
    Walker::new(dir, WalkerConfig::default())
        .collect_files()
        .unwrap()
}

fn run(src: &Path, dest: &Path, config: MatchConfig, sink: &RecordingSink) -> DuplicateMap {
    let engine = MatchEngine::new(config, sink);
    let (map, _) = engine.run(&list(src), &list(dest)).unwrap();
    map
}

#[test]
fn test_exact_name_duplicate() {
    let src = tempdir().unwrap();
    let dest = tempdir().unwrap();
    fs::write(src.path().join("a.txt"), b"hello").unwrap();
    fs::write(dest.path().join("a.txt"), b"hello").unwrap();
    let sink = RecordingSink::new();

    let map = run(src.path(), dest.path(), MatchConfig::default(), &sink);

    assert_eq!(map.len(), 1);
    let pair = map.iter().next().unwrap();
    assert_eq!(pair.source, src.path().join("a.txt"));
    assert_eq!(pair.destination, dest.path().join("a.txt"));
    assert_eq!(map.total_bytes(), 5);

    let summary = dirdiff::actions::resolve(&map, 1, false, &sink).unwrap();
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.total_mb(), 0);
    assert!(sink
        .infos()
        .contains(&"- Dupe data...  0 MB".to_string()));
}

#[test]
fn test_exact_name_found_in_subdirectory() {
    let src = tempdir().unwrap();
    let dest = tempdir().unwrap();
    let nested = dest.path().join("2020").join("May");
    fs::create_dir_all(&nested).unwrap();
    fs::write(src.path().join("img_1.jpg"), b"pic").unwrap();
    fs::write(nested.join("img_1.jpg"), b"pic").unwrap();

    let map = run(
        src.path(),
        dest.path(),
        MatchConfig::default(),
        &RecordingSink::new(),
    );

    assert_eq!(map.len(), 1);
    assert_eq!(
        map.iter().next().unwrap().destination,
        nested.join("img_1.jpg")
    );
}

#[test]
fn test_content_check_rejects_same_name_different_size() {
    let src = tempdir().unwrap();
    let dest = tempdir().unwrap();
    fs::write(src.path().join("x.jpg"), [1u8; 5]).unwrap();
    fs::write(dest.path().join("x.jpg"), [1u8; 10]).unwrap();

    let map = run(
        src.path(),
        dest.path(),
        MatchConfig::default().with_content(true),
        &RecordingSink::new(),
    );

    assert!(map.is_empty());
}

#[test]
fn test_prefix_match_same_size() {
    let src = tempdir().unwrap();
    let dest = tempdir().unwrap();
    fs::write(src.path().join("img001.jpg"), [7u8; 100]).unwrap();
    fs::write(dest.path().join("img001_edited.jpg"), [7u8; 100]).unwrap();

    let map = run(
        src.path(),
        dest.path(),
        MatchConfig::default().with_prefix(true),
        &RecordingSink::new(),
    );

    assert_eq!(map.len(), 1);
    assert_eq!(
        map.iter().next().unwrap().destination,
        dest.path().join("img001_edited.jpg")
    );
}

#[test]
fn test_prefix_match_size_mismatch_warns() {
    let src = tempdir().unwrap();
    let dest = tempdir().unwrap();
    let source = src.path().join("img001.jpg");
    let destination = dest.path().join("img001_edited.jpg");
    fs::write(&source, [7u8; 100]).unwrap();
    fs::write(&destination, [7u8; 99]).unwrap();
    let sink = RecordingSink::new();

    let map = run(
        src.path(),
        dest.path(),
        MatchConfig::default().with_prefix(true),
        &sink,
    );

    assert!(map.is_empty());
    assert_eq!(
        sink.warnings(),
        vec![format!(
            "Skipping prefix matched files with diff content lengths, {}",
            source.display()
        )]
    );
    assert!(sink
        .infos()
        .contains(&format!("- {} => {}", source.display(), destination.display())));
}

#[test]
fn test_content_match_renamed_file() {
    let src = tempdir().unwrap();
    let dest = tempdir().unwrap();
    fs::write(src.path().join("DSC_0001.jpg"), b"same picture bytes").unwrap();
    fs::write(dest.path().join("beach.jpg"), b"same picture bytes").unwrap();
    fs::write(dest.path().join("other.jpg"), b"different bytes!!!").unwrap();

    let map = run(
        src.path(),
        dest.path(),
        MatchConfig::default().with_content(true),
        &RecordingSink::new(),
    );

    assert_eq!(map.len(), 1);
    assert_eq!(
        map.iter().next().unwrap().destination,
        dest.path().join("beach.jpg")
    );
}

#[test]
fn test_zero_length_sources_not_matched_by_content() {
    let src = tempdir().unwrap();
    let dest = tempdir().unwrap();
    fs::write(src.path().join("empty.log"), b"").unwrap();
    fs::write(dest.path().join("blank.log"), b"").unwrap();

    let map = run(
        src.path(),
        dest.path(),
        MatchConfig::default().with_content(true),
        &RecordingSink::new(),
    );

    assert!(map.is_empty());
}

#[test]
fn test_min_size_boundary() {
    let src = tempdir().unwrap();
    let dest = tempdir().unwrap();
    let just_under = vec![0u8; (BYTES_PER_MB - 1) as usize];
    let exact = vec![0u8; BYTES_PER_MB as usize];
    fs::write(src.path().join("under.bin"), &just_under).unwrap();
    fs::write(dest.path().join("under.bin"), &just_under).unwrap();
    fs::write(src.path().join("exact.bin"), &exact).unwrap();
    fs::write(dest.path().join("exact.bin"), &exact).unwrap();

    let map = run(
        src.path(),
        dest.path(),
        MatchConfig::default().with_min_size_mb(1),
        &RecordingSink::new(),
    );

    assert_eq!(map.len(), 1);
    assert!(map.contains_source(&src.path().join("exact.bin")));
    assert!(!map.contains_source(&src.path().join("under.bin")));
}

#[test]
fn test_rerun_produces_same_map() {
    let src = tempdir().unwrap();
    let dest = tempdir().unwrap();
    fs::write(src.path().join("a.txt"), b"alpha").unwrap();
    fs::write(src.path().join("clip.mov"), b"movie").unwrap();
    fs::write(src.path().join("renamed.jpg"), b"photo bytes").unwrap();
    fs::write(dest.path().join("a.txt"), b"alpha").unwrap();
    fs::write(dest.path().join("clip_trimmed.mov"), b"movie").unwrap();
    fs::write(dest.path().join("holiday.jpg"), b"photo bytes").unwrap();
    let config = MatchConfig::default().with_prefix(true).with_content(true);

    let first = run(src.path(), dest.path(), config.clone(), &RecordingSink::new());
    let second = run(src.path(), dest.path(), config, &RecordingSink::new());

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}
