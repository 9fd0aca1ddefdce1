// src/local/tests.rs
//!
//! Tests for local file operations
//!

use super::*;
use crate::location::resolver::probe_kind;
use base64::{engine::general_purpose::STANDARD, Engine};
use encoding_rs::UTF_8;
use std::path::PathBuf;
use tempfile::TempDir;

/// Resolves `path` the way the resolver would, probing its current kind.
fn at(path: impl Into<PathBuf>) -> LocalUri {
    let full_path = path.into();
    LocalUri {
        file_uri: url::Url::from_file_path(&full_path).unwrap().to_string(),
        kind: probe_kind(&full_path),
        full_path,
        in_external_storage: true,
    }
}

fn utf8() -> ReadOptions {
    ReadOptions::with_encoding(Encoding::Charset(UTF_8))
}

// ============================================================================
// Create Tests
// ============================================================================

#[test]
fn test_create_file_requires_parent() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("a").join("b.txt");

    assert!(matches!(
        create_file(&at(&target), false),
        Err(FsError::NoParentDirectory { .. })
    ));

    create_file(&at(&target), true).unwrap();
    assert!(target.is_file());
    assert_eq!(fs::read(&target).unwrap(), b"");
}

#[test]
fn test_create_file_already_exists() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("here.txt");
    fs::write(&target, b"x").unwrap();

    assert!(matches!(
        create_file(&at(&target), false),
        Err(FsError::AlreadyExists { .. })
    ));
}

#[test]
fn test_create_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("x").join("y");

    assert!(matches!(
        create_directory(&at(&nested), false),
        Err(FsError::NoParentDirectory { .. })
    ));
    create_directory(&at(&nested), true).unwrap();
    assert!(nested.is_dir());

    assert!(matches!(
        create_directory(&at(&nested), true),
        Err(FsError::AlreadyExists { .. })
    ));
}

// ============================================================================
// Delete Tests
// ============================================================================

#[test]
fn test_delete_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("gone.txt");
    fs::write(&target, b"x").unwrap();

    delete(&at(&target), false).unwrap();
    assert!(!target.exists());
    assert!(matches!(
        delete(&at(&target), false),
        Err(FsError::DoesNotExist { .. })
    ));
}

#[test]
fn test_delete_non_empty_directory() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("full");
    fs::create_dir(&folder).unwrap();
    fs::write(folder.join("inner.txt"), b"x").unwrap();

    assert!(matches!(
        delete(&at(&folder), false),
        Err(FsError::DirectoryNotEmpty { .. })
    ));
    delete(&at(&folder), true).unwrap();
    assert!(!folder.exists());
}

#[test]
fn test_delete_empty_directory() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("empty");
    fs::create_dir(&folder).unwrap();

    delete(&at(&folder), false).unwrap();
    assert!(!folder.exists());
}

// ============================================================================
// Read / Save Tests
// ============================================================================

#[test]
fn test_save_base64_then_read_text() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("new").join("hello.txt");

    let options = SaveOptions {
        encoding: Encoding::Base64,
        mode: SaveMode::Write,
        create_if_missing: Some(true),
    };
    save(&at(&target), "SGVsbG8=", &options).unwrap();

    let read_options = ReadOptions {
        offset: 0,
        length: crate::read::ReadLength::Limited(5),
        ..utf8()
    };
    assert_eq!(read(&at(&target), &read_options).unwrap(), "Hello");
}

fn creating(recursive: bool) -> SaveOptions {
    SaveOptions {
        create_if_missing: Some(recursive),
        ..Default::default()
    }
}

#[test]
fn test_save_missing_target_requires_opt_in() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("new.txt");

    assert!(matches!(
        save(&at(&target), "data", &SaveOptions::default()),
        Err(FsError::DoesNotExist { .. })
    ));
    assert!(!target.exists());

    save(&at(&target), "data", &creating(false)).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "data");

    // Existing files need no opt-in
    save(&at(&target), "again", &SaveOptions::default()).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "again");
}

#[test]
fn test_save_missing_parent_without_recursive() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("nope").join("file.txt");

    assert!(matches!(
        save(&at(&target), "data", &creating(false)),
        Err(FsError::NoParentDirectory { .. })
    ));
    assert!(!target.exists());

    save(&at(&target), "data", &creating(true)).unwrap();
    assert!(target.is_file());
}

#[test]
fn test_save_write_truncates_and_append_preserves() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("log.txt");

    save(&at(&target), "first line that is long", &creating(false)).unwrap();
    save(&at(&target), "short", &SaveOptions::default()).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "short");

    let append = SaveOptions {
        mode: SaveMode::Append,
        ..Default::default()
    };
    save(&at(&target), "\nmore", &append).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "short\nmore");
}

#[test]
fn test_save_data_url() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("pixel.bin");
    let payload = STANDARD.encode([0u8, 1, 2, 255]);

    let options = SaveOptions {
        encoding: Encoding::Base64,
        ..creating(false)
    };
    let data = format!("data:application/octet-stream;base64, {payload}");
    save(&at(&target), &data, &options).unwrap();
    assert_eq!(fs::read(&target).unwrap(), vec![0u8, 1, 2, 255]);
}

#[test]
fn test_save_invalid_base64_leaves_file_alone() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("keep.txt");
    fs::write(&target, b"original").unwrap();

    let options = SaveOptions {
        encoding: Encoding::Base64,
        ..Default::default()
    };
    assert!(matches!(
        save(&at(&target), "***", &options),
        Err(FsError::InvalidArgument { .. })
    ));
    assert_eq!(fs::read(&target).unwrap(), b"original");
}

#[test]
fn test_save_onto_directory() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        save(&at(dir.path()), "x", &SaveOptions::default()),
        Err(FsError::NotAFile { .. })
    ));
}

#[test]
fn test_read_errors() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        read(&at(dir.path()), &utf8()),
        Err(FsError::NotAFile { .. })
    ));
    assert!(matches!(
        read(&at(dir.path().join("missing.txt")), &utf8()),
        Err(FsError::DoesNotExist { .. })
    ));
}

#[test]
fn test_read_in_chunks_empty_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("empty.txt");
    fs::write(&target, b"").unwrap();

    let chunks: Vec<String> = read_in_chunks(&at(&target), &utf8())
        .unwrap()
        .collect::<FsResult<_>>()
        .unwrap();
    assert_eq!(chunks, vec![String::new()]);
}

// ============================================================================
// Metadata / List Tests
// ============================================================================

#[test]
fn test_metadata_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("photo.png");
    fs::write(&target, b"12345").unwrap();

    let meta = metadata(&at(&target)).unwrap();
    assert_eq!(meta.name, "photo.png");
    assert_eq!(meta.size, 5);
    assert_eq!(meta.full_path, target.to_string_lossy());
    assert!(meta.uri.starts_with("file://"));
    assert!(meta.last_modified > 0);
    assert_eq!(
        meta.kind,
        crate::metadata::FileKind::File {
            mime_type: "image/png".to_string()
        }
    );
}

#[test]
fn test_metadata_missing() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        metadata(&at(dir.path().join("nope"))),
        Err(FsError::DoesNotExist { .. })
    ));
}

#[test]
fn test_list_sorted_directories_first() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.txt"), b"b").unwrap();
    fs::write(dir.path().join("A.txt"), b"a").unwrap();
    fs::create_dir(dir.path().join("zeta")).unwrap();

    let names: Vec<String> = list(&at(dir.path()))
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["zeta", "A.txt", "b.txt"]);
}

#[test]
fn test_list_file_fails() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("f.txt");
    fs::write(&target, b"x").unwrap();

    assert!(matches!(list(&at(&target)), Err(FsError::NotADirectory { .. })));
}

// ============================================================================
// Copy / Move Tests
// ============================================================================

#[test]
fn test_copy_move_mixed_kinds_matrix() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("file.txt");
    let folder = dir.path().join("folder");
    fs::write(&file, b"x").unwrap();
    fs::create_dir(&folder).unwrap();

    for (source, destination) in [(&file, &folder), (&folder, &file)] {
        assert!(matches!(
            copy(&at(source), &at(destination)),
            Err(FsError::MixedFileAndDirectory { .. })
        ));
        assert!(matches!(
            rename(&at(source), &at(destination)),
            Err(FsError::MixedFileAndDirectory { .. })
        ));
    }
}

#[test]
fn test_copy_directory_onto_existing_directory() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::create_dir(&a).unwrap();
    fs::create_dir(&b).unwrap();

    assert!(matches!(
        copy(&at(&a), &at(&b)),
        Err(FsError::DestinationAlreadyExists { .. })
    ));
}

#[test]
fn test_move_directory_onto_itself_is_noop() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("same");
    fs::create_dir(&folder).unwrap();
    fs::write(folder.join("keep.txt"), b"keep").unwrap();

    rename(&at(&folder), &at(&folder)).unwrap();
    assert_eq!(fs::read(folder.join("keep.txt")).unwrap(), b"keep");
}

#[test]
fn test_copy_file_onto_itself_keeps_content() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("self.txt");
    fs::write(&file, b"content").unwrap();

    copy(&at(&file), &at(&file)).unwrap();
    assert_eq!(fs::read(&file).unwrap(), b"content");
}

#[test]
fn test_copy_missing_source_or_parent() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("src.txt");

    assert!(matches!(
        copy(&at(&file), &at(dir.path().join("dst.txt"))),
        Err(FsError::DoesNotExist { .. })
    ));

    fs::write(&file, b"x").unwrap();
    assert!(matches!(
        copy(&at(&file), &at(dir.path().join("no").join("dst.txt"))),
        Err(FsError::NoParentDirectory { .. })
    ));
}

#[test]
fn test_copy_file_overwrites_file() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("src.txt");
    let destination = dir.path().join("dst.txt");
    fs::write(&source, b"new").unwrap();
    fs::write(&destination, b"old and longer").unwrap();

    copy(&at(&source), &at(&destination)).unwrap();
    assert_eq!(fs::read(&destination).unwrap(), b"new");
    assert!(source.exists());
}

#[test]
fn test_copy_directory_tree() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("tree");
    fs::create_dir_all(source.join("sub")).unwrap();
    fs::write(source.join("top.txt"), b"top").unwrap();
    fs::write(source.join("sub").join("deep.txt"), b"deep").unwrap();

    let destination = dir.path().join("copy");
    copy(&at(&source), &at(&destination)).unwrap();

    assert_eq!(fs::read(destination.join("top.txt")).unwrap(), b"top");
    assert_eq!(fs::read(destination.join("sub").join("deep.txt")).unwrap(), b"deep");
    assert!(source.join("top.txt").exists());
}

#[test]
fn test_move_file_and_directory() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("from.txt");
    fs::write(&file, b"moving").unwrap();
    let moved = dir.path().join("to.txt");

    rename(&at(&file), &at(&moved)).unwrap();
    assert!(!file.exists());
    assert_eq!(fs::read(&moved).unwrap(), b"moving");

    let folder = dir.path().join("folder");
    fs::create_dir(&folder).unwrap();
    fs::write(folder.join("inside.txt"), b"in").unwrap();
    let moved_folder = dir.path().join("renamed");

    rename(&at(&folder), &at(&moved_folder)).unwrap();
    assert!(!folder.exists());
    assert_eq!(fs::read(moved_folder.join("inside.txt")).unwrap(), b"in");
}
