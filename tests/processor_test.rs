use globset::GlobSet;
use piranhito::error::Error;
use piranhito::ignore::parse_ignore_file;
use piranhito::pipeline::{Engine, Pipeline};
use piranhito::processor::{read_source, write_atomically, BatchOptions, FileOperation, Processor, Summary};
use piranhito::ProfileRegistry;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const TAGGED: &str = "start()\n/*Piranhito?@-Logger-S@85Lbt3@*/trace()\n/*Piranhito?@-Logger-E@85Lbt3@*/end()\n";
const STRIPPED: &str = "start()\nend()\n";

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn run_batch(
    registry: &ProfileRegistry,
    root: &Path,
    pipeline: Pipeline,
    options: BatchOptions,
) -> Summary {
    let ignored = parse_ignore_file(root).unwrap();
    let engine = Engine::new(registry, StdRng::seed_from_u64(0));
    let mut processor = Processor::new(engine, "Orientamento", pipeline, root, &ignored).unwrap();
    processor.run(options).unwrap()
}

#[test_log::test]
fn test_transform_tree_matches_expected() {
    let registry = ProfileRegistry::builtin().unwrap();
    let actual = TempDir::new().unwrap();
    let expected = TempDir::new().unwrap();

    write(actual.path(), "Main.swift", TAGGED.as_bytes());
    write(actual.path(), "app.js", TAGGED.as_bytes());
    write(actual.path(), "Info.json", TAGGED.as_bytes());
    write(actual.path(), "README.md", TAGGED.as_bytes());
    write(actual.path(), "Clean.swift", STRIPPED.as_bytes());

    write(expected.path(), "Main.swift", STRIPPED.as_bytes());
    write(expected.path(), "app.js", STRIPPED.as_bytes());
    // Data files only take the copyright pipeline.
    write(expected.path(), "Info.json", TAGGED.as_bytes());
    write(expected.path(), "README.md", TAGGED.as_bytes());
    write(expected.path(), "Clean.swift", STRIPPED.as_bytes());

    let summary = run_batch(&registry, actual.path(), Pipeline::Transform, BatchOptions::default());

    assert_eq!(
        summary,
        Summary {
            processed: 3,
            changed: 2,
            failed: 0
        }
    );
    assert!(!dir_diff::is_different(actual.path(), expected.path()).unwrap());
}

#[test]
fn test_copyright_batch_touches_data_files() {
    let registry = ProfileRegistry::builtin().unwrap();
    let root = TempDir::new().unwrap();
    write(root.path(), "Info.json", b"// Created by xxx yyy\n");
    write(root.path(), "it.strings", b"\"ok\" = \"ok\";\nLogger.log\n");

    let summary = run_batch(&registry, root.path(), Pipeline::Copyright, BatchOptions::default());

    assert_eq!(summary.processed, 2);
    assert_eq!(
        fs::read_to_string(root.path().join("Info.json")).unwrap(),
        "// Created by xxx yyy zzz\n"
    );
    assert_eq!(
        fs::read_to_string(root.path().join("it.strings")).unwrap(),
        "\"ok\" = \"ok\";\n"
    );
}

#[test_log::test]
fn test_encoding_failure_does_not_stop_batch() {
    let registry = ProfileRegistry::builtin().unwrap();
    let root = TempDir::new().unwrap();
    write(root.path(), "A.swift", &[0x66, 0x6f, 0xff, 0xfe, 0x0a]);
    write(root.path(), "B.swift", TAGGED.as_bytes());

    let summary = run_batch(&registry, root.path(), Pipeline::Transform, BatchOptions::default());

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.processed, 1);
    assert_eq!(fs::read(root.path().join("A.swift")).unwrap(), vec![0x66, 0x6f, 0xff, 0xfe, 0x0a]);
    assert_eq!(fs::read_to_string(root.path().join("B.swift")).unwrap(), STRIPPED);
}

#[test]
fn test_non_recursive_by_default() {
    let registry = ProfileRegistry::builtin().unwrap();
    let root = TempDir::new().unwrap();
    write(root.path(), "Top.swift", TAGGED.as_bytes());
    write(root.path(), "Nested/Deep.swift", TAGGED.as_bytes());

    run_batch(&registry, root.path(), Pipeline::Transform, BatchOptions::default());
    assert_eq!(fs::read_to_string(root.path().join("Top.swift")).unwrap(), STRIPPED);
    assert_eq!(fs::read_to_string(root.path().join("Nested/Deep.swift")).unwrap(), TAGGED);

    let options = BatchOptions {
        recursive: true,
        dry_run: false,
    };
    run_batch(&registry, root.path(), Pipeline::Transform, options);
    assert_eq!(fs::read_to_string(root.path().join("Nested/Deep.swift")).unwrap(), STRIPPED);
}

#[test]
fn test_ignore_file_and_defaults() {
    let registry = ProfileRegistry::builtin().unwrap();
    let root = TempDir::new().unwrap();
    write(root.path(), ".piranhitoignore", b"# generated code\nGenerated/**\nKeep.swift\n");
    write(root.path(), "Keep.swift", TAGGED.as_bytes());
    write(root.path(), "Generated/Api.swift", TAGGED.as_bytes());
    write(root.path(), ".git/hooks.swift", TAGGED.as_bytes());
    write(root.path(), "Main.swift", TAGGED.as_bytes());

    let options = BatchOptions {
        recursive: true,
        dry_run: false,
    };
    let summary = run_batch(&registry, root.path(), Pipeline::Transform, options);

    assert_eq!(summary.processed, 1);
    assert_eq!(fs::read_to_string(root.path().join("Main.swift")).unwrap(), STRIPPED);
    assert_eq!(fs::read_to_string(root.path().join("Keep.swift")).unwrap(), TAGGED);
    assert_eq!(fs::read_to_string(root.path().join("Generated/Api.swift")).unwrap(), TAGGED);
    assert_eq!(fs::read_to_string(root.path().join(".git/hooks.swift")).unwrap(), TAGGED);
}

#[test]
fn test_dry_run_writes_nothing() {
    let registry = ProfileRegistry::builtin().unwrap();
    let root = TempDir::new().unwrap();
    write(root.path(), "Main.swift", TAGGED.as_bytes());

    let options = BatchOptions {
        recursive: false,
        dry_run: true,
    };
    let summary = run_batch(&registry, root.path(), Pipeline::Transform, options);

    assert_eq!(summary.changed, 1);
    assert_eq!(fs::read_to_string(root.path().join("Main.swift")).unwrap(), TAGGED);
}

#[test]
fn test_process_single_file() {
    let registry = ProfileRegistry::builtin().unwrap();
    let root = TempDir::new().unwrap();
    write(root.path(), "Main.swift", TAGGED.as_bytes());
    write(root.path(), "Clean.swift", STRIPPED.as_bytes());

    let ignored = GlobSet::empty();
    let engine = Engine::new(&registry, StdRng::seed_from_u64(0));
    let mut processor =
        Processor::new(engine, "Orientamento", Pipeline::Transform, root.path(), &ignored).unwrap();

    let main = root.path().join("Main.swift");
    let result = processor.process(&main).unwrap();
    assert_eq!(
        result.operation,
        Some(FileOperation::Write {
            target: main.clone(),
            content: STRIPPED.to_string()
        })
    );
    // Nothing is written until the operation is applied.
    assert_eq!(fs::read_to_string(&main).unwrap(), TAGGED);

    let clean = processor.process(&root.path().join("Clean.swift")).unwrap();
    assert_eq!(clean.operation, Some(FileOperation::Unchanged));

    let skipped = processor.process(root.path()).unwrap();
    assert_eq!(skipped.operation, None);
}

#[test]
fn test_unknown_profile_fails_before_any_file() {
    let registry = ProfileRegistry::builtin().unwrap();
    let root = TempDir::new().unwrap();
    write(root.path(), "Main.swift", TAGGED.as_bytes());

    let ignored = GlobSet::empty();
    let engine = Engine::new(&registry, StdRng::seed_from_u64(0));
    let result = Processor::new(engine, "Missing", Pipeline::Transform, root.path(), &ignored);

    assert!(matches!(result, Err(Error::UnknownProfile { .. })));
    assert_eq!(fs::read_to_string(root.path().join("Main.swift")).unwrap(), TAGGED);
}

#[test]
fn test_write_atomically_replaces_content() {
    let root = TempDir::new().unwrap();
    let path = root.path().join("Main.swift");
    fs::write(&path, "old").unwrap();

    write_atomically(&path, "new").unwrap();

    assert_eq!(read_source(&path).unwrap(), "new");
    let leftovers: Vec<_> = fs::read_dir(root.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}

#[test]
fn test_read_source_rejects_invalid_utf8() {
    let root = TempDir::new().unwrap();
    let path = root.path().join("Broken.swift");
    fs::write(&path, [0xc3, 0x28]).unwrap();

    match read_source(&path) {
        Err(Error::EncodingError { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected EncodingError, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_write_atomically_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let root = TempDir::new().unwrap();
    let path = root.path().join("run.js");
    fs::write(&path, "x").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

    write_atomically(&path, "y").unwrap();

    assert_eq!(read_source(&path).unwrap(), "y");
    assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o755);
}

#[cfg(unix)]
#[test]
fn test_batch_keeps_executable_scripts_executable() {
    use std::os::unix::fs::PermissionsExt;

    let registry = ProfileRegistry::builtin().unwrap();
    let root = TempDir::new().unwrap();
    write(root.path(), "run.js", TAGGED.as_bytes());
    let script = root.path().join("run.js");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o750)).unwrap();

    let summary = run_batch(&registry, root.path(), Pipeline::Transform, BatchOptions::default());

    assert_eq!(summary.changed, 1);
    assert_eq!(fs::read_to_string(&script).unwrap(), STRIPPED);
    assert_eq!(fs::metadata(&script).unwrap().permissions().mode() & 0o777, 0o750);
}
