#[path = "../src/backup.rs"]
mod backup;

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

#[test]
fn zip_export_and_import_roundtrip() {
    let workspace = temp_dir("rosterd-backup-src");
    let workspace2 = temp_dir("rosterd-backup-dst");
    let out_dir = temp_dir("rosterd-backup-out");

    let db_src = workspace.join("roster.sqlite3");
    let bytes = b"sqlite-test-payload";
    std::fs::write(&db_src, bytes).expect("write source store");

    let bundle_path = out_dir.join("workspace.rosterbackup.zip");
    let export = backup::export_workspace_bundle(&workspace, &bundle_path).expect("export bundle");
    assert_eq!(export.bundle_format, backup::BUNDLE_FORMAT_V1);
    assert_eq!(export.entry_count, 2);

    let f = File::open(&bundle_path).expect("open bundle");
    let mut archive = zip::ZipArchive::new(f).expect("open zip archive");
    let mut manifest = String::new();
    archive
        .by_name("manifest.json")
        .expect("manifest entry")
        .read_to_string(&mut manifest)
        .expect("read manifest");
    assert!(manifest.contains(backup::BUNDLE_FORMAT_V1));
    archive
        .by_name("db/roster.sqlite3")
        .expect("store entry in bundle");

    let import = backup::import_workspace_bundle(&bundle_path, &workspace2).expect("import bundle");
    assert_eq!(import.bundle_format_detected, backup::BUNDLE_FORMAT_V1);

    let restored = std::fs::read(workspace2.join("roster.sqlite3")).expect("read restored store");
    assert_eq!(restored, bytes);

    let _ = std::fs::remove_dir_all(workspace);
    let _ = std::fs::remove_dir_all(workspace2);
    let _ = std::fs::remove_dir_all(out_dir);
}

#[test]
fn bare_sqlite_import_is_supported() {
    let out_dir = temp_dir("rosterd-backup-bare");
    let workspace = temp_dir("rosterd-backup-bare-dst");

    let bare_file = out_dir.join("exported.sqlite3");
    let bytes = b"bare-sqlite-copy";
    std::fs::write(&bare_file, bytes).expect("write bare sqlite file");

    let import =
        backup::import_workspace_bundle(&bare_file, &workspace).expect("import bare sqlite");
    assert_eq!(import.bundle_format_detected, "bare-sqlite3");

    let restored = std::fs::read(workspace.join("roster.sqlite3")).expect("read restored store");
    assert_eq!(restored, bytes);

    let _ = std::fs::remove_dir_all(out_dir);
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn foreign_zip_formats_are_rejected() {
    let out_dir = temp_dir("rosterd-backup-foreign");
    let workspace = temp_dir("rosterd-backup-foreign-dst");

    // A zip whose manifest names some other format tag.
    let bundle_path = out_dir.join("foreign.zip");
    let f = File::create(&bundle_path).expect("create zip");
    let mut zw = zip::ZipWriter::new(f);
    let opts = zip::write::FileOptions::default();
    use std::io::Write;
    zw.start_file("manifest.json", opts).expect("start manifest");
    zw.write_all(br#"{"format":"something-else-v9"}"#)
        .expect("write manifest");
    zw.finish().expect("finish zip");

    let err = backup::import_workspace_bundle(&bundle_path, &workspace)
        .expect_err("foreign format must fail");
    assert!(err.to_string().contains("unsupported bundle format"));

    let _ = std::fs::remove_dir_all(out_dir);
    let _ = std::fs::remove_dir_all(workspace);
}
