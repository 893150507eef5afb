//! File-based ingest tests.

use std::io::Write;

use crm_ingest::{IngestError, IngestLimits, ingest_bytes, read_import_file};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create file");
    file.write_all(bytes).expect("write file");
    path
}

#[test]
fn reads_contacts_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "contacts.csv",
        b"\xEF\xBB\xBFFirst Name,Last Name,Email\n,Smith,a@b.com\nAnn,Lee,ann@x.io\n",
    );

    let table = read_import_file(&path, &IngestLimits::default()).unwrap();
    assert_eq!(table.file_name, "contacts.csv");
    assert_eq!(
        table.headers.columns,
        vec!["First Name", "Last Name", "Email"]
    );
    assert_eq!(table.row_count(), 2);
    let first = table.records().next().unwrap();
    assert_eq!(first.get("First Name"), Some(""));
    assert_eq!(first.get("Email"), Some("a@b.com"));
}

#[test]
fn oversized_file_is_refused_before_reading() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "big.csv", &vec![b'a'; 6 * 1024 * 1024]);

    let err = read_import_file(&path, &IngestLimits::default()).unwrap_err();
    assert_eq!(err.category(), "file too large");
    insta::assert_snapshot!(err.to_string(), @"file too large: big.csv is 6291456 bytes (max 5242880)");
}

#[test]
fn missing_file() {
    let dir = TempDir::new().unwrap();
    let err = read_import_file(&dir.path().join("nope.csv"), &IngestLimits::default())
        .unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn script_anywhere_rejects_the_file() {
    let bytes = b"Name,Notes\nAcme,hello\nEvil,<SCRIPT>alert(1)</SCRIPT>\n";
    let err = ingest_bytes("companies.csv", bytes, &IngestLimits::default()).unwrap_err();
    assert_eq!(err.category(), "malicious content detected");
}

#[test]
fn wrong_type_and_unsafe_names() {
    let limits = IngestLimits::default();
    let err = ingest_bytes("contacts.xlsx", b"Name\nA\n", &limits).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"wrong file type: contacts.xlsx is not a .csv file");

    let err = ingest_bytes("../contacts.csv", b"Name\nA\n", &limits).unwrap_err();
    assert_eq!(err.category(), "unsafe file name");
}

#[test]
fn utf16_is_refused() {
    let err = ingest_bytes(
        "contacts.csv",
        b"\xFE\xFF\x00N\x00a",
        &IngestLimits::default(),
    )
    .unwrap_err();
    assert_eq!(err.category(), "unsupported encoding");
}

#[test]
fn custom_row_cap() {
    let limits = IngestLimits {
        max_rows: 1,
        ..IngestLimits::default()
    };
    let err = ingest_bytes("tasks.csv", b"Title\none\ntwo\n", &limits).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"too many rows in tasks.csv: 2 data rows (max 1)");
}
