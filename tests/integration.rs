use notescan::{AnnotationRecord, Config, MarkerKind, ScanError, Summary};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn scan_fixture(name: &str) -> Vec<AnnotationRecord> {
    let report = notescan::scan_file(&fixture(name), &Config::default())
        .unwrap_or_else(|e| panic!("cannot scan {}: {}", name, e));
    assert!(report.outcome.is_complete(), "{name} did not scan cleanly");
    report.outcome.records
}

fn find(records: &[AnnotationRecord], line: usize) -> &AnnotationRecord {
    records
        .iter()
        .find(|r| r.line_number() == line)
        .unwrap_or_else(|| panic!("no record at line {}", line))
}

#[test]
fn test_database_py() {
    let records = scan_fixture("database.py");
    assert_eq!(records.len(), 19);

    let block = find(&records, 34);
    assert_eq!(block.kind(), MarkerKind::Block);
    assert!(block.is_block());
    assert_eq!(
        block.body(),
        "Add migration system:\n\
         - Track schema versions\n\
         - Support rollback\n\
         - Validate migrations before applying\n\
         Add database backup utilities"
    );

    let xxx = find(&records, 29);
    assert_eq!(xxx.kind(), MarkerKind::Xxx);
    assert_eq!(xxx.body(), "SQL injection risk if params not used correctly");

    let summary = Summary::from_records(&records);
    assert_eq!(summary.count(MarkerKind::Todo), 13);
    assert_eq!(summary.count(MarkerKind::Fixme), 4);
    assert_eq!(summary.count(MarkerKind::Xxx), 1);
    assert_eq!(summary.count(MarkerKind::Block), 1);
}

#[test]
fn test_sample_py() {
    let records = scan_fixture("sample.py");
    let kinds: Vec<_> = records.iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            MarkerKind::Todo,
            MarkerKind::Fixme,
            MarkerKind::Todo,
            MarkerKind::Note,
            MarkerKind::Xxx,
            MarkerKind::Todo,
            MarkerKind::Block,
            MarkerKind::Hack,
        ]
    );

    let first = &records[0];
    assert_eq!(first.line_number(), 6);
    assert_eq!(first.body(), "Add rate limiting to prevent brute force attacks");
    assert!(!first.is_block());

    let brace = find(&records, 22);
    assert_eq!(brace.kind(), MarkerKind::Todo);
    assert!(brace.is_block());
    assert_eq!(
        brace.body(),
        "Implement proper error handling for email failures\n\
         Add logging for all email operations\n\
         Support HTML email templates"
    );

    let block = find(&records, 29);
    assert_eq!(block.body().split('\n').count(), 3);
}

#[test]
fn test_sample_c() {
    let records = scan_fixture("sample.c");
    assert_eq!(records.len(), 10);

    let brace = find(&records, 8);
    assert_eq!(brace.kind(), MarkerKind::Todo);
    assert_eq!(
        brace.body(),
        "Implement proper error codes instead of returning -1\n\
         Add comprehensive logging\n\
         Support Unicode characters"
    );

    let block = find(&records, 20);
    assert_eq!(block.kind(), MarkerKind::Block);
    assert_eq!(
        block.body(),
        "Add bounds checking for input length\n\
         Implement sanitization for special characters\n\
         Add unit tests for edge cases"
    );

    assert_eq!(
        find(&records, 30).body(),
        "Quick fix for memory alignment issues"
    );
    assert_eq!(
        find(&records, 40).body(),
        "Add configuration file support\nImplement daemon mode"
    );
    // "hack" in prose is not a marker
    assert_eq!(find(&records, 26).kind(), MarkerKind::Xxx);
}

#[test]
fn test_server_js() {
    let records = scan_fixture("server.js");
    assert_eq!(records.len(), 18);

    let block = find(&records, 32);
    assert_eq!(
        block.body().split('\n').collect::<Vec<_>>(),
        vec![
            "Implement OAuth providers:",
            "- Google OAuth 2.0",
            "- GitHub OAuth",
            "- Microsoft Azure AD",
            "Add support for SAML SSO",
        ]
    );
    assert_eq!(
        find(&records, 47).body(),
        "Implement API versioning (v1, v2)"
    );
}

#[test]
fn test_utils_rb() {
    let records = scan_fixture("utils.rb");
    assert_eq!(records.len(), 19);

    let brace = find(&records, 11);
    assert_eq!(
        brace.body(),
        "Add string validation utilities:\n\
         - Email validation\n\
         - URL validation\n\
         - Phone number formatting"
    );
    // `#{to}` sits inside a string literal
    assert!(records.iter().all(|r| r.line_number() != 23));
    assert_eq!(find(&records, 26).body().split('\n').count(), 5);
}

#[test]
fn test_fixture_directory() {
    let files = notescan::list_files(&[fixture("")]).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["database.py", "sample.c", "sample.py", "server.js", "utils.rb"]
    );

    let reports = notescan::scan_files(&files, &Config::default());
    let total: usize = reports
        .into_iter()
        .map(|r| r.unwrap().outcome.records.len())
        .sum();
    assert_eq!(total, 74);
}

#[test]
fn test_truncated_fixture_is_incomplete() {
    let text = std::fs::read_to_string(fixture("database.py")).unwrap();
    let truncated: String = text.lines().take(37).map(|l| format!("{l}\n")).collect();
    let outcome = notescan::scan(&truncated, &Config::default()).unwrap();
    assert!(!outcome.is_complete());
    assert_eq!(
        outcome.error,
        Some(ScanError::UnterminatedBlock {
            line: 34,
            kind: MarkerKind::Block
        })
    );
    // everything before the open block survives
    assert_eq!(outcome.records.len(), 9);
}

#[test]
fn test_config_file_restricts_kinds() {
    let config = Config::from_json(r#"{"kinds": ["FIXME"]}"#).unwrap();
    let report = notescan::scan_file(&fixture("utils.rb"), &config).unwrap();
    let summary = Summary::from_records(&report.outcome.records);
    assert_eq!(summary.count(MarkerKind::Fixme), 5);
    assert_eq!(summary.count(MarkerKind::Todo), 0);
    assert_eq!(summary.count(MarkerKind::Block), 1);
    assert_eq!(summary.total, 6);
}
