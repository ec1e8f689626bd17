//! Edge cases for loading configuration text and files.

use inipatch::{Config, ConfigError, IniParser, LineKind, Lines};
use tempfile::TempDir;

// ========== LINE SHAPES ==========

#[test]
fn test_comment_markers_anywhere_end_the_value() {
    let mut config = Config::new();
    config.parse(b"[a]\nhash = one#two\nsemi = three ; four = 4\n");

    assert_eq!(config.get_string("a", "hash"), "one");
    assert_eq!(config.get_string("a", "semi"), "three");
    assert!(!config.contains("a", "four"));
}

#[test]
fn test_commented_out_header_is_ignored() {
    let mut config = Config::new();
    config.parse(b"[a]\n; [b]\nx = 1\n");
    assert_eq!(config.get_int("a", "x"), 1);
    assert!(config.section("b").is_none());
}

#[test]
fn test_value_keeps_interior_whitespace() {
    let mut config = Config::new();
    config.parse(b"[a]\nmotd =   hello   big   world   \n");
    assert_eq!(config.get_string("a", "motd"), "hello   big   world");
}

#[test]
fn test_empty_value() {
    let mut config = Config::new();
    config.parse(b"[a]\nblank =\nspaces =    ; nothing\n");
    assert!(config.contains("a", "blank"));
    assert_eq!(config.get_string("a", "blank"), "");
    assert_eq!(config.get_string("a", "spaces"), "");
}

#[test]
fn test_padded_section_header() {
    let mut config = Config::new();
    config.parse(b"  [  spaced name  ]  \n  key = 1\n");
    assert_eq!(config.get_int("spaced name", "key"), 1);
}

#[test]
fn test_names_are_case_sensitive() {
    let mut config = Config::new();
    config.parse(b"[Net]\nPort = 1\n[net]\nport = 2\n");
    assert_eq!(config.get_int("Net", "Port"), 1);
    assert_eq!(config.get_int("net", "port"), 2);
    assert_eq!(config.get_int("Net", "port"), 0);
}

#[test]
fn test_repeated_section_merges() {
    let mut config = Config::new();
    config.parse(b"[a]\nx = 1\n[b]\ny = 2\n[a]\nz = 3\nx = 9\n");

    let keys: Vec<_> = config.section("a").unwrap().keys().collect();
    assert_eq!(keys, vec!["x", "z"]);
    assert_eq!(config.get_int("a", "x"), 1);
}

#[test]
fn test_lines_without_equals_are_skipped() {
    let mut config = Config::new();
    config.parse(b"[a]\nflag\n[broken\nx = 1\n");
    assert_eq!(config.section("a").unwrap().len(), 1);
    assert_eq!(config.get_int("a", "x"), 1);
}

#[test]
fn test_keys_before_any_header() {
    let mut config = Config::new();
    config.parse(b"version = 3\n\n[a]\nx = 1\n");
    assert_eq!(config.get_int("", "version"), 3);
    let names: Vec<_> = config.sections().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["", "a"]);
}

#[test]
fn test_crlf_values_have_no_carriage_return() {
    let mut config = Config::new();
    config.parse(b"[a]\r\nx = value\r\n");
    assert_eq!(config.get_string("a", "x"), "value");
}

// ========== SCANNER AND CLASSIFIER ==========

#[test]
fn test_lines_reassemble_input() {
    let input: &[u8] = b"\n; c\n[a] # c\n  k = v ;c\n\ttail";
    let mut rebuilt = Vec::new();
    for line in Lines::new(input) {
        line.write_to(&mut rebuilt);
    }
    assert_eq!(rebuilt, input.to_vec());
}

#[test]
fn test_classify_each_line() {
    let kinds: Vec<_> = Lines::new(b"# c\n[a]\nk = v\nword\n")
        .map(|line| IniParser::classify(line.middle))
        .collect();

    assert_eq!(
        kinds,
        vec![
            LineKind::Blank,
            LineKind::Section("a"),
            LineKind::Pair {
                key: "k",
                value: "v",
                assign_end: 3,
            },
            LineKind::Other,
        ]
    );
}

// ========== FILES ==========

#[test]
fn test_load_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(dir.path().join("absent.ini")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_load_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::IoError { .. }));
}

#[test]
fn test_load_or_default_gives_empty_config() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.ini"));
    assert_eq!(config.sections().count(), 0);
    assert!(!config.is_dirty());
}

#[test]
fn test_failed_parse_file_keeps_existing_values() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::new();
    config.set("a", "x", 1);

    assert!(config.parse_file(dir.path().join("absent.ini")).is_err());
    assert_eq!(config.get_int("a", "x"), 1);
    assert!(config.is_dirty());
}

#[test]
fn test_parse_file_merges_several_files() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("base.ini");
    let local = dir.path().join("local.ini");
    std::fs::write(&base, "[a]\nx = 1\ny = 1\n").unwrap();
    std::fs::write(&local, "[a]\ny = 2\n[b]\nz = 3\n").unwrap();

    let mut config = Config::load(&base).unwrap();
    config.parse_file(&local).unwrap();

    assert_eq!(config.get_int("a", "x"), 1);
    assert_eq!(config.get_int("a", "y"), 2);
    assert_eq!(config.get_int("b", "z"), 3);
    assert!(!config.is_dirty());
}
