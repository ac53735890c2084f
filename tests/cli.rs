use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn keyindex(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_keyindex"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn setup(text: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("input.txt"), text).unwrap();
    dir
}

#[test]
fn list_in_key_order() {
    let dir = setup("banana\napple\ncherry\n");
    let output = keyindex(&["-l", "input.txt", "out.idx", "1"], dir.path());

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Listing file using index:\n\
         apple\n\
         banana\n\
         cherry\n\
         Done listing file!\n\
         # of records in file: 3\n"
    );
    assert_eq!(fs::metadata(dir.path().join("out.idx")).unwrap().len(), 3 * 9);
}

#[test]
fn create_writes_index_only() {
    let dir = setup("ab\nabcdef\n");
    let output = keyindex(&["-c", "input.txt", "out.idx", "4"], dir.path());

    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let index = fs::read(dir.path().join("out.idx")).unwrap();
    assert_eq!(index.len(), 2 * 12);
    assert_eq!(&index[..4], b"ab\0\0");
    assert_eq!(&index[4..12], &0u64.to_le_bytes());
    assert_eq!(&index[12..16], b"abcd");
    assert_eq!(&index[16..24], &3u64.to_le_bytes());
}

#[test]
fn rebuild_is_identical() {
    let dir = setup("k1 one\nk0 zero\nk1 uno\nk2 two\n");
    keyindex(&["-c", "input.txt", "a.idx", "2"], dir.path());
    keyindex(&["-c", "input.txt", "b.idx", "2"], dir.path());

    assert_eq!(
        fs::read(dir.path().join("a.idx")).unwrap(),
        fs::read(dir.path().join("b.idx")).unwrap()
    );
}

#[test]
fn key_length_bounds() {
    for len in &["1", "24"] {
        let dir = setup("line\n");
        let output = keyindex(&["-c", "input.txt", "out.idx", len], dir.path());
        assert!(output.status.success());
        assert!(dir.path().join("out.idx").exists());
    }

    for len in &["0", "25", "abc"] {
        let dir = setup("line\n");
        let output = keyindex(&["-c", "input.txt", "out.idx", len], dir.path());
        assert!(output.status.success());
        assert!(!output.stderr.is_empty());
        assert!(!dir.path().join("out.idx").exists());
    }
}

#[test]
fn bad_arguments_touch_nothing() {
    let dir = setup("line\n");
    let cases: &[&[&str]] = &[
        &["-c", "input.txt", "out.idx"],
        &["-c", "-l", "input.txt", "out.idx", "3"],
        &["input.txt", "out.idx", "3"],
        &["-x", "input.txt", "out.idx", "3"],
    ];

    for args in cases {
        let output = keyindex(args, dir.path());
        assert!(output.status.success());
        assert!(output.stdout.is_empty());
        assert!(!dir.path().join("out.idx").exists());
    }
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = keyindex(&["-l", "missing.txt", "out.idx", "3"], dir.path());

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.txt"));
}
