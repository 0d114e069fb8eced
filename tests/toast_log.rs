use math_canvas::toast_log::{append_toast_log_to, TOAST_LOG_FILE};
use tempfile::tempdir;

#[test]
fn missing_directory_is_an_error_not_a_panic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent").join(TOAST_LOG_FILE);
    assert!(append_toast_log_to(&path, "Nothing recognized").is_err());
}

#[test]
fn log_lines_accumulate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(TOAST_LOG_FILE);
    for msg in ["Recognition failed", "Nothing recognized", "Canvas cleared"] {
        append_toast_log_to(&path, msg).unwrap();
    }
    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[2].ends_with(" - Canvas cleared"));
}
