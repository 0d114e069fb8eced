use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub const TOAST_LOG_FILE: &str = "toast.log";

/// Append one timestamped line to the toast log.
pub fn append_toast_log_to(path: &Path, msg: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{} - {}", Local::now().to_rfc3339(), msg.replace('\n', " "))
}

pub fn append_toast_log(msg: &str) {
    if let Err(e) = append_toast_log_to(Path::new(TOAST_LOG_FILE), msg) {
        tracing::debug!("toast log unavailable: {e}");
    }
}
