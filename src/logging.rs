use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initialise logging at `info`, or at `debug` when the settings file asks
/// for it. `RUST_LOG` is only honoured in debug mode.
///
/// With `log_file` set, output goes to that file instead of stderr.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let file = log_file.and_then(|path| {
        let name = path.file_name()?.to_os_string();
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Some(tracing_appender::rolling::never(dir, name))
    });

    let _ = match file {
        Some(appender) => builder.with_ansi(false).with_writer(appender).try_init(),
        None => builder.try_init(),
    };
}
