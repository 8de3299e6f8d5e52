use log::LevelFilter;
use std::io;
use std::path::Path;

const LOG_FILE_NAME: &str = "pkhouse.log";
const MAX_LOG_FILE_INDEX: u32 = 2;

/// Rotates `pkhouse.log` -> `pkhouse.log.0` -> ... -> `pkhouse.log.2` and
/// starts logging to a fresh `pkhouse.log`.
pub fn initialize(enable_debug: bool, log_dir: impl AsRef<Path>) -> io::Result<()> {
    let log_level = if enable_debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    rotate(log_dir.as_ref())?;

    let current_log_file_path = log_dir.as_ref().join(LOG_FILE_NAME);
    std::fs::File::create(&current_log_file_path)?;
    simple_logging::log_to_file(&current_log_file_path, log_level)
}

fn rotate(log_dir: &Path) -> io::Result<()> {
    let numbered = |idx: u32| log_dir.join(format!("{LOG_FILE_NAME}.{idx}"));

    let _ = std::fs::remove_file(numbered(MAX_LOG_FILE_INDEX));
    for idx in (0..MAX_LOG_FILE_INDEX).rev() {
        let log_file_path = numbered(idx);
        if log_file_path.exists() {
            std::fs::rename(&log_file_path, numbered(idx + 1))?;
        }
    }

    let current_log_file_path = log_dir.join(LOG_FILE_NAME);
    if current_log_file_path.exists() {
        std::fs::rename(&current_log_file_path, numbered(0))?;
    }
    Ok(())
}
