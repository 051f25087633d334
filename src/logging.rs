use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use log::LevelFilter;

/// Routes `log` records to a file; the terminal UI owns stdout.
pub fn setup_logger(level: Option<String>, path: &Path) -> Result<(), fern::InitError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}: {}",
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(get_log_level(level))
        .level_for("rustls", LevelFilter::Warn)
        .level_for("hyper_util", LevelFilter::Warn)
        .chain(fern::log_file(path)?)
        .apply()?;
    Ok(())
}

pub fn get_log_level(level: Option<String>) -> LevelFilter {
    match level.as_deref().map(str::trim) {
        Some("trace") => LevelFilter::Trace,
        Some("debug") => LevelFilter::Debug,
        Some("info") => LevelFilter::Info,
        Some("warn") => LevelFilter::Warn,
        Some("error") => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::get_log_level;
    use log::LevelFilter;

    #[test]
    fn unknown_level_defaults_to_info() {
        assert_eq!(get_log_level(None), LevelFilter::Info);
        assert_eq!(get_log_level(Some("loud".to_string())), LevelFilter::Info);
        assert_eq!(get_log_level(Some("debug".to_string())), LevelFilter::Debug);
    }
}
