use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const APP_DIR: &str = "bolao_terminal";
const LOG_FILE: &str = "bolao_terminal.log";
const DEFAULT_BASE_URL: &str = "https://api.football-data.org/v4";
const DEFAULT_LEAGUE_CODES: &[&str] = &["BSA", "BL1", "FL1", "SA"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSource {
    FootballData,
    Fake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Json,
    Sqlite,
}

/// Which signal decides whether a picked match is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressSource {
    /// Kickoff plus a fixed two-hour window.
    Clock,
    /// The feed's own status tag.
    Feed,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_token: String,
    pub base_url: String,
    pub feed_source: FeedSource,
    pub league_codes: Vec<String>,
    pub live_poll: Duration,
    pub upcoming_window_hours: i64,
    pub progress_source: ProgressSource,
    pub storage_backend: StorageBackend,
    pub data_dir: PathBuf,
    pub log_level: Option<String>,
    pub log_file: PathBuf,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let data_dir = env::var("DATA_DIR")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from)
            .or_else(default_data_dir)
            .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR));
        let log_file = env::var("LOG_FILE")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(LOG_FILE));

        Self {
            api_token: env::var("FOOTBALL_DATA_TOKEN").unwrap_or_default(),
            base_url: env::var("FOOTBALL_DATA_BASE_URL")
                .ok()
                .map(|val| val.trim().trim_end_matches('/').to_string())
                .filter(|val| !val.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            feed_source: parse_feed_source(env::var("FEED_SOURCE").ok().as_deref()),
            league_codes: env::var("LEAGUE_CODES")
                .ok()
                .map(|raw| parse_league_codes(&raw))
                .filter(|codes| !codes.is_empty())
                .unwrap_or_else(default_league_codes),
            live_poll: parse_live_poll(env::var("LIVE_POLL_SECS").ok().as_deref()),
            upcoming_window_hours: parse_upcoming_window(
                env::var("UPCOMING_WINDOW_HOURS").ok().as_deref(),
            ),
            progress_source: parse_progress_source(env::var("PROGRESS_SOURCE").ok().as_deref()),
            storage_backend: parse_storage_backend(env::var("STORAGE_BACKEND").ok().as_deref()),
            data_dir,
            log_level: env::var("LOG_LEVEL").ok().filter(|val| !val.trim().is_empty()),
            log_file,
            http_timeout: parse_http_timeout(env::var("HTTP_TIMEOUT_SECS").ok().as_deref()),
        }
    }
}

pub fn parse_league_codes(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split([',', ';', ' '])
        .map(|part| part.trim().to_ascii_uppercase())
        .filter(|code| !code.is_empty())
        .filter(|code| seen.insert(code.clone()))
        .collect()
}

fn default_league_codes() -> Vec<String> {
    DEFAULT_LEAGUE_CODES.iter().map(|code| code.to_string()).collect()
}

fn parse_live_poll(raw: Option<&str>) -> Duration {
    Duration::from_secs(
        raw.and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(60)
            .max(10),
    )
}

fn parse_upcoming_window(raw: Option<&str>) -> i64 {
    raw.and_then(|val| val.trim().parse::<i64>().ok())
        .unwrap_or(48)
        .clamp(1, 168)
}

fn parse_http_timeout(raw: Option<&str>) -> Duration {
    Duration::from_secs(
        raw.and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(10)
            .clamp(2, 60),
    )
}

fn parse_feed_source(raw: Option<&str>) -> FeedSource {
    match raw.map(|val| val.trim().to_lowercase()).as_deref() {
        Some("fake") | Some("demo") => FeedSource::Fake,
        _ => FeedSource::FootballData,
    }
}

fn parse_progress_source(raw: Option<&str>) -> ProgressSource {
    match raw.map(|val| val.trim().to_lowercase()).as_deref() {
        Some("feed") | Some("status") => ProgressSource::Feed,
        _ => ProgressSource::Clock,
    }
}

fn parse_storage_backend(raw: Option<&str>) -> StorageBackend {
    match raw.map(|val| val.trim().to_lowercase()).as_deref() {
        Some("sqlite") => StorageBackend::Sqlite,
        _ => StorageBackend::Json,
    }
}

fn default_data_dir() -> Option<PathBuf> {
    if let Ok(base) = env::var("XDG_DATA_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(APP_DIR));
        }
    }
    let home = env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".local").join("share").join(APP_DIR))
}
