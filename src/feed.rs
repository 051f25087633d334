use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use rayon::prelude::*;

use crate::config::AppConfig;
use crate::error::Result;
use crate::football_data::{Competition, FeedMatch, MatchStatus, StandingRow};
use crate::state::{Delta, FeedScope, ProviderCommand};

/// Read-only sports data source.
pub trait MatchFeed: Send + Sync {
    fn competitions(&self) -> Result<Vec<Competition>>;
    fn standings(&self, code: &str) -> Result<Vec<StandingRow>>;
    fn matches(&self, code: &str, filter: &MatchFilter) -> Result<Vec<FeedMatch>>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFilter {
    pub status: Option<MatchStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl MatchFilter {
    pub fn live() -> Self {
        Self {
            status: Some(MatchStatus::Live),
            ..Self::default()
        }
    }

    /// Calendar days covering `[now, now + window]`.
    pub fn window(now: DateTime<Utc>, window: ChronoDuration) -> Self {
        Self {
            status: None,
            date_from: Some(now.date_naive()),
            date_to: Some((now + window).date_naive()),
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(status) = self.status {
            let tag = status.tag();
            if !tag.is_empty() {
                out.push(("status", tag.to_string()));
            }
        }
        if let Some(from) = self.date_from {
            out.push(("dateFrom", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.date_to {
            out.push(("dateTo", to.format("%Y-%m-%d").to_string()));
        }
        out
    }

    pub fn accepts(&self, m: &FeedMatch) -> bool {
        if let Some(status) = self.status {
            let ok = if status == MatchStatus::Live {
                m.status.is_live()
            } else {
                m.status == status
            };
            if !ok {
                return false;
            }
        }
        let day = m.utc_date.date_naive();
        if self.date_from.is_some_and(|from| day < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| day > to) {
            return false;
        }
        true
    }
}

/// One request per league, issued together. Every league keeps its own
/// result so a failing league never hides the others.
pub fn fetch_by_league(
    feed: &dyn MatchFeed,
    leagues: &[String],
    filter: &MatchFilter,
) -> Vec<(String, Result<Vec<FeedMatch>>)> {
    leagues
        .par_iter()
        .map(|code| (code.clone(), feed.matches(code, filter)))
        .collect()
}

/// Not-yet-started matches kicking off within `[now, now + window]`.
pub fn upcoming_within(
    matches: &[FeedMatch],
    now: DateTime<Utc>,
    window: ChronoDuration,
) -> Vec<FeedMatch> {
    let until = now + window;
    let mut out = matches
        .iter()
        .filter(|m| m.status.is_upcoming() && m.utc_date >= now && m.utc_date <= until)
        .cloned()
        .collect::<Vec<_>>();
    out.sort_by_key(|m| m.utc_date);
    out
}

/// Background worker: polls live matches on a fixed period and serves
/// one-off fetches. Each reply replaces one league's data wholesale, so
/// overlapping cycles cannot corrupt state.
pub fn spawn_provider(
    feed: Arc<dyn MatchFeed>,
    config: AppConfig,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) {
    thread::spawn(move || {
        let leagues = config.league_codes.clone();
        let live_interval = config.live_poll;
        let window = ChronoDuration::hours(config.upcoming_window_hours);

        spawn_competitions_job(Arc::clone(&feed), leagues.clone(), tx.clone());
        let mut last_live: Option<Instant> = None;

        loop {
            if last_live.is_none_or(|at| at.elapsed() >= live_interval) {
                spawn_live_job(Arc::clone(&feed), leagues.clone(), tx.clone());
                last_live = Some(Instant::now());
            }

            loop {
                match cmd_rx.try_recv() {
                    Ok(cmd) => handle_command(cmd, &feed, &leagues, window, &tx),
                    Err(std::sync::mpsc::TryRecvError::Empty) => break,
                    Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                        log::info!("provider shutting down");
                        return;
                    }
                }
            }

            thread::sleep(Duration::from_millis(250));
        }
    });
}

fn handle_command(
    cmd: ProviderCommand,
    feed: &Arc<dyn MatchFeed>,
    leagues: &[String],
    window: ChronoDuration,
    tx: &Sender<Delta>,
) {
    let feed = Arc::clone(feed);
    let tx = tx.clone();
    match cmd {
        ProviderCommand::RefreshLive => spawn_live_job(feed, leagues.to_vec(), tx),
        ProviderCommand::FetchUpcoming => {
            let leagues = leagues.to_vec();
            thread::spawn(move || {
                let now = Utc::now();
                let filter = MatchFilter::window(now, window);
                for (league, result) in fetch_by_league(feed.as_ref(), &leagues, &filter) {
                    let delta = match result {
                        Ok(matches) => Delta::SetUpcoming {
                            league,
                            matches: upcoming_within(&matches, now, window),
                        },
                        Err(err) => failed(league, FeedScope::Upcoming, err),
                    };
                    let _ = tx.send(delta);
                }
            });
        }
        ProviderCommand::FetchStandings { league } => {
            thread::spawn(move || {
                let delta = match feed.standings(&league) {
                    Ok(rows) => Delta::SetStandings { league, rows },
                    Err(err) => failed(league, FeedScope::Standings, err),
                };
                let _ = tx.send(delta);
            });
        }
        ProviderCommand::FetchResults { league } => {
            thread::spawn(move || {
                let delta = match feed.matches(&league, &MatchFilter::default()) {
                    Ok(matches) => Delta::SetResults { league, matches },
                    Err(err) => failed(league, FeedScope::Results, err),
                };
                let _ = tx.send(delta);
            });
        }
    }
}

fn spawn_live_job(feed: Arc<dyn MatchFeed>, leagues: Vec<String>, tx: Sender<Delta>) {
    thread::spawn(move || {
        let _ = tx.send(Delta::LiveCycleStarted);
        let results = fetch_by_league(feed.as_ref(), &leagues, &MatchFilter::live());
        let mut failures = 0usize;
        for (league, result) in results {
            let delta = match result {
                Ok(matches) => Delta::SetLive { league, matches },
                Err(err) => {
                    failures += 1;
                    failed(league, FeedScope::Live, err)
                }
            };
            let _ = tx.send(delta);
        }
        if failures > 0 {
            log::warn!("live cycle finished with {failures} failed league(s)");
        }
        let _ = tx.send(Delta::LiveCycleFinished);
    });
}

fn spawn_competitions_job(feed: Arc<dyn MatchFeed>, leagues: Vec<String>, tx: Sender<Delta>) {
    thread::spawn(move || match feed.competitions() {
        Ok(all) => {
            let known = all
                .into_iter()
                .filter(|c| leagues.iter().any(|code| code.eq_ignore_ascii_case(&c.code)))
                .collect();
            let _ = tx.send(Delta::SetCompetitions(known));
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!(
                "[WARN] Competition list unavailable: {err}"
            )));
        }
    });
}

fn failed(league: String, scope: FeedScope, err: crate::error::BolaoError) -> Delta {
    log::warn!("{scope:?} fetch for {league} failed: {err}");
    Delta::FeedFailed {
        league,
        scope,
        message: err.to_string(),
    }
}
