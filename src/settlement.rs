use chrono::{DateTime, Duration, Utc};

pub use crate::config::ProgressSource;
use crate::football_data::{FeedMatch, MatchStatus, Winner};
use crate::picks::{Outcome, PickLedger};

/// Assumed length of a match when the clock decides whether it is over.
pub const ASSUMED_MATCH_DURATION_HOURS: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchProgress {
    NotStarted,
    InProgress,
    Finished,
}

impl MatchProgress {
    pub fn label(self) -> &'static str {
        match self {
            MatchProgress::NotStarted => "Not started",
            MatchProgress::InProgress => "In progress",
            MatchProgress::Finished => "Finished",
        }
    }
}

/// Clock heuristic: both window bounds count as in progress.
pub fn classify_progress(scheduled_start: DateTime<Utc>, now: DateTime<Utc>) -> MatchProgress {
    if now < scheduled_start {
        return MatchProgress::NotStarted;
    }
    if now <= scheduled_start + Duration::hours(ASSUMED_MATCH_DURATION_HOURS) {
        return MatchProgress::InProgress;
    }
    MatchProgress::Finished
}

/// Progress as reported by the feed's own status tag. Postponed,
/// cancelled and unknown matches count as not started; an awarded match
/// is over.
pub fn progress_from_status(status: MatchStatus) -> MatchProgress {
    match status {
        MatchStatus::InPlay | MatchStatus::Paused | MatchStatus::Live | MatchStatus::Suspended => {
            MatchProgress::InProgress
        }
        MatchStatus::Finished | MatchStatus::Awarded => MatchProgress::Finished,
        MatchStatus::Scheduled
        | MatchStatus::Timed
        | MatchStatus::Postponed
        | MatchStatus::Cancelled
        | MatchStatus::Other => MatchProgress::NotStarted,
    }
}

pub fn match_progress(m: &FeedMatch, now: DateTime<Utc>, source: ProgressSource) -> MatchProgress {
    match source {
        ProgressSource::Clock => classify_progress(m.utc_date, now),
        ProgressSource::Feed => progress_from_status(m.status),
    }
}

/// True iff the pick names the declared winner. Undecided is never a hit.
pub fn settle(pick: Outcome, declared_winner: Option<Winner>) -> bool {
    matches!(
        (pick, declared_winner),
        (Outcome::HomeWin, Some(Winner::Home))
            | (Outcome::AwayWin, Some(Winner::Away))
            | (Outcome::Draw, Some(Winner::Draw))
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Not over yet; no correctness judgement is made.
    Pending(MatchProgress),
    Hit,
    Miss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickResult {
    pub match_id: String,
    pub home: String,
    pub away: String,
    pub kickoff: DateTime<Utc>,
    pub pick: Outcome,
    pub progress: MatchProgress,
    pub verdict: Verdict,
    pub score: (u8, u8),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultsSummary {
    pub hits: usize,
    pub misses: usize,
    pub pending: usize,
}

impl ResultsSummary {
    pub fn from_results(results: &[PickResult]) -> Self {
        let mut out = Self::default();
        for r in results {
            match r.verdict {
                Verdict::Hit => out.hits += 1,
                Verdict::Miss => out.misses += 1,
                Verdict::Pending(_) => out.pending += 1,
            }
        }
        out
    }
}

pub fn evaluate_pick(
    m: &FeedMatch,
    pick: Outcome,
    now: DateTime<Utc>,
    source: ProgressSource,
) -> PickResult {
    let progress = match_progress(m, now, source);
    let verdict = if progress == MatchProgress::Finished {
        if settle(pick, m.score.winner) {
            Verdict::Hit
        } else {
            Verdict::Miss
        }
    } else {
        Verdict::Pending(progress)
    };
    PickResult {
        match_id: m.id.clone(),
        home: m.home.clone(),
        away: m.away.clone(),
        kickoff: m.utc_date,
        pick,
        progress,
        verdict,
        score: m.live_score(),
    }
}

/// One result per feed match that carries a pick, in feed order.
pub fn evaluate(
    ledger: &PickLedger,
    matches: &[FeedMatch],
    now: DateTime<Utc>,
    source: ProgressSource,
) -> Vec<PickResult> {
    matches
        .iter()
        .filter_map(|m| ledger.pick(&m.id).map(|pick| evaluate_pick(m, pick, now, source)))
        .collect()
}
