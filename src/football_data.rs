use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::{BolaoError, Result};
use crate::feed::{MatchFeed, MatchFilter};
use crate::http_client::http_client;

const AUTH_HEADER: &str = "X-Auth-Token";
const ERROR_BODY_MAX: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competition {
    pub id: u32,
    pub code: String,
    pub name: String,
    pub area: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormResult {
    Win,
    Draw,
    Loss,
}

impl FormResult {
    fn from_tag(raw: &str) -> Option<Self> {
        match raw.trim() {
            "W" => Some(FormResult::Win),
            "D" => Some(FormResult::Draw),
            "L" => Some(FormResult::Loss),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            FormResult::Win => 'W',
            FormResult::Draw => 'D',
            FormResult::Loss => 'L',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingRow {
    pub position: u32,
    pub team_id: u32,
    pub team_name: String,
    pub crest: Option<String>,
    pub played: u32,
    pub won: u32,
    pub draw: u32,
    pub lost: u32,
    pub points: i32,
    pub goal_difference: i32,
    /// Oldest first, at most the last five results.
    pub form: Vec<FormResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    Scheduled,
    Timed,
    InPlay,
    Paused,
    Live,
    Finished,
    Postponed,
    Suspended,
    Cancelled,
    Awarded,
    Other,
}

impl MatchStatus {
    pub fn from_tag(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SCHEDULED" | "AVAILABLE" => MatchStatus::Scheduled,
            "TIMED" => MatchStatus::Timed,
            "IN_PLAY" => MatchStatus::InPlay,
            "PAUSED" => MatchStatus::Paused,
            "LIVE" => MatchStatus::Live,
            "FINISHED" => MatchStatus::Finished,
            "POSTPONED" => MatchStatus::Postponed,
            "SUSPENDED" => MatchStatus::Suspended,
            "CANCELLED" | "CANCELED" => MatchStatus::Cancelled,
            "AWARDED" => MatchStatus::Awarded,
            _ => MatchStatus::Other,
        }
    }

    /// Query value understood by the feed's `status` filter.
    pub fn tag(self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Timed => "TIMED",
            MatchStatus::InPlay => "IN_PLAY",
            MatchStatus::Paused => "PAUSED",
            MatchStatus::Live => "LIVE",
            MatchStatus::Finished => "FINISHED",
            MatchStatus::Postponed => "POSTPONED",
            MatchStatus::Suspended => "SUSPENDED",
            MatchStatus::Cancelled => "CANCELLED",
            MatchStatus::Awarded => "AWARDED",
            MatchStatus::Other => "",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchStatus::Scheduled | MatchStatus::Timed => "Not started",
            MatchStatus::InPlay | MatchStatus::Paused | MatchStatus::Live => "Live",
            MatchStatus::Finished => "Full time",
            MatchStatus::Postponed => "Postponed",
            MatchStatus::Suspended => "Suspended",
            MatchStatus::Cancelled => "Cancelled",
            MatchStatus::Awarded => "Awarded",
            MatchStatus::Other => "Unknown",
        }
    }

    pub fn is_live(self) -> bool {
        matches!(
            self,
            MatchStatus::InPlay | MatchStatus::Paused | MatchStatus::Live
        )
    }

    pub fn is_upcoming(self) -> bool {
        matches!(self, MatchStatus::Scheduled | MatchStatus::Timed)
    }
}

/// Declared winner of a match, absent until the feed decides one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    Home,
    Away,
    Draw,
}

impl Winner {
    pub fn from_tag(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "HOME_TEAM" | "HOME" => Some(Winner::Home),
            "AWAY_TEAM" | "AWAY" => Some(Winner::Away),
            "DRAW" => Some(Winner::Draw),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivePeriod {
    FirstHalf,
    HalfTime,
    SecondHalf,
    ExtraTime,
    Penalties,
    Other,
}

impl LivePeriod {
    pub fn from_tag(raw: &str) -> Self {
        match raw.trim() {
            "FIRST_HALF" | "1st" => LivePeriod::FirstHalf,
            "HALF_TIME" => LivePeriod::HalfTime,
            "SECOND_HALF" | "2nd" => LivePeriod::SecondHalf,
            "EXTRA_TIME" => LivePeriod::ExtraTime,
            "PENALTY_SHOOTOUT" => LivePeriod::Penalties,
            _ => LivePeriod::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LivePeriod::FirstHalf => "1st half",
            LivePeriod::HalfTime => "Half-time",
            LivePeriod::SecondHalf => "2nd half",
            LivePeriod::ExtraTime => "Extra time",
            LivePeriod::Penalties => "Penalties",
            LivePeriod::Other => "Live",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    pub home: Option<u8>,
    pub away: Option<u8>,
    pub winner: Option<Winner>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedMatch {
    pub id: String,
    pub utc_date: DateTime<Utc>,
    pub status: MatchStatus,
    pub home: String,
    pub away: String,
    pub score: Score,
    pub period: Option<LivePeriod>,
}

impl FeedMatch {
    /// Full-time numbers with missing values read as zero.
    pub fn live_score(&self) -> (u8, u8) {
        (self.score.home.unwrap_or(0), self.score.away.unwrap_or(0))
    }

    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.utc_date).num_minutes()
    }

    pub fn period_label(&self) -> &'static str {
        self.period.unwrap_or(LivePeriod::Other).label()
    }
}

#[derive(Debug, Deserialize)]
struct CompetitionsResponse {
    #[serde(default)]
    competitions: Vec<RawCompetition>,
}

#[derive(Debug, Deserialize)]
struct RawCompetition {
    id: u32,
    #[serde(default)]
    code: Option<String>,
    name: String,
    #[serde(default)]
    area: Option<RawArea>,
}

#[derive(Debug, Deserialize)]
struct RawArea {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StandingsResponse {
    #[serde(default)]
    standings: Vec<RawStanding>,
}

#[derive(Debug, Deserialize)]
struct RawStanding {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    table: Vec<RawTableRow>,
}

#[derive(Debug, Deserialize)]
struct RawTableRow {
    position: u32,
    team: RawTeam,
    #[serde(rename = "playedGames", default)]
    played_games: u32,
    #[serde(default)]
    won: u32,
    #[serde(default)]
    draw: u32,
    #[serde(default)]
    lost: u32,
    #[serde(default)]
    points: i32,
    #[serde(rename = "goalDifference", default)]
    goal_difference: i32,
    #[serde(default)]
    form: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    crest: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MatchesResponse {
    #[serde(default)]
    matches: Vec<RawMatch>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    id: u64,
    #[serde(rename = "utcDate")]
    utc_date: String,
    #[serde(default)]
    status: String,
    #[serde(rename = "homeTeam")]
    home_team: RawTeam,
    #[serde(rename = "awayTeam")]
    away_team: RawTeam,
    #[serde(default)]
    score: Option<RawScore>,
    #[serde(default)]
    period: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawScore {
    #[serde(default)]
    winner: Option<String>,
    #[serde(rename = "fullTime", default)]
    full_time: Option<RawGoals>,
}

#[derive(Debug, Deserialize)]
struct RawGoals {
    #[serde(default)]
    home: Option<u8>,
    #[serde(default)]
    away: Option<u8>,
}

fn empty_body(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed == "null"
}

pub fn parse_competitions_json(raw: &str) -> Result<Vec<Competition>> {
    if empty_body(raw) {
        return Ok(Vec::new());
    }
    let data: CompetitionsResponse = serde_json::from_str(raw.trim())
        .map_err(|err| BolaoError::Feed(format!("invalid competitions json: {err}")))?;
    Ok(data
        .competitions
        .into_iter()
        .map(|c| Competition {
            id: c.id,
            code: c.code.unwrap_or_default(),
            name: c.name,
            area: c.area.and_then(|a| a.name),
        })
        .collect())
}

/// Only the overall (`TOTAL`) table is kept; home/away splits are ignored.
pub fn parse_standings_json(raw: &str) -> Result<Vec<StandingRow>> {
    if empty_body(raw) {
        return Ok(Vec::new());
    }
    let data: StandingsResponse = serde_json::from_str(raw.trim())
        .map_err(|err| BolaoError::Feed(format!("invalid standings json: {err}")))?;
    let Some(total) = data
        .standings
        .into_iter()
        .find(|s| s.kind.as_deref() == Some("TOTAL"))
    else {
        return Ok(Vec::new());
    };

    Ok(total
        .table
        .into_iter()
        .map(|row| StandingRow {
            position: row.position,
            team_id: row.team.id.unwrap_or(0),
            team_name: row.team.name.unwrap_or_else(|| "TBD".to_string()),
            crest: row.team.crest,
            played: row.played_games,
            won: row.won,
            draw: row.draw,
            lost: row.lost,
            points: row.points,
            goal_difference: row.goal_difference,
            form: parse_form(row.form.as_deref()),
        })
        .collect())
}

fn parse_form(raw: Option<&str>) -> Vec<FormResult> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let all = raw.split(',').filter_map(FormResult::from_tag).collect::<Vec<_>>();
    let skip = all.len().saturating_sub(5);
    all.into_iter().skip(skip).collect()
}

/// Matches with an unreadable kickoff time are dropped.
pub fn parse_matches_json(raw: &str) -> Result<Vec<FeedMatch>> {
    if empty_body(raw) {
        return Ok(Vec::new());
    }
    let data: MatchesResponse = serde_json::from_str(raw.trim())
        .map_err(|err| BolaoError::Feed(format!("invalid matches json: {err}")))?;

    let mut out = Vec::with_capacity(data.matches.len());
    for m in data.matches {
        let Ok(kickoff) = DateTime::parse_from_rfc3339(m.utc_date.trim()) else {
            log::warn!("match {} has unreadable kickoff '{}'", m.id, m.utc_date);
            continue;
        };
        let score = m.score.map(|s| {
            let (home, away) = s
                .full_time
                .map(|g| (g.home, g.away))
                .unwrap_or((None, None));
            Score {
                home,
                away,
                winner: s.winner.as_deref().and_then(Winner::from_tag),
            }
        });
        out.push(FeedMatch {
            id: m.id.to_string(),
            utc_date: kickoff.with_timezone(&Utc),
            status: MatchStatus::from_tag(&m.status),
            home: m.home_team.name.unwrap_or_else(|| "TBD".to_string()),
            away: m.away_team.name.unwrap_or_else(|| "TBD".to_string()),
            score: score.unwrap_or_default(),
            period: m.period.as_deref().map(LivePeriod::from_tag),
        });
    }
    Ok(out)
}

/// Blocking client for the football-data.org v4 API.
#[derive(Debug, Clone)]
pub struct FootballDataFeed {
    base_url: String,
    token: String,
    timeout: Duration,
}

impl FootballDataFeed {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.base_url, &config.api_token, config.http_timeout)
    }

    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        let client = http_client(self.timeout)?;
        let url = format!("{}{}", self.base_url, path);

        let mut req = client.get(&url);
        if !self.token.trim().is_empty() {
            req = req.header(AUTH_HEADER, self.token.trim());
        }
        if !query.is_empty() {
            req = req.query(query);
        }

        log::debug!("GET {url} {query:?}");
        let resp = req
            .send()
            .map_err(|err| BolaoError::Feed(format!("{path}: {err}")))?;
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|err| BolaoError::Feed(format!("{path}: failed reading body: {err}")))?;
        if !status.is_success() {
            let snippet = body.chars().take(ERROR_BODY_MAX).collect::<String>();
            return Err(BolaoError::Feed(format!("{path}: http {status}: {snippet}")));
        }
        Ok(body)
    }
}

impl MatchFeed for FootballDataFeed {
    fn competitions(&self) -> Result<Vec<Competition>> {
        let body = self.get("/competitions", &[])?;
        parse_competitions_json(&body)
    }

    fn standings(&self, code: &str) -> Result<Vec<StandingRow>> {
        let body = self.get(&format!("/competitions/{code}/standings"), &[])?;
        parse_standings_json(&body)
    }

    fn matches(&self, code: &str, filter: &MatchFilter) -> Result<Vec<FeedMatch>> {
        let body = self.get(&format!("/competitions/{code}/matches"), &filter.query())?;
        parse_matches_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_keeps_last_five() {
        let form = parse_form(Some("W,W,D,L,W,L,D"));
        assert_eq!(
            form,
            vec![
                FormResult::Draw,
                FormResult::Loss,
                FormResult::Win,
                FormResult::Loss,
                FormResult::Draw
            ]
        );
        assert!(parse_form(None).is_empty());
    }

    #[test]
    fn status_tags_cover_both_spellings() {
        assert_eq!(MatchStatus::from_tag("CANCELED"), MatchStatus::Cancelled);
        assert_eq!(MatchStatus::from_tag("AVAILABLE"), MatchStatus::Scheduled);
        assert_eq!(MatchStatus::from_tag("whatever"), MatchStatus::Other);
        assert!(MatchStatus::Paused.is_live());
    }

    #[test]
    fn null_winner_is_absent() {
        let raw = r#"{"matches":[{"id":7,"utcDate":"2026-05-01T18:00:00Z","status":"TIMED",
            "homeTeam":{"name":"A"},"awayTeam":{"name":"B"},
            "score":{"winner":null,"fullTime":{"home":null,"away":null}}}]}"#;
        let matches = parse_matches_json(raw).unwrap();
        assert_eq!(matches[0].score.winner, None);
        assert_eq!(matches[0].live_score(), (0, 0));
    }

    #[test]
    fn empty_body_parses_to_nothing() {
        assert!(parse_matches_json("null").unwrap().is_empty());
        assert!(parse_standings_json("  ").unwrap().is_empty());
    }
}
