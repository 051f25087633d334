use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use crate::football_data::{Competition, FeedMatch, StandingRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Live,
    Leagues,
    Standings,
    Pools,
    Picks,
    Results,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::Live,
        Screen::Leagues,
        Screen::Standings,
        Screen::Pools,
        Screen::Picks,
        Screen::Results,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Live => "Live",
            Screen::Leagues => "Leagues",
            Screen::Standings => "Standings",
            Screen::Pools => "Pools",
            Screen::Picks => "Picks",
            Screen::Results => "Results",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedScope {
    Live,
    Upcoming,
    Standings,
    Results,
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    RefreshLive,
    FetchUpcoming,
    FetchStandings { league: String },
    FetchResults { league: String },
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetCompetitions(Vec<Competition>),
    LiveCycleStarted,
    SetLive {
        league: String,
        matches: Vec<FeedMatch>,
    },
    LiveCycleFinished,
    SetUpcoming {
        league: String,
        matches: Vec<FeedMatch>,
    },
    SetStandings {
        league: String,
        rows: Vec<StandingRow>,
    },
    SetResults {
        league: String,
        matches: Vec<FeedMatch>,
    },
    FeedFailed {
        league: String,
        scope: FeedScope,
        message: String,
    },
    Log(String),
}

/// Per-league slot: the last good payload survives a failed refresh.
#[derive(Debug, Clone)]
pub struct LeagueData<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
}

impl<T> Default for LeagueData<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            loaded: false,
            error: None,
        }
    }
}

impl<T> LeagueData<T> {
    fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.loading = false;
        self.loaded = true;
        self.error = None;
    }

    fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub leagues: Vec<String>,
    pub league_names: HashMap<String, String>,
    pub league_index: usize,
    pub selected: usize,
    /// Only leagues that currently have live matches.
    pub live: BTreeMap<String, Vec<FeedMatch>>,
    pub live_errors: HashMap<String, String>,
    pub live_loading: bool,
    pub live_loaded: bool,
    /// Live cycles that have started but not yet reported back.
    pub live_cycles_in_flight: usize,
    pub expanded: HashSet<String>,
    pub upcoming: HashMap<String, LeagueData<FeedMatch>>,
    pub standings: HashMap<String, LeagueData<StandingRow>>,
    pub results: HashMap<String, LeagueData<FeedMatch>>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub name_input: Option<String>,
    pub pending_delete: Option<String>,
}

impl AppState {
    pub fn new(leagues: Vec<String>) -> Self {
        Self {
            screen: Screen::Live,
            leagues,
            league_names: HashMap::new(),
            league_index: 0,
            selected: 0,
            live: BTreeMap::new(),
            live_errors: HashMap::new(),
            live_loading: true,
            live_loaded: false,
            live_cycles_in_flight: 0,
            expanded: HashSet::new(),
            upcoming: HashMap::new(),
            standings: HashMap::new(),
            results: HashMap::new(),
            logs: VecDeque::new(),
            help_overlay: false,
            name_input: None,
            pending_delete: None,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            self.screen = screen;
            self.selected = 0;
        }
    }

    pub fn current_league(&self) -> Option<&str> {
        self.leagues.get(self.league_index).map(String::as_str)
    }

    pub fn cycle_league(&mut self, forward: bool) {
        if self.leagues.is_empty() {
            return;
        }
        let len = self.leagues.len();
        self.league_index = if forward {
            (self.league_index + 1) % len
        } else {
            (self.league_index + len - 1) % len
        };
        self.selected = 0;
    }

    pub fn league_label<'a>(&'a self, code: &'a str) -> &'a str {
        self.league_names
            .get(code)
            .map(String::as_str)
            .unwrap_or(code)
    }

    /// Live leagues in configured order.
    pub fn live_leagues(&self) -> Vec<(&str, &[FeedMatch])> {
        self.leagues
            .iter()
            .filter_map(|code| {
                self.live
                    .get(code)
                    .filter(|matches| !matches.is_empty())
                    .map(|matches| (code.as_str(), matches.as_slice()))
            })
            .collect()
    }

    /// Live fetch errors in configured league order.
    pub fn live_failures(&self) -> Vec<(&str, &str)> {
        self.leagues
            .iter()
            .filter_map(|code| {
                self.live_errors
                    .get(code)
                    .map(|err| (code.as_str(), err.as_str()))
            })
            .collect()
    }

    pub fn toggle_expanded(&mut self, league: &str) {
        if !self.expanded.remove(league) {
            self.expanded.insert(league.to_string());
        }
    }

    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn mark_loading(&mut self, scope: FeedScope, league: &str) {
        match scope {
            FeedScope::Live => self.live_loading = true,
            FeedScope::Upcoming => self.upcoming.entry(league.to_string()).or_default().loading = true,
            FeedScope::Standings => {
                self.standings.entry(league.to_string()).or_default().loading = true
            }
            FeedScope::Results => self.results.entry(league.to_string()).or_default().loading = true,
        }
    }

    pub fn upcoming_for(&self, league: &str) -> &[FeedMatch] {
        self.upcoming
            .get(league)
            .map(|d| d.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn results_for(&self, league: &str) -> &[FeedMatch] {
        self.results
            .get(league)
            .map(|d| d.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn standings_for(&self, league: &str) -> &[StandingRow] {
        self.standings
            .get(league)
            .map(|d| d.items.as_slice())
            .unwrap_or(&[])
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetCompetitions(competitions) => {
            for c in competitions {
                state.league_names.insert(c.code.to_ascii_uppercase(), c.name);
            }
        }
        Delta::LiveCycleStarted => {
            state.live_cycles_in_flight += 1;
            state.live_loading = true;
        }
        Delta::SetLive { league, matches } => {
            state.live_errors.remove(&league);
            if matches.is_empty() {
                state.live.remove(&league);
            } else {
                state.live.insert(league, matches);
            }
        }
        Delta::LiveCycleFinished => {
            state.live_cycles_in_flight = state.live_cycles_in_flight.saturating_sub(1);
            state.live_loading = state.live_cycles_in_flight > 0;
            state.live_loaded = true;
        }
        Delta::SetUpcoming { league, matches } => {
            state.upcoming.entry(league).or_default().replace(matches);
        }
        Delta::SetStandings { league, rows } => {
            state.standings.entry(league).or_default().replace(rows);
        }
        Delta::SetResults { league, matches } => {
            state.results.entry(league).or_default().replace(matches);
        }
        Delta::FeedFailed {
            league,
            scope,
            message,
        } => {
            state.push_log(format!("[WARN] {scope:?} {league}: {message}"));
            match scope {
                FeedScope::Live => {
                    state.live_errors.insert(league, message);
                }
                FeedScope::Upcoming => state.upcoming.entry(league).or_default().fail(message),
                FeedScope::Standings => state.standings.entry(league).or_default().fail(message),
                FeedScope::Results => state.results.entry(league).or_default().fail(message),
            }
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
