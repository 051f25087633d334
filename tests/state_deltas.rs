use chrono::{TimeZone, Utc};

use bolao_terminal::football_data::{Competition, FeedMatch, MatchStatus, Score};
use bolao_terminal::state::{AppState, Delta, FeedScope, Screen, apply_delta};

fn live_match(id: &str) -> FeedMatch {
    FeedMatch {
        id: id.to_string(),
        utc_date: Utc.with_ymd_and_hms(2026, 5, 3, 20, 0, 0).unwrap(),
        status: MatchStatus::InPlay,
        home: "H".to_string(),
        away: "A".to_string(),
        score: Score::default(),
        period: None,
    }
}

fn state() -> AppState {
    AppState::new(vec!["BSA".to_string(), "BL1".to_string(), "SA".to_string()])
}

#[test]
fn live_cycle_replaces_per_league_and_drops_empty() {
    let mut state = state();
    assert!(state.live_loading);

    apply_delta(&mut state, Delta::LiveCycleStarted);
    apply_delta(
        &mut state,
        Delta::SetLive {
            league: "SA".to_string(),
            matches: vec![live_match("1")],
        },
    );
    apply_delta(
        &mut state,
        Delta::SetLive {
            league: "BSA".to_string(),
            matches: vec![live_match("2"), live_match("3")],
        },
    );
    apply_delta(&mut state, Delta::LiveCycleFinished);

    let order = state
        .live_leagues()
        .iter()
        .map(|(code, matches)| (code.to_string(), matches.len()))
        .collect::<Vec<_>>();
    assert_eq!(order, vec![("BSA".to_string(), 2), ("SA".to_string(), 1)]);
    assert!(!state.live_loading);

    // A later cycle with nothing live for BSA removes the league.
    apply_delta(
        &mut state,
        Delta::SetLive {
            league: "BSA".to_string(),
            matches: Vec::new(),
        },
    );
    assert_eq!(state.live_leagues().len(), 1);
}

#[test]
fn failed_refresh_keeps_stale_data_and_reports() {
    let mut state = state();
    apply_delta(
        &mut state,
        Delta::SetStandings {
            league: "BL1".to_string(),
            rows: Vec::new(),
        },
    );
    apply_delta(
        &mut state,
        Delta::SetUpcoming {
            league: "BL1".to_string(),
            matches: vec![live_match("10")],
        },
    );
    state.mark_loading(FeedScope::Upcoming, "BL1");
    apply_delta(
        &mut state,
        Delta::FeedFailed {
            league: "BL1".to_string(),
            scope: FeedScope::Upcoming,
            message: "http 429".to_string(),
        },
    );

    let slot = state.upcoming.get("BL1").unwrap();
    assert_eq!(slot.items.len(), 1);
    assert!(!slot.loading);
    assert_eq!(slot.error.as_deref(), Some("http 429"));
    assert!(state.logs.back().unwrap().contains("http 429"));

    apply_delta(
        &mut state,
        Delta::SetUpcoming {
            league: "BL1".to_string(),
            matches: Vec::new(),
        },
    );
    assert_eq!(state.upcoming.get("BL1").unwrap().error, None);
}

#[test]
fn live_failure_does_not_touch_other_leagues() {
    let mut state = state();
    apply_delta(
        &mut state,
        Delta::SetLive {
            league: "SA".to_string(),
            matches: vec![live_match("1")],
        },
    );
    apply_delta(
        &mut state,
        Delta::FeedFailed {
            league: "BSA".to_string(),
            scope: FeedScope::Live,
            message: "timeout".to_string(),
        },
    );
    assert_eq!(state.live_leagues().len(), 1);
    assert_eq!(state.live_errors.get("BSA").map(String::as_str), Some("timeout"));
}

#[test]
fn competition_names_label_leagues() {
    let mut state = state();
    assert_eq!(state.league_label("BL1"), "BL1");
    apply_delta(
        &mut state,
        Delta::SetCompetitions(vec![Competition {
            id: 2002,
            code: "bl1".to_string(),
            name: "Bundesliga".to_string(),
            area: None,
        }]),
    );
    assert_eq!(state.league_label("BL1"), "Bundesliga");
}

#[test]
fn league_cycling_wraps_and_resets_selection() {
    let mut state = state();
    state.set_screen(Screen::Picks);
    state.selected = 3;
    state.cycle_league(false);
    assert_eq!(state.current_league(), Some("SA"));
    assert_eq!(state.selected, 0);
    state.cycle_league(true);
    assert_eq!(state.current_league(), Some("BSA"));
}

#[test]
fn console_is_bounded() {
    let mut state = state();
    for i in 0..250 {
        state.push_log(format!("line {i}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("line 50"));
}

#[test]
fn overlapping_live_cycles_stay_loading_until_the_last_finishes() {
    let mut state = state();

    apply_delta(&mut state, Delta::LiveCycleStarted);
    apply_delta(&mut state, Delta::LiveCycleStarted);
    apply_delta(&mut state, Delta::LiveCycleFinished);
    assert!(state.live_loading);
    assert!(state.live_loaded);

    apply_delta(&mut state, Delta::LiveCycleFinished);
    assert!(!state.live_loading);
    assert_eq!(state.live_cycles_in_flight, 0);

    // A stray finish never underflows.
    apply_delta(&mut state, Delta::LiveCycleFinished);
    assert_eq!(state.live_cycles_in_flight, 0);
    assert!(!state.live_loading);
}

#[test]
fn live_failures_follow_configured_league_order() {
    let mut state = state();
    for league in ["SA", "BSA", "BL1"] {
        apply_delta(
            &mut state,
            Delta::FeedFailed {
                league: league.to_string(),
                scope: FeedScope::Live,
                message: format!("{league} down"),
            },
        );
    }
    apply_delta(
        &mut state,
        Delta::SetLive {
            league: "BL1".to_string(),
            matches: Vec::new(),
        },
    );

    assert_eq!(
        state.live_failures(),
        vec![("BSA", "BSA down"), ("SA", "SA down")]
    );
}
