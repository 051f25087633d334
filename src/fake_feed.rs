//! Offline feed for demo runs and UI work without an API token.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{BolaoError, Result};
use crate::feed::{MatchFeed, MatchFilter};
use crate::football_data::{
    Competition, FeedMatch, FormResult, LivePeriod, MatchStatus, Score, StandingRow, Winner,
};

const TEAMS_PER_LEAGUE: usize = 12;
const FIXTURES_PER_LEAGUE: usize = 6;

#[derive(Debug, Clone)]
pub struct FakeFeed {
    leagues: Vec<String>,
    anchor: DateTime<Utc>,
}

impl FakeFeed {
    pub fn new(leagues: Vec<String>) -> Self {
        Self::anchored(leagues, Utc::now())
    }

    /// Fixtures are laid out around `anchor`, ids stay stable for a day.
    pub fn anchored(leagues: Vec<String>, anchor: DateTime<Utc>) -> Self {
        Self { leagues, anchor }
    }

    fn league_seed(&self, code: &str) -> u64 {
        let day = self.anchor.timestamp().div_euclid(86_400) as u64;
        code.bytes()
            .fold(day.wrapping_mul(31), |acc, b| acc.wrapping_mul(131).wrapping_add(b as u64))
    }

    fn known(&self, code: &str) -> Result<usize> {
        self.leagues
            .iter()
            .position(|c| c.eq_ignore_ascii_case(code))
            .ok_or_else(|| BolaoError::Feed(format!("unknown competition {code}")))
    }

    fn team_name(code: &str, idx: usize) -> String {
        format!("{code} Club {:02}", idx + 1)
    }

    fn fixtures(&self, code: &str) -> Result<Vec<FeedMatch>> {
        let league_idx = self.known(code)?;
        let mut rng = StdRng::seed_from_u64(self.league_seed(code));
        let base_id = 100_000 + (league_idx as u64) * 1_000;

        // Two finished yesterday, two live now, two upcoming tomorrow.
        let offsets_min = [-26 * 60, -22 * 60, -30, -70, 20 * 60, 30 * 60];
        let mut out = Vec::with_capacity(FIXTURES_PER_LEAGUE);
        for (i, offset) in offsets_min.iter().enumerate() {
            let kickoff = self.anchor + ChronoDuration::minutes(*offset);
            let home_idx = (i * 2) % TEAMS_PER_LEAGUE;
            let away_idx = (i * 2 + 1) % TEAMS_PER_LEAGUE;
            let (status, score, period) = if *offset <= -2 * 60 {
                let home = rng.gen_range(0..=4u8);
                let away = rng.gen_range(0..=3u8);
                (
                    MatchStatus::Finished,
                    Score {
                        home: Some(home),
                        away: Some(away),
                        winner: Some(winner_of(home, away)),
                    },
                    None,
                )
            } else if *offset < 0 {
                let period = if *offset > -45 {
                    LivePeriod::FirstHalf
                } else {
                    LivePeriod::SecondHalf
                };
                (
                    MatchStatus::InPlay,
                    Score {
                        home: Some(rng.gen_range(0..=2u8)),
                        away: Some(rng.gen_range(0..=2u8)),
                        winner: None,
                    },
                    Some(period),
                )
            } else {
                (MatchStatus::Timed, Score::default(), None)
            };
            out.push(FeedMatch {
                id: (base_id + i as u64).to_string(),
                utc_date: kickoff,
                status,
                home: Self::team_name(code, home_idx),
                away: Self::team_name(code, away_idx),
                score,
                period,
            });
        }
        Ok(out)
    }
}

fn winner_of(home: u8, away: u8) -> Winner {
    if home > away {
        Winner::Home
    } else if home < away {
        Winner::Away
    } else {
        Winner::Draw
    }
}

impl MatchFeed for FakeFeed {
    fn competitions(&self) -> Result<Vec<Competition>> {
        Ok(self
            .leagues
            .iter()
            .enumerate()
            .map(|(idx, code)| Competition {
                id: 9_000 + idx as u32,
                code: code.clone(),
                name: format!("{code} Demo League"),
                area: None,
            })
            .collect())
    }

    fn standings(&self, code: &str) -> Result<Vec<StandingRow>> {
        self.known(code)?;
        let mut rng = StdRng::seed_from_u64(self.league_seed(code) ^ 0x5eed);
        let played = 20u32;
        let mut rows = (0..TEAMS_PER_LEAGUE)
            .map(|idx| {
                let won = rng.gen_range(0..=played);
                let draw = rng.gen_range(0..=(played - won));
                let lost = played - won - draw;
                let form = (0..5)
                    .map(|_| match rng.gen_range(0..3) {
                        0 => FormResult::Win,
                        1 => FormResult::Draw,
                        _ => FormResult::Loss,
                    })
                    .collect();
                StandingRow {
                    position: 0,
                    team_id: idx as u32 + 1,
                    team_name: Self::team_name(code, idx),
                    crest: None,
                    played,
                    won,
                    draw,
                    lost,
                    points: (won * 3 + draw) as i32,
                    goal_difference: won as i32 - lost as i32,
                    form,
                }
            })
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then(b.goal_difference.cmp(&a.goal_difference))
                .then(a.team_name.cmp(&b.team_name))
        });
        for (idx, row) in rows.iter_mut().enumerate() {
            row.position = idx as u32 + 1;
        }
        Ok(rows)
    }

    fn matches(&self, code: &str, filter: &MatchFilter) -> Result<Vec<FeedMatch>> {
        Ok(self
            .fixtures(code)?
            .into_iter()
            .filter(|m| filter.accepts(m))
            .collect())
    }
}
