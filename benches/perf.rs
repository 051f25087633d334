use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use bolao_terminal::football_data::{FeedMatch, MatchStatus, Score, Winner, parse_matches_json};
use bolao_terminal::kv_store::MemoryStore;
use bolao_terminal::picks::{Outcome, PickLedger};
use bolao_terminal::settlement::{ProgressSource, evaluate};

const MATCHES_JSON: &str = include_str!("../tests/fixtures/matches.json");

fn season(n: usize) -> Vec<FeedMatch> {
    let start = Utc.with_ymd_and_hms(2026, 4, 1, 19, 0, 0).unwrap();
    (0..n)
        .map(|i| FeedMatch {
            id: (10_000 + i).to_string(),
            utc_date: start + Duration::hours(i as i64 * 3),
            status: if i % 3 == 0 {
                MatchStatus::Timed
            } else {
                MatchStatus::Finished
            },
            home: format!("Home {i}"),
            away: format!("Away {i}"),
            score: Score {
                home: Some((i % 4) as u8),
                away: Some((i % 3) as u8),
                winner: match i % 3 {
                    0 => None,
                    1 => Some(Winner::Home),
                    _ => Some(Winner::Draw),
                },
            },
            period: None,
        })
        .collect()
}

fn bench_evaluate(c: &mut Criterion) {
    let matches = season(380);
    let mut ledger = PickLedger::load(Arc::new(MemoryStore::new())).unwrap();
    for (i, m) in matches.iter().enumerate().filter(|(i, _)| i % 2 == 0) {
        ledger.record_pick(&m.id, Outcome::ALL[i % 3]).unwrap();
    }
    let now = Utc.with_ymd_and_hms(2026, 5, 20, 12, 0, 0).unwrap();

    c.bench_function("evaluate_season_clock", |b| {
        b.iter(|| {
            let results = evaluate(
                black_box(&ledger),
                black_box(&matches),
                now,
                ProgressSource::Clock,
            );
            black_box(results.len());
        })
    });
}

fn bench_matches_parse(c: &mut Criterion) {
    c.bench_function("matches_parse", |b| {
        b.iter(|| {
            let matches = parse_matches_json(black_box(MATCHES_JSON)).unwrap();
            black_box(matches.len());
        })
    });
}

criterion_group!(benches, bench_evaluate, bench_matches_parse);
criterion_main!(benches);
