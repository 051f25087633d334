use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BolaoError, Result};
use crate::kv_store::{SharedStore, load_versioned, save_versioned};

pub const PICKS_KEY: &str = "picks";
const PICKS_VERSION: u32 = 1;

/// A predicted result for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "home-win", alias = "vitoria")]
    HomeWin,
    #[serde(rename = "draw", alias = "empate")]
    Draw,
    #[serde(rename = "away-win", alias = "derrota")]
    AwayWin,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::HomeWin, Outcome::Draw, Outcome::AwayWin];

    pub fn tag(self) -> &'static str {
        match self {
            Outcome::HomeWin => "home-win",
            Outcome::Draw => "draw",
            Outcome::AwayWin => "away-win",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Outcome {
    type Err = BolaoError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "home-win" | "vitoria" => Ok(Outcome::HomeWin),
            "draw" | "empate" => Ok(Outcome::Draw),
            "away-win" | "derrota" => Ok(Outcome::AwayWin),
            other => Err(BolaoError::Validation(format!("unknown pick '{other}'"))),
        }
    }
}

/// Picks keyed by feed match id. One flat ledger shared by every pool and
/// league; the last pick recorded for a match wins.
pub struct PickLedger {
    store: SharedStore,
    picks: BTreeMap<String, Outcome>,
}

impl PickLedger {
    /// Entries whose tag is not a known outcome (the legacy picker could
    /// store an empty choice) are skipped.
    pub fn load(store: SharedStore) -> Result<Self> {
        let raw: BTreeMap<String, String> =
            load_versioned(store.as_ref(), PICKS_KEY, PICKS_VERSION)?.unwrap_or_default();
        let mut picks = BTreeMap::new();
        for (match_id, tag) in raw {
            match tag.parse::<Outcome>() {
                Ok(outcome) => {
                    picks.insert(match_id, outcome);
                }
                Err(_) => log::warn!("skipping unreadable pick '{tag}' for match {match_id}"),
            }
        }
        Ok(Self { store, picks })
    }

    /// The pick stays in memory even when the write fails; the next
    /// successful write carries it to storage.
    pub fn record_pick(&mut self, match_id: &str, outcome: Outcome) -> Result<()> {
        let match_id = match_id.trim();
        if match_id.is_empty() {
            return Err(BolaoError::Validation("match id is required".to_string()));
        }
        self.picks.insert(match_id.to_string(), outcome);
        if let Err(err) = save_versioned(self.store.as_ref(), PICKS_KEY, PICKS_VERSION, &self.picks)
        {
            log::warn!("pick for match {match_id} kept in memory only: {err}");
            return Err(err);
        }
        log::info!("recorded {outcome} for match {match_id}");
        Ok(())
    }

    pub fn pick(&self, match_id: &str) -> Option<Outcome> {
        self.picks.get(match_id).copied()
    }

    pub fn picks(&self) -> &BTreeMap<String, Outcome> {
        &self.picks
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }
}
