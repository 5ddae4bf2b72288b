// Upstream API payload types.
//
// These mirror the JSON the fantasy game serves. Fields the site never
// reads are omitted; everything optional upstream is `Option` or defaulted
// so one missing field never fails a whole deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Entry profile
// ---------------------------------------------------------------------------

/// A manager's profile from `/entry/{id}/`.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryProfile {
    pub player_first_name: String,
    pub player_last_name: String,
    /// Team name chosen by the manager.
    pub name: Option<String>,
    pub summary_overall_points: Option<i64>,
    pub summary_overall_rank: Option<i64>,
    /// Bank balance in tenths of a million.
    pub bank: Option<i64>,
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// One gameweek row of a manager's season history.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HistoryRecord {
    /// Gameweek number.
    pub event: u32,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub points_on_bench: i64,
    #[serde(default)]
    pub event_transfers: u32,
}

/// A manager's season history from `/entry/{id}/history/`, ordered by
/// gameweek.
#[derive(Debug, Clone, Deserialize)]
pub struct ManagerHistory {
    #[serde(default)]
    pub current: Vec<HistoryRecord>,
}

// ---------------------------------------------------------------------------
// Bootstrap snapshot
// ---------------------------------------------------------------------------

/// A scoring round definition from the bootstrap snapshot.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Gameweek {
    pub id: u32,
    pub deadline_time: DateTime<Utc>,
    #[serde(default)]
    pub finished: bool,
    /// League-wide average score, present once the gameweek completes.
    #[serde(default)]
    pub average_entry_score: i64,
}

/// A player element from the bootstrap snapshot.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Element {
    pub id: u32,
    pub web_name: String,
}

/// Upstream reference data from `/bootstrap-static/`. Read-only within a
/// render cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct Bootstrap {
    #[serde(default)]
    pub events: Vec<Gameweek>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

// ---------------------------------------------------------------------------
// Picks
// ---------------------------------------------------------------------------

/// One squad slot in a gameweek's picks.
#[derive(Debug, Clone, Deserialize)]
pub struct Pick {
    /// Player element id.
    pub element: u32,
    #[serde(default)]
    pub is_captain: bool,
}

/// A manager's squad selection for one gameweek, from
/// `/entry/{id}/event/{gw}/picks/`.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamPicks {
    #[serde(default)]
    pub picks: Vec<Pick>,
}

// ---------------------------------------------------------------------------
// League standings
// ---------------------------------------------------------------------------

/// One ranked row of a league's standings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Standing {
    /// Entry id of the manager.
    pub entry: u64,
    pub player_name: String,
    pub entry_name: String,
    pub total: i64,
    pub rank: u32,
}

/// A manager who has joined the league before the season produced any
/// standings.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEntry {
    pub entry: u64,
    pub entry_name: String,
    pub player_first_name: String,
    pub player_last_name: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StandingsBlock {
    #[serde(default)]
    pub results: Vec<Standing>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NewEntriesBlock {
    #[serde(default)]
    pub results: Vec<NewEntry>,
}

/// The standings page from `/leagues-classic/{id}/standings/`.
#[derive(Debug, Clone, Deserialize)]
pub struct StandingsPage {
    #[serde(default)]
    pub standings: StandingsBlock,
    #[serde(default)]
    pub new_entries: NewEntriesBlock,
}

impl StandingsPage {
    /// Resolve the page to a flat standings list.
    ///
    /// Before the season has produced standings the upstream returns an
    /// empty `standings.results` but lists joined managers under
    /// `new_entries`; those become zero-point placeholders ranked by their
    /// position in the returned order.
    pub fn into_standings(self) -> Vec<Standing> {
        if !self.standings.results.is_empty() {
            return self.standings.results;
        }
        self.new_entries
            .results
            .into_iter()
            .enumerate()
            .map(|(i, e)| Standing {
                entry: e.entry,
                player_name: format!("{} {}", e.player_first_name, e.player_last_name),
                entry_name: e.entry_name,
                total: 0,
                rank: i as u32 + 1,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standings_page_prefers_results_when_present() {
        let page: StandingsPage = serde_json::from_str(
            r#"{
                "standings": {"results": [
                    {"entry": 7, "player_name": "A B", "entry_name": "Alpha", "total": 120, "rank": 1}
                ]},
                "new_entries": {"results": [
                    {"entry": 8, "entry_name": "Beta", "player_first_name": "C", "player_last_name": "D"}
                ]}
            }"#,
        )
        .unwrap();

        let standings = page.into_standings();
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].entry, 7);
        assert_eq!(standings[0].total, 120);
    }

    #[test]
    fn standings_page_falls_back_to_new_entries() {
        let page: StandingsPage = serde_json::from_str(
            r#"{
                "standings": {"results": []},
                "new_entries": {"results": [
                    {"entry": 10, "entry_name": "First FC", "player_first_name": "Ann", "player_last_name": "One"},
                    {"entry": 11, "entry_name": "Second FC", "player_first_name": "Bob", "player_last_name": "Two"}
                ]}
            }"#,
        )
        .unwrap();

        let standings = page.into_standings();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].player_name, "Ann One");
        assert_eq!(standings[0].total, 0);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[1].rank, 2);
    }

    #[test]
    fn standings_page_tolerates_missing_blocks() {
        let page: StandingsPage = serde_json::from_str("{}").unwrap();
        assert!(page.into_standings().is_empty());
    }

    #[test]
    fn history_rows_default_missing_counters() {
        let history: ManagerHistory = serde_json::from_str(
            r#"{"current": [{"event": 3, "points": 61}]}"#,
        )
        .unwrap();
        assert_eq!(
            history.current[0],
            HistoryRecord { event: 3, points: 61, points_on_bench: 0, event_transfers: 0 }
        );
    }

    #[test]
    fn gameweek_parses_deadline_timestamp() {
        let gw: Gameweek = serde_json::from_str(
            r#"{"id": 1, "deadline_time": "2025-08-15T17:30:00Z", "finished": true, "average_entry_score": 57}"#,
        )
        .unwrap();
        assert_eq!(gw.id, 1);
        assert!(gw.finished);
        assert_eq!(gw.deadline_time.to_rfc3339(), "2025-08-15T17:30:00+00:00");
    }
}
