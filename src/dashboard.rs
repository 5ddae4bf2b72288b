// Dashboard tiles: the logged-in manager's headline stats.
//
// Entry, history, and bootstrap are fetched concurrently as one batch; if
// any of the three fails the whole tile update aborts and the placeholders
// stay. Past that, every tile degrades independently: a missing captain or
// an unstarted season shows a placeholder, never an error.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::client::{ApiClient, FetchError};
use crate::models::{Element, Gameweek, HistoryRecord, TeamPicks};

// ---------------------------------------------------------------------------
// Tile text
// ---------------------------------------------------------------------------

/// Rendered text for every dashboard tile. All fields are display-ready
/// strings; placeholders stand in for anything that could not be derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardTiles {
    /// Header greeting, e.g. "Welcome, Dan Patel".
    pub welcome: String,
    pub overall_rank: String,
    pub overall_points: String,
    pub team_name: String,
    pub last_gw_points: String,
    pub last_gw_average: String,
    pub last_gw_captain: String,
    pub next_gw_deadline: String,
    pub next_gw_countdown: String,
    pub next_gw_captain: String,
    pub free_transfers: String,
    pub bank: String,
}

impl DashboardTiles {
    /// The initial tile state, shown until a fetch batch succeeds.
    pub fn placeholder(display_name: &str) -> Self {
        DashboardTiles {
            welcome: format!("Welcome, {display_name}"),
            overall_rank: "--".into(),
            overall_points: "-- pts".into(),
            team_name: "--".into(),
            last_gw_points: "-- pts".into(),
            last_gw_average: String::new(),
            last_gw_captain: String::new(),
            next_gw_deadline: "--".into(),
            next_gw_countdown: "--".into(),
            next_gw_captain: "--".into(),
            free_transfers: "-- Free Transfers".into(),
            bank: "Bank: --".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Gameweek selection
// ---------------------------------------------------------------------------

/// The chronologically latest gameweek whose `finished` flag is set.
pub fn last_finished_gameweek(events: &[Gameweek]) -> Option<&Gameweek> {
    events.iter().rev().find(|gw| gw.finished)
}

/// The earliest unfinished gameweek whose deadline is strictly in the
/// future at `now`.
pub fn next_upcoming_gameweek(events: &[Gameweek], now: DateTime<Utc>) -> Option<&Gameweek> {
    events
        .iter()
        .find(|gw| !gw.finished && gw.deadline_time > now)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Countdown to a deadline as `in {d}d {h}h {m}m`, or a passed indicator.
pub fn format_countdown(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = deadline - now;
    if diff <= chrono::Duration::zero() {
        return "Deadline passed!".into();
    }
    format!(
        "in {}d {}h {}m",
        diff.num_days(),
        diff.num_hours() % 24,
        diff.num_minutes() % 60
    )
}

/// Deadline timestamp as e.g. `Sat, 23 Aug, 17:30`.
pub fn format_deadline(deadline: DateTime<Utc>) -> String {
    deadline.format("%a, %-d %b, %H:%M").to_string()
}

/// Bank balance tile. The upstream value is tenths of a million.
pub fn format_bank(bank: Option<i64>) -> String {
    match bank {
        Some(tenths) => format!("Bank: £{:.1}m", tenths as f64 / 10.0),
        None => "Bank: --".into(),
    }
}

/// Free-transfer tile from the most recent history row.
pub fn format_free_transfers(history: &[HistoryRecord]) -> String {
    match history.last() {
        Some(row) => format!("{} Free Transfers", row.event_transfers),
        None => "-- Free Transfers".into(),
    }
}

/// Resolve the captain's display name from a picks response.
///
/// Returns `None` when picks are unavailable, no pick is flagged captain,
/// or the captain's element id is absent from the bootstrap list; callers
/// degrade to a placeholder.
pub fn captain_name(picks: Option<&TeamPicks>, elements: &[Element]) -> Option<String> {
    let captain = picks?.picks.iter().find(|p| p.is_captain)?;
    elements
        .iter()
        .find(|e| e.id == captain.element)
        .map(|e| e.web_name.clone())
}

fn captain_tile(name: Option<String>) -> String {
    format!("Captain: {}", name.unwrap_or_else(|| "--".into()))
}

// ---------------------------------------------------------------------------
// Tile assembly
// ---------------------------------------------------------------------------

/// Fetch the manager's entry, history, and bootstrap snapshot (as one
/// concurrent batch) and derive all tile text as of `now`.
///
/// Captain lookups issue one extra sequential picks request per gameweek
/// of interest; those degrade to placeholders rather than failing.
pub async fn build(
    client: &ApiClient,
    entry_id: u64,
    now: DateTime<Utc>,
) -> Result<DashboardTiles, FetchError> {
    let (entry, history, bootstrap) = tokio::join!(
        client.entry(entry_id),
        client.history(entry_id),
        client.bootstrap(),
    );
    let (entry, history, bootstrap) = (entry?, history?, bootstrap?);

    let mut tiles = DashboardTiles::placeholder("Manager");
    tiles.welcome = format!(
        "Welcome, {} {}",
        entry.player_first_name, entry.player_last_name
    );
    if let Some(rank) = entry.summary_overall_rank {
        tiles.overall_rank = format!("#{rank}");
    }
    if let Some(points) = entry.summary_overall_points {
        tiles.overall_points = format!("{points} pts");
    }
    if let Some(name) = entry.name.as_deref().filter(|n| !n.is_empty()) {
        tiles.team_name = name.to_string();
    }

    if let Some(last_gw) = last_finished_gameweek(&bootstrap.events) {
        if let Some(row) = history.current.iter().find(|r| r.event == last_gw.id) {
            tiles.last_gw_points = format!("{} pts", row.points);
        }
        tiles.last_gw_average = format!(" (League avg: {} pts)", last_gw.average_entry_score);

        let picks = client.picks(entry_id, last_gw.id).await;
        tiles.last_gw_captain = captain_tile(captain_name(picks.as_ref(), &bootstrap.elements));
    } else {
        debug!(entry_id, "no finished gameweek yet");
    }

    if let Some(next_gw) = next_upcoming_gameweek(&bootstrap.events, now) {
        tiles.next_gw_deadline = format_deadline(next_gw.deadline_time);
        tiles.next_gw_countdown = format_countdown(next_gw.deadline_time, now);

        let picks = client.picks(entry_id, next_gw.id).await;
        tiles.next_gw_captain = captain_tile(captain_name(picks.as_ref(), &bootstrap.elements));
    }

    tiles.free_transfers = format_free_transfers(&history.current);
    tiles.bank = format_bank(entry.bank);

    Ok(tiles)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
