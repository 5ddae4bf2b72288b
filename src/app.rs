// Application state and orchestration.
//
// `AppState` owns the API client, the session store, the current identity,
// and the standings cached at startup. The TUI calls into it to log in and
// out and to build the view models for each section; all hidden globals of
// the original site live here as explicit state instead.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::client::{ApiClient, FetchError};
use crate::config::{LEAGUE_ID, ROSTER};
use crate::dashboard::{self, DashboardTiles};
use crate::leaderboards::{self, BenchEntry, ComebackEntry, RangeBoard};
use crate::league_table::{self, TableRow};
use crate::models::Standing;
use crate::session::{self, SessionError, SessionIdentity, SessionStore};

/// Gameweek windows for the two range boards.
pub const EARLY_BIRD_WINDOW: (u32, u32) = (1, 10);
pub const ENDGAME_WINDOW: (u32, u32) = (29, 38);

/// Boards the site advertises but has not built yet.
pub const COMING_SOON: &[&str] = &[
    "Monthly Winners",
    "Hot Streak",
    "Captain Fantastic",
    "Golden Glove",
    "Chip Master",
];

/// How many standings rows the grand-champion podium shows.
const PODIUM_SIZE: usize = 3;

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

/// Everything the achievements section renders.
#[derive(Debug)]
pub struct AchievementsView {
    /// Top of the startup-cached standings: (player name, total points).
    pub grand_champions: Vec<(String, i64)>,
    pub early_bird: RangeBoard,
    pub endgame: RangeBoard,
    pub bench_warmers: Vec<BenchEntry>,
    /// The comeback board, or the error text to show in its place.
    pub comeback: Result<Vec<ComebackEntry>, String>,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    client: ApiClient,
    store: SessionStore,
    identity: Option<SessionIdentity>,
    standings: Vec<Standing>,
}

impl AppState {
    /// Build app state, restoring any identity saved by a previous run.
    pub fn new(client: ApiClient, store: SessionStore) -> Self {
        let identity = store.load();
        if let Some(who) = &identity {
            info!("restored session for {}", who.username);
        }
        AppState {
            client,
            store,
            identity,
            standings: Vec::new(),
        }
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.identity.is_some()
    }

    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    /// Authenticate against the roster and persist the identity for the
    /// session. A failed save is logged but does not block the login.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), SessionError> {
        let manager = session::authenticate(username, password)?;
        let identity = SessionIdentity::from(manager);
        if let Err(e) = self.store.save(&identity) {
            warn!("session not persisted: {e}");
        }
        info!("{} logged in", identity.username);
        self.identity = Some(identity);
        Ok(())
    }

    /// Clear the session identity and the standings cache.
    pub fn logout(&mut self) {
        if let Some(who) = self.identity.take() {
            info!("{} logged out", who.username);
        }
        self.store.clear();
        self.standings.clear();
    }

    /// Fetch and cache the league standings shown by the table and the
    /// grand-champion podium. Called once after login; a failure leaves
    /// the previous cache in place.
    pub async fn load_standings(&mut self) -> Result<(), FetchError> {
        let standings = self.client.standings(LEAGUE_ID, None).await?;
        info!("standings loaded: {} rows", standings.len());
        self.standings = standings;
        Ok(())
    }

    /// Build the dashboard tiles for the logged-in manager as of `now`.
    ///
    /// If the entry/history/bootstrap batch fails, the placeholders are
    /// returned unchanged; tiles never render a hard error.
    pub async fn dashboard(&self, now: DateTime<Utc>) -> DashboardTiles {
        let Some(who) = &self.identity else {
            return DashboardTiles::placeholder("Manager");
        };
        match dashboard::build(&self.client, who.entry_id, now).await {
            Ok(tiles) => tiles,
            Err(e) => {
                warn!("dashboard fetch failed: {e}");
                DashboardTiles::placeholder(&who.display_name)
            }
        }
    }

    /// Build every achievement board. Boards are populated one after
    /// another; each history board re-fetches the roster sequentially to
    /// stay inside the proxy's pacing.
    pub async fn achievements(&self) -> AchievementsView {
        let grand_champions = self
            .standings
            .iter()
            .take(PODIUM_SIZE)
            .map(|s| (s.player_name.clone(), s.total))
            .collect();

        let (early_start, early_end) = EARLY_BIRD_WINDOW;
        let early_bird =
            leaderboards::range_board(&self.client, ROSTER, early_start, early_end).await;

        let (late_start, late_end) = ENDGAME_WINDOW;
        let endgame = leaderboards::range_board(&self.client, ROSTER, late_start, late_end).await;

        let bench_warmers = leaderboards::bench_board(&self.client, ROSTER).await;

        let comeback = leaderboards::comeback_board(&self.client, LEAGUE_ID, ROSTER)
            .await
            .map_err(|e| e.to_string());

        AchievementsView {
            grand_champions,
            early_bird,
            endgame,
            bench_warmers,
            comeback,
        }
    }

    /// Build the league-table rows from the cached standings.
    pub fn league_table(&self) -> Vec<TableRow> {
        league_table::build_rows(&self.standings, self.identity.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
