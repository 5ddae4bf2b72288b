// Static league configuration and proxy settings.
//
// The manager roster, shared password, and league identifier are fixed at
// deploy time and compiled in. Only the proxy listen port comes from the
// environment (`PORT`, with a fallback), matching how the site is deployed.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for `{var}`: {message}")]
    InvalidEnv { var: String, message: String },
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// A pre-registered league member. The roster is immutable during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Manager {
    /// Login name, stored lower-case.
    pub username: &'static str,
    /// Numeric entry identifier in the upstream fantasy game.
    pub entry_id: u64,
    /// Name shown in leaderboards and the header.
    pub display_name: &'static str,
}

/// Everyone who can log in. Fixed at deploy time.
pub const ROSTER: &[Manager] = &[
    Manager { username: "adamwhitfield", entry_id: 512377, display_name: "Adam Whitfield" },
    Manager { username: "bennicholls", entry_id: 6123908, display_name: "Ben Nicholls" },
    Manager { username: "chrisokafor", entry_id: 5817223, display_name: "Chris Okafor" },
    Manager { username: "danpatel", entry_id: 4491086, display_name: "Dan Patel" },
    Manager { username: "elliotmarsh", entry_id: 1204553, display_name: "Elliot Marsh" },
    Manager { username: "faisalkhan", entry_id: 573921, display_name: "Faisal Khan" },
    Manager { username: "gavinholt", entry_id: 4387250, display_name: "Gavin Holt" },
    Manager { username: "harrydunne", entry_id: 1755032, display_name: "Harry Dunne" },
    Manager { username: "ivanpetrov", entry_id: 1098764, display_name: "Ivan Petrov" },
    Manager { username: "jamesogrady", entry_id: 3790215, display_name: "James O'Grady" },
    Manager { username: "kieranvaughan", entry_id: 2246981, display_name: "Kieran Vaughan" },
];

/// Single shared secret for the whole roster. This is a private fan-club
/// gate, not per-user credentials.
pub const SHARED_PASSWORD: &str = "clubhouse2025";

/// The classic-league identifier whose standings the site shows.
pub const LEAGUE_ID: u64 = 482113;

/// Where the session identity is persisted between launches.
pub const SESSION_FILE: &str = "touchline-session.json";

/// Look up a roster member by already-normalized (lower-case, trimmed)
/// username.
pub fn find_manager(username: &str) -> Option<&'static Manager> {
    ROSTER.iter().find(|m| m.username == username)
}

/// Look up a roster member by entry id.
pub fn find_manager_by_entry(entry_id: u64) -> Option<&'static Manager> {
    ROSTER.iter().find(|m| m.entry_id == entry_id)
}

// ---------------------------------------------------------------------------
// Proxy settings
// ---------------------------------------------------------------------------

/// Upstream origin every `/api/*` request is forwarded to.
pub const UPSTREAM_ORIGIN: &str = "https://fantasy.premierleague.com/api";

/// User-agent injected on every forwarded request. The upstream rejects
/// requests without a browser-looking agent.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Minimum interval between forwarded requests, shared across all clients.
pub const PACING_INTERVAL_MS: u64 = 100;

/// Timeout applied to every outbound request (proxy forwards and app
/// fetches alike), so a hung upstream call cannot stall a render forever.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Origins allowed to call the proxy cross-origin.
pub const ALLOWED_ORIGINS: &[&str] =
    &["http://127.0.0.1:5500", "http://localhost:5500"];

const DEFAULT_PORT: u16 = 5001;

/// Runtime proxy settings.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Port the proxy listens on.
    pub port: u16,
    /// Upstream origin, without a trailing slash.
    pub upstream: String,
}

impl ProxyConfig {
    /// Read settings from the environment. `PORT` overrides the default
    /// listen port; everything else is compiled in.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidEnv {
                var: "PORT".into(),
                message: format!("expected a port number, got `{raw}`"),
            })?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(ProxyConfig {
            port,
            upstream: UPSTREAM_ORIGIN.to_string(),
        })
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        ProxyConfig {
            port: DEFAULT_PORT,
            upstream: UPSTREAM_ORIGIN.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_usernames_are_lowercase_and_unique() {
        for m in ROSTER {
            assert_eq!(m.username, m.username.to_lowercase());
        }
        let mut names: Vec<_> = ROSTER.iter().map(|m| m.username).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ROSTER.len());
    }

    #[test]
    fn roster_entry_ids_are_unique() {
        let mut ids: Vec<_> = ROSTER.iter().map(|m| m.entry_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ROSTER.len());
    }

    #[test]
    fn find_manager_hits_and_misses() {
        let m = find_manager("danpatel").expect("known username");
        assert_eq!(m.display_name, "Dan Patel");
        assert!(find_manager("nobody").is_none());
        // Lookup expects pre-normalized input.
        assert!(find_manager("DanPatel").is_none());
    }

    #[test]
    fn find_manager_by_entry_matches_roster() {
        let m = find_manager_by_entry(512377).expect("known entry id");
        assert_eq!(m.username, "adamwhitfield");
        assert!(find_manager_by_entry(1).is_none());
    }

    #[test]
    fn default_proxy_config_uses_fallback_port() {
        let config = ProxyConfig::default();
        assert_eq!(config.port, 5001);
        assert_eq!(config.upstream, UPSTREAM_ORIGIN);
        assert!(!config.upstream.ends_with('/'));
    }
}
