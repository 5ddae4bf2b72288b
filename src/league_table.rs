// League table rows: upstream standings plus the current-user highlight.

use crate::models::Standing;
use crate::session::SessionIdentity;

/// One display row of the league table. Standings keep the order the
/// upstream returned; no re-sort is applied here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// 1-based position in the returned order.
    pub position: usize,
    pub player_name: String,
    pub entry_name: String,
    pub total: i64,
    /// Exactly one row is marked for the session identity, when any
    /// matches.
    pub is_current_user: bool,
}

/// Build display rows from the cached standings, highlighting the session
/// identity's row.
///
/// Matching prefers the entry id; if no standing carries it, the first
/// standing whose player name contains the identity's display name
/// (case-insensitively) is marked instead.
pub fn build_rows(standings: &[Standing], identity: Option<&SessionIdentity>) -> Vec<TableRow> {
    let highlight = identity.and_then(|who| highlight_index(standings, who));

    standings
        .iter()
        .enumerate()
        .map(|(i, s)| TableRow {
            position: i + 1,
            player_name: if s.player_name.is_empty() {
                "Unknown".into()
            } else {
                s.player_name.clone()
            },
            entry_name: if s.entry_name.is_empty() {
                "Untitled Team".into()
            } else {
                s.entry_name.clone()
            },
            total: s.total,
            is_current_user: highlight == Some(i),
        })
        .collect()
}

/// Find the standing belonging to the session identity: entry-id match
/// first, then the first case-insensitive name-substring match.
fn highlight_index(standings: &[Standing], who: &SessionIdentity) -> Option<usize> {
    if let Some(i) = standings.iter().position(|s| s.entry == who.entry_id) {
        return Some(i);
    }
    let needle = who.display_name.to_lowercase();
    standings
        .iter()
        .position(|s| s.player_name.to_lowercase().contains(&needle))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(entry: u64, player: &str, team: &str, total: i64, rank: u32) -> Standing {
        Standing {
            entry,
            player_name: player.into(),
            entry_name: team.into(),
            total,
            rank,
        }
    }

    fn identity(entry_id: u64, display_name: &str) -> SessionIdentity {
        SessionIdentity {
            username: display_name.to_lowercase().replace(' ', ""),
            entry_id,
            display_name: display_name.into(),
        }
    }

    #[test]
    fn rows_keep_upstream_order_and_number_positions() {
        let standings = vec![
            standing(1, "Ann One", "Alpha", 900, 1),
            standing(2, "Bob Two", "Beta", 850, 2),
        ];
        let rows = build_rows(&standings, None);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].player_name, "Ann One");
        assert_eq!(rows[1].position, 2);
        assert!(rows.iter().all(|r| !r.is_current_user));
    }

    #[test]
    fn entry_id_match_marks_exactly_one_row() {
        let standings = vec![
            standing(1, "Ann One", "Alpha", 900, 1),
            standing(2, "Dan Patel", "Patel Power", 850, 2),
        ];
        let rows = build_rows(&standings, Some(&identity(2, "Dan Patel")));
        let marked: Vec<usize> = rows
            .iter()
            .filter(|r| r.is_current_user)
            .map(|r| r.position)
            .collect();
        assert_eq!(marked, vec![2]);
    }

    #[test]
    fn name_substring_fallback_marks_first_match_only() {
        // Session identity's entry id matches no standing, but the name
        // appears (case-insensitively) in two rows; only the first is
        // marked.
        let standings = vec![
            standing(10, "Somebody Else", "Gamma", 700, 1),
            standing(11, "DAN PATEL", "Delta", 650, 2),
            standing(12, "Dan Patel Jr", "Echo", 600, 3),
        ];
        let rows = build_rows(&standings, Some(&identity(999, "Dan Patel")));
        let marked: Vec<usize> = rows
            .iter()
            .filter(|r| r.is_current_user)
            .map(|r| r.position)
            .collect();
        assert_eq!(marked, vec![2]);
    }

    #[test]
    fn entry_id_match_takes_precedence_over_name_match() {
        let standings = vec![
            standing(10, "Dan Patel", "Imposter FC", 700, 1),
            standing(11, "D. Patel", "Real FC", 650, 2),
        ];
        let rows = build_rows(&standings, Some(&identity(11, "Dan Patel")));
        assert!(!rows[0].is_current_user);
        assert!(rows[1].is_current_user);
    }

    #[test]
    fn no_match_marks_nothing() {
        let standings = vec![standing(1, "Ann One", "Alpha", 900, 1)];
        let rows = build_rows(&standings, Some(&identity(42, "Zed Nobody")));
        assert!(rows.iter().all(|r| !r.is_current_user));
    }

    #[test]
    fn blank_names_get_placeholders() {
        let standings = vec![standing(1, "", "", 0, 1)];
        let rows = build_rows(&standings, None);
        assert_eq!(rows[0].player_name, "Unknown");
        assert_eq!(rows[0].entry_name, "Untitled Team");
    }

    #[test]
    fn empty_standings_produce_no_rows() {
        // The widget layer renders the "not available" row for this case.
        assert!(build_rows(&[], None).is_empty());
    }
}
