//! All-time winner standings.

use serde::{Deserialize, Serialize};

/// Shown when a win record references a participant that no longer exists.
pub const UNKNOWN_NAME: &str = "(unknown)";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Standing {
    pub participant_id: String,
    pub name: String,
    pub image: String,
    pub wins: i64,
    pub rank: u32,
}

/// Sort by win count descending and assign competition ranks: tied entries
/// share a rank, and the next distinct count resumes at its list position
/// (counts 5, 5, 3 rank as 1, 1, 3).
pub fn rank_standings(mut standings: Vec<Standing>) -> Vec<Standing> {
    standings.sort_by(|a, b| b.wins.cmp(&a.wins));

    let mut rank = 1u32;
    let mut previous_wins: Option<i64> = None;
    for (index, standing) in standings.iter_mut().enumerate() {
        if let Some(previous) = previous_wins {
            if standing.wins < previous {
                rank = index as u32 + 1;
            }
        }
        previous_wins = Some(standing.wins);
        standing.rank = rank;
    }
    standings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(id: &str, wins: i64) -> Standing {
        Standing {
            participant_id: id.to_string(),
            name: id.to_string(),
            image: String::new(),
            wins,
            rank: 0,
        }
    }

    #[test]
    fn ties_share_rank_and_next_resumes_at_position() {
        let ranked = rank_standings(vec![standing("C", 3), standing("A", 5), standing("B", 5)]);

        assert_eq!(ranked.len(), 3);
        assert_eq!((ranked[0].participant_id.as_str(), ranked[0].rank), ("A", 1));
        assert_eq!((ranked[1].participant_id.as_str(), ranked[1].rank), ("B", 1));
        assert_eq!((ranked[2].participant_id.as_str(), ranked[2].rank), ("C", 3));
    }

    #[test]
    fn distinct_counts_rank_sequentially() {
        let ranked = rank_standings(vec![standing("A", 7), standing("B", 4), standing("C", 1)]);
        let ranks: Vec<u32> = ranked.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(rank_standings(Vec::new()).is_empty());
    }

    #[test]
    fn sort_is_stable_for_tied_entries() {
        let ranked = rank_standings(vec![standing("A", 2), standing("B", 2), standing("C", 2)]);
        let ids: Vec<&str> = ranked.iter().map(|s| s.participant_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert!(ranked.iter().all(|s| s.rank == 1));
    }
}
