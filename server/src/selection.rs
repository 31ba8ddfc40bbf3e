//! In-memory participant selection for the next spin.

use std::collections::HashSet;

use wheel_db::participants::Participant;

/// Which participants are on the wheel. Lives only in memory; the directory
/// itself is the persisted source of truth.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    /// Flip one id. Returns whether the id is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn select(&mut self, id: &str) {
        self.ids.insert(id.to_string());
    }

    pub fn deselect(&mut self, id: &str) {
        self.ids.remove(id);
    }

    pub fn select_all<'a, I>(&mut self, participants: I)
    where
        I: IntoIterator<Item = &'a Participant>,
    {
        self.ids = participants.into_iter().map(|p| p.id.clone()).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in a stable order for JSON payloads.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// The selected subset of `participants`, preserving directory order.
    pub fn selected(&self, participants: &[Participant]) -> Vec<Participant> {
        participants
            .iter()
            .filter(|p| self.ids.contains(&p.id))
            .cloned()
            .collect()
    }
}

/// Case-insensitive substring match on participant names. A blank query
/// matches everyone.
pub fn filter_by_name<'a>(participants: &'a [Participant], query: &str) -> Vec<&'a Participant> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return participants.iter().collect();
    }
    participants
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: &str, name: &str) -> Participant {
        Participant {
            id: id.to_string(),
            name: name.to_string(),
            image: String::new(),
        }
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = SelectionSet::default();
        assert!(selection.toggle("u1"));
        assert!(selection.is_selected("u1"));
        assert!(!selection.toggle("u1"));
        assert!(selection.is_empty());
    }

    #[test]
    fn select_all_then_clear() {
        let directory = vec![participant("u1", "Ann"), participant("u2", "Bo")];
        let mut selection = SelectionSet::default();

        selection.select_all(&directory);
        assert_eq!(selection.len(), 2);

        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn selected_preserves_directory_order() {
        let directory = vec![
            participant("u1", "Ann"),
            participant("u2", "Bo"),
            participant("u3", "Chi"),
        ];
        let mut selection = SelectionSet::default();
        selection.select("u3");
        selection.select("u1");

        let picked = selection.selected(&directory);
        let ids: Vec<&str> = picked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u3"]);
    }

    #[test]
    fn stale_ids_simply_never_match() {
        let directory = vec![participant("u1", "Ann")];
        let mut selection = SelectionSet::default();
        selection.select("u1");
        selection.select("gone");

        assert_eq!(selection.len(), 2);
        assert_eq!(selection.selected(&directory).len(), 1);
    }

    #[test]
    fn filter_matches_case_insensitive_substrings() {
        let directory = vec![
            participant("u1", "Ann Tran"),
            participant("u2", "Bo"),
            participant("u3", "Joanna"),
        ];

        let hits = filter_by_name(&directory, "AN");
        let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ann Tran", "Joanna"]);

        assert_eq!(filter_by_name(&directory, "  ").len(), 3);
        assert!(filter_by_name(&directory, "zzz").is_empty());
    }
}
