//! Selection state.
//!
//! Selection is tracked by node id so it survives rebuilds of the row
//! sequence. Besides the selected set it keeps two markers:
//! - `most_recent`: the last id acted upon
//! - `anchor`: the fixed end of an in-progress contiguous range

use std::collections::HashSet;

/// ID-based selection state.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Currently selected IDs
    selected: HashSet<String>,
    /// Last ID acted upon
    most_recent: Option<String>,
    /// Start of a contiguous range (Shift extension pivot)
    anchor: Option<String>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn selected(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Get the most recently acted upon ID.
    pub fn most_recent(&self) -> Option<&str> {
        self.most_recent.as_deref()
    }

    /// Get the anchor ID for range selection.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Clear all selection and both markers.
    /// Returns the IDs that were deselected.
    pub fn clear(&mut self) -> Vec<String> {
        let removed: Vec<_> = self.selected.drain().collect();
        self.anchor = None;
        self.most_recent = None;
        removed
    }

    /// Select a single ID (clears others and the anchor).
    /// Returns (added, removed) IDs.
    pub fn select(&mut self, id: &str) -> (Vec<String>, Vec<String>) {
        let removed: Vec<_> = self.selected.iter().filter(|&i| i != id).cloned().collect();
        let was_selected = self.selected.contains(id);
        self.selected.clear();
        self.selected.insert(id.to_string());
        self.most_recent = Some(id.to_string());
        self.anchor = None;
        let added = if was_selected {
            vec![]
        } else {
            vec![id.to_string()]
        };
        (added, removed)
    }

    /// Toggle selection of an ID (Ctrl+click behavior).
    /// Returns (added, removed) IDs.
    pub fn toggle(&mut self, id: &str) -> (Vec<String>, Vec<String>) {
        self.most_recent = Some(id.to_string());
        if self.selected.remove(id) {
            (vec![], vec![id.to_string()])
        } else {
            self.selected.insert(id.to_string());
            (vec![id.to_string()], vec![])
        }
    }

    /// Replace the selection with the range from the anchor to `target_id`
    /// (Shift+click behavior).
    ///
    /// The pivot is the anchor, or `most_recent` when no anchor is set (it
    /// then becomes the anchor so later extensions keep the same pivot).
    /// Requires the ordered list of visible IDs to determine the range.
    ///
    /// Returns (added, removed) IDs.
    pub fn range_select(
        &mut self,
        target_id: &str,
        all_ids_ordered: &[String],
    ) -> (Vec<String>, Vec<String>) {
        let anchor_id = self
            .anchor
            .clone()
            .or_else(|| self.most_recent.clone())
            .unwrap_or_else(|| target_id.to_string());

        let anchor_pos = all_ids_ordered.iter().position(|id| id == &anchor_id);
        let target_pos = all_ids_ordered.iter().position(|id| id == target_id);

        let (start, end) = match (anchor_pos, target_pos) {
            (Some(a), Some(t)) => {
                if a <= t {
                    (a, t)
                } else {
                    (t, a)
                }
            }
            // Anchor no longer visible: the target becomes the new pivot
            (None, Some(t)) => (t, t),
            _ => return (vec![], vec![]),
        };

        let range_ids: HashSet<String> = all_ids_ordered[start..=end].iter().cloned().collect();

        let removed: Vec<String> = self
            .selected
            .iter()
            .filter(|id| !range_ids.contains(*id))
            .cloned()
            .collect();
        for id in &removed {
            self.selected.remove(id);
        }

        let mut added = Vec::new();
        for id in &all_ids_ordered[start..=end] {
            if self.selected.insert(id.clone()) {
                added.push(id.clone());
            }
        }

        self.anchor = Some(if anchor_pos.is_some() {
            anchor_id
        } else {
            target_id.to_string()
        });
        self.most_recent = Some(target_id.to_string());

        (added, removed)
    }

    /// Select exactly the provided list of IDs.
    /// The first ID becomes the anchor and the last the most recent.
    /// Returns (added, removed) IDs.
    pub fn select_all(&mut self, all_ids: &[String]) -> (Vec<String>, Vec<String>) {
        let keep: HashSet<&String> = all_ids.iter().collect();
        let removed: Vec<String> = self
            .selected
            .iter()
            .filter(|id| !keep.contains(id))
            .cloned()
            .collect();
        for id in &removed {
            self.selected.remove(id);
        }

        let mut added = Vec::new();
        for id in all_ids {
            if self.selected.insert(id.clone()) {
                added.push(id.clone());
            }
        }
        self.anchor = all_ids.first().cloned();
        self.most_recent = all_ids.last().cloned();
        (added, removed)
    }

    /// Remove a single ID.
    ///
    /// If it was the most recent, another remaining member (the smallest)
    /// takes its place. Returns true if the ID was selected.
    pub fn deselect(&mut self, id: &str) -> bool {
        if !self.selected.remove(id) {
            return false;
        }
        if self.most_recent.as_deref() == Some(id) {
            self.most_recent = self.selected.iter().min().cloned();
        }
        if self.anchor.as_deref() == Some(id) {
            self.anchor = None;
        }
        true
    }

    /// Drop IDs (and markers) the predicate rejects.
    /// Returns the IDs that were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
        let removed: Vec<String> = self
            .selected
            .iter()
            .filter(|id| !keep(id.as_str()))
            .cloned()
            .collect();
        for id in &removed {
            self.selected.remove(id);
        }
        if self.most_recent.as_deref().is_some_and(|id| !keep(id)) {
            self.most_recent = self.selected.iter().min().cloned();
        }
        if self.anchor.as_deref().is_some_and(|id| !keep(id)) {
            self.anchor = None;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_range_uses_most_recent_when_no_anchor() {
        let order = ids(&["a", "b", "c", "d"]);
        let mut selection = Selection::new();
        selection.select("b");
        assert_eq!(selection.anchor(), None);

        selection.range_select("d", &order);
        assert_eq!(selection.selected(), ids(&["b", "c", "d"]));
        assert_eq!(selection.anchor(), Some("b"));
        assert_eq!(selection.most_recent(), Some("d"));

        // Shrinking keeps the pivot and replaces the range
        selection.range_select("a", &order);
        assert_eq!(selection.selected(), ids(&["a", "b"]));
    }

    #[test]
    fn test_deselect_most_recent_picks_remaining() {
        let mut selection = Selection::new();
        selection.toggle("x");
        selection.toggle("y");
        assert_eq!(selection.most_recent(), Some("y"));

        assert!(selection.deselect("y"));
        assert_eq!(selection.most_recent(), Some("x"));

        assert!(selection.deselect("x"));
        assert_eq!(selection.most_recent(), None);
        assert!(!selection.deselect("x"));
    }

    #[test]
    fn test_retain_prunes_markers() {
        let mut selection = Selection::new();
        selection.select_all(&ids(&["a", "b", "c"]));
        let removed = selection.retain(|id| id != "a" && id != "c");
        assert_eq!(removed.len(), 2);
        assert_eq!(selection.selected(), ids(&["b"]));
        assert_eq!(selection.anchor(), None);
        assert_eq!(selection.most_recent(), Some("b"));
    }
}
