//! Selection coordinator shared by the card list and the map.
//!
//! The coordinator owns the single "selected record" identity and keeps its
//! position within the current filtered list up to date. Both views read the
//! same [`SelectionCoordinator`] and report clicks back to it; neither keeps a
//! selection of its own.
//!
//! # Policy
//!
//! - The first record is selected automatically the first time the filtered
//!   list is non-empty while nothing has been selected yet. This happens once:
//!   later re-filters never pick a new default.
//! - When the selected record is filtered out, the key is kept and the index
//!   becomes `None` (no active highlight). If a later filter brings the record
//!   back, its highlight returns.
//! - [`SelectionCoordinator::reset`] forgets everything; it is used when a new
//!   roster replaces the current one.

use crate::domain::{LocationRecord, RecordId, RecordKey};

/// Outcome of a selection update, consumed by the list and map views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// The selection now points at this index of the filtered list and it
    /// differs from the previous index. Views scroll to it and fly to it.
    Activated(usize),
    /// The selection no longer has an index in the filtered list.
    Deactivated,
    /// Nothing observable changed.
    Unchanged,
}

/// Selected record identity plus its derived index in the filtered list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionCoordinator {
    selected: Option<RecordKey>,
    selected_index: Option<usize>,
}

impl SelectionCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Composite key of the current selection, if one was ever made.
    #[must_use]
    pub fn selected_key(&self) -> Option<&RecordKey> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn selected_location_id(&self) -> Option<&RecordId> {
        self.selected.as_ref().map(|key| &key.practitioner_id)
    }

    #[must_use]
    pub fn selected_practice_location_id(&self) -> Option<&RecordId> {
        self.selected.as_ref().map(|key| &key.practice_location_id)
    }

    /// Position of the selected record in the current filtered list.
    ///
    /// `None` means "no active highlight": either nothing is selected or the
    /// selected record is not part of the filtered list.
    #[must_use]
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Returns the selected record from `filtered`, if it is visible.
    #[must_use]
    pub fn selected_record<'a>(&self, filtered: &'a [LocationRecord]) -> Option<&'a LocationRecord> {
        self.selected_index.and_then(|index| filtered.get(index))
    }

    /// Records an explicit selection (card click, marker click, keyboard).
    ///
    /// The key does not have to be present in `filtered`; if it is not, the
    /// selection is stored with no index.
    pub fn select(&mut self, key: RecordKey, filtered: &[LocationRecord]) -> SelectionChange {
        tracing::debug!(selected = %key, "selection requested");
        self.selected = Some(key);
        self.reindex(filtered)
    }

    /// Re-derives the selection after the filtered list changed.
    ///
    /// Applies the one-time default selection, then recomputes the index by
    /// composite key.
    pub fn sync(&mut self, filtered: &[LocationRecord]) -> SelectionChange {
        if self.selected.is_none() {
            if let Some(first) = filtered.first() {
                tracing::debug!(selected = %first.key(), "default selection applied");
                self.selected = Some(first.key());
            }
        }
        self.reindex(filtered)
    }

    /// Moves to the next record in `filtered`, wrapping to the first.
    pub fn select_next(&mut self, filtered: &[LocationRecord]) -> SelectionChange {
        self.step(filtered, |index, len| (index + 1) % len)
    }

    /// Moves to the previous record in `filtered`, wrapping to the last.
    pub fn select_previous(&mut self, filtered: &[LocationRecord]) -> SelectionChange {
        self.step(filtered, |index, len| if index == 0 { len - 1 } else { index - 1 })
    }

    /// Forgets the selection entirely, re-arming the default selection.
    pub fn reset(&mut self) {
        self.selected = None;
        self.selected_index = None;
    }

    fn step(&mut self, filtered: &[LocationRecord], next: impl Fn(usize, usize) -> usize) -> SelectionChange {
        if filtered.is_empty() {
            return SelectionChange::Unchanged;
        }
        let target = self
            .selected_index
            .map_or(0, |index| next(index, filtered.len()));
        self.select(filtered[target].key(), filtered)
    }

    fn reindex(&mut self, filtered: &[LocationRecord]) -> SelectionChange {
        let previous = self.selected_index;
        self.selected_index = self
            .selected
            .as_ref()
            .and_then(|key| filtered.iter().position(|record| record.has_key(key)));

        match (previous, self.selected_index) {
            (old, Some(new)) if old != Some(new) => SelectionChange::Activated(new),
            (Some(_), None) => SelectionChange::Deactivated,
            _ => SelectionChange::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(practitioner: &str, location: &str) -> LocationRecord {
        LocationRecord {
            practitioner_id: practitioner.into(),
            practice_location_id: location.into(),
            ..Default::default()
        }
    }

    fn abc() -> Vec<LocationRecord> {
        vec![record("A", "1"), record("B", "2"), record("C", "3")]
    }

    #[test]
    fn first_record_becomes_default_selection() {
        let mut selection = SelectionCoordinator::new();
        assert_eq!(selection.sync(&[]), SelectionChange::Unchanged);
        assert_eq!(selection.selected_key(), None);

        let filtered = abc();
        assert_eq!(selection.sync(&filtered), SelectionChange::Activated(0));
        assert_eq!(selection.selected_index(), Some(0));
        assert_eq!(selection.selected_location_id().map(RecordId::as_str), Some("A"));
        assert_eq!(selection.selected_practice_location_id().map(RecordId::as_str), Some("1"));
    }

    #[test]
    fn filtered_out_selection_keeps_key_without_index() {
        let mut selection = SelectionCoordinator::new();
        selection.sync(&abc());

        let without_a = vec![record("B", "2"), record("C", "3")];
        assert_eq!(selection.sync(&without_a), SelectionChange::Deactivated);
        assert_eq!(selection.selected_index(), None);
        assert_eq!(selection.selected_location_id().map(RecordId::as_str), Some("A"));
        assert!(selection.selected_record(&without_a).is_none());

        // No new default while a selection exists.
        assert_eq!(selection.sync(&without_a), SelectionChange::Unchanged);

        assert_eq!(selection.sync(&abc()), SelectionChange::Activated(0));
    }

    #[test]
    fn index_follows_record_when_list_shifts() {
        let mut selection = SelectionCoordinator::new();
        let filtered = abc();
        selection.select(RecordKey::new("C", "3"), &filtered);
        assert_eq!(selection.selected_index(), Some(2));

        let shifted = vec![record("C", "3"), record("B", "2")];
        assert_eq!(selection.sync(&shifted), SelectionChange::Activated(0));
    }

    #[test]
    fn composite_key_distinguishes_locations() {
        let filtered = vec![record("A", "1"), record("A", "2")];
        let mut selection = SelectionCoordinator::new();

        assert_eq!(selection.select(RecordKey::new("A", "2"), &filtered), SelectionChange::Activated(1));
        assert_eq!(selection.select(RecordKey::new("A", "2"), &filtered), SelectionChange::Unchanged);
    }

    #[test]
    fn keyboard_navigation_wraps() {
        let filtered = abc();
        let mut selection = SelectionCoordinator::new();
        selection.sync(&filtered);

        assert_eq!(selection.select_previous(&filtered), SelectionChange::Activated(2));
        assert_eq!(selection.select_next(&filtered), SelectionChange::Activated(0));
        assert_eq!(selection.select_next(&filtered), SelectionChange::Activated(1));
        assert_eq!(selection.select_next(&[]), SelectionChange::Unchanged);
    }

    #[test]
    fn reset_rearms_default() {
        let mut selection = SelectionCoordinator::new();
        selection.sync(&abc());
        selection.reset();
        assert_eq!(selection.selected_key(), None);

        let other = vec![record("Z", "9")];
        assert_eq!(selection.sync(&other), SelectionChange::Activated(0));
        assert_eq!(selection.selected_location_id().map(RecordId::as_str), Some("Z"));
    }
}
