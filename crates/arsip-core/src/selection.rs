//! Bulk-selection bookkeeping that survives pagination and filtering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Ids currently marked for a bulk action.
///
/// The set is independent of what is visible: toggling everything on one
/// page never touches ids selected on another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeSet<i64>);

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id`.
    pub fn toggle_one(&mut self, id: i64) {
        if !self.0.remove(&id) {
            self.0.insert(id);
        }
    }

    /// Adds every visible id when `checked`, otherwise removes only them.
    pub fn toggle_all_visible(&mut self, checked: bool, visible_ids: &[i64]) {
        if checked {
            self.0.extend(visible_ids.iter().copied());
        } else {
            for id in visible_ids {
                self.0.remove(id);
            }
        }
    }

    /// Computes the header checkbox flags for the visible page.
    pub fn state(&self, visible_ids: &[i64]) -> SelectionState {
        let selected_visible = visible_ids.iter().filter(|id| self.0.contains(id)).count();
        let all_selected = !visible_ids.is_empty() && selected_visible == visible_ids.len();

        SelectionState {
            all_selected,
            some_selected: selected_visible > 0 && !all_selected,
        }
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Removes every id in `ids`.
    pub fn remove_many<'a>(&mut self, ids: impl IntoIterator<Item = &'a i64>) {
        for id in ids {
            self.0.remove(id);
        }
    }

    /// Drops ids that are no longer present in `known`.
    pub fn retain_known(&mut self, known: impl Fn(i64) -> bool) {
        self.0.retain(|id| known(*id));
    }

    #[inline]
    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates selected ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    /// Returns the selected ids in ascending order.
    pub fn to_vec(&self) -> Vec<i64> {
        self.iter().collect()
    }
}

impl FromIterator<i64> for Selection {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Derived flags for the currently visible page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    /// Every visible id is selected and at least one is visible.
    pub all_selected: bool,
    /// Some but not all visible ids are selected.
    pub some_selected: bool,
}

impl SelectionState {
    /// Maps the flags onto a tri-state checkbox.
    pub fn checkbox(self) -> CheckboxState {
        match (self.all_selected, self.some_selected) {
            (true, _) => CheckboxState::Checked,
            (false, true) => CheckboxState::Indeterminate,
            (false, false) => CheckboxState::Unchecked,
        }
    }
}

/// Tri-state header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckboxState {
    Unchecked,
    Indeterminate,
    Checked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_one_flips_membership() {
        let mut selection = Selection::new();
        selection.toggle_one(4);
        assert!(selection.contains(4));
        selection.toggle_one(4);
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_visible_is_a_union() {
        let mut selection = Selection::from_iter([21]);
        selection.toggle_all_visible(true, &[1, 2, 3]);
        assert_eq!(selection.to_vec(), vec![1, 2, 3, 21]);

        selection.toggle_all_visible(false, &[1, 2, 3]);
        assert_eq!(selection.to_vec(), vec![21]);
    }

    #[test]
    fn derived_state_drives_the_checkbox() {
        let selection = Selection::from_iter([1, 2]);

        let all = selection.state(&[1, 2]);
        assert!(all.all_selected && !all.some_selected);
        assert_eq!(all.checkbox(), CheckboxState::Checked);

        let some = selection.state(&[1, 2, 3]);
        assert!(!some.all_selected && some.some_selected);
        assert_eq!(some.checkbox(), CheckboxState::Indeterminate);

        let none = selection.state(&[5]);
        assert_eq!(none.checkbox(), CheckboxState::Unchecked);
    }

    #[test]
    fn empty_page_is_never_all_selected() {
        let selection = Selection::from_iter([1]);
        assert_eq!(selection.state(&[]), SelectionState::default());
    }

    #[test]
    fn remove_many_and_retain() {
        let mut selection = Selection::from_iter([1, 2, 3, 4]);
        selection.remove_many(&[1, 3]);
        assert_eq!(selection.to_vec(), vec![2, 4]);

        selection.retain_known(|id| id != 4);
        assert_eq!(selection.to_vec(), vec![2]);
    }
}
