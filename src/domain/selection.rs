//! Draft permission set edited in the role form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::catalog;
use crate::domain::entities::PermissionCategory;

/// How much of a category is selected; shown as a tri-state checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    None,
    Some,
    All,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSelection {
    selected: BTreeSet<String>,
}

impl PermissionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a stored permission list. Ids missing from the catalog are dropped.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selected = ids
            .into_iter()
            .filter_map(|id| catalog::find(id.as_ref()))
            .map(|p| p.id.to_string())
            .collect();
        Self { selected }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Flips a single permission. Unknown ids are ignored; returns whether the id
    /// is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if catalog::find(id).is_none() {
            return false;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
            return true;
        }
        false
    }

    pub fn state(&self) -> SelectionState {
        Self::state_of(
            catalog::all().iter().filter(|p| self.is_selected(p.id)).count(),
            catalog::all().len(),
        )
    }

    pub fn category_state(&self, category: PermissionCategory) -> SelectionState {
        let ids = catalog::ids_in_category(category);
        let selected = ids.iter().filter(|id| self.is_selected(id)).count();
        Self::state_of(selected, ids.len())
    }

    fn state_of(selected: usize, total: usize) -> SelectionState {
        if selected == 0 {
            SelectionState::None
        } else if selected == total {
            SelectionState::All
        } else {
            SelectionState::Some
        }
    }

    /// Selects the whole catalog unless it is already fully selected, in which case
    /// everything is cleared.
    pub fn toggle_all(&mut self) {
        if self.state() == SelectionState::All {
            self.selected.clear();
        } else {
            self.selected = catalog::all().iter().map(|p| p.id.to_string()).collect();
        }
    }

    /// Same rule as [`toggle_all`](Self::toggle_all), scoped to one category. A
    /// partially selected category becomes fully selected.
    pub fn toggle_category(&mut self, category: PermissionCategory) {
        let ids = catalog::ids_in_category(category);

        if self.category_state(category) == SelectionState::All {
            for id in ids {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(ids.into_iter().map(str::to_string));
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Selected ids in catalog order, ready to persist on a role.
    pub fn into_vec(self) -> Vec<String> {
        catalog::all()
            .iter()
            .filter(|p| self.selected.contains(p.id))
            .map(|p| p.id.to_string())
            .collect()
    }
}
