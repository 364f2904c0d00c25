//! The interactive selection state machine.
//!
//! Category menu -> per-category checklist -> confirmation. Selections
//! are sticky: reopening a category's checklist pre-marks whatever was
//! chosen for it before. Cancelling a checklist leaves that category's
//! selection untouched; cancelling the category menu aborts the whole
//! session.

use std::collections::HashMap;

use anyhow::Result;

use super::catalog::{self, CATALOG};
use super::dialog::{
    DialogGeometry, DialogItem, DialogMode, DialogProvider, DialogRequest, DialogResult, unquote,
};

/// Packages chosen per category id. Built by the session, consumed once
/// by the install orchestrator.
pub type SelectionSet = HashMap<String, Vec<String>>;

/// Tag of the entry that leaves the category menu for confirmation, and
/// of the confirmation itself.
const INSTALL_TAG: &str = "INSTALL";
const BACK_TAG: &str = "BACK";

/// Where the session currently is. `Done` and `Aborted` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MenuState {
    CategoryMenu,
    PackageChecklist(&'static str),
    Confirm,
    Done,
    Aborted,
}

/// How a finished session ended.
#[derive(Debug)]
pub enum SessionOutcome {
    Confirmed(SelectionSet),
    Aborted,
}

pub struct SelectionSession<'a> {
    provider: &'a mut dyn DialogProvider,
    selections: SelectionSet,
}

impl<'a> SelectionSession<'a> {
    pub fn new(provider: &'a mut dyn DialogProvider) -> Self {
        Self {
            provider,
            selections: SelectionSet::new(),
        }
    }

    /// Drive the menu until the user confirms or aborts.
    pub fn run(mut self) -> Result<SessionOutcome> {
        let mut state = MenuState::CategoryMenu;
        loop {
            state = match state {
                MenuState::CategoryMenu => self.category_menu()?,
                MenuState::PackageChecklist(id) => self.package_checklist(id)?,
                MenuState::Confirm => self.confirm()?,
                MenuState::Done => return Ok(SessionOutcome::Confirmed(self.selections)),
                MenuState::Aborted => return Ok(SessionOutcome::Aborted),
            };
        }
    }

    fn category_menu(&mut self) -> Result<MenuState> {
        let mut items: Vec<DialogItem> = CATALOG
            .iter()
            .map(|category| DialogItem::new(category.id, category.label))
            .collect();
        items.push(DialogItem::new(INSTALL_TAG, "Install the selected packages"));

        let request = DialogRequest {
            title: "Package installer".to_string(),
            text: "Choose a category".to_string(),
            geometry: DialogGeometry::default(),
            items,
            mode: DialogMode::Single,
        };

        match self.provider.show(&request)? {
            DialogResult::Cancelled => Ok(MenuState::Aborted),
            DialogResult::Chosen(tags) => {
                let tag = tags.first().map(|tag| unquote(tag)).unwrap_or_default();
                if tag == INSTALL_TAG {
                    Ok(MenuState::Confirm)
                } else if let Some(category) = catalog::find(&tag) {
                    Ok(MenuState::PackageChecklist(category.id))
                } else {
                    // Unknown tag from the UI boundary, show the menu again
                    Ok(MenuState::CategoryMenu)
                }
            }
        }
    }

    fn package_checklist(&mut self, id: &'static str) -> Result<MenuState> {
        let Some(category) = catalog::find(id) else {
            return Ok(MenuState::CategoryMenu);
        };
        let current = self.selections.get(id);
        let items = category
            .packages
            .iter()
            .map(|package| {
                let checked = current.is_some_and(|chosen| chosen.iter().any(|p| p == package));
                DialogItem::checked(package, package, checked)
            })
            .collect();

        let request = DialogRequest {
            title: category.label.to_string(),
            text: format!("Select packages to install from '{}'", category.id),
            geometry: DialogGeometry::default(),
            items,
            mode: DialogMode::Multi,
        };

        match self.provider.show(&request)? {
            DialogResult::Chosen(tags) => {
                // Replace the category's subset with exactly what was
                // ticked, dropping any tag that is not in the catalog
                let chosen: Vec<String> = tags
                    .iter()
                    .map(|tag| unquote(tag))
                    .filter(|tag| category.packages.contains(&tag.as_str()))
                    .collect();
                self.selections.insert(id.to_string(), chosen);
                Ok(MenuState::CategoryMenu)
            }
            DialogResult::Cancelled => Ok(MenuState::CategoryMenu),
        }
    }

    fn confirm(&mut self) -> Result<MenuState> {
        let chosen = self.chosen_in_catalog_order();
        let text = if chosen.is_empty() {
            "No packages selected. Install nothing?".to_string()
        } else {
            format!(
                "Install {} package(s)?\n{}",
                chosen.len(),
                chosen.join(" ")
            )
        };

        let request = DialogRequest {
            title: "Confirm installation".to_string(),
            text,
            geometry: DialogGeometry::default(),
            items: vec![
                DialogItem::new(INSTALL_TAG, "Start the installation"),
                DialogItem::new(BACK_TAG, "Return to the category menu"),
            ],
            mode: DialogMode::Single,
        };

        match self.provider.show(&request)? {
            DialogResult::Chosen(tags)
                if tags.first().map(|tag| unquote(tag)).as_deref() == Some(INSTALL_TAG) =>
            {
                Ok(MenuState::Done)
            }
            // Declining returns to the menu, it does not abort
            DialogResult::Chosen(_) | DialogResult::Cancelled => Ok(MenuState::CategoryMenu),
        }
    }

    fn chosen_in_catalog_order(&self) -> Vec<String> {
        CATALOG
            .iter()
            .filter_map(|category| self.selections.get(category.id))
            .flat_map(|chosen| chosen.iter().cloned())
            .collect()
    }
}
