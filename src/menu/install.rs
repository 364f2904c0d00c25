//! Batched installation of the confirmed selection.

use colored::Colorize;

use super::catalog::CATALOG;
use super::session::SelectionSet;
use crate::pkg::Backend;

/// Outcome of one category's batched install call.
#[derive(Debug, PartialEq, Eq)]
pub enum CategoryOutcome {
    SkippedEmpty,
    Succeeded,
    Failed(String),
}

/// Per-category outcomes in catalog order.
#[derive(Debug, Default)]
pub struct InstallReport {
    pub entries: Vec<(&'static str, CategoryOutcome)>,
}

impl InstallReport {
    pub fn failed(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, outcome)| matches!(outcome, CategoryOutcome::Failed(_)))
    }

    /// One line per category with a status marker.
    pub fn print(&self) {
        for (id, outcome) in &self.entries {
            match outcome {
                CategoryOutcome::SkippedEmpty => {
                    println!("{} {id}: nothing selected", "-".dimmed())
                }
                CategoryOutcome::Succeeded => println!("{} {id}: installed", "✓".green()),
                CategoryOutcome::Failed(reason) => println!("{} {id}: {reason}", "✗".red()),
            }
        }
    }
}

/// Install every selected package, one batched call per category.
///
/// Categories run in catalog order. A failing category is recorded and
/// the remaining categories still run.
pub fn run_install(selection: &SelectionSet, backend: &Backend) -> InstallReport {
    let mut report = InstallReport::default();
    for category in CATALOG {
        let packages = selection
            .get(category.id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let outcome = if packages.is_empty() {
            CategoryOutcome::SkippedEmpty
        } else {
            match backend.install(packages) {
                Ok(()) => CategoryOutcome::Succeeded,
                Err(err) => CategoryOutcome::Failed(format!("{err:#}")),
            }
        };
        report.entries.push((category.id, outcome));
    }
    report
}
