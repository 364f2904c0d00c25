//! Interactive bulk installer.
//!
//! A multi-level dialog flow: pick a category, tick packages in its
//! checklist, repeat, then confirm and install everything in one batched
//! call per category.

pub mod catalog;
pub mod dialog;
pub mod install;
pub mod session;

pub use dialog::{ConsoleDialog, MenuError};
pub use install::{CategoryOutcome, InstallReport, run_install};
pub use session::{SelectionSession, SessionOutcome};
