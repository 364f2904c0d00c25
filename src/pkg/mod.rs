//! Package manager abstraction.
//!
//! The backend is selected once at startup from a single configuration
//! value and stays fixed for the process lifetime. All six operations
//! (install, remove, search, sync, upgrade, orphan removal) dispatch
//! through [`Backend`] to the resolved manager.
//!
//! # Architecture
//!
//! - [`ManagerKind`]: closed enum of supported managers plus an explicit
//!   `Unsupported` variant carrying the raw configuration value
//! - [`Backend`]: the six operations, each a single batched invocation
//! - [`CommandRunner`]: execution seam; the real implementation shells out
//!   via duct, tests substitute a recording fake

mod backend;
mod manager;
mod search;

pub use backend::{Backend, CommandRunner, DuctRunner};
pub use manager::{ManagerKind, PkgError};
pub use search::SearchResults;
