//! The six backend operations against the resolved package manager.

use anyhow::{Context, Result};
use duct::cmd;

use super::manager::{ManagerKind, PkgError};
use super::search::SearchResults;

/// Executes external commands on behalf of [`Backend`].
///
/// The real implementation shells out via duct; tests substitute a
/// recording fake so operations can be asserted without touching the
/// system.
pub trait CommandRunner {
    /// Run a command to completion, inheriting stdio.
    fn run(&self, program: &str, args: &[String]) -> Result<()>;

    /// Run a command and capture its stdout.
    fn read(&self, program: &str, args: &[String]) -> Result<String>;
}

/// [`CommandRunner`] backed by duct.
pub struct DuctRunner;

impl CommandRunner for DuctRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<()> {
        cmd(program, args)
            .run()
            .with_context(|| format!("{program} failed"))?;
        Ok(())
    }

    fn read(&self, program: &str, args: &[String]) -> Result<String> {
        cmd(program, args)
            .read()
            .with_context(|| format!("{program} failed"))
    }
}

/// The resolved package manager plus the command runner.
///
/// Install and remove are always a single batched invocation carrying the
/// full package list; no operation ever calls the backend once per
/// package. Operations on an `Unsupported` kind fail with
/// [`PkgError::UnsupportedManager`] before any external call.
pub struct Backend {
    kind: ManagerKind,
    runner: Box<dyn CommandRunner>,
}

impl Backend {
    pub fn new(kind: ManagerKind) -> Self {
        Self::with_runner(kind, Box::new(DuctRunner))
    }

    pub fn with_runner(kind: ManagerKind, runner: Box<dyn CommandRunner>) -> Self {
        Self { kind, runner }
    }

    pub fn kind(&self) -> &ManagerKind {
        &self.kind
    }

    /// Install all given packages in one batched call.
    pub fn install(&self, packages: &[String]) -> Result<()> {
        let (program, base) = self.require(self.kind.install_command())?;
        if packages.is_empty() {
            return Ok(());
        }
        self.run_batched(program, base, packages)
    }

    /// Remove all given packages in one batched call.
    pub fn remove(&self, packages: &[String]) -> Result<()> {
        let (program, base) = self.require(self.kind.remove_command())?;
        if packages.is_empty() {
            return Ok(());
        }
        self.run_batched(program, base, packages)
    }

    /// Query the package index.
    pub fn search(&self, query: &str) -> Result<SearchResults> {
        let (program, base) = self.require(self.kind.search_command())?;
        let mut args = owned(base);
        args.push(query.to_string());
        let raw = self.runner.read(program, &args)?;
        Ok(SearchResults::new(query, raw))
    }

    /// Refresh the package index.
    pub fn sync_index(&self) -> Result<()> {
        let (program, base) = self.require(self.kind.sync_command())?;
        self.runner.run(program, &owned(base))
    }

    /// Upgrade every installed package.
    pub fn upgrade_all(&self) -> Result<()> {
        let (program, base) = self.require(self.kind.upgrade_command())?;
        self.runner.run(program, &owned(base))
    }

    /// Remove orphaned packages.
    ///
    /// Computes the orphan set first; an empty set means no removal call
    /// is made at all. A non-empty set is removed in one batched call.
    pub fn remove_orphans(&self) -> Result<()> {
        let (program, base) = self.require(self.kind.orphan_list_command())?;
        let output = self.runner.read(program, &owned(base))?;
        let orphans = self.kind.parse_orphans(&output);
        if orphans.is_empty() {
            println!("No orphaned packages, nothing to do");
            return Ok(());
        }
        self.remove(&orphans)
    }

    fn require(
        &self,
        command: Option<(&'static str, &'static [&'static str])>,
    ) -> Result<(&'static str, &'static [&'static str]), PkgError> {
        command.ok_or_else(|| PkgError::UnsupportedManager {
            raw: self.kind.display_name().to_string(),
        })
    }

    fn run_batched(&self, program: &str, base: &[&str], packages: &[String]) -> Result<()> {
        let mut args = owned(base);
        args.extend(packages.iter().cloned());
        self.runner.run(program, &args)
    }
}

fn owned(base: &[&str]) -> Vec<String> {
    base.iter().map(|arg| arg.to_string()).collect()
}
