mod menu;
mod pkg;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::menu::{ConsoleDialog, SelectionSession, SessionOutcome};
use crate::pkg::{Backend, ManagerKind, PkgError};

/// Package manager frontend with an interactive bulk installer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Package manager backend (falls back to $PKM_MANAGER)
    #[arg(short, long, global = true)]
    manager: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install packages
    Install {
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// Remove packages
    Remove {
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// Search the package index
    Search { query: String },

    /// Refresh the package index
    Sync,

    /// Upgrade all installed packages
    Upgrade,

    /// Remove orphaned packages
    Orphans,

    /// Pick packages from the category menu and install them
    Menu,
}

fn main() {
    let cli = Cli::parse();
    let backend = Backend::new(startup_manager(cli.manager.as_deref()));

    if let Err(err) = run(&cli.command, &backend) {
        eprintln!("{} {err:#}", "error:".red());
        std::process::exit(1);
    }
}

/// Read the backend configuration once: flag first, environment second.
///
/// An empty value still resolves (to `Unsupported`) but warns right away
/// so misconfiguration is visible before the first operation.
fn startup_manager(flag: Option<&str>) -> ManagerKind {
    let value = match flag {
        Some(value) => value.to_string(),
        None => std::env::var("PKM_MANAGER").unwrap_or_default(),
    };
    if value.trim().is_empty() {
        eprintln!(
            "{} no package manager configured, set --manager or PKM_MANAGER",
            "warning:".yellow()
        );
    }
    ManagerKind::resolve(&value)
}

fn run(command: &Commands, backend: &Backend) -> Result<()> {
    match command {
        Commands::Install { packages } => backend.install(packages),
        Commands::Remove { packages } => backend.remove(packages),
        Commands::Search { query } => {
            let results = backend.search(query)?;
            if results.is_empty() {
                println!("No packages matching '{query}'");
                return Ok(());
            }
            for line in results.lines() {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Sync => backend.sync_index(),
        Commands::Upgrade => backend.upgrade_all(),
        Commands::Orphans => backend.remove_orphans(),
        Commands::Menu => run_menu(backend),
    }
}

fn run_menu(backend: &Backend) -> Result<()> {
    // Misconfiguration surfaces before the first dialog, not after the
    // user has picked packages
    if let ManagerKind::Unsupported(raw) = backend.kind() {
        return Err(PkgError::UnsupportedManager { raw: raw.clone() }.into());
    }

    let mut dialog = ConsoleDialog::new()?;
    match SelectionSession::new(&mut dialog).run()? {
        SessionOutcome::Aborted => {
            println!("Installation aborted");
            Ok(())
        }
        SessionOutcome::Confirmed(selection) => {
            let report = menu::run_install(&selection, backend);
            report.print();
            if report.failed() {
                anyhow::bail!("some categories failed to install");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_startup_manager_prefers_the_flag() {
        unsafe { std::env::set_var("PKM_MANAGER", "apt-get") };
        assert_eq!(startup_manager(Some("pacman")), ManagerKind::Pacman);
        unsafe { std::env::remove_var("PKM_MANAGER") };
    }

    #[test]
    #[serial]
    fn test_startup_manager_falls_back_to_environment() {
        unsafe { std::env::set_var("PKM_MANAGER", "pacman") };
        assert_eq!(startup_manager(None), ManagerKind::Pacman);
        unsafe { std::env::remove_var("PKM_MANAGER") };
    }

    #[test]
    #[serial]
    fn test_startup_manager_without_configuration_is_unsupported() {
        unsafe { std::env::remove_var("PKM_MANAGER") };
        assert_eq!(
            startup_manager(None),
            ManagerKind::Unsupported(String::new())
        );
    }
}
