//! Package manager enum and the per-backend command tables.

use thiserror::Error;

/// The package manager all operations target.
///
/// Resolved exactly once at startup from the backend configuration value
/// and immutable afterwards. Unrecognized values become `Unsupported` so
/// the offending configuration shows up in error messages instead of being
/// silently defaulted away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerKind {
    /// APT - Debian/Ubuntu family
    AptGet,
    /// Pacman - Arch Linux family
    Pacman,
    /// Configuration value that matched no known manager
    Unsupported(String),
}

#[derive(Debug, Error)]
pub enum PkgError {
    #[error("unsupported package manager '{raw}' (set --manager or PKM_MANAGER to apt-get or pacman)")]
    UnsupportedManager { raw: String },
}

impl ManagerKind {
    /// Map the backend configuration value to a manager.
    ///
    /// Pure and total over exact strings: anything else (including the
    /// empty string) resolves to `Unsupported` carrying the raw value.
    pub fn resolve(value: &str) -> Self {
        match value {
            "apt-get" | "apt" => Self::AptGet,
            "pacman" => Self::Pacman,
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// Human-readable name; for `Unsupported` this is the raw value.
    pub fn display_name(&self) -> &str {
        match self {
            Self::AptGet => "apt-get",
            Self::Pacman => "pacman",
            Self::Unsupported(raw) => raw,
        }
    }

    /// Install command prefix. Privileged, package names appended.
    pub fn install_command(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            Self::AptGet => Some(("sudo", &["apt-get", "install", "-y"])),
            Self::Pacman => Some(("sudo", &["pacman", "-S", "--noconfirm"])),
            Self::Unsupported(_) => None,
        }
    }

    /// Remove command prefix. Privileged, package names appended.
    pub fn remove_command(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            Self::AptGet => Some(("sudo", &["apt-get", "remove", "-y"])),
            Self::Pacman => Some(("sudo", &["pacman", "-Rns", "--noconfirm"])),
            Self::Unsupported(_) => None,
        }
    }

    /// Search command prefix. Unprivileged, the query is appended.
    pub fn search_command(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            Self::AptGet => Some(("apt-cache", &["search"])),
            Self::Pacman => Some(("pacman", &["-Ss"])),
            Self::Unsupported(_) => None,
        }
    }

    /// Refresh the package index. Privileged.
    pub fn sync_command(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            Self::AptGet => Some(("sudo", &["apt-get", "update"])),
            Self::Pacman => Some(("sudo", &["pacman", "-Sy"])),
            Self::Unsupported(_) => None,
        }
    }

    /// Upgrade every installed package. Privileged.
    pub fn upgrade_command(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            Self::AptGet => Some(("sudo", &["apt-get", "upgrade", "-y"])),
            Self::Pacman => Some(("sudo", &["pacman", "-Syu", "--noconfirm"])),
            Self::Unsupported(_) => None,
        }
    }

    /// List orphaned packages without removing anything. Unprivileged.
    ///
    /// For apt this is a simulated autoremove whose `Remv` lines name the
    /// orphans; pacman prints one orphan per line.
    pub fn orphan_list_command(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            Self::AptGet => Some(("apt-get", &["-s", "autoremove"])),
            Self::Pacman => Some(("pacman", &["-Qdtq"])),
            Self::Unsupported(_) => None,
        }
    }

    /// Extract the orphan set from the output of [`Self::orphan_list_command`].
    pub fn parse_orphans(&self, output: &str) -> Vec<String> {
        match self {
            Self::AptGet => output
                .lines()
                .filter_map(|line| line.strip_prefix("Remv "))
                .filter_map(|rest| rest.split_whitespace().next())
                .map(|name| name.to_string())
                .collect(),
            Self::Pacman => output
                .lines()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .map(|line| line.to_string())
                .collect(),
            Self::Unsupported(_) => Vec::new(),
        }
    }
}

impl std::fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_values() {
        assert_eq!(ManagerKind::resolve("apt-get"), ManagerKind::AptGet);
        assert_eq!(ManagerKind::resolve("apt"), ManagerKind::AptGet);
        assert_eq!(ManagerKind::resolve("pacman"), ManagerKind::Pacman);
    }

    #[test]
    fn test_resolve_keeps_raw_value() {
        assert_eq!(
            ManagerKind::resolve("brew"),
            ManagerKind::Unsupported("brew".to_string())
        );
        assert_eq!(
            ManagerKind::resolve(""),
            ManagerKind::Unsupported(String::new())
        );
        // No normalization, the mapping is over exact strings
        assert_eq!(
            ManagerKind::resolve(" pacman "),
            ManagerKind::Unsupported(" pacman ".to_string())
        );
    }

    #[test]
    fn test_command_tables_for_unsupported() {
        let kind = ManagerKind::Unsupported("brew".to_string());
        assert!(kind.install_command().is_none());
        assert!(kind.remove_command().is_none());
        assert!(kind.search_command().is_none());
        assert!(kind.sync_command().is_none());
        assert!(kind.upgrade_command().is_none());
        assert!(kind.orphan_list_command().is_none());
    }

    #[test]
    fn test_privileged_commands_use_sudo() {
        for kind in [ManagerKind::AptGet, ManagerKind::Pacman] {
            assert_eq!(kind.install_command().unwrap().0, "sudo");
            assert_eq!(kind.remove_command().unwrap().0, "sudo");
            assert_eq!(kind.sync_command().unwrap().0, "sudo");
            assert_eq!(kind.upgrade_command().unwrap().0, "sudo");
            // Search and orphan listing only read state
            assert_ne!(kind.search_command().unwrap().0, "sudo");
            assert_ne!(kind.orphan_list_command().unwrap().0, "sudo");
        }
    }

    #[test]
    fn test_parse_orphans_pacman() {
        let output = "orphan-one\norphan-two\n\n";
        assert_eq!(
            ManagerKind::Pacman.parse_orphans(output),
            vec!["orphan-one", "orphan-two"]
        );
        assert!(ManagerKind::Pacman.parse_orphans("").is_empty());
    }

    #[test]
    fn test_parse_orphans_apt() {
        let output = "NOTE: This is only a simulation!\n\
                      Remv libfoo [1.2-3]\n\
                      Remv libbar [0.9-1]\n\
                      0 upgraded, 0 newly installed, 2 to remove\n";
        assert_eq!(
            ManagerKind::AptGet.parse_orphans(output),
            vec!["libfoo", "libbar"]
        );
        assert!(ManagerKind::AptGet.parse_orphans("Reading state information...\n").is_empty());
    }
}
