//! The package catalog shown by the interactive installer.

/// A named group of packages, presented as one checklist screen.
#[derive(Debug)]
pub struct Category {
    pub id: &'static str,
    pub label: &'static str,
    pub packages: &'static [&'static str],
}

/// Categories in install-priority order: essentials first, desktop
/// applications last. The menu and the orchestrator both follow this
/// order, it is not derived from anything.
pub static CATALOG: &[Category] = &[
    Category {
        id: "core",
        label: "Core command line tools",
        packages: &[
            "vim", "git", "curl", "wget", "htop", "tmux", "zsh", "openssh",
        ],
    },
    Category {
        id: "pip",
        label: "Python tooling",
        packages: &[
            "python-pip",
            "python-setuptools",
            "python-virtualenv",
            "python-requests",
        ],
    },
    Category {
        id: "optional",
        label: "Optional utilities",
        packages: &["bat", "ranger", "ncdu", "neofetch", "lolcat"],
    },
    Category {
        id: "apps",
        label: "Desktop applications",
        packages: &["firefox", "vlc", "gimp", "libreoffice-fresh"],
    },
];

pub fn find(id: &str) -> Option<&'static Category> {
    CATALOG.iter().find(|category| category.id == id)
}
