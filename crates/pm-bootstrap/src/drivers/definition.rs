//! Static descriptions of the built-in package managers
//!
//! Templates may contain `{root}`, replaced with the manager's resolved
//! installation root, and `{brew_prefix}`, replaced with Homebrew's root so
//! brew-backed managers work right after brew was installed in the same run.

use crate::context::Platform;

const UNIX: &[Platform] = &[Platform::MacOs, Platform::Linux];

/// Everything a [`CommandDriver`](super::CommandDriver) needs to know about
/// one package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerDefinition {
    pub name: &'static str,
    pub dependencies: &'static [&'static str],
    pub platforms: &'static [Platform],
    /// Environment variable overriding the installation root.
    pub root_env: Option<&'static str>,
    /// Root relative to the home directory (or absolute).
    pub default_root: &'static str,
    pub macos_root: Option<&'static str>,
    /// Prints the version; exit status 0 means installed.
    pub probe: &'static str,
    /// First capture group is the version.
    pub version_pattern: &'static str,
    pub install_macos: &'static str,
    pub install_linux: &'static str,
    /// Substring whose presence in the shell profile means "initialised".
    pub profile_marker: &'static str,
    pub init_snippet: &'static str,
}

impl ManagerDefinition {
    pub fn default_root(&self, platform: Platform) -> &'static str {
        match (platform, self.macos_root) {
            (Platform::MacOs, Some(root)) => root,
            _ => self.default_root,
        }
    }

    pub fn install_command(&self, platform: Platform) -> Option<&'static str> {
        match platform {
            Platform::MacOs => Some(self.install_macos),
            Platform::Linux => Some(self.install_linux),
            Platform::Other => None,
        }
    }
}

pub const BREW: ManagerDefinition = ManagerDefinition {
    name: "brew",
    dependencies: &[],
    platforms: UNIX,
    root_env: Some("HOMEBREW_PREFIX"),
    default_root: "/home/linuxbrew/.linuxbrew",
    macos_root: Some("/opt/homebrew"),
    probe: r#"PATH="{root}/bin:$PATH" brew --version"#,
    version_pattern: r"Homebrew\s+(\d+\.\d+\.\d+)",
    install_macos: r#"NONINTERACTIVE=1 /bin/bash -c "$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)""#,
    install_linux: r#"NONINTERACTIVE=1 /bin/bash -c "$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)""#,
    profile_marker: "brew shellenv",
    init_snippet: r#"eval "$({root}/bin/brew shellenv)""#,
};

pub const ASDF: ManagerDefinition = ManagerDefinition {
    name: "asdf",
    dependencies: &["brew"],
    platforms: UNIX,
    root_env: Some("ASDF_DIR"),
    default_root: ".asdf",
    macos_root: None,
    probe: r#"PATH="{root}/bin:{brew_prefix}/bin:$PATH" asdf --version"#,
    version_pattern: r"v?(\d+\.\d+\.\d+)",
    install_macos: r#"PATH="{brew_prefix}/bin:$PATH" brew install asdf"#,
    install_linux: r#"git clone https://github.com/asdf-vm/asdf.git "{root}""#,
    profile_marker: "asdf",
    init_snippet: r#". "{root}/asdf.sh""#,
};

pub const NVM: ManagerDefinition = ManagerDefinition {
    name: "nvm",
    dependencies: &[],
    platforms: UNIX,
    root_env: Some("NVM_DIR"),
    default_root: ".nvm",
    macos_root: None,
    probe: r#"source "{root}/nvm.sh" && nvm --version"#,
    version_pattern: r"(\d+\.\d+\.\d+)",
    install_macos: "curl -o- https://raw.githubusercontent.com/nvm-sh/nvm/master/install.sh | bash",
    install_linux: "curl -o- https://raw.githubusercontent.com/nvm-sh/nvm/master/install.sh | bash",
    profile_marker: "nvm.sh",
    init_snippet: r#"export NVM_DIR="{root}" && [ -s "$NVM_DIR/nvm.sh" ] && . "$NVM_DIR/nvm.sh""#,
};

pub const RBENV: ManagerDefinition = ManagerDefinition {
    name: "rbenv",
    dependencies: &["brew"],
    platforms: UNIX,
    root_env: Some("RBENV_ROOT"),
    default_root: ".rbenv",
    macos_root: None,
    probe: r#"PATH="{root}/bin:{brew_prefix}/bin:$PATH" rbenv --version"#,
    version_pattern: r"rbenv\s+(\d+\.\d+\.\d+)",
    install_macos: r#"PATH="{brew_prefix}/bin:$PATH" brew install rbenv ruby-build"#,
    install_linux: r#"git clone https://github.com/rbenv/rbenv.git "{root}""#,
    profile_marker: "rbenv init",
    init_snippet: r#"eval "$(rbenv init -)""#,
};

pub const PYENV: ManagerDefinition = ManagerDefinition {
    name: "pyenv",
    dependencies: &["brew"],
    platforms: UNIX,
    root_env: Some("PYENV_ROOT"),
    default_root: ".pyenv",
    macos_root: None,
    probe: r#"PATH="{root}/bin:{brew_prefix}/bin:$PATH" pyenv --version"#,
    version_pattern: r"pyenv\s+(\d+\.\d+\.\d+)",
    install_macos: r#"PATH="{brew_prefix}/bin:$PATH" brew install pyenv"#,
    install_linux: "curl -fsSL https://github.com/pyenv/pyenv-installer/raw/master/bin/pyenv-installer | bash",
    profile_marker: "pyenv init",
    init_snippet: r#"export PYENV_ROOT="{root}" && eval "$(pyenv init -)""#,
};

pub const SDKMAN: ManagerDefinition = ManagerDefinition {
    name: "sdkman",
    dependencies: &[],
    platforms: UNIX,
    root_env: Some("SDKMAN_DIR"),
    default_root: ".sdkman",
    macos_root: None,
    probe: r#"source "{root}/bin/sdkman-init.sh" && sdk version"#,
    version_pattern: r"SDKMAN!?\s+(?:script:\s*)?(\d+\.\d+\.\d+)",
    install_macos: r#"curl -s "https://get.sdkman.io" | bash"#,
    install_linux: r#"curl -s "https://get.sdkman.io" | bash"#,
    profile_marker: "sdkman-init.sh",
    init_snippet: r#"source "{root}/bin/sdkman-init.sh""#,
};

/// Every built-in manager.
pub const BUILTIN: &[ManagerDefinition] = &[BREW, ASDF, NVM, RBENV, PYENV, SDKMAN];
