//! Package manager command generation
//!
//! Templates reference `[PKG_LINT]`, `[PKG_TYPECHECK]`, `[PKG_TEST]` and
//! `[PKG_BUILD]`; their values are derived from the project's package manager
//! and whether the repository is a monorepo.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// JavaScript package manager used by the target project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    #[default]
    Pnpm,
    Yarn,
}

impl PackageManager {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
        }
    }

    pub fn all() -> [PackageManager; 3] {
        [PackageManager::Npm, PackageManager::Pnpm, PackageManager::Yarn]
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = PackageManagerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "npm" => Ok(PackageManager::Npm),
            "pnpm" => Ok(PackageManager::Pnpm),
            "yarn" => Ok(PackageManager::Yarn),
            other => Err(PackageManagerParseError(other.to_string())),
        }
    }
}

/// Error when parsing an invalid package manager string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManagerParseError(pub String);

impl fmt::Display for PackageManagerParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid package manager: {}", self.0)
    }
}

impl std::error::Error for PackageManagerParseError {}

/// The four commands a template can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Lint,
    Typecheck,
    Test,
    Build,
}

impl CommandKind {
    pub fn all() -> [CommandKind; 4] {
        [
            CommandKind::Lint,
            CommandKind::Typecheck,
            CommandKind::Test,
            CommandKind::Build,
        ]
    }

    /// Token name the command is published under.
    pub fn token(&self) -> &'static str {
        match self {
            CommandKind::Lint => "PKG_LINT",
            CommandKind::Typecheck => "PKG_TYPECHECK",
            CommandKind::Test => "PKG_TEST",
            CommandKind::Build => "PKG_BUILD",
        }
    }

    fn script(&self) -> &'static str {
        match self {
            CommandKind::Lint => "lint",
            CommandKind::Typecheck => "typecheck",
            CommandKind::Test => "test",
            CommandKind::Build => "build",
        }
    }
}

/// Generated command set for one package manager configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManagerCommands {
    pub lint: String,
    pub typecheck: String,
    pub test: String,
    pub build: String,
}

impl PackageManagerCommands {
    pub fn generate(package_manager: PackageManager, is_monorepo: bool) -> Self {
        Self {
            lint: command_for(CommandKind::Lint, package_manager, is_monorepo),
            typecheck: command_for(CommandKind::Typecheck, package_manager, is_monorepo),
            test: command_for(CommandKind::Test, package_manager, is_monorepo),
            build: command_for(CommandKind::Build, package_manager, is_monorepo),
        }
    }

    pub fn command(&self, kind: CommandKind) -> &str {
        match kind {
            CommandKind::Lint => &self.lint,
            CommandKind::Typecheck => &self.typecheck,
            CommandKind::Test => &self.test,
            CommandKind::Build => &self.build,
        }
    }

    /// `(token, command)` pairs in lint, typecheck, test, build order.
    pub fn token_pairs(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        CommandKind::all()
            .into_iter()
            .map(move |kind| (kind.token(), self.command(kind)))
    }
}

/// Render a single command for the given configuration.
pub fn command_for(kind: CommandKind, package_manager: PackageManager, is_monorepo: bool) -> String {
    let script = kind.script();
    match (package_manager, is_monorepo) {
        (PackageManager::Npm, false) => format!("npm run {}", script),
        (PackageManager::Npm, true) => format!("npm run {} --workspaces", script),
        (PackageManager::Pnpm, false) => format!("pnpm {}", script),
        (PackageManager::Pnpm, true) => format!("pnpm -w {}", script),
        (PackageManager::Yarn, false) => format!("yarn {}", script),
        (PackageManager::Yarn, true) => format!("yarn workspaces run {}", script),
    }
}

// =============================================================================
// TESTS
// =============================================================================
