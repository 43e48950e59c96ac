use std::path::PathBuf;
use thiserror::Error;

use crate::config::{CliConfig, CliSource};
use crate::mods::ModAction;
use crate::relay::Command;

/// Name of the bundled executable, resolved through PATH.
pub const DEFAULT_CLI: &str = "h2mm-cli";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("CLI source is 'custom' but no executable path is configured")]
    MissingCustomPath,
}

/// Decides how the external tool is invoked.
///
/// This is caller-side policy: the relay receives a fully resolved
/// [`Command`] and never does resolution itself. Sandbox state is injected
/// at construction rather than read ambiently so the rewrite is testable.
#[derive(Debug, Clone)]
pub struct CommandPolicy {
    source: CliSource,
    custom_path: Option<PathBuf>,
    sandboxed: bool,
}

impl CommandPolicy {
    pub fn new(cli: &CliConfig, sandboxed: bool) -> Self {
        Self {
            source: cli.source,
            custom_path: cli.custom_path.clone(),
            sandboxed,
        }
    }

    /// Policy from config plus the process environment. Inside a Flatpak
    /// sandbox (`FLATPAK_ID` set) a custom host binary must be reached
    /// through `flatpak-spawn --host`.
    pub fn from_env(cli: &CliConfig) -> Self {
        Self::new(cli, std::env::var_os("FLATPAK_ID").is_some())
    }

    /// One-shot override from the command line: behaves like a custom
    /// source without touching the persisted config.
    pub fn override_path(path: PathBuf, sandboxed: bool) -> Self {
        Self {
            source: CliSource::Custom,
            custom_path: Some(path),
            sandboxed,
        }
    }

    fn base_command(&self) -> Result<Command, LaunchError> {
        match self.source {
            CliSource::Bundled => Ok(Command::new(DEFAULT_CLI)),
            CliSource::Custom => {
                let path = self
                    .custom_path
                    .as_ref()
                    .filter(|p| !p.as_os_str().is_empty())
                    .ok_or(LaunchError::MissingCustomPath)?;
                let path = path.to_string_lossy().into_owned();
                if self.sandboxed {
                    Ok(Command::new("flatpak-spawn").arg("--host").arg(path))
                } else {
                    Ok(Command::new(path))
                }
            }
        }
    }

    /// Full command for a mutating mod operation (run through the relay).
    pub fn action_command(&self, action: &ModAction) -> Result<Command, LaunchError> {
        Ok(self.base_command()?.args(action.cli_args()))
    }

    /// Full command for `list` (run as a captured subprocess).
    pub fn list_command(&self) -> Result<Command, LaunchError> {
        Ok(self.base_command()?.arg("list"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;

    fn custom_config(path: &str) -> CliConfig {
        CliConfig {
            source: CliSource::Custom,
            custom_path: Some(PathBuf::from(path)),
        }
    }

    #[test]
    fn bundled_resolves_through_path() {
        let policy = CommandPolicy::new(&CliConfig::default(), false);
        let cmd = policy.list_command().unwrap();
        assert_eq!(cmd.program(), DEFAULT_CLI);
        assert_eq!(cmd.arg_slice(), ["list"]);
    }

    #[test]
    fn custom_path_used_directly_outside_sandbox() {
        let policy = CommandPolicy::new(&custom_config("/opt/h2mm-cli"), false);
        let cmd = policy.list_command().unwrap();
        assert_eq!(cmd.program(), "/opt/h2mm-cli");
    }

    #[test]
    fn custom_path_wrapped_inside_sandbox() {
        let policy = CommandPolicy::new(&custom_config("/opt/h2mm-cli"), true);
        let cmd = policy.list_command().unwrap();
        assert_eq!(cmd.program(), "flatpak-spawn");
        assert_eq!(cmd.arg_slice(), ["--host", "/opt/h2mm-cli", "list"]);
    }

    #[test]
    fn custom_without_path_is_an_error() {
        let policy = CommandPolicy::new(
            &CliConfig {
                source: CliSource::Custom,
                custom_path: None,
            },
            false,
        );
        assert!(matches!(
            policy.list_command(),
            Err(LaunchError::MissingCustomPath)
        ));
    }

    #[test]
    fn action_args_appended_to_base() {
        let policy = CommandPolicy::new(&CliConfig::default(), false);
        let cmd = policy
            .action_command(&ModAction::Uninstall {
                name: "heavy-armor".to_string(),
            })
            .unwrap();
        assert_eq!(cmd.arg_slice(), ["uninstall", "heavy-armor"]);
    }
}
