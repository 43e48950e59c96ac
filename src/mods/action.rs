use std::path::PathBuf;

/// A mutating operation delegated to the external tool.
///
/// These run through the relay so interactive prompts and progress output
/// stream into the log pane. `list` is not an action; it is a captured
/// query handled by the catalog worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModAction {
    Install { archive: PathBuf, name: String },
    Uninstall { name: String },
    Update,
    Enable { name: String },
    Disable { name: String },
}

impl ModAction {
    /// Arguments appended to the base command.
    pub fn cli_args(&self) -> Vec<String> {
        match self {
            ModAction::Install { archive, name } => vec![
                "install".to_string(),
                archive.to_string_lossy().into_owned(),
                "--name".to_string(),
                name.clone(),
            ],
            ModAction::Uninstall { name } => vec!["uninstall".to_string(), name.clone()],
            ModAction::Update => vec!["update".to_string()],
            ModAction::Enable { name } => vec!["enable".to_string(), name.clone()],
            ModAction::Disable { name } => vec!["disable".to_string(), name.clone()],
        }
    }

    /// Header line written to the log pane when the action starts.
    pub fn describe(&self) -> String {
        match self {
            ModAction::Install { name, .. } => format!("Installing '{}'...", name),
            ModAction::Uninstall { name } => format!("Attempting to uninstall '{}'...", name),
            ModAction::Update => "Checking for updates...".to_string(),
            ModAction::Enable { name } => format!("Enabling '{}'...", name),
            ModAction::Disable { name } => format!("Disabling '{}'...", name),
        }
    }

    /// Toast shown after the session's outcome arrives.
    pub fn toast(&self, success: bool) -> String {
        match (self, success) {
            (ModAction::Install { name, .. }, true) => {
                format!("Successfully installed '{}'", name)
            }
            (ModAction::Install { .. }, false) => {
                "Failed to install mod. See log for details.".to_string()
            }
            (ModAction::Uninstall { .. }, true) => "Mod uninstalled successfully.".to_string(),
            (ModAction::Uninstall { .. }, false) => {
                "Failed to uninstall mod. See log for details.".to_string()
            }
            (ModAction::Update, true) => "Update check finished.".to_string(),
            (ModAction::Update, false) => "Update check failed. See log for details.".to_string(),
            (ModAction::Enable { name }, true) => format!("Enabled '{}'", name),
            (ModAction::Enable { .. }, false) => {
                "Failed to enable mod. See log for details.".to_string()
            }
            (ModAction::Disable { name }, true) => format!("Disabled '{}'", name),
            (ModAction::Disable { .. }, false) => {
                "Failed to disable mod. See log for details.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ModAction;
    use std::path::PathBuf;

    #[test]
    fn install_args_include_archive_and_name() {
        let action = ModAction::Install {
            archive: PathBuf::from("/mods/armor.zip"),
            name: "armor".to_string(),
        };
        assert_eq!(
            action.cli_args(),
            ["install", "/mods/armor.zip", "--name", "armor"]
        );
    }

    #[test]
    fn update_takes_no_operands() {
        assert_eq!(ModAction::Update.cli_args(), ["update"]);
    }

    #[test]
    fn toasts_distinguish_outcomes() {
        let action = ModAction::Uninstall {
            name: "armor".to_string(),
        };
        assert_eq!(action.toast(true), "Mod uninstalled successfully.");
        assert!(action.toast(false).contains("See log"));
    }
}
