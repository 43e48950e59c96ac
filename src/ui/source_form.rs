use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;

use crate::config::{CliConfig, CliSource};

/// Focusable rows of the CLI source form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Bundled,
    Custom,
    Path,
    Confirm,
}

/// What the caller should do after a key was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormAction {
    None,
    Confirm,
    Cancel,
}

/// Form state for choosing where `h2mm-cli` comes from.
///
/// Shared by the onboarding wizard (full-screen, first run) and the
/// preferences dialog (popup); the two differ only in chrome and in what
/// happens on confirm.
#[derive(Debug, Clone)]
pub struct SourceForm {
    pub source: CliSource,
    pub custom_path: String,
    pub focus: FormField,
    pub error: Option<String>,
}

impl SourceForm {
    pub fn from_config(cli: &CliConfig) -> Self {
        Self {
            source: cli.source,
            custom_path: cli
                .custom_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            focus: FormField::Bundled,
            error: None,
        }
    }

    pub fn can_confirm(&self) -> bool {
        self.source == CliSource::Bundled || !self.custom_path.trim().is_empty()
    }

    /// The CLI settings this form represents, for persisting.
    pub fn to_cli_config(&self) -> CliConfig {
        let path = self.custom_path.trim();
        CliConfig {
            source: self.source,
            custom_path: if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            },
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Up => self.focus_prev(),
            KeyCode::Down => self.focus_next(),
            KeyCode::Tab => self.focus_next(),
            KeyCode::Enter | KeyCode::Char(' ') if self.focus != FormField::Path => {
                match self.focus {
                    FormField::Bundled => {
                        self.source = CliSource::Bundled;
                        self.error = None;
                    }
                    FormField::Custom => {
                        self.source = CliSource::Custom;
                    }
                    FormField::Confirm => {
                        if self.can_confirm() {
                            return FormAction::Confirm;
                        }
                        self.error =
                            Some("Select the h2mm-cli executable path first".to_string());
                    }
                    FormField::Path => {}
                }
            }
            KeyCode::Enter if self.focus == FormField::Path => self.focus = FormField::Confirm,
            KeyCode::Backspace if self.focus == FormField::Path => {
                self.custom_path.pop();
            }
            KeyCode::Char(c) if self.focus == FormField::Path => {
                self.custom_path.push(c);
                self.error = None;
            }
            _ => {}
        }
        FormAction::None
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            FormField::Bundled => FormField::Custom,
            FormField::Custom if self.source == CliSource::Custom => FormField::Path,
            FormField::Custom => FormField::Confirm,
            FormField::Path => FormField::Confirm,
            FormField::Confirm => FormField::Bundled,
        };
    }

    fn focus_prev(&mut self) {
        self.focus = match self.focus {
            FormField::Bundled => FormField::Confirm,
            FormField::Custom => FormField::Bundled,
            FormField::Path => FormField::Custom,
            FormField::Confirm if self.source == CliSource::Custom => FormField::Path,
            FormField::Confirm => FormField::Custom,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn empty_form() -> SourceForm {
        SourceForm::from_config(&CliConfig::default())
    }

    #[test]
    fn bundled_confirms_without_path() {
        let mut form = empty_form();
        form.focus = FormField::Confirm;
        assert_eq!(form.on_key(key(KeyCode::Enter)), FormAction::Confirm);
    }

    #[test]
    fn custom_requires_path_before_confirm() {
        let mut form = empty_form();
        form.focus = FormField::Custom;
        assert_eq!(form.on_key(key(KeyCode::Enter)), FormAction::None);
        form.focus = FormField::Confirm;
        assert_eq!(form.on_key(key(KeyCode::Enter)), FormAction::None);
        assert!(form.error.is_some());
    }

    #[test]
    fn typing_fills_the_path_field() {
        let mut form = empty_form();
        form.source = CliSource::Custom;
        form.focus = FormField::Path;
        for c in "/opt/cli".chars() {
            form.on_key(key(KeyCode::Char(c)));
        }
        assert_eq!(form.custom_path, "/opt/cli");
        form.on_key(key(KeyCode::Backspace));
        assert_eq!(form.custom_path, "/opt/cl");
    }

    #[test]
    fn path_field_skipped_for_bundled_source() {
        let mut form = empty_form();
        form.focus = FormField::Custom;
        form.on_key(key(KeyCode::Down));
        assert_eq!(form.focus, FormField::Confirm);
    }

    #[test]
    fn to_cli_config_trims_and_drops_empty_path() {
        let mut form = empty_form();
        form.source = CliSource::Custom;
        form.custom_path = "  /opt/h2mm-cli  ".to_string();
        let cli = form.to_cli_config();
        assert_eq!(cli.custom_path, Some(PathBuf::from("/opt/h2mm-cli")));

        form.custom_path = "   ".to_string();
        assert!(form.to_cli_config().custom_path.is_none());
    }

    #[test]
    fn escape_cancels() {
        let mut form = empty_form();
        assert_eq!(form.on_key(key(KeyCode::Esc)), FormAction::Cancel);
    }
}
