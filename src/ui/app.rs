use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crate::config::ConfigStore;
use crate::mods::{spawn_list_worker, CommandPolicy, ModAction, ModEntry};
use crate::relay::{RelayEvent, RelaySession};
use crate::ui::events::AppEvent;
use crate::ui::source_form::SourceForm;

const TOAST_TTL: Duration = Duration::from_secs(4);

/// Pages of the main window, mirroring the original front-end's stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Installed,
    Install,
    Uninstall,
    Update,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Installed, Page::Install, Page::Uninstall, Page::Update];

    pub fn title(self) -> &'static str {
        match self {
            Page::Installed => "Installed",
            Page::Install => "Install",
            Page::Uninstall => "Uninstall",
            Page::Update => "Update",
        }
    }

    pub fn next(self) -> Page {
        match self {
            Page::Installed => Page::Install,
            Page::Install => Page::Uninstall,
            Page::Uninstall => Page::Update,
            Page::Update => Page::Installed,
        }
    }

    pub fn prev(self) -> Page {
        match self {
            Page::Installed => Page::Update,
            Page::Install => Page::Installed,
            Page::Uninstall => Page::Install,
            Page::Update => Page::Uninstall,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallField {
    Name,
    Archive,
}

/// Text fields of the Install page.
#[derive(Debug)]
pub struct InstallForm {
    pub name: String,
    pub archive: String,
    pub focus: InstallField,
}

impl Default for InstallForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            archive: String::new(),
            focus: InstallField::Name,
        }
    }
}

impl InstallForm {
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.archive.trim().is_empty()
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            InstallField::Name => InstallField::Archive,
            InstallField::Archive => InstallField::Name,
        };
    }

    pub fn focused_field(&mut self) -> &mut String {
        match self.focus {
            InstallField::Name => &mut self.name,
            InstallField::Archive => &mut self.archive,
        }
    }
}

struct Toast {
    message: String,
    error: bool,
    shown_at: Instant,
}

struct ActiveAction {
    session: RelaySession,
    action: ModAction,
}

pub struct App {
    should_quit: bool,
    pub page: Page,
    /// First-run wizard; `Some` until onboarding completes.
    pub onboarding: Option<SourceForm>,
    /// Preferences dialog; `Some` while open.
    pub preferences: Option<SourceForm>,
    config: ConfigStore,
    cli_override: Option<PathBuf>,
    sandboxed: bool,
    events: Sender<AppEvent>,
    pub mods: Vec<ModEntry>,
    pub mods_error: Option<String>,
    refreshing: bool,
    pub installed_selected: usize,
    pub uninstall_selected: usize,
    pub install_form: InstallForm,
    /// Streamed output of the current (or most recent) relay session.
    pub log: String,
    active: Option<ActiveAction>,
    toast: Option<Toast>,
}

impl App {
    pub fn new(
        config: ConfigStore,
        cli_override: Option<PathBuf>,
        skip_onboarding: bool,
        sandboxed: bool,
        events: Sender<AppEvent>,
    ) -> Self {
        let snapshot = config.get();
        let onboarding = if snapshot.onboarding.complete || skip_onboarding {
            None
        } else {
            Some(SourceForm::from_config(&snapshot.cli))
        };

        Self {
            should_quit: false,
            page: Page::Installed,
            onboarding,
            preferences: None,
            config,
            cli_override,
            sandboxed,
            events,
            mods: Vec::new(),
            mods_error: None,
            refreshing: false,
            installed_selected: 0,
            uninstall_selected: 0,
            install_form: InstallForm::default(),
            log: String::new(),
            active: None,
            toast: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Resolution policy for the external tool. A `--cli-path` override
    /// wins over the persisted source selection.
    pub fn policy(&self) -> CommandPolicy {
        match &self.cli_override {
            Some(path) => CommandPolicy::override_path(path.clone(), self.sandboxed),
            None => CommandPolicy::new(&self.config.get().cli, self.sandboxed),
        }
    }

    pub fn busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_action(&self) -> Option<&ModAction> {
        self.active.as_ref().map(|a| &a.action)
    }

    pub fn cli_source_label(&self) -> String {
        if self.cli_override.is_some() {
            return "override".to_string();
        }
        match self.config.get().cli.source {
            crate::config::CliSource::Bundled => "bundled".to_string(),
            crate::config::CliSource::Custom => "custom".to_string(),
        }
    }

    /// Kick off a `list` refresh on the worker thread.
    pub fn refresh_mods(&mut self) {
        if self.refreshing {
            return;
        }
        match self.policy().list_command() {
            Ok(command) => {
                self.refreshing = true;
                let tx = self.events.clone();
                spawn_list_worker(command, move |result| {
                    let _ = tx.send(AppEvent::ModList(result));
                });
            }
            Err(err) => {
                self.mods_error = Some(err.to_string());
            }
        }
    }

    /// Run a mutating operation through the relay, streaming into the log.
    ///
    /// The UI serializes operations: while one session is active, starting
    /// another is refused with a toast. The relay itself would happily run
    /// them concurrently.
    pub fn start_action(&mut self, action: ModAction) {
        if self.busy() {
            self.set_toast("An operation is already running", true);
            return;
        }
        let command = match self.policy().action_command(&action) {
            Ok(command) => command,
            Err(err) => {
                self.set_toast(err.to_string(), true);
                return;
            }
        };

        tracing::info!(command = %command, "starting mod operation");
        self.log = format!("{}\n\n", action.describe());
        let tx = self.events.clone();
        let session = RelaySession::spawn(command, move |event| {
            let _ = tx.send(AppEvent::Relay(event));
        });
        self.active = Some(ActiveAction { session, action });
    }

    pub fn on_relay(&mut self, event: RelayEvent) {
        match event {
            RelayEvent::Chunk { session, text } => {
                if self.is_active_session(session) {
                    self.log.push_str(&text);
                }
            }
            RelayEvent::Done { session, outcome } => {
                if !self.is_active_session(session) {
                    return;
                }
                let ActiveAction { action, .. } = match self.active.take() {
                    Some(active) => active,
                    None => return,
                };
                let success = outcome.is_success();
                self.set_toast(action.toast(success), !success);
                if success {
                    if matches!(action, ModAction::Install { .. }) {
                        self.install_form = InstallForm::default();
                    }
                    self.refresh_mods();
                }
            }
        }
    }

    fn is_active_session(&self, session: crate::relay::SessionId) -> bool {
        self.active.as_ref().is_some_and(|a| a.session.id() == session)
    }

    pub fn on_mod_list(&mut self, result: Result<Vec<ModEntry>, String>) {
        self.refreshing = false;
        match result {
            Ok(mods) => {
                self.mods = mods;
                self.mods_error = None;
                self.clamp_selections();
            }
            Err(err) => {
                self.mods_error = Some(err);
            }
        }
    }

    fn clamp_selections(&mut self) {
        let max = self.mods.len().saturating_sub(1);
        self.installed_selected = self.installed_selected.min(max);
        self.uninstall_selected = self.uninstall_selected.min(max);
    }

    /// Move the selection of whichever mod list the current page shows.
    pub fn move_selection(&mut self, delta: i64) {
        if self.mods.is_empty() {
            return;
        }
        let selected = match self.page {
            Page::Installed => &mut self.installed_selected,
            Page::Uninstall => &mut self.uninstall_selected,
            _ => return,
        };
        let len = self.mods.len() as i64;
        *selected = (*selected as i64 + delta).clamp(0, len - 1) as usize;
    }

    pub fn selected_mod(&self) -> Option<&ModEntry> {
        let index = match self.page {
            Page::Installed => self.installed_selected,
            Page::Uninstall => self.uninstall_selected,
            _ => return None,
        };
        self.mods.get(index)
    }

    pub fn on_tick(&mut self) {
        if let Some(toast) = &self.toast {
            if toast.shown_at.elapsed() >= TOAST_TTL {
                self.toast = None;
            }
        }
    }

    pub fn set_toast(&mut self, message: impl Into<String>, error: bool) {
        self.toast = Some(Toast {
            message: message.into(),
            error,
            shown_at: Instant::now(),
        });
    }

    pub fn toast_line(&self) -> Option<(&str, bool)> {
        self.toast.as_ref().map(|t| (t.message.as_str(), t.error))
    }

    /// Persist the wizard's choices and enter the main window.
    pub fn finish_onboarding(&mut self) {
        let Some(form) = self.onboarding.take() else {
            return;
        };
        let cli = form.to_cli_config();
        match self.config.update(|config| {
            config.cli = cli;
            config.onboarding.complete = true;
        }) {
            Ok(()) => {
                self.set_toast("Setup complete", false);
                self.refresh_mods();
            }
            Err(err) => {
                let mut form = form;
                form.error = Some(err.to_string());
                self.onboarding = Some(form);
            }
        }
    }

    pub fn open_preferences(&mut self) {
        if self.preferences.is_none() {
            self.preferences = Some(SourceForm::from_config(&self.config.get().cli));
        }
    }

    pub fn close_preferences(&mut self) {
        self.preferences = None;
    }

    /// Persist the preferences dialog; on failure keep it open with the
    /// error shown.
    pub fn save_preferences(&mut self) {
        let Some(form) = self.preferences.take() else {
            return;
        };
        let cli = form.to_cli_config();
        match self.config.update(|config| config.cli = cli) {
            Ok(()) => {
                self.set_toast("Preferences saved", false);
                self.refresh_mods();
            }
            Err(err) => {
                let mut form = form;
                form.error = Some(err.to_string());
                self.preferences = Some(form);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CliSource, Config};
    use crate::ui::source_form::FormField;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn test_app(config: Config) -> (App, TempDir, mpsc::Receiver<AppEvent>) {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(config, dir.path().join("config.toml"));
        let (tx, rx) = mpsc::channel();
        (App::new(store, None, false, false, tx), dir, rx)
    }

    #[test]
    fn fresh_config_starts_in_onboarding() {
        let (app, _dir, _rx) = test_app(Config::default());
        assert!(app.onboarding.is_some());
    }

    #[test]
    fn completed_onboarding_goes_straight_to_main() {
        let mut config = Config::default();
        config.onboarding.complete = true;
        let (app, _dir, _rx) = test_app(config);
        assert!(app.onboarding.is_none());
    }

    #[test]
    fn finish_onboarding_persists_choice_and_flag() {
        let (mut app, dir, _rx) = test_app(Config::default());
        if let Some(form) = &mut app.onboarding {
            form.source = CliSource::Custom;
            form.custom_path = "/opt/h2mm-cli".to_string();
        }
        app.finish_onboarding();
        assert!(app.onboarding.is_none());

        let saved = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(saved.onboarding.complete);
        assert_eq!(saved.cli.source, CliSource::Custom);
    }

    #[test]
    fn failed_onboarding_save_keeps_wizard_open() {
        let (mut app, _dir, _rx) = test_app(Config::default());
        if let Some(form) = &mut app.onboarding {
            // custom source with no path fails validation on save
            form.source = CliSource::Custom;
            form.custom_path = String::new();
        }
        app.finish_onboarding();
        let form = app.onboarding.as_ref().expect("wizard stays open");
        assert!(form.error.is_some());
    }

    #[test]
    fn selection_clamps_to_list_length() {
        let mut config = Config::default();
        config.onboarding.complete = true;
        let (mut app, _dir, _rx) = test_app(config);
        app.installed_selected = 10;
        app.on_mod_list(Ok(vec![ModEntry {
            name: "only".to_string(),
        }]));
        assert_eq!(app.installed_selected, 0);

        app.move_selection(5);
        assert_eq!(app.installed_selected, 0);
        app.move_selection(-5);
        assert_eq!(app.installed_selected, 0);
    }

    #[test]
    fn list_error_is_kept_for_display() {
        let mut config = Config::default();
        config.onboarding.complete = true;
        let (mut app, _dir, _rx) = test_app(config);
        app.on_mod_list(Err("h2mm-cli not found".to_string()));
        assert_eq!(app.mods_error.as_deref(), Some("h2mm-cli not found"));
    }

    #[test]
    fn preferences_round_trip() {
        let mut config = Config::default();
        config.onboarding.complete = true;
        let (mut app, dir, _rx) = test_app(config);

        app.open_preferences();
        if let Some(form) = &mut app.preferences {
            assert_eq!(form.focus, FormField::Bundled);
            form.source = CliSource::Custom;
            form.custom_path = "/opt/h2mm-cli".to_string();
        }
        app.save_preferences();
        assert!(app.preferences.is_none());

        let saved = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(saved.cli.source, CliSource::Custom);
    }

    #[test]
    fn page_cycle_is_closed() {
        let mut page = Page::Installed;
        for _ in 0..Page::ALL.len() {
            page = page.next();
        }
        assert_eq!(page, Page::Installed);
        assert_eq!(Page::Install.prev(), Page::Installed);
    }
}
