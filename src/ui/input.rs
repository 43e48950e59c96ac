use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;

use crate::mods::ModAction;
use crate::ui::app::{App, Page};
use crate::ui::source_form::FormAction;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    // The wizard owns all input until onboarding completes.
    if let Some(form) = app.onboarding.as_mut() {
        match form.on_key(key) {
            FormAction::Confirm => app.finish_onboarding(),
            FormAction::Cancel => app.request_quit(),
            FormAction::None => {}
        }
        return;
    }

    if let Some(form) = app.preferences.as_mut() {
        match form.on_key(key) {
            FormAction::Confirm => app.save_preferences(),
            FormAction::Cancel => app.close_preferences(),
            FormAction::None => {}
        }
        return;
    }

    match key.code {
        KeyCode::Left => {
            app.page = app.page.prev();
            return;
        }
        KeyCode::Right => {
            app.page = app.page.next();
            return;
        }
        KeyCode::Esc => {
            app.request_quit();
            return;
        }
        _ => {}
    }

    match app.page {
        Page::Installed => handle_installed_key(app, key),
        Page::Install => handle_install_key(app, key),
        Page::Uninstall => handle_uninstall_key(app, key),
        Page::Update => handle_update_key(app, key),
    }
}

fn handle_installed_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        KeyCode::Char('r') => app.refresh_mods(),
        KeyCode::Char('e') => {
            if let Some(name) = selected_name(app) {
                app.start_action(ModAction::Enable { name });
            }
        }
        KeyCode::Char('d') => {
            if let Some(name) = selected_name(app) {
                app.start_action(ModAction::Disable { name });
            }
        }
        KeyCode::Char('p') => app.open_preferences(),
        KeyCode::Char('q') => app.request_quit(),
        _ => {}
    }
}

fn handle_install_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Up | KeyCode::Down => app.install_form.toggle_focus(),
        KeyCode::Backspace => {
            app.install_form.focused_field().pop();
        }
        KeyCode::Enter => {
            if app.install_form.is_valid() {
                let action = ModAction::Install {
                    archive: PathBuf::from(app.install_form.archive.trim()),
                    name: app.install_form.name.trim().to_string(),
                };
                app.start_action(action);
            }
        }
        // Plain characters go to the focused text field; this page has no
        // letter hotkeys for that reason.
        KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            app.install_form.focused_field().push(c);
        }
        _ => {}
    }
}

fn handle_uninstall_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        KeyCode::Enter => {
            if let Some(name) = selected_name(app) {
                app.start_action(ModAction::Uninstall { name });
            }
        }
        KeyCode::Char('r') => app.refresh_mods(),
        KeyCode::Char('p') => app.open_preferences(),
        KeyCode::Char('q') => app.request_quit(),
        _ => {}
    }
}

fn handle_update_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('u') => app.start_action(ModAction::Update),
        KeyCode::Char('p') => app.open_preferences(),
        KeyCode::Char('q') => app.request_quit(),
        _ => {}
    }
}

fn selected_name(app: &App) -> Option<String> {
    app.selected_mod().map(|entry| entry.name.clone())
}

fn is_ctrl_char(key: KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigStore};
    use crate::ui::events::AppEvent;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn main_app() -> (App, TempDir, mpsc::Receiver<AppEvent>) {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.onboarding.complete = true;
        let store = ConfigStore::new(config, dir.path().join("config.toml"));
        let (tx, rx) = mpsc::channel();
        (App::new(store, None, false, false, tx), dir, rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_cycle_pages() {
        let (mut app, _dir, _rx) = main_app();
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.page, Page::Install);
        handle_key(&mut app, key(KeyCode::Left));
        assert_eq!(app.page, Page::Installed);
    }

    #[test]
    fn install_page_captures_characters() {
        let (mut app, _dir, _rx) = main_app();
        app.page = Page::Install;
        for c in "armor".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.install_form.name, "armor");

        handle_key(&mut app, key(KeyCode::Tab));
        for c in "/tmp/a.zip".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.install_form.archive, "/tmp/a.zip");
        assert!(app.install_form.is_valid());
    }

    #[test]
    fn q_quits_on_list_pages_but_not_install() {
        let (mut app, _dir, _rx) = main_app();
        app.page = Page::Install;
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit());
        assert_eq!(app.install_form.name, "q");

        app.page = Page::Installed;
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn ctrl_c_always_quits() {
        let (mut app, _dir, _rx) = main_app();
        app.page = Page::Install;
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit());
    }

    #[test]
    fn p_opens_preferences_and_esc_closes() {
        let (mut app, _dir, _rx) = main_app();
        handle_key(&mut app, key(KeyCode::Char('p')));
        assert!(app.preferences.is_some());
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.preferences.is_none());
        assert!(!app.should_quit());
    }
}
