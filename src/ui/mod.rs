pub mod app;
pub mod events;
pub mod input;
pub mod layout;
pub mod render;
pub mod source_form;
pub mod terminal_guard;
pub mod theme;

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use crate::config::ConfigStore;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

/// Run the front-end until the user quits.
///
/// Single-threaded cooperative loop: input, relay output, list results and
/// ticks all arrive on one channel, so `App` is only ever touched here.
pub fn run(
    config: ConfigStore,
    cli_override: Option<PathBuf>,
    skip_onboarding: bool,
) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let tick_rate = Duration::from_millis(250);
    let events = EventHandler::new(tick_rate);
    let sandboxed = std::env::var_os("FLATPAK_ID").is_some();
    let mut app = App::new(
        config,
        cli_override,
        skip_onboarding,
        sandboxed,
        events.sender(),
    );
    if app.onboarding.is_none() {
        app.refresh_mods();
    }

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Tick) => app.on_tick(),
            Ok(AppEvent::Resize(_, _)) => {}
            Ok(AppEvent::Relay(event)) => app.on_relay(event),
            Ok(AppEvent::ModList(result)) => app.on_mod_list(result),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    Ok(())
}
