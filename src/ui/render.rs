use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::config::CliSource;
use crate::ui::app::{App, InstallField, Page};
use crate::ui::layout::{centered_rect, layout_regions, split_body_for_log};
use crate::ui::source_form::{FormField, SourceForm};
use crate::ui::theme::{
    ACCENT, DIM_TEXT, GLOBAL_BORDER, HEADER_TEXT, POPUP_BORDER, SELECTED_BG, STATUS_ERROR,
    STATUS_OK,
};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    if let Some(form) = &app.onboarding {
        draw_onboarding(frame, form, area);
        return;
    }

    let (header, body, footer) = layout_regions(area);
    draw_tabs(frame, app, header);
    match app.page {
        Page::Installed => draw_installed(frame, app, body),
        Page::Install => draw_install(frame, app, body),
        Page::Uninstall => draw_uninstall(frame, app, body),
        Page::Update => draw_update(frame, app, body),
    }
    draw_footer(frame, app, footer);

    if let Some(form) = &app.preferences {
        let popup = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" Preferences ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(POPUP_BORDER));
        let paragraph = Paragraph::new(source_form_lines(form)).block(block);
        frame.render_widget(paragraph, popup);
    }
}

fn draw_tabs(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let titles: Vec<Line> = Page::ALL
        .iter()
        .map(|page| Line::from(page.title()))
        .collect();
    let index = Page::ALL
        .iter()
        .position(|page| *page == app.page)
        .unwrap_or(0);
    let title = format!(" h2mm-tui — source: {} ", app.cli_source_label());
    let tabs = Tabs::new(titles)
        .select(index)
        .style(Style::default().fg(DIM_TEXT))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        );
    frame.render_widget(tabs, area);
}

fn draw_installed(frame: &mut Frame<'_>, app: &App, body: Rect) {
    let (list_area, log_area) = maybe_split_for_log(app, body);
    draw_mod_list(
        frame,
        app,
        list_area,
        " Installed Mods ",
        app.installed_selected,
    );
    if let Some(log_area) = log_area {
        draw_log(frame, app, log_area);
    }
}

fn draw_install(frame: &mut Frame<'_>, app: &App, body: Rect) {
    let (form_area, log_area) = maybe_split_for_log(app, body);

    let field_line = |label: &str, value: &str, focused: bool| {
        let marker = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(HEADER_TEXT)
        };
        Line::from(vec![
            Span::styled(marker.to_string(), style),
            Span::styled(format!("{:<14}", label), style),
            Span::raw(value.to_string()),
        ])
    };

    let mut lines = vec![
        Line::from(""),
        field_line(
            "Mod name:",
            &app.install_form.name,
            app.install_form.focus == InstallField::Name,
        ),
        field_line(
            "Archive path:",
            &app.install_form.archive,
            app.install_form.focus == InstallField::Archive,
        ),
        Line::from(""),
    ];
    if app.install_form.is_valid() {
        lines.push(Line::from(Span::styled(
            "  Press Enter to install",
            Style::default().fg(STATUS_OK),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  Fill in both fields to install",
            Style::default().fg(DIM_TEXT),
        )));
    }

    let block = Block::default()
        .title(" Install a Mod ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), form_area);

    if let Some(log_area) = log_area {
        draw_log(frame, app, log_area);
    }
}

fn draw_uninstall(frame: &mut Frame<'_>, app: &App, body: Rect) {
    let (list_area, log_area) = maybe_split_for_log(app, body);
    draw_mod_list(
        frame,
        app,
        list_area,
        " Uninstall a Mod ",
        app.uninstall_selected,
    );
    if let Some(log_area) = log_area {
        draw_log(frame, app, log_area);
    }
}

fn draw_update(frame: &mut Frame<'_>, app: &App, body: Rect) {
    let (info_area, log_area) = maybe_split_for_log(app, body);
    let text = if app.busy() {
        "Update in progress..."
    } else {
        "Press Enter to check for mod updates"
    };
    let block = Block::default()
        .title(" Updates ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(HEADER_TEXT))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, info_area);

    if let Some(log_area) = log_area {
        draw_log(frame, app, log_area);
    }
}

fn draw_mod_list(frame: &mut Frame<'_>, app: &App, area: Rect, title: &str, selected: usize) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));

    if let Some(error) = &app.mods_error {
        let paragraph = Paragraph::new(error.as_str())
            .style(Style::default().fg(STATUS_ERROR))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    if app.mods.is_empty() {
        let paragraph = Paragraph::new("No mods installed.\nUse the Install page to add one.")
            .style(Style::default().fg(DIM_TEXT))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .mods
        .iter()
        .map(|entry| ListItem::new(entry.name.clone()))
        .collect();
    let list = List::new(items)
        .style(Style::default().fg(HEADER_TEXT))
        .highlight_style(
            Style::default()
                .bg(SELECTED_BG)
                .fg(ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ")
        .block(block);
    let mut state = ListState::default();
    state.select(Some(selected.min(app.mods.len().saturating_sub(1))));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_log(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let inner_height = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = tail_lines(&app.log, inner_height)
        .into_iter()
        .map(Line::from)
        .collect();
    let title = if app.busy() { " Output (running) " } else { " Output " };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));
    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(HEADER_TEXT))
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Show the log pane once a session has written something, on every page
/// that can start one.
fn maybe_split_for_log(app: &App, body: Rect) -> (Rect, Option<Rect>) {
    if app.log.is_empty() || body.height < 6 {
        (body, None)
    } else {
        let (main, log) = split_body_for_log(body);
        (main, Some(log))
    }
}

/// Last `count` display lines of the raw session log. PTY output uses
/// CRLF line endings; carriage returns are stripped for display.
fn tail_lines(log: &str, count: usize) -> Vec<String> {
    let lines: Vec<String> = log
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect();
    let skip = lines.len().saturating_sub(count.max(1));
    lines.into_iter().skip(skip).collect()
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));

    let line = if let Some((message, error)) = app.toast_line() {
        let color = if error { STATUS_ERROR } else { STATUS_OK };
        Line::from(Span::styled(message.to_string(), Style::default().fg(color)))
    } else {
        let hints = match app.page {
            Page::Installed => "←/→ pages  ↑/↓ select  e enable  d disable  r refresh  p prefs  q quit",
            Page::Install => "←/→ pages  Tab switch field  Enter install  Esc quit",
            Page::Uninstall => "←/→ pages  ↑/↓ select  Enter uninstall  r refresh  q quit",
            Page::Update => "←/→ pages  Enter check for updates  p prefs  q quit",
        };
        Line::from(Span::styled(hints, Style::default().fg(DIM_TEXT)))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_onboarding(frame: &mut Frame<'_>, form: &SourceForm, area: Rect) {
    let popup = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from(Span::styled(
            "Welcome to h2mm-tui",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Choose where the h2mm-cli tool comes from.",
            Style::default().fg(DIM_TEXT),
        )),
        Line::from(""),
    ];
    lines.extend(source_form_lines(form));

    let block = Block::default()
        .title(" First-run Setup ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn source_form_lines(form: &SourceForm) -> Vec<Line<'static>> {
    let radio = |label: &str, selected: bool, focused: bool| {
        let mark = if selected { "(x)" } else { "( )" };
        let marker = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(HEADER_TEXT)
        };
        Line::from(Span::styled(format!("{}{} {}", marker, mark, label), style))
    };

    let path_focused = form.focus == FormField::Path;
    let path_style = if path_focused {
        Style::default().fg(ACCENT)
    } else if form.source == CliSource::Custom {
        Style::default().fg(HEADER_TEXT)
    } else {
        Style::default().fg(DIM_TEXT)
    };
    let path_marker = if path_focused { "> " } else { "  " };
    let path_value = if form.custom_path.is_empty() {
        "<type the executable path>".to_string()
    } else {
        form.custom_path.clone()
    };

    let confirm_focused = form.focus == FormField::Confirm;
    let confirm_style = if confirm_focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(HEADER_TEXT)
    };

    let mut lines = vec![
        radio(
            "Bundled h2mm-cli (from PATH)",
            form.source == CliSource::Bundled,
            form.focus == FormField::Bundled,
        ),
        radio(
            "Custom executable",
            form.source == CliSource::Custom,
            form.focus == FormField::Custom,
        ),
        Line::from(Span::styled(
            format!("{}    Path: {}", path_marker, path_value),
            path_style,
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}[ Save ]", if confirm_focused { "> " } else { "  " }),
            confirm_style,
        )),
    ];

    if let Some(error) = &form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(STATUS_ERROR),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ move  Enter select/confirm  Esc cancel",
        Style::default().fg(DIM_TEXT),
    )));
    lines
}
