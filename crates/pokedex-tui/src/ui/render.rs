use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use pokedex_core::{Route, MAX_TEAM_SIZE};

use crate::app::{App, AppState};

use super::styles::{palette, Palette};
use super::tabs::{details, grid};

pub fn render(frame: &mut Frame, app: &App) {
    let p = palette(app.theme);
    frame.render_widget(Block::default().style(p.base()), frame.area());

    let filter_height = if app.router.current() == Route::Home { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Title bar
            Constraint::Length(3),             // Tabs
            Constraint::Length(filter_height), // Search and category
            Constraint::Min(10),               // Card grid
            Constraint::Length(2),             // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, p, chunks[0]);
    render_tabs(frame, app, p, chunks[1]);
    if filter_height > 0 {
        render_filter_bar(frame, app, p, chunks[2]);
    }
    grid::render(frame, app, chunks[3]);
    render_status_bar(frame, app, p, chunks[4]);

    // Overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame, p),
        AppState::ShowingDetail => {
            if let Some(view) = &app.detail {
                let area = centered_rect_fixed(64, 22, frame.area());
                details::render(frame, p, view, area);
            }
        }
        AppState::ShowingAlert => {
            if let Some(message) = &app.alert {
                render_alert_overlay(frame, p, message);
            }
        }
        AppState::ConfirmingQuit => render_quit_overlay(frame, p),
        _ => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, p: &Palette, area: Rect) {
    let title = "  Pokédex";
    let toggle_hint = format!("[t] {} mode  [?] Help", app.theme.toggle_label());

    let title_line = Line::from(vec![
        Span::styled(title, p.title()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.chars().count() + toggle_hint.len() + 2),
        )),
        Span::styled(toggle_hint, p.muted()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(p.muted());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_tabs(frame: &mut Frame, app: &App, p: &Palette, area: Rect) {
    let current = app.router.current();
    let team_label = format!("[2] {} ({}/{})", Route::Team.title(), app.team_size, MAX_TEAM_SIZE);
    let tabs = [
        (format!("[1] {}", Route::Home.title()), current == Route::Home),
        (team_label, current == Route::Team),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, selected)) in tabs.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", p.muted()));
        }
        spans.push(Span::styled(label, p.tab(selected)));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(p.muted());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_filter_bar(frame: &mut Frame, app: &App, p: &Palette, area: Rect) {
    let searching = app.state == AppState::Searching;
    let cursor = if searching { "▌" } else { "" };
    let query = if app.search_query.is_empty() && !searching {
        Span::styled("press / to search", p.muted())
    } else {
        Span::styled(format!("{}{}", app.search_query, cursor), p.search())
    };

    let category = match app.selected_category() {
        Some(name) => Span::styled(format!(" {} ", name), p.type_badge()),
        None => Span::styled("All types", p.text()),
    };

    let line = Line::from(vec![
        Span::styled(" Search: ", p.highlight()),
        query,
        Span::raw("    "),
        Span::styled("Type: ", p.highlight()),
        category,
        Span::styled("  [c/C] cycle [x] clear", p.muted()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(p.border(searching));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, p: &Palette, area: Rect) {
    let shortcuts = match app.router.current() {
        Route::Home => "[a]dd | [Enter] details | [q]uit",
        Route::Team => "[d]elete | [Enter] details | [q]uit",
    };

    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if let Some(age) = app.list_age() {
        format!(" {} Pokémon loaded {} ", app.master_list.len(), age)
    } else {
        " Loading Pokédex... ".to_string()
    };
    let right_text = format!(" {} ", shortcuts);

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, p.muted()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, p.muted()),
    ]);

    frame.render_widget(Paragraph::new(status_line).style(p.status_bar()), area);
}

fn help_line<'a>(p: &Palette, key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), p.help_key()),
        Span::styled(desc, p.text()),
    ])
}

fn render_help_overlay(frame: &mut Frame, p: &Palette) {
    let area = centered_rect_fixed(52, 24, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  Pokédex", p.title())),
        Line::from(Span::styled(format!("  version {}", version), p.muted())),
        Line::from(""),
        Line::from(Span::styled(" Navigation", p.highlight())),
        help_line(p, "1 / 2", "Pokédex / My Team"),
        help_line(p, "Tab", "Switch view"),
        help_line(p, "Arrows", "Move between cards"),
        help_line(p, "Enter", "Show details"),
        help_line(p, "Esc", "Close overlay"),
        Line::from(""),
        Line::from(Span::styled(" Pokédex", p.highlight())),
        help_line(p, "/", "Search by name"),
        help_line(p, "c / C", "Next / previous type"),
        help_line(p, "x", "Show all types"),
        help_line(p, "a", "Add to team"),
        Line::from(""),
        Line::from(Span::styled(" My Team", p.highlight())),
        help_line(p, "d / Del", "Remove from team"),
        Line::from(""),
        help_line(p, "t", "Toggle light/dark"),
        help_line(p, "q", "Quit"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(p.border(true))
        .style(p.base());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_alert_overlay(frame: &mut Frame, p: &Palette, message: &str) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", message), p.error())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", p.muted()),
            Span::styled("[Enter]", p.help_key()),
            Span::styled(" to continue", p.muted()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(p.border(true))
        .style(p.base());

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_quit_overlay(frame: &mut Frame, p: &Palette) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("   Are you sure you want to quit?", p.highlight())),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", p.muted()),
            Span::styled("[Y]", p.help_key()),
            Span::styled(" to quit, ", p.muted()),
            Span::styled("[N]", p.help_key()),
            Span::styled(" to cancel", p.muted()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(p.border(true))
        .style(p.base());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed() {
        let outer = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect_fixed(46, 10, outer), Rect::new(27, 15, 46, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_small_terminal() {
        let outer = Rect::new(0, 0, 30, 5);
        let area = centered_rect_fixed(46, 10, outer);
        assert_eq!((area.width, area.height), (30, 5));
    }
}
