//! Card grid shared by the Pokédex and team views.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use pokedex_core::utils::{capitalize, format_dex_number, truncate_string};
use pokedex_core::{Card, Route};

use crate::app::App;
use crate::ui::styles::{palette, Palette};

pub const CARD_WIDTH: u16 = 26;
pub const CARD_HEIGHT: u16 = 6;

const EMPTY_HOME: &str = "No Pokémon found.";
const EMPTY_TEAM: &str = "Your team is empty. Head to the Pokédex to add some Pokémon!";

/// Cards that fit across `width` columns of terminal
pub fn grid_columns(width: u16) -> usize {
    (width.saturating_sub(2) / CARD_WIDTH).max(1) as usize
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let p = palette(app.theme);
    let route = app.router.current();

    let title = match route {
        Route::Home => format!(" {} ({}) ", route.title(), app.cards.len()),
        Route::Team => format!(
            " {} ({}/{}) ",
            route.title(),
            app.team_size,
            pokedex_core::MAX_TEAM_SIZE
        ),
    };
    let block = Block::default()
        .title(Span::styled(title, p.title()))
        .borders(Borders::ALL)
        .border_style(p.border(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(count) = app.skeleton_count {
        render_cells(frame, inner, count, 0, |frame, _, cell| render_skeleton(frame, p, cell));
        return;
    }

    if app.cards.is_empty() {
        let message = match route {
            Route::Home => EMPTY_HOME,
            Route::Team => EMPTY_TEAM,
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(message, p.muted())))
            .centered()
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
        return;
    }

    render_cells(frame, inner, app.cards.len(), app.selection, |frame, index, cell| {
        render_card(frame, p, &app.cards[index], index == app.selection, cell);
    });
}

/// Lay out `count` cells row by row, scrolled so `selected` stays visible.
fn render_cells<F>(frame: &mut Frame, area: Rect, count: usize, selected: usize, mut draw: F)
where
    F: FnMut(&mut Frame, usize, Rect),
{
    let columns = grid_columns(area.width + 2);
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let first_row = (selected / columns).saturating_sub(visible_rows - 1);

    for row in 0..visible_rows {
        for col in 0..columns {
            let index = (first_row + row) * columns + col;
            if index >= count {
                return;
            }
            let cell = Rect::new(
                area.x + col as u16 * CARD_WIDTH,
                area.y + row as u16 * CARD_HEIGHT,
                CARD_WIDTH.min(area.width),
                CARD_HEIGHT.min(area.height.saturating_sub(row as u16 * CARD_HEIGHT)),
            );
            if cell.height == 0 {
                return;
            }
            draw(frame, index, cell);
        }
    }
}

fn render_card(frame: &mut Frame, p: &Palette, card: &Card, selected: bool, area: Rect) {
    let detail = &card.detail;
    let name_width = CARD_WIDTH as usize - 8;

    let mut type_spans = Vec::new();
    for (i, name) in detail.type_names().enumerate() {
        if i > 0 {
            type_spans.push(Span::raw(" "));
        }
        type_spans.push(Span::styled(format!(" {} ", name), p.type_badge()));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled(format_dex_number(detail.id), p.muted()),
            Span::raw(" "),
            Span::styled(truncate_string(&capitalize(&detail.name), name_width), p.title()),
        ]),
        Line::from(type_spans),
        Line::from(vec![
            Span::styled("[Enter]", p.help_key()),
            Span::styled(" Details", p.text()),
        ]),
        Line::from(vec![
            Span::styled(action_key(card), p.help_key()),
            Span::styled(format!(" {}", card.action.label()), p.text()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(p.border(selected))
        .style(if selected { p.selected() } else { p.text() });

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn action_key(card: &Card) -> &'static str {
    match card.action {
        pokedex_core::CardAction::AddToTeam => "[a]",
        pokedex_core::CardAction::RemoveFromTeam => "[d]",
    }
}

fn render_skeleton(frame: &mut Frame, p: &Palette, area: Rect) {
    let filler = "░".repeat(CARD_WIDTH as usize - 6);
    let lines = vec![
        Line::from(Span::styled(filler.clone(), p.muted())),
        Line::from(Span::styled("░░░░░░", p.muted())),
        Line::from(""),
        Line::from(Span::styled(filler, p.muted())),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(p.border(false));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(0), 1);
        assert_eq!(grid_columns(27), 1);
        assert_eq!(grid_columns(80), 3);
        assert_eq!(grid_columns(132), 5);
    }
}
