//! Details overlay for a single Pokémon.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use pokedex_core::utils::{format_height, format_weight, stat_percent};
use pokedex_core::PokemonDetail;

use crate::app::DetailView;
use crate::ui::styles::Palette;

/// Width of a full stat bar in cells
const STAT_BAR_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, p: &Palette, view: &DetailView, area: Rect) {
    frame.render_widget(Clear, area);

    let lines = match (&view.detail, view.loading) {
        (_, true) => vec![Line::from(""), Line::from(Span::styled("  Loading...", p.muted()))],
        (Some(detail), false) => detail_lines(p, detail),
        (None, false) => vec![
            Line::from(""),
            Line::from(Span::styled("  Failed to load.", p.error())),
        ],
    };

    let mut lines = lines;
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Press ", p.muted()),
        Span::styled("Esc", p.help_key()),
        Span::styled(" to close", p.muted()),
    ]));

    let block = Block::default()
        .title(Span::styled(format!(" {} ", view.title()), p.title()))
        .borders(Borders::ALL)
        .border_style(p.border(true))
        .style(p.base());

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn detail_lines<'a>(p: &Palette, detail: &'a PokemonDetail) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    if let Some(url) = detail.artwork_url() {
        lines.push(Line::from(vec![
            Span::styled("  Artwork  ", p.muted()),
            Span::styled(url, p.highlight()),
        ]));
    }

    let mut types = vec![Span::styled("  Types    ", p.muted())];
    for name in detail.type_names() {
        types.push(Span::styled(format!(" {} ", name), p.type_badge()));
        types.push(Span::raw(" "));
    }
    lines.push(Line::from(types));

    lines.push(Line::from(vec![
        Span::styled("  Height   ", p.muted()),
        Span::styled(format_height(detail.height), p.text()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Weight   ", p.muted()),
        Span::styled(format_weight(detail.weight), p.text()),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Base stats", p.highlight())));
    for entry in &detail.stats {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<16}", entry.stat.name), p.muted()),
            Span::styled(format!("{:>3} ", entry.base_stat), p.text()),
            Span::styled(stat_bar(entry.base_stat), p.stat_bar()),
        ]));
    }

    lines
}

fn stat_bar(base_stat: u32) -> String {
    let filled = stat_percent(base_stat) as usize * STAT_BAR_WIDTH / 100;
    format!("{}{}", "█".repeat(filled), "·".repeat(STAT_BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_bar_scaled_to_max() {
        assert_eq!(stat_bar(255).chars().filter(|&c| c == '█').count(), STAT_BAR_WIDTH);
        assert_eq!(stat_bar(0).chars().filter(|&c| c == '█').count(), 0);
        assert_eq!(stat_bar(51).chars().filter(|&c| c == '█').count(), 4);
        assert_eq!(stat_bar(120).chars().count(), STAT_BAR_WIDTH);
    }
}
