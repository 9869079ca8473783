use ratatui::style::{Color, Modifier, Style};

use pokedex_core::Theme;

/// Colors for one theme
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub muted: Color,
    pub highlight: Color,
    pub status_bg: Color,
}

const LIGHT: Palette = Palette {
    fg: Color::Rgb(32, 32, 40),
    bg: Color::Rgb(244, 244, 248),
    primary: Color::Rgb(204, 48, 48),
    accent: Color::Rgb(48, 96, 176),
    success: Color::Rgb(48, 128, 64),
    error: Color::Rgb(192, 32, 32),
    muted: Color::Rgb(120, 120, 128),
    highlight: Color::Rgb(220, 224, 236),
    status_bg: Color::Rgb(224, 224, 232),
};

const DARK: Palette = Palette {
    fg: Color::White,
    bg: Color::Rgb(24, 24, 30),
    primary: Color::Rgb(232, 80, 80),
    accent: Color::Rgb(240, 200, 64),
    success: Color::Rgb(96, 160, 96),
    error: Color::Rgb(224, 80, 80),
    muted: Color::Rgb(128, 128, 128),
    highlight: Color::Rgb(48, 48, 64),
    status_bg: Color::Rgb(32, 32, 40),
};

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

impl Palette {
    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn highlight(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(self.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            self.muted()
        }
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.primary)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn search(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().bg(self.status_bg).fg(self.fg)
    }

    pub fn help_key(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn type_badge(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn stat_bar(&self) -> Style {
        Style::default().fg(self.success)
    }
}
