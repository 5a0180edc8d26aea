//! Palette for the weather-sounds TUI: a dark night-sky base with one warm
//! accent per state.

use ratatui::style::{Color, Modifier, Style};
use weather_core::assets::Backdrop;

// ── Base colours ──────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(14, 17, 24);
pub const C_TITLE: Color = Color::Rgb(255, 176, 72);
pub const C_PRIMARY: Color = Color::Rgb(220, 226, 236);
pub const C_SECONDARY: Color = Color::Rgb(126, 138, 160);
pub const C_MUTED: Color = Color::Rgb(70, 78, 96);
pub const C_KEY_HINT: Color = Color::Rgb(96, 108, 132);

// ── State colours ─────────────────────────────────────────────────────────────

pub const C_PLAYING: Color = Color::Rgb(96, 210, 150);
pub const C_LOADING: Color = Color::Rgb(240, 200, 96);

// ── Chrome ────────────────────────────────────────────────────────────────────

pub const C_BORDER: Color = Color::Rgb(42, 48, 62);
pub const C_BORDER_FOCUSED: Color = Color::Rgb(100, 160, 230);
/// Unfilled part of the volume bar.
pub const C_TRACK: Color = Color::Rgb(36, 42, 56);

/// `(background, particle)` colours for a backdrop.
pub fn backdrop_colors(backdrop: Backdrop) -> (Color, Color) {
    match backdrop {
        Backdrop::Sunshine => (Color::Rgb(92, 60, 16), Color::Rgb(255, 214, 90)),
        Backdrop::Rainfall => (Color::Rgb(16, 26, 44), Color::Rgb(110, 150, 210)),
        Backdrop::Snowfall => (Color::Rgb(30, 36, 48), Color::Rgb(230, 236, 250)),
    }
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_playing() -> Style {
    Style::default().fg(C_PLAYING)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_BORDER)
}

/// Border of the selected channel's button; outranks focus.
pub fn style_active_border() -> Style {
    Style::default().fg(C_TITLE).add_modifier(Modifier::BOLD)
}
