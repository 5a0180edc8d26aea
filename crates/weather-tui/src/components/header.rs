//! Header component — one-row top bar: title, selected scene, state, volume.
//!
//! Not focusable.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use weather_core::channel::AudioState;

use crate::{
    action::ComponentId,
    app_state::{ActiveStatus, AppState},
    component::Component,
    theme::{style_muted, style_playing, style_secondary, C_TITLE, C_LOADING, C_PRIMARY},
};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }
}

impl Component for Header {
    fn id(&self) -> ComponentId {
        ComponentId::Header
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let status = state.active_status();
        let status_style = match status {
            ActiveStatus::Audio(AudioState::Playing) => style_playing(),
            ActiveStatus::Loading => Style::default().fg(C_LOADING),
            ActiveStatus::Audio(_) => style_secondary(),
        };
        let view = state.widget.channel(state.active());

        let line = Line::from(vec![
            Span::styled(
                " weather sounds ",
                Style::default().fg(C_TITLE).add_modifier(Modifier::BOLD),
            ),
            Span::styled("│ ", style_muted()),
            Span::styled(format!("{} ", view.glyph), Style::default().fg(C_PRIMARY)),
            Span::styled(
                state.widget.scene.as_str(),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {} ", status.label()), status_style),
            Span::styled("│ ", style_muted()),
            Span::styled(
                format!("vol {}% (×{:.2})", state.widget.volume, state.widget.gain),
                style_secondary(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn min_height(&self) -> u16 {
        1
    }
}
