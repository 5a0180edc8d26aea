//! Status bar — bottom line with playback state and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use weather_core::channel::AudioState;

use crate::action::ComponentId;
use crate::app_state::ActiveStatus;
use crate::theme::{C_LOADING, C_MUTED, C_PLAYING, C_SECONDARY};

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, focused: ComponentId, status: ActiveStatus) {
    let bulb_color = match status {
        ActiveStatus::Audio(AudioState::Playing) => C_PLAYING,
        ActiveStatus::Loading => C_LOADING,
        ActiveStatus::Audio(_) => C_MUTED,
    };

    let label = match focused {
        ComponentId::VolumeSlider => "VOLUME",
        _ => "SCENES",
    };

    let keys = match focused {
        ComponentId::VolumeSlider => {
            " ←→ ±5  Home/End min/max  1-3 scene  Tab scenes  q quit"
        }
        _ => " 1-3 scene  ←→ select  Enter/Space play/pause  +/- vol  Tab volume  q quit",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled("●", Style::default().fg(bulb_color).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
