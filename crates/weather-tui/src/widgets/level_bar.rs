//! Smooth Unicode level bar used by the volume slider.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MUTED, C_PLAYING, C_TRACK};

const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Build the bar text for `width` cells at `fraction` (0.0..=1.0), with
/// eighth-cell resolution and a dotted track for the unfilled part.
pub fn bar_text(fraction: f64, width: usize) -> (String, String) {
    let eighths = (fraction.clamp(0.0, 1.0) * width as f64 * 8.0).round() as usize;
    let full_blocks = (eighths / 8).min(width);
    let partial = eighths % 8;

    let mut filled = "█".repeat(full_blocks);
    let mut used = full_blocks;
    if full_blocks < width && partial > 0 {
        filled.push(BLOCKS[partial]);
        used += 1;
    }
    let track = "·".repeat(width - used);
    (filled, track)
}

/// Render the bar in `area` (first row only).
pub fn draw_level(frame: &mut Frame, area: Rect, fraction: f64) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let (filled, track) = bar_text(fraction, area.width as usize);
    let color = if fraction > 0.0 { C_PLAYING } else { C_MUTED };
    let line = Line::from(vec![
        Span::styled(filled, Style::default().fg(color)),
        Span::styled(track, Style::default().fg(C_TRACK)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
