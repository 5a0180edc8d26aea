//! ScenePanel component — the full-width backdrop for the selected channel.
//!
//! Draws a procedural sky for the scene: sun rays for summer, falling drops
//! for rain, drifting flakes for winter. Not focusable.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use weather_core::assets::Backdrop;

use crate::{
    action::ComponentId,
    app_state::AppState,
    component::Component,
    theme::backdrop_colors,
};

pub struct ScenePanel;

impl ScenePanel {
    pub fn new() -> Self {
        Self
    }
}

/// Cheap integer hash so every cell gets a stable pseudo-random value.
fn cell_hash(x: u64, y: u64) -> u64 {
    let mut h = x.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ y.wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    h ^= h >> 29;
    h = h.wrapping_mul(0x1656_67B1_9E37_79F9);
    h ^ (h >> 32)
}

/// The particle (if any) drawn at `(x, y)` on animation frame `frame`.
pub fn backdrop_cell(backdrop: Backdrop, x: u16, y: u16, frame: u64) -> char {
    let (x, y) = (x as u64, y as u64);
    match backdrop {
        Backdrop::Sunshine => {
            // Rays fan out from the top-left corner and shimmer slowly.
            let ray = (x + 2 * y + frame / 4) % 11;
            match ray {
                0 => '╲',
                5 if cell_hash(x, y) % 5 == 0 => '·',
                _ => ' ',
            }
        }
        Backdrop::Rainfall => {
            // Each column has its own phase; drops fall one row per frame
            // and drift left one column every other row.
            let shifted = x + y / 2;
            let phase = (shifted * 5 + cell_hash(shifted / 7, 0)) % 7;
            if (y + 7 * 64 - frame % (7 * 64) + phase) % 7 == 0 {
                '╱'
            } else {
                ' '
            }
        }
        Backdrop::Snowfall => {
            // Flakes fall one row every third frame.
            let t = frame / 3;
            let h = cell_hash(x, y.wrapping_sub(t) & 0xFFFF);
            match h % 23 {
                0 => '*',
                1 => '·',
                _ => ' ',
            }
        }
    }
}

impl Component for ScenePanel {
    fn id(&self) -> ComponentId {
        ComponentId::ScenePanel
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let backdrop = state.widget.backdrop;
        let (bg, fg) = backdrop_colors(backdrop);
        let base = Style::default().bg(bg).fg(fg);
        let mid = area.height / 2;

        let lines: Vec<Line> = (0..area.height)
            .map(|y| {
                if y == mid {
                    let title = format!(" {} · {} ", state.widget.scene, state.active_status().label());
                    return Line::from(Span::styled(
                        title,
                        base.add_modifier(Modifier::BOLD),
                    ))
                    .alignment(Alignment::Center);
                }
                let row: String = (0..area.width)
                    .map(|x| backdrop_cell(backdrop, x, y, state.frame))
                    .collect();
                Line::from(Span::styled(row, base))
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).style(base), area);
    }
}
