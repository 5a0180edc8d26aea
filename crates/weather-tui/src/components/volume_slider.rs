//! VolumeSlider component — 0..=100 slider driving the shared gain.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use weather_core::controller::VOLUME_MAX;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_secondary, C_PRIMARY},
    widgets::{level_bar::draw_level, pane_chrome::pane_chrome},
};

pub const VOLUME_STEP: u8 = 5;
const LABEL_W: u16 = 5;

pub struct VolumeSlider;

impl VolumeSlider {
    pub fn new() -> Self {
        Self
    }
}

/// Nudge `current` by `delta`, staying inside 0..=100.
pub fn step(current: u8, delta: i16) -> u8 {
    (current as i16 + delta).clamp(0, VOLUME_MAX as i16) as u8
}

/// Slider value under `column` for a bar occupying `bar`.
pub fn value_at(bar: Rect, column: u16) -> u8 {
    if bar.width <= 1 {
        return 0;
    }
    let offset = column.saturating_sub(bar.x).min(bar.width - 1) as u32;
    ((offset * VOLUME_MAX as u32 + (bar.width as u32 - 1) / 2) / (bar.width as u32 - 1)) as u8
}

/// Inner layout: [bar | "100%"].
fn split(inner: Rect) -> (Rect, Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(LABEL_W)])
        .split(inner);
    (cols[0], cols[1])
}

fn inner_of(area: Rect) -> Rect {
    pane_chrome("volume", None, false, false, None).inner(area)
}

impl Component for VolumeSlider {
    fn id(&self) -> ComponentId {
        ComponentId::VolumeSlider
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let current = state.widget.volume;
        let step_by = VOLUME_STEP as i16;
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => vec![Action::Volume(step(current, -step_by))],
            KeyCode::Right | KeyCode::Char('l') => vec![Action::Volume(step(current, step_by))],
            KeyCode::Home => vec![Action::Volume(0)],
            KeyCode::End => vec![Action::Volume(VOLUME_MAX)],
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                let (bar, _) = split(inner_of(area));
                vec![Action::Volume(value_at(bar, event.column))]
            }
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("volume", None, focused, false, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }
        let (bar, label) = split(inner);
        draw_level(frame, bar, state.widget.volume as f64 / VOLUME_MAX as f64);

        let pct = Line::from(vec![Span::styled(
            format!("{:>4}%", state.widget.volume),
            if focused {
                Style::default().fg(C_PRIMARY)
            } else {
                style_secondary()
            },
        )]);
        frame.render_widget(Paragraph::new(pct), label);
    }
}
