//! ChannelButtons component — the row of three scene buttons.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use weather_core::assets::ChannelName;
use weather_core::channel::AudioState;
use weather_core::controller::ChannelView;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_LOADING, C_PLAYING, C_PRIMARY, C_SECONDARY},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct ChannelButtons {
    /// Keyboard cursor; independent of which channel is active.
    pub cursor: ChannelName,
}

impl ChannelButtons {
    pub fn new() -> Self {
        Self {
            cursor: ChannelName::Summer,
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = ChannelName::ALL.len() as isize;
        let idx = (self.cursor.index() as isize + delta).rem_euclid(len) as usize;
        self.cursor = ChannelName::ALL[idx];
    }
}

/// Split `area` into one equal-width cell per channel, in declaration order.
pub fn button_rects(area: Rect) -> [Rect; 3] {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);
    [cols[0], cols[1], cols[2]]
}

fn contains(r: Rect, col: u16, row: u16) -> bool {
    col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

fn badge_for(view: &ChannelView) -> Option<Badge<'static>> {
    if view.loading {
        return Some(Badge {
            text: "…",
            color: C_LOADING,
        });
    }
    match view.state {
        AudioState::Playing => Some(Badge {
            text: "ON",
            color: C_PLAYING,
        }),
        AudioState::Paused => Some(Badge {
            text: "II",
            color: C_SECONDARY,
        }),
        AudioState::Stopped => None,
    }
}

/// Pad `glyph` so it sits visually centred even when it is double width.
fn glyph_line(glyph: &str) -> String {
    if glyph.width() >= 2 {
        glyph.to_string()
    } else {
        format!(" {} ", glyph)
    }
}

impl Component for ChannelButtons {
    fn id(&self) -> ComponentId {
        ComponentId::ChannelButtons
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.move_cursor(-1);
                vec![]
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.move_cursor(1);
                vec![]
            }
            KeyCode::Enter | KeyCode::Char(' ') => vec![Action::ToggleChannel(self.cursor)],
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let rects = button_rects(area);
        for (name, rect) in ChannelName::ALL.into_iter().zip(rects) {
            if contains(rect, event.column, event.row) {
                self.cursor = name;
                return vec![Action::ToggleChannel(name)];
            }
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let rects = button_rects(area);
        for (view, rect) in state.widget.channels.iter().zip(rects) {
            let is_cursor = focused && view.name == self.cursor;
            let is_active = view.name == state.widget.active;
            let number = char::from(b'1' + view.name.index() as u8);
            let block = pane_chrome(
                view.name.as_str(),
                Some(number),
                is_cursor,
                is_active,
                badge_for(view),
            );
            let inner = block.inner(rect);
            frame.render_widget(block, rect);

            let glyph_style = match view.state {
                AudioState::Playing => Style::default().fg(C_PLAYING).add_modifier(Modifier::BOLD),
                _ if view.loading => Style::default().fg(C_LOADING),
                _ => Style::default().fg(C_PRIMARY),
            };
            let mut lines = vec![Line::from(Span::styled(glyph_line(view.glyph), glyph_style))];
            if inner.height > 1 {
                lines.push(Line::from(Span::styled(
                    view.state.label(),
                    Style::default().fg(C_SECONDARY),
                )));
            }
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
        }
    }

    fn min_height(&self) -> u16 {
        4
    }
}
