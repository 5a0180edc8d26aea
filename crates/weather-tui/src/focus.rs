//! FocusRing — which pane receives keys that are not global.
//!
//! Only the button row and the volume slider take focus; the header and the
//! scene panel are display-only.

use crate::action::ComponentId;

const ORDER: [ComponentId; 2] = [ComponentId::ChannelButtons, ComponentId::VolumeSlider];

pub struct FocusRing {
    pos: usize,
}

impl FocusRing {
    pub fn new() -> Self {
        Self { pos: 0 }
    }

    pub fn current(&self) -> ComponentId {
        ORDER[self.pos]
    }

    fn step(&mut self, delta: isize) -> ComponentId {
        self.pos = (self.pos as isize + delta).rem_euclid(ORDER.len() as isize) as usize;
        self.current()
    }

    pub fn next(&mut self) -> ComponentId {
        self.step(1)
    }

    pub fn prev(&mut self) -> ComponentId {
        self.step(-1)
    }

    /// Focus `id`; ignored for panes that never take focus.
    pub fn set(&mut self, id: ComponentId) {
        if let Some(pos) = ORDER.iter().position(|&x| x == id) {
            self.pos = pos;
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.current() == id
    }
}
