//! AppState — shared read-only data passed to all components during render/event.
//!
//! Only the App event loop writes to it, refreshing `widget` from the
//! controller after every action or completed load.

use weather_core::assets::ChannelName;
use weather_core::channel::AudioState;
use weather_core::controller::WidgetSnapshot;

/// What the selected channel is doing, as shown in the header and footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveStatus {
    /// A fetch + decode is in flight.
    Loading,
    Audio(AudioState),
}

impl ActiveStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Audio(state) => state.label(),
        }
    }
}

pub struct AppState {
    pub widget: WidgetSnapshot,
    /// Backdrop animation frame; advances only while sound is playing.
    pub frame: u64,
}

impl AppState {
    pub fn new(widget: WidgetSnapshot) -> Self {
        Self { widget, frame: 0 }
    }

    pub fn is_playing(&self) -> bool {
        self.widget
            .channels
            .iter()
            .any(|c| c.state == AudioState::Playing)
    }

    pub fn active_status(&self) -> ActiveStatus {
        let view = self.widget.channel(self.widget.active);
        if view.loading {
            ActiveStatus::Loading
        } else {
            ActiveStatus::Audio(view.state)
        }
    }

    pub fn active(&self) -> ChannelName {
        self.widget.active
    }
}
