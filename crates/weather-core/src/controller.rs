//! Controller — single owner of the channels and the output service.
//!
//! Enforces "at most one channel playing": selecting a different channel
//! always stops the previous one before the new one is started, and only
//! the selected channel is ever handed the output service.

use tracing::{debug, info};

use crate::assets::{AssetTable, Backdrop, ChannelName};
use crate::channel::{
    AudioState, Channel, Icon, LoadOutcome, LoadRequest, LoadResult, PlayOutcome, TokenSource,
};
use crate::error::Result;
use crate::output::OutputService;

pub const VOLUME_MAX: u8 = 100;

/// Slider value → gain multiplier. Linear, 0 → 0.0, 99 → 1.0.
pub fn volume_to_gain(raw: u8) -> f32 {
    let value = raw.min(VOLUME_MAX) as f32;
    value / (VOLUME_MAX as f32 - 1.0)
}

/// Read-only view of one channel for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelView {
    pub name: ChannelName,
    pub state: AudioState,
    pub icon: Icon,
    pub glyph: &'static str,
    pub loading: bool,
}

/// Read-only view of the whole widget for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSnapshot {
    pub channels: Vec<ChannelView>,
    pub active: ChannelName,
    pub scene: ChannelName,
    pub backdrop: Backdrop,
    pub volume: u8,
    pub gain: f32,
}

impl WidgetSnapshot {
    pub fn channel(&self, name: ChannelName) -> &ChannelView {
        &self.channels[name.index()]
    }
}

pub struct Controller<O: OutputService> {
    output: O,
    channels: Vec<Channel<O::Handle>>,
    active: ChannelName,
    scene: ChannelName,
    volume: u8,
    tokens: TokenSource,
}

impl<O: OutputService> Controller<O> {
    pub fn new(output: O, assets: &AssetTable, initial_volume: u8) -> Self {
        let channels = assets
            .iter()
            .map(|(name, bundle)| Channel::new(name, bundle.clone()))
            .collect();
        let mut controller = Self {
            output,
            channels,
            active: ChannelName::Summer,
            scene: ChannelName::Summer,
            volume: 0,
            tokens: TokenSource::default(),
        };
        controller.on_volume_slider_input(initial_volume);
        controller
    }

    pub fn active(&self) -> ChannelName {
        self.active
    }

    pub fn scene(&self) -> ChannelName {
        self.scene
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn channel(&self, name: ChannelName) -> &Channel<O::Handle> {
        &self.channels[name.index()]
    }

    pub fn playing_count(&self) -> usize {
        self.channels
            .iter()
            .filter(|c| c.state() == AudioState::Playing)
            .count()
    }

    /// A button was clicked. Returns the load the caller must run, if the
    /// click started a stopped channel.
    pub fn on_channel_button_clicked(&mut self, target: ChannelName) -> Option<LoadRequest> {
        let previous = self.active;
        if target != previous {
            info!("switching {} -> {}", previous, target);
            self.scene = target;
            self.active = target;
            self.channels[previous.index()].stop_audio(&mut self.output);
        }
        self.toggle(target)
    }

    pub fn click_by_name(&mut self, name: &str) -> Result<Option<LoadRequest>> {
        let target: ChannelName = name.parse()?;
        Ok(self.on_channel_button_clicked(target))
    }

    fn toggle(&mut self, target: ChannelName) -> Option<LoadRequest> {
        let channel = &mut self.channels[target.index()];
        if channel.state() == AudioState::Playing {
            channel.pause_audio(&mut self.output);
            return None;
        }
        if channel.is_loading() {
            channel.cancel_load();
            return None;
        }
        match channel.play_audio(&mut self.output, &mut self.tokens) {
            PlayOutcome::Load(request) => Some(request),
            other => {
                debug!("{}: play -> {:?}", target, other);
                None
            }
        }
    }

    /// Slider moved; `raw` is 0..=100 (larger values are clamped).
    pub fn on_volume_slider_input(&mut self, raw: u8) {
        self.volume = raw.min(VOLUME_MAX);
        let gain = volume_to_gain(self.volume);
        self.output.set_gain(gain);
        debug!("volume {} -> gain {:.3}", self.volume, gain);
    }

    pub fn on_sound_loaded(&mut self, loaded: LoadResult) -> LoadOutcome {
        let LoadResult {
            channel,
            token,
            result,
        } = loaded;
        self.channels[channel.index()].finish_load(token, result, &mut self.output)
    }

    /// Stop everything; called before the output service goes away.
    pub fn shutdown(&mut self) {
        for channel in &mut self.channels {
            channel.stop_audio(&mut self.output);
        }
        info!("controller shut down");
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            channels: self
                .channels
                .iter()
                .map(|c| ChannelView {
                    name: c.name(),
                    state: c.state(),
                    icon: c.icon(),
                    glyph: c.icon_glyph(),
                    loading: c.is_loading(),
                })
                .collect(),
            active: self.active,
            scene: self.scene,
            backdrop: self.channel(self.scene).assets().background,
            volume: self.volume,
            gain: self.output.gain(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_mapping_endpoints() {
        assert_eq!(volume_to_gain(0), 0.0);
        assert!((volume_to_gain(99) - 1.0).abs() < f32::EPSILON);
        assert!(volume_to_gain(100) > 1.0);
        assert_eq!(volume_to_gain(200), volume_to_gain(100));
    }

    #[test]
    fn gain_mapping_is_linear_and_monotonic() {
        let step = volume_to_gain(1);
        let mut last = -1.0;
        for raw in 0..=VOLUME_MAX {
            let g = volume_to_gain(raw);
            assert!(g > last);
            assert!((g - step * raw as f32).abs() < 1e-5);
            last = g;
        }
    }
}
