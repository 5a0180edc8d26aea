//! The shared output service: one gain stage, one suspendable clock.
//!
//! Exactly one owner (the `Controller`) holds the service and lends it to a
//! channel for each operation. Only the active channel's handle is ever
//! attached, so suspending the clock pauses that channel and nothing else.

use std::sync::Arc;

use crate::error::Result;

/// Decoded, interleaved PCM ready to be started on an output.
#[derive(Debug, Clone)]
pub struct DecodedSound {
    pub channels: u16,
    pub sample_rate: u32,
    pub samples: Arc<[f32]>,
}

impl DecodedSound {
    pub fn new(channels: u16, sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            channels,
            sample_rate,
            samples: samples.into(),
        }
    }

    pub fn duration_secs(&self) -> f64 {
        if self.channels == 0 || self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.channels as f64 / self.sample_rate as f64
    }
}

/// A single-use playback handle. Stopping consumes it; a stopped sound can
/// only be heard again through a brand-new handle.
pub trait PlaybackHandle {
    fn stop(self);
}

pub trait OutputService {
    type Handle: PlaybackHandle;

    /// Attach `sound` behind the gain stage and start it looping. If the
    /// clock is suspended the sound stays silent until `resume`.
    fn start(&mut self, sound: &DecodedSound) -> Result<Self::Handle>;

    fn suspend(&mut self);

    fn resume(&mut self);

    fn is_suspended(&self) -> bool;

    /// Multiplier applied to everything attached; 1.0 is unity.
    fn set_gain(&mut self, gain: f32);

    fn gain(&self) -> f32;
}
