//! Silent output service for component and app tests.

use weather_core::error::Result;
use weather_core::output::{DecodedSound, OutputService, PlaybackHandle};

#[derive(Default)]
pub struct NullOutput {
    suspended: bool,
    gain: f32,
}

pub struct NullHandle;

impl PlaybackHandle for NullHandle {
    fn stop(self) {}
}

impl OutputService for NullOutput {
    type Handle = NullHandle;

    fn start(&mut self, _sound: &DecodedSound) -> Result<NullHandle> {
        Ok(NullHandle)
    }

    fn suspend(&mut self) {
        self.suspended = true;
    }

    fn resume(&mut self) {
        self.suspended = false;
    }

    fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }

    fn gain(&self) -> f32 {
        self.gain
    }
}
