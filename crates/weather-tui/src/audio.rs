//! rodio-backed output service and decoder.
//!
//! rodio has no global clock to suspend, so the service keeps every sink it
//! has started and pauses/plays them together. The gain stage is likewise a
//! volume applied to each attached sink.

use std::io::Cursor;
use std::sync::Arc;

use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, info};

use weather_core::error::{AmbientError, Result};
use weather_core::output::{DecodedSound, OutputService, PlaybackHandle};

/// Decode a complete sound file (mp3, ogg, flac, wav, …) into PCM.
pub fn decode_sound(bytes: Vec<u8>) -> Result<DecodedSound> {
    let decoder =
        Decoder::new(Cursor::new(bytes)).map_err(|e| AmbientError::Decode(e.to_string()))?;
    // Metadata must be read before the decoder is consumed.
    let channels = decoder.channels();
    let sample_rate = decoder.sample_rate();
    let samples: Vec<f32> = decoder.convert_samples::<f32>().collect();
    if samples.is_empty() {
        return Err(AmbientError::Decode("no audio frames".to_string()));
    }
    debug!(
        "decoded {} samples ({} ch @ {} Hz)",
        samples.len(),
        channels,
        sample_rate
    );
    Ok(DecodedSound::new(channels, sample_rate, samples))
}

/// Every sink started on the device, paused and played together as one
/// clock. Handles hold the other reference to each sink.
struct SinkSet {
    attached: Vec<Arc<Sink>>,
    suspended: bool,
    gain: f32,
}

impl SinkSet {
    fn new() -> Self {
        Self {
            attached: Vec::new(),
            suspended: false,
            gain: 1.0,
        }
    }

    /// Take ownership of a freshly built sink, bring it in line with the
    /// current gain and clock, and return the handle's reference.
    fn attach(&mut self, sink: Sink) -> Arc<Sink> {
        self.prune();
        sink.set_volume(self.gain);
        if self.suspended {
            sink.pause();
        }
        let sink = Arc::new(sink);
        self.attached.push(Arc::clone(&sink));
        debug!("sink attached ({} total)", self.len());
        sink
    }

    /// Forget sinks whose handle has been stopped and dropped.
    fn prune(&mut self) {
        self.attached
            .retain(|sink| Arc::strong_count(sink) > 1 && !sink.empty());
    }

    fn suspend(&mut self) {
        self.prune();
        for sink in &self.attached {
            sink.pause();
        }
        self.suspended = true;
    }

    fn resume(&mut self) {
        self.prune();
        for sink in &self.attached {
            sink.play();
        }
        self.suspended = false;
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain = gain.max(0.0);
        for sink in &self.attached {
            sink.set_volume(self.gain);
        }
    }

    fn len(&self) -> usize {
        self.attached.len()
    }
}

pub struct RodioOutput {
    // Dropping the stream silences everything; it lives as long as the service.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sinks: SinkSet,
}

impl RodioOutput {
    pub fn try_default() -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AmbientError::Output(e.to_string()))?;
        info!("audio output opened");
        Ok(Self {
            _stream: stream,
            handle,
            sinks: SinkSet::new(),
        })
    }
}

pub struct RodioHandle {
    sink: Arc<Sink>,
}

impl PlaybackHandle for RodioHandle {
    fn stop(self) {
        self.sink.stop();
    }
}

fn looped(sound: &DecodedSound) -> impl Source<Item = f32> + Send + 'static {
    SamplesBuffer::new(sound.channels, sound.sample_rate, sound.samples.to_vec()).repeat_infinite()
}

impl OutputService for RodioOutput {
    type Handle = RodioHandle;

    fn start(&mut self, sound: &DecodedSound) -> Result<RodioHandle> {
        let sink = Sink::try_new(&self.handle).map_err(|e| AmbientError::Output(e.to_string()))?;
        let sink = self.sinks.attach(sink);
        sink.append(looped(sound));
        Ok(RodioHandle { sink })
    }

    fn suspend(&mut self) {
        self.sinks.suspend();
    }

    fn resume(&mut self) {
        self.sinks.resume();
    }

    fn is_suspended(&self) -> bool {
        self.sinks.suspended
    }

    fn set_gain(&mut self, gain: f32) {
        self.sinks.set_gain(gain);
    }

    fn gain(&self) -> f32 {
        self.sinks.gain
    }
}
