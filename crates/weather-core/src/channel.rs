//! Channel — one named ambient scene: its button icon and its audio.
//!
//! # States
//! ```text
//!  stopped --play-->  (loading) --loaded--> playing
//!  playing --pause--> paused
//!  paused  --play-->  playing
//!  playing|paused --stop--> stopped
//! ```
//!
//! Starting from `stopped` needs a fetch + decode, which runs off the event
//! loop. While it is in flight the channel holds a `LoadToken`; anything that
//! stops or cancels the channel drops the token, and `finish_load` ignores a
//! result whose token no longer matches.

use tracing::{debug, info, warn};

use crate::assets::{AssetBundle, ChannelName, SoundSource, PAUSE_ICON};
use crate::error::Result;
use crate::output::{DecodedSound, OutputService, PlaybackHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl AudioState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

/// Which glyph the channel's button shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Icon {
    #[default]
    Weather,
    Pause,
}

/// Identifies one fetch + decode; monotonically increasing per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadToken(u64);

#[derive(Debug, Default)]
pub struct TokenSource {
    next: u64,
}

impl TokenSource {
    pub fn issue(&mut self) -> LoadToken {
        self.next += 1;
        LoadToken(self.next)
    }
}

/// Work the caller must run: fetch `source`, decode it, and hand the result
/// back through `Controller::on_sound_loaded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub channel: ChannelName,
    pub source: SoundSource,
    pub token: LoadToken,
}

/// A finished (or failed) load, routed back to the channel that asked.
#[derive(Debug)]
pub struct LoadResult {
    pub channel: ChannelName,
    pub token: LoadToken,
    pub result: Result<DecodedSound>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    Load(LoadRequest),
    Resumed,
    AlreadyLoading,
    AlreadyPlaying,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Started,
    Failed,
    Superseded,
}

pub struct Channel<H> {
    name: ChannelName,
    assets: AssetBundle,
    state: AudioState,
    icon: Icon,
    handle: Option<H>,
    pending: Option<LoadToken>,
}

impl<H: PlaybackHandle> Channel<H> {
    pub fn new(name: ChannelName, assets: AssetBundle) -> Self {
        Self {
            name,
            assets,
            state: AudioState::Stopped,
            icon: Icon::Weather,
            handle: None,
            pending: None,
        }
    }

    pub fn name(&self) -> ChannelName {
        self.name
    }

    pub fn assets(&self) -> &AssetBundle {
        &self.assets
    }

    pub fn state(&self) -> AudioState {
        self.state
    }

    pub fn icon(&self) -> Icon {
        self.icon
    }

    pub fn icon_glyph(&self) -> &'static str {
        match self.icon {
            Icon::Weather => self.assets.icon,
            Icon::Pause => PAUSE_ICON,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn has_handle(&self) -> bool {
        self.handle.is_some()
    }

    /// True while the user's last intent was "sound on": playing, or
    /// waiting for the sound to load.
    pub fn is_engaged(&self) -> bool {
        self.state == AudioState::Playing || self.is_loading()
    }

    /// Bring the button glyph in line with the audio state. Returns `true`
    /// when the glyph actually changed.
    pub fn sync_icon(&mut self) -> bool {
        let wanted = if self.is_engaged() {
            Icon::Pause
        } else {
            Icon::Weather
        };
        if self.icon == wanted {
            return false;
        }
        self.icon = wanted;
        true
    }

    pub fn play_audio<O>(&mut self, output: &mut O, tokens: &mut TokenSource) -> PlayOutcome
    where
        O: OutputService<Handle = H>,
    {
        let outcome = match self.state {
            AudioState::Playing => PlayOutcome::AlreadyPlaying,
            AudioState::Paused => {
                output.resume();
                self.state = AudioState::Playing;
                debug!("{}: resumed", self.name);
                PlayOutcome::Resumed
            }
            AudioState::Stopped if self.pending.is_some() => PlayOutcome::AlreadyLoading,
            AudioState::Stopped => {
                let token = tokens.issue();
                self.pending = Some(token);
                debug!("{}: loading {} ({:?})", self.name, self.assets.sound, token);
                PlayOutcome::Load(LoadRequest {
                    channel: self.name,
                    source: self.assets.sound.clone(),
                    token,
                })
            }
        };
        self.sync_icon();
        outcome
    }

    /// Apply a completed load. Only the currently pending token is honoured.
    pub fn finish_load<O>(
        &mut self,
        token: LoadToken,
        result: Result<DecodedSound>,
        output: &mut O,
    ) -> LoadOutcome
    where
        O: OutputService<Handle = H>,
    {
        if self.pending != Some(token) {
            debug!(
                "{}: dropping superseded load {:?} (pending {:?})",
                self.name, token, self.pending
            );
            return LoadOutcome::Superseded;
        }
        self.pending = None;

        let outcome = match result.and_then(|sound| output.start(&sound)) {
            Ok(handle) => {
                self.handle = Some(handle);
                self.state = AudioState::Playing;
                info!("{}: playing", self.name);
                LoadOutcome::Started
            }
            Err(e) => {
                warn!("{}: could not start {}: {}", self.name, self.assets.sound, e);
                LoadOutcome::Failed
            }
        };
        self.sync_icon();
        outcome
    }

    pub fn pause_audio<O>(&mut self, output: &mut O)
    where
        O: OutputService<Handle = H>,
    {
        if self.state == AudioState::Playing {
            output.suspend();
            self.state = AudioState::Paused;
            debug!("{}: paused", self.name);
        }
        self.sync_icon();
    }

    /// Forget an in-flight load without touching audio.
    pub fn cancel_load(&mut self) {
        if let Some(token) = self.pending.take() {
            debug!("{}: cancelled load {:?}", self.name, token);
        }
        self.sync_icon();
    }

    pub fn stop_audio<O>(&mut self, output: &mut O)
    where
        O: OutputService<Handle = H>,
    {
        if let Some(handle) = self.handle.take() {
            handle.stop();
        }
        self.pending = None;
        if self.state != AudioState::Stopped {
            debug!("{}: stopped", self.name);
        }
        self.state = AudioState::Stopped;
        // A pause on this channel must not leave the next one silent.
        if output.is_suspended() {
            output.resume();
        }
        self.sync_icon();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Backdrop;
    use crate::error::AmbientError;
    use std::path::PathBuf;

    #[derive(Default)]
    struct Out {
        started: usize,
        suspended: bool,
        gain: f32,
    }

    struct Handle;

    impl PlaybackHandle for Handle {
        fn stop(self) {}
    }

    impl OutputService for Out {
        type Handle = Handle;
        fn start(&mut self, _sound: &DecodedSound) -> Result<Handle> {
            self.started += 1;
            Ok(Handle)
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

    fn rain() -> Channel<Handle> {
        Channel::new(
            ChannelName::Rain,
            AssetBundle {
                background: Backdrop::Rainfall,
                icon: "☂",
                sound: SoundSource::File(PathBuf::from("rain.mp3")),
            },
        )
    }

    fn sound() -> DecodedSound {
        DecodedSound::new(1, 8_000, vec![0.0; 8_000])
    }

    fn loaded(ch: &mut Channel<Handle>, out: &mut Out, tokens: &mut TokenSource) {
        let PlayOutcome::Load(req) = ch.play_audio(out, tokens) else {
            panic!("expected a load request");
        };
        assert_eq!(ch.finish_load(req.token, Ok(sound()), out), LoadOutcome::Started);
    }

    #[test]
    fn play_from_stopped_requests_a_load_and_shows_pause() {
        let (mut ch, mut out, mut tokens) = (rain(), Out::default(), TokenSource::default());
        let outcome = ch.play_audio(&mut out, &mut tokens);
        assert!(matches!(outcome, PlayOutcome::Load(ref r) if r.channel == ChannelName::Rain));
        assert_eq!(ch.state(), AudioState::Stopped);
        assert!(ch.is_loading());
        assert_eq!(ch.icon(), Icon::Pause);
        assert_eq!(ch.icon_glyph(), PAUSE_ICON);
        assert_eq!(ch.play_audio(&mut out, &mut tokens), PlayOutcome::AlreadyLoading);
    }

    #[test]
    fn pause_and_resume_use_the_shared_clock() {
        let (mut ch, mut out, mut tokens) = (rain(), Out::default(), TokenSource::default());
        loaded(&mut ch, &mut out, &mut tokens);
        assert_eq!(ch.state(), AudioState::Playing);

        ch.pause_audio(&mut out);
        assert_eq!(ch.state(), AudioState::Paused);
        assert!(out.suspended);
        assert_eq!(ch.icon(), Icon::Weather);

        assert_eq!(ch.play_audio(&mut out, &mut tokens), PlayOutcome::Resumed);
        assert!(!out.suspended);
        assert_eq!(ch.play_audio(&mut out, &mut tokens), PlayOutcome::AlreadyPlaying);
        assert_eq!(out.started, 1);
    }

    #[test]
    fn pause_when_stopped_is_a_no_op() {
        let (mut ch, mut out) = (rain(), Out::default());
        ch.pause_audio(&mut out);
        assert_eq!(ch.state(), AudioState::Stopped);
        assert!(!out.suspended);
    }

    #[test]
    fn stop_discards_handle_and_resumes_suspended_clock() {
        let (mut ch, mut out, mut tokens) = (rain(), Out::default(), TokenSource::default());
        loaded(&mut ch, &mut out, &mut tokens);
        ch.pause_audio(&mut out);

        ch.stop_audio(&mut out);
        assert_eq!(ch.state(), AudioState::Stopped);
        assert!(!ch.has_handle());
        assert!(!out.suspended);

        // A fresh play must go through a brand-new load.
        let PlayOutcome::Load(req) = ch.play_audio(&mut out, &mut tokens) else {
            panic!("expected a load request");
        };
        assert_eq!(req.token, LoadToken(2));
    }

    #[test]
    fn stale_load_results_are_ignored() {
        let (mut ch, mut out, mut tokens) = (rain(), Out::default(), TokenSource::default());
        let PlayOutcome::Load(first) = ch.play_audio(&mut out, &mut tokens) else {
            panic!("expected a load request");
        };
        ch.stop_audio(&mut out);
        assert_eq!(
            ch.finish_load(first.token, Ok(sound()), &mut out),
            LoadOutcome::Superseded
        );
        assert_eq!(ch.state(), AudioState::Stopped);
        assert_eq!(out.started, 0);
    }

    #[test]
    fn failed_load_leaves_channel_stopped() {
        let (mut ch, mut out, mut tokens) = (rain(), Out::default(), TokenSource::default());
        let PlayOutcome::Load(req) = ch.play_audio(&mut out, &mut tokens) else {
            panic!("expected a load request");
        };
        let outcome = ch.finish_load(
            req.token,
            Err(AmbientError::Decode("not audio".into())),
            &mut out,
        );
        assert_eq!(outcome, LoadOutcome::Failed);
        assert_eq!(ch.state(), AudioState::Stopped);
        assert!(!ch.is_loading());
        assert_eq!(ch.icon(), Icon::Weather);
    }

    #[test]
    fn sync_icon_reports_changes_only() {
        let mut ch = rain();
        assert!(!ch.sync_icon());
        ch.pending = Some(LoadToken(7));
        assert!(ch.sync_icon());
        assert!(!ch.sync_icon());
    }
}
