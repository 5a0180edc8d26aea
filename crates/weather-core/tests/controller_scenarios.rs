//! End-to-end scenarios for the channel controller, driven through a fake
//! output service that records every attach, detach, suspend and resume.
//!
//! Run with: cargo test -p weather-core --test controller_scenarios

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use weather_core::assets::{AssetTable, Backdrop, ChannelName, SoundSource};
use weather_core::channel::{AudioState, Icon, LoadOutcome, LoadRequest, LoadResult};
use weather_core::controller::Controller;
use weather_core::error::{AmbientError, Result};
use weather_core::output::{DecodedSound, OutputService, PlaybackHandle};

#[derive(Debug, Default)]
struct Engine {
    next_id: u64,
    attached: Vec<u64>,
    started: u64,
    suspended: bool,
    gain: f32,
}

#[derive(Clone, Default)]
struct FakeOutput(Rc<RefCell<Engine>>);

struct FakeHandle {
    id: u64,
    engine: Rc<RefCell<Engine>>,
}

impl PlaybackHandle for FakeHandle {
    fn stop(self) {
        self.engine.borrow_mut().attached.retain(|&id| id != self.id);
    }
}

impl OutputService for FakeOutput {
    type Handle = FakeHandle;

    fn start(&mut self, _sound: &DecodedSound) -> Result<FakeHandle> {
        let mut engine = self.0.borrow_mut();
        engine.next_id += 1;
        engine.started += 1;
        let id = engine.next_id;
        engine.attached.push(id);
        Ok(FakeHandle {
            id,
            engine: Rc::clone(&self.0),
        })
    }

    fn suspend(&mut self) {
        self.0.borrow_mut().suspended = true;
    }

    fn resume(&mut self) {
        self.0.borrow_mut().suspended = false;
    }

    fn is_suspended(&self) -> bool {
        self.0.borrow().suspended
    }

    fn set_gain(&mut self, gain: f32) {
        self.0.borrow_mut().gain = gain;
    }

    fn gain(&self) -> f32 {
        self.0.borrow().gain
    }
}

fn sound() -> DecodedSound {
    DecodedSound::new(2, 44_100, vec![0.0; 4_410])
}

fn setup() -> (Controller<FakeOutput>, FakeOutput) {
    let table = AssetTable::new(Path::new("/assets"), &HashMap::new());
    let output = FakeOutput::default();
    (Controller::new(output.clone(), &table, 50), output)
}

/// Click and, if the click produced a load, complete it successfully.
fn click(ctl: &mut Controller<FakeOutput>, name: ChannelName) -> Option<LoadOutcome> {
    ctl.on_channel_button_clicked(name).map(|req| complete(ctl, req))
}

fn complete(ctl: &mut Controller<FakeOutput>, req: LoadRequest) -> LoadOutcome {
    ctl.on_sound_loaded(LoadResult {
        channel: req.channel,
        token: req.token,
        result: Ok(sound()),
    })
}

fn state(ctl: &Controller<FakeOutput>, name: ChannelName) -> AudioState {
    ctl.channel(name).state()
}

#[test]
fn initial_state() {
    let (ctl, out) = setup();
    assert_eq!(ctl.active(), ChannelName::Summer);
    assert_eq!(ctl.scene(), ChannelName::Summer);
    for name in ChannelName::ALL {
        assert_eq!(state(&ctl, name), AudioState::Stopped);
        assert_eq!(ctl.channel(name).icon(), Icon::Weather);
    }
    let snap = ctl.snapshot();
    assert_eq!(snap.backdrop, Backdrop::Sunshine);
    assert_eq!(snap.volume, 50);
    assert!((out.gain() - 50.0 / 99.0).abs() < 1e-6);
}

#[test]
fn rain_rain_winter_scenario() {
    let (mut ctl, out) = setup();

    assert_eq!(click(&mut ctl, ChannelName::Rain), Some(LoadOutcome::Started));
    assert_eq!(ctl.scene(), ChannelName::Rain);
    assert_eq!(ctl.snapshot().backdrop, Backdrop::Rainfall);
    assert_eq!(state(&ctl, ChannelName::Rain), AudioState::Playing);
    assert_eq!(ctl.channel(ChannelName::Rain).icon(), Icon::Pause);

    assert_eq!(click(&mut ctl, ChannelName::Rain), None);
    assert_eq!(state(&ctl, ChannelName::Rain), AudioState::Paused);
    assert_eq!(ctl.scene(), ChannelName::Rain);
    assert!(out.is_suspended());

    assert_eq!(click(&mut ctl, ChannelName::Winter), Some(LoadOutcome::Started));
    assert_eq!(state(&ctl, ChannelName::Rain), AudioState::Stopped);
    assert_eq!(ctl.channel(ChannelName::Rain).icon(), Icon::Weather);
    assert!(!ctl.channel(ChannelName::Rain).has_handle());
    assert_eq!(state(&ctl, ChannelName::Winter), AudioState::Playing);
    assert_eq!(ctl.snapshot().backdrop, Backdrop::Snowfall);
    assert!(!out.is_suspended());
    assert_eq!(out.0.borrow().attached.len(), 1);
}

#[test]
fn toggle_does_not_touch_other_channels() {
    let (mut ctl, _out) = setup();
    click(&mut ctl, ChannelName::Summer);
    assert_eq!(state(&ctl, ChannelName::Summer), AudioState::Playing);

    click(&mut ctl, ChannelName::Summer);
    assert_eq!(state(&ctl, ChannelName::Summer), AudioState::Paused);
    click(&mut ctl, ChannelName::Summer);
    assert_eq!(state(&ctl, ChannelName::Summer), AudioState::Playing);

    assert_eq!(state(&ctl, ChannelName::Rain), AudioState::Stopped);
    assert_eq!(state(&ctl, ChannelName::Winter), AudioState::Stopped);
}

#[test]
fn replaying_after_stop_fetches_again() {
    let (mut ctl, out) = setup();
    let first = ctl.on_channel_button_clicked(ChannelName::Rain).unwrap();
    complete(&mut ctl, first.clone());
    click(&mut ctl, ChannelName::Winter);

    let second = ctl.on_channel_button_clicked(ChannelName::Rain).unwrap();
    assert_eq!(second.source, SoundSource::File("/assets/rain.mp3".into()));
    assert_ne!(second.token, first.token);
    complete(&mut ctl, second);

    assert_eq!(out.0.borrow().started, 3);
    assert_eq!(out.0.borrow().attached.len(), 1);
}

#[test]
fn late_load_after_switch_is_dropped() {
    let (mut ctl, out) = setup();
    let rain = ctl.on_channel_button_clicked(ChannelName::Rain).unwrap();
    let winter = ctl.on_channel_button_clicked(ChannelName::Winter).unwrap();

    // Rain's decode finishes after the user already moved on.
    assert_eq!(complete(&mut ctl, rain), LoadOutcome::Superseded);
    assert_eq!(complete(&mut ctl, winter), LoadOutcome::Started);

    assert_eq!(state(&ctl, ChannelName::Rain), AudioState::Stopped);
    assert_eq!(state(&ctl, ChannelName::Winter), AudioState::Playing);
    assert_eq!(out.0.borrow().attached.len(), 1);
}

#[test]
fn double_click_while_loading_cancels() {
    let (mut ctl, out) = setup();
    let req = ctl.on_channel_button_clicked(ChannelName::Rain).unwrap();
    assert!(ctl.channel(ChannelName::Rain).is_loading());
    assert_eq!(ctl.channel(ChannelName::Rain).icon(), Icon::Pause);

    assert!(ctl.on_channel_button_clicked(ChannelName::Rain).is_none());
    assert!(!ctl.channel(ChannelName::Rain).is_loading());
    assert_eq!(ctl.channel(ChannelName::Rain).icon(), Icon::Weather);

    assert_eq!(complete(&mut ctl, req), LoadOutcome::Superseded);
    assert_eq!(out.0.borrow().started, 0);

    // Third click starts over with a fresh load.
    assert_eq!(click(&mut ctl, ChannelName::Rain), Some(LoadOutcome::Started));
}

#[test]
fn failed_load_keeps_channel_stopped() {
    let (mut ctl, out) = setup();
    let req = ctl.on_channel_button_clicked(ChannelName::Winter).unwrap();
    let outcome = ctl.on_sound_loaded(LoadResult {
        channel: req.channel,
        token: req.token,
        result: Err(AmbientError::Decode("truncated frame".into())),
    });
    assert_eq!(outcome, LoadOutcome::Failed);
    assert_eq!(state(&ctl, ChannelName::Winter), AudioState::Stopped);
    assert_eq!(ctl.active(), ChannelName::Winter);
    assert_eq!(out.0.borrow().started, 0);

    // Next click retries from scratch.
    assert_eq!(click(&mut ctl, ChannelName::Winter), Some(LoadOutcome::Started));
}

#[test]
fn unknown_channel_name_is_rejected() {
    let (mut ctl, _out) = setup();
    assert!(matches!(
        ctl.click_by_name("autumn"),
        Err(AmbientError::UnknownChannel(_))
    ));
    assert_eq!(ctl.active(), ChannelName::Summer);
    assert!(ctl.click_by_name("Rain").unwrap().is_some());
}

#[test]
fn starting_gain_follows_configured_volume() {
    let table = AssetTable::new(Path::new("/assets"), &HashMap::new());
    for (initial, gain) in [(0u8, 0.0f32), (99, 1.0), (200, 100.0 / 99.0)] {
        let output = FakeOutput::default();
        let ctl = Controller::new(output.clone(), &table, initial);
        assert_eq!(ctl.volume(), initial.min(100));
        assert!((output.gain() - gain).abs() < 1e-6, "initial {initial}");
        assert_eq!(ctl.snapshot().gain, output.gain());
    }
}

#[test]
fn volume_applies_to_shared_gain() {
    let (mut ctl, out) = setup();
    ctl.on_volume_slider_input(0);
    assert_eq!(out.gain(), 0.0);
    ctl.on_volume_slider_input(99);
    assert!((out.gain() - 1.0).abs() < f32::EPSILON);
    ctl.on_volume_slider_input(250);
    assert_eq!(ctl.volume(), 100);
}

#[test]
fn shutdown_detaches_everything() {
    let (mut ctl, out) = setup();
    click(&mut ctl, ChannelName::Rain);
    click(&mut ctl, ChannelName::Rain);
    ctl.shutdown();
    assert!(out.0.borrow().attached.is_empty());
    assert!(!out.is_suspended());
    assert_eq!(ctl.playing_count(), 0);
}

#[test]
fn random_click_sequences_keep_one_channel_at_most() {
    for seed in 0..32u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let (mut ctl, out) = setup();
        let mut in_flight: Vec<LoadRequest> = Vec::new();

        for _ in 0..200 {
            match rng.gen_range(0..4) {
                0 if !in_flight.is_empty() => {
                    let idx = rng.gen_range(0..in_flight.len());
                    let req = in_flight.swap_remove(idx);
                    complete(&mut ctl, req);
                }
                3 => ctl.on_volume_slider_input(rng.gen_range(0..=100)),
                _ => {
                    let name = ChannelName::ALL[rng.gen_range(0..3)];
                    if let Some(req) = ctl.on_channel_button_clicked(name) {
                        in_flight.push(req);
                    }
                }
            }

            assert!(ctl.playing_count() <= 1, "seed {seed}");
            let engine = out.0.borrow();
            assert!(engine.attached.len() <= 1, "seed {seed}");
            for name in ChannelName::ALL {
                let ch = ctl.channel(name);
                if name != ctl.active() {
                    assert_eq!(ch.state(), AudioState::Stopped, "seed {seed}");
                    assert!(!ch.is_loading(), "seed {seed}");
                }
                let engaged = ch.state() == AudioState::Playing || ch.is_loading();
                assert_eq!(ch.icon() == Icon::Pause, engaged, "seed {seed}");
            }
        }
    }
}
