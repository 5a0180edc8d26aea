//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns the `Controller`, all components, and `AppState` (the
//!   read-only snapshot components render from).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from the terminal
//!   reader and from sound-loading tasks.
//! - The event loop draws a frame, then awaits the next message.
//! - Components return `Vec<Action>`; App applies each Action to the
//!   controller and refreshes the snapshot.
//! - A click on a stopped channel yields a `LoadRequest`; App runs it on a
//!   spawned task and feeds the result back as `AppMessage::SoundLoaded`.

use std::io::{self, Stdout};
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use weather_core::assets::{ChannelName, SoundSource};
use weather_core::channel::{LoadRequest, LoadResult};
use weather_core::controller::Controller;
use weather_core::error::{AmbientError, Result as AmbientResult};
use weather_core::loader;
use weather_core::output::{DecodedSound, OutputService};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    audio,
    component::Component,
    components::{
        channel_buttons::ChannelButtons, header::Header, scene_panel::ScenePanel,
        volume_slider::{self, VolumeSlider, VOLUME_STEP},
    },
    focus::FocusRing,
    theme::C_BG,
    widgets::status_bar,
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    SoundLoaded(LoadResult),
}

/// Backdrop animation cadence.
const ANIM_INTERVAL: Duration = Duration::from_millis(120);

/// Screen regions from the last draw, used for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default)]
struct PaneAreas {
    buttons: Rect,
    volume: Rect,
}

pub struct App<O: OutputService> {
    controller: Controller<O>,
    state: AppState,
    header: Header,
    buttons: ChannelButtons,
    scene: ScenePanel,
    volume: VolumeSlider,
    focus: FocusRing,
    areas: PaneAreas,
    /// Loads requested by the last actions, spawned by the run loop.
    load_queue: Vec<LoadRequest>,
    should_quit: bool,
}

impl<O: OutputService> App<O> {
    pub fn new(controller: Controller<O>) -> Self {
        let state = AppState::new(controller.snapshot());
        Self {
            controller,
            state,
            header: Header::new(),
            buttons: ChannelButtons::new(),
            scene: ScenePanel::new(),
            volume: VolumeSlider::new(),
            focus: FocusRing::new(),
            areas: PaneAreas::default(),
            load_queue: Vec::new(),
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let result = self.event_loop(&mut terminal).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        self.controller.shutdown();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        let mut anim_tick = tokio::time::interval(ANIM_INTERVAL);
        anim_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!("event loop started");
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                }

                _ = anim_tick.tick() => {
                    if self.state.is_playing() {
                        self.state.frame = self.state.frame.wrapping_add(1);
                        needs_redraw = true;
                    }
                }
            }

            for request in self.load_queue.drain(..) {
                spawn_load(request, tx.clone());
            }
        }

        info!("event loop finished");
        Ok(())
    }

    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    return false;
                }
                for action in self.handle_key(key) {
                    self.apply_action(action);
                }
                true
            }
            AppMessage::Event(Event::Mouse(event)) => {
                let actions = self.handle_mouse(event);
                let redraw = !actions.is_empty();
                for action in actions {
                    self.apply_action(action);
                }
                redraw
            }
            AppMessage::Event(Event::Resize(..)) => true,
            AppMessage::Event(_) => false,
            AppMessage::SoundLoaded(loaded) => {
                let channel = loaded.channel;
                let outcome = self.controller.on_sound_loaded(loaded);
                debug!("{}: load finished -> {:?}", channel, outcome);
                self.refresh();
                true
            }
        }
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        // Global keys — always active regardless of focus
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::Quit];
            }
            KeyCode::Char('q') | KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            KeyCode::Char(c @ '1'..='3') => {
                let name = ChannelName::ALL[(c as u8 - b'1') as usize];
                return vec![Action::ToggleChannel(name)];
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char(']') => {
                let v = volume_slider::step(self.state.widget.volume, VOLUME_STEP as i16);
                return vec![Action::Volume(v)];
            }
            KeyCode::Char('-') | KeyCode::Char('[') => {
                let v = volume_slider::step(self.state.widget.volume, -(VOLUME_STEP as i16));
                return vec![Action::Volume(v)];
            }
            _ => {}
        }

        match self.focus.current() {
            ComponentId::VolumeSlider => self.volume.handle_key(key, &self.state),
            _ => self.buttons.handle_key(key, &self.state),
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        if !matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::Drag(_)
        ) {
            return vec![];
        }

        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        let areas = self.areas;
        let (col, row) = (event.column, event.row);

        if hit(areas.buttons, col, row) {
            let mut actions = self.buttons.handle_mouse(event, areas.buttons, &self.state);
            if !self.focus.is_focused(ComponentId::ChannelButtons) {
                actions.insert(0, Action::FocusPane(self.buttons.id()));
            }
            return actions;
        }
        if hit(areas.volume, col, row) {
            let mut actions = self.volume.handle_mouse(event, areas.volume, &self.state);
            if !self.focus.is_focused(ComponentId::VolumeSlider) {
                actions.insert(0, Action::FocusPane(self.volume.id()));
            }
            return actions;
        }
        vec![]
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn apply_action(&mut self, action: Action) {
        debug!("apply_action: {:?}", action);
        match action {
            Action::ToggleChannel(name) => {
                if let Some(request) = self.controller.on_channel_button_clicked(name) {
                    self.load_queue.push(request);
                }
            }
            Action::Volume(v) => self.controller.on_volume_slider_input(v),
            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }
            Action::FocusPane(id) => self.focus.set(id),
            Action::Quit => self.should_quit = true,
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        self.state.widget = self.controller.snapshot();
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        // ── Outer layout: header | buttons | scene | volume | statusbar ──────
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.header.min_height()),
                Constraint::Length(self.buttons.min_height()),
                Constraint::Min(self.scene.min_height()),
                Constraint::Length(self.volume.min_height()),
                Constraint::Length(1),
            ])
            .split(area);

        let focused = self.focus.current();
        self.header.draw(frame, outer[0], false, &self.state);
        self.buttons.draw(
            frame,
            outer[1],
            focused == ComponentId::ChannelButtons,
            &self.state,
        );
        self.scene.draw(frame, outer[2], false, &self.state);
        self.volume.draw(
            frame,
            outer[3],
            focused == ComponentId::VolumeSlider,
            &self.state,
        );
        status_bar::draw_keys_bar(frame, outer[4], focused, self.state.active_status());

        self.areas = PaneAreas {
            buttons: outer[1],
            volume: outer[3],
        };
    }
}

// ── Sound loading ─────────────────────────────────────────────────────────────

fn spawn_load(request: LoadRequest, tx: mpsc::Sender<AppMessage>) {
    tokio::spawn(async move {
        let LoadRequest {
            channel,
            source,
            token,
        } = request;
        let result = load_sound(&source).await;
        if let Err(e) = &result {
            warn!("{}: load failed: {}", channel, e);
        }
        let _ = tx
            .send(AppMessage::SoundLoaded(LoadResult {
                channel,
                token,
                result,
            }))
            .await;
    });
}

/// Fetch on the runtime, decode on the blocking pool.
async fn load_sound(source: &SoundSource) -> AmbientResult<DecodedSound> {
    let bytes = loader::fetch_sound(source).await?;
    tokio::task::spawn_blocking(move || audio::decode_sound(bytes))
        .await
        .map_err(|e| AmbientError::Task(e.to_string()))?
}
