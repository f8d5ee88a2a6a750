//! Session orchestrator
//!
//! Owns the simulation state, the surface it draws on, the sound backend and
//! the one-shot timer. Hosts feed it input events and elapsed time; it runs
//! ticks and round setups when the timer fires and turns game events into
//! sounds.

use glam::Vec2;

use crate::audio::{AudioManager, MusicTrack, SoundEffect, SoundTrigger};
use crate::consts::*;
use crate::platform::{InputEvent, Surface, Timer, TimerAction};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GamePhase, GameState, ParticleSystem, TickOutcome};

pub struct Game<S, A> {
    state: GameState,
    surface: S,
    audio: AudioManager<A>,
    timer: Timer,
    /// The soundtrack starts on the first launch only
    music_started: bool,
    events: Vec<GameEvent>,
}

impl<S: Surface, A: SoundTrigger> Game<S, A> {
    /// Build the board on `surface` and set up the first round
    pub fn new(mut surface: S, audio: A, settings: &Settings, seed: u64) -> Self {
        let particles =
            ParticleSystem::new(seed, settings.max_particles(), settings.effective_trails());
        let state = GameState::new(&mut surface, particles);
        log::info!(
            "Session started: {} bricks, quality {}, seed {}",
            state.bricks_remaining(),
            settings.quality.as_str(),
            seed
        );

        let mut game = Self {
            state,
            surface,
            audio: AudioManager::new(audio, settings),
            timer: Timer::new(),
            music_started: false,
            events: Vec::new(),
        };
        sim::setup_round(&mut game.state, &mut game.surface);
        game.dispatch_events();
        game
    }

    /// Apply one input event. Launch runs the first tick right away.
    pub fn handle_input(&mut self, input: InputEvent) {
        match input {
            InputEvent::Launch => {
                if sim::launch(&mut self.state, &mut self.surface) {
                    self.fire(TimerAction::Tick);
                }
            }
            InputEvent::Left | InputEvent::Right => {
                if let Some(offset) = input.paddle_offset() {
                    sim::move_paddle(&mut self.state, &mut self.surface, offset);
                }
            }
        }
        self.dispatch_events();
    }

    /// Let `elapsed_ms` of virtual time pass, firing whatever falls due.
    /// At most `MAX_SUBSTEPS` firings happen per call; time beyond that is
    /// dropped rather than replayed.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let target = self.timer.now() + elapsed_ms;
        let mut substeps = 0;
        while substeps < MAX_SUBSTEPS {
            let Some(action) = self.timer.pop_due(target) else {
                break;
            };
            self.fire(action);
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS && self.timer.pending().is_some_and(|(due, _)| due <= target) {
            log::trace!("substep limit reached at {} ms", target);
        }
        self.timer.settle(target);
        self.dispatch_events();
    }

    fn fire(&mut self, action: TimerAction) {
        match action {
            TimerAction::Tick => match sim::tick(&mut self.state, &mut self.surface) {
                TickOutcome::Continue => {
                    self.timer.schedule(TICK_MS, TimerAction::Tick);
                }
                TickOutcome::BallLost => {
                    self.timer.schedule(ROUND_RESTART_MS, TimerAction::SetupRound);
                }
                TickOutcome::Won | TickOutcome::Lost => {
                    log::info!(
                        "Session over ({:?}) at {} ms after {} ticks",
                        self.state.phase,
                        self.timer.now(),
                        self.state.ticks
                    );
                }
                TickOutcome::Idle => {}
            },
            TimerAction::SetupRound => sim::setup_round(&mut self.state, &mut self.surface),
        }
    }

    /// Turn fresh simulation events into sounds and queue them for the host
    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::BrickHit { .. } | GameEvent::BrickDestroyed { .. } => {
                    self.audio.play_effect(SoundEffect::BrickHit)
                }
                GameEvent::Launched if !self.music_started => {
                    self.music_started = true;
                    self.audio.play_music(MusicTrack::Soundtrack);
                }
                GameEvent::Won => {
                    self.audio.stop_music();
                    self.audio.play_music(MusicTrack::Victory);
                }
                GameEvent::Lost => {
                    self.audio.stop_music();
                    self.audio.play_music(MusicTrack::GameOver);
                }
                _ => {}
            }
            self.events.push(event);
        }
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Debug/testing: teleport the ball
    pub fn place_ball(&mut self, center: Vec2) {
        sim::place_ball(&mut self.state, &mut self.surface, center);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn audio(&self) -> &A {
        self.audio.backend()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn lives(&self) -> i32 {
        self.state.lives
    }

    /// Virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.timer.now()
    }

    /// Next scheduled firing, if any
    pub fn pending(&self) -> Option<(u64, TimerAction)> {
        self.timer.pending()
    }

    pub fn is_over(&self) -> bool {
        self.state.phase.is_terminal()
    }
}
