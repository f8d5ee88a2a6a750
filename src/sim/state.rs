//! Game state and round phases

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::platform::{ShapeId, Surface};

use super::ball::Ball;
use super::bricks::BrickGrid;
use super::collision::{ColliderKind, Registry};
use super::entity::Entity;
use super::paddle::Paddle;
use super::particles::ParticleSystem;

/// Current phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Placing the ball and HUD for a new round
    Setup,
    /// Ball resting on the paddle, waiting for the launch key
    AwaitingLaunch,
    /// Ticking
    Running,
    /// Life lost, next round scheduled
    RoundTransition,
    /// Every brick destroyed
    Won,
    /// Lives exhausted
    Lost,
}

impl GamePhase {
    /// Won and Lost end the session; nothing restarts automatically
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// State changes other layers react to (sound, logging, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    /// Ball placed on the paddle, waiting for launch
    RoundReady { lives: i32 },
    Launched,
    PaddleBounce,
    BrickHit { remaining: u8 },
    BrickDestroyed { center: Vec2 },
    LifeLost { lives: i32 },
    Won,
    Lost,
}

/// Surface text handles owned by the game
#[derive(Debug, Clone, Default)]
pub struct Hud {
    pub lives: Option<ShapeId>,
    pub prompt: Option<ShapeId>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Remaining lives; the session is lost once this goes negative
    pub lives: i32,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Option<Ball>,
    pub grid: BrickGrid,
    /// Shape handle -> entity kind for everything the ball can hit
    pub registry: Registry,
    pub particles: ParticleSystem,
    pub hud: Hud,
    /// Ticks run this session
    pub ticks: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Draw the paddle and brick grid. The first round still needs
    /// `tick::setup_round`.
    pub fn new(surface: &mut dyn Surface, particles: ParticleSystem) -> Self {
        let width = surface.width();
        let paddle = Paddle::spawn(surface, Vec2::new(width / 2.0, PADDLE_Y));
        let grid = BrickGrid::build(surface);

        let mut registry = Registry::new();
        if let Some(shape) = paddle.shape() {
            registry.register(shape, ColliderKind::Paddle);
        }
        for shape in grid.shapes() {
            registry.register(shape, ColliderKind::Brick);
        }

        Self {
            lives: STARTING_LIVES,
            phase: GamePhase::Setup,
            paddle,
            ball: None,
            grid,
            registry,
            particles,
            hud: Hud::default(),
            ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn bricks_remaining(&self) -> usize {
        self.grid.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Canvas;

    #[test]
    fn test_new_registers_paddle_and_bricks() {
        let mut canvas = Canvas::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT, BACKGROUND_COLOR);
        let state = GameState::new(&mut canvas, ParticleSystem::new(1, 100, true));
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, GamePhase::Setup);
        assert_eq!(state.registry.count(ColliderKind::Paddle), 1);
        assert_eq!(state.registry.count(ColliderKind::Brick), state.bricks_remaining());
        assert_eq!(state.bricks_remaining(), 24);
        assert_eq!(state.paddle.center(), Vec2::new(305.0, PADDLE_Y));
        assert!(state.ball.is_none());
    }

    #[test]
    fn test_drain_events() {
        let mut canvas = Canvas::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT, BACKGROUND_COLOR);
        let mut state = GameState::new(&mut canvas, ParticleSystem::new(1, 100, true));
        state.push_event(GameEvent::Launched);
        assert_eq!(state.drain_events(), vec![GameEvent::Launched]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_terminal_phases() {
        assert!(GamePhase::Won.is_terminal());
        assert!(GamePhase::Lost.is_terminal());
        assert!(!GamePhase::RoundTransition.is_terminal());
        assert!(!GamePhase::AwaitingLaunch.is_terminal());
    }
}
