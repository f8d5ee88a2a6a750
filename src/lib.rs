//! Brick Breaker - a paddle-and-ball arcade game
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (entities, collisions, particles, game state)
//! - `game`: Orchestrator that re-arms the tick timer and dispatches sounds
//! - `platform`: Drawable surface, one-shot timer and input collaborators
//! - `renderer`: Turns the surface's shapes into a vertex batch
//! - `audio`: Fire-and-forget sound trigger interface
//! - `settings`: Player preferences (quality, volumes)

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use crate::platform::Color;

    /// Fixed tick period in milliseconds
    pub const TICK_MS: u64 = 50;
    /// Delay between losing a life and the next round setup
    pub const ROUND_RESTART_MS: u64 = 1000;
    /// Maximum timer firings handled per `Game::advance` call
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 610.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;

    pub const BACKGROUND_COLOR: Color = Color::rgb(0xD6, 0xD1, 0xF5);

    pub const STARTING_LIVES: i32 = 3;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_Y: f32 = 326.0;
    /// Horizontal offset applied per left/right key press
    pub const PADDLE_STEP: f32 = 10.0;
    pub const PADDLE_COLOR: Color = Color::rgb(0xFF, 0xB6, 0x43);

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED: f32 = 5.0;
    /// Vertical spawn position (resting on the paddle)
    pub const BALL_SPAWN_Y: f32 = 310.0;

    /// Brick layout
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_MARGIN: f32 = 5.0;
    /// Row center heights with their starting hit counts (top to bottom)
    pub const BRICK_ROWS: [(f32, u8); 3] = [(50.0, 3), (70.0, 2), (90.0, 1)];
    /// Fill per remaining hit count, indexed by `hits - 1`
    pub const BRICK_COLORS: [Color; 3] = [
        Color::rgb(0x45, 0x35, 0xAA),
        Color::rgb(0xED, 0x63, 0x9E),
        Color::rgb(0x8F, 0xE1, 0xA2),
    ];

    /// Particle effects
    pub const TRAIL_PER_TICK: usize = 2;
    pub const TRAIL_SIZE: f32 = 5.0;
    pub const TRAIL_LIFETIME: f32 = 10.0;
    pub const TRAIL_DECAY: f32 = 1.0;
    pub const TRAIL_VELOCITY_FACTOR: f32 = 0.5;
    pub const BURST_COUNT: usize = 20;
    pub const BURST_SIZE: f32 = 10.0;
    pub const BURST_LIFETIME: f32 = 20.0;
    pub const BURST_DECAY: f32 = 0.5;
    /// Burst velocities are uniform in [-BURST_SPEED, BURST_SPEED) per axis
    pub const BURST_SPEED: f32 = 3.0;
    /// Bounds contraction per side, per live tick
    pub const PARTICLE_SHRINK: f32 = 0.25;
}

/// Axis-aligned bounding box in canvas coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Bounds {
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box centered on `center` extending `half` in each direction
    #[inline]
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self::new(
            center.x - half.x,
            center.y - half.y,
            center.x + half.x,
            center.y + half.y,
        )
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.x0 + self.x1) * 0.5, (self.y0 + self.y1) * 0.5)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Shifted copy
    #[inline]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }

    /// Inclusive overlap test: touching edges count as overlapping
    #[inline]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x0 <= other.x1 && self.x1 >= other.x0 && self.y0 <= other.y1 && self.y1 >= other.y0
    }
}
