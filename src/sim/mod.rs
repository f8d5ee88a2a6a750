//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed tick only, driven from outside by a one-shot timer
//! - Seeded RNG only (particle bursts)
//! - Stable iteration order (shape ids are allocated in creation order)
//! - Draws exclusively through the `Surface` trait

pub mod ball;
pub mod bricks;
pub mod collision;
pub mod entity;
pub mod paddle;
pub mod particles;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use bricks::{Brick, BrickGrid, HitOutcome};
pub use collision::{Collider, ColliderKind, Registry};
pub use entity::{Body, Entity};
pub use paddle::Paddle;
pub use particles::{Particle, ParticleKind, ParticleSystem};
pub use state::{GameEvent, GamePhase, GameState, Hud};
pub use tick::{TickOutcome, check_collisions, launch, move_paddle, place_ball, setup_round, tick};
