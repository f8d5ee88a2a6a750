//! Fixed-interval game loop
//!
//! Every function here runs to completion synchronously. Scheduling (when the
//! next tick or the next round happens) is the caller's job, driven by the
//! returned `TickOutcome`.

use glam::Vec2;

use super::ball::Ball;
use super::bricks::HitOutcome;
use super::collision::ColliderKind;
use super::entity::Entity;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::platform::{Color, Surface};

const PROMPT_TEXT: &str = "Press Space to start";
const PROMPT_POS: Vec2 = Vec2::new(300.0, 200.0);
const PROMPT_SIZE: u16 = 40;
const LIVES_POS: Vec2 = Vec2::new(50.0, 20.0);
const LIVES_SIZE: u16 = 15;
const BANNER_SIZE: u16 = 30;

/// What the caller should schedule after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Re-arm the next tick
    Continue,
    /// Life lost with lives to spare: set up the next round after a delay
    BallLost,
    /// Session won, stop ticking
    Won,
    /// Session lost, stop ticking
    Lost,
    /// Not running, nothing to schedule
    Idle,
}

/// Place a fresh ball on the paddle, refresh the HUD and show the launch
/// prompt.
pub fn setup_round(state: &mut GameState, surface: &mut dyn Surface) {
    state.phase = GamePhase::Setup;

    if let Some(mut old) = state.ball.take() {
        old.destroy(surface);
    }
    let x = state.paddle.center().x;
    let ball = Ball::spawn(surface, Vec2::new(x, BALL_SPAWN_Y));
    state.paddle.attach_ball(&ball);
    state.ball = Some(ball);

    let lives_text = format!("Lives: {}", state.lives);
    match state.hud.lives {
        Some(shape) => surface.set_text(shape, &lives_text),
        None => {
            let shape = surface.create_text(LIVES_POS, &lives_text, LIVES_SIZE, Color::BLACK);
            state.hud.lives = Some(shape);
        }
    }

    if let Some(prompt) = state.hud.prompt.take() {
        surface.delete(prompt);
    }
    let prompt = surface.create_text(PROMPT_POS, PROMPT_TEXT, PROMPT_SIZE, Color::BLACK);
    state.hud.prompt = Some(prompt);

    state.phase = GamePhase::AwaitingLaunch;
    state.push_event(GameEvent::RoundReady { lives: state.lives });
    log::info!("round ready ({} lives, {} bricks)", state.lives, state.bricks_remaining());
}

/// Release the ball. Only valid while awaiting launch; returns whether the
/// launch happened. The caller starts the tick schedule.
pub fn launch(state: &mut GameState, surface: &mut dyn Surface) -> bool {
    if state.phase != GamePhase::AwaitingLaunch {
        return false;
    }
    if let Some(prompt) = state.hud.prompt.take() {
        surface.delete(prompt);
    }
    state.paddle.detach_ball();
    state.phase = GamePhase::Running;
    state.push_event(GameEvent::Launched);
    log::info!("ball launched");
    true
}

/// Paddle movement from an input event, accepted in any non-terminal phase
pub fn move_paddle(state: &mut GameState, surface: &mut dyn Surface, offset: f32) -> bool {
    if state.phase.is_terminal() {
        return false;
    }
    state.paddle.shift(surface, offset, state.ball.as_mut())
}

/// Resolve the ball against everything it overlaps and apply brick hits
pub fn check_collisions(state: &mut GameState, surface: &mut dyn Surface) {
    let Some(ball) = state.ball.as_mut() else {
        return;
    };
    let overlapping = state
        .registry
        .overlapping(surface, ball.bounds(), ball.shape());
    if overlapping.is_empty() {
        return;
    }

    let bricks = ball.resolve_collision(&overlapping);
    if overlapping.iter().any(|c| c.is_paddle()) {
        state.push_event(GameEvent::PaddleBounce);
    }

    for shape in bricks {
        match state.grid.hit(shape, surface, &mut state.particles) {
            Some(HitOutcome::Cracked { remaining }) => {
                log::debug!("brick {:?} cracked, {} hits left", shape, remaining);
                state.push_event(GameEvent::BrickHit { remaining });
            }
            Some(HitOutcome::Destroyed { center }) => {
                state.registry.deregister(shape);
                debug_assert_eq!(
                    state.registry.count(ColliderKind::Brick),
                    state.grid.len(),
                    "registry out of step with the brick grid"
                );
                log::debug!(
                    "brick {:?} destroyed, {} remaining",
                    shape,
                    state.grid.len()
                );
                state.push_event(GameEvent::BrickDestroyed { center });
            }
            None => log::warn!("overlap reported unknown brick {:?}", shape),
        }
    }
}

fn draw_banner(surface: &mut dyn Surface, text: &str, color: Color) {
    let center = Vec2::new(surface.width() / 2.0, surface.height() / 2.0);
    surface.create_text(center, text, BANNER_SIZE, color);
}

/// One game-loop tick: collisions, win check, floor check, then motion
pub fn tick(state: &mut GameState, surface: &mut dyn Surface) -> TickOutcome {
    if state.phase != GamePhase::Running {
        log::warn!("tick while {:?} ignored", state.phase);
        return TickOutcome::Idle;
    }
    state.ticks += 1;

    check_collisions(state, surface);

    let Some(ball) = state.ball.as_mut() else {
        log::error!("running without a ball");
        return TickOutcome::Idle;
    };

    // Win: no active bricks left
    if state.grid.is_empty() {
        ball.stop();
        state.phase = GamePhase::Won;
        draw_banner(surface, "YOU WIN!", Color::GREEN);
        state.push_event(GameEvent::Won);
        log::info!("all bricks cleared after {} ticks", state.ticks);
        return TickOutcome::Won;
    }

    if ball.bounds().y1 >= surface.height() {
        ball.stop();
        state.lives -= 1;
        state.push_event(GameEvent::LifeLost { lives: state.lives });
        log::debug!("ball dropped, {} lives left", state.lives);

        if state.lives < 0 {
            state.phase = GamePhase::Lost;
            draw_banner(surface, "GAME OVER", Color::RED);
            state.push_event(GameEvent::Lost);
            log::info!("out of lives after {} ticks", state.ticks);
            return TickOutcome::Lost;
        }
        state.phase = GamePhase::RoundTransition;
        return TickOutcome::BallLost;
    }

    ball.advance(surface, &mut state.particles);
    state.particles.update(surface);
    TickOutcome::Continue
}

/// Debug/testing: teleport the ball so its center sits at `center`
pub fn place_ball(state: &mut GameState, surface: &mut dyn Surface, center: Vec2) {
    if let Some(ball) = state.ball.as_mut() {
        let delta = center - ball.center();
        ball.translate(surface, delta.x, delta.y);
    }
}
