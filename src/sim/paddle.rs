//! The player's paddle

use glam::Vec2;

use crate::consts::*;
use crate::platform::{ShapeId, Surface};

use super::ball::Ball;
use super::entity::{Body, Entity};

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    body: Body,
    /// Ball resting on the paddle before launch (non-owning)
    carried: Option<ShapeId>,
}

impl Entity for Paddle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Paddle {
    pub fn spawn(surface: &mut dyn Surface, center: Vec2) -> Self {
        Self {
            body: Body::rectangle(
                surface,
                center,
                Vec2::new(PADDLE_WIDTH / 2.0, PADDLE_HEIGHT / 2.0),
                PADDLE_COLOR,
            ),
            carried: None,
        }
    }

    /// Carry `ball` until launch
    pub fn attach_ball(&mut self, ball: &Ball) {
        self.carried = ball.shape();
    }

    /// Release the carried ball, returning its handle
    pub fn detach_ball(&mut self) -> Option<ShapeId> {
        self.carried.take()
    }

    pub fn carried(&self) -> Option<ShapeId> {
        self.carried
    }

    /// Move horizontally by `offset`. A move that would push either edge
    /// outside [0, width] is rejected outright, not clamped to the edge. The
    /// carried ball, if `ball` is it, moves along.
    pub fn shift(
        &mut self,
        surface: &mut dyn Surface,
        offset: f32,
        ball: Option<&mut Ball>,
    ) -> bool {
        let bounds = self.bounds();
        if bounds.x0 + offset < 0.0 || bounds.x1 + offset > surface.width() {
            return false;
        }

        self.translate(surface, offset, 0.0);
        if let Some(ball) = ball {
            if self.carried.is_some() && self.carried == ball.shape() {
                ball.translate(surface, offset, 0.0);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Canvas, Color};
    use proptest::prelude::*;

    fn canvas() -> Canvas {
        Canvas::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT, Color::BLACK)
    }

    #[test]
    fn test_carried_ball_moves_with_paddle() {
        let mut canvas = canvas();
        let mut paddle = Paddle::spawn(&mut canvas, Vec2::new(305.0, PADDLE_Y));
        let mut ball = Ball::spawn(&mut canvas, Vec2::new(305.0, BALL_SPAWN_Y));
        paddle.attach_ball(&ball);

        assert!(paddle.shift(&mut canvas, -PADDLE_STEP, Some(&mut ball)));
        assert_eq!(paddle.center().x, 295.0);
        assert_eq!(ball.center().x, 295.0);

        paddle.detach_ball();
        assert!(paddle.shift(&mut canvas, -PADDLE_STEP, Some(&mut ball)));
        assert_eq!(paddle.center().x, 285.0);
        assert_eq!(ball.center().x, 295.0);
    }

    #[test]
    fn test_move_rejected_at_right_edge() {
        let mut canvas = canvas();
        // Right edge exactly on the wall
        let mut paddle = Paddle::spawn(
            &mut canvas,
            Vec2::new(PLAYFIELD_WIDTH - PADDLE_WIDTH / 2.0, PADDLE_Y),
        );
        let before = paddle.bounds();
        assert!(!paddle.shift(&mut canvas, PADDLE_STEP, None));
        assert_eq!(paddle.bounds(), before);
    }

    #[test]
    fn test_move_rejected_not_clamped() {
        let mut canvas = canvas();
        // 5 units from the left wall: a 10 unit step is refused entirely
        let mut paddle = Paddle::spawn(&mut canvas, Vec2::new(PADDLE_WIDTH / 2.0 + 5.0, PADDLE_Y));
        assert!(!paddle.shift(&mut canvas, -PADDLE_STEP, None));
        assert_eq!(paddle.bounds().x0, 5.0);
        assert!(paddle.shift(&mut canvas, -5.0, None));
        assert_eq!(paddle.bounds().x0, 0.0);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_playfield(moves in prop::collection::vec(prop::bool::ANY, 0..200)) {
            let mut canvas = canvas();
            let mut paddle = Paddle::spawn(&mut canvas, Vec2::new(PLAYFIELD_WIDTH / 2.0, PADDLE_Y));
            for right in moves {
                let offset = if right { PADDLE_STEP } else { -PADDLE_STEP };
                paddle.shift(&mut canvas, offset, None);
                let b = paddle.bounds();
                prop_assert!(b.x0 >= 0.0);
                prop_assert!(b.x1 <= PLAYFIELD_WIDTH);
            }
        }
    }
}
