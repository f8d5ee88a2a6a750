//! Input collaborator
//!
//! The host delivers discrete key presses; nothing is polled per tick.

use serde::{Deserialize, Serialize};

use crate::consts::PADDLE_STEP;

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Move the paddle one step left
    Left,
    /// Move the paddle one step right
    Right,
    /// Release the ball (only bound while awaiting launch)
    Launch,
}

impl InputEvent {
    /// Map a host key name to an event (`Left`/`Right` arrows, `space`, A/D)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "left" | "arrowleft" | "a" => Some(InputEvent::Left),
            "right" | "arrowright" | "d" => Some(InputEvent::Right),
            "space" | " " => Some(InputEvent::Launch),
            _ => None,
        }
    }

    /// Horizontal paddle offset for movement events
    pub fn paddle_offset(self) -> Option<f32> {
        match self {
            InputEvent::Left => Some(-PADDLE_STEP),
            InputEvent::Right => Some(PADDLE_STEP),
            InputEvent::Launch => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(InputEvent::from_key("Left"), Some(InputEvent::Left));
        assert_eq!(InputEvent::from_key("ArrowRight"), Some(InputEvent::Right));
        assert_eq!(InputEvent::from_key("space"), Some(InputEvent::Launch));
        assert_eq!(InputEvent::from_key("q"), None);
    }

    #[test]
    fn test_paddle_offset() {
        assert_eq!(InputEvent::Left.paddle_offset(), Some(-10.0));
        assert_eq!(InputEvent::Right.paddle_offset(), Some(10.0));
        assert_eq!(InputEvent::Launch.paddle_offset(), None);
    }
}
