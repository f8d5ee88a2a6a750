//! Platform abstraction layer
//!
//! The simulation core never touches a window, a pixel buffer or a clock
//! directly. It talks to these collaborators instead:
//! - `surface`: shape handles on a drawable canvas (create/move/recolor/delete,
//!   bounds and overlap queries)
//! - `timer`: one-shot scheduling used to re-arm the tick
//! - `input`: discrete key-press events

pub mod input;
pub mod surface;
pub mod timer;

pub use input::InputEvent;
pub use surface::{Canvas, Color, Shape, ShapeId, ShapeKind, Surface};
pub use timer::{Timer, TimerAction};
