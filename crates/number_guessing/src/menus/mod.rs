//! Menu system: a line-based state machine over screens.

mod controller;
mod screen;
mod text;

pub use controller::MenuController;
pub use screen::{Screen, ScreenTransition};
