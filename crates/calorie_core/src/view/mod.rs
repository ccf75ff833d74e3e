//! Reducer-style view controller and its message, request and screen types.

pub mod controller;
pub mod input;
pub mod message;
pub mod screen;
pub mod state;

pub use controller::{SessionOptions, ViewController, INTERNAL_ERROR_BANNER};
pub use message::{Msg, Outcome, Reply, Request};
pub use screen::Screen;
pub use state::ViewState;
