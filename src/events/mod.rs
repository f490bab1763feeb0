//! Event handling for the Quartz TUI.
//!
//! Translates terminal input into store actions.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{KeyChord, binding_matches};
