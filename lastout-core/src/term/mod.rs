//! Shell-integration marker definitions.
//!
//! - `osc`: OSC 133 literals (command start / command finished) and the
//!   exit status that trails the finished marker

pub mod osc;

pub use osc::{MarkerSet, Terminator};
