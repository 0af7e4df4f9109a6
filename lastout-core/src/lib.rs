pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod locator;
pub mod screen;
pub mod source;
pub mod term;

// Re-export the entry points so callers can just use `lastout_core::last_output`
pub use engine::last_output;
pub use error::{Error, FetchError, Result};
pub use extract::{Extraction, MarkerSpan, OutputBlock, extract};
pub use locator::{SessionLocator, SourceSpec};
pub use screen::{ScreenContent, ScreenLine, TextBuffer, assemble};
pub use source::{FetchOutcome, ScreenSource};
pub use term::{MarkerSet, Terminator};
