//! Bookswap App Library
//!
//! The runtime that executes the app model's effects, the platform seam and
//! plain-text rendering, shared by the terminal binary and tests.

pub mod platform;
pub mod render;
pub mod runtime;

pub use platform::{Opener, Platform, PlatformAction, RecordingPlatform, TerminalPlatform};
pub use runtime::Runtime;
