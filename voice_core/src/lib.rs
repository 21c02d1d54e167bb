#![forbid(unsafe_code)]

//! Core domain model and timer logic for the vox vocal routine trainer.
//!
//! This crate provides:
//! - Domain types (exercises, routines, session state, cues)
//! - The built-in routine and catalog file loading
//! - The routine progression engine
//! - The countdown driver and cue collaborators
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod cue;
pub mod engine;
pub mod timer;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_routine, default_routine};
pub use config::Config;
pub use cue::{CueSink, NoopCues, RecordingCues, TracingCues};
pub use engine::{RestKind, RoutineEngine};
pub use timer::{Command, Countdown, RunOutcome, TickSchedule};
