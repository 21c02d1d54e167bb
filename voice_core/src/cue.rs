//! Audio cue collaborators.
//!
//! The engine never plays sounds itself. Cues are handed to a `CueSink`,
//! which must return immediately and swallow its own failures.

use crate::Cue;

/// Receiver of fire-and-forget start/completion cues
pub trait CueSink {
    fn emit(&mut self, cue: Cue);
}

impl<T: CueSink + ?Sized> CueSink for Box<T> {
    fn emit(&mut self, cue: Cue) {
        (**self).emit(cue)
    }
}

impl<T: CueSink + ?Sized> CueSink for &mut T {
    fn emit(&mut self, cue: Cue) {
        (**self).emit(cue)
    }
}

/// Discards every cue
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopCues;

impl CueSink for NoopCues {
    fn emit(&mut self, _cue: Cue) {}
}

/// Keeps every cue in order, for tests and replay
#[derive(Clone, Debug, Default)]
pub struct RecordingCues {
    pub cues: Vec<Cue>,
}

impl CueSink for RecordingCues {
    fn emit(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

/// Logs cues instead of playing them
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingCues;

impl CueSink for TracingCues {
    fn emit(&mut self, cue: Cue) {
        tracing::info!(?cue, "cue");
    }
}
