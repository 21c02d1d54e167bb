//! Countdown driver.
//!
//! Calls `RoutineEngine::tick()` once per interval while the engine runs.
//! There is never more than one pending tick: each tick is scheduled after
//! the previous one fired, and any command that leaves the engine paused
//! cancels the pending tick, so a pause between ticks takes effect with no
//! extra decrement.
//!
//! Commands arrive over an `mpsc` channel so the presentation layer can read
//! input on its own thread while this loop stays the only writer of the
//! session state.

use crate::cue::CueSink;
use crate::engine::RoutineEngine;
use crate::Transition;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

/// User commands accepted by the countdown loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Toggle,
    Reset,
    JumpToExercise(i64),
    NextExercise,
    PreviousExercise,
    JumpToRepetition(i64),
    Quit,
}

/// Why `Countdown::run` returned
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Finished,
    Quit,
    /// The command channel closed while nothing was left to count down
    Disconnected,
}

/// Handle to the single pending tick
#[derive(Debug, Default)]
pub struct TickSchedule {
    deadline: Option<Instant>,
}

impl TickSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending tick with one due `interval` from now
    pub fn schedule(&mut self, interval: Duration) {
        self.cancel();
        self.deadline = Some(Instant::now() + interval);
    }

    /// Drop the pending tick. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time until the pending tick is due, zero if overdue
    pub fn time_left(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}

/// Drives a `RoutineEngine` from a timer and a command channel
pub struct Countdown<S: CueSink> {
    engine: RoutineEngine,
    cues: S,
    schedule: TickSchedule,
    interval: Duration,
    exit_on_finish: bool,
}

impl<S: CueSink> Countdown<S> {
    pub fn new(engine: RoutineEngine, cues: S, interval: Duration) -> Self {
        Self {
            engine,
            cues,
            schedule: TickSchedule::new(),
            interval,
            exit_on_finish: false,
        }
    }

    /// Return from `run` as soon as the routine reaches its terminal state
    pub fn exit_on_finish(mut self, exit: bool) -> Self {
        self.exit_on_finish = exit;
        self
    }

    pub fn engine(&self) -> &RoutineEngine {
        &self.engine
    }

    pub fn cues(&self) -> &S {
        &self.cues
    }

    pub fn is_tick_pending(&self) -> bool {
        self.schedule.is_pending()
    }

    pub fn into_parts(self) -> (RoutineEngine, S) {
        (self.engine, self.cues)
    }

    /// Apply one command. Returns whether the session state changed.
    pub fn apply(&mut self, command: Command) -> bool {
        let before = self.engine.state().clone();
        let cue = match command {
            Command::Start => self.engine.start(),
            Command::Pause => {
                self.engine.pause();
                None
            }
            Command::Toggle => self.engine.toggle(),
            Command::Reset => {
                self.engine.reset();
                None
            }
            Command::JumpToExercise(index) => {
                self.engine.jump_to_exercise(index);
                None
            }
            Command::NextExercise => {
                let next = self.engine.state().exercise_index as i64 + 1;
                self.engine.jump_to_exercise(next);
                None
            }
            Command::PreviousExercise => {
                let previous = self.engine.state().exercise_index as i64 - 1;
                self.engine.jump_to_exercise(previous);
                None
            }
            Command::JumpToRepetition(delta) => {
                self.engine.jump_to_repetition(delta);
                None
            }
            Command::Quit => None,
        };
        if let Some(cue) = cue {
            self.cues.emit(cue);
        }
        self.sync_schedule();
        &before != self.engine.state()
    }

    /// Fire the pending tick now
    pub fn fire(&mut self) -> Option<Transition> {
        self.schedule.cancel();
        let transition = self.engine.tick();
        if let Some(t) = transition {
            self.cues.emit(t.cue());
        }
        self.sync_schedule();
        transition
    }

    fn sync_schedule(&mut self) {
        if !self.engine.is_running() {
            if self.schedule.cancel() {
                tracing::trace!("Cancelled pending tick");
            }
        } else if !self.schedule.is_pending() {
            self.schedule.schedule(self.interval);
        }
    }

    /// Run until quit, finish (if enabled) or the channel closes while idle.
    ///
    /// `observer` sees the engine after every tick and every command that
    /// changed state, along with the boundary the tick crossed, if any.
    pub fn run<F>(&mut self, commands: &Receiver<Command>, mut observer: F) -> RunOutcome
    where
        F: FnMut(&RoutineEngine, Option<Transition>),
    {
        let mut connected = true;
        loop {
            if self.exit_on_finish && self.engine.is_finished() {
                return RunOutcome::Finished;
            }

            let wait = self.schedule.time_left(Instant::now());
            let received = match (connected, wait) {
                (true, Some(wait)) => commands.recv_timeout(wait),
                (true, None) => commands
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
                (false, Some(wait)) => {
                    std::thread::sleep(wait);
                    Err(RecvTimeoutError::Timeout)
                }
                (false, None) => return RunOutcome::Disconnected,
            };

            match received {
                Ok(Command::Quit) => {
                    self.schedule.cancel();
                    tracing::debug!("Countdown stopped by user");
                    return RunOutcome::Quit;
                }
                Ok(command) => {
                    tracing::debug!(?command, "command");
                    if self.apply(command) {
                        observer(&self.engine, None);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    let transition = self.fire();
                    observer(&self.engine, transition);
                }
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!("Command channel closed");
                    connected = false;
                }
            }
        }
    }
}
