//! Routine progression engine.
//!
//! The engine owns the session state and decides, on every one-second tick,
//! whether to count down, roll into a rest, advance a repetition, advance an
//! exercise, or stop. It does not own a clock: the caller (see `timer`) is
//! responsible for calling `tick()` once per second while running.
//!
//! ## State Transitions
//!
//! ```text
//! Active(rep) --reps left, rest > 0--> Resting --> Active(rep + 1)
//! Active(rep) --reps left, rest = 0--> Active(rep + 1)
//! Active(last) --next exercise, break > 0--> Resting --> Active(next, rep 1)
//! Active(last) --next exercise, break = 0--> Active(next, rep 1)
//! Active(last of last exercise) --> stopped (terminal)
//! ```
//!
//! No command fails. Out-of-range navigation is ignored and reported back
//! as `false`.

use crate::{Cue, Error, ExerciseSpec, Phase, Result, Routine, SessionState, Transition};

/// Which rest the engine is currently timing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestKind {
    BetweenRepetitions,
    BeforeNextExercise,
}

impl RestKind {
    /// Short tip shown to the user during the rest
    pub fn tip(&self) -> &'static str {
        match self {
            RestKind::BetweenRepetitions => "Relax your jaw and neck muscles",
            RestKind::BeforeNextExercise => "Take deep breaths and stay hydrated",
        }
    }

    /// What comes after the rest ("rep" or "exercise")
    pub fn upcoming(&self) -> &'static str {
        match self {
            RestKind::BetweenRepetitions => "rep",
            RestKind::BeforeNextExercise => "exercise",
        }
    }
}

/// Exercise/repetition/rest state machine for one session
#[derive(Clone, Debug)]
pub struct RoutineEngine {
    routine: Routine,
    state: SessionState,
}

impl RoutineEngine {
    /// Create an engine positioned at the first repetition of the first
    /// exercise, paused.
    pub fn new(routine: Routine) -> Result<Self> {
        let state = routine
            .get(0)
            .map(|first| SessionState::at_exercise(0, first))
            .ok_or_else(|| Error::CatalogValidation("Routine has no exercises".into()))?;
        Ok(Self { routine, state })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn current_exercise(&self) -> &ExerciseSpec {
        &self.routine.exercises[self.state.exercise_index]
    }

    fn is_last_exercise(&self) -> bool {
        self.state.exercise_index + 1 >= self.routine.len()
    }

    fn has_more_repetitions(&self) -> bool {
        self.state.repetition_index < self.current_exercise().repetition_count
    }

    /// The kind of rest being timed, or `None` during a repetition
    pub fn rest_kind(&self) -> Option<RestKind> {
        match self.state.phase {
            Phase::Active => None,
            Phase::Resting if self.has_more_repetitions() => Some(RestKind::BetweenRepetitions),
            Phase::Resting => Some(RestKind::BeforeNextExercise),
        }
    }

    /// Full length of the phase currently counting down
    pub fn phase_total_seconds(&self) -> u32 {
        let exercise = self.current_exercise();
        match self.rest_kind() {
            None => exercise.repetition_duration,
            Some(RestKind::BetweenRepetitions) => exercise.rest_duration,
            Some(RestKind::BeforeNextExercise) => exercise.post_exercise_rest(),
        }
    }

    /// 0.0 ..= 100.0 progress within the current phase.
    pub fn phase_progress_percent(&self) -> f64 {
        let total = self.phase_total_seconds();
        if total == 0 {
            return 0.0;
        }
        let elapsed = f64::from(total) - f64::from(self.state.remaining_seconds);
        (elapsed / f64::from(total) * 100.0).clamp(0.0, 100.0)
    }

    /// Whole-routine completion, floored, never above 100.
    pub fn overall_completion_percent(&self) -> u32 {
        let exercises = self.routine.len() as u64;
        let reps = u64::from(self.current_exercise().repetition_count);
        let done = self.state.exercise_index as u64 * reps + u64::from(self.state.repetition_index);
        let pct = 100 * done / (reps * exercises);
        pct.min(100) as u32
    }

    /// True once the last repetition of the last exercise has run out
    pub fn is_finished(&self) -> bool {
        !self.state.running
            && self.is_last_exercise()
            && !self.has_more_repetitions()
            && self.state.phase == Phase::Active
            && self.state.remaining_seconds == 0
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start counting down. Returns the start cue, or `None` if already running.
    pub fn start(&mut self) -> Option<Cue> {
        if self.state.running {
            return None;
        }
        self.state.running = true;
        tracing::debug!(
            "Started at exercise {} rep {} ({}s left)",
            self.state.exercise_index,
            self.state.repetition_index,
            self.state.remaining_seconds
        );
        Some(Cue::Start)
    }

    /// Freeze the countdown. Returns whether the engine was running.
    pub fn pause(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        self.state.running = false;
        tracing::debug!("Paused with {}s left", self.state.remaining_seconds);
        true
    }

    pub fn toggle(&mut self) -> Option<Cue> {
        if self.state.running {
            self.pause();
            None
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) {
        self.state = SessionState::at_exercise(0, &self.routine.exercises[0]);
        tracing::debug!("Reset to first exercise");
    }

    /// Move to the first repetition of exercise `index`, paused.
    ///
    /// Ignored while running or when `index` is out of range.
    pub fn jump_to_exercise(&mut self, index: i64) -> bool {
        if self.state.running {
            tracing::debug!("Ignoring jump to exercise {} while running", index);
            return false;
        }
        let Some(target) = usize::try_from(index).ok().filter(|i| *i < self.routine.len()) else {
            tracing::debug!("Ignoring out-of-range jump to exercise {}", index);
            return false;
        };
        self.state = SessionState::at_exercise(target, &self.routine.exercises[target]);
        tracing::debug!("Jumped to exercise {}", target);
        true
    }

    /// Move the repetition by `delta` within the current exercise, restarting
    /// its full duration.
    ///
    /// Ignored while running or when the target falls outside
    /// `1..=repetition_count`.
    pub fn jump_to_repetition(&mut self, delta: i64) -> bool {
        if self.state.running {
            tracing::debug!("Ignoring repetition jump while running");
            return false;
        }
        let exercise = self.current_exercise();
        let Some(target) = i64::from(self.state.repetition_index).checked_add(delta) else {
            return false;
        };
        if target < 1 || target > i64::from(exercise.repetition_count) {
            tracing::debug!("Ignoring out-of-range repetition {}", target);
            return false;
        }
        let duration = exercise.repetition_duration;
        self.state.repetition_index = target as u32;
        self.state.phase = Phase::Active;
        self.state.remaining_seconds = duration;
        tracing::debug!("Jumped to repetition {}", target);
        true
    }

    /// Advance time by one second.
    ///
    /// Returns the boundary crossed, if the countdown reached zero on this
    /// tick. Does nothing while paused.
    pub fn tick(&mut self) -> Option<Transition> {
        if !self.state.running {
            return None;
        }
        if self.state.remaining_seconds > 0 {
            self.state.remaining_seconds -= 1;
            if self.state.remaining_seconds > 0 {
                return None;
            }
        }
        let transition = self.cross_boundary();
        tracing::debug!("Transition: {:?}", transition);
        Some(transition)
    }

    fn cross_boundary(&mut self) -> Transition {
        let exercise = self.current_exercise();
        let rest = exercise.rest_duration;
        let post_rest = exercise.post_exercise_rest();
        let more_reps = self.has_more_repetitions();
        let last_exercise = self.is_last_exercise();

        match self.state.phase {
            Phase::Active if more_reps && rest > 0 => self.begin_rest(rest),
            Phase::Active if more_reps => self.next_repetition(),
            Phase::Active if !last_exercise && post_rest > 0 => self.begin_rest(post_rest),
            Phase::Resting if more_reps => self.next_repetition(),
            _ if !last_exercise => self.next_exercise(),
            _ => self.finish(),
        }
    }

    fn begin_rest(&mut self, seconds: u32) -> Transition {
        self.state.phase = Phase::Resting;
        self.state.remaining_seconds = seconds;
        Transition::RestStarted { seconds }
    }

    fn next_repetition(&mut self) -> Transition {
        self.state.phase = Phase::Active;
        self.state.repetition_index += 1;
        self.state.remaining_seconds = self.current_exercise().repetition_duration;
        Transition::RepetitionStarted {
            repetition: self.state.repetition_index,
        }
    }

    fn next_exercise(&mut self) -> Transition {
        let next = self.state.exercise_index + 1;
        self.state = SessionState {
            running: self.state.running,
            ..SessionState::at_exercise(next, &self.routine.exercises[next])
        };
        Transition::ExerciseStarted {
            exercise_index: next,
        }
    }

    fn finish(&mut self) -> Transition {
        self.state.running = false;
        self.state.phase = Phase::Active;
        self.state.remaining_seconds = 0;
        Transition::RoutineFinished
    }
}
