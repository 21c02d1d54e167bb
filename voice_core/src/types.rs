//! Core domain types for the vocal routine timer.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise definitions and the routine they form
//! - Session state driven by the progression engine
//! - Cues and transitions emitted at phase boundaries

use serde::{Deserialize, Serialize};

// ============================================================================
// Exercise Types
// ============================================================================

/// A single exercise in the routine (e.g., "Lip Trills")
///
/// Exercises are immutable once a routine has been built. Durations are in
/// whole seconds because the countdown only ever advances in one-second ticks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseSpec {
    pub id: u32,
    pub name: String,
    pub benefit: String,
    #[serde(default)]
    pub description: String,
    /// Informational length of the whole exercise
    pub total_duration: u32,
    pub repetition_count: u32,
    pub repetition_duration: u32,
    /// Rest after each repetition that is followed by another repetition
    #[serde(default)]
    pub rest_duration: u32,
    /// Rest after the final repetition, before the next exercise.
    /// Falls back to `rest_duration` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_after: Option<u32>,
}

impl ExerciseSpec {
    /// Length of the rest that follows the last repetition
    pub fn post_exercise_rest(&self) -> u32 {
        self.break_after.unwrap_or(self.rest_duration)
    }

    /// Seconds a full pass over this exercise takes, rests included.
    ///
    /// `followed_by_exercise` controls whether the post-exercise break counts;
    /// the final exercise of a routine never rests afterwards.
    pub fn run_seconds(&self, followed_by_exercise: bool) -> u64 {
        let reps = u64::from(self.repetition_count);
        let work = reps * u64::from(self.repetition_duration);
        let rests = reps.saturating_sub(1) * u64::from(self.rest_duration);
        let tail = if followed_by_exercise {
            u64::from(self.post_exercise_rest())
        } else {
            0
        };
        work + rests + tail
    }
}

/// The ordered, immutable list of exercises a session steps through
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Routine {
    #[serde(rename = "exercise")]
    pub exercises: Vec<ExerciseSpec>,
}

impl Routine {
    pub fn new(exercises: Vec<ExerciseSpec>) -> Self {
        Self { exercises }
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ExerciseSpec> {
        self.exercises.get(index)
    }

    /// Seconds an uninterrupted run from the first exercise takes
    pub fn total_seconds(&self) -> u64 {
        let last = self.exercises.len().saturating_sub(1);
        self.exercises
            .iter()
            .enumerate()
            .map(|(i, ex)| ex.run_seconds(i < last))
            .sum()
    }
}

// ============================================================================
// Session Types
// ============================================================================

/// Whether the countdown is timing a repetition or a rest
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Active,
    Resting,
}

/// Mutable state of one session, owned by the engine
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    pub exercise_index: usize,
    /// 1-based
    pub repetition_index: u32,
    pub remaining_seconds: u32,
    pub phase: Phase,
    pub running: bool,
}

impl SessionState {
    /// Fresh state positioned at the first repetition of `exercise_index`
    pub fn at_exercise(exercise_index: usize, exercise: &ExerciseSpec) -> Self {
        Self {
            exercise_index,
            repetition_index: 1,
            remaining_seconds: exercise.repetition_duration,
            phase: Phase::Active,
            running: false,
        }
    }
}

// ============================================================================
// Cues and Transitions
// ============================================================================

/// Fire-and-forget audio signal sent to the cue collaborator
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Start,
    Completion,
}

/// Boundary crossed by a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// A rest began after a repetition or after the last repetition
    RestStarted { seconds: u32 },
    /// The next repetition of the same exercise began
    RepetitionStarted { repetition: u32 },
    /// The first repetition of the next exercise began
    ExerciseStarted { exercise_index: usize },
    /// The final repetition of the final exercise ended
    RoutineFinished,
}

impl Transition {
    /// The cue that accompanies this transition
    pub fn cue(&self) -> Cue {
        match self {
            Transition::RestStarted { .. } | Transition::RoutineFinished => Cue::Completion,
            Transition::RepetitionStarted { .. } | Transition::ExerciseStarted { .. } => {
                Cue::Start
            }
        }
    }
}
