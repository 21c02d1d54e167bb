//! Terminal rendering of session state.

use voice_core::{ExerciseSpec, Phase, RoutineEngine, Routine, Transition};

const BAR_WIDTH: usize = 20;

/// `m:ss`
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// One-line status shown while the countdown runs
pub fn status_line(engine: &RoutineEngine) -> String {
    let state = engine.state();
    let exercise = engine.current_exercise();
    let position = format!("[{}/{}]", state.exercise_index + 1, engine.routine().len());

    let heading = match (state.phase, engine.rest_kind()) {
        (Phase::Resting, Some(kind)) => format!("Break Time, next {}", kind.upcoming()),
        _ if exercise.repetition_count > 1 => format!(
            "{}  Rep {}/{}",
            exercise.name, state.repetition_index, exercise.repetition_count
        ),
        _ => exercise.name.clone(),
    };

    let marker = if state.running { "▶" } else { "⏸" };
    format!(
        "{} {} {}  {}  {} {:>3.0}%  routine {}%",
        marker,
        position,
        heading,
        format_clock(u64::from(state.remaining_seconds)),
        progress_bar(engine.phase_progress_percent(), BAR_WIDTH),
        engine.phase_progress_percent(),
        engine.overall_completion_percent()
    )
}

/// Message printed when a tick crosses a boundary
pub fn describe_transition(engine: &RoutineEngine, transition: Transition) -> String {
    match transition {
        Transition::RestStarted { seconds } => {
            let tip = engine.rest_kind().map(|k| k.tip()).unwrap_or_default();
            format!("Rest {}s. Tip: {}", seconds, tip)
        }
        Transition::RepetitionStarted { repetition } => format!(
            "Rep {}/{} of {}",
            repetition,
            engine.current_exercise().repetition_count,
            engine.current_exercise().name
        ),
        Transition::ExerciseStarted { exercise_index } => format!(
            "Exercise {}/{}: {}",
            exercise_index + 1,
            engine.routine().len(),
            engine.current_exercise().name
        ),
        Transition::RoutineFinished => "Routine complete! Great work.".to_string(),
    }
}

fn plan(exercise: &ExerciseSpec) -> String {
    let mut plan = format!(
        "{} x {}",
        exercise.repetition_count,
        format_clock(u64::from(exercise.repetition_duration))
    );
    if exercise.repetition_count > 1 && exercise.rest_duration > 0 {
        plan.push_str(&format!(", {}s rest", exercise.rest_duration));
    }
    plan
}

/// Catalog listing for `vox list`
pub fn routine_table(routine: &Routine) -> String {
    let mut out = String::new();
    for (i, exercise) in routine.exercises.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {:<40} {}\n",
            i + 1,
            exercise.name,
            plan(exercise)
        ));
    }
    out.push_str(&format!(
        "\n{} exercises, {} total\n",
        routine.len(),
        format_clock(routine.total_seconds())
    ));
    out
}

/// Detailed view for `vox show`
pub fn exercise_details(position: usize, exercise: &ExerciseSpec, is_last: bool) -> String {
    let mut out = format!("{}. {}\n", position, exercise.name);
    out.push_str(&format!("  Benefit:     {}\n", exercise.benefit));
    if !exercise.description.is_empty() {
        out.push_str(&format!("  How:         {}\n", exercise.description));
    }
    out.push_str(&format!("  Plan:        {}\n", plan(exercise)));
    let tail = if is_last {
        0
    } else {
        exercise.post_exercise_rest()
    };
    if tail > 0 {
        out.push_str(&format!("  Break after: {}s\n", tail));
    }
    out.push_str(&format!(
        "  Time:        {}\n",
        format_clock(exercise.run_seconds(!is_last))
    ));
    out
}
