//! Default routine and catalog file loading.
//!
//! This module provides the built-in deep-voice routine and the loader for
//! user-supplied catalogs.

use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;

/// Rest between repetitions used by the built-in routine
const DEFAULT_REST_SECONDS: u32 = 15;

/// Cached default routine - built once and reused across all operations
static DEFAULT_ROUTINE: Lazy<Routine> = Lazy::new(build_default_routine);

/// Get a reference to the cached default routine
pub fn default_routine() -> &'static Routine {
    &DEFAULT_ROUTINE
}

fn exercise(
    id: u32,
    name: &str,
    benefit: &str,
    description: &str,
    repetition_count: u32,
    repetition_duration: u32,
    break_after: u32,
) -> ExerciseSpec {
    ExerciseSpec {
        id,
        name: name.into(),
        benefit: benefit.into(),
        description: description.into(),
        total_duration: 180,
        repetition_count,
        repetition_duration,
        rest_duration: if repetition_count > 1 {
            DEFAULT_REST_SECONDS
        } else {
            0
        },
        break_after: Some(break_after),
    }
}

/// Builds the default nine-exercise routine
///
/// **Note**: prefer `default_routine()` which returns a cached reference.
pub fn build_default_routine() -> Routine {
    Routine::new(vec![
        exercise(
            1,
            "Belly Breathing with \u{201c}Ssss\u{201d} Sound",
            "Trains proper breath support, control, and calmness.",
            "Breathe in low through the nose, then release on a steady hiss.",
            5,
            36,
            15,
        ),
        exercise(
            2,
            "Jaw & Neck Relaxation",
            "Removes throat tension for a fuller, deeper voice.",
            "Let the jaw hang loose and roll the neck slowly side to side.",
            4,
            45,
            15,
        ),
        exercise(
            3,
            "Lip Trills (\"Brrr\u{2026}\")",
            "Loosens vocal cords, builds smooth pitch control.",
            "Blow through relaxed lips so they flutter, gliding the pitch.",
            6,
            30,
            15,
        ),
        exercise(
            4,
            "Humming (\"Mmm\u{2026}\")",
            "Activates chest resonance, adds richness.",
            "Hum with the lips closed and feel the buzz behind the teeth.",
            5,
            36,
            15,
        ),
        exercise(
            5,
            "Sirens (Pitch Glide)",
            "Expands range, improves vocal flexibility.",
            "Slide smoothly from your lowest note to your highest and back.",
            4,
            45,
            15,
        ),
        exercise(
            6,
            "Chest Resonance Drill",
            "Trains grounded, deep, manly tone.",
            "Speak short phrases low in the chest with a hand on the sternum.",
            5,
            36,
            15,
        ),
        exercise(
            7,
            "Yawn-Sigh (\"Haaah\")",
            "Opens the throat for a relaxed deep sound.",
            "Start a yawn, then sigh out on a descending \"haaah\".",
            4,
            45,
            15,
        ),
        exercise(
            8,
            "Low Humming",
            "Calms cords and reinforces muscle memory.",
            "Hum softly at the bottom of your comfortable range.",
            5,
            36,
            15,
        ),
        exercise(
            9,
            "Silent Stretch & Breath",
            "Relaxes body and prevents tightness.",
            "Stretch shoulders and ribs while breathing slowly in silence.",
            1,
            180,
            0,
        ),
    ])
}

impl Routine {
    /// Validate the routine for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.exercises.is_empty() {
            errors.push("Routine has no exercises".to_string());
        }

        let mut seen = HashSet::new();
        for ex in &self.exercises {
            if !seen.insert(ex.id) {
                errors.push(format!("Duplicate exercise id {}", ex.id));
            }
            if ex.name.trim().is_empty() {
                errors.push(format!("Exercise {} has empty name", ex.id));
            }
            if ex.repetition_count == 0 {
                errors.push(format!(
                    "Exercise {} ('{}'): repetition_count must be at least 1",
                    ex.id, ex.name
                ));
            }
            if ex.repetition_duration == 0 {
                errors.push(format!(
                    "Exercise {} ('{}'): repetition_duration must be positive",
                    ex.id, ex.name
                ));
            }
        }

        errors
    }

    /// Parse a routine from TOML text (`[[exercise]]` tables)
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let routine: Routine = toml::from_str(contents)?;
        routine.ensure_valid()
    }

    /// Parse a routine from JSON text (`{"exercise": [...]}`)
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let routine: Routine = serde_json::from_str(contents)?;
        routine.ensure_valid()
    }

    /// Read a routine file without validating it. `.json` files are parsed
    /// as JSON, everything else as TOML.
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(toml::from_str(&contents)?)
        }
    }

    /// Load and validate a routine file
    pub fn load_from(path: &Path) -> Result<Self> {
        let routine = Self::read_from(path)?.ensure_valid()?;
        tracing::info!(
            "Loaded routine with {} exercises from {:?}",
            routine.len(),
            path
        );
        Ok(routine)
    }

    fn ensure_valid(self) -> Result<Self> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(Error::CatalogValidation(errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routine_loads() {
        let routine = build_default_routine();
        assert_eq!(routine.len(), 9);
        assert_eq!(routine.exercises[0].repetition_duration, 36);
    }

    #[test]
    fn test_default_routine_validates() {
        let errors = default_routine().validate();
        assert!(
            errors.is_empty(),
            "Default routine has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_last_exercise_has_no_break() {
        let routine = default_routine();
        let last = routine.exercises.last().unwrap();
        assert_eq!(last.repetition_count, 1);
        assert_eq!(last.post_exercise_rest(), 0);
    }

    #[test]
    fn test_default_repetitions_fill_exercise_duration() {
        for ex in &default_routine().exercises {
            assert_eq!(
                ex.repetition_count * ex.repetition_duration,
                ex.total_duration,
                "exercise {} reps don't add up",
                ex.id
            );
        }
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let mut routine = build_default_routine();
        routine.exercises[1].id = routine.exercises[0].id;
        routine.exercises[2].repetition_count = 0;
        routine.exercises[3].repetition_duration = 0;
        routine.exercises[4].name = "  ".into();

        let errors = routine.validate();
        assert_eq!(errors.len(), 4, "{:?}", errors);
    }

    #[test]
    fn test_empty_routine_is_invalid() {
        let errors = Routine::new(vec![]).validate();
        assert_eq!(errors, vec!["Routine has no exercises".to_string()]);
    }

    #[test]
    fn test_from_toml_str() {
        let toml_str = r#"
[[exercise]]
id = 1
name = "Sirens"
benefit = "Range"
total_duration = 4
repetition_count = 2
repetition_duration = 2
rest_duration = 1
"#;
        let routine = Routine::from_toml_str(toml_str).unwrap();
        assert_eq!(routine.len(), 1);
        assert_eq!(routine.exercises[0].description, "");
        assert_eq!(routine.exercises[0].break_after, None);
        assert_eq!(routine.exercises[0].post_exercise_rest(), 1);
    }

    #[test]
    fn test_from_toml_str_rejects_invalid() {
        let toml_str = r#"
[[exercise]]
id = 1
name = "Broken"
benefit = ""
total_duration = 0
repetition_count = 0
repetition_duration = 5
"#;
        let err = Routine::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, Error::CatalogValidation(_)));
    }

    #[test]
    fn test_load_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routine.json");
        let json = serde_json::to_string(default_routine()).unwrap();
        std::fs::write(&path, json).unwrap();

        let routine = Routine::load_from(&path).unwrap();
        assert_eq!(&routine, default_routine());
    }

    #[test]
    fn test_total_seconds_of_default_routine() {
        // 9 x 180s of work, 30 rests between reps, 8 breaks between exercises
        assert_eq!(default_routine().total_seconds(), 9 * 180 + 30 * 15 + 8 * 15);
    }
}
