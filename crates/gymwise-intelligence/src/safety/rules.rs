// ABOUTME: Declarative safety rule base mapping medical conditions and workouts to risk data
// ABOUTME: Built-in condition/workout tables, JSON loading, and keyword-based condition detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Safety Rule Base
//!
//! The rule base is plain data: a table of medical conditions (affected areas,
//! contraindications, modifications, clearance requirement, severity) and a table
//! of workout risk profiles keyed by workout name. The assessor and the
//! personalization scorer interpret these tables; neither hard-codes a condition.
//!
//! The built-in tables are materialized once per process and shared through
//! [`SafetyRuleBase::shared`]. Deployments can replace them with
//! [`SafetyRuleBase::from_json`].

use gymwise_core::errors::{AppError, AppResult};
use gymwise_core::models::{normalize_tag, FitnessLevel, WorkoutDefinition};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use super::RiskLevel;

/// Built-in rule base, materialized on first use
static BUILTIN_RULE_BASE: LazyLock<Arc<SafetyRuleBase>> =
    LazyLock::new(|| Arc::new(SafetyRuleBase::builtin()));

/// A medical condition and its effect on training
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalCondition {
    /// Stable identifier (e.g. `back_pain`)
    pub id: String,
    /// Display name
    pub name: String,
    /// Risk level reached when a workout loads an affected area
    pub severity: RiskLevel,
    /// Muscle groups and body areas affected by the condition
    pub affected_muscle_groups: Vec<String>,
    /// Movement patterns to avoid
    pub contraindications: Vec<String>,
    /// Modifications to apply when the condition is relevant
    pub modifications: Vec<String>,
    /// Whether a medical professional must sign off first
    pub requires_clearance: bool,
    /// Words that identify the condition in free-text descriptions
    pub keywords: Vec<String>,
    /// Deduction from the personalization safety factor on overlap
    pub score_penalty: u8,
}

impl MedicalCondition {
    /// Affected areas that a workout targets
    #[must_use]
    pub fn overlapping_areas(&self, workout: &WorkoutDefinition) -> Vec<&str> {
        self.affected_muscle_groups
            .iter()
            .filter(|area| workout.targets(area))
            .map(String::as_str)
            .collect()
    }

    /// Whether the free-text description mentions this condition
    #[must_use]
    pub fn is_mentioned_in(&self, text: &str) -> bool {
        let text = normalize_tag(text);
        self.keywords
            .iter()
            .any(|keyword| text.contains(&normalize_tag(keyword)))
    }
}

/// Impact level of a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    /// Joints stay loaded without jumping or running
    Low,
    /// Controlled loading with some eccentric stress
    Moderate,
    /// Jumping, running, or explosive ground contact
    High,
}

/// Modification text for one fitness level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelModification {
    /// Fitness level the text applies to
    pub level: FitnessLevel,
    /// Modification text
    pub text: String,
}

/// Modification text for one medical condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionModification {
    /// Condition id the text applies to
    pub condition: String,
    /// Modification text
    pub text: String,
}

/// Risk metadata of a named workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutRiskProfile {
    /// Workout name (matched case-insensitively)
    pub workout_name: String,
    /// Impact level
    pub impact: ImpactLevel,
    /// Muscle groups loaded by the movement
    pub muscle_groups: Vec<String>,
    /// Modifications keyed by the member's fitness level
    pub level_modifications: Vec<LevelModification>,
    /// Modifications keyed by active condition
    pub condition_modifications: Vec<ConditionModification>,
}

impl WorkoutRiskProfile {
    /// Modification for a fitness level, if one is defined
    #[must_use]
    pub fn modification_for_level(&self, level: FitnessLevel) -> Option<&str> {
        self.level_modifications
            .iter()
            .find(|m| m.level == level)
            .map(|m| m.text.as_str())
    }

    /// Modification for a condition id, if one is defined
    #[must_use]
    pub fn modification_for_condition(&self, condition_id: &str) -> Option<&str> {
        self.condition_modifications
            .iter()
            .find(|m| m.condition == condition_id)
            .map(|m| m.text.as_str())
    }
}

/// Alternative workouts suggested by the assessor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeCatalog {
    /// Safe options for beginners
    pub beginner: Vec<String>,
    /// Low-load cross-training options for members with affected areas
    pub cross_training: Vec<String>,
    /// Options appropriate for seniors
    pub senior: Vec<String>,
}

/// Static knowledge base of conditions and workout risk profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyRuleBase {
    /// Known medical conditions
    pub conditions: Vec<MedicalCondition>,
    /// Known workout risk profiles
    pub workouts: Vec<WorkoutRiskProfile>,
    /// Alternative workout lists
    pub alternatives: AlternativeCatalog,
}

impl SafetyRuleBase {
    /// Shared handle to the built-in rule base
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&BUILTIN_RULE_BASE)
    }

    /// Parse and validate a rule base from JSON
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed JSON and `InvalidInput`
    /// when condition ids are empty or duplicated.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let rule_base: Self = serde_json::from_str(json)?;
        rule_base.validate()?;
        Ok(rule_base)
    }

    /// Check that condition ids are present and unique
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the offending condition id.
    pub fn validate(&self) -> AppResult<()> {
        let mut seen = HashSet::new();
        for condition in &self.conditions {
            if condition.id.trim().is_empty() {
                return Err(AppError::invalid_input("Medical condition with empty id"));
            }
            if !seen.insert(condition.id.as_str()) {
                return Err(AppError::invalid_input(format!(
                    "Duplicate medical condition id: {}",
                    condition.id
                ))
                .with_resource_id(condition.id.clone()));
            }
        }
        Ok(())
    }

    /// Look up a condition by id
    #[must_use]
    pub fn condition(&self, id: &str) -> Option<&MedicalCondition> {
        self.conditions.iter().find(|c| c.id == id)
    }

    /// Look up a workout risk profile by name (case-insensitive)
    #[must_use]
    pub fn workout_risk(&self, workout_name: &str) -> Option<&WorkoutRiskProfile> {
        let wanted = normalize_tag(workout_name);
        self.workouts
            .iter()
            .find(|w| normalize_tag(&w.workout_name) == wanted)
    }

    /// Ids of every condition mentioned in a free-text description
    #[must_use]
    pub fn detect_conditions(&self, text: &str) -> Vec<String> {
        self.conditions
            .iter()
            .filter(|c| c.is_mentioned_in(text))
            .map(|c| c.id.clone())
            .collect()
    }

    /// The built-in tables
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            conditions: builtin_conditions(),
            workouts: builtin_workouts(),
            alternatives: AlternativeCatalog {
                beginner: strings(&[
                    "Wall Push-ups",
                    "Bodyweight Squats",
                    "Glute Bridges",
                    "Walking",
                ]),
                cross_training: strings(&["Swimming", "Stationary Cycling", "Yoga", "Pilates"]),
                senior: strings(&["Chair Exercises", "Water Aerobics", "Tai Chi", "Walking"]),
            },
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

struct ConditionRow {
    id: &'static str,
    name: &'static str,
    severity: RiskLevel,
    areas: &'static [&'static str],
    contraindications: &'static [&'static str],
    modifications: &'static [&'static str],
    requires_clearance: bool,
    keywords: &'static [&'static str],
    score_penalty: u8,
}

const CONDITION_TABLE: &[ConditionRow] = &[
    ConditionRow {
        id: "back_pain",
        name: "Back pain",
        severity: RiskLevel::Medium,
        areas: &["back", "lower_back", "spine", "core"],
        contraindications: &[
            "Heavy spinal loading",
            "Loaded spinal flexion",
            "Twisting under load",
        ],
        modifications: &[
            "Keep a neutral spine throughout every repetition",
            "Reduce the load and brace the core before each rep",
        ],
        requires_clearance: false,
        keywords: &["back", "spine", "disc", "sciatica"],
        score_penalty: 30,
    },
    ConditionRow {
        id: "knee_injury",
        name: "Knee injury",
        severity: RiskLevel::Medium,
        areas: &["knee", "quadriceps", "hamstrings", "legs", "lower_body", "calves"],
        contraindications: &["Deep knee flexion under load", "Jumping and hard landings"],
        modifications: &[
            "Limit knee bend to a pain-free range",
            "Replace jumps with controlled step-ups",
        ],
        requires_clearance: false,
        keywords: &["knee", "acl", "meniscus", "patell"],
        score_penalty: 25,
    },
    ConditionRow {
        id: "shoulder_injury",
        name: "Shoulder injury",
        severity: RiskLevel::Medium,
        areas: &["shoulder", "deltoid", "rotator_cuff", "chest", "upper_body"],
        contraindications: &["Pressing behind the neck", "Overhead work past pain-free range"],
        modifications: &[
            "Use a neutral grip and keep elbows below shoulder height",
            "Reduce range of motion to a pain-free arc",
        ],
        requires_clearance: false,
        keywords: &["shoulder", "rotator"],
        score_penalty: 25,
    },
    ConditionRow {
        id: "heart_condition",
        name: "Heart condition",
        severity: RiskLevel::High,
        areas: &["cardio", "full_body", "cardiovascular"],
        contraindications: &["Maximal effort intervals", "Prolonged breath holding"],
        modifications: &[
            "Keep intensity at a conversational pace",
            "Extend warm-up and cool-down to at least ten minutes",
        ],
        requires_clearance: true,
        keywords: &["heart", "cardiac", "arrhythmia", "angina"],
        score_penalty: 40,
    },
    ConditionRow {
        id: "hypertension",
        name: "High blood pressure",
        severity: RiskLevel::Medium,
        areas: &["cardio", "full_body", "cardiovascular"],
        contraindications: &["Valsalva breathing under heavy load", "Sustained isometric holds"],
        modifications: &[
            "Breathe out on exertion and never hold your breath",
            "Favor moderate loads with higher repetitions",
        ],
        requires_clearance: true,
        keywords: &["hypertension", "blood_pressure"],
        score_penalty: 30,
    },
    ConditionRow {
        id: "diabetes",
        name: "Diabetes",
        severity: RiskLevel::Low,
        areas: &["cardio", "full_body", "cardiovascular"],
        contraindications: &["Training with unchecked blood glucose"],
        modifications: &[
            "Check blood glucose before and after training",
            "Keep fast-acting carbohydrates nearby",
        ],
        requires_clearance: false,
        keywords: &["diabet"],
        score_penalty: 25,
    },
    ConditionRow {
        id: "asthma",
        name: "Asthma",
        severity: RiskLevel::Low,
        areas: &["cardio", "full_body", "cardiovascular"],
        contraindications: &["Sudden maximal efforts in cold air"],
        modifications: &[
            "Keep your inhaler within reach",
            "Use a gradual warm-up before raising intensity",
        ],
        requires_clearance: false,
        keywords: &["asthma"],
        score_penalty: 25,
    },
    ConditionRow {
        id: "arthritis",
        name: "Arthritis",
        severity: RiskLevel::Low,
        areas: &["knee", "hip", "joint", "shoulder", "wrist"],
        contraindications: &["Repetitive high-impact loading"],
        modifications: &[
            "Warm joints up with gentle range-of-motion work",
            "Prefer low-impact variations",
        ],
        requires_clearance: false,
        keywords: &["arthritis"],
        score_penalty: 25,
    },
    ConditionRow {
        id: "osteoporosis",
        name: "Osteoporosis",
        severity: RiskLevel::High,
        areas: &["back", "spine", "hip", "lower_back"],
        contraindications: &["Loaded spinal flexion", "High-impact jumping", "Twisting under load"],
        modifications: &[
            "Use machines or supported positions for loading",
            "Avoid forward bending under load",
        ],
        requires_clearance: true,
        keywords: &["osteoporosis", "bone_density"],
        score_penalty: 35,
    },
];

fn builtin_conditions() -> Vec<MedicalCondition> {
    CONDITION_TABLE
        .iter()
        .map(|row| MedicalCondition {
            id: row.id.to_owned(),
            name: row.name.to_owned(),
            severity: row.severity,
            affected_muscle_groups: strings(row.areas),
            contraindications: strings(row.contraindications),
            modifications: strings(row.modifications),
            requires_clearance: row.requires_clearance,
            keywords: strings(row.keywords),
            score_penalty: row.score_penalty,
        })
        .collect()
}

struct WorkoutRow {
    name: &'static str,
    impact: ImpactLevel,
    muscle_groups: &'static [&'static str],
    levels: &'static [(FitnessLevel, &'static str)],
    conditions: &'static [(&'static str, &'static str)],
}

const WORKOUT_TABLE: &[WorkoutRow] = &[
    WorkoutRow {
        name: "Squats",
        impact: ImpactLevel::Moderate,
        muscle_groups: &["quadriceps", "glutes", "hamstrings", "lower_back"],
        levels: &[
            (FitnessLevel::Beginner, "Start with bodyweight box squats to a comfortable depth"),
            (FitnessLevel::Intermediate, "Brace before each rep and keep the bar over mid-foot"),
            (FitnessLevel::Advanced, "Use pause squats to reinforce depth control"),
        ],
        conditions: &[
            ("knee_injury", "Limit depth to parallel and keep knees tracking over toes"),
            ("back_pain", "Switch to goblet squats instead of a loaded barbell"),
        ],
    },
    WorkoutRow {
        name: "Deadlifts",
        impact: ImpactLevel::Moderate,
        muscle_groups: &["lower_back", "hamstrings", "glutes"],
        levels: &[
            (FitnessLevel::Beginner, "Learn the hip hinge with a dowel or light kettlebell first"),
            (FitnessLevel::Intermediate, "Reset your brace between every repetition"),
            (FitnessLevel::Advanced, "Program heavy pulls no more than once per week"),
        ],
        conditions: &[
            ("back_pain", "Pull from blocks or use a trap bar to shorten the range"),
            ("osteoporosis", "Replace with supported hip extensions on a machine"),
        ],
    },
    WorkoutRow {
        name: "Bench Press",
        impact: ImpactLevel::Low,
        muscle_groups: &["chest", "triceps", "shoulders"],
        levels: &[
            (FitnessLevel::Beginner, "Start with dumbbells and always use a spotter"),
            (FitnessLevel::Advanced, "Use a spotter for sets above 85% of your max"),
        ],
        conditions: &[(
            "shoulder_injury",
            "Use a neutral-grip dumbbell press with a shorter range",
        )],
    },
    WorkoutRow {
        name: "Push-ups",
        impact: ImpactLevel::Low,
        muscle_groups: &["chest", "triceps", "shoulders", "core"],
        levels: &[
            (FitnessLevel::Beginner, "Perform incline push-ups against a bench or wall"),
            (FitnessLevel::Advanced, "Add a tempo or deficit to increase difficulty"),
        ],
        conditions: &[("shoulder_injury", "Keep elbows at 45 degrees and stop short of lockout")],
    },
    WorkoutRow {
        name: "Burpees",
        impact: ImpactLevel::High,
        muscle_groups: &["full_body", "cardio"],
        levels: &[
            (FitnessLevel::Beginner, "Step back instead of jumping and skip the push-up"),
            (FitnessLevel::Intermediate, "Land softly and keep a steady rhythm"),
        ],
        conditions: &[("knee_injury", "Remove the jump and step the feet in")],
    },
    WorkoutRow {
        name: "Running",
        impact: ImpactLevel::High,
        muscle_groups: &["legs", "cardio"],
        levels: &[
            (FitnessLevel::Beginner, "Alternate one minute of jogging with two minutes of walking"),
            (FitnessLevel::Advanced, "Keep most weekly volume at an easy conversational pace"),
        ],
        conditions: &[("knee_injury", "Run on softer surfaces and shorten your stride")],
    },
    WorkoutRow {
        name: "Jumping Jacks",
        impact: ImpactLevel::High,
        muscle_groups: &["full_body", "cardio"],
        levels: &[(FitnessLevel::Beginner, "Use step jacks without leaving the floor")],
        conditions: &[],
    },
    WorkoutRow {
        name: "Plank",
        impact: ImpactLevel::Low,
        muscle_groups: &["core", "shoulders"],
        levels: &[
            (FitnessLevel::Beginner, "Hold from the knees for 15-20 seconds"),
            (FitnessLevel::Advanced, "Add shoulder taps or a weighted vest"),
        ],
        conditions: &[("back_pain", "Keep holds short and stop when the lower back sags")],
    },
    WorkoutRow {
        name: "Lunges",
        impact: ImpactLevel::Moderate,
        muscle_groups: &["quadriceps", "glutes", "hamstrings"],
        levels: &[(FitnessLevel::Beginner, "Hold a support and shorten the stride")],
        conditions: &[("knee_injury", "Use reverse lunges with a shallow range")],
    },
    WorkoutRow {
        name: "Overhead Press",
        impact: ImpactLevel::Low,
        muscle_groups: &["shoulders", "triceps"],
        levels: &[(FitnessLevel::Beginner, "Press light dumbbells while seated")],
        conditions: &[(
            "shoulder_injury",
            "Use a landmine press instead of pressing straight overhead",
        )],
    },
    WorkoutRow {
        name: "Pull-ups",
        impact: ImpactLevel::Low,
        muscle_groups: &["back", "biceps"],
        levels: &[
            (FitnessLevel::Beginner, "Use band assistance or negative-only repetitions"),
            (FitnessLevel::Advanced, "Add load with a dip belt once 12 strict reps are easy"),
        ],
        conditions: &[],
    },
    WorkoutRow {
        name: "Mountain Climbers",
        impact: ImpactLevel::High,
        muscle_groups: &["core", "shoulders", "cardio"],
        levels: &[(FitnessLevel::Beginner, "Slow the pace and step each foot in")],
        conditions: &[],
    },
];

fn builtin_workouts() -> Vec<WorkoutRiskProfile> {
    WORKOUT_TABLE
        .iter()
        .map(|row| WorkoutRiskProfile {
            workout_name: row.name.to_owned(),
            impact: row.impact,
            muscle_groups: strings(row.muscle_groups),
            level_modifications: row
                .levels
                .iter()
                .map(|(level, text)| LevelModification {
                    level: *level,
                    text: (*text).to_owned(),
                })
                .collect(),
            condition_modifications: row
                .conditions
                .iter()
                .map(|(condition, text)| ConditionModification {
                    condition: (*condition).to_owned(),
                    text: (*text).to_owned(),
                })
                .collect(),
        })
        .collect()
}
