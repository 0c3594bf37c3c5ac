// ABOUTME: Personalization scorer blending seven factor scores into one recommendation
// ABOUTME: Fitness, goal, safety, age, equipment, time, and progression factors with explanations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Personalization scoring for catalog workouts
#![allow(clippy::cast_possible_truncation)] // Safe: score clamped to 0-100 before narrowing
#![allow(clippy::cast_sign_loss)] // Safe: score clamped to 0-100 before narrowing

use chrono::{NaiveDate, Utc};
use gymwise_core::constants::age_brackets::{
    ADULT_MAX_AGE, ADULT_MIN_AGE, MIDDLE_AGED_MAX_AGE, YOUNG_ADULT_MAX_AGE,
};
use gymwise_core::constants::bmi::{OBESE, SEVERELY_OBESE, SEVERELY_UNDERWEIGHT, UNDERWEIGHT};
use gymwise_core::constants::keywords::{BUSY_SCHEDULE, GYM_ACCESS};
use gymwise_core::constants::scores::{MAX_SCORE, MIN_SCORE};
use gymwise_core::errors::AppResult;
use gymwise_core::models::{
    mentions_any, tags_overlap, ActivityLevel, FitnessLevel, UserProfile, WorkoutDefinition,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::intelligence::{
    FactorWeights, IntelligenceConfig, PersonalizationConfig, PersonalizationThresholds,
};
use crate::safety::{push_unique, SafetyAssessor, UserHealthProfile};

/// Neutral starting point of the fitness level and goal alignment factors
const NEUTRAL_BASE: f64 = 50.0;
/// Starting point of every other factor
const FULL_BASE: f64 = 100.0;

/// Bonus when the member's goal and the workout's goal contain one another
const GOAL_CONTAINMENT_BONUS: f64 = 30.0;

const TEEN_FITNESS_DELTA: f64 = -10.0;
const MIDDLE_AGED_FITNESS_DELTA: f64 = -5.0;
const SENIOR_FITNESS_DELTA: f64 = -15.0;
const UNDERWEIGHT_FITNESS_DELTA: f64 = -5.0;
const OBESE_FITNESS_DELTA: f64 = -10.0;

const SENIOR_ADVANCED_SAFETY_DELTA: f64 = -20.0;
const SEVERELY_OBESE_ADVANCED_SAFETY_DELTA: f64 = -20.0;
const SEVERELY_UNDERWEIGHT_ADVANCED_SAFETY_DELTA: f64 = -15.0;
const TEEN_ADVANCED_SAFETY_DELTA: f64 = -20.0;
const BEGINNER_ADVANCED_SAFETY_DELTA: f64 = -30.0;
const SEDENTARY_ADVANCED_SAFETY_DELTA: f64 = -15.0;

const HEAVY_EQUIPMENT_DELTA: f64 = -10.0;
const BODYWEIGHT_DELTA: f64 = 10.0;
const INACCESSIBLE_EQUIPMENT_DELTA: f64 = -30.0;

/// Sets above this count are too long for a busy schedule
const BUSY_MAX_SETS: u32 = 4;
/// Reps above this count are too long for a busy schedule
const BUSY_MAX_REPS: u32 = 15;
const BUSY_SCHEDULE_DELTA: f64 = -15.0;
const COMPOUND_MOVEMENT_DELTA: f64 = 10.0;

const TOO_EASY_DELTA: f64 = -20.0;
const TOO_HARD_DELTA: f64 = -30.0;
const PROGRESSIVE_EQUIPMENT_DELTA: f64 = 15.0;

/// Domain pairing between a member goal and workout goal tags
struct GoalAffinity {
    member_goal: &'static str,
    workout_goals: &'static [&'static str],
    bonus: f64,
}

/// Pairings are symmetric; bonuses of every matching row add up
const GOAL_AFFINITIES: &[GoalAffinity] = &[
    GoalAffinity {
        member_goal: "weight_loss",
        workout_goals: &["cardio"],
        bonus: 25.0,
    },
    GoalAffinity {
        member_goal: "muscle_gain",
        workout_goals: &["strength"],
        bonus: 25.0,
    },
    GoalAffinity {
        member_goal: "endurance",
        workout_goals: &["cardio"],
        bonus: 20.0,
    },
    GoalAffinity {
        member_goal: "flexibility",
        workout_goals: &["stretching"],
        bonus: 20.0,
    },
    GoalAffinity {
        member_goal: "tone",
        workout_goals: &["strength", "cardio"],
        bonus: 15.0,
    },
];

impl GoalAffinity {
    fn matches(&self, member_goal: &str, workout_goal: &str) -> bool {
        let forward = mentions_any(member_goal, &[self.member_goal])
            && mentions_any(workout_goal, self.workout_goals);
        let backward = mentions_any(workout_goal, &[self.member_goal])
            && mentions_any(member_goal, self.workout_goals);
        forward || backward
    }
}

/// Age brackets with their age-appropriateness deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AgeBracket {
    Teen,
    YoungAdult,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeBracket {
    const fn from_age(age: u32) -> Self {
        if age < ADULT_MIN_AGE {
            Self::Teen
        } else if age <= YOUNG_ADULT_MAX_AGE {
            Self::YoungAdult
        } else if age <= ADULT_MAX_AGE {
            Self::Adult
        } else if age <= MIDDLE_AGED_MAX_AGE {
            Self::MiddleAged
        } else {
            Self::Senior
        }
    }

    /// (base, advanced difficulty, heavy equipment) deltas
    const fn deltas(self) -> (f64, f64, f64) {
        match self {
            Self::Teen => (-10.0, -20.0, -10.0),
            Self::YoungAdult | Self::Adult => (0.0, 0.0, 0.0),
            Self::MiddleAged => (-5.0, -10.0, -5.0),
            Self::Senior => (-15.0, -25.0, -10.0),
        }
    }
}

/// The seven independent sub-scores of a recommendation, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    /// How well the workout matches the member's conditioning
    pub fitness_level: f64,
    /// How well the workout serves the member's goal
    pub goal_alignment: f64,
    /// How safe the workout is for the member's health profile
    pub safety: f64,
    /// How appropriate the workout is for the member's age
    pub age_appropriateness: f64,
    /// How likely the member can access the required equipment
    pub equipment_availability: f64,
    /// How well the workout fits the member's schedule
    pub time_efficiency: f64,
    /// How much room the workout leaves to progress
    pub progression_potential: f64,
}

impl FactorScores {
    /// All factors in declaration order, aligned with [`FactorWeights::as_array`]
    #[must_use]
    pub const fn as_array(&self) -> [f64; 7] {
        [
            self.fitness_level,
            self.goal_alignment,
            self.safety,
            self.age_appropriateness,
            self.equipment_availability,
            self.time_efficiency,
            self.progression_potential,
        ]
    }

    /// Weighted sum of the factors (not rounded)
    #[must_use]
    pub fn blend(&self, weights: &FactorWeights) -> f64 {
        self.as_array()
            .iter()
            .zip(weights.as_array())
            .map(|(factor, weight)| factor * weight)
            .sum()
    }
}

/// Priority tier of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Strong match
    High,
    /// Reasonable match
    Medium,
    /// Weak or risky match
    Low,
}

impl Priority {
    /// Tier for a final score
    #[must_use]
    pub const fn from_score(score: u8, thresholds: &PersonalizationThresholds) -> Self {
        if score >= thresholds.high_priority {
            Self::High
        } else if score < thresholds.low_priority {
            Self::Low
        } else {
            Self::Medium
        }
    }
}

/// A scored and explained workout for one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The catalog workout
    pub workout: WorkoutDefinition,
    /// Final blended score, 0-100
    pub score: u8,
    /// Factor breakdown behind the score
    pub factors: FactorScores,
    /// Why the workout suits the member
    pub reasons: Vec<String>,
    /// Cautions the member should read first
    pub warnings: Vec<String>,
    /// Suggested changes to the prescription
    pub modifications: Vec<String>,
    /// Priority tier
    pub priority: Priority,
}

/// Round half away from zero and clamp to the score scale
pub(crate) fn to_score(value: f64) -> u8 {
    value.round().clamp(MIN_SCORE, MAX_SCORE) as u8
}

fn clamp_factor(value: f64) -> f64 {
    value.clamp(MIN_SCORE, MAX_SCORE)
}

/// Scores catalog workouts against a member profile
#[derive(Debug, Clone)]
pub struct PersonalizationScorer {
    config: PersonalizationConfig,
    assessor: SafetyAssessor,
    reference_date: Option<NaiveDate>,
}

impl Default for PersonalizationScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonalizationScorer {
    /// Scorer using the global configuration and the built-in rule base
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(IntelligenceConfig::global().personalization.clone())
    }

    /// Scorer with explicit configuration
    #[must_use]
    pub fn with_config(config: PersonalizationConfig) -> Self {
        Self {
            config,
            assessor: SafetyAssessor::new(),
            reference_date: None,
        }
    }

    /// Replace the safety assessor (e.g. one over a custom rule base)
    #[must_use]
    pub fn with_assessor(mut self, assessor: SafetyAssessor) -> Self {
        self.assessor = assessor;
        self
    }

    /// Pin "today" for age calculations instead of the system clock
    #[must_use]
    pub const fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &PersonalizationConfig {
        &self.config
    }

    /// The safety assessor consulted for every score
    #[must_use]
    pub const fn assessor(&self) -> &SafetyAssessor {
        &self.assessor
    }

    fn today(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Score one workout for one member
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange`/`InvalidInput` when the profile carries
    /// invalid numerics or a future date of birth.
    pub fn score(
        &self,
        workout: &WorkoutDefinition,
        profile: &UserProfile,
    ) -> AppResult<Recommendation> {
        let today = self.today();
        profile.validate_on(today)?;
        Ok(self.score_validated(workout, profile, today))
    }

    /// Score a whole catalog, best first
    ///
    /// The profile is validated once. Catalogs at or above the configured
    /// parallel threshold are scored across the rayon pool. Ties keep catalog order.
    ///
    /// # Errors
    ///
    /// Returns the profile validation error, if any.
    pub fn score_all(
        &self,
        workouts: &[WorkoutDefinition],
        profile: &UserProfile,
    ) -> AppResult<Vec<Recommendation>> {
        let today = self.today();
        profile.validate_on(today)?;

        let mut recommendations: Vec<Recommendation> =
            if workouts.len() >= self.config.parallel_threshold {
                workouts
                    .par_iter()
                    .map(|workout| self.score_validated(workout, profile, today))
                    .collect()
            } else {
                workouts
                    .iter()
                    .map(|workout| self.score_validated(workout, profile, today))
                    .collect()
            };

        recommendations.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(recommendations)
    }

    /// Factor breakdown without explanations
    #[must_use]
    pub fn factor_scores(
        &self,
        workout: &WorkoutDefinition,
        profile: &UserProfile,
    ) -> FactorScores {
        self.compute_factors(workout, profile, profile.age_on(self.today()))
    }

    fn score_validated(
        &self,
        workout: &WorkoutDefinition,
        profile: &UserProfile,
        today: NaiveDate,
    ) -> Recommendation {
        let age = profile.age_on(today);
        let factors = self.compute_factors(workout, profile, age);
        let score = to_score(factors.blend(&self.config.weights));
        let thresholds = &self.config.thresholds;

        let (reasons, mut warnings, mut modifications) =
            explain(&factors, profile, age, thresholds);

        let health = UserHealthProfile::from_profile(profile, self.assessor.rule_base(), today);
        let assessment = self.assessor.assess(workout, &health);
        for warning in assessment.warnings {
            push_unique(&mut warnings, warning);
        }
        for modification in assessment.modifications {
            push_unique(&mut modifications, modification);
        }

        let priority = Priority::from_score(score, thresholds);
        debug!(
            user_id = %profile.user_id,
            workout = %workout.name,
            score,
            ?priority,
            "Scored workout"
        );

        Recommendation {
            workout: workout.clone(),
            score,
            factors,
            reasons,
            warnings,
            modifications,
            priority,
        }
    }

    fn compute_factors(
        &self,
        workout: &WorkoutDefinition,
        profile: &UserProfile,
        age: Option<u32>,
    ) -> FactorScores {
        let bmi = profile.bmi();
        let fitness_level = fitness_level_factor(profile, age, bmi);
        FactorScores {
            fitness_level,
            goal_alignment: goal_alignment_factor(profile.fitness_goal.as_deref(), workout),
            safety: self.safety_factor(workout, profile, age, bmi),
            age_appropriateness: age_appropriateness_factor(age, workout),
            equipment_availability: equipment_factor(profile.equipment_access.as_deref(), workout),
            time_efficiency: time_efficiency_factor(profile.availability.as_deref(), workout),
            progression_potential: self.progression_factor(fitness_level, workout),
        }
    }

    /// Reads medical text, age, BMI, activity and experience
    fn safety_factor(
        &self,
        workout: &WorkoutDefinition,
        profile: &UserProfile,
        age: Option<u32>,
        bmi: Option<f64>,
    ) -> f64 {
        let mut score = FULL_BASE;
        let rule_base = self.assessor.rule_base();

        if let Some(text) = profile.medical_conditions.as_deref() {
            for condition_id in rule_base.detect_conditions(text) {
                if let Some(condition) = rule_base.condition(&condition_id) {
                    if !condition.overlapping_areas(workout).is_empty() {
                        score -= f64::from(condition.score_penalty);
                    }
                }
            }
        }

        if workout.difficulty == FitnessLevel::Advanced {
            if age.is_some_and(|a| a > MIDDLE_AGED_MAX_AGE) {
                score += SENIOR_ADVANCED_SAFETY_DELTA;
            }
            if age.is_some_and(|a| a < ADULT_MIN_AGE) {
                score += TEEN_ADVANCED_SAFETY_DELTA;
            }
            if bmi.is_some_and(|b| b > SEVERELY_OBESE) {
                score += SEVERELY_OBESE_ADVANCED_SAFETY_DELTA;
            }
            if bmi.is_some_and(|b| b < SEVERELY_UNDERWEIGHT) {
                score += SEVERELY_UNDERWEIGHT_ADVANCED_SAFETY_DELTA;
            }
            if profile.experience_level == Some(FitnessLevel::Beginner) {
                score += BEGINNER_ADVANCED_SAFETY_DELTA;
            }
            if profile.activity_level == Some(ActivityLevel::Sedentary) {
                score += SEDENTARY_ADVANCED_SAFETY_DELTA;
            }
        }

        clamp_factor(score)
    }

    fn progression_factor(&self, fitness_level: f64, workout: &WorkoutDefinition) -> f64 {
        let thresholds = &self.config.thresholds;
        let mut score = FULL_BASE;
        if fitness_level > thresholds.high_fitness && workout.difficulty == FitnessLevel::Beginner
        {
            score += TOO_EASY_DELTA;
        }
        if fitness_level < thresholds.low_fitness && workout.difficulty == FitnessLevel::Advanced {
            score += TOO_HARD_DELTA;
        }
        if workout.has_progressive_equipment() {
            score += PROGRESSIVE_EQUIPMENT_DELTA;
        }
        clamp_factor(score)
    }
}

/// Reads activity level, experience, age and BMI
fn fitness_level_factor(profile: &UserProfile, age: Option<u32>, bmi: Option<f64>) -> f64 {
    let mut score = NEUTRAL_BASE;

    score += match profile.activity_level {
        Some(ActivityLevel::Sedentary) => -20.0,
        Some(ActivityLevel::Light) => -10.0,
        Some(ActivityLevel::Moderate) | None => 0.0,
        Some(ActivityLevel::Active) => 15.0,
        Some(ActivityLevel::VeryActive) => 25.0,
    };

    score += match profile.experience_level {
        Some(FitnessLevel::Beginner) => -15.0,
        Some(FitnessLevel::Advanced) => 20.0,
        Some(FitnessLevel::Intermediate) | None => 0.0,
    };

    score += match age.map(AgeBracket::from_age) {
        Some(AgeBracket::Teen) => TEEN_FITNESS_DELTA,
        Some(AgeBracket::MiddleAged) => MIDDLE_AGED_FITNESS_DELTA,
        Some(AgeBracket::Senior) => SENIOR_FITNESS_DELTA,
        _ => 0.0,
    };

    if let Some(bmi) = bmi {
        if bmi < UNDERWEIGHT {
            score += UNDERWEIGHT_FITNESS_DELTA;
        } else if bmi > OBESE {
            score += OBESE_FITNESS_DELTA;
        }
    }

    clamp_factor(score)
}

/// Reads the member goal and the workout goal
fn goal_alignment_factor(member_goal: Option<&str>, workout: &WorkoutDefinition) -> f64 {
    let (Some(member_goal), Some(workout_goal)) = (member_goal, workout.goal.as_deref()) else {
        return NEUTRAL_BASE;
    };

    let mut score = NEUTRAL_BASE;
    if tags_overlap(member_goal, workout_goal) {
        score += GOAL_CONTAINMENT_BONUS;
    }
    score += GOAL_AFFINITIES
        .iter()
        .filter(|affinity| affinity.matches(member_goal, workout_goal))
        .map(|affinity| affinity.bonus)
        .sum::<f64>();

    clamp_factor(score)
}

/// Reads age, workout difficulty and equipment
fn age_appropriateness_factor(age: Option<u32>, workout: &WorkoutDefinition) -> f64 {
    let Some(age) = age else {
        return FULL_BASE;
    };
    let (base, advanced, heavy) = AgeBracket::from_age(age).deltas();

    let mut score = FULL_BASE + base;
    if workout.difficulty == FitnessLevel::Advanced {
        score += advanced;
    }
    if workout.requires_heavy_equipment() {
        score += heavy;
    }
    clamp_factor(score)
}

/// Reads the member's equipment access and the workout equipment
fn equipment_factor(equipment_access: Option<&str>, workout: &WorkoutDefinition) -> f64 {
    let mut score = FULL_BASE;
    if workout.requires_heavy_equipment() {
        score += HEAVY_EQUIPMENT_DELTA;
    }
    if workout.is_bodyweight() {
        score += BODYWEIGHT_DELTA;
    } else if let (Some(access), Some(equipment)) =
        (equipment_access, workout.equipment.as_deref())
    {
        let reachable = mentions_any(access, GYM_ACCESS) || tags_overlap(access, equipment);
        if !access.trim().is_empty() && !reachable {
            score += INACCESSIBLE_EQUIPMENT_DELTA;
        }
    }
    clamp_factor(score)
}

/// Reads availability and the workout's volume and muscle groups
fn time_efficiency_factor(availability: Option<&str>, workout: &WorkoutDefinition) -> f64 {
    let mut score = FULL_BASE;
    let busy = availability.is_some_and(|text| mentions_any(text, BUSY_SCHEDULE));
    if busy && (workout.sets > BUSY_MAX_SETS || workout.reps > BUSY_MAX_REPS) {
        score += BUSY_SCHEDULE_DELTA;
    }
    if workout.targets_multiple() {
        score += COMPOUND_MOVEMENT_DELTA;
    }
    clamp_factor(score)
}

fn explain(
    factors: &FactorScores,
    profile: &UserProfile,
    age: Option<u32>,
    thresholds: &PersonalizationThresholds,
) -> (Vec<String>, Vec<String>, Vec<String>) {
    let strong = thresholds.strong_factor;
    let reasons: Vec<String> = [
        (factors.fitness_level, "Matches your current fitness level"),
        (factors.goal_alignment, "Aligned with your fitness goal"),
        (factors.safety, "Safe for your health profile"),
        (factors.age_appropriateness, "Appropriate for your age group"),
        (factors.equipment_availability, "Uses equipment you can access"),
        (factors.time_efficiency, "Fits your schedule efficiently"),
        (factors.progression_potential, "Leaves room to progress"),
    ]
    .into_iter()
    .filter(|(value, _)| *value > strong)
    .map(|(_, reason)| reason.to_owned())
    .collect();

    let mut warnings = Vec::new();
    if factors.safety < thresholds.safety_warning {
        warnings.push("Consult a healthcare provider before starting this workout".to_owned());
    }
    if factors.age_appropriateness < thresholds.age_warning {
        warnings.push("This workout may need modification for your age group".to_owned());
    }

    let mut modifications = Vec::new();
    if age.is_some_and(|a| a > thresholds.intensity_reduction_age) {
        modifications.push("Reduce intensity and extend your warm-up".to_owned());
    }
    if profile
        .medical_conditions
        .as_deref()
        .is_some_and(|text| mentions_any(text, &["back"]))
    {
        modifications.push("Maintain a neutral spine and prioritize form over load".to_owned());
    }
    if factors.fitness_level < thresholds.low_fitness {
        modifications.push("Start with lighter weights or fewer repetitions".to_owned());
    }

    (reasons, warnings, modifications)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn scorer() -> PersonalizationScorer {
        PersonalizationScorer::with_config(IntelligenceConfig::default().personalization)
            .with_reference_date(today())
    }

    fn born_years_ago(years: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025 - years, 1, 15)
    }

    #[test]
    fn test_age_brackets() {
        assert_eq!(AgeBracket::from_age(17), AgeBracket::Teen);
        assert_eq!(AgeBracket::from_age(18), AgeBracket::YoungAdult);
        assert_eq!(AgeBracket::from_age(30), AgeBracket::Adult);
        assert_eq!(AgeBracket::from_age(51), AgeBracket::MiddleAged);
        assert_eq!(AgeBracket::from_age(65), AgeBracket::MiddleAged);
        assert_eq!(AgeBracket::from_age(66), AgeBracket::Senior);
    }

    #[test]
    fn test_empty_profile_is_neutral() {
        let workout = WorkoutDefinition::new("Plank", FitnessLevel::Intermediate, 3, 1);
        let factors = scorer().factor_scores(&workout, &UserProfile::new("u1"));

        assert!((factors.fitness_level - 50.0).abs() < f64::EPSILON);
        assert!((factors.goal_alignment - 50.0).abs() < f64::EPSILON);
        assert!((factors.safety - 100.0).abs() < f64::EPSILON);
        assert!((factors.age_appropriateness - 100.0).abs() < f64::EPSILON);
        // bodyweight bonus is clamped
        assert!((factors.equipment_availability - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_goal_affinity_is_additive_with_containment() {
        let cardio = WorkoutDefinition {
            goal: Some("cardio".into()),
            ..WorkoutDefinition::new("Running", FitnessLevel::Intermediate, 1, 1)
        };
        assert!((goal_alignment_factor(Some("weight loss"), &cardio) - 75.0).abs() < f64::EPSILON);
        assert!((goal_alignment_factor(Some("cardio"), &cardio) - 80.0).abs() < f64::EPSILON);
        assert!((goal_alignment_factor(Some("flexibility"), &cardio) - 50.0).abs() < f64::EPSILON);
        assert!((goal_alignment_factor(None, &cardio) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_teen_beginner_on_advanced_barbell_is_low_priority() {
        let profile = UserProfile {
            activity_level: Some(ActivityLevel::Sedentary),
            experience_level: Some(FitnessLevel::Beginner),
            date_of_birth: born_years_ago(16),
            ..UserProfile::new("teen")
        };
        let workout = WorkoutDefinition {
            equipment: Some("heavy barbell".into()),
            ..WorkoutDefinition::new("Snatch", FitnessLevel::Advanced, 5, 3)
        };
        let recommendation = scorer().score(&workout, &profile).unwrap();

        assert!(recommendation.factors.fitness_level <= 15.0);
        assert!(recommendation.factors.age_appropriateness < 100.0);
        assert!(recommendation.score < 50);
        assert_eq!(recommendation.priority, Priority::Low);
    }

    #[test]
    fn test_back_pain_penalizes_back_work_and_adds_form_modification() {
        let profile = UserProfile {
            medical_conditions: Some("lower back pain".into()),
            ..UserProfile::new("u1")
        };
        let workout = WorkoutDefinition {
            muscle_groups: vec!["lower_back".into()],
            ..WorkoutDefinition::new("Good Mornings", FitnessLevel::Intermediate, 3, 10)
        };
        let recommendation = scorer().score(&workout, &profile).unwrap();

        assert!((recommendation.factors.safety - 70.0).abs() < f64::EPSILON);
        assert!(recommendation
            .modifications
            .iter()
            .any(|m| m.contains("neutral spine")));
    }

    #[test]
    fn test_inaccessible_equipment_is_penalized() {
        let profile = UserProfile {
            equipment_access: Some("resistance bands".into()),
            ..UserProfile::new("u1")
        };
        let workout = WorkoutDefinition {
            equipment: Some("kettlebell".into()),
            ..WorkoutDefinition::new("Swings", FitnessLevel::Intermediate, 3, 15)
        };
        let factors = scorer().factor_scores(&workout, &profile);
        assert!((factors.equipment_availability - 70.0).abs() < f64::EPSILON);

        let gym_member = UserProfile {
            equipment_access: Some("Full gym".into()),
            ..UserProfile::new("u2")
        };
        let factors = scorer().factor_scores(&workout, &gym_member);
        assert!((factors.equipment_availability - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let profile = UserProfile {
            height_cm: Some(-170.0),
            ..UserProfile::new("u1")
        };
        let workout = WorkoutDefinition::new("Plank", FitnessLevel::Beginner, 3, 1);
        assert!(scorer().score(&workout, &profile).is_err());
        assert!(scorer().score_all(&[workout], &profile).is_err());
    }

    #[test]
    fn test_score_all_is_stable_descending() {
        let profile = UserProfile {
            fitness_goal: Some("strength".into()),
            ..UserProfile::new("u1")
        };
        let catalog = vec![
            WorkoutDefinition::new("A", FitnessLevel::Intermediate, 3, 10),
            WorkoutDefinition {
                goal: Some("strength".into()),
                ..WorkoutDefinition::new("B", FitnessLevel::Intermediate, 3, 10)
            },
            WorkoutDefinition::new("C", FitnessLevel::Intermediate, 3, 10),
        ];
        let ranked = scorer().score_all(&catalog, &profile).unwrap();
        let names: Vec<&str> = ranked.iter().map(|r| r.workout.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let profile = UserProfile::new("u1");
        let catalog: Vec<WorkoutDefinition> = (0..10)
            .map(|i| WorkoutDefinition::new(format!("W{i}"), FitnessLevel::Beginner, i, 10))
            .collect();

        let sequential = scorer().score_all(&catalog, &profile).unwrap();
        let mut config = IntelligenceConfig::default().personalization;
        config.parallel_threshold = 1;
        let parallel = PersonalizationScorer::with_config(config)
            .with_reference_date(today())
            .score_all(&catalog, &profile)
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_priority_tiers() {
        let thresholds = PersonalizationThresholds::default();
        assert_eq!(Priority::from_score(80, &thresholds), Priority::High);
        assert_eq!(Priority::from_score(79, &thresholds), Priority::Medium);
        assert_eq!(Priority::from_score(50, &thresholds), Priority::Medium);
        assert_eq!(Priority::from_score(49, &thresholds), Priority::Low);
    }

    #[test]
    fn test_to_score_rounds_half_away_from_zero() {
        assert_eq!(to_score(46.5), 47);
        assert_eq!(to_score(46.49), 46);
        assert_eq!(to_score(120.0), 100);
        assert_eq!(to_score(-3.0), 0);
    }
}
