// ABOUTME: Safety assessor interpreting the rule base for one workout and one member
// ABOUTME: Produces risk level, warnings, modifications, clearance flag, and alternatives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use gymwise_core::constants::age_brackets::MIDDLE_AGED_MAX_AGE;
use gymwise_core::models::{normalize_tag, FitnessLevel, WorkoutDefinition};
use tracing::debug;

use super::rules::{ImpactLevel, SafetyRuleBase};
use super::{push_unique, RiskLevel, SafetyAssessment, UserHealthProfile};

/// Bounds of the suggested difficulty shift
const MIN_DIFFICULTY_ADJUSTMENT: i8 = -2;
const MAX_DIFFICULTY_ADJUSTMENT: i8 = 2;

/// Interprets the safety rule base
///
/// Stateless apart from the shared rule base handle, so one instance can be
/// used from any number of threads.
#[derive(Debug, Clone)]
pub struct SafetyAssessor {
    rule_base: Arc<SafetyRuleBase>,
}

impl Default for SafetyAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyAssessor {
    /// Assessor over the built-in rule base
    #[must_use]
    pub fn new() -> Self {
        Self {
            rule_base: SafetyRuleBase::shared(),
        }
    }

    /// Assessor over a custom rule base
    #[must_use]
    pub const fn with_rule_base(rule_base: Arc<SafetyRuleBase>) -> Self {
        Self { rule_base }
    }

    /// The rule base being interpreted
    #[must_use]
    pub fn rule_base(&self) -> &SafetyRuleBase {
        &self.rule_base
    }

    /// Assess one workout for one health profile
    #[must_use]
    pub fn assess(
        &self,
        workout: &WorkoutDefinition,
        health: &UserHealthProfile,
    ) -> SafetyAssessment {
        let mut assessment = SafetyAssessment::default();
        let mut adjustment: i8 = 0;

        let conditions_overlap = self.apply_conditions(workout, health, &mut assessment);

        match health.fitness_level {
            FitnessLevel::Beginner => {
                adjustment = adjustment.saturating_sub(1);
                push_unique(
                    &mut assessment.modifications,
                    "Start with the modified version and focus on form",
                );
            }
            FitnessLevel::Intermediate => {}
            FitnessLevel::Advanced => adjustment = adjustment.saturating_add(1),
        }

        let is_senior = health.age.is_some_and(|age| age > MIDDLE_AGED_MAX_AGE);
        if is_senior {
            adjustment = adjustment.saturating_sub(1);
            push_unique(
                &mut assessment.modifications,
                "Include balance and flexibility work alongside this workout",
            );
            push_unique(
                &mut assessment.modifications,
                "Allow extra recovery time between sessions",
            );
        }

        let risk_profile = self.rule_base.workout_risk(&workout.name);

        if health.pregnancy_status.requires_precautions() {
            adjustment = adjustment.saturating_sub(1);
            assessment.requires_medical_clearance = true;
            push_unique(
                &mut assessment.warnings,
                "Medical clearance required during pregnancy or postpartum recovery",
            );
            push_unique(
                &mut assessment.modifications,
                "Avoid exercises lying flat on your back",
            );
            push_unique(
                &mut assessment.modifications,
                "Keep intensity at a level where you can hold a conversation",
            );
            if risk_profile.is_some_and(|profile| profile.impact == ImpactLevel::High) {
                push_unique(
                    &mut assessment.warnings,
                    "High-impact movement is not recommended during pregnancy or postpartum recovery",
                );
            }
        }

        if let Some(profile) = risk_profile {
            if let Some(text) = profile.modification_for_level(health.fitness_level) {
                push_unique(&mut assessment.modifications, text);
            }
            for condition_id in &health.active_conditions {
                if let Some(text) = profile.modification_for_condition(condition_id) {
                    push_unique(&mut assessment.modifications, text);
                }
            }
        } else {
            debug!(workout = %workout.name, "No risk profile for workout, skipping workout rules");
        }

        for injury in &health.injuries {
            if workout.targets(injury) {
                push_unique(
                    &mut assessment.warnings,
                    format!("Previous injury ({injury}) involves a targeted area"),
                );
            }
        }
        for medication in &health.medications {
            push_unique(
                &mut assessment.modifications,
                format!("Monitor perceived exertion while taking {medication}"),
            );
        }

        assessment.alternative_workouts =
            self.alternatives(workout, health.fitness_level, conditions_overlap, is_senior);
        assessment.difficulty_adjustment =
            adjustment.clamp(MIN_DIFFICULTY_ADJUSTMENT, MAX_DIFFICULTY_ADJUSTMENT);

        debug!(
            workout = %workout.name,
            risk = %assessment.risk_level,
            is_safe = assessment.is_safe,
            clearance = assessment.requires_medical_clearance,
            "Safety assessment complete"
        );
        assessment
    }

    /// Apply condition rules; returns whether any active condition overlapped
    fn apply_conditions(
        &self,
        workout: &WorkoutDefinition,
        health: &UserHealthProfile,
        assessment: &mut SafetyAssessment,
    ) -> bool {
        let mut any_overlap = false;
        for condition_id in &health.active_conditions {
            let Some(condition) = self.rule_base.condition(condition_id) else {
                debug!(condition = %condition_id, "Ignoring unknown medical condition");
                continue;
            };
            let areas = condition.overlapping_areas(workout);
            if areas.is_empty() {
                continue;
            }
            any_overlap = true;

            push_unique(
                &mut assessment.warnings,
                format!(
                    "{} affects targeted areas ({}): proceed with caution",
                    condition.name,
                    areas.join(", ")
                ),
            );
            for text in &condition.modifications {
                push_unique(&mut assessment.modifications, text.as_str());
            }
            for text in &condition.contraindications {
                push_unique(&mut assessment.contraindications, text.as_str());
            }
            if condition.severity > assessment.risk_level {
                assessment.risk_level = condition.severity;
            }
            if condition.requires_clearance {
                assessment.requires_medical_clearance = true;
                push_unique(
                    &mut assessment.warnings,
                    format!(
                        "Medical clearance required before this workout ({})",
                        condition.name.to_lowercase()
                    ),
                );
            }
        }
        if assessment.risk_level == RiskLevel::High {
            assessment.is_safe = false;
        }
        any_overlap
    }

    fn alternatives(
        &self,
        workout: &WorkoutDefinition,
        level: FitnessLevel,
        conditions_overlap: bool,
        is_senior: bool,
    ) -> Vec<String> {
        let catalog = &self.rule_base.alternatives;
        let excluded = normalize_tag(&workout.name);
        let mut alternatives = Vec::new();

        let lists = [
            (level == FitnessLevel::Beginner, &catalog.beginner),
            (conditions_overlap, &catalog.cross_training),
            (is_senior, &catalog.senior),
        ];
        for (applies, list) in lists {
            if !applies {
                continue;
            }
            for name in list {
                if normalize_tag(name) != excluded {
                    push_unique(&mut alternatives, name.as_str());
                }
            }
        }
        alternatives
    }
}
