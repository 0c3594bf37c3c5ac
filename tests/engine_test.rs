// ABOUTME: Integration tests for the recommendation engine facade
// ABOUTME: Exercises the full score, assess, record, generate, and erase flow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{born_years_ago, init_test_logging, record_now, reference_date, sample_catalog};
use gymwise::engine::RecommendationEngine;
use gymwise::errors::ErrorCode;
use gymwise::intelligence::config::intelligence::HistoryConfig;
use gymwise::intelligence::{
    HistoryStore, InMemoryHistoryStore, IntelligenceConfig, ProgressionState,
    RecommendationContext, RiskLevel, SafetyRuleBase, UserHealthProfile,
};
use gymwise::models::{FitnessLevel, UserProfile};

fn engine() -> RecommendationEngine {
    RecommendationEngine::with_config(IntelligenceConfig::default())
        .with_reference_date(reference_date())
}

fn member() -> UserProfile {
    UserProfile {
        date_of_birth: Some(born_years_ago(34)),
        experience_level: Some(FitnessLevel::Intermediate),
        fitness_goal: Some("strength".to_owned()),
        equipment_access: Some("full gym".to_owned()),
        ..UserProfile::new("member-7")
    }
}

#[test]
fn test_full_recommendation_flow() {
    init_test_logging();
    let engine = engine();
    let profile = member();

    let ranked = engine.score_all(&sample_catalog(), &profile).unwrap();
    assert_eq!(ranked.len(), sample_catalog().len());

    for (difficulty, form) in [(4, 9), (5, 9), (5, 8)] {
        engine
            .record_completion(record_now(&profile.user_id, difficulty, form))
            .unwrap();
    }
    assert_eq!(engine.history(&profile.user_id).total_workouts, 3);

    let context = RecommendationContext::new(profile.clone(), 50, 7).with_equipment("barbell");
    let adaptive = engine.generate(&sample_catalog(), &context).unwrap();
    assert!(adaptive
        .iter()
        .all(|r| r.progression == ProgressionState::Increase));

    assert!(engine.clear_history(&profile.user_id));
    assert!(engine.history(&profile.user_id).is_empty());
    let after = engine.generate(&sample_catalog(), &context).unwrap();
    assert!(after
        .iter()
        .all(|r| r.progression == ProgressionState::Maintain));
}

#[test]
fn test_empty_catalog_yields_empty_results() {
    init_test_logging();
    let engine = engine();
    let context = RecommendationContext::new(member(), 30, 5);

    assert!(engine.score_all(&[], &member()).unwrap().is_empty());
    assert!(engine.generate(&[], &context).unwrap().is_empty());
}

#[test]
fn test_injected_store_is_shared_with_caller() {
    init_test_logging();
    let store = Arc::new(InMemoryHistoryStore::with_config(HistoryConfig::default()));
    let engine =
        RecommendationEngine::with_store(Arc::clone(&store), IntelligenceConfig::default());

    engine.record_completion(record_now("shared", 6, 7)).unwrap();
    assert_eq!(store.history("shared").total_workouts, 1);
    assert_eq!(store.user_count(), 1);
}

#[test]
fn test_invalid_record_surfaces_error_code() {
    init_test_logging();
    let error = engine().record_completion(record_now("", 5, 5)).unwrap_err();
    assert_eq!(error.code, ErrorCode::MissingRequiredField);
    assert_eq!(error.code.http_status(), 400);
}

#[test]
fn test_assess_uses_configured_rule_base() {
    init_test_logging();
    let mut rule_base = SafetyRuleBase::builtin();
    for condition in &mut rule_base.conditions {
        if condition.id == "back_pain" {
            condition.requires_clearance = true;
        }
    }
    let engine = engine().with_rule_base(Arc::new(rule_base));
    let deadlifts = &sample_catalog()[1];
    let health = UserHealthProfile::new(FitnessLevel::Intermediate).with_condition("back_pain");

    let assessment = engine.assess(deadlifts, &health);
    assert_eq!(assessment.risk_level, RiskLevel::Medium);
    assert!(assessment.requires_medical_clearance);
}
