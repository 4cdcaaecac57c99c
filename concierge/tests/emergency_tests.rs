mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;

use common::{OfflineLlm, ScriptedLlm};
use concierge::config::EmergencyConfig;
use concierge::intelligence::{EmergencyDetector, KeywordTaxonomy};
use concierge::models::{EmergencyAlert, UrgencyLevel};

fn detector(llm: Arc<ScriptedLlm>) -> EmergencyDetector {
    EmergencyDetector::new(
        llm,
        Arc::new(KeywordTaxonomy::default()),
        EmergencyConfig::default(),
    )
}

#[tokio::test]
async fn test_message_without_gate_keyword_skips_classifier() {
    common::init_test_logger();
    let llm = Arc::new(ScriptedLlm::default().with_json(json!({
        "isEmergency": true,
        "urgencyLevel": "critical"
    })));
    let detector = detector(llm.clone());

    let alert = detector.analyze("Any tips for a better night's sleep?", &[]).await;

    assert_eq!(alert, EmergencyAlert::none("995"));
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn test_chest_pain_with_failing_classifier_fails_safe_high() {
    let llm = Arc::new(ScriptedLlm::default());
    let detector = detector(llm.clone());

    let alert = detector
        .analyze("I have chest pain and I can't breathe properly", &[])
        .await;

    assert!(alert.is_emergency);
    assert_eq!(alert.urgency_level, UrgencyLevel::High);
    assert_eq!(alert.symptoms, vec!["chest pain", "can't breathe"]);
    assert_eq!(alert.recommendations.len(), 3);
    assert!(alert.should_escalate());
    assert_eq!(llm.json_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unavailable_model_also_fails_safe() {
    let detector = EmergencyDetector::new(
        Arc::new(OfflineLlm),
        Arc::new(KeywordTaxonomy::default()),
        EmergencyConfig::default(),
    );

    let alert = detector.analyze("My father is having a STROKE", &[]).await;

    assert!(alert.is_emergency);
    assert_eq!(alert.urgency_level, UrgencyLevel::High);
    assert_eq!(alert.symptoms, vec!["stroke"]);
}

#[tokio::test]
async fn test_classifier_verdict_is_used_when_valid() {
    let llm = Arc::new(ScriptedLlm::default().with_json(json!({
        "isEmergency": true,
        "urgencyLevel": "critical",
        "symptoms": ["crushing chest pain"],
        "recommendations": ["Call 995 now", "Chew an aspirin if not allergic"]
    })));
    let detector = detector(llm);

    let alert = detector.analyze("Crushing chest pain down my arm", &[]).await;

    assert_eq!(alert.urgency_level, UrgencyLevel::Critical);
    assert_eq!(alert.symptoms, vec!["crushing chest pain"]);

    let text = detector.format_response(&alert);
    assert!(text.contains("**CALL 995 IMMEDIATELY**"));
    assert!(text.contains("**Immediate actions:**\n• Call 995 now\n"));
    assert!(text.contains("**Nearest Hospitals:** Singapore General Hospital"));
}

#[tokio::test]
async fn test_classifier_cannot_clear_a_gated_message() {
    let llm = Arc::new(ScriptedLlm::default().with_json(json!({
        "isEmergency": false,
        "urgencyLevel": "low"
    })));
    let detector = detector(llm);

    let alert = detector
        .analyze("I read an article about heart attack prevention", &[])
        .await;

    assert!(alert.is_emergency);
    assert_eq!(alert.urgency_level, UrgencyLevel::High);
    assert_eq!(alert.symptoms, vec!["heart attack"]);
    assert!(detector
        .format_response(&alert)
        .starts_with("⚠️ **URGENT MEDICAL ATTENTION NEEDED** ⚠️"));
}

#[test]
fn test_format_without_recommendations_omits_actions_header() {
    let detector = detector(Arc::new(ScriptedLlm::default()));
    let alert = EmergencyAlert {
        is_emergency: true,
        urgency_level: UrgencyLevel::Medium,
        symptoms: vec!["high fever".to_string()],
        recommendations: Vec::new(),
        emergency_number: "995".to_string(),
    };

    let text = detector.format_response(&alert);

    assert!(!text.contains("Immediate actions"));
    assert!(text.starts_with("**Symptoms detected:** high fever"));
    assert!(text.contains("**Emergency Number:** 995\n"));
}
