use std::sync::Arc;

use serde::Deserialize;

use super::keywords::{self, KeywordTaxonomy};
use crate::config::EmergencyConfig;
use crate::error::{ConciergeError, Result};
use crate::llm::{generate_structured, prompts, TextGeneration};
use crate::models::{EmergencyAlert, MedicalRecord, UrgencyLevel};

/// Classifier payload. `urgencyLevel` is parsed leniently after the fact.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmergencyClassification {
    is_emergency: bool,
    urgency_level: String,
    #[serde(default)]
    symptoms: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

/// Keyword gate followed by model-assisted severity classification.
///
/// Once the gate fires the result is always an emergency: a classifier
/// failure or a clear verdict yields a high-urgency alert.
#[derive(Clone)]
pub struct EmergencyDetector {
    llm: Arc<dyn TextGeneration>,
    taxonomy: Arc<KeywordTaxonomy>,
    config: EmergencyConfig,
}

impl EmergencyDetector {
    pub fn new(
        llm: Arc<dyn TextGeneration>,
        taxonomy: Arc<KeywordTaxonomy>,
        config: EmergencyConfig,
    ) -> Self {
        Self {
            llm,
            taxonomy,
            config,
        }
    }

    pub fn emergency_number(&self) -> &str {
        &self.config.number
    }

    pub async fn analyze(&self, message: &str, medical_history: &[MedicalRecord]) -> EmergencyAlert {
        let gate_hits = keywords::matched(message, &self.taxonomy.emergency);
        if gate_hits.is_empty() {
            return EmergencyAlert::none(&self.config.number);
        }

        tracing::info!(keywords = ?gate_hits, "Emergency keywords detected, classifying");

        match self.classify(message, medical_history).await {
            Ok(alert) if !alert.is_emergency => {
                tracing::warn!(
                    keywords = ?gate_hits,
                    urgency = %alert.urgency_level,
                    "Classifier cleared a message that hit the emergency gate, keeping alert"
                );
                self.overrule_clear(alert, &gate_hits)
            }
            Ok(alert) => {
                tracing::info!(urgency = %alert.urgency_level, "Emergency classified");
                alert
            }
            Err(ConciergeError::LlmUnavailable(reason)) => {
                tracing::warn!(%reason, "LLM unavailable for emergency classification, failing safe");
                self.fail_safe(&gate_hits)
            }
            Err(e) => {
                tracing::error!(error = %e, "Emergency classification failed, failing safe");
                self.fail_safe(&gate_hits)
            }
        }
    }

    async fn classify(
        &self,
        message: &str,
        medical_history: &[MedicalRecord],
    ) -> Result<EmergencyAlert> {
        let history = if medical_history.is_empty() {
            None
        } else {
            Some(serde_json::to_string(medical_history)?)
        };

        let prompt = prompts::emergency_classification_prompt(
            message,
            history.as_deref(),
            &self.config.number,
        );
        let payload: EmergencyClassification =
            generate_structured(self.llm.as_ref(), &prompt).await?;

        let urgency_level = payload
            .urgency_level
            .parse::<UrgencyLevel>()
            .map_err(ConciergeError::Llm)?;

        Ok(EmergencyAlert {
            is_emergency: payload.is_emergency,
            urgency_level,
            symptoms: payload.symptoms,
            recommendations: payload.recommendations,
            emergency_number: self.config.number.clone(),
        })
    }

    fn fail_safe(&self, gate_hits: &[&str]) -> EmergencyAlert {
        let number = &self.config.number;
        EmergencyAlert {
            is_emergency: true,
            urgency_level: UrgencyLevel::High,
            symptoms: gate_hits.iter().map(|k| k.to_string()).collect(),
            recommendations: vec![
                format!("Call {number} immediately if experiencing severe symptoms"),
                "Seek immediate medical attention at the nearest hospital".to_string(),
                "Do not delay if symptoms worsen".to_string(),
            ],
            emergency_number: number.clone(),
        }
    }

    /// A gated message stays an emergency of at least high urgency.
    fn overrule_clear(&self, mut alert: EmergencyAlert, gate_hits: &[&str]) -> EmergencyAlert {
        let fallback = self.fail_safe(gate_hits);
        alert.is_emergency = true;
        alert.urgency_level = alert.urgency_level.max(UrgencyLevel::High);
        if alert.symptoms.is_empty() {
            alert.symptoms = fallback.symptoms;
        }
        if alert.recommendations.is_empty() {
            alert.recommendations = fallback.recommendations;
        }
        alert
    }

    pub fn should_escalate(&self, alert: &EmergencyAlert) -> bool {
        alert.should_escalate()
    }

    /// Render an alert for the chat. Empty when there is no emergency.
    pub fn format_response(&self, alert: &EmergencyAlert) -> String {
        if !alert.is_emergency {
            return String::new();
        }

        let number = &alert.emergency_number;
        let mut response = String::new();

        match alert.urgency_level {
            UrgencyLevel::Critical => {
                response.push_str("🚨 **EMERGENCY DETECTED** 🚨\n\n");
                response.push_str(&format!("**CALL {number} IMMEDIATELY**\n\n"));
            }
            UrgencyLevel::High => {
                response.push_str("⚠️ **URGENT MEDICAL ATTENTION NEEDED** ⚠️\n\n");
                response.push_str(&format!(
                    "Consider calling {number} or seek immediate medical care\n\n"
                ));
            }
            UrgencyLevel::Medium | UrgencyLevel::Low => {}
        }

        if !alert.symptoms.is_empty() {
            response.push_str(&format!(
                "**Symptoms detected:** {}\n\n",
                alert.symptoms.join(", ")
            ));
        }

        if !alert.recommendations.is_empty() {
            response.push_str("**Immediate actions:**\n");
            for rec in &alert.recommendations {
                response.push_str(&format!("• {rec}\n"));
            }
            response.push('\n');
        }

        response.push_str(&format!("**Emergency Number:** {number}\n"));
        response.push_str(&format!(
            "**Nearest Hospitals:** {}\n\n",
            self.config.hospitals.join(", ")
        ));

        response
    }
}
