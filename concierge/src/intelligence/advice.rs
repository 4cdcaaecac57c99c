use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use super::keywords::{self, KeywordTaxonomy};
use super::utils::truncate_chars;
use crate::llm::{prompts, TextGeneration};
use crate::models::{RepetitionCheck, Specialist, SpecialistId};

pub const ADVICE_FALLBACK: &str =
    "I apologize, but I'm having trouble responding right now. Please try again.";

const COORDINATOR_INSTRUCTIONS: &str = "You are Ruby, the Concierge. You ONLY handle:
- Scheduling appointments and coordinating with the team
- Logistics and administrative tasks
- General coordination between specialists
- Team introductions and referrals

You NEVER provide medical, nutrition, fitness, or health advice. If asked for advice, always refer to the appropriate specialist.";

const MEDICAL_INSTRUCTIONS: &str = "You are Dr. Warren, Medical Strategist. Provide evidence-based medical advice citing:
- Singapore MOH guidelines and clinical practice guidelines
- MOH TRUST Platform data when relevant
- Singapore HTA recommendations for medications
- Local clinical data and health trends
Always include proper medical citations and consider Singapore's healthcare context.";

const TRAVEL_HEALTH_INSTRUCTIONS: &str = "You are Neel in TRAVEL HEALTH ADVISOR mode. For travel health:
- Reference MOH and WHO travel advisories for the destination
- Suggest required/recommended vaccines
- Provide destination-specific health risks and precautions
- Adjust health plans for travel periods
- Include emergency contact information for the destination
- Consider Singapore return requirements";

/// Persona style line for specialists without bespoke instructions.
pub fn specialist_style(id: SpecialistId) -> &'static str {
    match id {
        SpecialistId::Advik => "Provide data-driven fitness advice optimized for Singapore's climate. Focus on performance metrics, wearables data, and evidence-based training.",
        SpecialistId::Carla => "Give practical nutrition advice considering Singapore's food culture. Include local healthy options and dietary modifications.",
        SpecialistId::Rachel => "Provide direct, encouraging physiotherapy advice. Consider Singapore's heat and humidity for exercise recommendations.",
        SpecialistId::Neel => "Take a strategic, big-picture approach to health planning. Focus on long-term goals and lifestyle integration.",
        SpecialistId::Ruby | SpecialistId::Warren => {
            "Provide helpful, professional advice in your area of expertise."
        }
    }
}

/// Seasonal climate notes for a calendar month (1-12).
///
/// Haze risk runs June through October, the monsoon November through April.
pub fn regional_context(month: u32) -> String {
    let mut context = String::from("Singapore context: ");
    if (6..=10).contains(&month) {
        context.push_str(
            "Haze season risk period - recommend air quality monitoring, indoor exercises when PSI >100. ",
        );
    }
    if month >= 11 || month <= 4 {
        context.push_str(
            "Monsoon season - higher respiratory illness risk, focus on immunity support. ",
        );
    }
    context.push_str(
        "Year-round high humidity (80-90%) and heat (26-32°C) - prioritize hydration and heat management.",
    );
    context
}

/// Builds the specialist's system prompt and asks the model for advice.
#[derive(Clone)]
pub struct AdviceComposer {
    llm: Arc<dyn TextGeneration>,
    taxonomy: Arc<KeywordTaxonomy>,
}

impl AdviceComposer {
    pub fn new(llm: Arc<dyn TextGeneration>, taxonomy: Arc<KeywordTaxonomy>) -> Self {
        Self { llm, taxonomy }
    }

    pub fn instructions(&self, query: &str, specialist: &Specialist) -> String {
        match specialist.id {
            SpecialistId::Ruby => COORDINATOR_INSTRUCTIONS.to_string(),
            SpecialistId::Warren => MEDICAL_INSTRUCTIONS.to_string(),
            SpecialistId::Neel if keywords::matches_any(query, &self.taxonomy.travel) => {
                TRAVEL_HEALTH_INSTRUCTIONS.to_string()
            }
            id => format!(
                "You are {}, {}. {}",
                specialist.name,
                specialist.role,
                specialist_style(id)
            ),
        }
    }

    pub fn system_prompt(
        &self,
        query: &str,
        specialist: &Specialist,
        context_summary: &str,
        check: &RepetitionCheck,
        today: NaiveDate,
    ) -> String {
        let conversation_note = if check.is_repetitive {
            format!(
                "This is similar to a previous question. Previous response was: \"{}...\"",
                truncate_chars(check.previous_response.as_deref().unwrap_or(""), 200)
            )
        } else {
            "This is a new question.".to_string()
        };

        prompts::specialist_system_prompt(
            &self.instructions(query, specialist),
            &specialist.display_name(),
            &regional_context(today.month()),
            context_summary,
            &conversation_note,
        )
    }

    pub async fn compose(
        &self,
        query: &str,
        specialist: &Specialist,
        context_summary: &str,
        check: &RepetitionCheck,
        today: NaiveDate,
    ) -> String {
        let system = self.system_prompt(query, specialist, context_summary, check, today);

        match self.llm.generate(query, Some(&system)).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(specialist = %specialist.id, error = %e, "Specialist advice generation failed");
                ADVICE_FALLBACK.to_string()
            }
        }
    }
}
