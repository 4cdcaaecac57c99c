use std::collections::HashSet;

use crate::error::{ConciergeError, Result};
use crate::models::{Specialist, SpecialistId, TeamMember};

/// Validated, ordered set of specialists.
///
/// Declaration order matters: routing ties resolve to the earlier entry.
#[derive(Debug, Clone)]
pub struct SpecialistRegistry {
    specialists: Vec<Specialist>,
    coordinator: usize,
    default_advisor: usize,
}

impl SpecialistRegistry {
    /// Build a registry, rejecting configurations the router cannot serve:
    /// duplicate ids, anything other than exactly one non-advising
    /// coordinator, or a default advisor that is missing or cannot advise.
    pub fn new(specialists: Vec<Specialist>, default_advisor: SpecialistId) -> Result<Self> {
        let mut seen = HashSet::new();
        for specialist in &specialists {
            if !seen.insert(specialist.id) {
                return Err(ConciergeError::Config(format!(
                    "Duplicate specialist id: {}",
                    specialist.id
                )));
            }
        }

        let coordinators: Vec<usize> = specialists
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.can_provide_advice)
            .map(|(idx, _)| idx)
            .collect();

        let coordinator = match coordinators.as_slice() {
            [idx] => *idx,
            [] => {
                return Err(ConciergeError::Config(
                    "Registry needs one coordinator that does not give advice".to_string(),
                ))
            }
            _ => {
                return Err(ConciergeError::Config(format!(
                    "Registry has {} coordinators, expected exactly one",
                    coordinators.len()
                )))
            }
        };

        let default_idx = specialists
            .iter()
            .position(|s| s.id == default_advisor)
            .ok_or_else(|| {
                ConciergeError::Config(format!("Default advisor {default_advisor} is not registered"))
            })?;

        if !specialists[default_idx].can_provide_advice {
            return Err(ConciergeError::Config(format!(
                "Default advisor {default_advisor} cannot provide advice"
            )));
        }

        Ok(Self {
            specialists,
            coordinator,
            default_advisor: default_idx,
        })
    }

    /// The Elyx team roster.
    pub fn standard() -> Result<Self> {
        let specialists = vec![
            Specialist::new(
                SpecialistId::Ruby,
                "Ruby",
                "Concierge",
                &[
                    "logistics",
                    "scheduling",
                    "coordination",
                    "general questions",
                    "appointments",
                    "team coordination",
                ],
                false,
            ),
            Specialist::new(
                SpecialistId::Warren,
                "Dr. Warren",
                "Medical Strategist",
                &[
                    "medical advice",
                    "diagnoses",
                    "test results",
                    "lab interpretation",
                    "symptoms",
                    "medications",
                    "medical conditions",
                    "health assessments",
                    "emergency",
                    "chest pain",
                    "heart attack",
                    "stroke",
                ],
                true,
            ),
            Specialist::new(
                SpecialistId::Advik,
                "Advik",
                "Performance Scientist",
                &[
                    "fitness",
                    "wearables",
                    "performance tracking",
                    "heart rate",
                    "sleep data",
                    "exercise metrics",
                    "training",
                    "recovery",
                    "hrv",
                    "workout",
                ],
                true,
            ),
            Specialist::new(
                SpecialistId::Carla,
                "Carla",
                "Nutritionist",
                &[
                    "diet",
                    "nutrition",
                    "supplements",
                    "food",
                    "eat",
                    "eating",
                    "meals",
                    "vitamins",
                    "calories",
                    "macros",
                    "weight management",
                    "meal planning",
                ],
                true,
            ),
            Specialist::new(
                SpecialistId::Rachel,
                "Rachel",
                "Physiotherapist",
                &[
                    "injuries",
                    "exercise form",
                    "mobility",
                    "pain",
                    "stretching",
                    "physical therapy",
                    "movement",
                    "posture",
                    "rehabilitation",
                    "muscle",
                ],
                true,
            ),
            Specialist::new(
                SpecialistId::Neel,
                "Neel",
                "Relationship Manager",
                &[
                    "health planning",
                    "service quality",
                    "program management",
                    "long-term goals",
                    "lifestyle changes",
                    "overall strategy",
                    "travel health",
                ],
                true,
            ),
        ];

        Self::new(specialists, SpecialistId::Warren)
    }

    pub fn all(&self) -> &[Specialist] {
        &self.specialists
    }

    pub fn get(&self, id: SpecialistId) -> Option<&Specialist> {
        self.specialists.iter().find(|s| s.id == id)
    }

    pub fn coordinator(&self) -> &Specialist {
        &self.specialists[self.coordinator]
    }

    pub fn default_advisor(&self) -> &Specialist {
        &self.specialists[self.default_advisor]
    }

    /// Advice-capable specialists in declaration order.
    pub fn advisors(&self) -> impl Iterator<Item = &Specialist> {
        self.specialists.iter().filter(|s| s.can_provide_advice)
    }

    pub fn team_members(&self) -> Vec<TeamMember> {
        self.specialists
            .iter()
            .map(|s| TeamMember {
                id: s.id,
                name: s.name.clone(),
                role: s.role.clone(),
                color: s.color.clone(),
                avatar: s.id.avatar().to_string(),
            })
            .collect()
    }
}
