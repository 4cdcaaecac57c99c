use crate::models::{Specialist, SpecialistId};

/// The coordinator's hand-off line introducing `advisor`.
pub fn referral_message(advisor: &Specialist) -> String {
    match advisor.id {
        SpecialistId::Warren => "I understand your concern about this health issue. Let me bring in Dr. Warren to provide you with proper medical guidance.".to_string(),
        SpecialistId::Advik => "That's a great fitness question! Let me connect you with Advik, our Performance Scientist, who can give you expert advice.".to_string(),
        SpecialistId::Carla => "Perfect nutrition question! I'll bring in Carla, our Nutritionist, to help you with that.".to_string(),
        SpecialistId::Rachel => "That sounds like something our Physiotherapist Rachel can help you with. Let me get her for you.".to_string(),
        SpecialistId::Neel => "This seems like a perfect question for Neel, our Relationship Manager, who handles health planning and strategy.".to_string(),
        SpecialistId::Ruby => format!(
            "Let me connect you with {} from our team who can help you with that.",
            advisor.name
        ),
    }
}

/// Coordinator hand-off followed by the advisor's own answer.
pub fn compose_referral(advisor: &Specialist, advice: &str) -> String {
    format!(
        "{}\n\n{}: {}",
        referral_message(advisor),
        advisor.display_name(),
        advice
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::SpecialistRegistry;

    #[test]
    fn test_every_advisor_has_a_dedicated_line() {
        let registry = SpecialistRegistry::standard().unwrap();
        for advisor in registry.advisors() {
            let line = referral_message(advisor);
            assert!(!line.starts_with("Let me connect you with"), "{}", advisor.id);
            assert!(line.contains(advisor.name.trim_start_matches("Dr. ")));
        }
    }

    #[test]
    fn test_coordinator_gets_generic_line() {
        let registry = SpecialistRegistry::standard().unwrap();
        assert_eq!(
            referral_message(registry.coordinator()),
            "Let me connect you with Ruby from our team who can help you with that."
        );
    }

    #[test]
    fn test_compose_referral_layout() {
        let registry = SpecialistRegistry::standard().unwrap();
        let carla = registry.get(SpecialistId::Carla).unwrap();

        assert_eq!(
            compose_referral(carla, "Try a light, low-FODMAP meal."),
            "Perfect nutrition question! I'll bring in Carla, our Nutritionist, to help you with that.\n\nCarla (Nutritionist): Try a light, low-FODMAP meal."
        );
    }
}
