use std::sync::Arc;

use super::keywords::{self, KeywordTaxonomy};
use super::registry::SpecialistRegistry;
use crate::models::Specialist;

/// Keyword-scored specialist selection.
#[derive(Debug, Clone)]
pub struct SpecialistRouter {
    registry: Arc<SpecialistRegistry>,
    taxonomy: Arc<KeywordTaxonomy>,
}

impl SpecialistRouter {
    pub fn new(registry: Arc<SpecialistRegistry>, taxonomy: Arc<KeywordTaxonomy>) -> Self {
        Self { registry, taxonomy }
    }

    /// True when any advice keyword occurs in the query.
    pub fn needs_advice(&self, query: &str) -> bool {
        keywords::matches_any(query, &self.taxonomy.advice)
    }

    /// Pick the specialist for a query. Never fails.
    ///
    /// With `needs_advice`, every advisor is scored against its specialties
    /// and the first one reaching the top score wins; a top score of zero
    /// goes to the default advisor. Without it the coordinator answers.
    pub fn route(&self, query: &str, needs_advice: bool) -> &Specialist {
        if needs_advice {
            let mut best: Option<(&Specialist, usize)> = None;
            for advisor in self.registry.advisors() {
                let score = keywords::score(query, &advisor.specialties);
                if best.map_or(true, |(_, top)| score > top) {
                    best = Some((advisor, score));
                }
            }

            let chosen = match best {
                Some((advisor, score)) if score > 0 => advisor,
                _ => self.registry.default_advisor(),
            };

            tracing::debug!(
                specialist = %chosen.id,
                top_score = best.map(|(_, score)| score).unwrap_or(0),
                "Routed advice query"
            );
            return chosen;
        }

        let coordinator = self.registry.coordinator();
        let is_logistics = keywords::matches_any(query, &self.taxonomy.logistics);
        tracing::debug!(
            specialist = %coordinator.id,
            is_logistics,
            "Routed non-advice query to coordinator"
        );
        coordinator
    }
}
