//! Keyword lists and substring scoring shared by routing, advice detection
//! and the emergency gate.
//!
//! Matching is case-insensitive substring containment: no stemming and no
//! word boundaries, so "pain" also matches inside "painting".

/// Phrases that mark a message as asking for advice rather than logistics.
pub const ADVICE_KEYWORDS: &[&str] = &[
    "how",
    "what should",
    "recommend",
    "suggest",
    "advice",
    "help",
    "problem",
    "pain",
    "symptom",
    "feel",
    "diet",
    "exercise",
    "medication",
    "treatment",
    "worried",
    "concerned",
    "issue",
    "wrong",
    "hurt",
    "ache",
    "sick",
    "unwell",
    "improve",
    "better",
    "optimize",
    "manage",
    "control",
    "prevent",
];

pub const LOGISTICS_KEYWORDS: &[&str] = &[
    "schedule",
    "appointment",
    "coordinate",
    "book",
    "reschedule",
    "cancel",
    "logistics",
    "contact",
    "team",
];

/// Gate for the emergency classifier. A miss means no model call.
pub const EMERGENCY_KEYWORDS: &[&str] = &[
    "chest pain",
    "difficulty breathing",
    "shortness of breath",
    "can't breathe",
    "heart attack",
    "stroke",
    "unconscious",
    "severe bleeding",
    "choking",
    "allergic reaction",
    "seizure",
    "overdose",
    "suicide",
    "severe headache",
    "blurred vision",
    "weakness on one side",
    "confusion",
    "severe abdominal pain",
    "high fever",
    "difficulty speaking",
    "fainting",
    "diabetic emergency",
    "asthma attack",
];

/// Switches the relationship manager into travel-health mode.
pub const TRAVEL_KEYWORDS: &[&str] = &["travel", "trip", "vacation", "flight"];

/// Read-only keyword lists, loaded once and shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTaxonomy {
    pub advice: Vec<String>,
    pub logistics: Vec<String>,
    pub emergency: Vec<String>,
    pub travel: Vec<String>,
}

impl Default for KeywordTaxonomy {
    fn default() -> Self {
        Self {
            advice: to_owned(ADVICE_KEYWORDS),
            logistics: to_owned(LOGISTICS_KEYWORDS),
            emergency: to_owned(EMERGENCY_KEYWORDS),
            travel: to_owned(TRAVEL_KEYWORDS),
        }
    }
}

fn to_owned(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_string()).collect()
}

/// Number of keywords occurring in `text`.
pub fn score<S: AsRef<str>>(text: &str, keywords: &[S]) -> usize {
    let text = text.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| text.contains(&keyword.as_ref().to_lowercase()))
        .count()
}

pub fn matches_any<S: AsRef<str>>(text: &str, keywords: &[S]) -> bool {
    let text = text.to_lowercase();
    keywords
        .iter()
        .any(|keyword| text.contains(&keyword.as_ref().to_lowercase()))
}

/// The keywords found in `text`, in list order.
pub fn matched<'a, S: AsRef<str>>(text: &str, keywords: &'a [S]) -> Vec<&'a str> {
    let text = text.to_lowercase();
    keywords
        .iter()
        .map(AsRef::as_ref)
        .filter(|keyword| text.contains(&keyword.to_lowercase()))
        .collect()
}
