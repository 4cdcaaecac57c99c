use serde::{Deserialize, Serialize};

/// Ordered severity: `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for UrgencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Unknown urgency level: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyAlert {
    pub is_emergency: bool,
    pub urgency_level: UrgencyLevel,
    pub symptoms: Vec<String>,
    pub recommendations: Vec<String>,
    pub emergency_number: String,
}

impl EmergencyAlert {
    /// The "nothing detected" alert.
    pub fn none(emergency_number: &str) -> Self {
        Self {
            is_emergency: false,
            urgency_level: UrgencyLevel::Low,
            symptoms: Vec::new(),
            recommendations: Vec::new(),
            emergency_number: emergency_number.to_string(),
        }
    }

    pub fn should_escalate(&self) -> bool {
        self.is_emergency && self.urgency_level >= UrgencyLevel::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_ordering() {
        assert!(UrgencyLevel::Low < UrgencyLevel::Medium);
        assert!(UrgencyLevel::Medium < UrgencyLevel::High);
        assert!(UrgencyLevel::High < UrgencyLevel::Critical);
    }

    #[test]
    fn test_should_escalate() {
        let mut alert = EmergencyAlert::none("995");
        assert!(!alert.should_escalate());

        alert.is_emergency = true;
        alert.urgency_level = UrgencyLevel::Medium;
        assert!(!alert.should_escalate());

        alert.urgency_level = UrgencyLevel::High;
        assert!(alert.should_escalate());

        alert.urgency_level = UrgencyLevel::Critical;
        assert!(alert.should_escalate());

        alert.is_emergency = false;
        assert!(!alert.should_escalate());
    }

    #[test]
    fn test_urgency_from_str_is_lenient_on_case() {
        assert_eq!("CRITICAL".parse::<UrgencyLevel>(), Ok(UrgencyLevel::Critical));
        assert!("severe".parse::<UrgencyLevel>().is_err());
    }
}
