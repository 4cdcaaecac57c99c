use serde::{Deserialize, Serialize};

/// Closed set of team personas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialistId {
    Ruby,
    Warren,
    Advik,
    Carla,
    Rachel,
    Neel,
}

impl SpecialistId {
    pub const ALL: [SpecialistId; 6] = [
        Self::Ruby,
        Self::Warren,
        Self::Advik,
        Self::Carla,
        Self::Rachel,
        Self::Neel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ruby => "ruby",
            Self::Warren => "warren",
            Self::Advik => "advik",
            Self::Carla => "carla",
            Self::Rachel => "rachel",
            Self::Neel => "neel",
        }
    }

    /// Single-letter avatar shown in the team roster.
    pub fn avatar(&self) -> &'static str {
        match self {
            Self::Ruby => "R",
            Self::Warren => "W",
            Self::Advik => "A",
            Self::Carla => "C",
            Self::Rachel => "R",
            Self::Neel => "N",
        }
    }
}

impl std::fmt::Display for SpecialistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SpecialistId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ruby" => Ok(Self::Ruby),
            "warren" => Ok(Self::Warren),
            "advik" => Ok(Self::Advik),
            "carla" => Ok(Self::Carla),
            "rachel" => Ok(Self::Rachel),
            "neel" => Ok(Self::Neel),
            _ => Err(format!("Unknown specialist: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialist {
    pub id: SpecialistId,
    pub name: String,
    pub role: String,
    pub color: String,
    /// Lowercase keyword phrases, scored by substring match.
    pub specialties: Vec<String>,
    pub can_provide_advice: bool,
}

impl Specialist {
    pub fn new(
        id: SpecialistId,
        name: &str,
        role: &str,
        specialties: &[&str],
        can_provide_advice: bool,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            role: role.to_string(),
            color: id.as_str().to_string(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            can_provide_advice,
        }
    }

    /// "Name (Role)" as used in referral hand-offs and response headers.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.role)
    }
}
