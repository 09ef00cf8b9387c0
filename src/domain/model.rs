use serde::{Deserialize, Serialize};

/// One entry of the commodity code taxonomy, e.g. `915-00: CATERING SERVICES`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommodityCode {
    pub code: String,
    pub description: String,
}

impl CommodityCode {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// What a business says about itself. Built per request and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub services: String,
    #[serde(default)]
    pub specialties: String,
    #[serde(default)]
    pub other: String,
}

impl BusinessQuery {
    pub fn new(services: impl Into<String>) -> Self {
        Self {
            services: services.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_specialties(mut self, specialties: impl Into<String>) -> Self {
        self.specialties = specialties.into();
        self
    }

    pub fn with_other(mut self, other: impl Into<String>) -> Self {
        self.other = other.into();
        self
    }

    pub fn has_services(&self) -> bool {
        !self.services.trim().is_empty()
    }

    /// Free-text description handed to the code matcher and profile drafter.
    pub fn description(&self) -> String {
        format!(
            "Main Services: {}. Specialties: {}. Other Details: {}.",
            self.services, self.specialties, self.other
        )
    }
}

/// An open solicitation scraped from the portal. The title is the join key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solicitation {
    pub title: String,
    pub url: String,
}

impl Solicitation {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub codes: Vec<CommodityCode>,
    pub rfps: Vec<Solicitation>,
    pub profile: String,
}
