use serde::{Deserialize, Serialize};

use crate::validation::{
    amount_cents, duration_minutes, optional_text, required_text, Validate, ValidationErrors,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Hair,
    Nails,
    Skin,
    Makeup,
    Massage,
    HairRemoval,
    Other,
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ServiceCategory::Hair => "hair",
            ServiceCategory::Nails => "nails",
            ServiceCategory::Skin => "skin",
            ServiceCategory::Makeup => "makeup",
            ServiceCategory::Massage => "massage",
            ServiceCategory::HairRemoval => "hair_removal",
            ServiceCategory::Other => "other",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ServiceCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hair" => Ok(ServiceCategory::Hair),
            "nails" => Ok(ServiceCategory::Nails),
            "skin" => Ok(ServiceCategory::Skin),
            "makeup" => Ok(ServiceCategory::Makeup),
            "massage" => Ok(ServiceCategory::Massage),
            "hair_removal" => Ok(ServiceCategory::HairRemoval),
            "other" => Ok(ServiceCategory::Other),
            _ => Err(anyhow::anyhow!("Unknown service category: {s}")),
        }
    }
}

/// A line of the salon's catalog (haircut, manicure...).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServiceInput {
    pub name: String,
    pub description: Option<String>,
    /// Parsed by hand so an unknown value is reported as a field error.
    pub category: String,
    pub price_cents: i64,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub name: String,
    pub description: Option<String>,
    pub category: ServiceCategory,
    pub price_cents: i64,
    pub duration_minutes: u32,
}

impl Validate for ServiceInput {
    type Output = Service;

    fn validate(&self) -> Result<Service, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let category: ServiceCategory = self.category.trim().parse().unwrap_or_else(|_| {
            errors.add("category", "Catégorie de prestation invalide.");
            ServiceCategory::Other
        });

        let service = Service {
            name: required_text(&mut errors, "name", &self.name, 2, 100),
            description: optional_text(&mut errors, "description", self.description.as_deref(), 500),
            category,
            price_cents: amount_cents(&mut errors, "price_cents", self.price_cents),
            duration_minutes: duration_minutes(&mut errors, "duration_minutes", self.duration_minutes),
        };

        errors.into_result(service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_service() {
        let input: ServiceInput = serde_json::from_str(
            r#"{"name": "Balayage", "category": "hair", "price_cents": 8500, "duration_minutes": 120}"#,
        )
        .unwrap();
        let service = input.validate().unwrap();
        assert_eq!(service.category, ServiceCategory::Hair);
        assert_eq!(service.description, None);
    }

    #[test]
    fn unknown_category_is_a_field_error() {
        let input = ServiceInput {
            name: "Balayage".into(),
            category: "tattoo".into(),
            price_cents: 8500,
            duration_minutes: 120,
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["category"]);
    }

    #[test]
    fn category_round_trips_through_display() {
        let category: ServiceCategory = "hair_removal".parse().unwrap();
        assert_eq!(category.to_string(), "hair_removal");
        assert_eq!(serde_json::to_value(category).unwrap(), "hair_removal");
    }

    #[test]
    fn missing_duration_is_rejected() {
        let input = ServiceInput {
            name: "Manucure".into(),
            category: "nails".into(),
            price_cents: 2500,
            ..Default::default()
        };
        assert!(input.validate().unwrap_err().contains("duration_minutes"));
    }
}
