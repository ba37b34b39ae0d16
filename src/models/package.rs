use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{amount_cents, optional_text, required_text, Validate, ValidationErrors};

pub const MAX_SERVICES_PER_PACKAGE: usize = 20;

/// Several catalog services sold together at one price.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PackageInput {
    pub name: String,
    pub description: Option<String>,
    pub service_ids: Vec<Uuid>,
    pub price_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub name: String,
    pub description: Option<String>,
    pub service_ids: Vec<Uuid>,
    pub price_cents: i64,
}

impl Validate for PackageInput {
    type Output = Package;

    fn validate(&self) -> Result<Package, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.service_ids.is_empty() {
            errors.add("service_ids", "Un forfait doit contenir au moins une prestation.");
        } else if self.service_ids.len() > MAX_SERVICES_PER_PACKAGE {
            errors.add(
                "service_ids",
                format!("Un forfait ne peut pas contenir plus de {MAX_SERVICES_PER_PACKAGE} prestations."),
            );
        }
        let mut seen = HashSet::new();
        if !self.service_ids.iter().all(|id| seen.insert(id)) {
            errors.add("service_ids", "Une prestation ne peut apparaître qu'une fois dans un forfait.");
        }

        let package = Package {
            name: required_text(&mut errors, "name", &self.name, 2, 100),
            description: optional_text(&mut errors, "description", self.description.as_deref(), 500),
            service_ids: self.service_ids.clone(),
            price_cents: amount_cents(&mut errors, "price_cents", self.price_cents),
        };

        errors.into_result(package)
    }
}
