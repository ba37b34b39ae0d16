use serde::{Deserialize, Serialize};

use crate::validation::{
    email, french_phone, french_postal_code, required_text, siret, website, Validate, ValidationErrors,
};

/// The salon issuing the quotes, as printed in their header.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BusinessInput {
    pub name: String,
    pub siret: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Business {
    pub name: String,
    pub siret: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
}

impl Validate for BusinessInput {
    type Output = Business;

    fn validate(&self) -> Result<Business, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let business = Business {
            name: required_text(&mut errors, "name", &self.name, 2, 100),
            siret: siret(&mut errors, "siret", &self.siret),
            address: required_text(&mut errors, "address", &self.address, 5, 200),
            postal_code: french_postal_code(&mut errors, "postal_code", &self.postal_code),
            city: required_text(&mut errors, "city", &self.city, 2, 100),
            phone: french_phone(&mut errors, "phone", &self.phone),
            email: email(&mut errors, "email", &self.email),
            website: website(&mut errors, "website", self.website.as_deref()),
        };

        errors.into_result(business)
    }
}
