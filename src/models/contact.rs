use serde::{Deserialize, Serialize};

use crate::validation::{
    email, optional_french_phone, optional_text, required_text, Validate, ValidationErrors,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub salon_name: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub salon_name: Option<String>,
    pub message: String,
}

impl Validate for ContactInput {
    type Output = ContactMessage;

    fn validate(&self) -> Result<ContactMessage, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let contact = ContactMessage {
            name: required_text(&mut errors, "name", &self.name, 2, 100),
            email: email(&mut errors, "email", &self.email),
            phone: optional_french_phone(&mut errors, "phone", self.phone.as_deref()),
            salon_name: optional_text(&mut errors, "salon_name", self.salon_name.as_deref(), 100),
            message: required_text(&mut errors, "message", &self.message, 10, 2000),
        };

        errors.into_result(contact)
    }
}
