use serde::{Deserialize, Serialize};

use crate::validation::{
    optional_email, optional_french_phone, optional_text, required_text, Validate, ValidationErrors,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClientInput {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl Validate for ClientInput {
    type Output = Client;

    fn validate(&self) -> Result<Client, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let client = Client {
            first_name: required_text(&mut errors, "first_name", &self.first_name, 1, 50),
            last_name: required_text(&mut errors, "last_name", &self.last_name, 1, 50),
            email: optional_email(&mut errors, "email", self.email.as_deref()),
            phone: optional_french_phone(&mut errors, "phone", self.phone.as_deref()),
            notes: optional_text(&mut errors, "notes", self.notes.as_deref(), 1000),
        };

        // A quote has to reach the client somehow.
        if client.email.is_none() && client.phone.is_none() {
            errors.add("email", "Indiquez au moins un e-mail ou un téléphone.");
        }

        errors.into_result(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_normalizes() {
        let input = ClientInput {
            first_name: " Camille ".into(),
            last_name: "Durand".into(),
            phone: Some("+33 6 11 22 33 44".into()),
            notes: Some("   ".into()),
            ..Default::default()
        };
        let client = input.validate().unwrap();
        assert_eq!(client.first_name, "Camille");
        assert_eq!(client.phone.as_deref(), Some("0611223344"));
        assert_eq!(client.notes, None);
    }

    #[test]
    fn requires_a_contact_channel() {
        let input = ClientInput {
            first_name: "Camille".into(),
            last_name: "Durand".into(),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email"]);
    }

    #[test]
    fn reports_every_invalid_field() {
        let input = ClientInput {
            email: Some("pas-un-email".into()),
            phone: Some("12345".into()),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        for field in ["first_name", "last_name", "email", "phone"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let input: ClientInput = serde_json::from_str(r#"{"first_name": "Léa"}"#).unwrap();
        assert_eq!(input.first_name, "Léa");
        assert!(input.last_name.is_empty());
        assert!(input.validate().is_err());
    }
}
