use serde::{Deserialize, Serialize};

use crate::validation::{email, password, required_text, Validate, ValidationErrors};

/// Account creation form of the marketing site.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupInput {
    pub business_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub terms_accepted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signup {
    pub business_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl Validate for SignupInput {
    type Output = Signup;

    fn validate(&self) -> Result<Signup, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        password(&mut errors, "password", &self.password);
        if self.password != self.password_confirmation {
            errors.add("password_confirmation", "Les mots de passe ne correspondent pas.");
        }
        if !self.terms_accepted {
            errors.add("terms_accepted", "Vous devez accepter les conditions d'utilisation.");
        }

        let signup = Signup {
            business_name: required_text(&mut errors, "business_name", &self.business_name, 2, 100),
            first_name: required_text(&mut errors, "first_name", &self.first_name, 1, 50),
            last_name: required_text(&mut errors, "last_name", &self.last_name, 1, 50),
            email: email(&mut errors, "email", &self.email),
            password: self.password.clone(),
        };

        errors.into_result(signup)
    }
}
