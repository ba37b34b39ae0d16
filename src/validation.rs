//! Field rules shared by the request schemas.
//!
//! Every rule records its failures in a [`ValidationErrors`] and returns the
//! normalized value anyway, so a schema can check all of its fields in one
//! pass and report every problem at once.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap();
    // 0X XXXXXXXX, +33 X XXXXXXXX or 0033 X XXXXXXXX once separators are stripped.
    static ref PHONE_RE: Regex = Regex::new(r"^(?:(?:\+|00)33|0)([1-9]\d{8})$").unwrap();
    // Metropolitan departments 01-95 (Corsica is 20), overseas 97x and 98x.
    static ref POSTAL_CODE_RE: Regex = Regex::new(r"^(?:0[1-9]|[1-8]\d|9[0-8])\d{3}$").unwrap();
    static ref SIRET_RE: Regex = Regex::new(r"^\d{14}$").unwrap();
}

pub const EMAIL_MAX_LEN: usize = 254;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 128;
pub const MAX_AMOUNT_CENTS: i64 = 1_000_000;

/// Field name → French error messages, in field order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{} champ(s) invalide(s)", .0.len())]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// A request payload that checks itself and produces its normalized form.
pub trait Validate {
    type Output: Serialize;

    fn validate(&self) -> Result<Self::Output, ValidationErrors>;
}

/// Trims and enforces a length range in characters.
pub fn required_text(errors: &mut ValidationErrors, field: &str, value: &str, min: usize, max: usize) -> String {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len == 0 {
        errors.add(field, "Ce champ est requis.");
    } else if len < min {
        errors.add(field, format!("Ce champ doit contenir au moins {min} caractères."));
    } else if len > max {
        errors.add(field, format!("Ce champ ne doit pas dépasser {max} caractères."));
    }
    trimmed.to_string()
}

/// Blank values become `None`.
pub fn optional_text(errors: &mut ValidationErrors, field: &str, value: Option<&str>, max: usize) -> Option<String> {
    let trimmed = value.map(str::trim).filter(|s| !s.is_empty())?;
    if trimmed.chars().count() > max {
        errors.add(field, format!("Ce champ ne doit pas dépasser {max} caractères."));
    }
    Some(trimmed.to_string())
}

/// Lowercased email address.
pub fn email(errors: &mut ValidationErrors, field: &str, value: &str) -> String {
    let normalized = value.trim().to_lowercase();
    if normalized.is_empty() {
        errors.add(field, "L'adresse e-mail est requise.");
    } else if normalized.chars().count() > EMAIL_MAX_LEN || !EMAIL_RE.is_match(&normalized) {
        errors.add(field, "Adresse e-mail invalide.");
    }
    normalized
}

pub fn optional_email(errors: &mut ValidationErrors, field: &str, value: Option<&str>) -> Option<String> {
    let value = value.map(str::trim).filter(|s| !s.is_empty())?;
    Some(email(errors, field, value))
}

/// French phone number, normalized to ten digits starting with 0.
pub fn french_phone(errors: &mut ValidationErrors, field: &str, value: &str) -> String {
    let compact: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-'))
        .collect();
    if compact.is_empty() {
        errors.add(field, "Le numéro de téléphone est requis.");
        return compact;
    }
    match PHONE_RE.captures(&compact) {
        Some(caps) => format!("0{}", &caps[1]),
        None => {
            errors.add(field, "Numéro de téléphone invalide (ex : 06 12 34 56 78).");
            compact
        }
    }
}

pub fn optional_french_phone(errors: &mut ValidationErrors, field: &str, value: Option<&str>) -> Option<String> {
    let value = value.map(str::trim).filter(|s| !s.is_empty())?;
    Some(french_phone(errors, field, value))
}

pub fn french_postal_code(errors: &mut ValidationErrors, field: &str, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, "Le code postal est requis.");
    } else if !POSTAL_CODE_RE.is_match(trimmed) {
        errors.add(field, "Code postal invalide (5 chiffres).");
    }
    trimmed.to_string()
}

/// SIRET number with spaces removed.
pub fn siret(errors: &mut ValidationErrors, field: &str, value: &str) -> String {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        errors.add(field, "Le numéro SIRET est requis.");
    } else if !SIRET_RE.is_match(&compact) {
        errors.add(field, "Le numéro SIRET doit contenir 14 chiffres.");
    }
    compact
}

/// At least one lowercase letter, one uppercase letter, one digit and one special character.
pub fn password(errors: &mut ValidationErrors, field: &str, value: &str) {
    let len = value.chars().count();
    if len < PASSWORD_MIN_LEN {
        errors.add(field, format!("Le mot de passe doit contenir au moins {PASSWORD_MIN_LEN} caractères."));
    } else if len > PASSWORD_MAX_LEN {
        errors.add(field, format!("Le mot de passe ne doit pas dépasser {PASSWORD_MAX_LEN} caractères."));
    }
    if !value.chars().any(char::is_lowercase) {
        errors.add(field, "Le mot de passe doit contenir une minuscule.");
    }
    if !value.chars().any(char::is_uppercase) {
        errors.add(field, "Le mot de passe doit contenir une majuscule.");
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        errors.add(field, "Le mot de passe doit contenir un chiffre.");
    }
    if !value.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace()) {
        errors.add(field, "Le mot de passe doit contenir un caractère spécial.");
    }
}

pub fn website(errors: &mut ValidationErrors, field: &str, value: Option<&str>) -> Option<String> {
    let trimmed = optional_text(errors, field, value, 200)?;
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) || trimmed.contains(char::is_whitespace) {
        errors.add(field, "L'adresse du site doit commencer par http:// ou https://.");
    }
    Some(trimmed)
}

pub fn amount_cents(errors: &mut ValidationErrors, field: &str, value: i64) -> i64 {
    if value < 0 {
        errors.add(field, "Le montant ne peut pas être négatif.");
    } else if value > MAX_AMOUNT_CENTS {
        errors.add(field, "Le montant est trop élevé.");
    }
    value
}

pub fn percentage(errors: &mut ValidationErrors, field: &str, value: u32) -> u32 {
    if value > 100 {
        errors.add(field, "Le pourcentage doit être compris entre 0 et 100.");
    }
    value
}

/// Between 5 minutes and 12 hours, in 5-minute steps.
pub fn duration_minutes(errors: &mut ValidationErrors, field: &str, value: u32) -> u32 {
    if !(5..=720).contains(&value) {
        errors.add(field, "La durée doit être comprise entre 5 minutes et 12 heures.");
    } else if value % 5 != 0 {
        errors.add(field, "La durée doit être un multiple de 5 minutes.");
    }
    value
}
