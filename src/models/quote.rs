use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{
    amount_cents, optional_text, percentage, required_text, Validate, ValidationErrors,
};

pub const MAX_ITEMS_PER_QUOTE: usize = 50;
pub const MAX_ITEM_QUANTITY: u32 = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuoteItemInput {
    pub label: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuoteInput {
    pub client_id: Option<Uuid>,
    pub valid_until: Option<NaiveDate>,
    pub items: Vec<QuoteItemInput>,
    pub discount_percent: Option<u32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteItem {
    pub label: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub client_id: Uuid,
    pub valid_until: NaiveDate,
    pub items: Vec<QuoteItem>,
    pub discount_percent: u32,
    pub notes: Option<String>,
    pub subtotal_cents: i64,
    /// Rounded down so the client is never charged a fraction of a cent more.
    pub discount_cents: i64,
    pub total_cents: i64,
}

impl QuoteInput {
    /// Validates against a given calendar day; `valid_until` may be today but not earlier.
    pub fn validate_at(&self, today: NaiveDate) -> Result<Quote, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let client_id = self.client_id.unwrap_or_else(|| {
            errors.add("client_id", "Sélectionnez une cliente.");
            Uuid::nil()
        });

        let valid_until = match self.valid_until {
            None => {
                errors.add("valid_until", "La date de validité est requise.");
                today
            }
            Some(date) if date < today => {
                errors.add("valid_until", "La date de validité ne peut pas être dans le passé.");
                date
            }
            Some(date) => date,
        };

        if self.items.is_empty() {
            errors.add("items", "Un devis doit contenir au moins une ligne.");
        } else if self.items.len() > MAX_ITEMS_PER_QUOTE {
            errors.add(
                "items",
                format!("Un devis ne peut pas contenir plus de {MAX_ITEMS_PER_QUOTE} lignes."),
            );
        }

        let items: Vec<QuoteItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let label = required_text(&mut errors, &format!("items[{i}].label"), &item.label, 1, 200);
                if item.quantity == 0 || item.quantity > MAX_ITEM_QUANTITY {
                    errors.add(
                        format!("items[{i}].quantity"),
                        format!("La quantité doit être comprise entre 1 et {MAX_ITEM_QUANTITY}."),
                    );
                }
                let unit_price_cents =
                    amount_cents(&mut errors, &format!("items[{i}].unit_price_cents"), item.unit_price_cents);
                QuoteItem {
                    label,
                    quantity: item.quantity,
                    unit_price_cents,
                    // Out-of-range inputs are already in `errors`; saturate rather than overflow.
                    line_total_cents: unit_price_cents.saturating_mul(i64::from(item.quantity)),
                }
            })
            .collect();

        let discount_percent = percentage(&mut errors, "discount_percent", self.discount_percent.unwrap_or(0));
        let notes = optional_text(&mut errors, "notes", self.notes.as_deref(), 2000);

        let subtotal_cents = items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.line_total_cents));
        let discount_cents = subtotal_cents.saturating_mul(i64::from(discount_percent)) / 100;

        errors.into_result(Quote {
            client_id,
            valid_until,
            items,
            discount_percent,
            notes,
            subtotal_cents,
            discount_cents,
            total_cents: subtotal_cents.saturating_sub(discount_cents),
        })
    }
}

impl Validate for QuoteInput {
    type Output = Quote;

    fn validate(&self) -> Result<Quote, ValidationErrors> {
        self.validate_at(Utc::now().date_naive())
    }
}
