use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::validation::Validate;

/// POST /validate/{kind} — checks a form payload and returns its normalized form.
///
/// Unparseable JSON is a 400; a well-formed payload with invalid fields is a 422
/// listing every field in error.
pub async fn validate_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)>
where
    T: Validate + DeserializeOwned,
{
    let Json(input) = payload.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Requête invalide : {}", e.body_text()) })),
        )
    })?;

    let output = input.validate().map_err(|errors| {
        debug!("Validation rejected {} field(s): {:?}", errors.len(), errors.fields().collect::<Vec<_>>());
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "Données invalides", "fields": errors })),
        )
    })?;

    let data = serde_json::to_value(output).map_err(|e| {
        error!("Failed to serialize validated payload: {e}");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Erreur interne" })))
    })?;

    Ok(Json(json!({ "valid": true, "data": data })))
}
