use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{models::announcement::LastSeenQuery, AppState};

fn last_seen(
    query: Result<Query<LastSeenQuery>, QueryRejection>,
) -> Result<LastSeenQuery, (StatusCode, Json<Value>)> {
    query.map(|Query(q)| q).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Paramètre last_seen_at invalide : {e}") })),
        )
    })
}

/// GET /announcements — full list for the dropdown, each entry flagged `is_new`.
pub async fn list_announcements(
    State(state): State<AppState>,
    query: Result<Query<LastSeenQuery>, QueryRejection>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let LastSeenQuery { last_seen_at } = last_seen(query)?;
    let feed = &state.announcements;

    Ok(Json(json!({
        "has_unseen": feed.has_unseen(last_seen_at),
        "unseen_count": feed.unseen_count(last_seen_at),
        "announcements": feed.visible(last_seen_at),
    })))
}

/// GET /announcements/unseen — badge of the notification bell.
pub async fn unseen_summary(
    State(state): State<AppState>,
    query: Result<Query<LastSeenQuery>, QueryRejection>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let LastSeenQuery { last_seen_at } = last_seen(query)?;
    let feed = &state.announcements;

    Ok(Json(json!({
        "has_unseen": feed.has_unseen(last_seen_at),
        "unseen_count": feed.unseen_count(last_seen_at),
    })))
}
