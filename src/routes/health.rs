use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "announcements": state.announcements.len() })),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{config::Config, services::announcements::AnnouncementFeed};

    #[tokio::test]
    async fn reports_catalog_size() {
        let feed = AnnouncementFeed::builtin().unwrap();
        let expected = feed.len();
        let state = AppState {
            config: Arc::new(Config {
                host: "127.0.0.1".into(),
                port: 0,
                app_base_url: "http://localhost".into(),
                announcements_path: None,
            }),
            announcements: Arc::new(feed),
        };

        let (status, Json(body)) = health_check(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok", "announcements": expected }));
    }
}
