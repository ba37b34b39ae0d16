use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use salon_devis_api::{
    config::Config,
    models::{
        business::BusinessInput, client::ClientInput, contact::ContactInput, package::PackageInput,
        quote::QuoteInput, service::ServiceInput, signup::SignupInput,
    },
    routes,
    services::announcements::AnnouncementFeed,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    let announcements = match &config.announcements_path {
        Some(path) => AnnouncementFeed::from_json_file(path)?,
        None => AnnouncementFeed::builtin()?,
    };
    info!("{} announcements loaded", announcements.len());

    let state = AppState {
        config: config.clone(),
        announcements: Arc::new(announcements),
    };

    // Allow the site's base domain and its subdomains; localhost is always allowed.
    let cors_origin = {
        let config = config.clone();
        AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|o| config.is_allowed_origin(o))
                .unwrap_or(false)
        })
    };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_origin(cors_origin);

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        // Announcements
        .route("/announcements", get(routes::announcements::list_announcements))
        .route("/announcements/unseen", get(routes::announcements::unseen_summary))
        // Form validation
        .route("/validate/client", post(routes::validate::validate_payload::<ClientInput>))
        .route("/validate/business", post(routes::validate::validate_payload::<BusinessInput>))
        .route("/validate/service", post(routes::validate::validate_payload::<ServiceInput>))
        .route("/validate/package", post(routes::validate::validate_payload::<PackageInput>))
        .route("/validate/quote", post(routes::validate::validate_payload::<QuoteInput>))
        .route("/validate/signup", post(routes::validate::validate_payload::<SignupInput>))
        .route("/validate/contact", post(routes::validate::validate_payload::<ContactInput>))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(256 * 1024))
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("salon-devis API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
