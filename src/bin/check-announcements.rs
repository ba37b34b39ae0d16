//! Check an announcement catalog before deploying it
//!
//! Usage: check-announcements [--file PATH] [--last-seen-at RFC3339]
//!   --file PATH            : JSON catalog to check (built-in list if not specified)
//!   --last-seen-at RFC3339 : Also report what a viewer who last opened the panel then would see

use chrono::{DateTime, Utc};
use clap::Parser;
use salon_devis_api::services::announcements::AnnouncementFeed;

#[derive(Parser)]
#[command(name = "check-announcements", about = "Validate an announcement catalog")]
struct Args {
    /// JSON file holding the announcements, newest first
    #[arg(long)]
    file: Option<String>,

    /// Viewer's last-seen timestamp (RFC 3339)
    #[arg(long)]
    last_seen_at: Option<DateTime<Utc>>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let feed = match &args.file {
        Some(path) => AnnouncementFeed::from_json_file(path)?,
        None => AnnouncementFeed::builtin()?,
    };

    tracing::info!("Catalog OK: {} announcements", feed.len());
    if let Some(newest) = feed.newest() {
        tracing::info!("Newest: {} ({})", newest.id, newest.published_at.to_rfc3339());
    }

    let viewer = args
        .last_seen_at
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "never".into());
    tracing::info!(
        "Viewer last seen {}: {} unseen",
        viewer,
        feed.unseen_count(args.last_seen_at)
    );
    for entry in feed.visible(args.last_seen_at) {
        println!(
            "{} {} {}",
            if entry.is_new { "*" } else { " " },
            entry.record.published_at.format("%Y-%m-%d"),
            entry.record.title
        );
    }

    Ok(())
}
