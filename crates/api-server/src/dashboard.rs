use axum::response::Html;
use rust_embed::Embed;

use crate::AppError;

#[derive(Embed)]
#[folder = "dashboard/"]
pub struct DashboardAssets;

/// Serve the single-page dashboard.
pub async fn index() -> Result<Html<String>, AppError> {
    let page = DashboardAssets::get("index.html")
        .ok_or_else(|| anyhow::anyhow!("dashboard asset index.html is missing"))?;
    Ok(Html(String::from_utf8_lossy(&page.data).into_owned()))
}
