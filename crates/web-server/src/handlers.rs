use crate::{AppState, error::AppError, html};
use analytics::AnalyticsReport;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use core_types::{Metric, PriceSeries};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Decimal places numeric payloads are rounded to.
pub const DISPLAY_DECIMALS: i32 = 6;

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    /// Kept as text so a bad value gets our own 400 message.
    rows: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    /// Kept as text for the same reason as `rows`. Absent means `true`.
    annualize: Option<String>,
}

impl AnalyticsQuery {
    fn annualize(&self) -> Result<bool, AppError> {
        match self.annualize.as_deref().map(str::trim) {
            None => Ok(true),
            Some(raw) if raw.eq_ignore_ascii_case("true") || raw == "1" => Ok(true),
            Some(raw) if raw.eq_ignore_ascii_case("false") || raw == "0" => Ok(false),
            Some(_) => Err(AppError::BadRequest(
                "Invalid `annualize` parameter; must be true or false".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Loads a fresh copy of the series off the async runtime.
async fn load_series(state: &AppState) -> Result<PriceSeries, AppError> {
    let source = Arc::clone(&state.source);
    let series = tokio::task::spawn_blocking(move || source.load()).await??;
    Ok(series)
}

/// `head(n)` semantics: a negative `n` keeps all but the last `|n|` records.
fn limit_rows(series: &PriceSeries, rows: i64) -> PriceSeries {
    let len = series.len();
    let keep = if rows >= 0 {
        usize::try_from(rows).unwrap_or(usize::MAX).min(len)
    } else {
        let drop = usize::try_from(rows.unsigned_abs()).unwrap_or(usize::MAX);
        len.saturating_sub(drop)
    };
    series.head(keep)
}

/// # GET /
pub async fn index() -> Html<String> {
    Html(html::render_index())
}

/// # GET /data?rows=N
/// Renders the price history as an HTML table, optionally limited to `rows` rows.
pub async fn data_table(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PreviewQuery>,
) -> Result<Html<String>, AppError> {
    let rows = match query.rows.as_deref() {
        Some(raw) => Some(raw.trim().parse::<i64>().map_err(|_| {
            AppError::BadRequest("Invalid `rows` parameter; must be an integer".to_string())
        })?),
        None => state.default_preview_rows.and_then(|n| i64::try_from(n).ok()),
    };

    let series = load_series(&state).await?;
    let shown = match rows {
        Some(n) => limit_rows(&series, n),
        None => series,
    };
    Ok(Html(html::render_price_table(&shown)))
}

/// # GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// # GET /api/analytics/:metric
/// Runs one metric over the three thirds of the history and returns the
/// numeric series, rounded for display.
pub async fn get_analytics(
    Path(metric): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsReport>, AppError> {
    let metric: Metric = metric
        .parse()
        .map_err(|e: core_types::CoreError| AppError::NotFound(e.to_string()))?;
    let annualize = query.annualize()?;

    let series = load_series(&state).await?;
    let report = state.engine.run(&series, metric, annualize);
    tracing::info!(
        %metric,
        records = series.len(),
        points = report.total_points(),
        "Computed analytics report."
    );

    Ok(Json(report.rounded(DISPLAY_DECIMALS)))
}
