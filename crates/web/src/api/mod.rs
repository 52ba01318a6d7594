use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use directory::{
    category::{self, CategoryConfig},
    describe::{backfill_descriptions, BackfillReport},
    pipeline::{run_import, ImportReport},
};
use serde::Serialize;
use serde_json::json;

use crate::{
    common::{route_not_found, RouteErrorResponse},
    RouteResult, WebState,
};

pub fn routes(state: WebState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/data/:category", get(import_category))
        .route("/description/:category", get(backfill_category))
        .with_state(state)
        .fallback(route_not_found)
}

async fn ping() -> impl IntoResponse {
    Json(json!({
        "message": "pong!"
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportDto {
    category: &'static str,
    table: &'static str,
    report: ImportReport,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BackfillDto {
    category: &'static str,
    table: &'static str,
    report: BackfillReport,
}

fn lookup(category: &str) -> RouteResult<&'static CategoryConfig> {
    category::find(category).ok_or_else(|| {
        RouteErrorResponse::new(StatusCode::NOT_FOUND)
            .with_message(format!("unknown category '{category}'"))
    })
}

/// Runs one batch import for the requested category.
async fn import_category(
    State(state): State<WebState>,
    Path(category): Path<String>,
) -> RouteResult<Json<ImportDto>> {
    let config = lookup(&category)?;

    let mut store = state.database.clone();
    let report = run_import(&mut store, state.places.as_ref(), config).await?;

    Ok(Json(ImportDto {
        category: config.slug,
        table: config.table,
        report,
    }))
}

/// Backfills missing descriptions for the requested category's table.
async fn backfill_category(
    State(state): State<WebState>,
    Path(category): Path<String>,
) -> RouteResult<Json<BackfillDto>> {
    let config = lookup(&category)?;

    let mut store = state.database.clone();
    let report =
        backfill_descriptions(&mut store, state.openai.as_ref(), config).await?;

    Ok(Json(BackfillDto {
        category: config.slug,
        table: config.table,
        report,
    }))
}
