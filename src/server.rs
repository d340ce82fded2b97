use axum::{
    extract::{Query, State},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::dataset::DatasetClient;
use crate::filter::select_trucks;
use crate::models::TrucksResponse;
use crate::query::TruckQuery;
use crate::template_engine::TemplateEngine;

pub const DATASET_UNAVAILABLE: &str = "Unable to load food truck data. Try again later.";

pub struct AppState {
    pub template_engine: TemplateEngine,
    pub config: Config,
    pub datasets: DatasetClient,
}

pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(state.config.static_dir());
    Router::new()
        .route("/", get(index))
        .route("/trucks", get(get_trucks))
        .nest_service("/static", static_files)
        .fallback(not_found)
        .layer(middleware::from_fn(log_request_response))
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = state.config.listen_addr.clone();
    let app = router(state);
    info!("listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn log_request_response(
    req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let method = req.method().to_string();
    info!("incoming request: {} {}", method, path);
    let response = next.run(req).await;
    info!("request result: {} for {} {}", response.status(), method, path);
    response
}

// --- Handlers ---

async fn index(State(state): State<Arc<AppState>>) -> Response {
    let mut context = tera::Context::new();
    context.insert("api_key", &state.config.maps_api_key);
    context.insert("center", &state.config.map.center);
    context.insert("zoom", &state.config.map.zoom);
    context.insert("geo_zoom", &state.config.map.geo_zoom);
    context.insert("categories", &state.config.categories);
    match state.template_engine.render("index", &context) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("index render error: {}", e);
            error_page(&state, StatusCode::INTERNAL_SERVER_ERROR, "The map page could not be rendered.")
        }
    }
}

async fn get_trucks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let query = match TruckQuery::from_params(&params) {
        Ok(q) => q,
        Err(e) => {
            warn!("rejected trucks query: {}", e);
            return json_error(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    let permits = match state.datasets.fetch_permits().await {
        Ok(p) => p,
        Err(e) => {
            error!("Error - unable to load the dataset {}: {:#}", state.datasets.url(), e);
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, DATASET_UNAVAILABLE);
        }
    };

    let trucks = select_trucks(&permits, &query);
    info!("{} of {} permits match {}", trucks.len(), permits.len(), query.to_query_string());
    Json(TrucksResponse::Trucks { resp: trucks }).into_response()
}

async fn not_found(State(state): State<Arc<AppState>>) -> Response {
    error_page(&state, StatusCode::NOT_FOUND, "The requested URL was not found on the server.")
}

// --- Helper Functions ---

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(TrucksResponse::error(message, status.as_u16()))).into_response()
}

fn error_page(state: &AppState, status: StatusCode, description: &str) -> Response {
    let mut context = tera::Context::new();
    context.insert("status", &status.as_u16());
    context.insert("reason", &status.canonical_reason().unwrap_or("Error").to_uppercase());
    context.insert("description", description);
    match state.template_engine.render("error", &context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("error page render error: {}", e);
            (status, description.to_string()).into_response()
        }
    }
}
