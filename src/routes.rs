//! HTTP surface: dashboard page, its JSON twin, and a health probe.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::domain::insights::DashboardInsights;
use crate::session::SessionProvider;
use crate::shopify::AdminClient;
use crate::view::{render_dashboard, ViewState};
use crate::InsightsError;

#[derive(Clone)]
pub struct AppState {
    pub client: AdminClient,
    pub sessions: Arc<dyn SessionProvider>,
    /// Browser origins allowed to read responses cross-site. Empty allows none.
    pub allowed_origins: Vec<HeaderValue>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(state.allowed_origins.clone()))
        .allow_methods([Method::GET]);
    Router::new()
        .route("/health", get(health))
        .route("/", get(dashboard_page))
        .route("/api/v1/dashboard", get(dashboard_json))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub view: Option<String>,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy", "service": "merchant-insights", "time": Utc::now()}))
}

async fn dashboard_page(
    State(s): State<AppState>,
    headers: HeaderMap,
    Query(p): Query<DashboardParams>,
) -> Result<Html<String>, InsightsError> {
    let insights = load_insights(&s, &headers).await?;
    let view = ViewState::from_query(p.view.as_deref());
    Ok(Html(render_dashboard(&insights, view)?))
}

async fn dashboard_json(State(s): State<AppState>, headers: HeaderMap) -> Result<Json<DashboardInsights>, InsightsError> {
    load_insights(&s, &headers).await.map(Json)
}

/// Session lookup, the three fetches, then the rankings.
async fn load_insights(s: &AppState, headers: &HeaderMap) -> Result<DashboardInsights, InsightsError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("dashboard_load", %request_id);
    async {
        let session = s.sessions.session_for(headers).await?;
        let resources = s.client.fetch_all(&session).await?;
        info!(
            shop = %session.shop,
            products = resources.products.len(),
            customers = resources.customers.len(),
            orders = resources.orders.len(),
            "resources fetched"
        );
        Ok(DashboardInsights::compute(&resources.orders, resources.products, resources.customers))
    }
    .instrument(span)
    .await
}

impl InsightsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingSession | Self::InvalidSession(_) => StatusCode::UNAUTHORIZED,
            Self::Transport { .. } | Self::UpstreamStatus { .. } | Self::Decode { .. } => StatusCode::BAD_GATEWAY,
            Self::Render(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for InsightsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        warn!(error = %self, status = status.as_u16(), "dashboard load failed");
        (status, Json(serde_json::json!({"error": self.to_string()}))).into_response()
    }
}
