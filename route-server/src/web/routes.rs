//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::StopName;
use crate::planner::{SearchError, SearchRequest};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stops", get(list_stops))
        .route("/route", get(plan_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the numbered stop list and route form.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let template = IndexTemplate {
        stops: StopView::list(state.planner.network().stops()),
        default_penalty: state.planner.config().transfer_penalty,
    };

    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// List all stops, sorted by name.
async fn list_stops(State(state): State<AppState>) -> Json<StopListResponse> {
    let stops = state
        .planner
        .network()
        .stops()
        .into_iter()
        .map(ToString::to_string)
        .collect();

    Json(StopListResponse { stops })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan a route between two stops.
///
/// Unknown stops are not an error: the response simply reports that no
/// route was found.
async fn plan_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<RouteQuery>,
) -> Result<Response, AppError> {
    let origin = parse_stop(req.origin.as_deref(), "Origin")?;
    let destination = parse_stop(req.destination.as_deref(), "Destination")?;

    let penalty = match req.penalty.as_deref().map(str::trim) {
        None | Some("") => state.planner.config().transfer_penalty,
        Some(raw) => raw.parse().map_err(|_| AppError::BadRequest {
            message: format!("Invalid penalty: {raw}"),
        })?,
    };

    let request = SearchRequest::new(origin.clone(), destination.clone())
        .with_transfer_penalty(penalty);
    let result = state.planner.plan(request).await?;

    let response = RouteResponse::from_route(
        origin.as_str(),
        destination.as_str(),
        penalty,
        result.route.as_ref(),
    );

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = RouteResultTemplate {
            route: RouteView::from_response(&response),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(response).into_response())
    }
}

/// Parse a required stop parameter.
fn parse_stop(raw: Option<&str>, label: &str) -> Result<StopName, AppError> {
    StopName::parse(raw.unwrap_or_default()).map_err(|_| AppError::BadRequest {
        message: format!("{label} stop must not be empty"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Timeout | SearchError::ExpansionLimit { .. } => AppError::Unavailable {
                message: e.to_string(),
            },
            SearchError::Cancelled | SearchError::Worker(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Rejected request");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
