//! Token generation API: turns a raw upstream calendar URL into a sealed
//! subscription link.

use calveil_core::constants::{CALENDAR_FILE_NAME, GENERATE_ROUTE_COMPONENT, VIEW_ROUTE_COMPONENT};
use calveil_service::{token, upstream};
use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};

use crate::config::get_config_from_depot;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(GENERATE_ROUTE_COMPONENT).get(generate)
}

/// ## Summary
/// Validates the submitted calendar URL, seals it into a token, and
/// returns the subscription link.
///
/// ## Errors
/// Renders 400 with a JSON error body when the URL is missing, malformed,
/// uses a forbidden protocol, or points at an unauthorized host.
#[handler]
#[tracing::instrument(skip(req, res, depot))]
pub async fn generate(req: &mut Request, res: &mut Response, depot: &Depot) {
    let Ok(settings) = get_config_from_depot(depot) else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let Some(target) = req.query::<String>("url") else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(serde_json::json!({ "error": "Missing URL" })));
        return;
    };

    let sealed = upstream::validate_target_url(&target, &settings.upstream.allowed_host)
        .and_then(|_| token::seal(&target, &settings.token.secret));

    match sealed {
        Ok(token) => {
            let enhanced_url = format!(
                "{}/{VIEW_ROUTE_COMPONENT}/{token}/{CALENDAR_FILE_NAME}",
                settings.server.origin()
            );
            res.render(Json(serde_json::json!({ "enhancedUrl": enhanced_url })));
        }
        Err(err) => {
            tracing::debug!(error = %err, "rejected generate request");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(serde_json::json!({ "error": err.to_string() })));
        }
    }
}
