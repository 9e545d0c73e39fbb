//! Calendar subscription routes: unseal the token, fetch the upstream
//! feed, and stream the rewritten calendar back to the client.

use calveil_core::config::Settings;
use calveil_core::constants::{
    CALENDAR_FILE_NAME, SUBSCRIBE_ROUTE_COMPONENT, VIEW_ROUTE_COMPONENT,
};
use calveil_service::error::ServiceError;
use calveil_service::pipeline::enhance_stream;
use calveil_service::{token, upstream};
use salvo::http::header::{self, HeaderName, HeaderValue};
use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};

use crate::config::get_config_from_depot;
use crate::http_client::get_client_from_depot;

#[must_use]
pub fn routes() -> Router {
    let view_path = format!("{VIEW_ROUTE_COMPONENT}/{{token}}/{CALENDAR_FILE_NAME}");
    Router::new()
        .push(Router::with_path(view_path).get(view))
        .push(Router::with_path(SUBSCRIBE_ROUTE_COMPONENT).get(subscribe))
}

/// ## Summary
/// Serves a sealed-token subscription. The token unseals to the upstream
/// URL; any failure to unseal renders an opaque 404.
#[handler]
#[tracing::instrument(skip(req, res, depot))]
pub async fn view(req: &mut Request, res: &mut Response, depot: &Depot) {
    let Ok(settings) = get_config_from_depot(depot) else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let Some(sealed) = req.param::<String>("token") else {
        res.status_code(StatusCode::NOT_FOUND);
        return;
    };

    let Ok(target) = token::unseal(&sealed, &settings.token.secret) else {
        // Deliberately indistinguishable from an unknown path.
        res.status_code(StatusCode::NOT_FOUND);
        return;
    };

    serve_calendar(&target, &settings, res, depot).await;
}

/// ## Summary
/// Legacy subscription route carrying the upstream URL in the clear.
#[handler]
#[tracing::instrument(skip(req, res, depot))]
pub async fn subscribe(req: &mut Request, res: &mut Response, depot: &Depot) {
    let Ok(settings) = get_config_from_depot(depot) else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let Some(target) = req.query::<String>("url") else {
        res.status_code(StatusCode::NOT_FOUND);
        return;
    };

    serve_calendar(&target, &settings, res, depot).await;
}

async fn serve_calendar(target: &str, settings: &Settings, res: &mut Response, depot: &Depot) {
    let Ok(client) = get_client_from_depot(depot) else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let fetched = match upstream::validate_target_url(target, &settings.upstream.allowed_host) {
        Ok(url) => upstream::fetch_calendar(&client, url, &settings.upstream).await,
        Err(err) => Err(err),
    };

    let response = match fetched {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, "upstream fetch rejected");
            res.status_code(status_for(&err));
            return;
        }
    };

    apply_calendar_headers(res, &settings.calendar.display_name);

    let body = Box::pin(response.bytes_stream());
    res.stream(enhance_stream(body, settings.upstream.max_body_size));
}

/// Maps service failures onto the distinct HTTP statuses the proxy exposes.
fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::MalformedUrl
        | ServiceError::ForbiddenProtocol
        | ServiceError::UnauthorizedHost => StatusCode::BAD_REQUEST,
        ServiceError::UpstreamStatus(_) | ServiceError::HttpError(_) => StatusCode::BAD_GATEWAY,
        ServiceError::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ServiceError::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        ServiceError::InvalidToken => StatusCode::NOT_FOUND,
        ServiceError::TokenSealFailed | ServiceError::CoreError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn apply_calendar_headers(res: &mut Response, display_name: &str) {
    let headers = res.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/calendar; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"calendar.ics\""),
    );
    if let Ok(value) = HeaderValue::from_str(display_name) {
        headers.insert(HeaderName::from_static("x-wr-calname"), value);
    }
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none';"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=63072000; includeSubDomains; preload"),
    );
    headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
}
