//! Upstream calendar fetch: target validation, transport, and response
//! admission checks.

use calveil_core::config::UpstreamConfig;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response, StatusCode, Url};

use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Builds the HTTP client used for upstream fetches. Redirects are not
/// followed; a redirecting upstream is treated as an upstream failure.
///
/// ## Errors
/// Returns an error if the client cannot be constructed.
pub fn build_client() -> ServiceResult<Client> {
    Ok(Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?)
}

/// ## Summary
/// Validates a user-supplied calendar URL: it must parse, use http or
/// https, and point at the configured allowed host.
///
/// ## Errors
/// Returns a distinct error for malformed URLs, forbidden protocols, and
/// unauthorized hosts.
pub fn validate_target_url(raw: &str, allowed_host: &str) -> ServiceResult<Url> {
    let url = Url::parse(raw).map_err(|_err| ServiceError::MalformedUrl)?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(ServiceError::ForbiddenProtocol),
    }

    if url.host_str() != Some(allowed_host) {
        return Err(ServiceError::UnauthorizedHost);
    }

    Ok(url)
}

/// ## Summary
/// Fetches the upstream calendar feed, admitting only a 200 response with
/// a calendar/text content type and a declared size within the cap.
///
/// The body is not read here; the caller streams it through the rewrite
/// pipeline, which enforces the size cap on the actual bytes as well.
///
/// ## Errors
/// Returns an error for transport failures, non-200 statuses, wrong
/// content types, and oversized declarations.
pub async fn fetch_calendar(
    client: &Client,
    url: Url,
    config: &UpstreamConfig,
) -> ServiceResult<Response> {
    let response = client
        .get(url)
        .header(USER_AGENT, &config.user_agent)
        .header(ACCEPT, "text/calendar")
        .send()
        .await?;

    if response.status() != StatusCode::OK {
        return Err(ServiceError::UpstreamStatus(response.status().as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();
    if !content_type.contains("text/calendar") && !content_type.contains("text/plain") {
        return Err(ServiceError::UnsupportedContentType(content_type));
    }

    if let Some(declared) = response.content_length() {
        if declared > config.max_body_size {
            return Err(ServiceError::BodyTooLarge(declared));
        }
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "srh-community.campusweb.cloud";

    #[test]
    fn accepts_allowed_host() {
        let url = validate_target_url(
            "https://srh-community.campusweb.cloud/ical/feed.ics",
            HOST,
        )
        .unwrap();
        assert_eq!(url.host_str(), Some(HOST));
    }

    #[test]
    fn accepts_plain_http() {
        assert!(validate_target_url("http://srh-community.campusweb.cloud/x", HOST).is_ok());
    }

    #[test]
    fn rejects_malformed_url() {
        assert!(matches!(
            validate_target_url("not a url", HOST),
            Err(ServiceError::MalformedUrl)
        ));
    }

    #[test]
    fn rejects_forbidden_protocol() {
        assert!(matches!(
            validate_target_url("ftp://srh-community.campusweb.cloud/x", HOST),
            Err(ServiceError::ForbiddenProtocol)
        ));
        assert!(matches!(
            validate_target_url("javascript:alert(1)", HOST),
            Err(ServiceError::ForbiddenProtocol)
        ));
    }

    #[test]
    fn rejects_other_hosts() {
        assert!(matches!(
            validate_target_url("https://evil.example/feed.ics", HOST),
            Err(ServiceError::UnauthorizedHost)
        ));
        // Subdomains are not the allowed host.
        assert!(matches!(
            validate_target_url("https://x.srh-community.campusweb.cloud/", HOST),
            Err(ServiceError::UnauthorizedHost)
        ));
    }
}
