use salvo::async_trait;

use crate::error::{AppError, AppResult};

/// Injects the shared upstream HTTP client into the request depot.
pub struct HttpClientHandler {
    pub client: reqwest::Client,
}

#[async_trait]
impl salvo::Handler for HttpClientHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.client.clone());
    }
}

/// ## Summary
/// Retrieves the shared upstream HTTP client from the depot.
///
/// ## Errors
/// Returns an error if the client is not found in the depot.
pub fn get_client_from_depot(depot: &salvo::Depot) -> AppResult<reqwest::Client> {
    depot.obtain::<reqwest::Client>().cloned().map_err(|_err| {
        AppError::CoreError(calveil_core::error::CoreError::InvariantViolation(
            "HTTP client not found in depot",
        ))
    })
}
