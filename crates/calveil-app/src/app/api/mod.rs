mod calendar;
mod generate;
mod ui;

use calveil_core::constants::API_ROUTE_COMPONENT;
use salvo::Router;

/// ## Summary
/// Constructs the main router: static UI, the token generation API, and
/// the calendar subscription routes.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(ui::routes())
        .push(Router::with_path(API_ROUTE_COMPONENT).push(generate::routes()))
        .push(calendar::routes())
}
