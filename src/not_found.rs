//! The 404 page shown for unknown routes and missing resources.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::Markup;

use crate::html::error_view;

fn not_found_view() -> Markup {
    error_view(
        "Page Not Found",
        "404",
        "Whoops! That page does not exist.",
        "Check the address, or head back home.",
    )
}

/// Fallback route handler for unknown paths.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Get a 404 response with the not-found page as its body.
pub fn get_404_not_found_response() -> Response {
    (StatusCode::NOT_FOUND, not_found_view()).into_response()
}
