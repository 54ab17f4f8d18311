//! StudyLog is a personal study-journal web app: write posts tagged with
//! categories, attach images, and browse a calendar heat-map of your posting
//! activity.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod auth;
mod board;
mod calendar;
mod category;
mod dashboard;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod post;
mod routing;
mod search;
mod storage;
#[cfg(test)]
mod test_utils;
mod timezone;
mod upload;

pub use app_state::AppState;
pub use auth::{PasswordHash, ValidatedPassword};
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use storage::ImageStore;

use crate::{
    alert::Alert, internal_server_error::render_internal_server_error,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an invalid email and password combination.
    #[error("incorrect email or password")]
    InvalidCredentials,

    /// Either the user ID or expiry cookie is missing from the cookie jar in
    /// the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// There was an error parsing or formatting the date in the auth cookie.
    #[error("could not handle cookie date-time: {0}")]
    DateError(String),

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The email address used at sign-up already belongs to a registered user.
    #[error("the email address is already registered")]
    DuplicateEmail,

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// The category name already exists in the category store.
    ///
    /// Submitting a duplicate category is a validation rejection, not a
    /// system error: the store is left unchanged.
    #[error("the category already exists")]
    DuplicateCategory,

    /// A post was submitted without selecting a category.
    #[error("a category must be selected")]
    MissingCategory,

    /// A post was submitted with a blank title.
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The multipart form could not be parsed as a list of image files.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The uploaded file is not an image.
    #[error("File is not an image")]
    NotAnImage,

    /// The image could not be written to the storage bucket.
    #[error("could not store image: {0}")]
    ImageStore(String),

    /// A post's image URL list could not be serialized to or parsed from JSON.
    #[error("could not handle image URL list as JSON: {0}")]
    JsonError(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("category.name") =>
            {
                Error::DuplicateCategory
            }
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => render_internal_server_error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            ),
            Error::DatabaseLockError => render_internal_server_error(
                "Sorry, something went wrong.",
                "Try again later or check the server logs",
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(
                    "Sorry, something went wrong.",
                    "Try again later or check the server logs",
                )
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::DuplicateCategory => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Duplicate category".to_owned(),
                    details: "A category with that name already exists. \
                        Pick a different name or use the existing category."
                        .to_owned(),
                }
                .into_html(),
            )
                .into_response(),
            Error::EmptyCategoryName => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "Category name cannot be empty.".to_owned(),
                }
                .into_html(),
            )
                .into_response(),
            Error::MissingCategory => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "Choose a category before saving your post.".to_owned(),
                }
                .into_html(),
            )
                .into_response(),
            Error::EmptyTitle => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "Enter a title before saving your post.".to_owned(),
                }
                .into_html(),
            )
                .into_response(),
            Error::ImageStore(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Image upload failed".to_owned(),
                    details: format!(
                        "{reason}. Check that the media bucket directory exists and is writable."
                    ),
                }
                .into_html(),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings \
                        and ensure the timezone has been set to a valid, canonical timezone string"
                    ),
                }
                .into_html(),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    }
                    .into_html(),
                )
                    .into_response()
            }
        }
    }
}
