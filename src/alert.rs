//! Alert messages swapped into the fixed alert container via htmx
//! out-of-band swaps.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// An alert message displayed to the user at the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The operation failed, with an explanation of what went wrong.
    Error { message: String, details: String },
    /// The operation failed, message only.
    ErrorSimple { message: String },
}

impl Alert {
    /// Render the alert as a fragment targeting the `#alert-container`
    /// element as an out-of-band swap.
    pub fn into_html(self) -> Markup {
        let (message, details, color_style) = match self {
            Alert::Error { message, details } => (
                message,
                details,
                "text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400",
            ),
            Alert::ErrorSimple { message } => (
                message,
                String::new(),
                "text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400",
            ),
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    class={ "flex flex-col p-4 rounded-lg shadow-md " (color_style) }
                    role="alert"
                {
                    span class="font-medium" { (message) }

                    @if !details.is_empty() {
                        span class="text-sm" { (details) }
                    }

                    button
                        type="button"
                        class="self-end text-sm underline cursor-pointer"
                        onclick="this.closest('#alert-container').innerHTML = ''"
                    {
                        "Dismiss"
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.into_html()).into_response()
    }
}
