//! Post creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{SelectorCategory, category_select_view, load_selector_categories},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, base, loading_spinner,
    },
    navigation::NavBar,
    post::{
        NewPostFormData,
        db::{NewPost, create_post},
    },
};

/// The state needed for the post creation page and endpoint.
#[derive(Debug, Clone)]
pub struct CreatePostEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreatePostEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the post creation page.
///
/// This route sits behind the auth guard, so the page is only ever rendered
/// for a logged-in user.
pub async fn get_new_post_page(State(state): State<CreatePostEndpointState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let categories = match load_selector_categories(&connection) {
        Ok(categories) => categories,
        Err(error) => return error.into_response(),
    };

    new_post_view(&categories).into_response()
}

fn new_post_view(categories: &[SelectorCategory]) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_POST_VIEW, true).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold self-start mb-4" { "New Post" }

            form
                hx-post=(endpoints::POSTS_API)
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                class="w-full space-y-4 md:space-y-6"
            {
                div
                {
                    label for="category-select" class=(FORM_LABEL_STYLE) { "Category" }

                    (category_select_view(categories, None))

                    div class="mt-2 flex gap-2"
                    {
                        input
                            id="new-category-name"
                            type="text"
                            name="name"
                            placeholder="New category"
                            class=(FORM_TEXT_INPUT_STYLE);

                        button
                            type="button"
                            hx-post=(endpoints::POST_CATEGORY)
                            hx-include="#new-category-name"
                            hx-target="#category-select"
                            hx-swap="outerHTML"
                            hx-target-error="#alert-container"
                            class=(BUTTON_SECONDARY_STYLE)
                        {
                            "Add"
                        }
                    }
                }

                div
                {
                    label for="title" class=(FORM_LABEL_STYLE) { "Title" }

                    input
                        id="title"
                        type="text"
                        name="title"
                        placeholder="What did you study?"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="content" class=(FORM_LABEL_STYLE) { "Content" }

                    textarea
                        id="content"
                        name="content"
                        rows="8"
                        placeholder="Notes, takeaways, anything worth remembering."
                        class=(FORM_TEXT_INPUT_STYLE)
                    {}
                }

                div
                {
                    label for="images" class=(FORM_LABEL_STYLE) { "Images" }

                    input
                        id="images"
                        type="file"
                        name="images"
                        accept="image/*"
                        multiple
                        hx-post=(endpoints::UPLOAD_IMAGES)
                        hx-encoding="multipart/form-data"
                        hx-target="#image-previews"
                        hx-swap="beforeend"
                        hx-disabled-elt="#submit-button"
                        class="block w-full text-sm text-gray-900 dark:text-gray-400";

                    div id="image-previews" class="mt-2" {}
                }

                button
                    type="submit" id="submit-button" tabindex="0"
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="inline htmx-indicator" id="indicator"
                    {
                        (loading_spinner())
                    }
                    "Save Post"
                }
            }
        }
    };

    base("New Post", &content)
}

/// Handle post creation form submission.
///
/// Validation: a category must be selected, then the title must not be blank.
/// On success the client is redirected to the board.
pub async fn create_post_endpoint(
    State(state): State<CreatePostEndpointState>,
    Form(new_post): Form<NewPostFormData>,
) -> Response {
    if new_post.category.is_empty() {
        return Error::MissingCategory.into_alert_response();
    }

    let title = new_post.title.trim();
    if title.is_empty() {
        return Error::EmptyTitle.into_alert_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_post(
        NewPost {
            title: title.to_string(),
            content: new_post.content,
            category: new_post.category,
            image_urls: new_post.image_urls,
        },
        &connection,
    ) {
        Ok(_) => (
            HxRedirect(endpoints::BOARD_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a post: {error}");

            error.into_alert_response()
        }
    }
}
