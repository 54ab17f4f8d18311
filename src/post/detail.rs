//! The post detail page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::session_is_active,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, PANEL_STYLE, base},
    navigation::NavBar,
    post::{
        PostId,
        card::{category_badge, format_post_date},
        get_post,
    },
    timezone::get_local_offset,
};

/// The state needed for the post detail page.
#[derive(Debug, Clone)]
pub struct PostDetailState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for PostDetailState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<PostDetailState> for Key {
    fn from_ref(state: &PostDetailState) -> Self {
        state.cookie_key.clone()
    }
}

/// Render the post detail page.
///
/// A post that cannot be fetched, for whatever reason, redirects back to the
/// board rather than showing an error page.
pub async fn get_post_detail_page(
    State(state): State<PostDetailState>,
    Path(post_id): Path<PostId>,
    jar: PrivateCookieJar,
) -> Response {
    let local_offset = match get_local_offset(&state.local_timezone) {
        Some(offset) => offset,
        None => return Error::InvalidTimezoneError(state.local_timezone).into_response(),
    };

    let post = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        match get_post(post_id, &connection) {
            Ok(post) => post,
            Err(error) => {
                tracing::warn!("Could not fetch post {post_id}: {error}. Redirecting to board.");
                return Redirect::to(endpoints::BOARD_VIEW).into_response();
            }
        }
    };

    let nav_bar = NavBar::new(endpoints::BOARD_VIEW, session_is_active(&jar)).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            article class={"w-full max-w-2xl " (PANEL_STYLE)}
            {
                (category_badge(&post.category))

                h1 class="mt-2 text-2xl font-bold" { (post.title) }

                p class="mt-1 text-sm text-gray-400 dark:text-gray-500" {
                    (format_post_date(post.created_at, local_offset))
                }

                @for image_url in &post.image_urls {
                    img
                        src=(image_url)
                        alt=""
                        class="mt-4 w-full rounded";
                }

                p class="mt-4 whitespace-pre-wrap" { (post.content) }
            }
        }
    };

    base(&post.title, &content).into_response()
}
