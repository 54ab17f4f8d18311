//! The board page: filter chips and the post grid.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::UtcOffset;

use crate::{
    AppState, Error,
    auth::session_is_active,
    category::{TagFilter, get_all_categories, unify_category_names},
    endpoints,
    html::{CHIP_SELECTED_STYLE, CHIP_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    post::{Post, get_all_posts, post_card},
    timezone::get_local_offset,
};

/// The state needed for the board page.
#[derive(Debug, Clone)]
pub struct BoardState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BoardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<BoardState> for Key {
    fn from_ref(state: &BoardState) -> Self {
        state.cookie_key.clone()
    }
}

/// Query parameters for the board page.
#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    pub tag: Option<String>,
}

/// Render the board page.
pub async fn get_board_page(
    State(state): State<BoardState>,
    Query(query): Query<BoardQuery>,
    jar: PrivateCookieJar,
) -> Response {
    let local_offset = match get_local_offset(&state.local_timezone) {
        Some(offset) => offset,
        None => return Error::InvalidTimezoneError(state.local_timezone).into_response(),
    };

    let (tags, posts) = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        let stored_names = match get_all_categories(&connection) {
            Ok(categories) => categories
                .into_iter()
                .map(|category| category.name.as_ref().to_owned())
                .collect::<Vec<_>>(),
            Err(error) => return error.into_response(),
        };
        let posts = match get_all_posts(&connection) {
            Ok(posts) => posts,
            Err(error) => return error.into_response(),
        };

        let post_labels = posts.iter().map(|post| post.category.clone());
        (unify_category_names(stored_names, post_labels), posts)
    };

    let filter = TagFilter::from_query(query.tag);
    let is_logged_in = session_is_active(&jar);

    board_view(&tags, &posts, &filter, local_offset, is_logged_in).into_response()
}

fn chip(label: &str, url: &str, is_selected: bool) -> Markup {
    let style = if is_selected {
        CHIP_SELECTED_STYLE
    } else {
        CHIP_STYLE
    };

    html! {
        a href=(url) class=(style) { (label) }
    }
}

fn chip_row(tags: &[String], filter: &TagFilter) -> Markup {
    html! {
        div id="chip-row" class="w-full flex flex-wrap gap-2 mb-6"
        {
            (chip("All", endpoints::BOARD_VIEW, *filter == TagFilter::All))

            @for tag in tags {
                @let url = format!(
                    "{}?{}",
                    endpoints::BOARD_VIEW,
                    serde_urlencoded::to_string([("tag", tag)]).unwrap_or_default()
                );
                (chip(tag, &url, filter.matches(tag) && *filter != TagFilter::All))
            }

            a
                href=(endpoints::NEW_POST_VIEW)
                title="Add a category from the post form"
                class=(CHIP_STYLE)
            {
                "+"
            }
        }
    }
}

fn board_view(
    tags: &[String],
    posts: &[Post],
    filter: &TagFilter,
    local_offset: UtcOffset,
    is_logged_in: bool,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::BOARD_VIEW, is_logged_in).into_html();
    let filtered = filter.filter_posts(posts);

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl"
            {
                div class="flex items-center justify-between mb-4"
                {
                    h1 class="text-xl font-bold" { "Board" }

                    a href=(endpoints::NEW_POST_VIEW) class=(LINK_STYLE) { "New post" }
                }

                (chip_row(tags, filter))

                @if posts.is_empty() {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "No posts yet. "
                        (link(endpoints::NEW_POST_VIEW, "Write your first post"))
                    }
                } @else if filtered.is_empty() {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "No posts under \"" (filter.label()) "\". "
                        (link(endpoints::BOARD_VIEW, "Show all posts"))
                    }
                } @else {
                    div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3"
                    {
                        @for post in filtered {
                            (post_card(post, local_offset))
                        }
                    }
                }
            }
        }
    };

    base("Board", &content)
}
