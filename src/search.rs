//! The search page.
//!
//! Search is not wired up yet: the page renders the input and an empty
//! results area so the navigation has somewhere to land.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};

use crate::{
    AppState,
    auth::session_is_active,
    endpoints,
    html::{FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// The state needed for the search page.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
}

impl FromRef<AppState> for SearchState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<SearchState> for Key {
    fn from_ref(state: &SearchState) -> Self {
        state.cookie_key.clone()
    }
}

fn search_view(is_logged_in: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::SEARCH_VIEW, is_logged_in).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl"
            {
                h1 class="text-xl font-bold mb-4" { "Search" }

                form role="search" class="mb-6"
                {
                    input
                        type="search"
                        name="q"
                        placeholder="Search your posts (coming soon)"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div id="search-results"
                {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "Search is on its way. In the meantime, browse your posts on the board."
                    }
                }
            }
        }
    };

    base("Search", &content)
}

/// Render the search page.
pub async fn get_search_page(State(_state): State<SearchState>, jar: PrivateCookieJar) -> Response {
    search_view(session_is_active(&jar)).into_response()
}

#[cfg(test)]
mod search_page_tests {
    use axum::{Router, routing::get};
    use axum_test::TestServer;

    use crate::{app_state::create_cookie_key, endpoints, test_utils::assert_valid_html};

    use super::{SearchState, get_search_page};

    fn get_test_server() -> TestServer {
        let state = SearchState {
            cookie_key: create_cookie_key("foobar"),
        };

        let app = Router::new()
            .route(endpoints::SEARCH_VIEW, get(get_search_page))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn renders_search_input_and_results_area() {
        let server = get_test_server();

        let response = server.get(endpoints::SEARCH_VIEW).await;

        response.assert_status_ok();
        let document = scraper::Html::parse_document(&response.text());
        assert_valid_html(&document);

        let input_selector = scraper::Selector::parse("input[type=search]").unwrap();
        assert_eq!(document.select(&input_selector).count(), 1);

        let results_selector = scraper::Selector::parse("#search-results").unwrap();
        assert_eq!(document.select(&results_selector).count(), 1);
    }
}
