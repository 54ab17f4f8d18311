//! Category creation endpoint.
//!
//! Posting a new category returns a refreshed category selector fragment so
//! the post creation form can swap it in place, with the new category
//! selected, without losing the rest of the form.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{
        CategoryFormData, CategoryName, SelectorCategory, create_category, get_category_names,
        selector_categories, unify_category_names,
    },
    html::FORM_SELECT_STYLE,
    post::get_post_categories,
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the category selector for the post creation form.
///
/// The element carries the `category-select` ID so that the category creation
/// endpoint can swap in a refreshed copy.
pub(crate) fn category_select_view(
    categories: &[SelectorCategory],
    selected: Option<&str>,
) -> Markup {
    html! {
        select
            id="category-select"
            name="category"
            required
            class=(FORM_SELECT_STYLE)
        {
            option value="" disabled selected[selected.is_none()] { "Choose a category" }

            @for category in categories {
                option
                    value=(category.name)
                    selected[selected == Some(category.name.as_str())]
                {
                    (category.name)
                }
            }
        }
    }
}

/// Handle category creation form submission.
///
/// The submitted name is rejected, without touching the store, if it already
/// appears in the unified set of stored categories and post labels.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryEndpointState>,
    Form(new_category): Form<CategoryFormData>,
) -> Response {
    let name = match CategoryName::new(&new_category.name) {
        Ok(name) => name,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let loaded_names = match load_unified_names(&connection) {
        Ok(names) => names,
        Err(error) => return error.into_alert_response(),
    };

    if loaded_names.iter().any(|loaded| loaded == name.as_ref()) {
        return Error::DuplicateCategory.into_alert_response();
    }

    match create_category(name.clone(), &connection) {
        Ok(_) => {}
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");
            return error.into_alert_response();
        }
    }

    match load_selector_categories(&connection) {
        Ok(categories) => {
            category_select_view(&categories, Some(name.as_ref())).into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

fn load_unified_names(connection: &Connection) -> Result<Vec<String>, Error> {
    let stored_names = get_category_names(connection)?;
    let post_labels = get_post_categories(connection)?;

    Ok(unify_category_names(stored_names, post_labels))
}

/// Load the selector entries for the post creation form from the database.
pub(crate) fn load_selector_categories(
    connection: &Connection,
) -> Result<Vec<SelectorCategory>, Error> {
    let stored_names = get_category_names(connection)?;
    let post_labels = get_post_categories(connection)?;

    Ok(selector_categories(stored_names, post_labels))
}

#[cfg(test)]
mod create_category_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form,
        extract::State,
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;

    use crate::{
        category::{
            CategoryFormData, CategoryName, create_category, create_category_table,
            get_category_names,
        },
        post::create_post_table,
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    use super::{CreateCategoryEndpointState, create_category_endpoint};

    fn get_category_state() -> CreateCategoryEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_category_table(&connection).expect("Could not create category table");
        create_post_table(&connection).expect("Could not create post table");

        CreateCategoryEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn can_create_category() {
        let state = get_category_state();
        let form = CategoryFormData {
            name: "Math".to_string(),
        };

        let response = create_category_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            get_category_names(&state.db_connection.lock().unwrap()).unwrap(),
            vec!["Math"]
        );
    }

    #[tokio::test]
    async fn create_category_returns_refreshed_selector_with_new_name_selected() {
        let state = get_category_state();
        create_category(
            CategoryName::new_unchecked("Physics"),
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test category");

        let form = CategoryFormData {
            name: "Math".to_string(),
        };
        let response = create_category_endpoint(State(state), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        let option_selector = scraper::Selector::parse("select#category-select option").unwrap();
        let labels: Vec<String> = html
            .select(&option_selector)
            .map(|option| option.text().collect::<String>().trim().to_string())
            .collect();
        assert_eq!(labels, vec!["Choose a category", "Math", "Physics"]);

        let selected_selector = scraper::Selector::parse("option[selected]").unwrap();
        let selected: Vec<String> = html
            .select(&selected_selector)
            .filter_map(|option| option.value().attr("value").map(str::to_string))
            .collect();
        assert_eq!(selected, vec!["Math"]);
    }

    #[tokio::test]
    async fn create_category_fails_on_empty_name() {
        let state = get_category_state();
        let form = CategoryFormData {
            name: "  ".to_string(),
        };

        let response = create_category_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(
            get_category_names(&state.db_connection.lock().unwrap())
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn create_duplicate_category_is_rejected_without_touching_the_store() {
        let state = get_category_state();
        create_category(
            CategoryName::new_unchecked("Math"),
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test category");

        let form = CategoryFormData {
            name: "Math".to_string(),
        };
        let response = create_category_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            get_category_names(&state.db_connection.lock().unwrap()).unwrap(),
            vec!["Math"]
        );
    }
}
