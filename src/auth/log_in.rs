//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! The auth module handles the lower level authentication and cookie auth logic.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    app_state::create_cookie_key,
    auth::{
        DEFAULT_COOKIE_DURATION, get_user_by_email, invalidate_auth_cookie,
        middleware::normalize_redirect_url, set_auth_cookie,
    },
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, base, email_input, loading_spinner, log_in_register, password_input},
};

fn log_in_form(
    email: &str,
    error_message: Option<&str>,
    redirect_url: Option<&str>,
) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#email, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            @if let Some(redirect_url) = redirect_url {
                input type="hidden" name="redirect_url" value=(redirect_url);
            }

            (email_input(email, None))
            (password_input("", 0, error_message))

            button
                type="submit" id="submit-button" tabindex="0"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Log in"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Don't have an account? "
                a
                    href=(endpoints::REGISTER_VIEW) tabindex="0"
                    class="font-semibold leading-6 text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400"
                {
                  "Sign up here"
                }
            }
        }
    }
}

fn parse_redirect_url(raw_url: Option<&str>, source: &str) -> Option<String> {
    match raw_url.and_then(normalize_redirect_url) {
        Some(redirect_url) => Some(redirect_url),
        None => {
            if let Some(redirect_url) = raw_url {
                tracing::warn!("Invalid redirect URL from {source}: {redirect_url}");
            }
            None
        }
    }
}

/// Display the log-in page.
pub async fn get_log_in_page(Query(query): Query<RedirectQuery>) -> Response {
    let redirect_url = parse_redirect_url(query.redirect_url.as_deref(), "log-in query");
    let log_in_form = log_in_form("", None, redirect_url.as_deref());
    let content = log_in_register("Log in to your account", &log_in_form);
    base("Log In", &content).into_response()
}

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LoginState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl LoginState {
    /// Create the cookie key from a string and set the default cookie duration.
    pub fn new(cookie_secret: &str, db_connection: Arc<Mutex<Connection>>) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            db_connection: db_connection.clone(),
        }
    }
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LoginState> for Key {
    fn from_ref(state: &LoginState) -> Self {
        state.cookie_key.clone()
    }
}

pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Incorrect email or password.";

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the auth cookie is set and the client is redirected to the home page.
/// Otherwise, the form is returned with an error message explaining the problem.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn post_log_in(
    State(state): State<LoginState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let redirect_url = parse_redirect_url(user_data.redirect_url.as_deref(), "log-in form");
    let redirect_url = redirect_url.as_deref();

    let email = match user_data.email.parse() {
        Ok(email) => email,
        Err(_) => {
            return log_in_form(
                &user_data.email,
                Some(INVALID_CREDENTIALS_ERROR_MSG),
                redirect_url,
            )
            .into_response();
        }
    };

    let user = match get_user_by_email(
        &email,
        &state
            .db_connection
            .lock()
            .expect("Could acquire lock to database connection"),
    ) {
        Ok(user) => user,
        Err(Error::NotFound) => {
            return log_in_form(
                &user_data.email,
                Some(INVALID_CREDENTIALS_ERROR_MSG),
                redirect_url,
            )
            .into_response();
        }
        Err(error) => {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            return log_in_form(
                &user_data.email,
                Some("An internal error occurred. Please try again later."),
                redirect_url,
            )
            .into_response();
        }
    };

    let is_password_valid = match user.password_hash.verify(&user_data.password) {
        Ok(is_password_valid) => is_password_valid,
        Err(error) => {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            return log_in_form(
                &user_data.email,
                Some("An internal error occurred. Please try again later."),
                redirect_url,
            )
            .into_response();
        }
    };

    if !is_password_valid {
        return log_in_form(
            &user_data.email,
            Some(INVALID_CREDENTIALS_ERROR_MSG),
            redirect_url,
        )
        .into_response();
    }

    let redirect_url = redirect_url.unwrap_or(endpoints::ROOT);

    set_auth_cookie(jar.clone(), user.id, state.cookie_duration)
        .map(|updated_jar| {
            (
                StatusCode::SEE_OTHER,
                HxRedirect(redirect_url.to_owned()),
                updated_jar,
            )
        })
        .map_err(|err| {
            tracing::error!("Error setting auth cookie: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
                invalidate_auth_cookie(jar),
            )
        })
        .into_response()
}

#[derive(Deserialize)]
pub struct RedirectQuery {
    pub redirect_url: Option<String>,
}

/// The raw data entered by the user in the log-in form.
///
/// The password is stored as a plain string. There is no need for validation here since
/// it will be compared against the password hash in the database, which has been verified.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    /// Email entered during log-in.
    pub email: String,
    /// Password entered during log-in.
    pub password: String,
    /// Optional URL to redirect to after logging in.
    /// Only accepted from the log-in form submission.
    pub redirect_url: Option<String>,
}


#[cfg(test)]
mod log_in_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form, Router,
        body::Body,
        extract::State,
        http::{Response, StatusCode, header::SET_COOKIE},
        routing::post,
    };
    use axum_extra::extract::{PrivateCookieJar, cookie::Cookie};
    use axum_htmx::HX_REDIRECT;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use time::OffsetDateTime;

    use crate::{
        auth::{COOKIE_USER_ID, PasswordHash, create_user, user::create_user_table},
        endpoints,
    };

    use super::{INVALID_CREDENTIALS_ERROR_MSG, LogInData, LoginState, post_log_in};

    const TEST_EMAIL: &str = "test@example.com";
    // bcrypt hash of "averystrongandlongpassword" with cost 4.
    fn test_password_hash() -> PasswordHash {
        PasswordHash::from_raw_password("averystrongandlongpassword", 4).unwrap()
    }

    fn get_test_app_config(with_user: bool) -> LoginState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_user_table(&connection).expect("Could not create user table");

        if with_user {
            create_user(
                TEST_EMAIL.parse().unwrap(),
                test_password_hash(),
                &connection,
            )
            .expect("Could not create test user");
        }

        LoginState::new("foobar", Arc::new(Mutex::new(connection)))
    }

    async fn new_log_in_request(state: LoginState, log_in_form: LogInData) -> Response<Body> {
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        post_log_in(State(state), jar, Form(log_in_form)).await
    }

    #[track_caller]
    fn assert_hx_redirect(response: &Response<Body>, want_location: &str) {
        let redirect_location = response.headers().get(HX_REDIRECT).unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location, want_location);
    }

    #[track_caller]
    fn assert_sets_auth_cookie(response: &Response<Body>) {
        let mut found_user_id_cookie = false;

        for cookie_headers in response.headers().get_all(SET_COOKIE) {
            let cookie_string = cookie_headers.to_str().unwrap();
            let cookie = Cookie::parse(cookie_string).unwrap();

            if cookie.name() == COOKIE_USER_ID {
                assert!(cookie.expires_datetime() > Some(OffsetDateTime::now_utc()));
                found_user_id_cookie = true;
            }
        }

        assert!(
            found_user_id_cookie,
            "could not find cookie '{COOKIE_USER_ID}' in response"
        );
    }

    async fn assert_body_contains_message(response: Response<Body>, message: &str) {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();
        let fragment = scraper::Html::parse_fragment(&text);
        let error_selector = scraper::Selector::parse("p.text-red-500.text-base").unwrap();
        let error = fragment
            .select(&error_selector)
            .next()
            .expect("expected error message paragraph");
        let error_text = error.text().collect::<String>();
        assert_eq!(
            error_text.trim(),
            message,
            "response body should include error message \"{message}\", got \"{error_text}\""
        );
    }

    #[tokio::test]
    async fn log_in_succeeds_with_valid_credentials() {
        let state = get_test_app_config(true);

        let response = new_log_in_request(
            state,
            LogInData {
                email: TEST_EMAIL.to_string(),
                password: "averystrongandlongpassword".to_string(),
                redirect_url: None,
            },
        )
        .await;

        assert_hx_redirect(&response, endpoints::ROOT);
        assert_sets_auth_cookie(&response);
    }

    #[tokio::test]
    async fn log_in_redirects_to_requested_url() {
        let state = get_test_app_config(true);
        let redirect_url = "/board?tag=Math";

        let response = new_log_in_request(
            state,
            LogInData {
                email: TEST_EMAIL.to_string(),
                password: "averystrongandlongpassword".to_string(),
                redirect_url: Some(redirect_url.to_string()),
            },
        )
        .await;

        assert_hx_redirect(&response, redirect_url);
    }

    #[tokio::test]
    async fn log_in_falls_back_on_invalid_redirect_url() {
        let state = get_test_app_config(true);

        let response = new_log_in_request(
            state,
            LogInData {
                email: TEST_EMAIL.to_string(),
                password: "averystrongandlongpassword".to_string(),
                redirect_url: Some("https://example.com".to_string()),
            },
        )
        .await;

        assert_hx_redirect(&response, endpoints::ROOT);
    }

    #[tokio::test]
    async fn log_in_fails_with_incorrect_password() {
        let state = get_test_app_config(true);

        let response = new_log_in_request(
            state,
            LogInData {
                email: TEST_EMAIL.to_string(),
                password: "wrongpassword".to_string(),
                redirect_url: None,
            },
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_body_contains_message(response, INVALID_CREDENTIALS_ERROR_MSG).await;
    }

    #[tokio::test]
    async fn log_in_fails_with_unknown_email() {
        let state = get_test_app_config(false);

        let response = new_log_in_request(
            state,
            LogInData {
                email: "nobody@example.com".to_string(),
                password: "averystrongandlongpassword".to_string(),
                redirect_url: None,
            },
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_body_contains_message(response, INVALID_CREDENTIALS_ERROR_MSG).await;
    }

    #[tokio::test]
    async fn log_in_fails_with_missing_credentials() {
        let state = get_test_app_config(false);
        let app = Router::new()
            .route(endpoints::LOG_IN_API, post(post_log_in))
            .with_state(state);

        let server = TestServer::try_new(app).expect("Could not create test server.");

        server
            .post(endpoints::LOG_IN_API)
            .content_type("application/x-www-form-urlencoded")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn form_deserialises() {
        let state = get_test_app_config(false);
        let app = Router::new()
            .route(endpoints::LOG_IN_API, post(post_log_in))
            .with_state(state);
        let server = TestServer::try_new(app).expect("Could not create test server.");
        let form = [("email", TEST_EMAIL), ("password", "test")];

        let response = server.post(endpoints::LOG_IN_API).form(&form).await;

        assert_ne!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
