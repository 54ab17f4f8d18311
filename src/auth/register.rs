//! The registration page for creating an account.
use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
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
        DEFAULT_COOKIE_DURATION, PasswordHash, ValidatedPassword, create_user, set_auth_cookie,
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, email_input,
        loading_spinner, log_in_register, password_input,
    },
    internal_server_error::get_internal_server_error_redirect,
};

/// The minimum number of characters the password should have to be considered valid on the client side (server-side validation is done on top of this validation).
const PASSWORD_INPUT_MIN_LENGTH: u8 = 14;

fn confirm_password_input(min_length: u8, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label
                for="confirm-password"
                class=(FORM_LABEL_STYLE)
            {
                "Confirm Password"
            }

            input
                type="password"
                name="confirm_password"
                id="confirm-password"
                placeholder="••••••••"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                minlength=(min_length)
                autofocus[error_message.is_some()]
            ;

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }
        }

    }
}

fn registration_form(
    email: &str,
    email_error_message: Option<&str>,
    password_error_message: Option<&str>,
    confirm_password_error_message: Option<&str>,
) -> Markup {
    html! {
        form
            hx-post=(endpoints::USERS)
            hx-indicator="#indicator"
            hx-disabled-elt="#email, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            (email_input(email, email_error_message))
            (password_input("", PASSWORD_INPUT_MIN_LENGTH, password_error_message))
            (confirm_password_input(PASSWORD_INPUT_MIN_LENGTH, confirm_password_error_message))

            button
                type="submit" id="submit-button" tabindex="0"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Sign up"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "

                a
                    href=(endpoints::LOG_IN_VIEW) tabindex="0"
                    class="font-semibold leading-6 text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400"
                {
                  "Log in here"
                }
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let registration_form = registration_form("", None, None, None);
    let content = log_in_register("Create an account", &registration_form);
    base("Register", &content).into_response()
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl RegistrationState {
    /// Create the cookie key from a string and set the default cookie duration.
    pub fn new(cookie_secret: &str, db_connection: Arc<Mutex<Connection>>) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            db_connection: db_connection.clone(),
        }
    }
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<RegistrationState> for Key {
    fn from_ref(state: &RegistrationState) -> Self {
        state.cookie_key.clone()
    }
}

#[derive(Serialize, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Handler for account creation requests via the POST method.
///
/// On success, the new user is logged in straight away and redirected to the
/// home page. Otherwise, the form is returned with inline error messages.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn register_user(
    State(state): State<RegistrationState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    let email = match user_data.email.parse() {
        Ok(email) => email,
        Err(error) => {
            tracing::debug!("Rejected invalid email address: {error}");
            return registration_form(
                &user_data.email,
                Some("Please enter a valid email address."),
                None,
                None,
            )
            .into_response();
        }
    };

    let validated_password = match ValidatedPassword::new(&user_data.password) {
        Ok(password) => password,
        Err(error) => {
            return registration_form(
                &user_data.email,
                None,
                Some(error.to_string().as_ref()),
                None,
            )
            .into_response();
        }
    };

    if user_data.password != user_data.confirm_password {
        return registration_form(
            &user_data.email,
            None,
            None,
            Some("Passwords do not match"),
        )
        .into_response();
    }

    let password_hash = match PasswordHash::new(validated_password, PasswordHash::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("an error occurred while hashing a password: {e}");

            return get_internal_server_error_redirect();
        }
    };

    create_user(
        email,
        password_hash,
        &state
            .db_connection
            .lock()
            .expect("Could not acquire database lock"),
    )
    .map(|user| {
        let jar = set_auth_cookie(jar, user.id, state.cookie_duration);

        match jar {
            Ok(jar) => (
                StatusCode::SEE_OTHER,
                HxRedirect(endpoints::ROOT.to_owned()),
                jar,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("An error occurred while setting the auth cookie: {e}");

                get_internal_server_error_redirect()
            }
        }
    })
    .unwrap_or_else(|error| match error {
        Error::DuplicateEmail => registration_form(
            &user_data.email,
            Some("An account with this email already exists."),
            None,
            None,
        )
        .into_response(),
        error => {
            tracing::error!("An unhandled error occurred while inserting a new user: {error}");

            get_internal_server_error_redirect()
        }
    })
}


#[cfg(test)]
mod register_user_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form,
        body::Body,
        extract::State,
        http::{Response, StatusCode},
    };
    use axum_extra::extract::PrivateCookieJar;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;

    use crate::{
        auth::{PasswordHash, create_user, user::create_user_table},
        endpoints,
    };

    use super::{RegisterForm, RegistrationState, register_user};

    const STRONG_PASSWORD: &str = "averystrongandlongpassword";

    fn get_test_state() -> RegistrationState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_user_table(&connection).expect("Could not create user table");

        RegistrationState::new("foobar", Arc::new(Mutex::new(connection)))
    }

    async fn new_register_request(state: RegistrationState, form: RegisterForm) -> Response<Body> {
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        register_user(State(state), jar, Form(form)).await
    }

    async fn error_messages(response: Response<Body>) -> Vec<String> {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&body).to_string();
        let fragment = scraper::Html::parse_fragment(&text);
        let error_selector = scraper::Selector::parse("p.text-red-500.text-base").unwrap();

        fragment
            .select(&error_selector)
            .map(|error| error.text().collect::<String>().trim().to_string())
            .collect()
    }

    #[tokio::test]
    async fn register_succeeds_and_redirects_home() {
        let state = get_test_state();

        let response = new_register_request(
            state,
            RegisterForm {
                email: "new@example.com".to_string(),
                password: STRONG_PASSWORD.to_string(),
                confirm_password: STRONG_PASSWORD.to_string(),
            },
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            endpoints::ROOT
        );
    }

    #[tokio::test]
    async fn register_rejects_weak_password() {
        let state = get_test_state();

        let response = new_register_request(
            state,
            RegisterForm {
                email: "new@example.com".to_string(),
                password: "password1234".to_string(),
                confirm_password: "password1234".to_string(),
            },
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!error_messages(response).await.is_empty());
    }

    #[tokio::test]
    async fn register_rejects_mismatched_passwords() {
        let state = get_test_state();

        let response = new_register_request(
            state,
            RegisterForm {
                email: "new@example.com".to_string(),
                password: STRONG_PASSWORD.to_string(),
                confirm_password: "somethingelseentirely".to_string(),
            },
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let errors = error_messages(response).await;
        assert!(errors.contains(&"Passwords do not match".to_string()));
    }

    #[tokio::test]
    async fn register_rejects_invalid_email() {
        let state = get_test_state();

        let response = new_register_request(
            state,
            RegisterForm {
                email: "not-an-email".to_string(),
                password: STRONG_PASSWORD.to_string(),
                confirm_password: STRONG_PASSWORD.to_string(),
            },
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let errors = error_messages(response).await;
        assert!(errors.contains(&"Please enter a valid email address.".to_string()));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let state = get_test_state();
        create_user(
            "new@example.com".parse().unwrap(),
            PasswordHash::new_unchecked("hunter2"),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = new_register_request(
            state,
            RegisterForm {
                email: "new@example.com".to_string(),
                password: STRONG_PASSWORD.to_string(),
                confirm_password: STRONG_PASSWORD.to_string(),
            },
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let errors = error_messages(response).await;
        assert!(errors.contains(&"An account with this email already exists.".to_string()));
    }
}
