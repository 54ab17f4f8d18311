//! Application router configuration with protected and unprotected route definitions.

use axum::{Router, extract::FromRef, middleware, routing::get, routing::post};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{
        AuthState, auth_guard, auth_guard_hx, get_log_in_page, get_log_out, get_register_page,
        post_log_in, register_user,
    },
    board::get_board_page,
    calendar::get_calendar_fragment,
    category::create_category_endpoint,
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    post::{create_post_endpoint, get_new_post_page, get_post_detail_page},
    search::get_search_page,
    upload::upload_images,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let auth_state = AuthState::from_ref(&state);

    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_dashboard_page))
        .route(endpoints::BOARD_VIEW, get(get_board_page))
        .route(endpoints::POST_VIEW, get(get_post_detail_page))
        .route(endpoints::SEARCH_VIEW, get(get_search_page))
        .route(endpoints::CALENDAR_FRAGMENT, get(get_calendar_fragment))
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::USERS, post(register_user))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::NEW_POST_VIEW, get(get_new_post_page))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_guard,
        ));

    // These POST routes need to use the HX-Redirect header for auth redirects
    // to work properly for HTMX requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::POSTS_API, post(create_post_endpoint))
            .route(endpoints::POST_CATEGORY, post(create_category_endpoint))
            .route(endpoints::UPLOAD_IMAGES, post(upload_images))
            .layer(middleware::from_fn_with_state(auth_state, auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static"))
        .nest_service(
            endpoints::MEDIA,
            ServeDir::new(state.image_store.bucket_dir()),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}
