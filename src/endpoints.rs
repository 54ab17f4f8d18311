//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/posts/{post_id}', use [format_endpoint].

/// The home page with the study calendar and stats overview.
pub const ROOT: &str = "/";
/// The page listing posts with category filter chips.
pub const BOARD_VIEW: &str = "/board";
/// The page for displaying a single post.
pub const POST_VIEW: &str = "/posts/{post_id}";
/// The page for writing a new post.
pub const NEW_POST_VIEW: &str = "/posts/new";
/// The search page (placeholder).
pub const SEARCH_VIEW: &str = "/search";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";
/// The route for uploaded media files (the public face of the image bucket).
pub const MEDIA: &str = "/media";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route to create a user.
pub const USERS: &str = "/api/users";
/// The route to create a category.
pub const POST_CATEGORY: &str = "/api/categories";
/// The route to create a post.
pub const POSTS_API: &str = "/api/posts";
/// The route to upload images for attachment to a post.
pub const UPLOAD_IMAGES: &str = "/api/images";
/// The route for the calendar fragment used by month navigation.
pub const CALENDAR_FRAGMENT: &str = "/api/calendar";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/posts/{post_id}', '{post_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
