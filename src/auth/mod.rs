//! Email/password authentication with private cookie sessions.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod password;
mod register;
mod user;

pub(crate) use cookie::{
    DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, session_is_active, set_auth_cookie,
};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{AuthState, auth_guard, auth_guard_hx};
pub use password::{PasswordHash, ValidatedPassword};
pub use register::{get_register_page, register_user};
pub use user::{User, UserID, create_user, create_user_table, get_user_by_email, get_user_by_id};

#[cfg(test)]
pub(crate) use cookie::{COOKIE_EXPIRY, COOKIE_USER_ID};
