//! The home page: calendar heat-map, stats overview, and quick links.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use time::{Date, UtcOffset, macros::date};

use crate::{
    AppState, Error,
    auth::session_is_active,
    calendar::{active_days, calendar_view},
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, PANEL_STYLE, base},
    navigation::NavBar,
    post::Post,
    post::get_all_posts,
    timezone::get_local_offset,
};

/// The exam the D-day counter counts down to.
const EXAM_DATE: Date = date!(2026 - 03 - 01);

/// The state needed for the home page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<DashboardState> for Key {
    fn from_ref(state: &DashboardState) -> Self {
        state.cookie_key.clone()
    }
}

/// The D-day label for the exam countdown, e.g. "D-42", "D-day", "D+3".
fn d_day_label(today: Date) -> String {
    let days = (EXAM_DATE - today).whole_days();

    match days {
        0 => "D-day".to_string(),
        days if days > 0 => format!("D-{days}"),
        days => format!("D+{}", -days),
    }
}

/// The number of consecutive days with at least one post, counting back from
/// today.
///
/// A day without a post today does not break a streak that is still alive
/// from yesterday.
fn current_streak(posts: &[Post], today: Date, local_offset: UtcOffset) -> u32 {
    let active_dates: HashSet<Date> = posts
        .iter()
        .map(|post| post.created_at.to_offset(local_offset).date())
        .collect();

    let mut day = if active_dates.contains(&today) {
        today
    } else {
        match today.previous_day() {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };

    let mut streak = 0;
    while active_dates.contains(&day) {
        streak += 1;
        day = match day.previous_day() {
            Some(previous) => previous,
            None => break,
        };
    }

    streak
}

fn stat_card(label: &str, value: &str) -> Markup {
    html! {
        div class=(PANEL_STYLE)
        {
            p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            p class="mt-1 text-2xl font-bold" { (value) }
        }
    }
}

fn dashboard_view(posts: &[Post], today: Date, local_offset: UtcOffset, is_logged_in: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT, is_logged_in).into_html();

    let active = active_days(posts, today.year(), today.month(), local_offset);
    let streak = current_streak(posts, today, local_offset);

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl space-y-6"
            {
                div class="grid gap-4 sm:grid-cols-3"
                {
                    (stat_card("Total posts", &posts.len().to_string()))
                    (stat_card("Streak", &format!("{streak} days")))
                    (stat_card("Exam", &d_day_label(today)))
                }

                (calendar_view(today.year(), today.month(), &active))

                div class="flex gap-4"
                {
                    a href=(endpoints::NEW_POST_VIEW) class=(LINK_STYLE) { "New post" }
                    a href=(endpoints::BOARD_VIEW) class=(LINK_STYLE) { "Board" }
                    a href=(endpoints::SEARCH_VIEW) class=(LINK_STYLE) { "Search" }
                }
            }
        }
    };

    base("Home", &content)
}

/// Render the home page.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    jar: PrivateCookieJar,
) -> Response {
    let local_offset = match get_local_offset(&state.local_timezone) {
        Some(offset) => offset,
        None => return Error::InvalidTimezoneError(state.local_timezone).into_response(),
    };

    let posts = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        match get_all_posts(&connection) {
            Ok(posts) => posts,
            Err(error) => return error.into_response(),
        }
    };

    let today = time::OffsetDateTime::now_utc().to_offset(local_offset).date();
    let is_logged_in = session_is_active(&jar);

    dashboard_view(&posts, today, local_offset, is_logged_in).into_response()
}

#[cfg(test)]
mod d_day_tests {
    use time::macros::date;

    use super::d_day_label;

    #[test]
    fn future_exam_counts_down() {
        assert_eq!(d_day_label(date!(2026 - 01 - 18)), "D-42");
    }

    #[test]
    fn exam_day_is_d_day() {
        assert_eq!(d_day_label(date!(2026 - 03 - 01)), "D-day");
    }

    #[test]
    fn past_exam_counts_up() {
        assert_eq!(d_day_label(date!(2026 - 03 - 04)), "D+3");
    }
}

#[cfg(test)]
mod streak_tests {
    use time::{Date, UtcOffset, macros::date};

    use crate::post::Post;

    use super::current_streak;

    fn post_on(day: Date) -> Post {
        Post {
            id: 1,
            title: "title".to_string(),
            content: "content".to_string(),
            category: "Math".to_string(),
            image_urls: Vec::new(),
            created_at: day.midnight().assume_utc() + time::Duration::hours(9),
        }
    }

    #[test]
    fn no_posts_means_no_streak() {
        let streak = current_streak(&[], date!(2026 - 02 - 14), UtcOffset::UTC);

        assert_eq!(streak, 0);
    }

    #[test]
    fn consecutive_days_ending_today_count() {
        let posts = vec![
            post_on(date!(2026 - 02 - 12)),
            post_on(date!(2026 - 02 - 13)),
            post_on(date!(2026 - 02 - 14)),
        ];

        let streak = current_streak(&posts, date!(2026 - 02 - 14), UtcOffset::UTC);

        assert_eq!(streak, 3);
    }

    #[test]
    fn streak_survives_a_quiet_today() {
        let posts = vec![
            post_on(date!(2026 - 02 - 12)),
            post_on(date!(2026 - 02 - 13)),
        ];

        let streak = current_streak(&posts, date!(2026 - 02 - 14), UtcOffset::UTC);

        assert_eq!(streak, 2);
    }

    #[test]
    fn gap_breaks_the_streak() {
        let posts = vec![
            post_on(date!(2026 - 02 - 10)),
            post_on(date!(2026 - 02 - 14)),
        ];

        let streak = current_streak(&posts, date!(2026 - 02 - 14), UtcOffset::UTC);

        assert_eq!(streak, 1);
    }
}
