//! The calendar heat-map of posting activity.
//!
//! A day is marked active when at least one post was created on that day in
//! the configured local timezone. The month navigation buttons fetch a
//! replacement fragment over htmx, shifting the reference month by one with
//! year rollover and no range limits.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Month, UtcOffset, util::days_in_year_month};

use crate::{
    AppState, Error, endpoints,
    html::{BUTTON_SECONDARY_STYLE, PANEL_STYLE},
    post::{Post, get_all_posts},
    timezone::get_local_offset,
};

/// The days of a month that have at least one post, in local time.
pub fn active_days(
    posts: &[Post],
    year: i32,
    month: Month,
    local_offset: UtcOffset,
) -> HashSet<u8> {
    posts
        .iter()
        .map(|post| post.created_at.to_offset(local_offset))
        .filter(|local_date_time| {
            local_date_time.year() == year && local_date_time.month() == month
        })
        .map(|local_date_time| local_date_time.day())
        .collect()
}

/// The month before the given one, rolling the year back at January.
pub fn previous_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        month => (year, month.previous()),
    }
}

/// The month after the given one, rolling the year forward at December.
pub fn next_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::December => (year + 1, Month::January),
        month => (year, month.next()),
    }
}

/// Render the calendar for one month.
///
/// The fragment carries the `calendar` ID so the month navigation buttons can
/// swap in a replacement.
pub fn calendar_view(year: i32, month: Month, active: &HashSet<u8>) -> Markup {
    let first_weekday = time::Date::from_calendar_date(year, month, 1)
        .map(|date| date.weekday().number_days_from_sunday())
        .unwrap_or(0);
    let day_count = days_in_year_month(year, month);

    let (previous_year, previous) = previous_month(year, month);
    let (next_year, next) = next_month(year, month);

    html! {
        div id="calendar" class=(PANEL_STYLE)
        {
            div class="flex items-center justify-between mb-4"
            {
                button
                    type="button"
                    hx-get={
                        (endpoints::CALENDAR_FRAGMENT)
                        "?year=" (previous_year) "&month=" (previous as u8)
                    }
                    hx-target="#calendar"
                    hx-swap="outerHTML"
                    aria-label="Previous month"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "‹"
                }

                h2 class="text-lg font-semibold" { (month) " " (year) }

                button
                    type="button"
                    hx-get={
                        (endpoints::CALENDAR_FRAGMENT)
                        "?year=" (next_year) "&month=" (next as u8)
                    }
                    hx-target="#calendar"
                    hx-swap="outerHTML"
                    aria-label="Next month"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "›"
                }
            }

            div class="grid grid-cols-7 gap-1 text-center text-xs text-gray-400"
            {
                @for weekday in ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"] {
                    div { (weekday) }
                }
            }

            div class="grid grid-cols-7 gap-1 text-center"
            {
                @for _ in 0..first_weekday {
                    div {}
                }

                @for day in 1..=day_count {
                    @if active.contains(&day) {
                        div
                            class="py-1.5 rounded bg-blue-500 text-white font-semibold"
                            data-active="true"
                        {
                            (day)
                        }
                    } @else {
                        div class="py-1.5 rounded text-gray-500 dark:text-gray-400" { (day) }
                    }
                }
            }
        }
    }
}

/// The state needed for the calendar fragment endpoint.
#[derive(Debug, Clone)]
pub struct CalendarState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CalendarState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Query parameters for the calendar fragment.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u8,
}

/// Route handler for the calendar fragment used by the month navigation.
pub async fn get_calendar_fragment(
    State(state): State<CalendarState>,
    Query(query): Query<CalendarQuery>,
) -> Response {
    let month = match Month::try_from(query.month) {
        Ok(month) => month,
        Err(_) => return Error::NotFound.into_response(),
    };

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

    let active = active_days(&posts, query.year, month, local_offset);

    calendar_view(query.year, month, &active).into_response()
}

#[cfg(test)]
mod active_days_tests {
    use time::{Month, UtcOffset, macros::datetime};

    use crate::post::Post;

    use super::active_days;

    fn post_created_at(created_at: time::OffsetDateTime) -> Post {
        Post {
            id: 1,
            title: "title".to_string(),
            content: "content".to_string(),
            category: "Math".to_string(),
            image_urls: Vec::new(),
            created_at,
        }
    }

    #[test]
    fn post_is_bucketed_under_its_local_day_only() {
        let posts = vec![post_created_at(datetime!(2026-02-14 09:00:00 UTC))];

        let february = active_days(&posts, 2026, Month::February, UtcOffset::UTC);
        assert_eq!(february, std::collections::HashSet::from([14]));

        assert!(active_days(&posts, 2026, Month::January, UtcOffset::UTC).is_empty());
        assert!(active_days(&posts, 2026, Month::March, UtcOffset::UTC).is_empty());
        assert!(active_days(&posts, 2025, Month::February, UtcOffset::UTC).is_empty());
    }

    #[test]
    fn bucketing_follows_the_local_timezone() {
        let posts = vec![post_created_at(datetime!(2026-02-14 23:30:00 UTC))];
        let plus_nine = UtcOffset::from_hms(9, 0, 0).unwrap();

        let february = active_days(&posts, 2026, Month::February, plus_nine);

        assert_eq!(february, std::collections::HashSet::from([15]));
    }

    #[test]
    fn multiple_posts_on_one_day_mark_it_once() {
        let posts = vec![
            post_created_at(datetime!(2026-02-14 09:00:00 UTC)),
            post_created_at(datetime!(2026-02-14 21:00:00 UTC)),
            post_created_at(datetime!(2026-02-20 12:00:00 UTC)),
        ];

        let february = active_days(&posts, 2026, Month::February, UtcOffset::UTC);

        assert_eq!(february, std::collections::HashSet::from([14, 20]));
    }
}
