//! Shared view templates for rendering posts.

use maud::{Markup, html};
use time::{
    OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{
    endpoints::{self, format_endpoint},
    html::{CATEGORY_BADGE_STYLE, PANEL_STYLE},
    post::Post,
};

/// The label shown when a post has no category.
pub(crate) const GENERAL_CATEGORY_LABEL: &str = "General";

const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// Format a post's creation time in the configured local timezone.
pub(crate) fn format_post_date(date_time: OffsetDateTime, local_offset: UtcOffset) -> String {
    date_time
        .to_offset(local_offset)
        .format(DATE_FORMAT)
        .unwrap_or_default()
}

/// The category badge shown on post cards and the post detail page.
///
/// An empty category label gets a neutral "General" badge.
pub(crate) fn category_badge(category: &str) -> Markup {
    let label = if category.is_empty() {
        GENERAL_CATEGORY_LABEL
    } else {
        category
    };

    html! {
        span class=(CATEGORY_BADGE_STYLE) { (label) }
    }
}

/// How many characters of the content to show on a board card.
const EXCERPT_LENGTH: usize = 120;

fn excerpt(content: &str) -> String {
    if content.chars().count() <= EXCERPT_LENGTH {
        return content.to_string();
    }

    let truncated: String = content.chars().take(EXCERPT_LENGTH).collect();
    format!("{truncated}…")
}

/// A board card linking to the post's detail page.
pub(crate) fn post_card(post: &Post, local_offset: UtcOffset) -> Markup {
    let detail_url = format_endpoint(endpoints::POST_VIEW, post.id);

    html! {
        a href=(detail_url) class="block hover:opacity-90"
        {
            article class=(PANEL_STYLE)
            {
                @if let Some(image_url) = post.image_urls.first() {
                    img
                        src=(image_url)
                        alt=""
                        class="mb-3 h-36 w-full object-cover rounded";
                }

                (category_badge(&post.category))

                h2 class="mt-2 text-lg font-semibold" { (post.title) }

                p class="mt-1 text-sm text-gray-500 dark:text-gray-400" {
                    (excerpt(&post.content))
                }

                p class="mt-2 text-xs text-gray-400 dark:text-gray-500" {
                    (format_post_date(post.created_at, local_offset))
                }
            }
        }
    }
}
