//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_desktop_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm lg:bg-transparent
        lg:text-blue-700 lg:p-0 dark:text-white lg:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700 lg:p-0
        dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700
        dark:hover:text-white lg:dark:hover:bg-transparent"
        };

        html!( a href=(self.url) class=(style) { (self.title) } )
    }
}

/// The navigation chrome shown at the top of every page.
///
/// The final link toggles between "Log in" and "Log out" depending on whether
/// the request carried a valid session. The toggle is recomputed for every
/// request from the request's own cookie jar, so its lifetime is scoped to
/// the request.
pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    ///
    /// `is_logged_in` selects which of the log-in/log-out affordances is shown.
    pub fn new(active_endpoint: &str, is_logged_in: bool) -> NavBar<'_> {
        let session_link = if is_logged_in {
            Link {
                url: endpoints::LOG_OUT,
                title: "Log out",
                is_current: false,
            }
        } else {
            Link {
                url: endpoints::LOG_IN_VIEW,
                title: "Log in",
                is_current: active_endpoint == endpoints::LOG_IN_VIEW,
            }
        };

        let links = vec![
            Link {
                url: endpoints::ROOT,
                title: "Home",
                is_current: active_endpoint == endpoints::ROOT,
            },
            Link {
                url: endpoints::BOARD_VIEW,
                title: "Board",
                is_current: active_endpoint == endpoints::BOARD_VIEW,
            },
            Link {
                url: endpoints::SEARCH_VIEW,
                title: "Search",
                is_current: active_endpoint == endpoints::SEARCH_VIEW,
            },
            session_link,
        ];

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        let links = self.links;

        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href="/"
                        class="flex items-center space-x-3 rtl:space-x-reverse"
                    {
                        span class="text-2xl" { "⚡" }

                        span
                            class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "StudyLog"
                        }
                    }

                    div class="w-full md:block md:w-auto"
                    {
                        ul
                            class="font-medium flex flex-col p-4 md:p-0 mt-4
                            border border-gray-100 rounded bg-gray-50
                            md:flex-row md:space-x-8 rtl:space-x-reverse md:mt-0
                            md:border-0 md:bg-white dark:bg-gray-800
                            md:dark:bg-gray-900 dark:border-gray-700"
                        {
                            @for link in links.into_iter() {
                                li { (link.into_desktop_html()) }
                            }
                        }
                    }
                }
            }
        )
    }
}
