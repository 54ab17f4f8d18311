//! Journal posts: domain types, persistence, and the pages for creating and
//! viewing them.

mod card;
mod create;
mod db;
mod detail;
mod domain;

pub use create::{CreatePostEndpointState, create_post_endpoint, get_new_post_page};
pub use db::{
    NewPost, create_post, create_post_table, get_all_posts, get_post, get_post_categories,
};
pub use detail::{PostDetailState, get_post_detail_page};
pub use domain::{NewPostFormData, Post, PostId};

pub(crate) use card::{format_post_date, post_card};
