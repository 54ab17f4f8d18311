//! Core post domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Database identifier for a post.
pub type PostId = i64;

/// A journal post. Posts are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    /// Free-text category label. A soft link: there is no referential
    /// integrity with the category table, and the empty string means
    /// "no category".
    pub category: String,
    /// Public URLs of the attached images, in attachment order.
    pub image_urls: Vec<String>,
    pub created_at: OffsetDateTime,
}

/// Form data for post creation.
///
/// `image_urls` holds the public URLs returned by the upload endpoint, one
/// hidden input per uploaded image.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewPostFormData {
    pub category: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
}
