//! Database operations for posts.

use rusqlite::{Connection, Row, types::Type};
use time::OffsetDateTime;

use crate::{
    Error,
    post::{Post, PostId},
};

/// A post as submitted by the creation form, before it has an ID or timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: String,
    pub image_urls: Vec<String>,
}

/// Insert a post and return it with its generated ID and creation timestamp.
pub fn create_post(new_post: NewPost, connection: &Connection) -> Result<Post, Error> {
    let created_at = OffsetDateTime::now_utc();
    let image_urls_json = serde_json::to_string(&new_post.image_urls)
        .map_err(|error| Error::JsonError(error.to_string()))?;

    connection.execute(
        "INSERT INTO post (title, content, category, image_urls, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5);",
        (
            &new_post.title,
            &new_post.content,
            &new_post.category,
            &image_urls_json,
            created_at,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Post {
        id,
        title: new_post.title,
        content: new_post.content,
        category: new_post.category,
        image_urls: new_post.image_urls,
        created_at,
    })
}

/// Retrieve a single post by ID.
pub fn get_post(post_id: PostId, connection: &Connection) -> Result<Post, Error> {
    connection
        .prepare(
            "SELECT id, title, content, category, image_urls, created_at
                FROM post WHERE id = :id;",
        )?
        .query_row(&[(":id", &post_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all posts, newest first.
pub fn get_all_posts(connection: &Connection) -> Result<Vec<Post>, Error> {
    connection
        .prepare(
            "SELECT id, title, content, category, image_urls, created_at
                FROM post ORDER BY created_at DESC, id DESC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_post| maybe_post.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the category label of every post, in insertion order.
///
/// Labels are not deduplicated here; the unification step handles that.
pub fn get_post_categories(connection: &Connection) -> Result<Vec<String>, Error> {
    connection
        .prepare("SELECT category FROM post ORDER BY id ASC;")?
        .query_map([], |row| row.get(0))?
        .map(|maybe_label| maybe_label.map_err(|error| error.into()))
        .collect()
}

/// Initialize the post table and indexes.
pub fn create_post_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS post (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT '',
            image_urls TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_post_created_at ON post(created_at);
        CREATE INDEX IF NOT EXISTS idx_post_category ON post(category);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Post, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let content = row.get(2)?;
    let category = row.get(3)?;
    let raw_image_urls: String = row.get(4)?;
    let image_urls = serde_json::from_str(&raw_image_urls).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(error))
    })?;
    let created_at = row.get(5)?;

    Ok(Post {
        id,
        title,
        content,
        category,
        image_urls,
        created_at,
    })
}
