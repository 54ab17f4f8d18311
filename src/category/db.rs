//! Database operations for categories.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    category::{Category, CategoryName},
};

/// Create a category and return it with its generated ID.
///
/// # Errors
///
/// Returns an [Error::DuplicateCategory] if a category with the same name
/// already exists.
pub fn create_category(name: CategoryName, connection: &Connection) -> Result<Category, Error> {
    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO category (name, created_at) VALUES (?1, ?2);",
        (name.as_ref(), created_at),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name,
        created_at,
    })
}

/// Retrieve all categories in creation order.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, created_at FROM category ORDER BY created_at ASC, id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Retrieve all category names ordered alphabetically.
///
/// This is the source projection for the post creation form's selector.
pub fn get_category_names(connection: &Connection) -> Result<Vec<String>, Error> {
    connection
        .prepare("SELECT name FROM category ORDER BY name ASC;")?
        .query_map([], |row| row.get(0))?
        .map(|maybe_name| maybe_name.map_err(|error| error.into()))
        .collect()
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_category_name ON category(name);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);
    let created_at = row.get(2)?;

    Ok(Category {
        id,
        name,
        created_at,
    })
}

#[cfg(test)]
mod category_name_tests {
    use crate::{Error, category::CategoryName};

    #[test]
    fn new_fails_on_empty_string() {
        let category_name = CategoryName::new("");

        assert_eq!(category_name, Err(Error::EmptyCategoryName));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        let category_name = CategoryName::new("\n\t \r");

        assert_eq!(category_name, Err(Error::EmptyCategoryName));
    }

    #[test]
    fn new_trims_surrounding_whitespace() {
        let category_name = CategoryName::new("  Math ").unwrap();

        assert_eq!(category_name.as_ref(), "Math");
    }

    #[test]
    fn new_succeeds_on_non_empty_string() {
        let category_name = CategoryName::new("🔥");

        assert!(category_name.is_ok())
    }
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{CategoryName, create_category, get_all_categories, get_category_names},
    };

    use super::create_category_table;

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_category_table(&connection).expect("Could not create category table");
        connection
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();
        let name = CategoryName::new("Terrifically a category").unwrap();

        let category = create_category(name.clone(), &connection);

        let got_category = category.expect("Could not create category");
        assert!(got_category.id > 0);
        assert_eq!(got_category.name, name);
    }

    #[test]
    fn create_duplicate_category_fails_and_leaves_store_unchanged() {
        let connection = get_test_db_connection();
        create_category(CategoryName::new_unchecked("Math"), &connection)
            .expect("Could not create test category");

        let result = create_category(CategoryName::new_unchecked("Math"), &connection);

        assert_eq!(result, Err(Error::DuplicateCategory));
        let categories = get_all_categories(&connection).expect("Could not get categories");
        assert_eq!(categories.len(), 1);
    }

    #[test]
    fn get_all_categories_returns_creation_order() {
        let connection = get_test_db_connection();
        for name in ["Zoology", "Algebra", "Music"] {
            create_category(CategoryName::new_unchecked(name), &connection)
                .expect("Could not create test category");
        }

        let categories = get_all_categories(&connection).expect("Could not get categories");

        let names: Vec<&str> = categories
            .iter()
            .map(|category| category.name.as_ref())
            .collect();
        assert_eq!(names, vec!["Zoology", "Algebra", "Music"]);
    }

    #[test]
    fn get_category_names_returns_name_order() {
        let connection = get_test_db_connection();
        for name in ["Zoology", "Algebra", "Music"] {
            create_category(CategoryName::new_unchecked(name), &connection)
                .expect("Could not create test category");
        }

        let names = get_category_names(&connection).expect("Could not get category names");

        assert_eq!(names, vec!["Algebra", "Music", "Zoology"]);
    }
}
