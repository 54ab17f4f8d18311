//! Database initialization for the application's domain tables.

use rusqlite::Connection;

use crate::{auth::create_user_table, category::create_category_table, post::create_post_table};

/// Create the tables for the application's domain models if they do not exist.
///
/// # Errors
///
/// Returns an error if any of the SQL queries fail.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    create_user_table(connection)?;
    create_category_table(connection)?;
    create_post_table(connection)?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn creates_all_tables() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");

        let count: i64 = connection
            .query_row(
                "SELECT COUNT(1) FROM sqlite_master WHERE type = 'table' \
                AND name IN ('user', 'category', 'post')",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(count, 3);
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");
        initialize(&connection).expect("Second initialize should not fail");
    }
}
