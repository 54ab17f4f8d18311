use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use studylog::{PasswordHash, ValidatedPassword, initialize_db};

/// A utility for creating a test database for the StudyLog web server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test user...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked("test"),
        PasswordHash::DEFAULT_COST,
    )?;

    conn.execute(
        "INSERT INTO user (email, password) VALUES (?1, ?2)",
        ("test@test.com", password_hash.to_string()),
    )?;

    println!("Creating test categories...");

    let now = OffsetDateTime::now_utc();

    for name in ["Math", "Physics", "Chemistry"] {
        conn.execute(
            "INSERT INTO category (name, created_at) VALUES (?1, ?2)",
            (name, now),
        )?;
    }

    println!("Creating test posts...");

    let posts = [
        ("Derivatives", "Worked through the chain rule.", "Math", 0),
        ("Kinematics", "Projectile motion problems.", "Physics", 1),
        ("Stoichiometry", "Balancing equations practice.", "Chemistry", 1),
        ("Integrals", "Integration by parts.", "Math", 3),
        ("Untagged notes", "Quick scratchpad entry.", "", 10),
        ("Optics", "Refraction and lenses.", "Physics", 40),
    ];

    for (title, content, category, days_ago) in posts {
        conn.execute(
            "INSERT INTO post (title, content, category, image_urls, created_at) \
            VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                title,
                content,
                category,
                "[]",
                now - Duration::days(days_ago),
            ),
        )?;
    }

    println!("Success!");
    println!("Log in with email 'test@test.com' and password 'test'.");

    Ok(())
}
