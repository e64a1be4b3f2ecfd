use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_tracker::{
    initialize_db,
    models::{Category, NewExpense},
    service::ExpenseService,
    stores::sqlite::SQLiteExpenseStore,
};

/// A utility for creating a test database for the REST API server of expense_tracker.
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

    println!("Creating test expenses...");

    let service = ExpenseService::new(SQLiteExpenseStore::new(Arc::new(Mutex::new(conn))));
    let today = OffsetDateTime::now_utc().date();

    let samples = [
        ("Groceries", 84.20, Category::Food, 0),
        ("Bus pass", 50.00, Category::Transport, 1),
        ("Cinema tickets", 32.00, Category::Entertainment, 3),
        ("Electricity bill", 121.45, Category::Utilities, 7),
        ("Pharmacy", 18.90, Category::Health, 10),
        ("Running shoes", 149.99, Category::Shopping, 14),
        ("Lunch", 16.50, Category::Food, 15),
        ("Birthday gift", 40.00, Category::Other, 30),
    ];

    for (description, amount, category, days_ago) in samples {
        let date = today - Duration::days(days_ago);
        service.create(NewExpense::new(description, amount, category, date)?)?;
    }

    println!("Created {} expenses.", samples.len());
    println!("Success!");

    Ok(())
}
