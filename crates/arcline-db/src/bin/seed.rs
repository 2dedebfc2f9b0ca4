//! # Seed Data Generator
//!
//! Populates the database with test customers, jobs, and line items for
//! development.
//!
//! ## Usage
//! ```bash
//! # Generate 25 customers (default)
//! cargo run -p arcline-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p arcline-db --bin seed -- --count 100
//!
//! # Specify database path
//! cargo run -p arcline-db --bin seed -- --db ./data/arcline.db
//! ```
//!
//! ## Generated Data
//! Each customer gets 1-3 jobs; each job gets 1-5 line items drawn from a
//! small catalog of electrical work (panel upgrades, outlets, fixtures,
//! labour). Prices and quantities are deterministic functions of the row
//! index, so repeated runs against fresh databases produce identical data.

use std::env;

use tracing_subscriber::EnvFilter;

use arcline_core::{NewCustomer, NewJob, NewJobItem};
use arcline_db::{Database, DbConfig};

/// First/last names for generated customers.
const FIRST_NAMES: &[&str] = &[
    "Ada", "Ben", "Carla", "Dev", "Elena", "Frank", "Grace", "Hugo", "Iris", "Jonas", "Kira",
    "Liam", "Mona", "Nate", "Opal", "Pete", "Quinn", "Rosa", "Sam", "Tess",
];
const LAST_NAMES: &[&str] = &[
    "Marsh", "Cole", "Ortiz", "Patel", "Reyes", "Shaw", "Tran", "Usher", "Vance", "Wells",
    "Young", "Zhou", "Adler", "Brandt", "Cruz", "Doyle",
];

/// Streets for job locations.
const STREETS: &[&str] = &[
    "Cedar St", "Elm Ave", "Juniper Ln", "Mesa Dr", "Oak Blvd", "Pecan Way", "Willow Ct",
];

/// Job titles the trade actually books.
const JOB_TITLES: &[&str] = &[
    "Panel upgrade to 200A",
    "Add kitchen outlets",
    "Ceiling fan install",
    "EV charger install",
    "Troubleshoot tripping breaker",
    "Recessed lighting retrofit",
    "Hot tub circuit",
    "Smoke detector replacement",
];

/// Line-item catalog: (description, unit price in cents, quantity in milli).
const CATALOG: &[(&str, i64, i64)] = &[
    ("Labour", 8500, 1000),
    ("Labour", 8500, 2500),
    ("200A load center", 32_000, 1000),
    ("20A GFCI outlet", 2800, 2000),
    ("14/2 NM-B cable (per ft)", 95, 50_000),
    ("12/2 NM-B cable (per ft)", 120, 25_000),
    ("Single-pole breaker", 1400, 3000),
    ("52in ceiling fan", 18_900, 1000),
    ("LED recessed kit", 3200, 6000),
    ("Permit fee", 15_000, 1000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 25;
    let mut db_path = String::from("./arcline_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(25);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Arcline Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of customers to generate (default: 25)");
                println!("  -d, --db <PATH>    Database file path (default: ./arcline_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Arcline Seed Data Generator");
    println!("==============================");
    println!("Database:  {}", db_path);
    println!("Customers: {}", count);
    println!();

    // Connect to database
    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing customers
    let existing = db.customers().get_all().await?.len();
    if existing > 0 {
        println!("⚠ Database already has {} customers", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating data...");

    let mut jobs_created = 0;
    let mut items_created = 0;
    let start = std::time::Instant::now();

    for n in 0..count {
        let customer = db.customers().create(&generate_customer(n)).await?;

        // 1-3 jobs per customer
        for j in 0..(1 + (n * 7 + 3) % 3) {
            let seed = n * 10 + j;
            let job = db.jobs().create(&generate_job(&customer.id, seed)).await?;
            jobs_created += 1;

            // 1-5 items per job
            for k in 0..(1 + (seed * 13 + 5) % 5) {
                let (description, unit_price_cents, quantity_milli) =
                    CATALOG[(seed * 3 + k) % CATALOG.len()];
                db.jobs()
                    .add_item(&NewJobItem {
                        job_id: job.id.clone(),
                        description: description.to_string(),
                        quantity_milli,
                        unit_price_cents,
                        notes: None,
                    })
                    .await?;
                items_created += 1;
            }
        }

        if (n + 1) % 10 == 0 {
            println!("  Generated {} customers...", n + 1);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Generated {} customers, {} jobs, {} items in {:?}",
        count, jobs_created, items_created, elapsed
    );

    // Verify search
    println!();
    println!("Verifying search...");
    let results = db.customers().search("marsh").await?;
    println!("  Search 'marsh': {} results", results.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single customer with deterministic data.
fn generate_customer(n: usize) -> NewCustomer {
    let first = FIRST_NAMES[n % FIRST_NAMES.len()];
    let last = LAST_NAMES[(n / FIRST_NAMES.len() + n) % LAST_NAMES.len()];
    let name = format!("{first} {last}");

    NewCustomer {
        email: Some(format!(
            "{}.{}@example.com",
            first.to_lowercase(),
            last.to_lowercase()
        )),
        phone: Some(format!("512-555-{:04}", 100 + n * 7 % 9000)),
        address: Some(format!(
            "{} {}",
            100 + (n * 31) % 900,
            STREETS[n % STREETS.len()]
        )),
        city: Some("Austin".to_string()),
        state: Some("TX".to_string()),
        zip: Some(format!("787{:02}", n % 60)),
        notes: None,
        name,
    }
}

/// Generates a single job with deterministic data.
fn generate_job(customer_id: &str, seed: usize) -> NewJob {
    NewJob {
        customer_id: customer_id.to_string(),
        title: JOB_TITLES[seed % JOB_TITLES.len()].to_string(),
        description: None,
        status: None,
        scheduled_date: None,
        location: Some(format!(
            "{} {}",
            100 + (seed * 17) % 900,
            STREETS[seed % STREETS.len()]
        )),
        notes: None,
    }
}
