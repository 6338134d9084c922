//! Load data script for the SHG platform
//!
//! Writes the sample dataset (users, SHGs, loans, volunteers) into the data
//! directory, replacing any existing documents.
//! Run: cargo run --bin load_data -- --data-dir data

use std::path::PathBuf;

use clap::Parser;
use serde_json::{json, Value};
use tracing::info;

use shg_platform::auth::PASSWORD_PLACEHOLDER;
use shg_platform::config::LogFormat;
use shg_platform::storage::Document;
use shg_platform::{logging, Storage};

#[derive(Parser)]
#[command(name = "load_data")]
#[command(about = "Seed the SHG platform data directory", long_about = None)]
struct Args {
    #[arg(long, env = "SHG_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,
}

fn document(collection: &str, records: Value) -> Document {
    let mut document = Document::new();
    document.insert(collection.to_string(), records);
    document
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let _guard = logging::init(LogFormat::Pretty, None)?;

    let storage = Storage::open(&args.data_dir)?;

    let users = json!([
        {
            "id": 1,
            "email": "member@shg.com",
            "password": PASSWORD_PLACEHOLDER,
            "role": "member",
            "shgCode": "SHG-MP-001",
            "name": "Priya Sharma",
            "createdAt": "2024-01-15"
        },
        {
            "id": 2,
            "email": "admin@shg.com",
            "password": PASSWORD_PLACEHOLDER,
            "role": "admin",
            "shgCode": "SHG-MP-001",
            "name": "Meera Sharma",
            "createdAt": "2024-01-10"
        },
        {
            "id": 3,
            "email": "volunteer@shg.com",
            "password": PASSWORD_PLACEHOLDER,
            "role": "volunteer",
            "name": "Rajesh Kumar",
            "state": "Madhya Pradesh",
            "district": "Indore",
            "createdAt": "2024-02-01"
        }
    ]);

    let shgs = json!([
        {
            "id": 1,
            "code": "SHG-MP-001",
            "name": "Mahila Vikas SHG",
            "state": "Madhya Pradesh",
            "district": "Indore",
            "block": "Indore Urban",
            "members": 15,
            "savings": 250000,
            "loans": 8,
            "foundedYear": 2018,
            "head": "Meera Sharma",
            "contact": "9876543210",
            "email": "mahila.vikas@shg.com"
        },
        {
            "id": 2,
            "code": "SHG-MP-002",
            "name": "Shakti Nari SHG",
            "state": "Madhya Pradesh",
            "district": "Ujjain",
            "block": "Ujjain Urban",
            "members": 12,
            "savings": 180000,
            "loans": 5,
            "foundedYear": 2019,
            "head": "Anjali Verma",
            "contact": "9876543211",
            "email": "shakti.nari@shg.com"
        },
        {
            "id": 3,
            "code": "SHG-MP-003",
            "name": "Naari Shakti SHG",
            "state": "Madhya Pradesh",
            "district": "Indore",
            "block": "Indore",
            "members": 18,
            "savings": 320000,
            "loans": 10,
            "foundedYear": 2017,
            "head": "Sunita Patel",
            "contact": "9876543212",
            "email": "naari.shakti@shg.com"
        }
    ]);

    let loans = json!([
        {
            "id": 1,
            "shgCode": "SHG-MP-001",
            "memberName": "Priya Sharma",
            "amount": 50000,
            "purpose": "Business expansion",
            "status": "approved",
            "date": "2025-01-04",
            "interestRate": "7%",
            "approvalDate": "2025-01-05",
            "approvedBy": "admin"
        },
        {
            "id": 2,
            "shgCode": "SHG-MP-002",
            "memberName": "Anjali Verma",
            "amount": 30000,
            "purpose": "Agricultural tools",
            "status": "pending",
            "date": "2025-01-03",
            "interestRate": "TBD",
            "approvalDate": null,
            "approvedBy": null
        },
        {
            "id": 3,
            "shgCode": "SHG-MP-003",
            "memberName": "Sunita Patel",
            "amount": 75000,
            "purpose": "Dairy setup",
            "status": "approved",
            "date": "2025-01-01",
            "interestRate": "7%",
            "approvalDate": "2025-01-02",
            "approvedBy": "admin"
        }
    ]);

    let volunteers = json!([
        {
            "id": 1,
            "name": "Rajesh Kumar",
            "email": "rajesh@example.com",
            "phone": "9876543210",
            "state": "Madhya Pradesh",
            "district": "Indore",
            "skills": ["Business Mentorship", "Digital Training", "Marketing"],
            "hoursVolunteered": 24,
            "activitiesJoined": 5,
            "shgsSupported": 3,
            "status": "active",
            "registrationDate": "2024-10-15"
        },
        {
            "id": 2,
            "name": "Neha Singh",
            "email": "neha@example.com",
            "phone": "9876543211",
            "state": "Maharashtra",
            "district": "Pune",
            "skills": ["Agriculture", "Women Empowerment", "Training"],
            "hoursVolunteered": 18,
            "activitiesJoined": 4,
            "shgsSupported": 2,
            "status": "active",
            "registrationDate": "2024-11-05"
        }
    ]);

    for (collection, records) in [
        ("users", users),
        ("shgs", shgs),
        ("loans", loans),
        ("volunteers", volunteers),
    ] {
        let count = records.as_array().map_or(0, Vec::len);
        storage.write(collection, &document(collection, records))?;
        info!(collection, count, "seeded");
    }

    // Reading back through the typed layer catches shape mistakes above
    let overview = storage.national_overview()?;
    info!(
        data_dir = %storage.data_dir().display(),
        shgs = overview.stats.active_shgs,
        pending_loans = overview.stats.pending_loans,
        "sample data loaded"
    );
    Ok(())
}
