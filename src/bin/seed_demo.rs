//! Demo data seeding utility.
//!
//! Creates (or signs in) a demo account and fills it with the bundled
//! sample patient records, so the TUI has something to show on first run.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin seed_demo -- [--username <name>] [--password <secret>] [--data-dir <path>] [--fresh]
//! ```
//!
//! The seeded account is left signed in, so the next app start lands on
//! the dashboard.

use std::sync::Arc;

use medtrack::adapters::{spreadsheet, JsonStorage};
use medtrack::application::{IdentityService, PatientService};
use medtrack::MedtrackError;

const USAGE: &str =
    "Usage: seed_demo [--username <name>] [--password <secret>] [--data-dir <path>] [--fresh]";

fn main() {
    let mut args = std::env::args().skip(1);
    let mut username = "demo".to_string();
    let mut password = "demo password".to_string();
    let mut data_dir: Option<String> = None;
    let mut fresh = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--username" => {
                let v = args.next().unwrap_or_default();
                if v.is_empty() {
                    eprintln!("{USAGE}");
                    std::process::exit(2);
                }
                username = v;
            }
            "--password" => {
                let v = args.next().unwrap_or_default();
                if v.is_empty() {
                    eprintln!("{USAGE}");
                    std::process::exit(2);
                }
                password = v;
            }
            "--data-dir" => {
                let v = args.next().unwrap_or_default();
                if v.is_empty() {
                    eprintln!("{USAGE}");
                    std::process::exit(2);
                }
                data_dir = Some(v);
            }
            "--fresh" => fresh = true,
            "-h" | "--help" => {
                println!(
                    "{USAGE}\n\nRegisters the account (or signs it in when it already exists) and adds the bundled sample patients. --fresh removes the account's existing records first. The data directory defaults to MEDTRACK_DATA_DIR or ./medtrack_data."
                );
                return;
            }
            _ => {
                eprintln!("Unknown arg: {arg}\n{USAGE}");
                std::process::exit(2);
            }
        }
    }

    let data_dir = data_dir
        .or_else(|| std::env::var("MEDTRACK_DATA_DIR").ok())
        .unwrap_or_else(|| "medtrack_data".to_string());

    let storage = match JsonStorage::new(&data_dir) {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            eprintln!("Failed to open data directory {data_dir:?}: {e}");
            std::process::exit(4);
        }
    };

    let identity = IdentityService::new(Arc::clone(&storage));
    let account = match identity.register(&username, &password) {
        Ok(account) => {
            println!("Registered account {username:?}");
            account
        }
        // An existing demo account is fine as long as the password matches.
        Err(MedtrackError::DuplicateUsername(_)) => match identity.login(&username, &password) {
            Ok(account) => {
                println!("Signed in existing account {username:?}");
                account
            }
            Err(e) => {
                eprintln!("Account {username:?} already exists but sign-in failed: {e}");
                std::process::exit(3);
            }
        },
        Err(e) => {
            eprintln!("Failed to register {username:?}: {e}");
            std::process::exit(4);
        }
    };

    let records = PatientService::new(storage);

    if fresh {
        let existing = match records.list_for(&account.id) {
            Ok(existing) => existing,
            Err(e) => {
                eprintln!("Failed to list existing records: {e}");
                std::process::exit(4);
            }
        };
        for patient in &existing {
            if let Err(e) = records.delete(&patient.id) {
                eprintln!("Failed to remove record {}: {e}", patient.id);
                std::process::exit(4);
            }
        }
        if !existing.is_empty() {
            println!("Removed {} existing records", existing.len());
        }
    }

    let samples = spreadsheet::sample_patients();
    let total = samples.len();
    for draft in samples {
        let name = draft.name.clone();
        if let Err(e) = records.create(&account.id, draft) {
            eprintln!("Failed to add {name:?}: {e}");
            std::process::exit(4);
        }
    }

    println!("Seeded {total} sample patients into {data_dir:?}");
    println!("Start the app to browse them; the account is already signed in.");
}
