//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise the full core lifecycle: config, logging, open, query, close.
//! - Print the customer list and best-customer report for a quick sanity
//!   check of a database file.

use log::error;
use lunchly_core::{
    close_db, init_logging, open_db, AppConfig, CustomerService, SqliteCustomerRepository,
    SqliteReservationRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("lunchly_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    init_logging(config.log_level, &config.log_dir)?;

    println!("lunchly_core version={}", lunchly_core::core_version());

    let conn = open_db(&config.db_path)?;
    {
        let service = CustomerService::new(
            SqliteCustomerRepository::new(&conn),
            SqliteReservationRepository::new(&conn),
        );

        let customers = service.list_customers()?;
        println!("customers={}", customers.len());
        for customer in &customers {
            let id = customer.id.unwrap_or_default();
            println!("  #{id} {}", customer.full_name());
        }

        let best = service.best_customers()?;
        println!("best_customers={}", best.len());
        for ranking in &best {
            println!(
                "  {} reservations={}",
                ranking.customer.full_name(),
                ranking.reservation_count
            );
        }
    }
    close_db(conn)?;

    Ok(())
}
