//! Seeds a shared in-memory store with sample vehicles and walks through
//! every repository operation, printing the results.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use vehicle_store::{Category, CrudRepository, SqliteConfig, SqliteVehicleRepository, Vehicle};

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("invalid date {year}-{month}-{day}"))
}

fn print_lookup(label: &str, vehicle: Option<Vehicle>) {
    match vehicle {
        Some(vehicle) => println!("{label}: {vehicle}"),
        None => println!("{label}: not found"),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = SqliteConfig::shared_memory("vehicle_demo");
    // Keeps the in-memory database alive between per-operation connections.
    let _anchor = config.open_connection()?;
    config.initialize().context("failed to create vehicles table")?;

    let repository = SqliteVehicleRepository::new(config);

    let samples = [
        Vehicle::new("4422KJM", "Ford", "Mondeo", date(2024, 10, 25)?, true, Category::Combustion),
        Vehicle::new("5572JKB", "Toyota", "Prius", date(2022, 8, 25)?, true, Category::Electric),
        Vehicle::new("1234ABC", "Ford", "Focus", date(2020, 5, 14)?, true, Category::Hybrid),
    ];
    for sample in &samples {
        let saved = repository.create(sample)?;
        println!("saved: {saved}");
    }
    println!();

    for vehicle in repository.get_all()? {
        println!("{vehicle}");
    }
    println!();

    print_lookup("get 3", repository.get_by_id(3)?);
    print_lookup("get 4", repository.get_by_id(4)?);
    println!();

    print_lookup("delete 1", repository.delete(1)?);
    for vehicle in repository.get_all()? {
        println!("{vehicle}");
    }
    print_lookup("delete 4", repository.delete(4)?);
    println!();

    print_lookup("update 3", repository.update(3, &samples[2])?);

    Ok(())
}
