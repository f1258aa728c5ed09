//! SQLite-backed data access for registered vehicles.
//!
//! # Intention
//!
//! - Provide create/read/update/delete operations for the `Vehicle` entity.
//! - Encapsulate SQL text, parameter binding and row decoding in one place.
//!
//! # Architectural Boundaries
//!
//! - Only vehicle persistence belongs here.
//! - Table bootstrap and demo seeding are helpers for callers; the repository
//!   never creates tables on its own.

pub mod error;
pub mod models;
pub mod repository;
pub mod schema;
pub mod sqlite;

pub use error::{RepositoryError, Result};
pub use models::{Category, Vehicle};
pub use repository::{CrudRepository, VehicleRepository};
pub use schema::{initialize_schema, vehicles_table, Schema};
pub use sqlite::{SqliteConfig, SqliteVehicleRepository};
