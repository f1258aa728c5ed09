use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{RepositoryError, Result};
use crate::models::{Category, Vehicle};
use crate::repository::CrudRepository;
use crate::schema::{initialize_schema, vehicles_schema, Schema};

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_VEHICLES: &str = "SELECT id, plate, make, model, registration_date, license_active, category FROM vehicles";

const SELECT_VEHICLE_BY_ID: &str = "SELECT id, plate, make, model, registration_date, license_active, category FROM vehicles WHERE id = ?1";

const INSERT_VEHICLE: &str = "INSERT INTO vehicles (plate, make, model, registration_date, license_active, category) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const UPDATE_VEHICLE: &str = "UPDATE vehicles SET plate = ?1, make = ?2, model = ?3, registration_date = ?4, license_active = ?5, category = ?6 WHERE id = ?7";

const DELETE_VEHICLE: &str = "DELETE FROM vehicles WHERE id = ?1";

/// SQLite configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SqliteConfig {
    /// Path or `file:` URI of the SQLite database
    pub db_path: String,
    /// Tables created by [`SqliteConfig::initialize`]
    pub schema: Schema,
}

impl SqliteConfig {
    /// Create a new SQLite config with path and schema
    pub fn new(db_path: impl Into<String>, schema: Schema) -> Self {
        Self {
            db_path: db_path.into(),
            schema,
        }
    }

    /// Config at `db_path` carrying the vehicles schema
    pub fn for_vehicles(db_path: impl Into<String>) -> Self {
        Self::new(db_path, vehicles_schema())
    }

    /// Named in-memory database shared by every connection in the process.
    ///
    /// SQLite drops it when its last connection closes, so the caller must keep
    /// one connection open for as long as the data should live.
    pub fn shared_memory(name: &str) -> Self {
        Self::for_vehicles(format!("file:{name}?mode=memory&cache=shared"))
    }

    /// Opens a fresh connection. It is closed when dropped.
    pub fn open_connection(&self) -> Result<Connection> {
        Connection::open(&self.db_path).map_err(|source| RepositoryError::Connection {
            path: self.db_path.clone(),
            source,
        })
    }

    /// Creates the configured tables if they are missing.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.open_connection()?;
        initialize_schema(&conn, &self.schema)?;
        Ok(())
    }
}

/// Raw column values in the table's positional order.
///
/// SQLite does not enforce declared column types, so every value is read
/// untyped and checked in [`VehicleRow::into_vehicle`].
struct VehicleRow {
    id: Value,
    plate: Value,
    make: Value,
    model: Value,
    registration_date: Value,
    license_active: Value,
    category: Value,
}

impl VehicleRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            plate: row.get(1)?,
            make: row.get(2)?,
            model: row.get(3)?,
            registration_date: row.get(4)?,
            license_active: row.get(5)?,
            category: row.get(6)?,
        })
    }

    fn into_vehicle(self) -> Result<Vehicle> {
        let registration_date = decode_text("registration_date", self.registration_date)?;
        let registration_date = NaiveDate::parse_from_str(&registration_date, DATE_FORMAT)
            .map_err(|e| RepositoryError::Decode {
                column: "registration_date",
                value: registration_date.clone(),
                reason: e.to_string(),
            })?;
        let category: Category = decode_text("category", self.category)?.parse()?;
        Ok(Vehicle {
            id: decode_integer("id", self.id)?,
            plate: decode_text("plate", self.plate)?,
            make: decode_text("make", self.make)?,
            model: decode_text("model", self.model)?,
            registration_date,
            license_active: decode_bool("license_active", self.license_active)?,
            category,
        })
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} byte blob>", b.len()),
    }
}

fn type_mismatch(column: &'static str, value: &Value, expected: &str) -> RepositoryError {
    RepositoryError::Decode {
        column,
        value: describe(value),
        reason: format!("expected {expected}"),
    }
}

fn decode_text(column: &'static str, value: Value) -> Result<String> {
    match value {
        Value::Text(s) => Ok(s),
        other => Err(type_mismatch(column, &other, "text")),
    }
}

fn decode_integer(column: &'static str, value: Value) -> Result<i64> {
    match value {
        Value::Integer(i) => Ok(i),
        other => Err(type_mismatch(column, &other, "an integer")),
    }
}

// Booleans are stored as integers; any non-zero value is true.
fn decode_bool(column: &'static str, value: Value) -> Result<bool> {
    match value {
        Value::Integer(i) => Ok(i != 0),
        other => Err(type_mismatch(column, &other, "a boolean integer")),
    }
}

fn encode_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Vehicle repository that opens one connection per operation.
///
/// `update` and `delete` check existence with [`CrudRepository::get_by_id`]
/// and then write on a second connection. No transaction spans the two, so
/// concurrent callers can race between the check and the write.
#[derive(Debug, Clone)]
pub struct SqliteVehicleRepository {
    config: SqliteConfig,
}

impl SqliteVehicleRepository {
    /// Create a repository that opens connections from `config`
    pub fn new(config: SqliteConfig) -> Self {
        Self { config }
    }

    /// The configuration connections are opened from
    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    fn connect(&self) -> Result<Connection> {
        debug!("opening connection to {}", self.config.db_path);
        self.config.open_connection()
    }
}

impl CrudRepository<i64, Vehicle> for SqliteVehicleRepository {
    type Error = RepositoryError;

    fn create(&self, entity: &Vehicle) -> Result<Vehicle> {
        debug!("saving vehicle with plate {}", entity.plate);
        let conn = self.connect()?;

        let affected = conn.execute(
            INSERT_VEHICLE,
            params![
                entity.plate,
                entity.make,
                entity.model,
                encode_date(entity.registration_date),
                entity.license_active,
                entity.category.as_str(),
            ],
        )?;
        if affected != 1 {
            return Err(RepositoryError::Persistence(format!(
                "insert of vehicle {} affected {} rows",
                entity.plate, affected
            )));
        }

        // 0 means no row was inserted on this connection
        let id = conn.last_insert_rowid();
        if id == 0 {
            return Err(RepositoryError::Persistence(format!(
                "no identifier generated for vehicle {}",
                entity.plate
            )));
        }

        info!("saved vehicle {} with id {}", entity.plate, id);
        Ok(entity.clone().with_id(id))
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Vehicle>> {
        debug!("fetching vehicle with id {}", id);
        let conn = self.connect()?;

        let row = conn
            .query_row(SELECT_VEHICLE_BY_ID, [id], VehicleRow::from_row)
            .optional()?;

        row.map(VehicleRow::into_vehicle).transpose()
    }

    fn get_all(&self) -> Result<Vec<Vehicle>> {
        debug!("fetching all vehicles");
        let conn = self.connect()?;

        let mut stmt = conn.prepare(SELECT_VEHICLES)?;
        let vehicles = stmt
            .query_map([], VehicleRow::from_row)?
            .map(|row| row.map_err(RepositoryError::from)?.into_vehicle())
            .collect::<Result<Vec<_>>>()?;

        debug!("fetched {} vehicles", vehicles.len());
        Ok(vehicles)
    }

    /// Overwrites every column except `id` and stamps today's date.
    ///
    /// The date on `entity` is ignored. The returned vehicle is the stored
    /// snapshot from before the write with only `registration_date` replaced.
    fn update(&self, id: i64, entity: &Vehicle) -> Result<Option<Vehicle>> {
        debug!("updating vehicle with id {}", id);
        let Some(existing) = self.get_by_id(id)? else {
            debug!("vehicle {} not found, nothing to update", id);
            return Ok(None);
        };

        let today = Local::now().date_naive();
        let conn = self.connect()?;
        let affected = conn.execute(
            UPDATE_VEHICLE,
            params![
                entity.plate,
                entity.make,
                entity.model,
                encode_date(today),
                entity.license_active,
                entity.category.as_str(),
                id,
            ],
        )?;
        if affected != 1 {
            return Err(RepositoryError::Persistence(format!(
                "update of vehicle {} affected {} rows",
                id, affected
            )));
        }

        info!("updated vehicle {}", id);
        Ok(Some(existing.with_registration_date(today)))
    }

    fn delete(&self, id: i64) -> Result<Option<Vehicle>> {
        debug!("deleting vehicle with id {}", id);
        let Some(existing) = self.get_by_id(id)? else {
            debug!("vehicle {} not found, nothing to delete", id);
            return Ok(None);
        };

        let conn = self.connect()?;
        let affected = conn.execute(DELETE_VEHICLE, [id])?;
        if affected == 0 {
            warn!("delete of vehicle {} removed no rows", id);
        } else {
            info!("deleted vehicle {}", id);
        }

        Ok(Some(existing))
    }
}
