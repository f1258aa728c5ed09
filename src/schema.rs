//! Table definitions and the bootstrap that creates them.
//!
//! The repository assumes its table already exists; callers that own the
//! database run [`initialize_schema`] once before handing the path over.

use log::debug;
use rusqlite::Connection;

/// Schema definition for the SQLite database
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    pub tables: Vec<TableDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }
    pub fn add_table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    /// Declaration order is the positional order rows are decoded in.
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Idempotent `CREATE TABLE` statement for this table.
    pub fn create_statement(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(ColumnDefinition::render)
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS {} ({});", self.name, columns)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn render(&self) -> String {
        let mut parts = vec![self.name.clone(), self.data_type.as_sql().to_string()];
        parts.extend(self.constraints.iter().map(|c| c.as_sql().to_string()));
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Text,
    Boolean,
}

impl DataType {
    fn as_sql(&self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
            DataType::Boolean => "BOOLEAN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConstraint {
    /// `PRIMARY KEY AUTOINCREMENT`; only valid on an `INTEGER` column.
    AutoIncrementKey,
    NotNull,
}

impl ColumnConstraint {
    fn as_sql(&self) -> &'static str {
        match self {
            ColumnConstraint::AutoIncrementKey => "PRIMARY KEY AUTOINCREMENT",
            ColumnConstraint::NotNull => "NOT NULL",
        }
    }
}

pub const VEHICLES_TABLE: &str = "vehicles";

/// The `vehicles` table in the column order the repository decodes.
pub fn vehicles_table() -> TableDefinition {
    let required = |name: &str, data_type| {
        ColumnDefinition::new(name, data_type).with_constraint(ColumnConstraint::NotNull)
    };
    TableDefinition::new(VEHICLES_TABLE)
        .with_column(
            ColumnDefinition::new("id", DataType::Integer)
                .with_constraint(ColumnConstraint::AutoIncrementKey),
        )
        .with_column(required("plate", DataType::Text))
        .with_column(required("make", DataType::Text))
        .with_column(required("model", DataType::Text))
        .with_column(required("registration_date", DataType::Text))
        .with_column(required("license_active", DataType::Boolean))
        .with_column(required("category", DataType::Text))
}

pub fn vehicles_schema() -> Schema {
    Schema::new().add_table(vehicles_table())
}

/// Creates every table of `schema` that does not exist yet.
pub fn initialize_schema(conn: &Connection, schema: &Schema) -> rusqlite::Result<()> {
    for table in &schema.tables {
        let sql = table.create_statement();
        debug!("initializing table {}: {}", table.name, sql);
        conn.execute_batch(&sql)?;
    }
    Ok(())
}
