//! DuckDB schema backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{ColumnInfo, SchemaBackend, VersionRecord};
use chrono::{DateTime, Utc};
use duckdb::Connection;
use std::path::Path;
use vidmod_core::{
    ColumnName, ColumnSpec, ColumnType, ComponentName, SchemaVersion, TableName, TableSpec,
};

/// Schema holding vidmod's own bookkeeping tables.
pub const META_SCHEMA: &str = "vidmod_meta";

/// DuckDB schema backend
///
/// Single-threaded: the engine never runs two migrations at once, so the
/// connection is owned directly.
pub struct DuckDbBackend {
    conn: Connection,
    table_prefix: String,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Self::init(conn)
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Self::init(conn)
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Map every logical table name to `{prefix}{name}`.
    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Physical name of a logical table.
    pub fn physical_name(&self, table: &TableName) -> String {
        format!("{}{}", self.table_prefix, table)
    }

    fn init(conn: Connection) -> DbResult<Self> {
        conn.execute_batch(&format!(
            "CREATE SCHEMA IF NOT EXISTS {META_SCHEMA};
             CREATE TABLE IF NOT EXISTS {META_SCHEMA}.installed_versions (
                 component     VARCHAR NOT NULL,
                 version       BIGINT  NOT NULL,
                 updated_at_ms BIGINT  NOT NULL
             );
             CREATE TABLE IF NOT EXISTS {META_SCHEMA}.version_history (
                 component      VARCHAR NOT NULL,
                 version        BIGINT  NOT NULL,
                 recorded_at_ms BIGINT  NOT NULL
             );"
        ))
        .map_err(|e| DbError::ConnectionError(format!("failed to create version tables: {e}")))?;
        Ok(Self {
            conn,
            table_prefix: String::new(),
        })
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
    /// error.
    fn transaction<F, T>(&self, body: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;

        let result = body(&self.conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
                    let _ = self.conn.execute_batch("ROLLBACK");
                    return Err(DbError::TransactionError(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(_) => {
                let _ = self.conn.execute_batch("ROLLBACK");
            }
        }
        result
    }

    fn execute_ddl(conn: &Connection, sql: &str) -> DbResult<()> {
        log::debug!("duckdb: {sql}");
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))
    }

    fn require_table(&self, table: &TableName) -> DbResult<()> {
        if self.table_exists(table)? {
            Ok(())
        } else {
            Err(DbError::TableNotFound(self.physical_name(table)))
        }
    }

    /// DuckDB type of an existing column, if present.
    fn column_type(&self, table: &TableName, column: &ColumnName) -> DbResult<Option<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT data_type FROM information_schema.columns \
             WHERE table_schema = 'main' AND table_name = ? AND column_name = ?",
        )?;
        let mut rows = stmt.query(duckdb::params![self.physical_name(table), column.as_str()])?;
        let data_type = match rows.next()? {
            Some(row) => Some(row.get(0)?),
            None => None,
        };
        Ok(data_type)
    }
}

/// Quote an identifier. Names are validated identifiers, so no escaping is needed.
fn quote_ident(name: &str) -> String {
    format!("\"{name}\"")
}

/// DuckDB type for a logical column.
pub(crate) fn sql_type(spec: &ColumnSpec) -> String {
    match spec.column_type {
        ColumnType::Char => match spec.length {
            Some(len) => format!("VARCHAR({len})"),
            None => "VARCHAR".to_string(),
        },
        ColumnType::Text => "VARCHAR".to_string(),
        ColumnType::Integer => match spec.length.unwrap_or(10) {
            0..=4 => "SMALLINT".to_string(),
            5..=9 => "INTEGER".to_string(),
            _ => "BIGINT".to_string(),
        },
        ColumnType::Number => format!(
            "DECIMAL({}, {})",
            spec.length.unwrap_or(18).min(38),
            spec.decimals.unwrap_or(0)
        ),
        ColumnType::Float => "DOUBLE".to_string(),
        ColumnType::Binary => "BLOB".to_string(),
    }
}

/// SQL literal for a default value. Non-numeric values are always quoted.
pub(crate) fn sql_literal(value: &str, textual: bool) -> String {
    if !textual && value.parse::<f64>().is_ok() {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "''"))
    }
}

fn is_textual_sql_type(data_type: &str) -> bool {
    let upper = data_type.to_ascii_uppercase();
    upper.starts_with("VARCHAR") || upper.starts_with("TEXT") || upper.starts_with("CHAR")
}

fn column_definition(spec: &ColumnSpec) -> String {
    let mut def = format!("{} {}", quote_ident(&spec.name), sql_type(spec));
    if let Some(default) = &spec.default {
        def.push_str(" DEFAULT ");
        def.push_str(&sql_literal(default, spec.column_type.is_textual()));
    }
    def
}

fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

impl SchemaBackend for DuckDbBackend {
    fn backend_type(&self) -> &'static str {
        "duckdb"
    }

    fn table_exists(&self, table: &TableName) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = 'main' AND table_name = ?",
            duckdb::params![self.physical_name(table)],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn create_table(&self, spec: &TableSpec) -> DbResult<()> {
        if self.table_exists(&spec.name)? {
            return Err(DbError::TableExists(self.physical_name(&spec.name)));
        }
        let mut columns: Vec<String> = Vec::with_capacity(spec.columns.len());
        for column in &spec.columns {
            let mut def = column_definition(column);
            if column.not_null {
                def.push_str(" NOT NULL");
            }
            columns.push(def);
        }
        let sql = format!(
            "CREATE TABLE {} ({})",
            quote_ident(&self.physical_name(&spec.name)),
            columns.join(", ")
        );
        Self::execute_ddl(&self.conn, &sql)
    }

    fn column_exists(&self, table: &TableName, column: &ColumnName) -> DbResult<bool> {
        Ok(self.column_type(table, column)?.is_some())
    }

    fn table_columns(&self, table: &TableName) -> DbResult<Vec<ColumnInfo>> {
        self.require_table(table)?;
        let mut stmt = self.conn.prepare(
            "SELECT column_name, data_type, is_nullable, column_default \
             FROM information_schema.columns \
             WHERE table_schema = 'main' AND table_name = ? \
             ORDER BY ordinal_position",
        )?;
        let rows = stmt.query_map(duckdb::params![self.physical_name(table)], |row| {
            let nullable: String = row.get(2)?;
            Ok(ColumnInfo {
                name: row.get(0)?,
                data_type: row.get(1)?,
                nullable: nullable.eq_ignore_ascii_case("YES"),
                default: row.get(3)?,
            })
        })?;
        let mut columns = Vec::new();
        for row in rows {
            columns.push(row?);
        }
        Ok(columns)
    }

    fn add_column(&self, table: &TableName, spec: &ColumnSpec) -> DbResult<()> {
        self.require_table(table)?;
        if let Some(after) = &spec.after {
            log::debug!(
                "duckdb appends columns; ignoring placement of {}.{} after {after}",
                table,
                spec.name
            );
        }
        let physical = quote_ident(&self.physical_name(table));
        // DuckDB rejects constraints in ADD COLUMN, so NOT NULL is a second
        // statement in the same transaction.
        self.transaction(|conn| {
            Self::execute_ddl(
                conn,
                &format!("ALTER TABLE {physical} ADD COLUMN {}", column_definition(spec)),
            )?;
            if spec.not_null {
                Self::execute_ddl(
                    conn,
                    &format!(
                        "ALTER TABLE {physical} ALTER COLUMN {} SET NOT NULL",
                        quote_ident(&spec.name)
                    ),
                )?;
            }
            Ok(())
        })
    }

    fn drop_column(&self, table: &TableName, column: &ColumnName) -> DbResult<()> {
        if !self.column_exists(table, column)? {
            return Err(DbError::ColumnNotFound {
                table: self.physical_name(table),
                column: column.to_string(),
            });
        }
        Self::execute_ddl(
            &self.conn,
            &format!(
                "ALTER TABLE {} DROP COLUMN {}",
                quote_ident(&self.physical_name(table)),
                quote_ident(column)
            ),
        )
    }

    fn rename_column(
        &self,
        table: &TableName,
        from: &ColumnName,
        to: &ColumnName,
    ) -> DbResult<()> {
        if !self.column_exists(table, from)? {
            return Err(DbError::ColumnNotFound {
                table: self.physical_name(table),
                column: from.to_string(),
            });
        }
        Self::execute_ddl(
            &self.conn,
            &format!(
                "ALTER TABLE {} RENAME COLUMN {} TO {}",
                quote_ident(&self.physical_name(table)),
                quote_ident(from),
                quote_ident(to)
            ),
        )
    }

    fn set_column_default(
        &self,
        table: &TableName,
        column: &ColumnName,
        default: Option<&str>,
    ) -> DbResult<()> {
        let Some(data_type) = self.column_type(table, column)? else {
            return Err(DbError::ColumnNotFound {
                table: self.physical_name(table),
                column: column.to_string(),
            });
        };
        let action = match default {
            Some(value) => format!(
                "SET DEFAULT {}",
                sql_literal(value, is_textual_sql_type(&data_type))
            ),
            None => "DROP DEFAULT".to_string(),
        };
        Self::execute_ddl(
            &self.conn,
            &format!(
                "ALTER TABLE {} ALTER COLUMN {} {action}",
                quote_ident(&self.physical_name(table)),
                quote_ident(column)
            ),
        )
    }

    fn installed_version(&self, component: &ComponentName) -> DbResult<SchemaVersion> {
        let version: i64 = self.conn.query_row(
            &format!(
                "SELECT COALESCE(MAX(version), 0) FROM {META_SCHEMA}.installed_versions \
                 WHERE component = ?"
            ),
            duckdb::params![component.as_str()],
            |row| row.get(0),
        )?;
        Ok(SchemaVersion::new(version))
    }

    fn set_installed_version(
        &self,
        component: &ComponentName,
        version: SchemaVersion,
    ) -> DbResult<()> {
        let now = Utc::now().timestamp_millis();
        self.transaction(|conn| {
            conn.execute(
                &format!("DELETE FROM {META_SCHEMA}.installed_versions WHERE component = ?"),
                duckdb::params![component.as_str()],
            )?;
            conn.execute(
                &format!(
                    "INSERT INTO {META_SCHEMA}.installed_versions \
                     (component, version, updated_at_ms) VALUES (?, ?, ?)"
                ),
                duckdb::params![component.as_str(), version.get(), now],
            )?;
            conn.execute(
                &format!(
                    "INSERT INTO {META_SCHEMA}.version_history \
                     (component, version, recorded_at_ms) VALUES (?, ?, ?)"
                ),
                duckdb::params![component.as_str(), version.get(), now],
            )?;
            Ok(())
        })
    }

    fn version_history(&self, component: Option<&ComponentName>) -> DbResult<Vec<VersionRecord>> {
        let mut sql = format!(
            "SELECT component, version, recorded_at_ms FROM {META_SCHEMA}.version_history"
        );
        if component.is_some() {
            sql.push_str(" WHERE component = ?");
        }
        sql.push_str(" ORDER BY recorded_at_ms, version");

        let mut stmt = self.conn.prepare(&sql)?;
        let map_row = |row: &duckdb::Row<'_>| -> duckdb::Result<(String, i64, i64)> {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        };
        let rows: Vec<(String, i64, i64)> = match component {
            Some(c) => stmt
                .query_map(duckdb::params![c.as_str()], map_row)?
                .collect::<Result<_, _>>()?,
            None => stmt.query_map([], map_row)?.collect::<Result<_, _>>()?,
        };

        let mut records = Vec::new();
        for (name, version, ms) in rows {
            let component = ComponentName::try_new(name.clone()).ok_or_else(|| {
                DbError::ExecutionError(format!("invalid component name in history: {name}"))
            })?;
            records.push(VersionRecord {
                component,
                version: SchemaVersion::new(version),
                recorded_at: from_millis(ms),
            });
        }
        Ok(records)
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
