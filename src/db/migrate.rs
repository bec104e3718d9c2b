//! Schema migrations for the log database, tracked with `PRAGMA user_version`.

use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Ordered list of migrations; entry `n` moves the schema to version `n + 1`.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "create_log_table",
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    ),
    (
        "index_log_operation",
        "CREATE INDEX IF NOT EXISTS idx_log_operation ON log(operation);",
    ),
];

pub fn schema_version(conn: &Connection) -> AppResult<usize> {
    let v: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    usize::try_from(v).map_err(|_| AppError::Migration(format!("negative user_version {}", v)))
}

/// Apply every migration newer than the stored schema version.
/// Returns the names of the migrations that ran.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    let current = schema_version(conn)?;
    if current > MIGRATIONS.len() {
        return Err(AppError::Migration(format!(
            "database schema version {} is newer than this program ({})",
            current,
            MIGRATIONS.len()
        )));
    }

    let mut applied = Vec::new();
    for (idx, (name, sql)) in MIGRATIONS.iter().enumerate().skip(current) {
        conn.execute_batch(&format!(
            "BEGIN;\n{}\nPRAGMA user_version = {};\nCOMMIT;",
            sql,
            idx + 1
        ))
        .map_err(|e| AppError::Migration(format!("{}: {}", name, e)))?;
        applied.push(*name);
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_run_once() {
        let conn = Connection::open_in_memory().unwrap();

        let first = run_pending_migrations(&conn).unwrap();
        assert_eq!(first, vec!["create_log_table", "index_log_operation"]);
        assert_eq!(schema_version(&conn).unwrap(), MIGRATIONS.len());

        let second = run_pending_migrations(&conn).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn newer_schema_is_refused() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA user_version = 99;").unwrap();
        assert!(matches!(
            run_pending_migrations(&conn),
            Err(AppError::Migration(_))
        ));
    }
}
